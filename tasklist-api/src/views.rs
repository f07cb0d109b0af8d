//! Server-rendered HTML views
//!
//! Every interpolated value goes through [`escape`]. Pages carry no inline
//! script; behaviour is attached by `/static/app.js` through `data-*` hooks.

use tasklist_shared::models::user::User;

/// Escapes text for use in HTML element content and quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #f3f4f6; margin: 0; }
main { max-width: 36rem; margin: 3rem auto; background: #fff; padding: 2rem; border-radius: 0.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
h1 { margin-top: 0; }
label { display: block; margin: 0.75rem 0 0.25rem; font-weight: 600; }
input[type=text], input[type=email], input[type=password] { width: 100%; padding: 0.5rem; box-sizing: border-box; border: 1px solid #d1d5db; border-radius: 0.25rem; }
button { padding: 0.5rem 1rem; border: 0; border-radius: 0.25rem; background: #2563eb; color: #fff; cursor: pointer; }
button.link { background: none; color: #2563eb; padding: 0; }
button.danger { background: #dc2626; }
.error { color: #b91c1c; min-height: 1.25rem; }
.todo { display: flex; align-items: center; gap: 0.5rem; padding: 0.5rem 0; border-bottom: 1px solid #e5e7eb; }
.todo span { flex: 1; }
.todo.done span { text-decoration: line-through; color: #6b7280; }
.notice { background: #fef3c7; padding: 0.75rem; border-radius: 0.25rem; }
header { display: flex; justify-content: space-between; align-items: center; }
[hidden] { display: none !important; }
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
<script src="/static/app.js" defer></script>
</head>
<body>
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    )
}

fn sign_in_form() -> &'static str {
    r#"<form data-auth-form="sign-in" data-redirect="/">
<label for="signin-email">Email</label>
<input id="signin-email" name="email" type="email" autocomplete="email" required>
<label for="signin-password">Password</label>
<input id="signin-password" name="password" type="password" autocomplete="current-password" required>
<p class="error" data-error></p>
<button type="submit">Sign in</button>
</form>"#
}

fn sign_up_form() -> &'static str {
    r#"<form data-auth-form="sign-up" data-redirect="/">
<label for="signup-name">Name</label>
<input id="signup-name" name="name" type="text" autocomplete="name" required>
<label for="signup-email">Email</label>
<input id="signup-email" name="email" type="email" autocomplete="email" required>
<label for="signup-password">Password</label>
<input id="signup-password" name="password" type="password" autocomplete="new-password" minlength="8" required>
<p class="error" data-error></p>
<button type="submit">Create account</button>
</form>"#
}

/// `/login`
pub fn login_page() -> String {
    layout(
        "Sign in",
        &format!(
            "<h1>Sign in</h1>\n{}\n<p>No account yet? <a href=\"/register\">Register</a></p>",
            sign_in_form()
        ),
    )
}

/// `/register`
pub fn register_page() -> String {
    layout(
        "Register",
        &format!(
            "<h1>Create an account</h1>\n{}\n<p>Already registered? <a href=\"/login\">Sign in</a></p>",
            sign_up_form()
        ),
    )
}

/// `/` for guests: sign-in form with a toggle to the sign-up form
pub fn guest_home() -> String {
    let body = format!(
        r#"<h1>My ToDos</h1>
<section data-auth-panel="sign-in">
<h2>Sign in</h2>
{sign_in}
<p>No account yet? <button type="button" class="link" data-auth-toggle="sign-up">Register</button></p>
</section>
<section data-auth-panel="sign-up" hidden>
<h2>Create an account</h2>
{sign_up}
<p>Already registered? <button type="button" class="link" data-auth-toggle="sign-in">Sign in</button></p>
</section>"#,
        sign_in = sign_in_form(),
        sign_up = sign_up_form(),
    );

    layout("My ToDos", &body)
}

/// `/` for a signed-in user; the list itself is filled in by the script
pub fn todo_home(user: &User) -> String {
    let body = format!(
        r#"<header>
<h1>My ToDos</h1>
<button type="button" data-sign-out>Sign out</button>
</header>
<p>Welcome, {name}!</p>
<form data-todo-form>
<label for="todo-title">New todo</label>
<input id="todo-title" name="title" type="text" maxlength="500" placeholder="What needs doing?" required>
<p class="error" data-error></p>
<button type="submit">Add</button>
</form>
<ul data-todo-list></ul>
<p data-todo-empty hidden>No todos yet. Add one above.</p>"#,
        name = escape(&user.name),
    );

    layout("My ToDos", &body)
}

/// Shown to signed-in users without admin rights
pub fn access_denied() -> String {
    layout(
        "Access denied",
        r#"<h1>Access denied</h1>
<p>You need administrator privileges to view this page.</p>
<p><a href="/">Back to your todos</a></p>"#,
    )
}

/// `/admin` for administrators
pub fn admin_dashboard(user: &User) -> String {
    let body = format!(
        r#"<h1>Admin dashboard</h1>
<dl>
<dt>Email</dt><dd>{email}</dd>
<dt>Name</dt><dd>{name}</dd>
<dt>Admin</dt><dd>{admin}</dd>
</dl>
<p class="notice">This area contains sensitive administrative functions.</p>
<p><a href="/">Back to your todos</a></p>"#,
        email = escape(&user.email),
        name = escape(&user.name),
        admin = if user.is_admin { "Yes" } else { "No" },
    );

    layout("Admin", &body)
}

pub fn not_found() -> String {
    layout(
        "Not found",
        r#"<h1>Page not found</h1>
<p><a href="/">Go home</a></p>"#,
    )
}

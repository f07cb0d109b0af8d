/// HTML pages
///
/// All of these sit behind the session gate. Guests can reach `/`,
/// `/login` and `/register`; `/admin` only renders with an
/// [`AdminGrant`] issued by the gate.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{middleware::session_gate::AdminGrant, session::MaybeUser, views};

/// `/`: todo list for users, sign-in/sign-up for guests
pub async fn home(MaybeUser(context): MaybeUser) -> Html<String> {
    match context {
        Some(context) => Html(views::todo_home(&context.user)),
        None => Html(views::guest_home()),
    }
}

/// `/login`; signed-in users go straight home
pub async fn login(MaybeUser(context): MaybeUser) -> Response {
    match context {
        Some(_) => Redirect::to("/").into_response(),
        None => Html(views::login_page()).into_response(),
    }
}

/// `/register`; signed-in users go straight home
pub async fn register(MaybeUser(context): MaybeUser) -> Response {
    match context {
        Some(_) => Redirect::to("/").into_response(),
        None => Html(views::register_page()).into_response(),
    }
}

/// `/admin`
pub async fn admin(grant: AdminGrant) -> Html<String> {
    Html(views::admin_dashboard(&grant.context().user))
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(views::not_found()))
}

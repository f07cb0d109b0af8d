//! # Tasklist Seed Library
//!
//! Demo data for local development: five users sharing one password, each
//! with a random handful of todos drawn from a fixed template list.
//!
//! Seeding is idempotent per user. A user whose email already exists is
//! left alone, todos included, so re-running only fills in what is missing.
//!
//! ## Example
//!
//! ```no_run
//! use rand::{rngs::StdRng, SeedableRng};
//! use tasklist_seed::{seed, SeedOptions};
//! use tasklist_shared::store::MemoryStore;
//!
//! # async fn example() -> Result<(), tasklist_seed::SeedError> {
//! let store = MemoryStore::new();
//! let report = seed(&store, &SeedOptions::default(), &mut StdRng::from_entropy()).await?;
//! println!("{} users, {} todos", report.users_created, report.todos_created);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rand::{seq::SliceRandom, Rng};
use tasklist_shared::{
    auth::password::{hash_password_blocking, PasswordError},
    models::{todo::CreateTodo, user::CreateUser},
    store::{Store, StoreError},
};
use tracing::{debug, info};

/// Password shared by every demo user
pub const DEMO_PASSWORD: &str = "password123";

/// Fewest and most todos given to a new user
pub const MIN_TODOS_PER_USER: usize = 5;
pub const MAX_TODOS_PER_USER: usize = 10;

/// Todos are backdated up to this many days
pub const TODO_AGE_DAYS: i64 = 30;

/// A demo account
#[derive(Debug, Clone, Copy)]
pub struct DemoUser {
    pub email: &'static str,
    pub name: &'static str,
    /// Registration date as (year, month, day)
    pub joined: (i32, u32, u32),
}

pub const DEMO_USERS: [DemoUser; 5] = [
    DemoUser { email: "alice@example.com", name: "Alice Johnson", joined: (2024, 1, 15) },
    DemoUser { email: "bob@example.com", name: "Bob Smith", joined: (2024, 2, 20) },
    DemoUser { email: "charlie@example.com", name: "Charlie Brown", joined: (2024, 3, 10) },
    DemoUser { email: "diana@example.com", name: "Diana Prince", joined: (2024, 4, 5) },
    DemoUser { email: "eve@example.com", name: "Eve Wilson", joined: (2024, 5, 12) },
];

#[derive(Debug, Clone, Copy)]
pub struct TodoTemplate {
    pub title: &'static str,
    pub completed: bool,
}

pub const TODO_TEMPLATES: [TodoTemplate; 15] = [
    TodoTemplate { title: "Draft the project proposal", completed: true },
    TodoTemplate { title: "Prepare for the team meeting", completed: true },
    TodoTemplate { title: "Build the client presentation", completed: false },
    TodoTemplate { title: "Do a code review", completed: false },
    TodoTemplate { title: "Submit the weekly report", completed: false },
    TodoTemplate { title: "Back up the database", completed: true },
    TodoTemplate { title: "Write the design doc for the new feature", completed: false },
    TodoTemplate { title: "Fix bug #1234", completed: true },
    TodoTemplate { title: "Update the documentation", completed: false },
    TodoTemplate { title: "Add test cases", completed: false },
    TodoTemplate { title: "Investigate performance improvements", completed: false },
    TodoTemplate { title: "Run the security audit", completed: true },
    TodoTemplate { title: "Analyze user feedback", completed: false },
    TodoTemplate { title: "Improve the CI/CD pipeline", completed: false },
    TodoTemplate { title: "Write the API documentation", completed: true },
];

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("No user with email {0}; cannot grant admin")]
    UnknownAdmin(String),

    #[error("Invalid join date for {0}")]
    InvalidDate(&'static str),
}

/// What to do besides creating the demo users
#[derive(Debug, Clone, Default)]
pub struct SeedOptions {
    /// Delete every user (and their data) first
    pub reset: bool,

    /// Email of a user to mark as admin afterwards
    pub admin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users_created: usize,
    pub users_skipped: usize,
    pub todos_created: usize,
    pub admin: Option<String>,
}

impl DemoUser {
    pub fn joined_at(&self) -> Result<DateTime<Utc>, SeedError> {
        let (year, month, day) = self.joined;
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or(SeedError::InvalidDate(self.email))?;

        Ok(Utc.from_utc_datetime(&naive))
    }
}

/// Picks 5-10 distinct templates with creation times in the last 30 days
pub fn random_todos<R>(rng: &mut R, now: DateTime<Utc>) -> Vec<(TodoTemplate, DateTime<Utc>)>
where
    R: Rng + ?Sized,
{
    let count = rng.gen_range(MIN_TODOS_PER_USER..=MAX_TODOS_PER_USER);
    let window_ms = TODO_AGE_DAYS * 24 * 60 * 60 * 1000;

    TODO_TEMPLATES
        .choose_multiple(rng, count)
        .copied()
        .collect::<Vec<_>>()
        .into_iter()
        .map(|template| {
            let age = Duration::milliseconds(rng.gen_range(0..window_ms));
            (template, now - age)
        })
        .collect()
}

/// Seeds `store` with the demo users and their todos
pub async fn seed<R>(
    store: &dyn Store,
    options: &SeedOptions,
    rng: &mut R,
) -> Result<SeedReport, SeedError>
where
    R: Rng + ?Sized,
{
    let mut report = SeedReport::default();

    if options.reset {
        store.reset().await?;
        info!("Removed existing users, sessions and todos");
    }

    let now = Utc::now();

    for demo in DEMO_USERS {
        if store.find_user_by_email(demo.email).await?.is_some() {
            debug!(email = demo.email, "User exists, skipping");
            report.users_skipped += 1;
            continue;
        }

        // Fresh salt per user
        let hash = hash_password_blocking(DEMO_PASSWORD.to_string()).await?;

        let user = store
            .create_user_with_credential(
                CreateUser {
                    email: demo.email.to_string(),
                    name: demo.name.to_string(),
                    email_verified: true,
                    created_at: Some(demo.joined_at()?),
                },
                hash,
            )
            .await?;
        report.users_created += 1;

        let todos = random_todos(rng, now);
        for (template, created_at) in &todos {
            store
                .create_todo(CreateTodo {
                    user_id: user.id,
                    title: template.title.to_string(),
                    completed: template.completed,
                    created_at: Some(*created_at),
                })
                .await?;
        }
        report.todos_created += todos.len();

        info!(email = demo.email, todos = todos.len(), "Created demo user");
    }

    if let Some(email) = &options.admin {
        let user = store
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| SeedError::UnknownAdmin(email.clone()))?;

        store.set_user_admin(user.id, true).await?;
        info!(email = %user.email, "Granted admin");
        report.admin = Some(user.email);
    }

    Ok(report)
}

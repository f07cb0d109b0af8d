//! # Tasklist Seed
//!
//! Populates the database with demo users and todos.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/tasklist cargo run -p tasklist-seed -- --admin diana@example.com
//! ```

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tasklist_seed::{seed, SeedOptions, DEMO_PASSWORD, DEMO_USERS};
use tasklist_shared::{
    db::{
        migrations::{ensure_database_exists, run_migrations},
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    store::PgStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Seed the tasklist database with demo data
#[derive(Debug, Parser)]
#[command(name = "tasklist-seed", version, about)]
struct Args {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Delete all users, sessions and todos before seeding
    #[arg(long)]
    reset: bool,

    /// Mark this user as an administrator
    #[arg(long, value_name = "EMAIL")]
    admin: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklist_seed=info,tasklist_shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    tracing::info!("Starting seed...");

    ensure_database_exists(&args.database_url).await?;
    let pool = create_pool(DatabaseConfig::from_url(&args.database_url)).await?;
    run_migrations(&pool).await?;

    let store = PgStore::new(pool.clone());
    let options = SeedOptions {
        reset: args.reset,
        admin: args.admin,
    };

    let result = seed(&store, &options, &mut StdRng::from_entropy()).await;
    close_pool(pool).await;
    let report = result?;

    tracing::info!(
        users_created = report.users_created,
        users_skipped = report.users_skipped,
        todos_created = report.todos_created,
        "Seed completed"
    );

    let emails: Vec<&str> = DEMO_USERS.iter().map(|user| user.email).collect();
    println!();
    println!("=== Login Credentials ===");
    println!("Email: {}", emails.join(", "));
    println!("Password: {}", DEMO_PASSWORD);
    if let Some(admin) = &report.admin {
        println!("Admin: {}", admin);
    }

    Ok(())
}

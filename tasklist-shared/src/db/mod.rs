/// Database layer for Tasklist
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: embedded schema migrations (`migrations/` at the workspace root)
///
/// Row types and their SQL live in the `models` module; the `store` module
/// wraps both behind the [`Store`](crate::store::Store) trait.
///
/// # Example
///
/// ```no_run
/// use tasklist_shared::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::from_url(std::env::var("DATABASE_URL")?)).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

pub mod migrations;
pub mod pool;

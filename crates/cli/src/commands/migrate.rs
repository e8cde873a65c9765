//! Database migration command.
//!
//! Applies the migrations embedded from `crates/web/migrations/`:
//!
//! ```text
//! migrations/
//! ├── 20261019000001_create_schema.sql
//! ├── 20261019000002_create_users.sql
//! ├── 20261019000003_create_user_profiles.sql
//! ├── 20261019000004_create_wardrobe_items.sql
//! └── 20261019000005_create_sessions.sql
//! ```

use super::{CommandError, connect};

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

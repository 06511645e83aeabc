//! Embedded schema migrations.

use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};

/// All migrations, compiled into the binary.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply pending migrations.
pub async fn run(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

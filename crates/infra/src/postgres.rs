//! Postgres-backed component store.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::warn;

use railstock_catalog::{Component, ComponentDraft, ComponentStore, StoreError};
use railstock_core::ComponentId;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Component store over a sqlx connection pool.
///
/// The pool is the only shared state; every call is a single independent
/// statement (no cross-call transactions). Writers serialize at single-row
/// granularity through the conditional update, never at table granularity.
pub struct PgComponentStore {
    pool: PgPool,
}

impl PgComponentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComponentStore for PgComponentStore {
    async fn find_by_id(&self, id: ComponentId) -> Result<Option<Component>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, unique_number, can_assign_quantity, quantity,
                   version, created_at, updated_at
            FROM components
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.map(|r| component_from_row(&r)).transpose().map_err(storage)
    }

    async fn list(
        &self,
        filter: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Component>, u64), StoreError> {
        let pattern = filter.map(like_pattern);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM components
            WHERE $1::text IS NULL
               OR name ILIKE $1
               OR unique_number ILIKE $1
            "#,
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(storage)?;

        let rows = sqlx::query(
            r#"
            SELECT id, name, unique_number, can_assign_quantity, quantity,
                   version, created_at, updated_at
            FROM components
            WHERE $1::text IS NULL
               OR name ILIKE $1
               OR unique_number ILIKE $1
            ORDER BY id ASC
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(pattern.as_deref())
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        let items = rows
            .iter()
            .map(component_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(storage)?;
        Ok((items, total as u64))
    }

    async fn insert(&self, draft: ComponentDraft) -> Result<Component, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO components (name, unique_number, can_assign_quantity, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, unique_number, can_assign_quantity, quantity,
                      version, created_at, updated_at
            "#,
        )
        .bind(draft.name())
        .bind(draft.unique_number())
        .bind(draft.can_assign_quantity())
        .bind(draft.quantity())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => component_from_row(&row).map_err(storage),
            Err(err) if sqlstate(&err).as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(StoreError::UniqueConflict(draft.unique_number().to_string()))
            }
            Err(err) => Err(storage(err)),
        }
    }

    async fn update(&self, component: &Component) -> Result<Component, StoreError> {
        // can_assign_quantity is fixed at creation and deliberately absent
        // from the SET list.
        let result = sqlx::query(
            r#"
            UPDATE components
            SET name = $2,
                unique_number = $3,
                quantity = $4,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1 AND version = $5
            RETURNING id, name, unique_number, can_assign_quantity, quantity,
                      version, created_at, updated_at
            "#,
        )
        .bind(component.id.as_i64())
        .bind(&component.name)
        .bind(&component.unique_number)
        .bind(component.quantity)
        .bind(component.version)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(row)) => component_from_row(&row).map_err(storage),
            Ok(None) => {
                // Zero rows: either the id is gone or the version is stale.
                let exists: bool = sqlx::query_scalar(
                    "SELECT EXISTS (SELECT 1 FROM components WHERE id = $1)",
                )
                .bind(component.id.as_i64())
                .fetch_one(&self.pool)
                .await
                .map_err(storage)?;

                if exists {
                    warn!(component_id = %component.id, "stale version on conditional update");
                    Err(StoreError::VersionConflict {
                        id: component.id,
                        expected: component.version,
                    })
                } else {
                    Err(StoreError::NotFound(component.id))
                }
            }
            Err(err) if sqlstate(&err).as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(StoreError::UniqueConflict(component.unique_number.clone()))
            }
            Err(err) => Err(storage(err)),
        }
    }

    async fn delete_by_id(&self, id: ComponentId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM components WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(StoreError::NotFound(id)),
            Ok(_) => Ok(()),
            Err(err) if sqlstate(&err).as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
                Err(StoreError::ReferentialConflict(id))
            }
            Err(err) => Err(storage(err)),
        }
    }
}

fn component_from_row(row: &PgRow) -> Result<Component, sqlx::Error> {
    Ok(Component {
        id: ComponentId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        unique_number: row.try_get("unique_number")?,
        can_assign_quantity: row.try_get("can_assign_quantity")?,
        quantity: row.try_get("quantity")?,
        version: row.try_get("version")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Wrap a user-supplied search term into a `%term%` pattern, escaping the
/// LIKE wildcards so they match literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}

fn storage(err: sqlx::Error) -> StoreError {
    warn!(error = %err, "postgres component store failure");
    StoreError::Storage(err.to_string())
}

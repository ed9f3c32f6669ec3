use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;
use wastewatch_domain::shared::DomainError;

/// Maps driver errors into `DomainError` with the operation as context
pub struct RepositoryErrorMapper;

impl RepositoryErrorMapper {
    pub fn map_sqlx_error(error: sqlx::Error, context: &str) -> DomainError {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DomainError::DataIntegrity(format!("{}: {}", context, db.message()))
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                DomainError::DataIntegrity(format!("{}: {}", context, db.message()))
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                DomainError::Infrastructure(format!("{}: {}", context, error))
            }
            _ => DomainError::Repository(format!("{}: {}", context, error)),
        }
    }

    pub fn map_json_error(error: serde_json::Error, context: &str) -> DomainError {
        DomainError::Serialization(format!("{}: {}", context, error))
    }
}

/// Shared pool handle with error-mapped query helpers
#[derive(Clone)]
pub struct SqliteRepositoryBase {
    pool: Arc<SqlitePool>,
}

impl SqliteRepositoryBase {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn execute<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<SqliteQueryResult, DomainError> {
        query
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, context))
    }

    pub async fn fetch_optional<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<Option<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        query
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, context))
    }

    pub async fn fetch_all<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<Vec<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        query
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, context))
    }

    /// Single scalar such as a COUNT or SUM
    pub async fn fetch_scalar<'q>(
        &self,
        query: sqlx::query::QueryScalar<'q, Sqlite, i64, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<i64, DomainError> {
        query
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, context))
    }

    pub async fn begin(&self) -> Result<sqlx::Transaction<'static, Sqlite>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Begin transaction"))
    }
}

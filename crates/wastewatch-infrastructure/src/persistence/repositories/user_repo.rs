use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use wastewatch_domain::shared::{DomainError, UserId};
use wastewatch_domain::user::{User, UserRepository, UserRole};

#[derive(FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    role: String,
    total_points: i64,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn try_into_user(self) -> Result<User, DomainError> {
        let role = UserRole::from_str(&self.role).map_err(|e| {
            DomainError::DataIntegrity(format!("user {}: {}", self.id, e.message()))
        })?;

        Ok(User::from_persistence(
            UserId::from_string(&self.id),
            self.name,
            self.email,
            role,
            self.total_points,
            self.created_at,
        ))
    }
}

pub struct SqliteUserRepository {
    base: SqliteRepositoryBase,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, name, email, role, total_points, created_at
            FROM users
            WHERE id = ?1
        "#;

        let row: Option<UserRow> = self
            .base
            .fetch_optional(sqlx::query_as(query).bind(id.as_str()), "Find user by ID")
            .await?;

        row.map(UserRow::try_into_user).transpose()
    }
}

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use super::ledger::apply_credit;
use crate::persistence::{RepositoryErrorMapper, SqliteRepositoryBase};
use wastewatch_domain::challenge::{ChallengeCompletion, ChallengeRepository};
use wastewatch_domain::shared::{DomainError, UserId};
use wastewatch_domain::user::PointsCredit;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(FromRow)]
struct ChallengeCompletionRow {
    user_id: String,
    challenge_key: String,
    challenge_date: String,
    points: i64,
    notified: bool,
    completed_at: DateTime<Utc>,
}

impl ChallengeCompletionRow {
    fn try_into_completion(self) -> Result<ChallengeCompletion, DomainError> {
        let challenge_date = NaiveDate::parse_from_str(&self.challenge_date, DATE_FORMAT)
            .map_err(|e| {
                DomainError::DataIntegrity(format!(
                    "Invalid challenge_date: {} ({})",
                    self.challenge_date, e
                ))
            })?;

        Ok(ChallengeCompletion {
            user_id: UserId::from_string(&self.user_id),
            challenge_key: self.challenge_key,
            challenge_date,
            points: self.points,
            notified: self.notified,
            completed_at: self.completed_at,
        })
    }
}

pub struct SqliteChallengeRepository {
    base: SqliteRepositoryBase,
}

impl SqliteChallengeRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl ChallengeRepository for SqliteChallengeRepository {
    async fn find_completion(
        &self,
        user_id: &UserId,
        challenge_key: &str,
        challenge_date: NaiveDate,
    ) -> Result<Option<ChallengeCompletion>, DomainError> {
        let query = r#"
            SELECT user_id, challenge_key, challenge_date, points, notified, completed_at
            FROM challenge_completions
            WHERE user_id = ?1 AND challenge_key = ?2 AND challenge_date = ?3
        "#;

        let row: Option<ChallengeCompletionRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(challenge_key)
                    .bind(challenge_date.format(DATE_FORMAT).to_string()),
                "Find challenge completion",
            )
            .await?;

        row.map(ChallengeCompletionRow::try_into_completion).transpose()
    }

    async fn record_completion_if_absent(
        &self,
        completion: &ChallengeCompletion,
        credit: &PointsCredit,
    ) -> Result<bool, DomainError> {
        let mut tx = self.base.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO challenge_completions (
                user_id, challenge_key, challenge_date, points, notified, completed_at
            ) VALUES (?1, ?2, ?3, ?4, 0, ?5)
            ON CONFLICT(user_id, challenge_key, challenge_date) DO NOTHING
            "#,
        )
        .bind(completion.user_id.as_str())
        .bind(&completion.challenge_key)
        .bind(completion.challenge_date.format(DATE_FORMAT).to_string())
        .bind(completion.points)
        .bind(completion.completed_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Insert challenge completion"))?;

        if inserted.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Rollback transaction"))?;
            return Ok(false);
        }

        apply_credit(&mut tx, &completion.user_id, credit, completion.completed_at).await?;

        tx.commit()
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Commit challenge completion"))?;

        Ok(true)
    }

    async fn mark_notified(
        &self,
        user_id: &UserId,
        challenge_key: &str,
        challenge_date: NaiveDate,
    ) -> Result<(), DomainError> {
        let query = r#"
            UPDATE challenge_completions SET notified = 1
            WHERE user_id = ?1 AND challenge_key = ?2 AND challenge_date = ?3
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(user_id.as_str())
                    .bind(challenge_key)
                    .bind(challenge_date.format(DATE_FORMAT).to_string()),
                "Mark challenge notified",
            )
            .await?;

        Ok(())
    }
}

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use wastewatch_domain::shared::{DomainError, UserId};
use wastewatch_domain::stats::{ActivityRepository, TimeWindow};

#[derive(FromRow)]
struct ReportDayRow {
    report_day: String,
}

impl ReportDayRow {
    fn try_into_date(self) -> Result<NaiveDate, DomainError> {
        NaiveDate::parse_from_str(&self.report_day, "%Y-%m-%d").map_err(|e| {
            DomainError::DataIntegrity(format!("Invalid report day: {} ({})", self.report_day, e))
        })
    }
}

/// SQLite date modifier shifting a UTC timestamp to local time
fn offset_modifier(offset: FixedOffset) -> String {
    format!("{:+} seconds", offset.local_minus_utc())
}

pub struct SqliteActivityRepository {
    base: SqliteRepositoryBase,
}

impl SqliteActivityRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl ActivityRepository for SqliteActivityRepository {
    async fn count_reports(&self, user_id: &UserId, window: &TimeWindow) -> Result<i64, DomainError> {
        let query = r#"
            SELECT COUNT(*) FROM reports
            WHERE user_id = ?1
              AND (?2 IS NULL OR created_at >= ?2)
              AND created_at < ?3
        "#;

        self.base
            .fetch_scalar(
                sqlx::query_scalar(query)
                    .bind(user_id.as_str())
                    .bind(window.start)
                    .bind(window.end),
                "Count reports",
            )
            .await
    }

    async fn count_collected(
        &self,
        user_id: &UserId,
        window: &TimeWindow,
    ) -> Result<i64, DomainError> {
        let query = r#"
            SELECT COUNT(*) FROM reports
            WHERE user_id = ?1
              AND status = 'collected'
              AND collected_at IS NOT NULL
              AND (?2 IS NULL OR collected_at >= ?2)
              AND collected_at < ?3
        "#;

        self.base
            .fetch_scalar(
                sqlx::query_scalar(query)
                    .bind(user_id.as_str())
                    .bind(window.start)
                    .bind(window.end),
                "Count collected reports",
            )
            .await
    }

    async fn sum_points(&self, user_id: &UserId, window: &TimeWindow) -> Result<i64, DomainError> {
        let query = r#"
            SELECT COALESCE(SUM(amount), 0) FROM point_transactions
            WHERE user_id = ?1
              AND (?2 IS NULL OR created_at >= ?2)
              AND created_at < ?3
        "#;

        self.base
            .fetch_scalar(
                sqlx::query_scalar(query)
                    .bind(user_id.as_str())
                    .bind(window.start)
                    .bind(window.end),
                "Sum windowed points",
            )
            .await
    }

    async fn report_days(
        &self,
        user_id: &UserId,
        window: &TimeWindow,
        offset: FixedOffset,
    ) -> Result<Vec<NaiveDate>, DomainError> {
        let query = r#"
            SELECT DISTINCT DATE(created_at, ?4) AS report_day
            FROM reports
            WHERE user_id = ?1
              AND (?2 IS NULL OR created_at >= ?2)
              AND created_at < ?3
            ORDER BY report_day DESC
        "#;

        let rows: Vec<ReportDayRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(window.start)
                    .bind(window.end)
                    .bind(offset_modifier(offset)),
                "Find report days",
            )
            .await?;

        rows.into_iter().map(ReportDayRow::try_into_date).collect()
    }
}

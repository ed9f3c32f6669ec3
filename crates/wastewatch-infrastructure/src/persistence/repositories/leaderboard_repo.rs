use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use wastewatch_domain::leaderboard::{LeaderboardRepository, LeaderboardRow, LeaderboardType};
use wastewatch_domain::shared::{DomainError, PageRequest, UserId};
use wastewatch_domain::stats::TimeWindow;

#[derive(FromRow)]
struct StandingRow {
    user_id: String,
    name: String,
    email: String,
    metric_value: i64,
    created_at: DateTime<Utc>,
}

impl StandingRow {
    fn into_row(self) -> LeaderboardRow {
        LeaderboardRow {
            user_id: UserId::from_string(&self.user_id),
            name: self.name,
            email: self.email,
            metric_value: self.metric_value,
            created_at: self.created_at,
        }
    }
}

/// Per-user aggregate joined onto `users`; `None` means the stored total
fn metric_subquery(leaderboard_type: LeaderboardType, window: &TimeWindow) -> Option<&'static str> {
    match leaderboard_type {
        LeaderboardType::Points if window.is_all_time() => None,
        LeaderboardType::Points => Some(
            r#"SELECT user_id, SUM(amount) AS metric FROM point_transactions
               WHERE (? IS NULL OR created_at >= ?) AND created_at < ?
               GROUP BY user_id"#,
        ),
        LeaderboardType::Reports => Some(
            r#"SELECT user_id, COUNT(*) AS metric FROM reports
               WHERE (? IS NULL OR created_at >= ?) AND created_at < ?
               GROUP BY user_id"#,
        ),
        LeaderboardType::Collected => Some(
            r#"SELECT user_id, COUNT(*) AS metric FROM reports
               WHERE status = 'collected' AND collected_at IS NOT NULL
                 AND (? IS NULL OR collected_at >= ?) AND collected_at < ?
               GROUP BY user_id"#,
        ),
    }
}

fn standings_sql(subquery: Option<&str>, paged: bool) -> String {
    let (metric, join) = match subquery {
        Some(sub) => (
            "COALESCE(m.metric, 0)".to_string(),
            format!("LEFT JOIN ({sub}) m ON m.user_id = u.id"),
        ),
        None => ("u.total_points".to_string(), String::new()),
    };
    let limit = if paged { "LIMIT ? OFFSET ?" } else { "" };

    format!(
        r#"
        SELECT u.id AS user_id, u.name, u.email, {metric} AS metric_value, u.created_at
        FROM users u
        {join}
        WHERE u.role != 'admin'
        ORDER BY metric_value DESC, u.created_at ASC, u.id ASC
        {limit}
        "#
    )
}

pub struct SqliteLeaderboardRepository {
    base: SqliteRepositoryBase,
}

impl SqliteLeaderboardRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }

    async fn standings(
        &self,
        leaderboard_type: LeaderboardType,
        window: &TimeWindow,
        page: Option<PageRequest>,
    ) -> Result<Vec<LeaderboardRow>, DomainError> {
        let subquery = metric_subquery(leaderboard_type, window);
        let sql = standings_sql(subquery, page.is_some());

        let mut query = sqlx::query_as::<_, StandingRow>(&sql);
        if subquery.is_some() {
            query = query.bind(window.start).bind(window.start).bind(window.end);
        }
        if let Some(page) = page {
            query = query
                .bind(i64::from(page.limit()))
                .bind(page.offset() as i64);
        }

        let rows = self
            .base
            .fetch_all(query, "Fetch leaderboard standings")
            .await?;

        Ok(rows.into_iter().map(StandingRow::into_row).collect())
    }
}

#[async_trait]
impl LeaderboardRepository for SqliteLeaderboardRepository {
    async fn fetch_rows(
        &self,
        leaderboard_type: LeaderboardType,
        window: &TimeWindow,
        page: PageRequest,
    ) -> Result<Vec<LeaderboardRow>, DomainError> {
        self.standings(leaderboard_type, window, Some(page)).await
    }

    async fn fetch_all_rows(
        &self,
        leaderboard_type: LeaderboardType,
        window: &TimeWindow,
    ) -> Result<Vec<LeaderboardRow>, DomainError> {
        self.standings(leaderboard_type, window, None).await
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use super::badge_repo::BadgeRow;
use super::ledger::apply_credit;
use crate::persistence::{RepositoryErrorMapper, SqliteRepositoryBase};
use wastewatch_domain::shared::{BadgeId, DomainError, PageRequest, UserBadgeId, UserId};
use wastewatch_domain::user::PointsCredit;
use wastewatch_domain::user_badge::{
    BadgeProgress, UserBadge, UserBadgeDetails, UserBadgeQuery, UserBadgeRepository,
};

const USER_BADGE_COLUMNS: &str = r#"
    id, user_id, badge_id, current_value, target_value, percentage,
    is_completed, earned_at, notified, created_at, updated_at
"#;

#[derive(FromRow)]
struct UserBadgeRow {
    id: String,
    user_id: String,
    badge_id: String,
    current_value: i64,
    target_value: i64,
    percentage: i64,
    is_completed: bool,
    earned_at: Option<DateTime<Utc>>,
    notified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserBadgeRow {
    fn into_user_badge(self) -> UserBadge {
        UserBadge::from_persistence(
            UserBadgeId::from_string(&self.id),
            UserId::from_string(&self.user_id),
            BadgeId::from_string(&self.badge_id),
            BadgeProgress::from_persistence(
                self.current_value,
                self.target_value,
                self.percentage.clamp(0, 100) as u8,
            ),
            self.is_completed,
            self.earned_at,
            self.notified,
            self.created_at,
            self.updated_at,
        )
    }
}

/// A user_badges row joined with its badge; badge columns are prefixed `b_`
#[derive(FromRow)]
struct UserBadgeDetailsRow {
    #[sqlx(flatten)]
    user_badge: UserBadgeRow,
    b_id: String,
    b_name: String,
    b_description: String,
    b_icon: String,
    b_color: String,
    b_category: String,
    b_criteria_type: String,
    b_criteria_value: i64,
    b_criteria_timeframe: String,
    b_rarity: String,
    b_points: i64,
    b_is_active: bool,
    b_created_at: DateTime<Utc>,
}

impl UserBadgeDetailsRow {
    fn try_into_details(self) -> Result<UserBadgeDetails, DomainError> {
        let badge = BadgeRow {
            id: self.b_id,
            name: self.b_name,
            description: self.b_description,
            icon: self.b_icon,
            color: self.b_color,
            category: self.b_category,
            criteria_type: self.b_criteria_type,
            criteria_value: self.b_criteria_value,
            criteria_timeframe: self.b_criteria_timeframe,
            rarity: self.b_rarity,
            points: self.b_points,
            is_active: self.b_is_active,
            created_at: self.b_created_at,
        }
        .try_into_badge()?;

        Ok(UserBadgeDetails {
            user_badge: self.user_badge.into_user_badge(),
            badge,
        })
    }
}

pub struct SqliteUserBadgeRepository {
    base: SqliteRepositoryBase,
}

impl SqliteUserBadgeRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl UserBadgeRepository for SqliteUserBadgeRepository {
    async fn find(
        &self,
        user_id: &UserId,
        badge_id: &BadgeId,
    ) -> Result<Option<UserBadge>, DomainError> {
        let query =
            format!("SELECT {USER_BADGE_COLUMNS} FROM user_badges WHERE user_id = ?1 AND badge_id = ?2");

        let row: Option<UserBadgeRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query)
                    .bind(user_id.as_str())
                    .bind(badge_id.as_str()),
                "Find user badge",
            )
            .await?;

        Ok(row.map(UserBadgeRow::into_user_badge))
    }

    async fn insert_if_absent(&self, record: &UserBadge) -> Result<bool, DomainError> {
        let query = r#"
            INSERT INTO user_badges (
                id, user_id, badge_id, current_value, target_value, percentage,
                is_completed, earned_at, notified, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(user_id, badge_id) DO NOTHING
        "#;

        let progress = record.progress();
        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(record.id().as_str())
                    .bind(record.user_id().as_str())
                    .bind(record.badge_id().as_str())
                    .bind(progress.current())
                    .bind(progress.target())
                    .bind(i64::from(progress.percentage()))
                    .bind(record.is_completed())
                    .bind(record.earned_at())
                    .bind(record.notified())
                    .bind(record.created_at())
                    .bind(record.updated_at()),
                "Insert user badge",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_progress(&self, record: &UserBadge) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE user_badges
            SET current_value = ?1, percentage = ?2, updated_at = ?3
            WHERE user_id = ?4 AND badge_id = ?5 AND is_completed = 0
        "#;

        let progress = record.progress();
        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(progress.current())
                    .bind(i64::from(progress.percentage()))
                    .bind(record.updated_at())
                    .bind(record.user_id().as_str())
                    .bind(record.badge_id().as_str()),
                "Update user badge progress",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn complete_if_pending(
        &self,
        record: &UserBadge,
        credit: &PointsCredit,
    ) -> Result<bool, DomainError> {
        let earned_at = record.earned_at().ok_or_else(|| {
            DomainError::Validation(format!(
                "User badge {} has no earned_at; it is not completed",
                record.id()
            ))
        })?;

        let mut tx = self.base.begin().await?;

        let progress = record.progress();
        let updated = sqlx::query(
            r#"
            UPDATE user_badges
            SET current_value = ?1, percentage = 100, is_completed = 1,
                earned_at = ?2, updated_at = ?2
            WHERE user_id = ?3 AND badge_id = ?4 AND is_completed = 0
            "#,
        )
        .bind(progress.current())
        .bind(earned_at)
        .bind(record.user_id().as_str())
        .bind(record.badge_id().as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Complete user badge"))?;

        if updated.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Rollback transaction"))?;
            return Ok(false);
        }

        apply_credit(&mut tx, record.user_id(), credit, earned_at).await?;

        tx.commit()
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Commit badge award"))?;

        Ok(true)
    }

    async fn mark_notified(&self, id: &UserBadgeId) -> Result<(), DomainError> {
        self.base
            .execute(
                sqlx::query("UPDATE user_badges SET notified = 1 WHERE id = ?1").bind(id.as_str()),
                "Mark user badge notified",
            )
            .await?;

        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        query: UserBadgeQuery,
        page: PageRequest,
    ) -> Result<(Vec<UserBadgeDetails>, u64), DomainError> {
        let total = self
            .base
            .fetch_scalar(
                sqlx::query_scalar(
                    r#"
                    SELECT COUNT(*) FROM user_badges
                    WHERE user_id = ?1 AND (?2 = 0 OR is_completed = 1)
                    "#,
                )
                .bind(user_id.as_str())
                .bind(query.completed_only),
                "Count user badges",
            )
            .await?;

        let sql = r#"
            SELECT
                ub.id, ub.user_id, ub.badge_id, ub.current_value, ub.target_value,
                ub.percentage, ub.is_completed, ub.earned_at, ub.notified,
                ub.created_at, ub.updated_at,
                b.id AS b_id, b.name AS b_name, b.description AS b_description,
                b.icon AS b_icon, b.color AS b_color, b.category AS b_category,
                b.criteria_type AS b_criteria_type, b.criteria_value AS b_criteria_value,
                b.criteria_timeframe AS b_criteria_timeframe, b.rarity AS b_rarity,
                b.points AS b_points, b.is_active AS b_is_active, b.created_at AS b_created_at
            FROM user_badges ub
            INNER JOIN badges b ON b.id = ub.badge_id
            WHERE ub.user_id = ?1 AND (?2 = 0 OR ub.is_completed = 1)
            ORDER BY ub.is_completed DESC, ub.earned_at DESC, ub.percentage DESC, b.name ASC
            LIMIT ?3 OFFSET ?4
        "#;

        let rows: Vec<UserBadgeDetailsRow> = self
            .base
            .fetch_all(
                sqlx::query_as(sql)
                    .bind(user_id.as_str())
                    .bind(query.completed_only)
                    .bind(i64::from(page.limit()))
                    .bind(page.offset() as i64),
                "List user badges",
            )
            .await?;

        let items = rows
            .into_iter()
            .map(UserBadgeDetailsRow::try_into_details)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((items, total.max(0) as u64))
    }

    async fn count_completed(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let count = self
            .base
            .fetch_scalar(
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM user_badges WHERE user_id = ?1 AND is_completed = 1",
                )
                .bind(user_id.as_str()),
                "Count completed user badges",
            )
            .await?;

        Ok(count.max(0) as u64)
    }
}

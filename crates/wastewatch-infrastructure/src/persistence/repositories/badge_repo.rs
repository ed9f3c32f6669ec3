use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use wastewatch_domain::badge::{
    Badge, BadgeCategory, BadgeCriteria, BadgeFilter, BadgeRarity, BadgeRepository,
};
use wastewatch_domain::shared::{BadgeId, DomainError};

const BADGE_COLUMNS: &str = r#"
    id, name, description, icon, color, category,
    criteria_type, criteria_value, criteria_timeframe,
    rarity, points, is_active, created_at
"#;

#[derive(FromRow)]
pub(crate) struct BadgeRow {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) icon: String,
    pub(crate) color: String,
    pub(crate) category: String,
    pub(crate) criteria_type: String,
    pub(crate) criteria_value: i64,
    pub(crate) criteria_timeframe: String,
    pub(crate) rarity: String,
    pub(crate) points: i64,
    pub(crate) is_active: bool,
    pub(crate) created_at: DateTime<Utc>,
}

impl BadgeRow {
    /// Fails with `InvalidCriteria` when a stored criteria type is unknown
    pub(crate) fn try_into_badge(self) -> Result<Badge, DomainError> {
        let criteria =
            BadgeCriteria::parse(&self.criteria_type, self.criteria_value, &self.criteria_timeframe)
                .map_err(|e| {
                    DomainError::InvalidCriteria(format!("badge '{}': {}", self.name, e.message()))
                })?;

        Ok(Badge::from_persistence(
            BadgeId::from_string(&self.id),
            self.name,
            self.description,
            self.icon,
            self.color,
            BadgeCategory::from_str(&self.category)?,
            criteria,
            BadgeRarity::from_str(&self.rarity)?,
            self.points,
            self.is_active,
            self.created_at,
        ))
    }
}

pub struct SqliteBadgeRepository {
    base: SqliteRepositoryBase,
}

impl SqliteBadgeRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl BadgeRepository for SqliteBadgeRepository {
    async fn insert_if_absent(&self, badge: &Badge) -> Result<bool, DomainError> {
        let query = r#"
            INSERT INTO badges (
                id, name, description, icon, color, category,
                criteria_type, criteria_value, criteria_timeframe,
                rarity, points, is_active, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            ON CONFLICT(name) DO NOTHING
        "#;

        let criteria = badge.criteria();
        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(badge.id().as_str())
                    .bind(badge.name())
                    .bind(badge.description())
                    .bind(badge.icon())
                    .bind(badge.color())
                    .bind(badge.category().as_str())
                    .bind(criteria.criteria_type().as_str())
                    .bind(criteria.value())
                    .bind(criteria.timeframe().as_str())
                    .bind(badge.rarity().as_str())
                    .bind(badge.points())
                    .bind(badge.is_active())
                    .bind(badge.created_at()),
                "Insert badge",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update(&self, badge: &Badge) -> Result<(), DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("UPDATE badges SET is_active = ?1 WHERE id = ?2")
                    .bind(badge.is_active())
                    .bind(badge.id().as_str()),
                "Update badge",
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BadgeNotFound(badge.id().to_string()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &BadgeId) -> Result<Option<Badge>, DomainError> {
        let query = format!("SELECT {BADGE_COLUMNS} FROM badges WHERE id = ?1");
        let row: Option<BadgeRow> = self
            .base
            .fetch_optional(sqlx::query_as(&query).bind(id.as_str()), "Find badge by ID")
            .await?;

        row.map(BadgeRow::try_into_badge).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Badge>, DomainError> {
        let query = format!("SELECT {BADGE_COLUMNS} FROM badges WHERE name = ?1");
        let row: Option<BadgeRow> = self
            .base
            .fetch_optional(sqlx::query_as(&query).bind(name), "Find badge by name")
            .await?;

        row.map(BadgeRow::try_into_badge).transpose()
    }

    async fn find_all(&self, filter: &BadgeFilter) -> Result<Vec<Badge>, DomainError> {
        let query = format!(
            r#"
            SELECT {BADGE_COLUMNS} FROM badges
            WHERE (?1 IS NULL OR category = ?1)
              AND (?2 IS NULL OR rarity = ?2)
              AND (?3 IS NULL OR is_active = ?3)
            ORDER BY category ASC, name ASC
            "#
        );

        let rows: Vec<BadgeRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query)
                    .bind(filter.category.map(|c| c.as_str()))
                    .bind(filter.rarity.map(|r| r.as_str()))
                    .bind(filter.is_active),
                "Find badges",
            )
            .await?;

        rows.into_iter().map(BadgeRow::try_into_badge).collect()
    }
}

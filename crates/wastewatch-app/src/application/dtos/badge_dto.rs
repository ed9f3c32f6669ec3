use serde::{Deserialize, Serialize};

use wastewatch_domain::badge::Badge;
use wastewatch_domain::user_badge::UserBadgeDetails;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaDto {
    pub criteria_type: String,
    pub value: i64,
    pub timeframe: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub category: String,
    pub criteria: CriteriaDto,
    pub rarity: String,
    pub points: i64,
    pub is_active: bool,
    pub created_at: String,
}

impl From<&Badge> for BadgeDto {
    fn from(badge: &Badge) -> Self {
        let criteria = badge.criteria();
        Self {
            id: badge.id().to_string(),
            name: badge.name().to_string(),
            description: badge.description().to_string(),
            icon: badge.icon().to_string(),
            color: badge.color().to_string(),
            category: badge.category().to_string(),
            criteria: CriteriaDto {
                criteria_type: criteria.criteria_type().to_string(),
                value: criteria.value(),
                timeframe: criteria.timeframe().to_string(),
            },
            rarity: badge.rarity().to_string(),
            points: badge.points(),
            is_active: badge.is_active(),
            created_at: badge.created_at().to_rfc3339(),
        }
    }
}

/// A user's progress toward one badge, with the badge inlined
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBadgeDto {
    pub id: String,
    pub badge: BadgeDto,
    pub current: i64,
    pub target: i64,
    pub percentage: u8,
    pub is_completed: bool,
    pub earned_at: Option<String>,
    pub notified: bool,
}

impl From<&UserBadgeDetails> for UserBadgeDto {
    fn from(details: &UserBadgeDetails) -> Self {
        let record = &details.user_badge;
        let progress = record.progress();
        Self {
            id: record.id().to_string(),
            badge: BadgeDto::from(&details.badge),
            current: progress.current(),
            target: progress.target(),
            percentage: progress.percentage(),
            is_completed: record.is_completed(),
            earned_at: record.earned_at().map(|t| t.to_rfc3339()),
            notified: record.notified(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserBadgesOptions {
    pub completed_only: bool,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AwardedBadgeDto {
    pub badge_id: String,
    pub name: String,
    pub points: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BadgeFailureDto {
    pub badge_id: String,
    pub error: String,
}

/// Result of one sweep over the active catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub user_id: String,
    pub evaluated: u32,
    pub newly_awarded: Vec<AwardedBadgeDto>,
    /// Badges whose earlier award notification was delivered by this sweep
    pub redelivered: Vec<String>,
    pub failures: Vec<BadgeFailureDto>,
}

impl CheckOutcome {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            ..Self::default()
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

use serde::{Deserialize, Serialize};

use wastewatch_domain::user::User;

use super::{DailyChallengeDto, UserBadgeDto, UserLevelDto, UserStatsDto};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummaryDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub total_points: i64,
    pub created_at: String,
}

impl From<&User> for UserSummaryDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            role: user.role().to_string(),
            total_points: user.total_points(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileDto {
    pub user: UserSummaryDto,
    pub stats: UserStatsDto,
    pub level: UserLevelDto,
    pub recent_badges: Vec<UserBadgeDto>,
    pub completed_badge_count: u64,
    pub daily_challenges: Vec<DailyChallengeDto>,
}

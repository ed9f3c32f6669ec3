use sqlx::SqlitePool;
use std::sync::Arc;

use wastewatch_domain::badge::BadgeRepository;
use wastewatch_domain::shared::Clock;
use wastewatch_domain::user::UserRepository;
use wastewatch_domain::user_badge::UserBadgeRepository;
use wastewatch_infrastructure::events::InMemoryEventBus;
use wastewatch_infrastructure::notification::SqliteNotificationInbox;
use wastewatch_infrastructure::persistence::repositories::SqliteSpecialActionRepository;
use wastewatch_infrastructure::persistence::Database;

use crate::application::config::GamificationConfig;
use crate::application::services::{
    BadgeProgressTracker, ChallengeService, GamificationService, LeaderboardService,
    StatsAggregator,
};

pub struct Runtime {
    pub db: Arc<Database>,
    pub pool: Arc<SqlitePool>,
    pub event_bus: Arc<InMemoryEventBus>,
    pub clock: Arc<dyn Clock>,
}

pub struct Repositories {
    pub user: Arc<dyn UserRepository>,
    pub badge: Arc<dyn BadgeRepository>,
    pub user_badge: Arc<dyn UserBadgeRepository>,
    /// Write side of special-action flags, used by outer layers
    pub special_actions: Arc<SqliteSpecialActionRepository>,
    pub inbox: Arc<SqliteNotificationInbox>,
}

pub struct Services {
    pub stats: Arc<StatsAggregator>,
    pub tracker: Arc<BadgeProgressTracker>,
    pub leaderboard: Arc<LeaderboardService>,
    pub challenges: Arc<ChallengeService>,
    pub gamification: Arc<GamificationService>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub repositories: Repositories,
    pub services: Services,
    pub config: GamificationConfig,
}

impl AppState {
    pub fn gamification(&self) -> &GamificationService {
        &self.services.gamification
    }
}

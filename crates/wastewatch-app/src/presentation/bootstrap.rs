use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use wastewatch_domain::events::{EventBus, NotificationRaised, TypedEventHandlerWrapper};
use wastewatch_domain::shared::{Clock, DomainError, SystemClock};
use wastewatch_infrastructure::events::InMemoryEventBus;
use wastewatch_infrastructure::notification::{EventBusNotifier, SqliteNotificationInbox};
use wastewatch_infrastructure::persistence::repositories::{
    SqliteActivityRepository, SqliteBadgeRepository, SqliteChallengeRepository,
    SqliteLeaderboardRepository, SqliteSpecialActionRepository, SqliteUserBadgeRepository,
    SqliteUserRepository,
};
use wastewatch_infrastructure::persistence::Database;

use crate::application::config::GamificationConfig;
use crate::application::services::{
    BadgeProgressTracker, ChallengeService, GamificationService, LeaderboardService,
    StatsAggregator,
};
use crate::presentation::state::{AppState, Repositories, Runtime, Services};

pub const DATABASE_FILE: &str = if cfg!(debug_assertions) {
    "wastewatch-dev.db"
} else {
    "wastewatch.db"
};

/// `<platform data dir>/wastewatch/<db file>`, falling back to the working dir
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("wastewatch"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATABASE_FILE)
}

/// Open (creating if needed) and migrate a database file
pub async fn open_database(path: &Path) -> Result<Database, DomainError> {
    let started_at = Instant::now();
    let path_str = path
        .to_str()
        .ok_or_else(|| DomainError::InvalidInput(format!("Invalid database path: {}", path.display())))?;

    let db = Database::new(path_str).await?;
    db.run_migrations().await?;

    info!(
        "✓ Database ready at {} ({}ms)",
        path_str,
        started_at.elapsed().as_millis()
    );
    Ok(db)
}

/// Wire repositories, the notification pipeline and services on the wall clock
pub async fn build_app_state(
    db: Database,
    config: GamificationConfig,
) -> Result<AppState, DomainError> {
    build_app_state_with_clock(db, config, Arc::new(SystemClock)).await
}

pub async fn build_app_state_with_clock(
    db: Database,
    config: GamificationConfig,
    clock: Arc<dyn Clock>,
) -> Result<AppState, DomainError> {
    let startup_started_at = Instant::now();
    let pool = Arc::new(db.pool().clone());

    let started_at = Instant::now();
    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
    let activity_repo = Arc::new(SqliteActivityRepository::new(pool.clone()));
    let badge_repo = Arc::new(SqliteBadgeRepository::new(pool.clone()));
    let user_badge_repo = Arc::new(SqliteUserBadgeRepository::new(pool.clone()));
    let challenge_repo = Arc::new(SqliteChallengeRepository::new(pool.clone()));
    let leaderboard_repo = Arc::new(SqliteLeaderboardRepository::new(pool.clone()));
    let special_actions = Arc::new(SqliteSpecialActionRepository::new(pool.clone()));
    info!(
        "✓ Repositories initialized ({}ms)",
        started_at.elapsed().as_millis()
    );

    // Notifications flow through the bus into the inbox table
    let started_at = Instant::now();
    let event_bus = Arc::new(InMemoryEventBus::new());
    event_bus
        .subscribe::<NotificationRaised>(Arc::new(TypedEventHandlerWrapper::new(
            SqliteNotificationInbox::new(pool.clone()),
        )))
        .await;
    let notifier = Arc::new(EventBusNotifier::new(
        event_bus.clone() as Arc<dyn EventBus>,
        clock.clone(),
    ));
    info!(
        "✓ Event bus ready with {} handler(s) ({}ms)",
        event_bus.handler_count::<NotificationRaised>().await,
        started_at.elapsed().as_millis()
    );

    let stats = Arc::new(StatsAggregator::new(
        user_repo.clone(),
        activity_repo,
        clock.clone(),
        config.utc_offset,
    ));
    let tracker = Arc::new(BadgeProgressTracker::new(
        badge_repo.clone(),
        user_badge_repo.clone(),
        challenge_repo,
        special_actions.clone(),
        stats.clone(),
        notifier,
    ));
    let leaderboard = Arc::new(LeaderboardService::new(
        leaderboard_repo,
        user_repo.clone(),
        clock.clone(),
        config.utc_offset,
        config.default_leaderboard_limit,
        config.max_page_size,
    ));
    let challenges = Arc::new(ChallengeService::new(
        stats.clone(),
        tracker.clone(),
        config.challenges.clone(),
    ));
    let gamification = Arc::new(GamificationService::new(
        badge_repo.clone(),
        user_badge_repo.clone(),
        stats.clone(),
        tracker.clone(),
        leaderboard.clone(),
        challenges.clone(),
        &config,
    ));

    info!(
        "✓ Gamification services ready (utc offset {}s, total {}ms)",
        config.utc_offset.local_minus_utc(),
        startup_started_at.elapsed().as_millis()
    );

    Ok(AppState {
        runtime: Runtime {
            db: Arc::new(db),
            pool: pool.clone(),
            event_bus,
            clock,
        },
        repositories: Repositories {
            user: user_repo,
            badge: badge_repo,
            user_badge: user_badge_repo,
            special_actions,
            inbox: Arc::new(SqliteNotificationInbox::new(pool)),
        },
        services: Services {
            stats,
            tracker,
            leaderboard,
            challenges,
            gamification,
        },
        config,
    })
}

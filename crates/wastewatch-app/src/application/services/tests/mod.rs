
mod challenge_tests;
mod leaderboard_tests;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::sync::Arc;

use wastewatch_domain::badge::{
    Badge, BadgeCategory, BadgeCriteria, BadgeDefinition, BadgeRarity, CriteriaType, Timeframe,
};
use wastewatch_domain::shared::FixedClock;

use super::{
    BadgeProgressTracker, ChallengeService, GamificationService, LeaderboardService,
    StatsAggregator,
};
use crate::application::config::GamificationConfig;
use mocks::{InMemoryStore, MockAwardNotifier};

/// Wednesday 2024-05-15 12:00 UTC
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
}

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn badge(name: &str, criteria_type: CriteriaType, value: i64, timeframe: Timeframe, points: i64) -> Badge {
    Badge::new(
        BadgeDefinition {
            name: name.to_string(),
            description: format!("{name} description"),
            icon: "🏅".to_string(),
            color: "#4CAF50".to_string(),
            category: BadgeCategory::Reports,
            criteria: BadgeCriteria::new(criteria_type, value, timeframe).unwrap(),
            rarity: BadgeRarity::Common,
            points,
        },
        now() - chrono::Duration::days(30),
    )
    .unwrap()
}

/// A notifier that accepts every delivery
fn accepting_notifier() -> MockAwardNotifier {
    let mut notifier = MockAwardNotifier::new();
    notifier.expect_notify().returning(|_, _| Ok(()));
    notifier
}

struct Harness {
    store: Arc<InMemoryStore>,
    clock: Arc<FixedClock>,
    stats: Arc<StatsAggregator>,
    tracker: Arc<BadgeProgressTracker>,
    challenges: Arc<ChallengeService>,
    service: GamificationService,
}

fn harness(store: Arc<InMemoryStore>, notifier: MockAwardNotifier) -> Harness {
    harness_with(store, notifier, GamificationConfig::default())
}

fn harness_with(
    store: Arc<InMemoryStore>,
    notifier: MockAwardNotifier,
    config: GamificationConfig,
) -> Harness {
    let clock = Arc::new(FixedClock::new(now()));
    let stats = Arc::new(StatsAggregator::new(
        store.clone(),
        store.clone(),
        clock.clone(),
        config.utc_offset,
    ));
    let tracker = Arc::new(BadgeProgressTracker::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        stats.clone(),
        Arc::new(notifier),
    ));
    let leaderboard = Arc::new(LeaderboardService::new(
        store.clone(),
        store.clone(),
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
    let service = GamificationService::new(
        store.clone(),
        store.clone(),
        stats.clone(),
        tracker.clone(),
        leaderboard,
        challenges.clone(),
        &config,
    );

    Harness {
        store,
        clock,
        stats,
        tracker,
        challenges,
        service,
    }
}

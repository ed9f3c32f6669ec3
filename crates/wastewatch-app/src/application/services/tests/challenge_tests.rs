use chrono::{Duration, TimeZone, Utc};
use mockall::Sequence;
use std::sync::Arc;

use wastewatch_domain::badge::CriteriaType;
use wastewatch_domain::challenge::{ChallengeDefinition, ChallengeSet};
use wastewatch_domain::notification::NotificationKind;
use wastewatch_domain::shared::DomainError;
use wastewatch_domain::stats::UserStats;
use wastewatch_domain::user::UserRole;

use super::mocks::{InMemoryStore, MockAwardNotifier};
use super::{accepting_notifier, harness, harness_with, now};
use crate::application::config::GamificationConfig;
use crate::application::services::ChallengeAward;

#[tokio::test]
async fn test_only_today_counts() {
    let store = Arc::new(InMemoryStore::new());
    let user = store.add_user("Ana", UserRole::Citizen, now() - Duration::days(30)).await;
    for _ in 0..2 {
        store.add_report(&user, now() - Duration::hours(2)).await;
    }
    for _ in 0..10 {
        store.add_report(&user, now() - Duration::days(1)).await;
    }

    let mut notifier = MockAwardNotifier::new();
    notifier.expect_notify().never();
    let h = harness(store, notifier);

    let challenges = h.service.get_daily_challenges(&user).await.unwrap();
    let reports = challenges.iter().find(|c| c.key == "daily_reports").unwrap();

    assert_eq!(reports.current, 2);
    assert_eq!(reports.target, 3);
    assert!(!reports.completed);
    assert_eq!(
        reports.expires_at,
        Utc.with_ymd_and_hms(2024, 5, 16, 0, 0, 0).unwrap().to_rfc3339()
    );
}

#[tokio::test]
async fn test_completed_challenge_rewarded_once_per_day() {
    let store = Arc::new(InMemoryStore::new());
    let user = store.add_user("Ben", UserRole::Citizen, now() - Duration::days(30)).await;
    for _ in 0..3 {
        store.add_report(&user, now() - Duration::hours(1)).await;
    }

    let mut notifier = MockAwardNotifier::new();
    notifier
        .expect_notify()
        .withf(|_, n| n.kind == NotificationKind::PointsAwarded && n.payload["challengeKey"] == "daily_reports")
        .times(1)
        .returning(|_, _| Ok(()));
    let h = harness(store.clone(), notifier);

    let challenges = h.service.get_daily_challenges(&user).await.unwrap();
    assert!(challenges.iter().any(|c| c.key == "daily_reports" && c.completed));
    assert_eq!(store.total_points(&user).await, 20);

    h.service.get_daily_challenges(&user).await.unwrap();
    assert_eq!(store.total_points(&user).await, 20);

    let completion = store
        .completion(&user, "daily_reports", now().date_naive())
        .await
        .unwrap();
    assert!(completion.notified);
    assert_eq!(completion.points, 20);
}

#[tokio::test]
async fn test_next_day_starts_fresh() {
    let store = Arc::new(InMemoryStore::new());
    let user = store.add_user("Cleo", UserRole::Citizen, now() - Duration::days(30)).await;
    store
        .add_collected_report(&user, now() - Duration::days(2), now() - Duration::hours(1))
        .await;

    let h = harness(store.clone(), accepting_notifier());
    h.service.get_daily_challenges(&user).await.unwrap();
    assert_eq!(store.total_points(&user).await, 15);

    h.clock.advance(Duration::days(1));
    let challenges = h.service.get_daily_challenges(&user).await.unwrap();
    let collected = challenges.iter().find(|c| c.key == "daily_collected").unwrap();
    assert_eq!(collected.current, 0);
    assert_eq!(store.total_points(&user).await, 15);
}

#[tokio::test]
async fn test_failed_reward_notification_redelivered_on_next_read() {
    let store = Arc::new(InMemoryStore::new());
    let user = store.add_user("Dan", UserRole::Citizen, now() - Duration::days(30)).await;
    store.add_points(&user, 60, now() - Duration::hours(3)).await;

    let mut seq = Sequence::new();
    let mut notifier = MockAwardNotifier::new();
    notifier
        .expect_notify()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Err(DomainError::DownstreamNotify("inbox offline".to_string())));
    notifier
        .expect_notify()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    let config = GamificationConfig::default().with_challenges(
        ChallengeSet::new(vec![ChallengeDefinition::new(
            "daily_points",
            "Earn 50 points today",
            CriteriaType::PointsTotal,
            50,
            10,
        )])
        .unwrap(),
    );
    let h = harness_with(store.clone(), notifier, config);

    // Delivery failure does not fail the read
    let challenges = h.challenges.get_daily_challenges(&user).await.unwrap();
    assert!(challenges[0].completed);
    let completion = store
        .completion(&user, "daily_points", now().date_naive())
        .await
        .unwrap();
    assert!(!completion.notified);
    assert_eq!(store.total_points(&user).await, 70);

    let award = h
        .tracker
        .award_challenge(&user, &challenges[0], now().date_naive())
        .await
        .unwrap();
    assert!(matches!(award, ChallengeAward::Redelivered));
    assert_eq!(store.total_points(&user).await, 70);
    assert_eq!(store.award_credits(&user).await, 1);
}

#[tokio::test]
async fn test_incomplete_challenge_not_eligible() {
    let store = Arc::new(InMemoryStore::new());
    let user = store.add_user("Eve", UserRole::Citizen, now()).await;
    let h = harness(store, accepting_notifier());

    let challenges = h.challenges.get_daily_challenges(&user).await.unwrap();
    assert_eq!(challenges.len(), 3);
    let award = h
        .tracker
        .award_challenge(&user, &challenges[0], now().date_naive())
        .await
        .unwrap();
    assert!(matches!(award, ChallengeAward::NotEligible));
}

#[tokio::test]
async fn test_reward_committed_when_notification_fails() {
    let store = Arc::new(InMemoryStore::new());
    let user = store.add_user("Fred", UserRole::Citizen, now() - Duration::days(30)).await;

    let mut notifier = MockAwardNotifier::new();
    notifier
        .expect_notify()
        .times(1)
        .returning(|_, _| Err(DomainError::DownstreamNotify("inbox offline".to_string())));
    let h = harness(store.clone(), notifier);

    let today = UserStats {
        reports_count: 3,
        ..UserStats::default()
    };
    let challenges = ChallengeSet::default().evaluate(&today, now() + Duration::hours(12));
    let reports = challenges.iter().find(|c| c.key == "daily_reports").unwrap();

    let award = h
        .tracker
        .award_challenge(&user, reports, now().date_naive())
        .await
        .unwrap();

    match award {
        ChallengeAward::Awarded {
            delivery: Err(DomainError::DownstreamNotify(_)),
        } => {}
        other => panic!("Expected Awarded with a failed delivery, got {:?}", other),
    }
    assert_eq!(store.total_points(&user).await, 20);
    let completion = store
        .completion(&user, "daily_reports", now().date_naive())
        .await
        .unwrap();
    assert!(!completion.notified);
}

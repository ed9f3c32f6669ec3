use chrono::Duration;
use std::sync::Arc;

use wastewatch_domain::badge::Timeframe;
use wastewatch_domain::leaderboard::LeaderboardType;
use wastewatch_domain::shared::DomainError;
use wastewatch_domain::user::UserRole;

use super::mocks::InMemoryStore;
use super::{accepting_notifier, harness, now};
use crate::application::dtos::LeaderboardOptions;

#[tokio::test]
async fn test_ties_go_to_earlier_account() {
    let store = Arc::new(InMemoryStore::new());
    let b = store.add_user("Bea", UserRole::Citizen, now() - Duration::days(5)).await;
    let a = store.add_user("Abe", UserRole::Citizen, now() - Duration::days(50)).await;
    store.add_points(&a, 200, now() - Duration::days(2)).await;
    store.add_points(&b, 200, now() - Duration::days(2)).await;

    let h = harness(store, accepting_notifier());
    let board = h
        .service
        .get_leaderboard(&LeaderboardOptions::default())
        .await
        .unwrap();

    assert_eq!(board.entries.len(), 2);
    assert_eq!(board.entries[0].user_id, a.to_string());
    assert_eq!(board.entries[0].rank, 1);
    assert_eq!(board.entries[1].user_id, b.to_string());
    assert_eq!(board.entries[1].rank, 2);
    assert_eq!(board.leaderboard_type, "points");
    assert_eq!(board.period, "all_time");
    assert_eq!(board.limit, 10);
}

#[tokio::test]
async fn test_admins_are_excluded() {
    let store = Arc::new(InMemoryStore::new());
    let admin = store.add_user("Root", UserRole::Admin, now() - Duration::days(100)).await;
    let citizen = store.add_user("Cid", UserRole::Citizen, now() - Duration::days(10)).await;
    store.add_points(&admin, 5000, now() - Duration::days(1)).await;
    store.add_points(&citizen, 10, now() - Duration::days(1)).await;

    let h = harness(store, accepting_notifier());
    let board = h
        .service
        .get_leaderboard(&LeaderboardOptions::default())
        .await
        .unwrap();
    assert_eq!(board.entries.len(), 1);
    assert_eq!(board.entries[0].user_id, citizen.to_string());

    let rank = h
        .service
        .get_user_rank(&admin, LeaderboardType::Points, Timeframe::AllTime)
        .await
        .unwrap();
    assert_eq!(rank.rank, None);
}

#[tokio::test]
async fn test_zero_limit_is_invalid_input() {
    let h = harness(Arc::new(InMemoryStore::new()), accepting_notifier());
    let options = LeaderboardOptions {
        limit: Some(0),
        ..LeaderboardOptions::default()
    };

    let err = h.service.get_leaderboard(&options).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
}

#[tokio::test]
async fn test_pages_rank_from_offset_and_respect_limit() {
    let store = Arc::new(InMemoryStore::new());
    for i in 0..7 {
        let user = store
            .add_user(&format!("User{i}"), UserRole::Citizen, now() - Duration::days(30 - i))
            .await;
        store.add_points(&user, 10 * (i + 1), now() - Duration::days(1)).await;
    }

    let h = harness(store, accepting_notifier());
    let options = LeaderboardOptions {
        limit: Some(3),
        page: Some(2),
        ..LeaderboardOptions::default()
    };
    let board = h.service.get_leaderboard(&options).await.unwrap();

    assert_eq!(board.entries.len(), 3);
    let ranks: Vec<u64> = board.entries.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![4, 5, 6]);
    let metrics: Vec<i64> = board.entries.iter().map(|e| e.metric_value).collect();
    assert_eq!(metrics, vec![40, 30, 20]);
}

#[tokio::test]
async fn test_limit_is_capped_by_config() {
    let h = harness(Arc::new(InMemoryStore::new()), accepting_notifier());
    let options = LeaderboardOptions {
        limit: Some(10_000),
        ..LeaderboardOptions::default()
    };
    let board = h.service.get_leaderboard(&options).await.unwrap();
    assert_eq!(board.limit, 100);
}

#[tokio::test]
async fn test_weekly_reports_board_and_user_rank() {
    let store = Arc::new(InMemoryStore::new());
    let busy = store.add_user("Busy", UserRole::Citizen, now() - Duration::days(40)).await;
    let steady = store.add_user("Steady", UserRole::Citizen, now() - Duration::days(40)).await;
    for _ in 0..3 {
        store.add_report(&busy, now() - Duration::hours(3)).await;
    }
    // Older activity falls outside the weekly window
    for _ in 0..10 {
        store.add_report(&steady, now() - Duration::days(20)).await;
    }
    store.add_report(&steady, now() - Duration::hours(1)).await;

    let h = harness(store, accepting_notifier());
    let options = LeaderboardOptions {
        leaderboard_type: LeaderboardType::Reports,
        period: Timeframe::Weekly,
        ..LeaderboardOptions::default()
    };
    let board = h.service.get_leaderboard(&options).await.unwrap();

    assert_eq!(board.entries[0].user_id, busy.to_string());
    assert_eq!(board.entries[0].metric_value, 3);
    assert_eq!(board.entries[1].metric_value, 1);

    let rank = h
        .service
        .get_user_rank(&steady, LeaderboardType::Reports, Timeframe::Weekly)
        .await
        .unwrap();
    assert_eq!(rank.rank, Some(2));
    assert_eq!(rank.metric_value, Some(1));

    let all_time = h
        .service
        .get_user_rank(&steady, LeaderboardType::Reports, Timeframe::AllTime)
        .await
        .unwrap();
    assert_eq!(all_time.rank, Some(1));
}

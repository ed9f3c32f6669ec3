use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use wastewatch_domain::challenge::{ChallengeCompletion, ChallengeRepository};
use wastewatch_domain::user::PointsCredit;
use wastewatch_infrastructure::persistence::repositories::SqliteChallengeRepository;


#[tokio::test]
async fn challenge_completion_is_idempotent_per_day_integration() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteChallengeRepository::new(Arc::new(pool.clone()));
    let user = test_helpers::insert_user(&pool, "Hal", "citizen", 0, Utc::now()).await;

    let day = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
    let completion = ChallengeCompletion {
        user_id: user.clone(),
        challenge_key: "daily_reports".to_string(),
        challenge_date: day,
        points: 20,
        notified: false,
        completed_at: Utc::now(),
    };
    let credit = PointsCredit::for_challenge("daily_reports", day, 20);

    assert!(repo.record_completion_if_absent(&completion, &credit).await.unwrap());
    assert!(!repo.record_completion_if_absent(&completion, &credit).await.unwrap());

    assert_eq!(test_helpers::total_points(&pool, &user).await, 20);
    assert_eq!(test_helpers::ledger_count(&pool, &user).await, 1);

    let stored = repo
        .find_completion(&user, "daily_reports", day)
        .await
        .unwrap()
        .expect("completion stored");
    assert!(!stored.notified);
    assert_eq!(stored.points, 20);

    repo.mark_notified(&user, "daily_reports", day).await.unwrap();
    let stored = repo.find_completion(&user, "daily_reports", day).await.unwrap().unwrap();
    assert!(stored.notified);

    // The next day is a fresh challenge
    let next_day = day.succ_opt().unwrap();
    let tomorrow = ChallengeCompletion {
        challenge_date: next_day,
        ..completion
    };
    let tomorrow_credit = PointsCredit::for_challenge("daily_reports", next_day, 20);
    assert!(repo
        .record_completion_if_absent(&tomorrow, &tomorrow_credit)
        .await
        .unwrap());
    assert_eq!(test_helpers::total_points(&pool, &user).await, 40);
}

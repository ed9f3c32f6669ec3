#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use wastewatch_domain::shared::{FixedClock, UserId};
use wastewatch_infrastructure::persistence::Database;
use wastewatch_lib::application::config::GamificationConfig;
use wastewatch_lib::presentation::bootstrap::build_app_state_with_clock;
use wastewatch_lib::presentation::AppState;

/// Wednesday noon, UTC
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
}

/// Migrated in-memory database wired into a full app state on a fixed clock
pub async fn in_memory_state() -> (AppState, SqlitePool, Arc<FixedClock>) {
    let db = Database::in_memory().await.expect("connect in-memory db");
    db.run_migrations().await.expect("run migrations");
    let pool = db.pool().clone();

    let clock = Arc::new(FixedClock::new(now()));
    let state = build_app_state_with_clock(db, GamificationConfig::new(), clock.clone())
        .await
        .expect("build app state");

    (state, pool, clock)
}

pub async fn insert_user(pool: &SqlitePool, name: &str, role: &str) -> UserId {
    let id = UserId::from_string(&name.to_lowercase());
    sqlx::query(
        "INSERT INTO users (id, name, email, role, total_points, created_at) VALUES (?1, ?2, ?3, ?4, 0, ?5)",
    )
    .bind(id.as_str())
    .bind(name)
    .bind(format!("{}@example.com", name.to_lowercase()))
    .bind(role)
    .bind(now() - chrono::Duration::days(30))
    .execute(pool)
    .await
    .expect("insert user");
    id
}

pub async fn insert_report(pool: &SqlitePool, user_id: &UserId, created_at: DateTime<Utc>) {
    sqlx::query(
        "INSERT INTO reports (id, user_id, status, created_at, collected_at) VALUES (?1, ?2, 'pending', ?3, NULL)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(user_id.as_str())
    .bind(created_at)
    .execute(pool)
    .await
    .expect("insert report");
}

pub async fn total_points(pool: &SqlitePool, user_id: &UserId) -> i64 {
    sqlx::query_scalar("SELECT total_points FROM users WHERE id = ?1")
        .bind(user_id.as_str())
        .fetch_one(pool)
        .await
        .expect("read total points")
}

/// Ledger rows written by the engine (they always carry a source key)
pub async fn engine_credits(pool: &SqlitePool, user_id: &UserId) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM point_transactions WHERE user_id = ?1 AND source_key IS NOT NULL",
    )
    .bind(user_id.as_str())
    .fetch_one(pool)
    .await
    .expect("count ledger")
}

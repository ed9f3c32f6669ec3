use chrono::Duration;
use serde_json::Value;

use wastewatch_lib::application::config::GamificationConfig;
use wastewatch_lib::presentation::bootstrap::{build_app_state, open_database};
use wastewatch_lib::presentation::cli::Command;
use wastewatch_lib::presentation::commands::execute;

mod common;

fn body(output: &wastewatch_lib::presentation::commands::CommandOutput) -> Value {
    serde_json::from_str(&output.body).expect("command output is JSON")
}

#[tokio::test]
async fn seed_check_and_inbox_commands_integration() {
    let (state, pool, _clock) = common::in_memory_state().await;
    let ada = common::insert_user(&pool, "Ada", "citizen").await;
    common::insert_report(&pool, &ada, common::now() - Duration::hours(1)).await;

    let seeded = execute(Command::Seed { catalog: None }, &state).await;
    assert!(seeded.success);
    assert_eq!(body(&seeded)["data"], 16);

    let checked = execute(
        Command::Check {
            user_id: "ada".to_string(),
        },
        &state,
    )
    .await;
    assert!(checked.success);
    assert_eq!(body(&checked)["data"]["newly_awarded"][0]["name"], "First Report");

    let inbox = execute(
        Command::Notifications {
            user_id: "ada".to_string(),
            limit: 5,
        },
        &state,
    )
    .await;
    assert_eq!(body(&inbox)["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn record_action_completes_special_badge_integration() {
    let (state, pool, _clock) = common::in_memory_state().await;
    common::insert_user(&pool, "Ada", "citizen").await;
    execute(Command::Seed { catalog: None }, &state).await;

    let output = execute(
        Command::RecordAction {
            user_id: "ada".to_string(),
            action: "City Pioneer".to_string(),
        },
        &state,
    )
    .await;

    assert!(output.success);
    let awarded = body(&output)["data"]["newly_awarded"].clone();
    assert_eq!(awarded.as_array().unwrap().len(), 1);
    assert_eq!(awarded[0]["name"], "City Pioneer");
    assert_eq!(awarded[0]["points"], 50);
}

#[tokio::test]
async fn failures_render_error_envelope_integration() {
    let (state, _pool, _clock) = common::in_memory_state().await;

    let missing = execute(
        Command::Stats {
            user_id: "ghost".to_string(),
            period: "all_time".to_string(),
        },
        &state,
    )
    .await;
    assert!(!missing.success);
    let json = body(&missing);
    assert_eq!(json["error"]["code"], 2001);
    assert!(json.get("data").is_none());

    let bad_period = execute(
        Command::Leaderboard {
            leaderboard_type: "points".to_string(),
            period: "yearly".to_string(),
            limit: None,
            page: None,
        },
        &state,
    )
    .await;
    assert!(!bad_period.success);
    assert_eq!(body(&bad_period)["error"]["code"], 6002);

    let zero_page = execute(
        Command::Leaderboard {
            leaderboard_type: "points".to_string(),
            period: "all_time".to_string(),
            limit: None,
            page: Some(0),
        },
        &state,
    )
    .await;
    assert_eq!(body(&zero_page)["error"]["code"], 6002);
}

#[tokio::test]
async fn level_command_needs_no_user_integration() {
    let (state, _pool, _clock) = common::in_memory_state().await;

    let output = execute(Command::Level { points: 0 }, &state).await;
    assert!(output.success);
    let json = body(&output);
    assert_eq!(json["data"]["current"]["level"], 1);
    assert_eq!(json["data"]["progress"], 0);
}

#[tokio::test]
async fn file_database_survives_reopen_integration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("wastewatch.db");

    let db = open_database(&path).await.unwrap();
    let state = build_app_state(db, GamificationConfig::new()).await.unwrap();
    assert_eq!(state.gamification().initialize_default_badges().await.unwrap(), 16);
    state.runtime.pool.close().await;
    drop(state);

    assert!(path.exists());
    let db = open_database(&path).await.unwrap();
    let state = build_app_state(db, GamificationConfig::new()).await.unwrap();
    assert_eq!(state.gamification().initialize_default_badges().await.unwrap(), 0);
    assert_eq!(state.gamification().get_all_badges(None).await.unwrap().len(), 16);
}

use serde::Serialize;
use std::path::Path;
use std::str::FromStr;

use wastewatch_domain::badge::{BadgeCatalog, BadgeCategory, BadgeFilter, BadgeRarity, Timeframe};
use wastewatch_domain::leaderboard::LeaderboardType;
use wastewatch_domain::shared::{BadgeId, DomainError, UserId};

use super::cli::Command;
use super::{ApiResponse, AppState};
use crate::application::dtos::{LeaderboardOptions, UserBadgesOptions};
use crate::application::ResultExt;

/// Rendered envelope plus its success flag
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub body: String,
}

fn render<T: Serialize>(result: Result<T, DomainError>) -> CommandOutput {
    let response = ApiResponse::from(result);
    CommandOutput {
        success: response.success,
        body: response.to_json(),
    }
}

pub async fn execute(command: Command, state: &AppState) -> CommandOutput {
    let service = state.gamification();

    match command {
        Command::Seed { catalog } => render(seed(state, catalog.as_deref()).await),
        Command::Catalog {
            category,
            rarity,
            all,
        } => {
            let result = async {
                let filter = BadgeFilter {
                    category: category.as_deref().map(BadgeCategory::from_str).transpose()?,
                    rarity: rarity.as_deref().map(BadgeRarity::from_str).transpose()?,
                    is_active: if all { None } else { Some(true) },
                };
                service.get_all_badges(Some(filter)).await
            };
            render(result.await)
        }
        Command::SetBadgeActive { badge_id, active } => {
            render(
                service
                    .set_badge_active(&BadgeId::from_string(&badge_id), active)
                    .await,
            )
        }
        Command::Check { user_id } => {
            render(service.check_user_badges(&UserId::from_string(&user_id)).await)
        }
        Command::Badges {
            user_id,
            completed_only,
            page,
            limit,
        } => {
            let options = UserBadgesOptions {
                completed_only,
                page,
                limit,
            };
            render(
                service
                    .get_user_badges(&UserId::from_string(&user_id), &options)
                    .await,
            )
        }
        Command::Profile { user_id } => {
            render(service.get_user_profile(&UserId::from_string(&user_id)).await)
        }
        Command::Stats { user_id, period } => {
            let result = async {
                let timeframe = Timeframe::from_str(&period)?;
                service
                    .get_user_stats(&UserId::from_string(&user_id), timeframe)
                    .await
            };
            render(result.await)
        }
        Command::Leaderboard {
            leaderboard_type,
            period,
            limit,
            page,
        } => {
            let result = async {
                let options = LeaderboardOptions {
                    leaderboard_type: LeaderboardType::from_str(&leaderboard_type)?,
                    period: Timeframe::from_str(&period)?,
                    limit,
                    page,
                };
                service.get_leaderboard(&options).await
            };
            render(result.await)
        }
        Command::Rank {
            user_id,
            leaderboard_type,
            period,
        } => {
            let result = async {
                service
                    .get_user_rank(
                        &UserId::from_string(&user_id),
                        LeaderboardType::from_str(&leaderboard_type)?,
                        Timeframe::from_str(&period)?,
                    )
                    .await
            };
            render(result.await)
        }
        Command::Challenges { user_id } => {
            render(service.get_daily_challenges(&UserId::from_string(&user_id)).await)
        }
        Command::Level { points } => render(Ok(service.calculate_user_level(points))),
        Command::RecordAction { user_id, action } => {
            let user_id = UserId::from_string(&user_id);
            let result = async {
                state.repositories.user.get(&user_id).await?;
                state
                    .repositories
                    .special_actions
                    .record(&user_id, &action, state.runtime.clock.now())
                    .await?;
                // The flag may complete a special-action badge right away
                service.check_user_badges(&user_id).await
            };
            render(result.await)
        }
        Command::Notifications { user_id, limit } => {
            render(
                state
                    .repositories
                    .inbox
                    .list_for_user(&UserId::from_string(&user_id), limit)
                    .await,
            )
        }
    }
}

async fn seed(state: &AppState, catalog: Option<&Path>) -> Result<u32, DomainError> {
    let service = state.gamification();
    match catalog {
        None => service.initialize_default_badges().await,
        Some(path) => {
            let json = tokio::fs::read_to_string(path).await.to_infra_err()?;
            service.seed_catalog(&BadgeCatalog::from_json(&json)?).await
        }
    }
}

mod badge_progress_tracker;
mod challenge_service;
mod gamification_service;
mod leaderboard_service;
mod stats_aggregator;

#[cfg(test)]
mod tests;

pub use badge_progress_tracker::{BadgeProgressTracker, ChallengeAward};
pub use challenge_service::ChallengeService;
pub use gamification_service::{GamificationService, DEFAULT_USER_BADGE_LIMIT};
pub use leaderboard_service::LeaderboardService;
pub use stats_aggregator::{StatsAggregator, STATS_UNAVAILABLE};

pub mod activity_repo;
pub mod badge_repo;
pub mod challenge_repo;
pub mod leaderboard_repo;
pub mod special_action_repo;
pub mod user_badge_repo;
pub mod user_repo;

mod ledger;

pub use activity_repo::SqliteActivityRepository;
pub use badge_repo::SqliteBadgeRepository;
pub use challenge_repo::SqliteChallengeRepository;
pub use leaderboard_repo::SqliteLeaderboardRepository;
pub use special_action_repo::SqliteSpecialActionRepository;
pub use user_badge_repo::SqliteUserBadgeRepository;
pub use user_repo::SqliteUserRepository;

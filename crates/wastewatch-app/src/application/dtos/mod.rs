mod badge_dto;
mod challenge_dto;
mod leaderboard_dto;
mod profile_dto;
mod stats_dto;

pub use badge_dto::*;
pub use challenge_dto::*;
pub use leaderboard_dto::*;
pub use profile_dto::*;
pub use stats_dto::*;

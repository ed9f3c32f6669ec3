mod ranking;
mod repository;

pub use ranking::{
    assign_ranks, LeaderboardEntry, LeaderboardQuery, LeaderboardRow, LeaderboardType,
};
pub use repository::LeaderboardRepository;

mod definition;
mod repository;

pub use definition::{ChallengeDefinition, ChallengeSet, DailyChallenge};
pub use repository::{ChallengeCompletion, ChallengeRepository};

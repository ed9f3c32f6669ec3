use serde::{Deserialize, Serialize};

use wastewatch_domain::challenge::DailyChallenge;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyChallengeDto {
    pub key: String,
    pub description: String,
    pub target: i64,
    pub current: i64,
    pub completed: bool,
    pub points: i64,
    pub expires_at: String,
}

impl From<&DailyChallenge> for DailyChallengeDto {
    fn from(challenge: &DailyChallenge) -> Self {
        Self {
            key: challenge.key.clone(),
            description: challenge.description.clone(),
            target: challenge.target,
            current: challenge.current,
            completed: challenge.completed,
            points: challenge.points,
            expires_at: challenge.expires_at.to_rfc3339(),
        }
    }
}

use log::warn;
use std::sync::Arc;

use wastewatch_domain::badge::Timeframe;
use wastewatch_domain::challenge::{ChallengeSet, DailyChallenge};
use wastewatch_domain::shared::{DomainError, UserId};
use wastewatch_domain::stats::{local_date, next_local_midnight};

use super::{BadgeProgressTracker, ChallengeAward, StatsAggregator};

/// Today's challenges for a user; completed ones are rewarded on read
pub struct ChallengeService {
    stats: Arc<StatsAggregator>,
    tracker: Arc<BadgeProgressTracker>,
    challenges: ChallengeSet,
}

impl ChallengeService {
    pub fn new(
        stats: Arc<StatsAggregator>,
        tracker: Arc<BadgeProgressTracker>,
        challenges: ChallengeSet,
    ) -> Self {
        Self {
            stats,
            tracker,
            challenges,
        }
    }

    pub async fn get_daily_challenges(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<DailyChallenge>, DomainError> {
        let user = self.stats.user(user_id).await?;
        let now = self.stats.clock().now();
        let offset = self.stats.offset();

        let daily = self.stats.stats_for(&user, Timeframe::Daily, now).await?;
        let challenges = self
            .challenges
            .evaluate(&daily, next_local_midnight(now, offset));

        let today = local_date(now, offset);
        for challenge in challenges.iter().filter(|c| c.completed) {
            // Failed rewards and deliveries are retried on the next read
            match self.tracker.award_challenge(user_id, challenge, today).await {
                Ok(ChallengeAward::Awarded { delivery: Err(e) }) => warn!(
                    "Challenge '{}' rewarded to user {} but notification failed: {}",
                    challenge.key, user_id, e
                ),
                Ok(_) => {}
                Err(e) => warn!(
                    "Challenge '{}' reward for user {} failed: {}",
                    challenge.key, user_id, e
                ),
            }
        }

        Ok(challenges)
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use wastewatch_domain::badge::{Badge, BadgeRepository, CriteriaType, Timeframe};
use wastewatch_domain::challenge::{ChallengeCompletion, ChallengeRepository, DailyChallenge};
use wastewatch_domain::evaluation::CriteriaEvaluator;
use wastewatch_domain::notification::{Notification, Notifier};
use wastewatch_domain::shared::{DomainError, UserId};
use wastewatch_domain::stats::{SpecialActionSource, UserStats};
use wastewatch_domain::user::{PointsCredit, User};
use wastewatch_domain::user_badge::{ProgressChange, UserBadge, UserBadgeRepository};

use super::StatsAggregator;
use crate::application::dtos::{AwardedBadgeDto, BadgeFailureDto, CheckOutcome};

/// What one badge contributed to a sweep
enum BadgeResult {
    Unchanged,
    Progressed,
    /// Newly completed; `delivery` is the outcome of the notification
    Awarded { delivery: Result<(), DomainError> },
    Redelivered,
}

/// Outcome of granting one daily challenge reward
#[derive(Debug)]
pub enum ChallengeAward {
    NotEligible,
    /// Completion and credit are committed; `delivery` is the notification outcome
    Awarded { delivery: Result<(), DomainError> },
    Redelivered,
    AlreadyAwarded,
}

/// Persists per-badge progress and grants awards exactly once.
///
/// A completed record is frozen. The false to true transition and the points
/// credit commit together; the notification follows and `notified` is only
/// set after it succeeds, so a failed delivery is retried by the next sweep.
pub struct BadgeProgressTracker {
    badge_repo: Arc<dyn BadgeRepository>,
    user_badge_repo: Arc<dyn UserBadgeRepository>,
    challenge_repo: Arc<dyn ChallengeRepository>,
    special_actions: Arc<dyn SpecialActionSource>,
    stats: Arc<StatsAggregator>,
    notifier: Arc<dyn Notifier>,
}

impl BadgeProgressTracker {
    pub fn new(
        badge_repo: Arc<dyn BadgeRepository>,
        user_badge_repo: Arc<dyn UserBadgeRepository>,
        challenge_repo: Arc<dyn ChallengeRepository>,
        special_actions: Arc<dyn SpecialActionSource>,
        stats: Arc<StatsAggregator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            badge_repo,
            user_badge_repo,
            challenge_repo,
            special_actions,
            stats,
            notifier,
        }
    }

    /// Evaluate every active badge for the user.
    ///
    /// Failures are collected per badge; only an unknown user or an
    /// unreadable catalog fail the whole sweep. Points credited by an award
    /// can complete other badges, so the open badges are evaluated again on
    /// fresh stats until a pass awards nothing that carries points.
    pub async fn check_and_award_badges(&self, user_id: &UserId) -> Result<CheckOutcome, DomainError> {
        let mut user = self.stats.user(user_id).await?;
        let badges = self.badge_repo.find_active().await?;
        let now = self.stats.clock().now();

        let mut outcome = CheckOutcome::new(user_id.as_str());
        outcome.evaluated = badges.len() as u32;
        let mut progressed = 0u32;
        let mut passes = 0u32;
        let mut pending: Vec<&Badge> = badges.iter().collect();

        while !pending.is_empty() {
            passes += 1;
            let mut stats_cache: HashMap<Timeframe, UserStats> = HashMap::new();
            let mut credited = false;
            let mut open = Vec::with_capacity(pending.len());

            for badge in pending {
                match self.process_badge(&user, badge, now, &mut stats_cache).await {
                    Ok(BadgeResult::Unchanged) => open.push(badge),
                    Ok(BadgeResult::Progressed) => {
                        progressed += 1;
                        open.push(badge);
                    }
                    Ok(BadgeResult::Awarded { delivery }) => {
                        credited |= badge.points() > 0;
                        outcome.newly_awarded.push(AwardedBadgeDto {
                            badge_id: badge.id().to_string(),
                            name: badge.name().to_string(),
                            points: badge.points(),
                        });
                        if let Err(e) = delivery {
                            warn!(
                                "Badge {} awarded to user {} but notification failed: {}",
                                badge.id(),
                                user_id,
                                e
                            );
                            outcome.failures.push(failure(badge, &e));
                        }
                    }
                    Ok(BadgeResult::Redelivered) => outcome.redelivered.push(badge.id().to_string()),
                    Err(e) => {
                        warn!(
                            "Badge evaluation failed for user {} badge {}: {}",
                            user_id,
                            badge.id(),
                            e
                        );
                        outcome.failures.push(failure(badge, &e));
                    }
                }
            }

            if !credited {
                break;
            }
            // The stored total moved; all-time points are read from it
            user = self.stats.user(user_id).await?;
            pending = open;
        }

        info!(
            "Badge sweep for user {}: evaluated={} passes={} progressed={} awarded={} redelivered={} failures={}",
            user_id,
            outcome.evaluated,
            passes,
            progressed,
            outcome.newly_awarded.len(),
            outcome.redelivered.len(),
            outcome.failures.len()
        );

        Ok(outcome)
    }

    async fn process_badge(
        &self,
        user: &User,
        badge: &Badge,
        now: DateTime<Utc>,
        stats_cache: &mut HashMap<Timeframe, UserStats>,
    ) -> Result<BadgeResult, DomainError> {
        let mut record = self.load_or_create(user, badge, now).await?;

        if record.is_completed() {
            if record.needs_redelivery() {
                self.deliver_badge(user.id(), badge, &mut record).await?;
                info!("Redelivered badge {} to user {}", badge.id(), user.id());
                return Ok(BadgeResult::Redelivered);
            }
            return Ok(BadgeResult::Unchanged);
        }

        let criteria = badge.criteria();
        let stats = self
            .cached_stats(user, criteria.timeframe(), now, stats_cache)
            .await?;
        let special_action = if criteria.criteria_type() == CriteriaType::SpecialAction {
            self.special_actions
                .has_completed(user.id(), badge.name())
                .await?
        } else {
            false
        };

        // Progress is measured against the target frozen on the record
        let current = CriteriaEvaluator::current_value(
            &stats,
            criteria.criteria_type(),
            special_action,
            record.target(),
        );

        match record.apply_evaluation(current, now) {
            ProgressChange::Unchanged => Ok(BadgeResult::Unchanged),
            ProgressChange::Updated => {
                if !self.user_badge_repo.update_progress(&record).await? {
                    debug!(
                        "Progress for user {} badge {} not stored; record completed elsewhere",
                        user.id(),
                        badge.id()
                    );
                    return Ok(BadgeResult::Unchanged);
                }
                Ok(BadgeResult::Progressed)
            }
            ProgressChange::Completed => {
                let credit = PointsCredit::for_badge(badge.id(), badge.name(), badge.points());
                if !self
                    .user_badge_repo
                    .complete_if_pending(&record, &credit)
                    .await?
                {
                    return self.resolve_lost_race(user.id(), badge).await;
                }

                info!(
                    "Badge '{}' ({}) awarded to user {} (+{} points)",
                    badge.name(),
                    badge.id(),
                    user.id(),
                    badge.points()
                );

                let delivery = self.deliver_badge(user.id(), badge, &mut record).await;
                Ok(BadgeResult::Awarded { delivery })
            }
        }
    }

    /// Fetch the record, creating it under the unique (user, badge) key first
    async fn load_or_create(
        &self,
        user: &User,
        badge: &Badge,
        now: DateTime<Utc>,
    ) -> Result<UserBadge, DomainError> {
        if let Some(existing) = self.user_badge_repo.find(user.id(), badge.id()).await? {
            return Ok(existing);
        }

        let fresh = UserBadge::start(
            user.id().clone(),
            badge.id().clone(),
            badge.criteria().value(),
            now,
        );
        if self.user_badge_repo.insert_if_absent(&fresh).await? {
            debug!("Started progress for user {} badge {}", user.id(), badge.id());
        }

        self.user_badge_repo
            .find(user.id(), badge.id())
            .await?
            .ok_or_else(|| {
                DomainError::ConcurrencyConflict(format!(
                    "progress record for user {} badge {} vanished after insert",
                    user.id(),
                    badge.id()
                ))
            })
    }

    /// Another caller flipped the record first; it owns the award
    async fn resolve_lost_race(
        &self,
        user_id: &UserId,
        badge: &Badge,
    ) -> Result<BadgeResult, DomainError> {
        match self.user_badge_repo.find(user_id, badge.id()).await? {
            Some(current) if current.is_completed() => {
                debug!(
                    "Badge {} for user {} completed by a concurrent sweep",
                    badge.id(),
                    user_id
                );
                Ok(BadgeResult::Unchanged)
            }
            _ => Err(DomainError::ConcurrencyConflict(format!(
                "award of badge {} to user {} lost a concurrent update",
                badge.id(),
                user_id
            ))),
        }
    }

    async fn deliver_badge(
        &self,
        user_id: &UserId,
        badge: &Badge,
        record: &mut UserBadge,
    ) -> Result<(), DomainError> {
        let notification = Notification::badge_earned(
            badge.id().as_str(),
            badge.name(),
            badge.icon(),
            badge.points(),
        );
        self.notifier.notify(user_id, notification).await?;
        self.user_badge_repo.mark_notified(record.id()).await?;
        record.mark_notified();
        Ok(())
    }

    async fn cached_stats(
        &self,
        user: &User,
        timeframe: Timeframe,
        now: DateTime<Utc>,
        cache: &mut HashMap<Timeframe, UserStats>,
    ) -> Result<UserStats, DomainError> {
        if let Some(stats) = cache.get(&timeframe) {
            return Ok(*stats);
        }
        let stats = self.stats.stats_for(user, timeframe, now).await?;
        cache.insert(timeframe, stats);
        Ok(stats)
    }

    /// Grant a completed daily challenge's reward once per user, key and day.
    ///
    /// Mirrors the badge path: the completion row and the credit commit
    /// together, and the `points_awarded` notification is redelivered until
    /// it succeeds. Only a failed redelivery is returned as an error.
    pub async fn award_challenge(
        &self,
        user_id: &UserId,
        challenge: &DailyChallenge,
        date: NaiveDate,
    ) -> Result<ChallengeAward, DomainError> {
        if !challenge.completed {
            return Ok(ChallengeAward::NotEligible);
        }

        if let Some(existing) = self
            .challenge_repo
            .find_completion(user_id, &challenge.key, date)
            .await?
        {
            if existing.notified {
                return Ok(ChallengeAward::AlreadyAwarded);
            }
            self.deliver_challenge(user_id, challenge, date).await?;
            info!(
                "Redelivered challenge '{}' reward to user {}",
                challenge.key, user_id
            );
            return Ok(ChallengeAward::Redelivered);
        }

        let completion = ChallengeCompletion {
            user_id: user_id.clone(),
            challenge_key: challenge.key.clone(),
            challenge_date: date,
            points: challenge.points,
            notified: false,
            completed_at: self.stats.clock().now(),
        };
        let credit = PointsCredit::for_challenge(&challenge.key, date, challenge.points);

        if !self
            .challenge_repo
            .record_completion_if_absent(&completion, &credit)
            .await?
        {
            debug!(
                "Challenge '{}' for user {} on {} recorded by a concurrent call",
                challenge.key, user_id, date
            );
            return Ok(ChallengeAward::AlreadyAwarded);
        }

        info!(
            "Challenge '{}' completed by user {} (+{} points)",
            challenge.key, user_id, challenge.points
        );
        let delivery = self.deliver_challenge(user_id, challenge, date).await;
        Ok(ChallengeAward::Awarded { delivery })
    }

    async fn deliver_challenge(
        &self,
        user_id: &UserId,
        challenge: &DailyChallenge,
        date: NaiveDate,
    ) -> Result<(), DomainError> {
        let notification = Notification::points_awarded(
            &challenge.key,
            date,
            &challenge.description,
            challenge.points,
        );
        self.notifier.notify(user_id, notification).await?;
        self.challenge_repo
            .mark_notified(user_id, &challenge.key, date)
            .await
    }
}

fn failure(badge: &Badge, error: &DomainError) -> BadgeFailureDto {
    BadgeFailureDto {
        badge_id: badge.id().to_string(),
        error: error.format_with_code(),
    }
}

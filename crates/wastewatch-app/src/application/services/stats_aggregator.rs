use chrono::{DateTime, FixedOffset, Utc};
use log::debug;
use std::sync::Arc;

use wastewatch_domain::badge::Timeframe;
use wastewatch_domain::shared::{Clock, DomainError, UserId};
use wastewatch_domain::stats::{current_streak, local_date, ActivityRepository, TimeWindow, UserStats};
use wastewatch_domain::user::{User, UserRepository};

use crate::application::ResultExt;

/// Public message for any failed stats query
pub const STATS_UNAVAILABLE: &str = "stats unavailable";

/// Computes a user's raw counters over a timeframe. Read-only.
pub struct StatsAggregator {
    user_repo: Arc<dyn UserRepository>,
    activity_repo: Arc<dyn ActivityRepository>,
    clock: Arc<dyn Clock>,
    offset: FixedOffset,
}

impl StatsAggregator {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
        clock: Arc<dyn Clock>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            user_repo,
            activity_repo,
            clock,
            offset,
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Resolve a user or fail with `UserNotFound`
    pub async fn user(&self, user_id: &UserId) -> Result<User, DomainError> {
        self.user_repo.get(user_id).await
    }

    pub async fn get_user_stats(
        &self,
        user_id: &UserId,
        timeframe: Timeframe,
    ) -> Result<UserStats, DomainError> {
        let user = self.user(user_id).await?;
        self.stats_for(&user, timeframe, self.clock.now()).await
    }

    /// Stats for an already resolved user at a given instant
    pub async fn stats_for(
        &self,
        user: &User,
        timeframe: Timeframe,
        now: DateTime<Utc>,
    ) -> Result<UserStats, DomainError> {
        let window = TimeWindow::for_timeframe(timeframe, now, self.offset);
        let user_id = user.id();

        let points = async {
            if window.is_all_time() {
                Ok(user.total_points())
            } else {
                self.activity_repo.sum_points(user_id, &window).await
            }
        };

        let (reports_count, collected_count, points_total, report_days) = futures::try_join!(
            self.activity_repo.count_reports(user_id, &window),
            self.activity_repo.count_collected(user_id, &window),
            points,
            self.activity_repo.report_days(user_id, &window, self.offset),
        )
        .mask_err(STATS_UNAVAILABLE)?;

        let streak = current_streak(&report_days, local_date(now, self.offset));

        debug!(
            "Stats for user {} ({}): reports={} collected={} points={} streak={}",
            user_id,
            timeframe,
            reports_count,
            collected_count,
            points_total,
            streak
        );

        Ok(UserStats {
            reports_count,
            collected_count,
            points_total,
            streak_days: i64::from(streak),
        })
    }
}

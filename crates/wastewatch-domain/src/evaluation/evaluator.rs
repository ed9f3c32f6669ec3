use crate::badge::{BadgeCriteria, CriteriaType};
use crate::stats::UserStats;
use crate::user_badge::BadgeProgress;

/// Matches a user's counters against badge criteria.
///
/// Stats must already be scoped to the criteria's timeframe.
pub struct CriteriaEvaluator;

impl CriteriaEvaluator {
    pub fn evaluate(stats: &UserStats, criteria: &BadgeCriteria, special_action: bool) -> BadgeProgress {
        let target = criteria.value();
        let current = Self::current_value(stats, criteria.criteria_type(), special_action, target);
        BadgeProgress::compute(current, target)
    }

    /// Measured value for one criteria type.
    ///
    /// A special action counts as the full `target` once the flag is set.
    pub fn current_value(
        stats: &UserStats,
        criteria_type: CriteriaType,
        special_action: bool,
        target: i64,
    ) -> i64 {
        match stats.value_for(criteria_type) {
            Some(value) => value,
            None if special_action => target,
            None => 0,
        }
    }
}

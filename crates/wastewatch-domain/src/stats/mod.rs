mod repository;
mod streak;
mod window;


pub use repository::{ActivityRepository, SpecialActionSource};
pub use streak::current_streak;
pub use window::{local_date, next_local_midnight, TimeWindow};

use serde::{Deserialize, Serialize};

use crate::badge::CriteriaType;

/// Raw counters for one user over one window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub reports_count: i64,
    pub collected_count: i64,
    pub points_total: i64,
    pub streak_days: i64,
}

impl UserStats {
    /// Counter matching a criteria type; `None` for externally supplied
    /// criteria such as special actions.
    pub fn value_for(&self, criteria_type: CriteriaType) -> Option<i64> {
        match criteria_type {
            CriteriaType::ReportsCount => Some(self.reports_count),
            CriteriaType::CollectedCount => Some(self.collected_count),
            CriteriaType::PointsTotal => Some(self.points_total),
            CriteriaType::StreakDays => Some(self.streak_days),
            CriteriaType::SpecialAction => None,
        }
    }
}

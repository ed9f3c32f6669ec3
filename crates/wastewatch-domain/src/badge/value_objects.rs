use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::shared::{string_enum, DomainError};

/// Badge grouping shown in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Reports,
    Collection,
    Community,
    Special,
    Achievement,
}

string_enum!(BadgeCategory, "badge category", InvalidInput, {
    Reports => "reports",
    Collection => "collection",
    Community => "community",
    Special => "special",
    Achievement => "achievement",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

string_enum!(BadgeRarity, "badge rarity", InvalidInput, {
    Common => "common",
    Rare => "rare",
    Epic => "epic",
    Legendary => "legendary",
});

/// The stat a badge criteria is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaType {
    ReportsCount,
    CollectedCount,
    PointsTotal,
    StreakDays,
    /// Completed outside of the tracked counters; supplied as a flag
    SpecialAction,
}

string_enum!(CriteriaType, "criteria type", InvalidCriteria, {
    ReportsCount => "reports_count",
    CollectedCount => "collected_count",
    PointsTotal => "points_total",
    StreakDays => "streak_days",
    SpecialAction => "special_action",
});

/// Window over which a stat is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    #[default]
    AllTime,
    Monthly,
    Weekly,
    Daily,
}

string_enum!(Timeframe, "timeframe", InvalidInput, {
    AllTime => "all_time",
    Monthly => "monthly",
    Weekly => "weekly",
    Daily => "daily",
});

/// Completion rule: stat type, threshold and timeframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeCriteria {
    #[serde(rename = "type")]
    criteria_type: CriteriaType,
    value: i64,
    #[serde(default)]
    timeframe: Timeframe,
}

impl BadgeCriteria {
    pub fn new(
        criteria_type: CriteriaType,
        value: i64,
        timeframe: Timeframe,
    ) -> Result<Self, DomainError> {
        if value < 0 {
            return Err(DomainError::InvalidCriteria(format!(
                "criteria value must be >= 0, got {value}"
            )));
        }

        Ok(Self {
            criteria_type,
            value,
            timeframe,
        })
    }

    /// Unchecked constructor for the built-in catalog's constant thresholds
    pub(crate) const fn from_parts(criteria_type: CriteriaType, value: i64, timeframe: Timeframe) -> Self {
        Self {
            criteria_type,
            value,
            timeframe,
        }
    }

    /// Parse from the stored string columns
    pub fn parse(criteria_type: &str, value: i64, timeframe: &str) -> Result<Self, DomainError> {
        let criteria_type = CriteriaType::from_str(criteria_type)?;
        let timeframe = Timeframe::from_str(timeframe)
            .map_err(|e| DomainError::InvalidCriteria(e.message().to_string()))?;
        Self::new(criteria_type, value, timeframe)
    }

    pub fn all_time(criteria_type: CriteriaType, value: i64) -> Result<Self, DomainError> {
        Self::new(criteria_type, value, Timeframe::AllTime)
    }

    pub fn criteria_type(&self) -> CriteriaType {
        self.criteria_type
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }
}

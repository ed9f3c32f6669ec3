use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::badge::CriteriaType;
use crate::shared::DomainError;
use crate::stats::UserStats;
use crate::user_badge::BadgeProgress;

/// A goal that resets every local day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeDefinition {
    pub key: String,
    pub description: String,
    pub metric: CriteriaType,
    pub target: i64,
    pub points: i64,
}

impl ChallengeDefinition {
    pub fn new(
        key: &str,
        description: &str,
        metric: CriteriaType,
        target: i64,
        points: i64,
    ) -> Self {
        Self {
            key: key.to_string(),
            description: description.to_string(),
            metric,
            target,
            points,
        }
    }
}

/// Today's state of one challenge for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub key: String,
    pub description: String,
    pub target: i64,
    pub current: i64,
    pub completed: bool,
    pub points: i64,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeSet {
    definitions: Vec<ChallengeDefinition>,
}

impl ChallengeSet {
    pub fn new(definitions: Vec<ChallengeDefinition>) -> Result<Self, DomainError> {
        let mut keys = HashSet::new();
        for def in &definitions {
            if def.key.trim().is_empty() {
                return Err(DomainError::Validation(
                    "Challenge key cannot be empty".to_string(),
                ));
            }
            if !keys.insert(def.key.as_str()) {
                return Err(DomainError::Validation(format!(
                    "Duplicate challenge key: {}",
                    def.key
                )));
            }
            if def.metric == CriteriaType::SpecialAction {
                return Err(DomainError::InvalidCriteria(format!(
                    "Challenge '{}' cannot use special_action",
                    def.key
                )));
            }
            if def.target <= 0 || def.points < 0 {
                return Err(DomainError::InvalidCriteria(format!(
                    "Challenge '{}' needs a positive target and non-negative points",
                    def.key
                )));
            }
        }

        Ok(Self { definitions })
    }

    pub fn definitions(&self) -> &[ChallengeDefinition] {
        &self.definitions
    }

    /// Evaluate every challenge against today's stats
    pub fn evaluate(&self, daily_stats: &UserStats, expires_at: DateTime<Utc>) -> Vec<DailyChallenge> {
        self.definitions
            .iter()
            .map(|def| {
                let current = daily_stats.value_for(def.metric).unwrap_or(0);
                let progress = BadgeProgress::compute(current, def.target);
                DailyChallenge {
                    key: def.key.clone(),
                    description: def.description.clone(),
                    target: def.target,
                    current: progress.current(),
                    completed: progress.is_complete(),
                    points: def.points,
                    expires_at,
                }
            })
            .collect()
    }
}

impl Default for ChallengeSet {
    fn default() -> Self {
        Self {
            definitions: vec![
                ChallengeDefinition::new(
                    "daily_reports",
                    "File 3 waste reports today",
                    CriteriaType::ReportsCount,
                    3,
                    20,
                ),
                ChallengeDefinition::new(
                    "daily_collected",
                    "Get 1 of your reports collected today",
                    CriteriaType::CollectedCount,
                    1,
                    15,
                ),
                ChallengeDefinition::new(
                    "daily_points",
                    "Earn 50 points today",
                    CriteriaType::PointsTotal,
                    50,
                    10,
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_daily_counts_only() {
        // Only today's two reports reach the evaluator; yesterday's ten do not
        let today = UserStats {
            reports_count: 2,
            ..UserStats::default()
        };
        let expires = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        let challenges = ChallengeSet::default().evaluate(&today, expires);

        let reports = challenges.iter().find(|c| c.key == "daily_reports").unwrap();
        assert_eq!(reports.current, 2);
        assert_eq!(reports.target, 3);
        assert!(!reports.completed);
        assert_eq!(reports.expires_at, expires);
    }

    #[test]
    fn test_completed_when_target_met() {
        let today = UserStats {
            collected_count: 1,
            ..UserStats::default()
        };
        let challenges = ChallengeSet::default().evaluate(&today, Utc::now());
        let collected = challenges.iter().find(|c| c.key == "daily_collected").unwrap();
        assert!(collected.completed);
    }

    #[test]
    fn test_default_set_is_valid() {
        let set = ChallengeSet::default();
        assert!(ChallengeSet::new(set.definitions().to_vec()).is_ok());
    }

    #[test]
    fn test_rejects_special_action_and_duplicates() {
        let special = ChallengeDefinition::new("x", "x", CriteriaType::SpecialAction, 1, 5);
        assert!(matches!(
            ChallengeSet::new(vec![special]),
            Err(DomainError::InvalidCriteria(_))
        ));

        let a = ChallengeDefinition::new("dup", "a", CriteriaType::ReportsCount, 1, 5);
        assert!(ChallengeSet::new(vec![a.clone(), a]).is_err());
    }
}

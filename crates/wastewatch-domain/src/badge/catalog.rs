use serde::Deserialize;
use std::collections::HashSet;
use std::str::FromStr;

use super::aggregate::BadgeDefinition;
use super::value_objects::{BadgeCategory, BadgeCriteria, BadgeRarity, CriteriaType, Timeframe};
use crate::shared::DomainError;

/// Validated set of badge definitions used for seeding
#[derive(Debug, Clone)]
pub struct BadgeCatalog {
    definitions: Vec<BadgeDefinition>,
}

/// Wire shape of a catalog entry; criteria fields stay strings until
/// validated so an unknown type is reported as `InvalidCriteria`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBadge {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    color: String,
    category: String,
    criteria: RawCriteria,
    #[serde(default = "default_rarity")]
    rarity: String,
    #[serde(default)]
    points: i64,
}

#[derive(Debug, Deserialize)]
struct RawCriteria {
    #[serde(rename = "type")]
    kind: String,
    value: i64,
    #[serde(default = "default_timeframe")]
    timeframe: String,
}

fn default_rarity() -> String {
    BadgeRarity::Common.as_str().to_string()
}

fn default_timeframe() -> String {
    Timeframe::AllTime.as_str().to_string()
}

impl RawBadge {
    fn into_definition(self) -> Result<BadgeDefinition, DomainError> {
        let criteria = BadgeCriteria::parse(
            &self.criteria.kind,
            self.criteria.value,
            &self.criteria.timeframe,
        )
        .map_err(|e| DomainError::InvalidCriteria(format!("badge '{}': {}", self.name, e.message())))?;

        Ok(BadgeDefinition {
            category: BadgeCategory::from_str(&self.category)?,
            rarity: BadgeRarity::from_str(&self.rarity)?,
            name: self.name,
            description: self.description,
            icon: self.icon,
            color: self.color,
            criteria,
            points: self.points,
        })
    }
}

impl BadgeCatalog {
    pub fn new(definitions: Vec<BadgeDefinition>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for def in &definitions {
            if def.name.trim().is_empty() {
                return Err(DomainError::Validation(
                    "Badge name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(def.name.trim().to_lowercase()) {
                return Err(DomainError::Validation(format!(
                    "Duplicate badge name in catalog: {}",
                    def.name
                )));
            }
            if def.points < 0 {
                return Err(DomainError::Validation(format!(
                    "Badge '{}' points cannot be negative",
                    def.name
                )));
            }
        }

        Ok(Self { definitions })
    }

    /// Load an admin-supplied JSON array of badges
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let raw: Vec<RawBadge> = serde_json::from_str(json).map_err(|e| {
            DomainError::Deserialization(format!("Failed to parse badge catalog: {}", e))
        })?;

        let definitions = raw
            .into_iter()
            .map(RawBadge::into_definition)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(definitions)
    }

    pub fn definitions(&self) -> &[BadgeDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Built-in seed set
    pub fn default_catalog() -> Self {
        use BadgeCategory::*;
        use BadgeRarity::*;
        use CriteriaType::*;

        let entry = |name: &str,
                     description: &str,
                     icon: &str,
                     color: &str,
                     category: BadgeCategory,
                     criteria: (CriteriaType, i64, Timeframe),
                     rarity: BadgeRarity,
                     points: i64| BadgeDefinition {
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            category,
            criteria: BadgeCriteria::from_parts(criteria.0, criteria.1, criteria.2),
            rarity,
            points,
        };

        let definitions = vec![
            entry("First Report", "File your first waste report", "📝", "#4CAF50", Reports, (ReportsCount, 1, Timeframe::AllTime), Common, 10),
            entry("Active Reporter", "File 10 waste reports", "📋", "#2196F3", Reports, (ReportsCount, 10, Timeframe::AllTime), Common, 25),
            entry("Dedicated Reporter", "File 50 waste reports", "📚", "#3F51B5", Reports, (ReportsCount, 50, Timeframe::AllTime), Rare, 75),
            entry("Report Master", "File 100 waste reports", "🏆", "#9C27B0", Reports, (ReportsCount, 100, Timeframe::AllTime), Epic, 150),
            entry("Weekly Warrior", "File 5 reports in a single week", "📅", "#00BCD4", Reports, (ReportsCount, 5, Timeframe::Weekly), Rare, 40),
            entry("Monthly Guardian", "File 20 reports in a single month", "🗓️", "#009688", Reports, (ReportsCount, 20, Timeframe::Monthly), Epic, 100),
            entry("First Cleanup", "Have your first report collected", "🧹", "#8BC34A", Collection, (CollectedCount, 1, Timeframe::AllTime), Common, 15),
            entry("Cleanup Crew", "Have 25 of your reports collected", "🚛", "#689F38", Collection, (CollectedCount, 25, Timeframe::AllTime), Rare, 80),
            entry("Point Collector", "Earn 100 points", "⭐", "#FFC107", Achievement, (PointsTotal, 100, Timeframe::AllTime), Common, 0),
            entry("Point Hoarder", "Earn 500 points", "🌟", "#FF9800", Achievement, (PointsTotal, 500, Timeframe::AllTime), Rare, 0),
            entry("Point Legend", "Earn 1000 points", "💫", "#FF5722", Achievement, (PointsTotal, 1000, Timeframe::AllTime), Legendary, 0),
            entry("On a Roll", "Report waste 3 days in a row", "🔥", "#F44336", Achievement, (StreakDays, 3, Timeframe::AllTime), Common, 20),
            entry("Week Streak", "Report waste 7 days in a row", "⚡", "#E91E63", Achievement, (StreakDays, 7, Timeframe::AllTime), Rare, 50),
            entry("Unstoppable", "Report waste 30 days in a row", "🌋", "#B71C1C", Achievement, (StreakDays, 30, Timeframe::AllTime), Legendary, 300),
            entry("Community Champion", "Organize or join a community cleanup event", "🤝", "#795548", Community, (SpecialAction, 1, Timeframe::AllTime), Epic, 100),
            entry("City Pioneer", "Among the first citizens to join the platform", "🏙️", "#607D8B", Special, (SpecialAction, 1, Timeframe::AllTime), Legendary, 50),
        ];

        Self { definitions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = BadgeCatalog::default_catalog();
        assert!(!catalog.is_empty());
        // Re-validate through the checked constructor
        assert!(BadgeCatalog::new(catalog.definitions().to_vec()).is_ok());
    }

    #[test]
    fn test_from_json_parses_entries() {
        let json = r#"[
            {
                "name": "Bin Buddy",
                "description": "File 3 reports today",
                "category": "reports",
                "criteria": { "type": "reports_count", "value": 3, "timeframe": "daily" },
                "rarity": "rare",
                "points": 30
            }
        ]"#;

        let catalog = BadgeCatalog::from_json(json).unwrap();
        let def = &catalog.definitions()[0];
        assert_eq!(def.name, "Bin Buddy");
        assert_eq!(def.criteria.criteria_type(), CriteriaType::ReportsCount);
        assert_eq!(def.criteria.timeframe(), Timeframe::Daily);
        assert_eq!(def.rarity, BadgeRarity::Rare);
    }

    #[test]
    fn test_unknown_criteria_type_fails_loudly() {
        let json = r#"[
            { "name": "Mystery", "category": "special",
              "criteria": { "type": "tweets_count", "value": 3 } }
        ]"#;

        match BadgeCatalog::from_json(json) {
            Err(DomainError::InvalidCriteria(msg)) => assert!(msg.contains("tweets_count")),
            other => panic!("Expected InvalidCriteria, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let json = r#"[
            { "name": "Twin", "category": "reports", "criteria": { "type": "reports_count", "value": 1 } },
            { "name": "twin", "category": "reports", "criteria": { "type": "reports_count", "value": 2 } }
        ]"#;

        assert!(matches!(
            BadgeCatalog::from_json(json),
            Err(DomainError::Validation(_))
        ));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{BadgeCategory, BadgeCriteria, BadgeRarity};
use crate::shared::{BadgeId, DomainError};

/// Everything an admin supplies to define a badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub category: BadgeCategory,
    pub criteria: BadgeCriteria,
    pub rarity: BadgeRarity,
    pub points: i64,
}

/// Badge aggregate root (catalog entry)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    id: BadgeId,
    name: String,
    description: String,
    icon: String,
    color: String,
    category: BadgeCategory,
    criteria: BadgeCriteria,
    rarity: BadgeRarity,
    points: i64,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl Badge {
    /// Create a new active badge from a definition
    pub fn new(definition: BadgeDefinition, created_at: DateTime<Utc>) -> Result<Self, DomainError> {
        if definition.name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Badge name cannot be empty".to_string(),
            ));
        }
        if definition.points < 0 {
            return Err(DomainError::Validation(format!(
                "Badge '{}' points cannot be negative",
                definition.name
            )));
        }
        if definition.criteria.value() < 0 {
            return Err(DomainError::InvalidCriteria(format!(
                "Badge '{}' has a negative threshold",
                definition.name
            )));
        }

        Ok(Self {
            id: BadgeId::new(),
            name: definition.name.trim().to_string(),
            description: definition.description,
            icon: definition.icon,
            color: definition.color,
            category: definition.category,
            criteria: definition.criteria,
            rarity: definition.rarity,
            points: definition.points,
            is_active: true,
            created_at,
        })
    }

    /// Reconstruct from persistence
    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: BadgeId,
        name: String,
        description: String,
        icon: String,
        color: String,
        category: BadgeCategory,
        criteria: BadgeCriteria,
        rarity: BadgeRarity,
        points: i64,
        is_active: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            icon,
            color,
            category,
            criteria,
            rarity,
            points,
            is_active,
            created_at,
        }
    }

    // Getters
    pub fn id(&self) -> &BadgeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn category(&self) -> BadgeCategory {
        self.category
    }

    pub fn criteria(&self) -> &BadgeCriteria {
        &self.criteria
    }

    pub fn rarity(&self) -> BadgeRarity {
        self.rarity
    }

    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // Business methods

    /// Badges are never deleted, only deactivated
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }
}

/// Catalog listing filter; `None` fields match anything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeFilter {
    pub category: Option<BadgeCategory>,
    pub rarity: Option<BadgeRarity>,
    pub is_active: Option<bool>,
}

impl BadgeFilter {
    pub fn active_only() -> Self {
        Self {
            is_active: Some(true),
            ..Self::default()
        }
    }

    pub fn matches(&self, badge: &Badge) -> bool {
        self.category.map_or(true, |c| c == badge.category())
            && self.rarity.map_or(true, |r| r == badge.rarity())
            && self.is_active.map_or(true, |a| a == badge.is_active())
    }
}

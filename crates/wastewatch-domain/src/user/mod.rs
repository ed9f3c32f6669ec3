mod repository;

pub use repository::UserRepository;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::{DomainError, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Citizen,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Citizen => "citizen",
            UserRole::Admin => "admin",
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "citizen" | "user" => Ok(UserRole::Citizen),
            "admin" => Ok(UserRole::Admin),
            _ => Err(DomainError::InvalidInput(format!("Unknown user role: {s}"))),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read model of an account in the user store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: UserRole,
    total_points: i64,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn from_persistence(
        id: UserId,
        name: String,
        email: String,
        role: UserRole,
        total_points: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            role,
            total_points,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Cumulative points; never negative
    pub fn total_points(&self) -> i64 {
        self.total_points.max(0)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A ledger entry this engine appends when it grants points.
///
/// `source_key` is unique in the ledger, so replaying the same credit is a
/// no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsCredit {
    pub amount: i64,
    pub reason: String,
    pub source_key: String,
}

impl PointsCredit {
    pub fn for_badge(badge_id: &crate::shared::BadgeId, badge_name: &str, amount: i64) -> Self {
        Self {
            amount,
            reason: format!("Badge earned: {badge_name}"),
            source_key: format!("badge:{badge_id}"),
        }
    }

    pub fn for_challenge(key: &str, date: chrono::NaiveDate, amount: i64) -> Self {
        Self {
            amount,
            reason: format!("Daily challenge completed: {key}"),
            source_key: format!("challenge:{key}:{}", date.format("%Y-%m-%d")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_role_aliases() {
        assert_eq!("user".parse::<UserRole>().unwrap(), UserRole::Citizen);
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("root".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_negative_total_reads_as_zero() {
        let user = User::from_persistence(
            UserId::from_string("u1"),
            "Ana".to_string(),
            "ana@example.com".to_string(),
            UserRole::Citizen,
            -20,
            Utc::now(),
        );
        assert_eq!(user.total_points(), 0);
    }

    #[test]
    fn test_credit_source_keys() {
        let badge = crate::shared::BadgeId::from_string("b1");
        assert_eq!(PointsCredit::for_badge(&badge, "First Report", 10).source_key, "badge:b1");

        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            PointsCredit::for_challenge("daily_reports", date, 20).source_key,
            "challenge:daily_reports:2024-05-01"
        );
    }
}

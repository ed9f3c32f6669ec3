use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::shared::{string_enum, DomainError, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BadgeEarned,
    PointsAwarded,
}

string_enum!(NotificationKind, "notification kind", InvalidInput, {
    BadgeEarned => "badge_earned",
    PointsAwarded => "points_awarded",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    /// Identifies the award within its kind: a badge id, or `<key>:<date>`
    /// for a daily challenge
    pub subject: String,
    pub title: String,
    pub payload: serde_json::Value,
}

impl Notification {
    pub fn badge_earned(badge_id: &str, badge_name: &str, icon: &str, points: i64) -> Self {
        Self {
            kind: NotificationKind::BadgeEarned,
            subject: badge_id.to_string(),
            title: format!("Badge earned: {badge_name}"),
            payload: json!({
                "badgeId": badge_id,
                "badgeName": badge_name,
                "icon": icon,
                "points": points,
            }),
        }
    }

    pub fn points_awarded(
        challenge_key: &str,
        date: NaiveDate,
        description: &str,
        points: i64,
    ) -> Self {
        Self {
            kind: NotificationKind::PointsAwarded,
            subject: format!("{challenge_key}:{date}"),
            title: format!("+{points} points"),
            payload: json!({
                "challengeKey": challenge_key,
                "date": date.to_string(),
                "description": description,
                "points": points,
            }),
        }
    }

    /// Stable per (kind, user, award); a store keyed on it keeps one row
    /// per award no matter how often it is delivered.
    pub fn dedupe_key(&self, user_id: &UserId) -> String {
        format!("{}:{}:{}", self.kind.as_str(), user_id, self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_key_per_award() {
        let user = UserId::from_string("ada");
        let badge = Notification::badge_earned("b1", "First Report", "📝", 10);
        assert_eq!(badge.dedupe_key(&user), "badge_earned:ada:b1");

        let day = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let challenge = Notification::points_awarded("daily_reports", day, "File 3 reports", 20);
        assert_eq!(challenge.dedupe_key(&user), "points_awarded:ada:daily_reports:2024-05-15");

        let next_day = Notification::points_awarded("daily_reports", day.succ_opt().unwrap(), "File 3 reports", 20);
        assert_ne!(challenge.dedupe_key(&user), next_day.dedupe_key(&user));
    }
}

/// Delivers award notifications to a user.
///
/// Callers may deliver the same award more than once; implementations
/// should treat (user, payload) as idempotent.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user_id: &UserId, notification: Notification) -> Result<(), DomainError>;
}

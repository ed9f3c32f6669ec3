use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::progress::BadgeProgress;
use crate::shared::{BadgeId, UserBadgeId, UserId};

/// What an evaluation did to a progress record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressChange {
    Unchanged,
    Updated,
    /// Crossed the threshold on this evaluation
    Completed,
}

/// Per-(user, badge) progress record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBadge {
    id: UserBadgeId,
    user_id: UserId,
    badge_id: BadgeId,
    progress: BadgeProgress,
    is_completed: bool,
    earned_at: Option<DateTime<Utc>>,
    notified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserBadge {
    /// Start tracking a badge; `target` is frozen from here on
    pub fn start(user_id: UserId, badge_id: BadgeId, target: i64, now: DateTime<Utc>) -> Self {
        Self {
            id: UserBadgeId::new(),
            user_id,
            badge_id,
            progress: BadgeProgress::pending(target),
            is_completed: false,
            earned_at: None,
            notified: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: UserBadgeId,
        user_id: UserId,
        badge_id: BadgeId,
        progress: BadgeProgress,
        is_completed: bool,
        earned_at: Option<DateTime<Utc>>,
        notified: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            badge_id,
            progress,
            is_completed,
            earned_at,
            notified,
            created_at,
            updated_at,
        }
    }

    // Getters
    pub fn id(&self) -> &UserBadgeId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn badge_id(&self) -> &BadgeId {
        &self.badge_id
    }

    pub fn progress(&self) -> &BadgeProgress {
        &self.progress
    }

    pub fn target(&self) -> i64 {
        self.progress.target()
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn earned_at(&self) -> Option<DateTime<Utc>> {
        self.earned_at
    }

    pub fn notified(&self) -> bool {
        self.notified
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Completed but the award notification never went out
    pub fn needs_redelivery(&self) -> bool {
        self.is_completed && !self.notified
    }

    // Business methods

    /// Apply a freshly measured value against the frozen target.
    ///
    /// Completed records are never touched again.
    pub fn apply_evaluation(&mut self, current: i64, now: DateTime<Utc>) -> ProgressChange {
        if self.is_completed {
            return ProgressChange::Unchanged;
        }

        let next = BadgeProgress::compute(current, self.progress.target());
        if next == self.progress {
            return ProgressChange::Unchanged;
        }

        self.progress = next;
        self.updated_at = now;

        if next.is_complete() {
            self.is_completed = true;
            self.earned_at = Some(now);
            ProgressChange::Completed
        } else {
            ProgressChange::Updated
        }
    }

    pub fn mark_notified(&mut self) {
        self.notified = true;
    }
}

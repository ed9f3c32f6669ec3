// Domain layer - Pure gamification rules
// No dependencies on infrastructure or presentation layers

pub mod badge;
pub mod challenge;
pub mod evaluation;
pub mod events;
pub mod leaderboard;
pub mod level;
pub mod notification;
pub mod shared;
pub mod stats;
pub mod user;
pub mod user_badge;

// Re-exports for convenience
pub use events::DomainEvent;
pub use shared::{BadgeId, DomainError, UserBadgeId, UserId};

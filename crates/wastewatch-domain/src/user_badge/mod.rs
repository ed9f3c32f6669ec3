mod aggregate;
mod progress;
mod repository;


pub use aggregate::{ProgressChange, UserBadge};
pub use progress::BadgeProgress;
pub use repository::{UserBadgeDetails, UserBadgeQuery, UserBadgeRepository};

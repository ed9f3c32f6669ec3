mod gamification;

pub use gamification::{ConfigError, GamificationConfig};

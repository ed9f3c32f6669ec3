use chrono::{FixedOffset, Offset, Utc};
use std::str::FromStr;

use wastewatch_domain::challenge::ChallengeSet;
use wastewatch_domain::level::LevelLadder;

pub const ENV_UTC_OFFSET_MINUTES: &str = "WASTEWATCH_UTC_OFFSET_MINUTES";
pub const ENV_LEADERBOARD_LIMIT: &str = "WASTEWATCH_LEADERBOARD_LIMIT";
pub const ENV_MAX_PAGE_SIZE: &str = "WASTEWATCH_MAX_PAGE_SIZE";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value '{value}': {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Engine settings
#[derive(Debug, Clone)]
pub struct GamificationConfig {
    /// Offset of the municipality's local time from UTC; sets day boundaries
    pub utc_offset: FixedOffset,

    /// Leaderboard page size when the caller gives none (default: 10)
    pub default_leaderboard_limit: u32,

    /// Upper bound for any page size (default: 100)
    pub max_page_size: u32,

    /// Completed badges shown on a profile (default: 5)
    pub recent_badge_count: u32,

    pub level_ladder: LevelLadder,

    pub challenges: ChallengeSet,
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
            default_leaderboard_limit: 10,
            max_page_size: 100,
            recent_badge_count: 5,
            level_ladder: LevelLadder::default(),
            challenges: ChallengeSet::default(),
        }
    }
}

impl GamificationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by any `WASTEWATCH_*` variables that are set
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_UTC_OFFSET_MINUTES) {
            let minutes: i32 = parse(ENV_UTC_OFFSET_MINUTES, &raw)?;
            config.utc_offset = offset_from_minutes(minutes).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_UTC_OFFSET_MINUTES,
                value: raw.clone(),
                reason: "must be within ±1439 minutes".to_string(),
            })?;
        }

        if let Some(raw) = lookup(ENV_LEADERBOARD_LIMIT) {
            config.default_leaderboard_limit = parse_positive(ENV_LEADERBOARD_LIMIT, &raw)?;
        }

        if let Some(raw) = lookup(ENV_MAX_PAGE_SIZE) {
            config.max_page_size = parse_positive(ENV_MAX_PAGE_SIZE, &raw)?;
        }

        Ok(config)
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn with_default_leaderboard_limit(mut self, limit: u32) -> Self {
        self.default_leaderboard_limit = limit;
        self
    }

    pub fn with_max_page_size(mut self, max: u32) -> Self {
        self.max_page_size = max;
        self
    }

    pub fn with_recent_badge_count(mut self, count: u32) -> Self {
        self.recent_badge_count = count;
        self
    }

    pub fn with_level_ladder(mut self, ladder: LevelLadder) -> Self {
        self.level_ladder = ladder;
        self
    }

    pub fn with_challenges(mut self, challenges: ChallengeSet) -> Self {
        self.challenges = challenges;
        self
    }
}

fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
}

fn parse<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u32, ConfigError> {
    let value: u32 = parse(key, raw)?;
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(value)
}

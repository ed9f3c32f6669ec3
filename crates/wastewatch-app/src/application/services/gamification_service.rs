use log::info;
use std::sync::Arc;

use wastewatch_domain::badge::{Badge, BadgeCatalog, BadgeFilter, BadgeRepository, Timeframe};
use wastewatch_domain::leaderboard::LeaderboardType;
use wastewatch_domain::level::LevelLadder;
use wastewatch_domain::shared::{BadgeId, DomainError, Page, PageRequest, UserId};
use wastewatch_domain::user_badge::{UserBadgeQuery, UserBadgeRepository};

use super::{BadgeProgressTracker, ChallengeService, LeaderboardService, StatsAggregator};
use crate::application::config::GamificationConfig;
use crate::application::dtos::{
    BadgeDto, CheckOutcome, DailyChallengeDto, LeaderboardDto, LeaderboardOptions,
    UserBadgeDto, UserBadgesOptions, UserLevelDto, UserProfileDto, UserRankDto, UserStatsDto,
    UserSummaryDto,
};

/// Page size for badge listings when the caller gives none
pub const DEFAULT_USER_BADGE_LIMIT: u32 = 20;

/// Outer surface of the engine
pub struct GamificationService {
    badge_repo: Arc<dyn BadgeRepository>,
    user_badge_repo: Arc<dyn UserBadgeRepository>,
    stats: Arc<StatsAggregator>,
    tracker: Arc<BadgeProgressTracker>,
    leaderboard: Arc<LeaderboardService>,
    challenges: Arc<ChallengeService>,
    ladder: LevelLadder,
    max_page_size: u32,
    recent_badge_count: u32,
}

impl GamificationService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        badge_repo: Arc<dyn BadgeRepository>,
        user_badge_repo: Arc<dyn UserBadgeRepository>,
        stats: Arc<StatsAggregator>,
        tracker: Arc<BadgeProgressTracker>,
        leaderboard: Arc<LeaderboardService>,
        challenges: Arc<ChallengeService>,
        config: &GamificationConfig,
    ) -> Self {
        Self {
            badge_repo,
            user_badge_repo,
            stats,
            tracker,
            leaderboard,
            challenges,
            ladder: config.level_ladder.clone(),
            max_page_size: config.max_page_size,
            recent_badge_count: config.recent_badge_count,
        }
    }

    /// Seed the built-in catalog; returns how many badges were new
    pub async fn initialize_default_badges(&self) -> Result<u32, DomainError> {
        self.seed_catalog(&BadgeCatalog::default_catalog()).await
    }

    /// Insert catalog entries missing by name. Existing badges are left as is.
    pub async fn seed_catalog(&self, catalog: &BadgeCatalog) -> Result<u32, DomainError> {
        let now = self.stats.clock().now();
        let mut inserted = 0;

        for definition in catalog.definitions() {
            let badge = Badge::new(definition.clone(), now)?;
            if self.badge_repo.insert_if_absent(&badge).await? {
                inserted += 1;
            }
        }

        info!(
            "Badge catalog seeded: {} new of {} definitions",
            inserted,
            catalog.len()
        );
        Ok(inserted)
    }

    /// Catalog listing; active badges only unless a filter says otherwise
    pub async fn get_all_badges(
        &self,
        filter: Option<BadgeFilter>,
    ) -> Result<Vec<BadgeDto>, DomainError> {
        let filter = filter.unwrap_or_else(BadgeFilter::active_only);
        let badges = self.badge_repo.find_all(&filter).await?;
        Ok(badges.iter().map(BadgeDto::from).collect())
    }

    pub async fn set_badge_active(
        &self,
        badge_id: &BadgeId,
        active: bool,
    ) -> Result<BadgeDto, DomainError> {
        let mut badge = self
            .badge_repo
            .find_by_id(badge_id)
            .await?
            .ok_or_else(|| DomainError::BadgeNotFound(badge_id.to_string()))?;

        if active {
            badge.activate();
        } else {
            badge.deactivate();
        }
        self.badge_repo.update(&badge).await?;

        info!("Badge {} active={}", badge_id, active);
        Ok(BadgeDto::from(&badge))
    }

    pub async fn get_user_badges(
        &self,
        user_id: &UserId,
        options: &UserBadgesOptions,
    ) -> Result<Page<UserBadgeDto>, DomainError> {
        self.stats.user(user_id).await?;

        let page = PageRequest::new(
            options.page.unwrap_or(1),
            options.limit.unwrap_or(DEFAULT_USER_BADGE_LIMIT),
            self.max_page_size,
        )?;
        let query = UserBadgeQuery {
            completed_only: options.completed_only,
        };

        let (items, total) = self
            .user_badge_repo
            .list_for_user(user_id, query, page)
            .await?;

        Ok(Page::new(items, total, page).map(|details| UserBadgeDto::from(&details)))
    }

    /// User, all-time stats, level, recent badges and today's challenges
    pub async fn get_user_profile(&self, user_id: &UserId) -> Result<UserProfileDto, DomainError> {
        // Evaluating challenges may credit points, so totals are read after
        let daily_challenges = self.challenges.get_daily_challenges(user_id).await?;

        let user = self.stats.user(user_id).await?;
        let now = self.stats.clock().now();

        let stats = self.stats.stats_for(&user, Timeframe::AllTime, now).await?;
        let level = self.ladder.calculate(user.total_points());

        let recent_page = PageRequest::new(1, self.recent_badge_count.max(1), self.max_page_size)?;
        let (recent, _) = self
            .user_badge_repo
            .list_for_user(user_id, UserBadgeQuery { completed_only: true }, recent_page)
            .await?;
        let completed_badge_count = self.user_badge_repo.count_completed(user_id).await?;

        Ok(UserProfileDto {
            user: UserSummaryDto::from(&user),
            stats: UserStatsDto::new(user_id.as_str(), Timeframe::AllTime, &stats),
            level: UserLevelDto::from(&level),
            recent_badges: recent.iter().map(UserBadgeDto::from).collect(),
            completed_badge_count,
            daily_challenges: daily_challenges.iter().map(DailyChallengeDto::from).collect(),
        })
    }

    pub async fn get_leaderboard(
        &self,
        options: &LeaderboardOptions,
    ) -> Result<LeaderboardDto, DomainError> {
        self.leaderboard.get_leaderboard(options).await
    }

    pub async fn get_user_rank(
        &self,
        user_id: &UserId,
        leaderboard_type: LeaderboardType,
        period: Timeframe,
    ) -> Result<UserRankDto, DomainError> {
        self.leaderboard
            .get_user_rank(user_id, leaderboard_type, period)
            .await
    }

    /// Admin re-evaluation of every active badge
    pub async fn check_user_badges(&self, user_id: &UserId) -> Result<CheckOutcome, DomainError> {
        self.tracker.check_and_award_badges(user_id).await
    }

    pub async fn get_user_stats(
        &self,
        user_id: &UserId,
        timeframe: Timeframe,
    ) -> Result<UserStatsDto, DomainError> {
        let stats = self.stats.get_user_stats(user_id, timeframe).await?;
        Ok(UserStatsDto::new(user_id.as_str(), timeframe, &stats))
    }

    pub async fn get_daily_challenges(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<DailyChallengeDto>, DomainError> {
        let challenges = self.challenges.get_daily_challenges(user_id).await?;
        Ok(challenges.iter().map(DailyChallengeDto::from).collect())
    }

    pub fn calculate_user_level(&self, total_points: i64) -> UserLevelDto {
        UserLevelDto::from(&self.ladder.calculate(total_points))
    }
}

use chrono::FixedOffset;
use std::sync::Arc;

use wastewatch_domain::badge::Timeframe;
use wastewatch_domain::leaderboard::{
    assign_ranks, LeaderboardQuery, LeaderboardRepository, LeaderboardRow, LeaderboardType,
};
use wastewatch_domain::shared::{Clock, DomainError, PageRequest, UserId};
use wastewatch_domain::stats::TimeWindow;
use wastewatch_domain::user::UserRepository;

use crate::application::dtos::{LeaderboardDto, LeaderboardEntryDto, LeaderboardOptions, UserRankDto};

pub struct LeaderboardService {
    leaderboard_repo: Arc<dyn LeaderboardRepository>,
    user_repo: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    offset: FixedOffset,
    default_limit: u32,
    max_limit: u32,
}

impl LeaderboardService {
    pub fn new(
        leaderboard_repo: Arc<dyn LeaderboardRepository>,
        user_repo: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        offset: FixedOffset,
        default_limit: u32,
        max_limit: u32,
    ) -> Self {
        Self {
            leaderboard_repo,
            user_repo,
            clock,
            offset,
            default_limit,
            max_limit,
        }
    }

    pub async fn get_leaderboard(
        &self,
        options: &LeaderboardOptions,
    ) -> Result<LeaderboardDto, DomainError> {
        let query = LeaderboardQuery {
            leaderboard_type: options.leaderboard_type,
            period: options.period,
            page: PageRequest::new(
                options.page.unwrap_or(1),
                options.limit.unwrap_or(self.default_limit),
                self.max_limit,
            )?,
        };
        let window = self.window(query.period);

        let rows = self
            .leaderboard_repo
            .fetch_rows(query.leaderboard_type, &window, query.page)
            .await?;

        let entries = assign_ranks(rows, query.page)
            .into_iter()
            .map(LeaderboardEntryDto::from)
            .collect();

        Ok(LeaderboardDto {
            leaderboard_type: query.leaderboard_type.to_string(),
            period: query.period.to_string(),
            page: query.page.page(),
            limit: query.page.limit(),
            entries,
        })
    }

    /// Rank of one user under the same ordering as `get_leaderboard`
    pub async fn get_user_rank(
        &self,
        user_id: &UserId,
        leaderboard_type: LeaderboardType,
        period: Timeframe,
    ) -> Result<UserRankDto, DomainError> {
        self.user_repo.get(user_id).await?;

        let mut rows = self
            .leaderboard_repo
            .fetch_all_rows(leaderboard_type, &self.window(period))
            .await?;
        rows.sort_by(LeaderboardRow::standing_cmp);

        let position = rows.iter().position(|row| &row.user_id == user_id);

        Ok(UserRankDto {
            user_id: user_id.to_string(),
            leaderboard_type: leaderboard_type.to_string(),
            period: period.to_string(),
            rank: position.map(|index| index as u64 + 1),
            metric_value: position.map(|index| rows[index].metric_value),
        })
    }

    fn window(&self, period: Timeframe) -> TimeWindow {
        TimeWindow::for_timeframe(period, self.clock.now(), self.offset)
    }
}

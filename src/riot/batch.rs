//! Multi-request flows built on the endpoint methods.

use std::fmt;

use futures::{StreamExt, stream};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::client::RiotClient;
use super::endpoints::MatchIdsQuery;
use super::outcome::{ApiOutcome, RiotApiError};
use super::region::{Platform, Region};
use super::types::{AccountDto, LeagueEntryDto, MatchDto, SummonerDto};

/// Stage of a player lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStep {
    Account,
    Summoner,
    LeagueEntries,
}

impl fmt::Display for LookupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Account => "account",
            Self::Summoner => "summoner",
            Self::LeagueEntries => "league entries",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepFailure {
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Failed(#[from] RiotApiError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{step} lookup failed: {reason}")]
pub struct LookupError {
    pub step: LookupStep,
    pub reason: StepFailure,
}

impl LookupError {
    fn at(step: LookupStep) -> impl FnOnce(StepFailure) -> Self {
        move |reason| Self { step, reason }
    }

    pub fn is_not_found(&self) -> bool {
        self.reason == StepFailure::NotFound
    }
}

/// Everything known about a player after a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub platform: Platform,
    pub account: AccountDto,
    pub summoner: SummonerDto,
    /// Empty for unranked players.
    pub league_entries: Vec<LeagueEntryDto>,
}

impl PlayerProfile {
    pub fn puuid(&self) -> &str {
        &self.account.puuid
    }

    pub fn solo_queue(&self) -> Option<&LeagueEntryDto> {
        self.league_entries.iter().find(|e| e.is_solo_queue())
    }

    pub fn flex_queue(&self) -> Option<&LeagueEntryDto> {
        self.league_entries.iter().find(|e| e.is_flex_queue())
    }
}

fn required<T>(outcome: ApiOutcome<T>) -> Result<T, StepFailure> {
    match outcome {
        ApiOutcome::Success(value) => Ok(value),
        ApiOutcome::NotFound => Err(StepFailure::NotFound),
        ApiOutcome::Failed(err) => Err(StepFailure::Failed(err)),
    }
}

impl RiotClient {
    /// Resolve a Riot ID into account, summoner and ranked entries.
    ///
    /// The three calls run in order and the first failure stops the lookup.
    pub async fn resolve_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
        platform: Platform,
    ) -> Result<PlayerProfile, LookupError> {
        debug!(game_name, tag_line, %platform, "🔍 resolving player");

        let account = required(
            self.get_account_by_riot_id(platform.to_region(), game_name, tag_line)
                .await,
        )
        .map_err(LookupError::at(LookupStep::Account))?;

        let summoner = required(self.get_summoner_by_puuid(platform, &account.puuid).await)
            .map_err(LookupError::at(LookupStep::Summoner))?;

        let league_entries = self
            .get_league_entries_by_puuid(platform, &account.puuid)
            .await
            .into_result()
            .map_err(|err| LookupError::at(LookupStep::LeagueEntries)(err.into()))?
            .unwrap_or_default();

        info!(
            riot_id = %account.riot_id(),
            %platform,
            ranked_queues = league_entries.len(),
            "✅ player resolved"
        );

        Ok(PlayerProfile {
            platform,
            account,
            summoner,
            league_entries,
        })
    }

    /// Fetch up to `count` matches of a player, starting `start_offset` matches back.
    ///
    /// `count` is capped at [`MatchIdsQuery::MAX_COUNT`], so callers paging
    /// through history must advance `start_offset` by at most that amount.
    /// Match details are fetched with at most `max_workers` requests in flight.
    /// Details that fail are logged and left out. The result is sorted newest first.
    pub async fn fetch_match_batch(
        &self,
        region: Region,
        puuid: &str,
        count: u32,
        start_offset: u32,
    ) -> Result<Vec<MatchDto>, RiotApiError> {
        let count = count.min(MatchIdsQuery::MAX_COUNT);
        if count == 0 {
            return Ok(Vec::new());
        }

        let ids = self
            .get_match_ids(region, puuid, &MatchIdsQuery::page(start_offset, count))
            .await
            .into_result()?
            .unwrap_or_default();

        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!(count = ids.len(), start_offset, "📥 fetching match details");

        let mut matches: Vec<MatchDto> = stream::iter(ids)
            .map(|match_id| async move {
                let outcome = self.get_match(region, &match_id).await;
                (match_id, outcome)
            })
            .buffer_unordered(self.max_workers())
            .filter_map(|(match_id, outcome)| async move {
                match outcome {
                    ApiOutcome::Success(match_data) => Some(match_data),
                    ApiOutcome::NotFound => {
                        warn!(match_id = %match_id, "⚠️ match vanished, skipping");
                        None
                    }
                    ApiOutcome::Failed(err) => {
                        warn!(match_id = %match_id, error = %err, "⚠️ failed to fetch match, skipping");
                        None
                    }
                }
            })
            .collect()
            .await;

        matches.sort_by(|a, b| b.info.game_creation.cmp(&a.info.game_creation));

        Ok(matches)
    }
}

/// Walks a player's match history one batch at a time.
pub struct MatchPager<'a> {
    client: &'a RiotClient,
    region: Region,
    puuid: String,
    page_size: u32,
    offset: u32,
    exhausted: bool,
}

impl<'a> MatchPager<'a> {
    pub fn new(client: &'a RiotClient, region: Region, puuid: impl Into<String>, page_size: u32) -> Self {
        Self {
            client,
            region,
            puuid: puuid.into(),
            page_size: page_size.clamp(1, MatchIdsQuery::MAX_COUNT),
            offset: 0,
            exhausted: false,
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Next batch, or `None` once an empty batch has been returned.
    pub async fn next_page(&mut self) -> Result<Option<Vec<MatchDto>>, RiotApiError> {
        if self.exhausted {
            return Ok(None);
        }

        let batch = self
            .client
            .fetch_match_batch(self.region, &self.puuid, self.page_size, self.offset)
            .await?;

        if batch.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }
        self.offset += self.page_size;

        Ok(Some(batch))
    }
}

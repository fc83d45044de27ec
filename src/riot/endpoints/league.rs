use crate::riot::catalog::Family;
use crate::riot::client::RiotClient;
use crate::riot::outcome::ApiOutcome;
use crate::riot::region::Platform;
use crate::riot::types::{LeagueEntryDto, LeagueListDto};

const BY_PUUID_LIMIT: &str = "by-puuid";
const APEX_LIMIT: &str = "challenger";
const LEAGUE_LIMIT: &str = "league";
const BY_QUEUE_LIMIT: &str = "by-queue";

impl RiotClient {
    /// Get league entries (ranked info) for a player by PUUID
    /// Uses platform routing (euw1, na1, kr, etc.)
    pub async fn get_league_entries_by_puuid(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> ApiOutcome<Vec<LeagueEntryDto>> {
        let request = self
            .get(
                platform,
                Family::LeagueV4,
                "by-puuid",
                &[("encryptedPUUID", puuid)],
            )
            .map(|r| r.limit_type(BY_PUUID_LIMIT));

        self.fetch(request).await
    }

    pub async fn get_challenger_league(
        &self,
        platform: Platform,
        queue: &str,
    ) -> ApiOutcome<LeagueListDto> {
        self.get_apex_league(platform, "challenger", queue).await
    }

    pub async fn get_grandmaster_league(
        &self,
        platform: Platform,
        queue: &str,
    ) -> ApiOutcome<LeagueListDto> {
        self.get_apex_league(platform, "grandmaster", queue).await
    }

    pub async fn get_master_league(
        &self,
        platform: Platform,
        queue: &str,
    ) -> ApiOutcome<LeagueListDto> {
        self.get_apex_league(platform, "master", queue).await
    }

    /// The three apex tiers share the `challenger` quota.
    async fn get_apex_league(
        &self,
        platform: Platform,
        endpoint: &str,
        queue: &str,
    ) -> ApiOutcome<LeagueListDto> {
        let request = self
            .get(platform, Family::LeagueV4, endpoint, &[("queue", queue)])
            .map(|r| r.limit_type(APEX_LIMIT));

        self.fetch(request).await
    }

    pub async fn get_league_by_id(
        &self,
        platform: Platform,
        league_id: &str,
    ) -> ApiOutcome<LeagueListDto> {
        let request = self
            .get(
                platform,
                Family::LeagueV4,
                "by-league",
                &[("leagueId", league_id)],
            )
            .map(|r| r.limit_type(LEAGUE_LIMIT));

        self.fetch(request).await
    }

    /// One page (starting at 1) of the entries of a tier and division, e.g. `GOLD` `II`.
    pub async fn get_league_entries_by_rank(
        &self,
        platform: Platform,
        queue: &str,
        tier: &str,
        division: &str,
        page: u32,
    ) -> ApiOutcome<Vec<LeagueEntryDto>> {
        let request = self
            .get(
                platform,
                Family::LeagueV4,
                "by-queue",
                &[("queue", queue), ("tier", tier), ("division", division)],
            )
            .map(|r| r.limit_type(BY_QUEUE_LIMIT).query("page", page.max(1)));

        self.fetch(request).await
    }

    /// Same as [`RiotClient::get_league_entries_by_rank`], but also covers the apex tiers.
    pub async fn get_league_exp_entries(
        &self,
        platform: Platform,
        queue: &str,
        tier: &str,
        division: &str,
        page: u32,
    ) -> ApiOutcome<Vec<LeagueEntryDto>> {
        let request = self
            .get(
                platform,
                Family::LeagueExpV4,
                "entries",
                &[("queue", queue), ("tier", tier), ("division", division)],
            )
            .map(|r| r.query("page", page.max(1)));

        self.fetch(request).await
    }
}

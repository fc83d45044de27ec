use crate::riot::catalog::Family;
use crate::riot::client::RiotClient;
use crate::riot::outcome::ApiOutcome;
use crate::riot::region::Platform;
use crate::riot::types::ChampionMasteryDto;

impl RiotClient {
    /// All champion masteries of a player, highest points first
    pub async fn get_champion_masteries(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> ApiOutcome<Vec<ChampionMasteryDto>> {
        let request = self.get(
            platform,
            Family::ChampionMasteryV4,
            "by-puuid",
            &[("encryptedPUUID", puuid)],
        );

        self.fetch(request).await
    }

    pub async fn get_champion_mastery(
        &self,
        platform: Platform,
        puuid: &str,
        champion_id: i64,
    ) -> ApiOutcome<ChampionMasteryDto> {
        let champion_id = champion_id.to_string();
        let request = self.get(
            platform,
            Family::ChampionMasteryV4,
            "by-champion",
            &[("encryptedPUUID", puuid), ("championId", champion_id.as_str())],
        );

        self.fetch(request).await
    }

    pub async fn get_top_champion_masteries(
        &self,
        platform: Platform,
        puuid: &str,
        count: u32,
    ) -> ApiOutcome<Vec<ChampionMasteryDto>> {
        let request = self
            .get(
                platform,
                Family::ChampionMasteryV4,
                "top",
                &[("encryptedPUUID", puuid)],
            )
            .map(|r| r.query("count", count));

        self.fetch(request).await
    }

    /// Sum of the mastery levels of every champion
    pub async fn get_mastery_score(&self, platform: Platform, puuid: &str) -> ApiOutcome<i64> {
        let request = self.get(
            platform,
            Family::ChampionMasteryV4,
            "scores",
            &[("encryptedPUUID", puuid)],
        );

        self.fetch(request).await
    }
}

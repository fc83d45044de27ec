use crate::riot::catalog::Family;
use crate::riot::client::RiotClient;
use crate::riot::outcome::ApiOutcome;
use crate::riot::region::Platform;
use crate::riot::types::SummonerDto;

impl RiotClient {
    /// Get summoner info by PUUID
    /// Uses platform routing (euw1, na1, kr, etc.)
    pub async fn get_summoner_by_puuid(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> ApiOutcome<SummonerDto> {
        let request = self.get(
            platform,
            Family::SummonerV4,
            "by-puuid",
            &[("encryptedPUUID", puuid)],
        );

        self.fetch(request).await
    }
}

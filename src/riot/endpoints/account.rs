use crate::riot::catalog::Family;
use crate::riot::client::RiotClient;
use crate::riot::outcome::ApiOutcome;
use crate::riot::region::Region;
use crate::riot::types::AccountDto;

impl RiotClient {
    /// Get account by Riot ID (game name + tag line)
    /// Uses regional routing (americas, europe, asia). SEA accounts live on asia.
    pub async fn get_account_by_riot_id(
        &self,
        region: Region,
        game_name: &str,
        tag_line: &str,
    ) -> ApiOutcome<AccountDto> {
        let request = self.get(
            region.account_region(),
            Family::AccountV1,
            "by-riot-id",
            &[("gameName", game_name), ("tagLine", tag_line)],
        );

        self.fetch(request).await
    }

    pub async fn get_account_by_puuid(&self, region: Region, puuid: &str) -> ApiOutcome<AccountDto> {
        let request = self.get(
            region.account_region(),
            Family::AccountV1,
            "by-puuid",
            &[("puuid", puuid)],
        );

        self.fetch(request).await
    }
}

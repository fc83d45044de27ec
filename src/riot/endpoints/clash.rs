use crate::riot::catalog::Family;
use crate::riot::client::RiotClient;
use crate::riot::outcome::ApiOutcome;
use crate::riot::region::Platform;
use crate::riot::types::ClashPlayerDto;

const PLAYER_LIMIT: &str = "player";

impl RiotClient {
    /// Active Clash registrations of a player
    pub async fn get_clash_players(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> ApiOutcome<Vec<ClashPlayerDto>> {
        let request = self
            .get(platform, Family::ClashV1, "by-puuid", &[("puuid", puuid)])
            .map(|r| r.limit_type(PLAYER_LIMIT));

        self.fetch(request).await
    }
}

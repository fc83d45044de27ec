use serde_json::Value;

use crate::riot::catalog::Family;
use crate::riot::client::RiotClient;
use crate::riot::outcome::ApiOutcome;
use crate::riot::region::Platform;
use crate::riot::types::CurrentGameInfoDto;

impl RiotClient {
    /// Game the player is currently in. `NotFound` when they are not playing.
    pub async fn get_active_game(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> ApiOutcome<CurrentGameInfoDto> {
        let request = self.get(
            platform,
            Family::SpectatorV5,
            "active",
            &[("encryptedPUUID", puuid)],
        );

        self.fetch(request).await
    }

    pub async fn get_featured_games(&self, platform: Platform) -> ApiOutcome<Value> {
        let request = self.get(platform, Family::SpectatorV5, "featured", &[]);

        self.fetch(request).await
    }
}

use serde_json::Value;

use crate::riot::catalog::Family;
use crate::riot::client::RiotClient;
use crate::riot::outcome::ApiOutcome;
use crate::riot::region::Platform;
use crate::riot::types::ChampionInfoDto;

const ROTATION_LIMIT: &str = "short";

impl RiotClient {
    /// Free champion rotation of the week
    pub async fn get_champion_rotations(&self, platform: Platform) -> ApiOutcome<ChampionInfoDto> {
        let request = self
            .get(platform, Family::ChampionV3, "champion-rotations", &[])
            .map(|r| r.limit_type(ROTATION_LIMIT));

        self.fetch(request).await
    }

    /// Maintenances and incidents on a platform
    pub async fn get_platform_status(&self, platform: Platform) -> ApiOutcome<Value> {
        let request = self.get(platform, Family::LolStatusV4, "platform-data", &[]);

        self.fetch(request).await
    }
}

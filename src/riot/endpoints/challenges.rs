use serde_json::Value;

use crate::riot::catalog::Family;
use crate::riot::client::RiotClient;
use crate::riot::outcome::ApiOutcome;
use crate::riot::region::Platform;

impl RiotClient {
    pub async fn get_challenges_player_data(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> ApiOutcome<Value> {
        let request = self.get(
            platform,
            Family::ChallengesV1,
            "player-data",
            &[("puuid", puuid)],
        );

        self.fetch(request).await
    }

    pub async fn get_challenges_config(&self, platform: Platform) -> ApiOutcome<Value> {
        let request = self.get(platform, Family::ChallengesV1, "config", &[]);

        self.fetch(request).await
    }

    /// Percentile of players at each level of every challenge
    pub async fn get_challenges_percentiles(&self, platform: Platform) -> ApiOutcome<Value> {
        let request = self.get(platform, Family::ChallengesV1, "percentiles", &[]);

        self.fetch(request).await
    }
}

use std::num::NonZeroU32;
use std::time::Duration;

use httpmock::MockServer;
use riftscout::{Config, RiotClient};
use serde_json::{Value, json};

pub const KEY: &str = "RGAPI-test-key";

/// Fast retries and a generous app quota, every request sent to `server`.
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::new(KEY);
    config.base_url = Some(server.base_url());
    config.backoff_unit = Duration::from_millis(1);
    config.request_timeout = Duration::from_secs(2);
    config.app_requests_per_minute = NonZeroU32::new(60_000).unwrap();
    config.app_burst = NonZeroU32::new(1_000).unwrap();
    config
}

pub fn client_for(server: &MockServer) -> RiotClient {
    RiotClient::new(&config_for(server)).unwrap()
}

pub fn match_json(match_id: &str, game_creation: i64) -> Value {
    json!({
        "metadata": { "matchId": match_id, "participants": ["puuid-1"] },
        "info": {
            "gameCreation": game_creation,
            "gameDuration": 1800,
            "gameVersion": "14.24.632.8043",
            "queueId": 420,
            "participants": []
        }
    })
}

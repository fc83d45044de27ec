use riftscout::config::{default_credential_sources, resolve_credential};
use riftscout::riot::{MatchIdsQuery, Platform, Region};
use riftscout::{Config, RiotClient};

fn live_client() -> RiotClient {
    dotenvy::dotenv().ok();
    let key = resolve_credential(&default_credential_sources(None)).expect("RIOT_API_KEY not set");
    RiotClient::new(&Config::new(key)).unwrap()
}

#[tokio::test]
#[ignore = "API Key required"]
async fn resolve_by_riot_id_returns_expected_account() {
    let client = live_client();

    let profile = client
        .resolve_by_riot_id("Le Conservateur", "3012", Platform::EUW1)
        .await
        .unwrap();

    assert_eq!(
        profile.puuid(),
        "jG0VKFsMuF2aWaQoiDxJ1brhlXyMY7kj4HfIAucciWH_9YVdWVpbQDIRhJWQQGhP89qCrp5EwLxl3Q"
    );
    for entry in &profile.league_entries {
        assert!(!entry.queue_type.is_empty());
    }
}

#[tokio::test]
#[ignore = "API Key required"]
async fn fetch_match_batch_returns_full_matches() {
    let client = live_client();
    let puuid = "jG0VKFsMuF2aWaQoiDxJ1brhlXyMY7kj4HfIAucciWH_9YVdWVpbQDIRhJWQQGhP89qCrp5EwLxl3Q";

    let ids = client
        .get_match_ids(Region::Europe, puuid, &MatchIdsQuery::page(0, 3))
        .await
        .ok()
        .expect("should return match ids");
    let matches = client
        .fetch_match_batch(Region::Europe, puuid, 3, 0)
        .await
        .unwrap();

    assert!(matches.len() <= ids.len());
    for window in matches.windows(2) {
        assert!(window[0].info.game_creation >= window[1].info.game_creation);
    }
}

#[tokio::test]
#[ignore = "API Key required"]
async fn platform_status_does_not_error() {
    let client = live_client();

    let status = client.get_platform_status(Platform::EUW1).await;

    assert!(status.is_success());
}

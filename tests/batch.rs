mod common;

use common::{client_for, config_for, match_json};
use httpmock::prelude::*;
use riftscout::RiotClient;
use riftscout::riot::{LookupStep, MatchPager, Platform, Region, RiotApiError, StepFailure};
use serde_json::json;

const ACCOUNT_PATH: &str = "/riot/account/v1/accounts/by-riot-id/Chalop/3012";
const SUMMONER_PATH: &str = "/lol/summoner/v4/summoners/by-puuid/puuid-1";
const LEAGUE_PATH: &str = "/lol/league/v4/entries/by-puuid/puuid-1";
const IDS_PATH: &str = "/lol/match/v5/matches/by-puuid/puuid-1/ids";

async fn mock_account(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path(ACCOUNT_PATH);
            then.status(200)
                .json_body(json!({"puuid": "puuid-1", "gameName": "Chalop", "tagLine": "3012"}));
        })
        .await;
}

#[tokio::test]
async fn resolves_a_ranked_player() {
    let server = MockServer::start_async().await;
    mock_account(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(SUMMONER_PATH);
            then.status(200)
                .json_body(json!({"puuid": "puuid-1", "profileIconId": 29, "summonerLevel": 412}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(LEAGUE_PATH);
            then.status(200).json_body(json!([{
                "queueType": "RANKED_SOLO_5x5",
                "tier": "EMERALD",
                "rank": "II",
                "leaguePoints": 54,
                "wins": 80,
                "losses": 70
            }]));
        })
        .await;

    let client = client_for(&server);
    let profile = client
        .resolve_by_riot_id("Chalop", "3012", Platform::EUW1)
        .await
        .unwrap();

    assert_eq!(profile.puuid(), "puuid-1");
    assert_eq!(profile.summoner.summoner_level, 412);
    assert_eq!(profile.solo_queue().unwrap().tier, "EMERALD");
    assert!(profile.flex_queue().is_none());
}

#[tokio::test]
async fn missing_league_entries_mean_unranked() {
    let server = MockServer::start_async().await;
    mock_account(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(SUMMONER_PATH);
            then.status(200)
                .json_body(json!({"puuid": "puuid-1", "profileIconId": 1, "summonerLevel": 3}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(LEAGUE_PATH);
            then.status(404);
        })
        .await;

    let client = client_for(&server);
    let profile = client
        .resolve_by_riot_id("Chalop", "3012", Platform::EUW1)
        .await
        .unwrap();

    assert!(profile.league_entries.is_empty());
}

#[tokio::test]
async fn lookup_stops_at_the_first_missing_step() {
    let server = MockServer::start_async().await;
    mock_account(&server).await;
    let summoner = server
        .mock_async(|when, then| {
            when.method(GET).path(SUMMONER_PATH);
            then.status(404);
        })
        .await;
    let league = server
        .mock_async(|when, then| {
            when.method(GET).path(LEAGUE_PATH);
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = client_for(&server);
    let err = client
        .resolve_by_riot_id("Chalop", "3012", Platform::EUW1)
        .await
        .unwrap_err();

    assert_eq!(err.step, LookupStep::Summoner);
    assert_eq!(err.reason, StepFailure::NotFound);
    summoner.assert_hits_async(1).await;
    league.assert_hits_async(0).await;
}

#[tokio::test]
async fn account_failure_is_reported_with_its_cause() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(ACCOUNT_PATH);
            then.status(403);
        })
        .await;

    let client = client_for(&server);
    let err = client
        .resolve_by_riot_id("Chalop", "3012", Platform::SG2)
        .await
        .unwrap_err();

    assert_eq!(err.step, LookupStep::Account);
    assert_eq!(err.reason, StepFailure::Failed(RiotApiError::InvalidCredential));
}

#[tokio::test]
async fn batch_drops_failed_matches_and_sorts_newest_first() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(IDS_PATH)
                .query_param("start", "0")
                .query_param("count", "5");
            then.status(200)
                .json_body(json!(["EUW1_1", "EUW1_2", "EUW1_3", "EUW1_4", "EUW1_5"]));
        })
        .await;
    for (id, creation) in [("EUW1_1", 100), ("EUW1_2", 500), ("EUW1_4", 300), ("EUW1_5", 200)] {
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/lol/match/v5/matches/{id}"));
                then.status(200).json_body(match_json(id, creation));
            })
            .await;
    }
    let broken = server
        .mock_async(|when, then| {
            when.method(GET).path("/lol/match/v5/matches/EUW1_3");
            then.status(500);
        })
        .await;

    let mut config = config_for(&server);
    config.retry_count = 1;
    config.max_workers = 2;
    let client = RiotClient::new(&config).unwrap();

    let matches = client
        .fetch_match_batch(Region::Europe, "puuid-1", 5, 0)
        .await
        .unwrap();

    let ids: Vec<&str> = matches.iter().map(|m| m.match_id()).collect();
    assert_eq!(ids, vec!["EUW1_2", "EUW1_4", "EUW1_5", "EUW1_1"]);
    broken.assert_hits_async(2).await;
}

#[tokio::test]
async fn failing_id_listing_fails_the_batch() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(IDS_PATH);
            then.status(403);
        })
        .await;

    let client = client_for(&server);
    let err = client
        .fetch_match_batch(Region::Europe, "puuid-1", 5, 0)
        .await
        .unwrap_err();

    assert_eq!(err, RiotApiError::InvalidCredential);
}

#[tokio::test]
async fn unknown_player_has_no_matches() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(IDS_PATH);
            then.status(404);
        })
        .await;

    let client = client_for(&server);
    let matches = client
        .fetch_match_batch(Region::Europe, "puuid-1", 5, 0)
        .await
        .unwrap();

    assert!(matches.is_empty());
}

#[tokio::test]
async fn pager_stops_on_an_empty_batch() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET).path(IDS_PATH).query_param("start", "0");
            then.status(200).json_body(json!(["EUW1_1", "EUW1_2"]));
        })
        .await;
    let last = server
        .mock_async(|when, then| {
            when.method(GET).path(IDS_PATH).query_param("start", "2");
            then.status(200).json_body(json!([]));
        })
        .await;
    for (id, creation) in [("EUW1_1", 2), ("EUW1_2", 1)] {
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/lol/match/v5/matches/{id}"));
                then.status(200).json_body(match_json(id, creation));
            })
            .await;
    }

    let client = client_for(&server);
    let mut pager = MatchPager::new(&client, Region::Europe, "puuid-1", 2);

    let page = pager.next_page().await.unwrap().unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(pager.offset(), 2);

    assert!(pager.next_page().await.unwrap().is_none());
    assert!(pager.is_exhausted());
    assert!(pager.next_page().await.unwrap().is_none());

    first.assert_hits_async(1).await;
    last.assert_hits_async(1).await;
}

#[tokio::test]
async fn oversized_batches_ask_for_one_full_page() {
    let server = MockServer::start_async().await;
    let listing = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(IDS_PATH)
                .query_param("start", "0")
                .query_param("count", "100");
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = client_for(&server);
    let matches = client
        .fetch_match_batch(Region::Europe, "puuid-1", 150, 0)
        .await
        .unwrap();

    assert!(matches.is_empty());
    listing.assert_hits_async(1).await;
}

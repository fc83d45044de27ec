use std::env;

use clap::Parser;
use riftscout::{
    AppError, Config, RiotClient,
    config::{DEBUG_VAR, default_credential_sources, is_enabled, resolve_credential},
    logging,
    riot::{ApiOutcome, OutcomeKind, Platform, PlayerProfile, types::MatchDto},
};
use tracing::info;

/// Look up a League of Legends player and their recent matches.
#[derive(Debug, Parser)]
#[command(name = "riftscout", version)]
struct Cli {
    /// Riot ID game name, e.g. `Chalop`
    game_name: String,

    /// Riot ID tag line, without the `#`
    tag_line: String,

    /// Platform id or alias (euw1, EUW, na1, NA, kr...)
    #[arg(short, long, default_value = "euw1")]
    platform: Platform,

    /// Amount of matches to show (at most 100)
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=100))]
    count: u32,

    /// Matches to skip, for paging back in history
    #[arg(short, long, default_value_t = 0)]
    offset: u32,

    /// Riot API key, overrides RIOT_API_KEY and .env files
    #[arg(long)]
    api_key: Option<String>,

    /// Log request details
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let debug = cli.debug || env::var(DEBUG_VAR).is_ok_and(|v| is_enabled(&v));
    logging::init(debug)?;
    info!("🐙 Starting...");

    let key = resolve_credential(&default_credential_sources(cli.api_key.clone()))?;
    let mut config = Config::from_lookup(key, |name| env::var(name).ok())?;
    config.debug = debug;

    let client = RiotClient::new(&config)?;
    let metrics_task = client.start_metrics_logging();

    let profile = client
        .resolve_by_riot_id(&cli.game_name, &cli.tag_line, cli.platform)
        .await?;
    print_profile(&profile);

    let matches = client
        .fetch_match_batch(
            cli.platform.to_region(),
            profile.puuid(),
            cli.count,
            cli.offset,
        )
        .await?;
    print_matches(&profile, &matches);

    match client.get_active_game(cli.platform, profile.puuid()).await {
        ApiOutcome::Success(game) => println!(
            "\nIn game right now: {} ({} min)",
            game.game_mode,
            game.game_length / 60
        ),
        outcome if outcome.kind() == OutcomeKind::NothingFound => {}
        outcome => {
            if let Some(err) = outcome.error() {
                info!(error = %err, "could not check the active game");
            }
        }
    }

    let snapshot = client.metrics().snapshot();
    info!(
        attempts = snapshot.attempts,
        retries = snapshot.retries,
        throttled = snapshot.throttled,
        "📊 done"
    );
    metrics_task.abort();

    Ok(())
}

fn print_profile(profile: &PlayerProfile) {
    println!(
        "{} ({}) level {}",
        profile.account.riot_id(),
        profile.platform.display_name(),
        profile.summoner.summoner_level
    );

    if profile.league_entries.is_empty() {
        println!("  Unranked");
    }
    for entry in [profile.solo_queue(), profile.flex_queue()].into_iter().flatten() {
        let queue = if entry.is_solo_queue() { "Solo/Duo" } else { "Flex" };
        println!(
            "  {queue}: {} {} {} LP ({}W {}L, {:.1}%)",
            entry.tier,
            entry.rank,
            entry.league_points,
            entry.wins,
            entry.losses,
            entry.win_rate()
        );
    }
}

fn print_matches(profile: &PlayerProfile, matches: &[MatchDto]) {
    if matches.is_empty() {
        println!("\nNo matches found.");
        return;
    }

    println!("\nRecent matches:");
    for match_data in matches {
        let info = &match_data.info;
        match match_data.participant_info_of(profile.puuid()) {
            Some(p) => println!(
                "  {} {:<16} {:<12} {}/{}/{} ({:.2} KDA, {} CS) {} patch {}",
                if p.win { "W" } else { "L" },
                info.queue_name(),
                p.champion_name,
                p.kills,
                p.deaths,
                p.assists,
                p.kda_ratio(),
                p.cs_total(),
                info.duration_formatted(),
                info.patch_version()
            ),
            None => println!("  {} {}", match_data.match_id(), info.queue_name()),
        }
    }
}

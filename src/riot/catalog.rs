//! Static registry of the Riot API endpoints and of the quotas attached to them.
//!
//! Endpoints are grouped by API family. Each family owns one rate-limit
//! namespace, split into one or more limit types (`default`, `by-queue`...).

use std::{fmt, time::Duration};

use thiserror::Error;

/// Limit type used when an endpoint has no dedicated quota.
pub const DEFAULT_LIMIT: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Invalid platform or region: {0}")]
    InvalidLocation(String),

    #[error("Unknown endpoint {endpoint} in {family}")]
    UnknownEndpoint { family: Family, endpoint: String },

    #[error("Missing required URL parameter: {0}")]
    MissingParameter(String),

    #[error("Unknown limit type {limit_type} for {family}")]
    UnknownLimitType { family: Family, limit_type: String },
}

/// A group of related endpoints sharing one rate-limit namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    AccountV1,
    ChampionV3,
    ChampionMasteryV4,
    ClashV1,
    LeagueV4,
    LeagueExpV4,
    LolStatusV4,
    MatchV5,
    SpectatorV5,
    SummonerV4,
    ChallengesV1,
    TournamentStubV5,
}

impl Family {
    pub const ALL: [Family; 12] = [
        Self::AccountV1,
        Self::ChampionV3,
        Self::ChampionMasteryV4,
        Self::ClashV1,
        Self::LeagueV4,
        Self::LeagueExpV4,
        Self::LolStatusV4,
        Self::MatchV5,
        Self::SpectatorV5,
        Self::SummonerV4,
        Self::ChallengesV1,
        Self::TournamentStubV5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccountV1 => "account-v1",
            Self::ChampionV3 => "champion-v3",
            Self::ChampionMasteryV4 => "champion-mastery-v4",
            Self::ClashV1 => "clash-v1",
            Self::LeagueV4 => "league-v4",
            Self::LeagueExpV4 => "league-exp-v4",
            Self::LolStatusV4 => "lol-status-v4",
            Self::MatchV5 => "match-v5",
            Self::SpectatorV5 => "spectator-v5",
            Self::SummonerV4 => "summoner-v4",
            Self::ChallengesV1 => "challenges-v1",
            Self::TournamentStubV5 => "tournament-stub-v5",
        }
    }

    /// Endpoint name to path template table of this family.
    pub fn endpoints(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::AccountV1 => ACCOUNT_V1,
            Self::ChampionV3 => CHAMPION_V3,
            Self::ChampionMasteryV4 => CHAMPION_MASTERY_V4,
            Self::ClashV1 => CLASH_V1,
            Self::LeagueV4 => LEAGUE_V4,
            Self::LeagueExpV4 => LEAGUE_EXP_V4,
            Self::LolStatusV4 => LOL_STATUS_V4,
            Self::MatchV5 => MATCH_V5,
            Self::SpectatorV5 => SPECTATOR_V5,
            Self::SummonerV4 => SUMMONER_V4,
            Self::ChallengesV1 => CHALLENGES_V1,
            Self::TournamentStubV5 => TOURNAMENT_STUB_V5,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Endpoint templates
// ============================================================================

const ACCOUNT_V1: &[(&str, &str)] = &[
    ("by-puuid", "/riot/account/v1/accounts/by-puuid/{puuid}"),
    (
        "by-riot-id",
        "/riot/account/v1/accounts/by-riot-id/{gameName}/{tagLine}",
    ),
];

const CHAMPION_V3: &[(&str, &str)] = &[("champion-rotations", "/lol/platform/v3/champion-rotations")];

const CHAMPION_MASTERY_V4: &[(&str, &str)] = &[
    (
        "by-puuid",
        "/lol/champion-mastery/v4/champion-masteries/by-puuid/{encryptedPUUID}",
    ),
    (
        "by-champion",
        "/lol/champion-mastery/v4/champion-masteries/by-puuid/{encryptedPUUID}/by-champion/{championId}",
    ),
    (
        "scores",
        "/lol/champion-mastery/v4/scores/by-puuid/{encryptedPUUID}",
    ),
    (
        "top",
        "/lol/champion-mastery/v4/champion-masteries/by-puuid/{encryptedPUUID}/top",
    ),
];

const CLASH_V1: &[(&str, &str)] = &[
    ("by-team", "/lol/clash/v1/teams/{teamId}"),
    ("tournament", "/lol/clash/v1/tournaments/{tournamentId}"),
    ("tournament-team", "/lol/clash/v1/tournaments/by-team/{teamId}"),
    ("tournaments", "/lol/clash/v1/tournaments"),
    ("by-puuid", "/lol/clash/v1/players/by-puuid/{puuid}"),
];

const LEAGUE_V4: &[(&str, &str)] = &[
    (
        "challenger",
        "/lol/league/v4/challengerleagues/by-queue/{queue}",
    ),
    ("by-league", "/lol/league/v4/leagues/{leagueId}"),
    ("master", "/lol/league/v4/masterleagues/by-queue/{queue}"),
    (
        "grandmaster",
        "/lol/league/v4/grandmasterleagues/by-queue/{queue}",
    ),
    (
        "by-summoner",
        "/lol/league/v4/entries/by-summoner/{encryptedSummonerId}",
    ),
    ("by-queue", "/lol/league/v4/entries/{queue}/{tier}/{division}"),
    ("by-puuid", "/lol/league/v4/entries/by-puuid/{encryptedPUUID}"),
];

const LEAGUE_EXP_V4: &[(&str, &str)] = &[(
    "entries",
    "/lol/league-exp/v4/entries/{queue}/{tier}/{division}",
)];

const LOL_STATUS_V4: &[(&str, &str)] = &[("platform-data", "/lol/status/v4/platform-data")];

const MATCH_V5: &[(&str, &str)] = &[
    ("by-match", "/lol/match/v5/matches/{matchId}"),
    ("by-puuid", "/lol/match/v5/matches/by-puuid/{puuid}/ids"),
    ("timeline", "/lol/match/v5/matches/{matchId}/timeline"),
];

const SPECTATOR_V5: &[(&str, &str)] = &[
    ("featured", "/lol/spectator/v5/featured-games"),
    (
        "active",
        "/lol/spectator/v5/active-games/by-summoner/{encryptedPUUID}",
    ),
];

const SUMMONER_V4: &[(&str, &str)] = &[
    (
        "by-account",
        "/lol/summoner/v4/summoners/by-account/{encryptedAccountId}",
    ),
    (
        "by-summoner",
        "/lol/summoner/v4/summoners/{encryptedSummonerId}",
    ),
    ("by-puuid", "/lol/summoner/v4/summoners/by-puuid/{encryptedPUUID}"),
];

const CHALLENGES_V1: &[(&str, &str)] = &[
    ("percentiles", "/lol/challenges/v1/challenges/percentiles"),
    (
        "leaderboards",
        "/lol/challenges/v1/challenges/{challengeId}/leaderboards/by-level/{level}",
    ),
    (
        "challenge-percentiles",
        "/lol/challenges/v1/challenges/{challengeId}/percentiles",
    ),
    (
        "challenge-config",
        "/lol/challenges/v1/challenges/{challengeId}/config",
    ),
    ("player-data", "/lol/challenges/v1/player-data/{puuid}"),
    ("config", "/lol/challenges/v1/challenges/config"),
];

const TOURNAMENT_STUB_V5: &[(&str, &str)] = &[
    ("codes", "/lol/tournament-stub/v5/codes"),
    (
        "lobby-events",
        "/lol/tournament-stub/v5/lobby-events/by-code/{tournamentCode}",
    ),
    (
        "tournament-codes",
        "/lol/tournament-stub/v5/codes/{tournamentCode}",
    ),
    ("providers", "/lol/tournament-stub/v5/providers"),
    ("tournaments", "/lol/tournament-stub/v5/tournaments"),
];

// ============================================================================
// Quotas
// ============================================================================

/// Maximum amount of requests allowed for a family/limit type within a rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    pub family: Family,
    pub limit_type: &'static str,
    pub max_requests: u32,
    pub window_secs: u64,
}

impl RateLimitRule {
    const fn new(
        family: Family,
        limit_type: &'static str,
        max_requests: u32,
        window_secs: u64,
    ) -> Self {
        Self {
            family,
            limit_type,
            max_requests,
            window_secs,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// Method rate limits as documented by Riot. Must not drift from the upstream values.
pub const RATE_LIMITS: &[RateLimitRule] = &[
    RateLimitRule::new(Family::AccountV1, "default", 1000, 60),
    RateLimitRule::new(Family::AccountV1, "extended", 20000, 10),
    RateLimitRule::new(Family::ChampionV3, "short", 30, 10),
    RateLimitRule::new(Family::ChampionV3, "long", 500, 600),
    RateLimitRule::new(Family::ChampionMasteryV4, "default", 20000, 10),
    RateLimitRule::new(Family::ChampionMasteryV4, "extended", 1200000, 600),
    RateLimitRule::new(Family::ClashV1, "team", 200, 60),
    RateLimitRule::new(Family::ClashV1, "tournament", 10, 60),
    RateLimitRule::new(Family::ClashV1, "player", 20000, 10),
    RateLimitRule::new(Family::LeagueV4, "challenger", 30, 10),
    RateLimitRule::new(Family::LeagueV4, "league", 500, 10),
    RateLimitRule::new(Family::LeagueV4, "entries", 100, 60),
    RateLimitRule::new(Family::LeagueV4, "by-queue", 50, 10),
    RateLimitRule::new(Family::LeagueV4, "by-puuid", 20000, 10),
    RateLimitRule::new(Family::LeagueExpV4, "default", 50, 10),
    RateLimitRule::new(Family::LolStatusV4, "default", 20000, 10),
    RateLimitRule::new(Family::LolStatusV4, "extended", 1200000, 600),
    RateLimitRule::new(Family::MatchV5, "default", 2000, 10),
    RateLimitRule::new(Family::SpectatorV5, "default", 20000, 10),
    RateLimitRule::new(Family::SpectatorV5, "extended", 1200000, 600),
    RateLimitRule::new(Family::SummonerV4, "default", 1600, 60),
    RateLimitRule::new(Family::ChallengesV1, "default", 20000, 10),
    RateLimitRule::new(Family::ChallengesV1, "extended", 1200000, 600),
    RateLimitRule::new(Family::TournamentStubV5, "default", 20000, 10),
    RateLimitRule::new(Family::TournamentStubV5, "extended", 1200000, 600),
];

pub fn rate_limit_rule(
    family: Family,
    limit_type: &str,
) -> Result<&'static RateLimitRule, CatalogError> {
    RATE_LIMITS
        .iter()
        .find(|rule| rule.family == family && rule.limit_type == limit_type)
        .ok_or_else(|| CatalogError::UnknownLimitType {
            family,
            limit_type: limit_type.to_string(),
        })
}

// ============================================================================
// URL building
// ============================================================================

pub fn endpoint_template(family: Family, endpoint: &str) -> Result<&'static str, CatalogError> {
    family
        .endpoints()
        .iter()
        .find(|(name, _)| *name == endpoint)
        .map(|(_, template)| *template)
        .ok_or_else(|| CatalogError::UnknownEndpoint {
            family,
            endpoint: endpoint.to_string(),
        })
}

/// Build the path of `endpoint` by substituting every `{placeholder}` of its template.
///
/// Values are percent-encoded. Parameters not used by the template are ignored.
pub fn build_path(
    family: Family,
    endpoint: &str,
    params: &[(&str, &str)],
) -> Result<String, CatalogError> {
    let template = endpoint_template(family, endpoint)?;

    let mut path = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        path.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| CatalogError::MissingParameter(after.to_string()))?;
        let name = &after[..close];

        let value = params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| CatalogError::MissingParameter(name.to_string()))?;
        path.push_str(&urlencoding::encode(value));

        rest = &after[close + 1..];
    }
    path.push_str(rest);

    Ok(path)
}

// ============================================================================
// Locales
// ============================================================================

pub const LOCALES: &[(&str, &str)] = &[
    ("cs_CZ", "Czech (Czech Republic)"),
    ("el_GR", "Greek (Greece)"),
    ("pl_PL", "Polish (Poland)"),
    ("ro_RO", "Romanian (Romania)"),
    ("hu_HU", "Hungarian (Hungary)"),
    ("en_GB", "English (United Kingdom)"),
    ("de_DE", "German (Germany)"),
    ("es_ES", "Spanish (Spain)"),
    ("it_IT", "Italian (Italy)"),
    ("fr_FR", "French (France)"),
    ("ja_JP", "Japanese (Japan)"),
    ("ko_KR", "Korean (Korea)"),
    ("es_MX", "Spanish (Mexico)"),
    ("es_AR", "Spanish (Argentina)"),
    ("pt_BR", "Portuguese (Brazil)"),
    ("en_US", "English (United States)"),
    ("en_AU", "English (Australia)"),
    ("ru_RU", "Russian (Russia)"),
    ("tr_TR", "Turkish (Turkey)"),
    ("ms_MY", "Malay (Malaysia)"),
    ("en_PH", "English (Republic of the Philippines)"),
    ("en_SG", "English (Singapore)"),
    ("th_TH", "Thai (Thailand)"),
    ("vi_VN", "Vietnamese (Viet Nam)"),
    ("id_ID", "Indonesian (Indonesia)"),
    ("zh_MY", "Chinese (Malaysia)"),
    ("zh_CN", "Chinese (China)"),
    ("zh_TW", "Chinese (Taiwan)"),
];

pub fn is_valid_locale(locale: &str) -> bool {
    LOCALES.iter().any(|(tag, _)| *tag == locale)
}

pub fn locale_name(locale: &str) -> Option<&'static str> {
    LOCALES
        .iter()
        .find(|(tag, _)| *tag == locale)
        .map(|(_, name)| *name)
}

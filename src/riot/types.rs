use serde::{Deserialize, Serialize};

// ============================================================================
// Account-v1
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

impl AccountDto {
    pub fn riot_id(&self) -> String {
        format!(
            "{}#{}",
            self.game_name.as_deref().unwrap_or("?"),
            self.tag_line.as_deref().unwrap_or("?")
        )
    }
}

// ============================================================================
// Summoner-v4
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    pub puuid: String,
    pub profile_icon_id: i32,
    pub summoner_level: i64,
    #[serde(default)]
    pub revision_date: i64,
}

// ============================================================================
// League-v4
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    #[serde(default)]
    pub league_id: Option<String>,
    #[serde(default)]
    pub puuid: Option<String>,
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: i32,
    #[serde(default)]
    pub wins: i32,
    #[serde(default)]
    pub losses: i32,
    #[serde(default)]
    pub hot_streak: bool,
    #[serde(default)]
    pub veteran: bool,
    #[serde(default)]
    pub fresh_blood: bool,
    #[serde(default)]
    pub inactive: bool,
}

impl LeagueEntryDto {
    pub fn is_solo_queue(&self) -> bool {
        self.queue_type == "RANKED_SOLO_5x5"
    }

    pub fn is_flex_queue(&self) -> bool {
        self.queue_type == "RANKED_FLEX_SR"
    }

    pub fn win_rate(&self) -> f64 {
        let games = self.wins + self.losses;
        if games == 0 {
            0.0
        } else {
            self.wins as f64 * 100.0 / games as f64
        }
    }
}

/// Apex tier ladders (challenger, grandmaster, master) and leagues by id.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueListDto {
    #[serde(default)]
    pub league_id: Option<String>,
    pub tier: String,
    #[serde(default)]
    pub name: Option<String>,
    pub queue: String,
    pub entries: Vec<LeagueItemDto>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueItemDto {
    #[serde(default)]
    pub puuid: Option<String>,
    pub rank: String,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
}

// ============================================================================
// Match-v5
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub metadata: MetadataDto,
    pub info: InfoDto,
}

impl MatchDto {
    pub fn match_id(&self) -> &str {
        &self.metadata.match_id
    }

    pub fn participant_info_of(&self, puuid: &str) -> Option<&ParticipantDto> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDto {
    pub match_id: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoDto {
    /// Epoch milliseconds.
    pub game_creation: i64,
    pub game_duration: i64,
    #[serde(default)]
    pub game_mode: String,
    #[serde(default)]
    pub game_version: String,
    #[serde(default)]
    pub game_ended_in_early_surrender: bool,
    pub queue_id: i32,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
}

impl InfoDto {
    pub fn duration_formatted(&self) -> String {
        let minutes = self.game_duration / 60;
        let seconds = self.game_duration % 60;
        format!("{}:{:02}", minutes, seconds)
    }

    /// Extract short patch version (e.g., "14.24" from "14.24.632.8043")
    pub fn patch_version(&self) -> &str {
        self.game_version
            .match_indices('.')
            .nth(1)
            .map(|(idx, _)| &self.game_version[..idx])
            .unwrap_or(&self.game_version)
    }

    pub fn queue_name(&self) -> &'static str {
        match self.queue_id {
            400 => "Normal Draft",
            420 => "Ranked Solo/Duo",
            430 => "Normal Blind",
            440 => "Ranked Flex",
            450 => "ARAM",
            490 => "Quickplay",
            _ => "Other",
        }
    }

    pub fn is_ranked(&self) -> bool {
        matches!(self.queue_id, 420 | 440)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    #[serde(default)]
    pub riot_id_game_name: String,
    #[serde(default)]
    pub riot_id_tagline: String,
    pub champion_name: String,
    #[serde(default)]
    pub champion_id: i32,
    #[serde(default)]
    pub team_position: String,
    pub win: bool,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    #[serde(default)]
    pub total_minions_killed: i32,
    #[serde(default)]
    pub neutral_minions_killed: i32,
    #[serde(default)]
    pub total_damage_dealt_to_champions: i64,
    #[serde(default)]
    pub gold_earned: i64,
    #[serde(default)]
    pub vision_score: i32,
    #[serde(default)]
    pub item0: i32,
    #[serde(default)]
    pub item1: i32,
    #[serde(default)]
    pub item2: i32,
    #[serde(default)]
    pub item3: i32,
    #[serde(default)]
    pub item4: i32,
    #[serde(default)]
    pub item5: i32,
    #[serde(default)]
    pub item6: i32,
}

impl ParticipantDto {
    pub fn kda_ratio(&self) -> f64 {
        if self.deaths == 0 {
            (self.kills + self.assists) as f64
        } else {
            (self.kills + self.assists) as f64 / self.deaths as f64
        }
    }

    pub fn cs_total(&self) -> i32 {
        self.total_minions_killed + self.neutral_minions_killed
    }

    /// Returns all item IDs (0 = empty slot)
    pub fn items(&self) -> [i32; 7] {
        [
            self.item0, self.item1, self.item2, self.item3, self.item4, self.item5, self.item6,
        ]
    }
}

// ============================================================================
// Champion-Mastery-v4
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionMasteryDto {
    pub puuid: String,
    pub champion_id: i64,
    pub champion_level: i32,
    pub champion_points: i64,
    #[serde(default)]
    pub last_play_time: i64,
    #[serde(default)]
    pub champion_points_until_next_level: i64,
}

// ============================================================================
// Champion-v3
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionInfoDto {
    pub free_champion_ids: Vec<i32>,
    pub free_champion_ids_for_new_players: Vec<i32>,
    pub max_new_player_level: i32,
}

// ============================================================================
// Spectator-v5
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentGameInfoDto {
    pub game_id: i64,
    #[serde(default)]
    pub game_mode: String,
    #[serde(default)]
    pub game_queue_config_id: Option<i64>,
    #[serde(default)]
    pub game_start_time: i64,
    #[serde(default)]
    pub game_length: i64,
    #[serde(default)]
    pub participants: Vec<CurrentGameParticipantDto>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentGameParticipantDto {
    #[serde(default)]
    pub puuid: Option<String>,
    pub champion_id: i64,
    pub team_id: i64,
    #[serde(default)]
    pub riot_id: Option<String>,
}

// ============================================================================
// Clash-v1
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClashPlayerDto {
    pub puuid: String,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub role: String,
}

// ============================================================================
// Tournament-stub-v5
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRegistrationParameters {
    /// Routing region name, e.g. `EUW`.
    pub region: String,
    /// Callback receiving game results.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentRegistrationParameters {
    pub provider_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyEventWrapperDto {
    pub event_list: Vec<LobbyEventDto>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyEventDto {
    pub timestamp: String,
    pub event_type: String,
    #[serde(default)]
    pub puuid: Option<String>,
}

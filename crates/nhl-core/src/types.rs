//! Record types returned by the NHL API client
//!
//! Every record is a flat value with optional fields only; `None` means the
//! field was absent from the response. Opaque sub-structures the API returns
//! (venues, divisions, rosters, coordinates...) are kept as untyped JSON.
//! Records are built by the extraction rules in [`crate::parser`].

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Deserialize an optional field, turning a value of the wrong JSON type
/// into `None` instead of failing the whole record.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match serde_json::from_value(v) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!(
                expected = std::any::type_name::<T>(),
                error = %e,
                "dropping mistyped field value"
            );
            None
        }
    }))
}

/// A single NHL team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    /// API link of the team resource
    #[serde(deserialize_with = "lenient")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub venue: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient")]
    pub abbreviation: Option<String>,
    /// Three-letter code used in play-by-play data
    #[serde(deserialize_with = "lenient")]
    pub tri_code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub team_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub location_name: Option<String>,
    /// Year as the API reports it, e.g. "1982"
    #[serde(deserialize_with = "lenient")]
    pub first_year_of_play: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub division: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient")]
    pub conference: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient")]
    pub franchise: Option<Map<String, Value>>,
    /// Present when requested with `expand=team.stats`
    #[serde(deserialize_with = "lenient")]
    pub team_stats: Option<Vec<Value>>,
    /// Present when requested with `expand=team.roster`
    #[serde(deserialize_with = "lenient")]
    pub roster: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient")]
    pub short_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub official_site_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub franchise_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub active: Option<bool>,
}

/// A single play (event) of a game
///
/// The API spreads a play over `result`, `about` and `coordinates`
/// sub-objects; they all land on this flat record. Score and strength
/// sub-objects are flattened with `goals_` and `strength_` prefixes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Play {
    /// Players involved, with their role in the play
    #[serde(deserialize_with = "lenient")]
    pub players: Option<Vec<Value>>,
    /// Human readable event, e.g. "Goal"
    #[serde(deserialize_with = "lenient")]
    pub event: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub event_code: Option<String>,
    /// Machine event classification, e.g. "GOAL" or "PENALTY"
    #[serde(deserialize_with = "lenient")]
    pub event_type_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub secondary_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub strength_code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub strength_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub game_winning_goal: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub empty_net: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub penalty_severity: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub penalty_minutes: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub event_idx: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub event_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub period: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub period_type: Option<String>,
    /// Period as an ordinal, e.g. "2nd"
    #[serde(deserialize_with = "lenient")]
    pub ordinal_num: Option<String>,
    /// Elapsed time in the period, "MM:SS"
    #[serde(deserialize_with = "lenient")]
    pub period_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub period_time_remaining: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub goals_away: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub goals_home: Option<i64>,
    /// Rink coordinates (`x`, `y`)
    #[serde(deserialize_with = "lenient")]
    pub coordinates: Option<Map<String, Value>>,
    /// Team credited with the play
    #[serde(deserialize_with = "lenient")]
    pub team: Option<Team>,
}

/// A game, built from the live feed or from a schedule entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Game {
    /// Game id (primary key)
    #[serde(deserialize_with = "lenient")]
    pub pk: Option<i64>,
    /// Season as the API encodes it, e.g. "20172018"
    #[serde(deserialize_with = "lenient")]
    pub season: Option<String>,
    /// Game type code, e.g. "R" or "P"
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub game_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub end_date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub abstract_game_state: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub coded_game_state: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub detailed_state: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub status_code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub start_time_tbd: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub away: Option<Team>,
    #[serde(deserialize_with = "lenient")]
    pub home: Option<Team>,
    /// Players dressed for the game, keyed by `id{player id}`
    #[serde(deserialize_with = "lenient")]
    pub players: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient")]
    pub venue: Option<Map<String, Value>>,
    /// Every play in order
    #[serde(deserialize_with = "lenient")]
    pub all_plays: Option<Vec<Play>>,
    /// Positions into `all_plays` of the scoring plays
    #[serde(deserialize_with = "lenient")]
    pub scoring_plays: Option<Vec<usize>>,
    /// Positions into `all_plays` of the penalty plays
    #[serde(deserialize_with = "lenient")]
    pub penalty_plays: Option<Vec<usize>>,
    #[serde(deserialize_with = "lenient")]
    pub plays_by_period: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub current_play: Option<Play>,
    /// Winner, loser and star selections
    #[serde(deserialize_with = "lenient")]
    pub decisions: Option<Map<String, Value>>,
}

impl Game {
    /// Plays selected by a list of positions into `all_plays`.
    ///
    /// Positions outside the play list are skipped.
    pub fn plays_at(&self, positions: &[usize]) -> Vec<Play> {
        let plays = self.all_plays.as_deref().unwrap_or_default();
        positions
            .iter()
            .filter_map(|&i| plays.get(i).cloned())
            .collect()
    }

    /// Scoring plays in order.
    pub fn scoring(&self) -> Vec<Play> {
        self.plays_at(self.scoring_plays.as_deref().unwrap_or_default())
    }

    /// Penalty plays in order.
    pub fn penalties(&self) -> Vec<Play> {
        self.plays_at(self.penalty_plays.as_deref().unwrap_or_default())
    }
}

/// Boxscore of a game, flattened into away/home prefixed fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Boxscore {
    #[serde(deserialize_with = "lenient")]
    pub away_team: Option<Team>,
    #[serde(deserialize_with = "lenient")]
    pub away_team_stats: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient")]
    pub away_players: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient")]
    pub away_goalies: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub away_skaters: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub away_on_ice: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub away_on_ice_plus: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub away_scratches: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub away_penalty_box: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub away_coaches: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub home_team: Option<Team>,
    #[serde(deserialize_with = "lenient")]
    pub home_team_stats: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient")]
    pub home_players: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient")]
    pub home_goalies: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub home_skaters: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub home_on_ice: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub home_on_ice_plus: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub home_scratches: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub home_penalty_box: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub home_coaches: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub officials: Option<Vec<Value>>,
}

/// One calendar date of the schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleDate {
    /// Date as "YYYY-MM-DD"
    #[serde(deserialize_with = "lenient")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub total_items: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub total_events: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub total_games: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub total_matches: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub games: Option<Vec<Game>>,
    #[serde(deserialize_with = "lenient")]
    pub events: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub matches: Option<Vec<Value>>,
}

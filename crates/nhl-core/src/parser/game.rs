//! Play and Game extraction from the live game feed.
//!
//! The live feed splits a game over `gameData` (identity, schedule, status,
//! teams) and `liveData` (plays, decisions). Schedule entries describe the
//! same game in a flatter shape with `gamePk`, `gameType`, `gameDate`, a
//! top-level `status` and `teams.{side}.team`; both shapes are accepted.

use serde_json::{Map, Value};

use super::keys::{merge, prefix_keys, rename_keys, sub_map};
use super::{build, nested, nested_list, normalize_keys, Record};
use crate::types::{Game, Play, Team};

/// Schedule-shape keys and the Game field they feed
const GAME_ALIASES: &[(&str, &str)] = &[
    ("game_pk", "pk"),
    ("game_type", "type"),
    ("game_date", "date_time"),
];

/// `startTimeTBD` normalizes letter by letter
const STATUS_ALIASES: &[(&str, &str)] = &[("start_time_t_b_d", "start_time_tbd")];

impl Record for Play {
    const NAME: &'static str = "Play";

    const FIELDS: &'static [&'static str] = &[
        "players",
        "event",
        "event_code",
        "event_type_id",
        "description",
        "secondary_type",
        "strength_code",
        "strength_name",
        "game_winning_goal",
        "empty_net",
        "penalty_severity",
        "penalty_minutes",
        "event_idx",
        "event_id",
        "period",
        "period_type",
        "ordinal_num",
        "period_time",
        "period_time_remaining",
        "date_time",
        "goals_away",
        "goals_home",
        "coordinates",
        "team",
    ];

    fn extract(raw: &Map<String, Value>) -> Self {
        let data = normalize_keys(raw);
        let result = sub_map(&data, "result");
        let about = sub_map(&data, "about");

        let merged = merge([
            Self::filter(&data),
            Self::filter(&result),
            Self::filter(&about),
            Self::filter(&prefix_keys("strength_", sub_map(&result, "strength"))),
            Self::filter(&prefix_keys("goals_", sub_map(&about, "goals"))),
        ]);

        let mut play: Play = build(merged);
        play.team = nested::<Team>(&sub_map(&data, "team"));
        play
    }
}

impl Record for Game {
    const NAME: &'static str = "Game";

    const FIELDS: &'static [&'static str] = &[
        "pk",
        "season",
        "type",
        "date_time",
        "end_date_time",
        "abstract_game_state",
        "coded_game_state",
        "detailed_state",
        "status_code",
        "start_time_tbd",
        "away",
        "home",
        "players",
        "venue",
        "all_plays",
        "scoring_plays",
        "penalty_plays",
        "plays_by_period",
        "current_play",
        "decisions",
    ];

    fn extract(raw: &Map<String, Value>) -> Self {
        let data = rename_keys(normalize_keys(raw), GAME_ALIASES);
        let game_data = sub_map(&data, "game_data");
        let live_data = sub_map(&data, "live_data");

        let mut plays = sub_map(&live_data, "plays");
        let all_plays = plays.remove("all_plays");
        let current_play = plays.remove("current_play");

        let merged = merge([
            Self::filter(&data),
            Self::filter(&game_data),
            Self::filter(&live_data),
            Self::filter(&sub_map(&game_data, "game")),
            Self::filter(&sub_map(&game_data, "datetime")),
            Self::filter(&rename_keys(sub_map(&data, "status"), STATUS_ALIASES)),
            Self::filter(&rename_keys(sub_map(&game_data, "status"), STATUS_ALIASES)),
            Self::filter(&plays),
        ]);

        let mut game: Game = build(merged);

        let teams = match sub_map(&game_data, "teams") {
            teams if !teams.is_empty() => teams,
            _ => sub_map(&data, "teams"),
        };
        // Flat keys of the same name (as written by `to_map`) go through the
        // nested record's own rules, never straight through serde.
        game.away = side_team(&teams, "away").or_else(|| nested::<Team>(&sub_map(&data, "away")));
        game.home = side_team(&teams, "home").or_else(|| nested::<Team>(&sub_map(&data, "home")));
        game.all_plays = nested_list::<Play>(all_plays.as_ref())
            .or_else(|| nested_list::<Play>(data.get("all_plays")));
        game.current_play = match &current_play {
            Some(Value::Object(current)) => nested::<Play>(current),
            _ => nested::<Play>(&sub_map(&data, "current_play")),
        };

        game
    }
}

/// Team of one side. The live feed stores the team directly under the side,
/// schedule entries wrap it in a `team` object next to score and record.
fn side_team(teams: &Map<String, Value>, side: &str) -> Option<Team> {
    let side_map = sub_map(teams, side);
    match side_map.get("team") {
        Some(Value::Object(team)) => nested::<Team>(team),
        _ => nested::<Team>(&side_map),
    }
}

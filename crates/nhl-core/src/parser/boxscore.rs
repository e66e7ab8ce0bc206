//! Boxscore extraction.
//!
//! `teams.away` and `teams.home` have the same structure, so their keys are
//! tagged with the side before filtering. The side's `team` object is nested
//! one level deeper than the rest and becomes its own Team record.

use serde_json::{Map, Value};

use super::keys::{merge, prefix_keys, sub_map};
use super::{build, nested, normalize_keys, Record};
use crate::types::{Boxscore, Team};

impl Record for Boxscore {
    const NAME: &'static str = "Boxscore";

    const FIELDS: &'static [&'static str] = &[
        "away_team",
        "away_team_stats",
        "away_players",
        "away_goalies",
        "away_skaters",
        "away_on_ice",
        "away_on_ice_plus",
        "away_scratches",
        "away_penalty_box",
        "away_coaches",
        "home_team",
        "home_team_stats",
        "home_players",
        "home_goalies",
        "home_skaters",
        "home_on_ice",
        "home_on_ice_plus",
        "home_scratches",
        "home_penalty_box",
        "home_coaches",
        "officials",
    ];

    fn extract(raw: &Map<String, Value>) -> Self {
        let data = normalize_keys(raw);
        let teams = sub_map(&data, "teams");
        let (away_team, away) = split_side(&teams, "away");
        let (home_team, home) = split_side(&teams, "home");

        let mut boxscore: Boxscore = build(merge([Self::filter(&data), away, home]));
        boxscore.away_team = away_team.or_else(|| nested::<Team>(&sub_map(&data, "away_team")));
        boxscore.home_team = home_team.or_else(|| nested::<Team>(&sub_map(&data, "home_team")));
        boxscore
    }
}

/// Team record of one side plus the rest of that side, prefixed and
/// filtered. The generic filter never sees the `team` object.
fn split_side(teams: &Map<String, Value>, side: &str) -> (Option<Team>, Map<String, Value>) {
    let mut side_map = sub_map(teams, side);
    let team = match side_map.remove("team") {
        Some(Value::Object(team)) => nested::<Team>(&team),
        _ => None,
    };
    let fields = Boxscore::filter(&prefix_keys(&format!("{side}_"), side_map));
    (team, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn boxscore(value: Value) -> Boxscore {
        Boxscore::from_value(&value)
    }

    #[test]
    fn test_empty_attribute() {
        assert_eq!(
            boxscore(json!({"teams": {"away": {"teamStats": {}}}})),
            Boxscore {
                away_team_stats: Some(Map::new()),
                ..Boxscore::default()
            }
        );
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(boxscore(json!({"not_valid_key": "f"})), Boxscore::default());
    }

    #[test]
    fn test_teams_created() {
        assert_eq!(
            boxscore(json!({"teams": {"away": {"team": {"id": 1}}}})),
            Boxscore {
                away_team: Some(Team {
                    id: Some(1),
                    ..Team::default()
                }),
                ..Boxscore::default()
            }
        );
    }

    #[test]
    fn test_full_boxscore() {
        let score = boxscore(json!({
            "copyright": "NHL",
            "teams": {
                "away": {
                    "team": {"id": 10, "name": "Toronto Maple Leafs", "abbreviation": "TOR", "triCode": "TOR"},
                    "teamStats": {"teamSkaterStats": {"goals": 5, "pim": 6}},
                    "players": {"ID8477939": {"person": {"id": 8477939}}},
                    "goalies": [8475883],
                    "skaters": [8477939, 8476853],
                    "onIce": [],
                    "onIcePlus": [],
                    "scratches": [8474581],
                    "penaltyBox": [],
                    "coaches": [{"person": {"fullName": "Mike Babcock"}}]
                },
                "home": {
                    "team": {"id": 9, "name": "Ottawa Senators"},
                    "goalies": [8467950],
                    "onIce": [8474578]
                }
            },
            "officials": [{"official": {"fullName": "Kelly Sutherland"}, "officialType": "Referee"}]
        }));

        assert_eq!(score.away_team.as_ref().and_then(|t| t.tri_code.as_deref()), Some("TOR"));
        assert_eq!(score.home_team.as_ref().and_then(|t| t.id), Some(9));
        assert_eq!(
            score.away_team_stats.map(Value::Object),
            Some(json!({"team_skater_stats": {"goals": 5, "pim": 6}}))
        );
        assert!(score.away_players.unwrap().contains_key("i_d8477939"));
        assert_eq!(score.away_goalies, Some(vec![json!(8475883)]));
        assert_eq!(score.away_skaters.map(|s| s.len()), Some(2));
        assert_eq!(score.away_on_ice, Some(vec![]));
        assert_eq!(score.away_scratches, Some(vec![json!(8474581)]));
        assert_eq!(score.away_coaches.map(|c| c.len()), Some(1));
        assert_eq!(score.home_goalies, Some(vec![json!(8467950)]));
        assert_eq!(score.home_on_ice, Some(vec![json!(8474578)]));
        assert_eq!(score.home_skaters, None);
        assert_eq!(score.officials.map(|o| o.len()), Some(1));
    }

    #[test]
    fn test_side_team_is_not_generic_field() {
        // `team` is pulled out before prefixing, so no `away_team` leaks from
        // generic filtering when the team has no known fields
        let score = boxscore(json!({"teams": {"away": {"team": {"colour": "blue"}}}}));
        assert_eq!(score, Boxscore::default());
    }

    #[test]
    fn test_flat_side_team_without_known_fields_is_none() {
        let score = boxscore(json!({"awayTeam": {"colour": "blue"}, "home_team": {"id": "nine"}}));
        assert_eq!(score, Boxscore::default());
    }

    #[test]
    fn test_is_idempotent() {
        let first = boxscore(json!({
            "teams": {
                "away": {"team": {"id": 10}, "goalies": [1]},
                "home": {"team": {"id": 9}, "skaters": [2, 3]}
            }
        }));
        assert_eq!(Boxscore::extract(&first.to_map(false)), first);
    }
}

//! ScheduleDate extraction.

use serde_json::{Map, Value};

use super::{build, nested_list, normalize_keys, Record};
use crate::types::{Game, ScheduleDate};

impl Record for ScheduleDate {
    const NAME: &'static str = "ScheduleDate";

    const FIELDS: &'static [&'static str] = &[
        "date",
        "total_items",
        "total_events",
        "total_games",
        "total_matches",
        "games",
        "events",
        "matches",
    ];

    fn extract(raw: &Map<String, Value>) -> Self {
        let data = normalize_keys(raw);
        let mut date: ScheduleDate = build(Self::filter(&data));
        // Schedule games keep their camelCase keys (lists are not
        // normalized), so they go through Game extraction rather than serde.
        date.games = nested_list::<Game>(data.get("games"));
        date
    }
}

//! Team extraction.
//!
//! Team objects are flat in every endpoint that returns them, so only the
//! top level is read.

use serde_json::{Map, Value};

use super::{build, normalize_keys, Record};
use crate::types::Team;

impl Record for Team {
    const NAME: &'static str = "Team";

    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "link",
        "venue",
        "abbreviation",
        "tri_code",
        "team_name",
        "location_name",
        "first_year_of_play",
        "division",
        "conference",
        "franchise",
        "team_stats",
        "roster",
        "short_name",
        "official_site_url",
        "franchise_id",
        "active",
    ];

    fn extract(raw: &Map<String, Value>) -> Self {
        let data = normalize_keys(raw);
        build(Self::filter(&data))
    }
}

//! Typed request parameters and endpoint construction.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{NhlError, Result};

/// Game id: 4-digit season start year, 2-digit game type, 4-digit game
/// number, e.g. `2017020001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(u64);

impl GameId {
    /// Numeric value of the id.
    pub fn get(self) -> u64 {
        self.0
    }

    /// Season start year encoded in the id.
    pub fn season_start_year(self) -> u16 {
        (self.0 / 1_000_000) as u16
    }

    /// Game type code encoded in the id (`01` preseason, `02` regular,
    /// `03` playoffs, `04` all-star).
    pub fn type_code(self) -> u8 {
        ((self.0 / 10_000) % 100) as u8
    }
}

impl FromStr for GameId {
    type Err = NhlError;

    fn from_str(s: &str) -> Result<Self> {
        let re = regex_lite::Regex::new(r"^\d{10}$")
            .map_err(|e| NhlError::InvalidGameId(format!("{s}: {e}")))?;
        if !re.is_match(s) {
            return Err(NhlError::InvalidGameId(s.to_string()));
        }
        s.parse::<u64>()
            .map(GameId)
            .map_err(|_| NhlError::InvalidGameId(s.to_string()))
    }
}

impl TryFrom<u64> for GameId {
    type Error = NhlError;

    fn try_from(id: u64) -> Result<Self> {
        id.to_string().parse()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Game type filter for schedule queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameType {
    /// Preseason (`PR`)
    Preseason,
    /// Regular season (`R`)
    Regular,
    /// Playoffs (`P`)
    Playoffs,
    /// All-star game (`A`)
    AllStar,
    /// Any other code the API accepts
    Other(String),
}

impl GameType {
    /// Code sent in the `gameType` parameter.
    pub fn code(&self) -> &str {
        match self {
            GameType::Preseason => "PR",
            GameType::Regular => "R",
            GameType::Playoffs => "P",
            GameType::AllStar => "A",
            GameType::Other(code) => code,
        }
    }
}

/// Season parameter: the start year followed by the end year, e.g. `20102011`.
fn season_param(start_year: u16) -> String {
    format!("season={}{}", start_year, u32::from(start_year) + 1)
}

fn team_ids_param(ids: &[u32]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    let joined = ids
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");
    Some(format!("teamId={joined}"))
}

fn with_query(path: &str, params: Vec<String>) -> String {
    if params.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, params.join("&"))
    }
}

/// Parameters of the `teams` endpoint
///
/// # Example
/// ```
/// use nhl_core::TeamsQuery;
///
/// let query = TeamsQuery::new().teams([1, 2, 3]).season(2010).roster(true);
/// assert_eq!(query.endpoint(), "teams?teamId=1,2,3&season=20102011&expand=team.roster");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamsQuery {
    team_ids: Vec<u32>,
    season: Option<u16>,
    roster: bool,
    stats: bool,
}

impl TeamsQuery {
    /// Query for all current teams.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a single team.
    pub fn team(self, id: u32) -> Self {
        self.teams([id])
    }

    /// Restrict to the given teams.
    pub fn teams<I: IntoIterator<Item = u32>>(mut self, ids: I) -> Self {
        self.team_ids = ids.into_iter().collect();
        self
    }

    /// Teams of the season starting in `start_year` (2010 is 2010-2011).
    pub fn season(mut self, start_year: u16) -> Self {
        self.season = Some(start_year);
        self
    }

    /// Include each team's roster.
    pub fn roster(mut self, include: bool) -> Self {
        self.roster = include;
        self
    }

    /// Include each team's season statistics.
    pub fn stats(mut self, include: bool) -> Self {
        self.stats = include;
        self
    }

    /// Endpoint fragment including the query string.
    pub fn endpoint(&self) -> String {
        let mut params = Vec::new();
        params.extend(team_ids_param(&self.team_ids));
        params.extend(self.season.map(season_param));
        if self.roster {
            params.push("expand=team.roster".to_string());
        }
        if self.stats {
            params.push("expand=team.stats".to_string());
        }
        with_query("teams", params)
    }
}

/// Parameters of the `schedule` endpoint
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use nhl_core::{GameType, ScheduleQuery};
///
/// let query = ScheduleQuery::new()
///     .team(1)
///     .game_type(GameType::Regular)
///     .date_range(
///         NaiveDate::from_ymd_opt(2017, 10, 4).unwrap(),
///         NaiveDate::from_ymd_opt(2017, 10, 10).unwrap(),
///     );
/// assert_eq!(
///     query.endpoint().unwrap(),
///     "schedule?teamId=1&gameType=R&startDate=2017-10-04&endDate=2017-10-10"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleQuery {
    team_ids: Vec<u32>,
    season: Option<u16>,
    game_type: Option<GameType>,
    date_range: Option<(NaiveDate, NaiveDate)>,
}

impl ScheduleQuery {
    /// Query for today's schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to games of a single team.
    pub fn team(self, id: u32) -> Self {
        self.teams([id])
    }

    /// Restrict to games of the given teams.
    pub fn teams<I: IntoIterator<Item = u32>>(mut self, ids: I) -> Self {
        self.team_ids = ids.into_iter().collect();
        self
    }

    /// Whole season starting in `start_year`.
    pub fn season(mut self, start_year: u16) -> Self {
        self.season = Some(start_year);
        self
    }

    /// Restrict to one game type.
    pub fn game_type(mut self, game_type: GameType) -> Self {
        self.game_type = Some(game_type);
        self
    }

    /// Inclusive date range.
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }

    /// Endpoint fragment including the query string.
    ///
    /// # Errors
    /// `NhlError::InvalidArgument` if the date range ends before it starts.
    pub fn endpoint(&self) -> Result<String> {
        let mut params = Vec::new();
        params.extend(team_ids_param(&self.team_ids));
        params.extend(self.season.map(season_param));
        if let Some(game_type) = &self.game_type {
            params.push(format!("gameType={}", urlencoding::encode(game_type.code())));
        }
        if let Some((start, end)) = self.date_range {
            if end < start {
                return Err(NhlError::InvalidArgument(format!(
                    "date range ends ({end}) before it starts ({start})"
                )));
            }
            params.push(format!("startDate={}", start.format("%Y-%m-%d")));
            params.push(format!("endDate={}", end.format("%Y-%m-%d")));
        }
        Ok(with_query("schedule", params))
    }
}

/// Resource of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameFeed {
    /// Full live feed (`feed/live`)
    Live,
    /// Boxscore (`boxscore`)
    Boxscore,
    /// Linescore (`linescore`)
    Linescore,
}

impl GameFeed {
    /// Pick the feed from boxscore/linescore flags; neither selects the live feed.
    ///
    /// # Errors
    /// `NhlError::InvalidArgument` if both flags are set.
    pub fn from_flags(boxscore: bool, linescore: bool) -> Result<Self> {
        match (boxscore, linescore) {
            (true, true) => Err(NhlError::InvalidArgument(
                "You may request a boxscore or a linescore, but not both.".to_string(),
            )),
            (true, false) => Ok(GameFeed::Boxscore),
            (false, true) => Ok(GameFeed::Linescore),
            (false, false) => Ok(GameFeed::Live),
        }
    }

    /// Endpoint fragment for a game.
    pub fn endpoint(self, game_id: GameId) -> String {
        let resource = match self {
            GameFeed::Live => "feed/live",
            GameFeed::Boxscore => "boxscore",
            GameFeed::Linescore => "linescore",
        };
        format!("game/{game_id}/{resource}")
    }
}

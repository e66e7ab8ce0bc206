//! Main NHL API
//!
//! This module provides the high-level API: one method per resource, each
//! performing a single request and mapping the response into records.

use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{ClientConfig, NhlClient};
use crate::error::{NhlError, Result};
use crate::parser::Record;
use crate::query::{GameFeed, GameId, ScheduleQuery, TeamsQuery};
use crate::response::Response;
use crate::types::{Boxscore, Game, Play, ScheduleDate, Team};

/// Main API for the NHL statistics service
///
/// # Example
/// ```no_run
/// use nhl_core::{NhlApi, TeamsQuery};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = NhlApi::new()?;
///
///     let teams = api.teams(&TeamsQuery::new().team(1)).await?;
///     println!("Found {} teams", teams.len());
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct NhlApi {
    client: NhlClient,
}

impl NhlApi {
    /// Create a new API with default configuration (API version 1).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(NhlClient::new()?))
    }

    /// Create a new API targeting another API version.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_api_version(api_version: u32) -> Result<Self> {
        let client = NhlClient::with_config(ClientConfig::with_api_version(api_version))?;
        Ok(Self::with_client(client))
    }

    /// Create a new API with a custom client.
    ///
    /// This is useful for testing or when you need custom client configuration.
    pub fn with_client(client: NhlClient) -> Self {
        Self { client }
    }

    /// Underlying transport client.
    pub fn client(&self) -> &NhlClient {
        &self.client
    }

    /// Get teams.
    ///
    /// Without any restriction the query returns every current team.
    ///
    /// # Returns
    /// * `Ok(Vec<Team>)`, empty when the response has no `teams` data
    /// * `Err(NhlError::RequestFailed)` on a 4xx or 5xx response
    ///
    /// # Example
    /// ```no_run
    /// use nhl_core::{NhlApi, TeamsQuery};
    ///
    /// # async fn example() -> Result<(), nhl_core::NhlError> {
    /// let api = NhlApi::new()?;
    /// let teams = api.teams(&TeamsQuery::new().teams([1, 2, 3]).roster(true)).await?;
    /// for team in teams {
    ///     println!("{:?} {:?}", team.id, team.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn teams(&self, query: &TeamsQuery) -> Result<Vec<Team>> {
        debug!(?query, "fetching teams");
        let response = self.client.get(&query.endpoint()).await?;
        Ok(records_from(&response, "teams"))
    }

    /// Get the full live feed of a game.
    ///
    /// # Returns
    /// * `Ok(Game)` with identity, status, teams and plays
    /// * `Err(NhlError::InvalidGameId)` if `game_id` is not a 10-digit id
    pub async fn game(&self, game_id: u64) -> Result<Game> {
        let game_id = GameId::try_from(game_id)?;
        let response = self.client.get(&GameFeed::Live.endpoint(game_id)).await?;
        Ok(Game::extract(&response.data))
    }

    /// Get the boxscore of a game.
    ///
    /// # Returns
    /// * `Ok(Boxscore)` with per-side statistics, players and coaches
    /// * `Err(NhlError::InvalidGameId)` if `game_id` is not a 10-digit id
    pub async fn boxscore(&self, game_id: u64) -> Result<Boxscore> {
        let game_id = GameId::try_from(game_id)?;
        let response = self.client.get(&GameFeed::Boxscore.endpoint(game_id)).await?;
        Ok(Boxscore::extract(&response.data))
    }

    /// Get the raw response of one of a game's resources.
    ///
    /// Neither flag selects the live feed.
    ///
    /// # Returns
    /// * `Ok(Response)` with the decoded body
    /// * `Err(NhlError::InvalidArgument)` if both flags are set
    /// * `Err(NhlError::InvalidGameId)` if `game_id` is not a 10-digit id
    pub async fn game_feed(&self, game_id: u64, boxscore: bool, linescore: bool) -> Result<Response> {
        let feed = GameFeed::from_flags(boxscore, linescore)?;
        let game_id = GameId::try_from(game_id)?;
        self.client.get(&feed.endpoint(game_id)).await
    }

    /// Get the plays of a game.
    ///
    /// # Arguments
    /// * `game_id` - 10-digit game id
    /// * `scoring_only` - only plays listed as scoring plays
    /// * `penalty_only` - only plays listed as penalty plays
    ///
    /// # Returns
    /// * `Ok(Vec<Play>)` in game order, empty when the game has no play data
    /// * `Err(NhlError::InvalidArgument)` if both filters are requested
    ///
    /// # Example
    /// ```no_run
    /// use nhl_core::NhlApi;
    ///
    /// # async fn example() -> Result<(), nhl_core::NhlError> {
    /// let api = NhlApi::new()?;
    /// let goals = api.plays(2017020001, true, false).await?;
    /// for goal in goals {
    ///     println!("{:?}", goal.description);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn plays(&self, game_id: u64, scoring_only: bool, penalty_only: bool) -> Result<Vec<Play>> {
        if scoring_only && penalty_only {
            return Err(NhlError::InvalidArgument(
                "You may request scoring plays or penalty plays, but not both.".to_string(),
            ));
        }

        let game = self.game(game_id).await?;
        let all_plays = game.all_plays.as_deref().unwrap_or_default();
        if all_plays.is_empty() {
            warn!(
                game_id,
                "response did not have play data: the plays key was missing or no data exists"
            );
            return Ok(Vec::new());
        }

        let positions = if scoring_only {
            game.scoring_plays.as_deref()
        } else if penalty_only {
            game.penalty_plays.as_deref()
        } else {
            return Ok(all_plays.to_vec());
        };
        let positions = positions.unwrap_or_default();

        if let Some(&out_of_range) = positions.iter().find(|&&i| i >= all_plays.len()) {
            warn!(
                game_id,
                position = out_of_range,
                plays = all_plays.len(),
                "play index outside the play list"
            );
        }
        Ok(game.plays_at(positions))
    }

    /// Get the schedule.
    ///
    /// Without any restriction the query returns today's games.
    ///
    /// # Returns
    /// * `Ok(Vec<ScheduleDate>)`, empty when the response has no `dates` data
    /// * `Err(NhlError::InvalidArgument)` if the date range is inverted
    pub async fn schedule(&self, query: &ScheduleQuery) -> Result<Vec<ScheduleDate>> {
        debug!(?query, "fetching schedule");
        let endpoint = query.endpoint()?;
        let response = self.client.get(&endpoint).await?;
        Ok(records_from(&response, "dates"))
    }
}

/// Map the array stored under `key` into records; empty with a warning when
/// the array is missing or empty.
fn records_from<R: Record>(response: &Response, key: &str) -> Vec<R> {
    let entries = response.array(key).map(Vec::as_slice).unwrap_or_default();
    if entries.is_empty() {
        warn!(
            key,
            record = R::NAME,
            "response did not have the expected data: the key was missing or no data exists"
        );
        debug!(data = ?response.data, "response data");
        return Vec::new();
    }

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::Object(map) => Some(R::extract(map)),
            other => {
                debug!(record = R::NAME, entry = %other, "skipping non-object entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GAME_ID: u64 = 2017020001;

    fn mock_api(server: &MockServer) -> NhlApi {
        let client = NhlClient::with_config(ClientConfig {
            base_url: format!("{}/api", server.uri()),
            ..ClientConfig::default()
        })
        .unwrap();
        NhlApi::with_client(client)
    }

    async fn serve(server: &MockServer, endpoint: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/{endpoint}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    fn team(id: i64) -> Team {
        Team {
            id: Some(id),
            ..Team::default()
        }
    }

    fn play(event: &str) -> Play {
        Play {
            event: Some(event.to_string()),
            ..Play::default()
        }
    }

    #[test]
    fn test_api_creation() {
        assert!(NhlApi::new().is_ok());
        let api = NhlApi::with_api_version(2).unwrap();
        assert_eq!(api.client().url(), "https://statsapi.web.nhl.com/api/v2");
    }

    #[tokio::test]
    async fn test_teams_end_to_end() {
        let server = MockServer::start().await;
        serve(&server, "teams", 200, json!({"teams": [{"id": 1, "notARealField": "x"}]})).await;

        let teams = mock_api(&server).teams(&TeamsQuery::new()).await.unwrap();
        assert_eq!(teams, vec![team(1)]);
    }

    #[tokio::test]
    async fn test_teams_response_shapes() {
        let cases = [
            (json!({"teams": []}), vec![]),
            (json!({}), vec![]),
            (json!({"teams": [{}]}), vec![Team::default()]),
            (json!({"teams": [{"not_valid_key": "ooga"}]}), vec![Team::default()]),
            (json!({"teams": [{"id": {"key1": null}}]}), vec![Team::default()]),
        ];

        for (body, expected) in cases {
            let server = MockServer::start().await;
            serve(&server, "teams", 200, body).await;
            let teams = mock_api(&server).teams(&TeamsQuery::new()).await.unwrap();
            assert_eq!(teams, expected);
        }
    }

    #[tokio::test]
    async fn test_teams_query_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/teams"))
            .and(query_param("teamId", "1,2,3"))
            .and(query_param("season", "20002001"))
            .and(query_param("expand", "team.roster"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"teams": [{"id": 1}]})))
            .expect(1)
            .mount(&server)
            .await;

        let query = TeamsQuery::new().teams([1, 2, 3]).season(2000).roster(true);
        let teams = mock_api(&server).teams(&query).await.unwrap();
        assert_eq!(teams, vec![team(1)]);
    }

    #[tokio::test]
    async fn test_teams_error_statuses() {
        for status in [400u16, 500] {
            let server = MockServer::start().await;
            serve(&server, "teams", status, json!({"teams": [{"id": 1}]})).await;
            let result = mock_api(&server).teams(&TeamsQuery::new().team(1)).await;
            assert!(matches!(
                result,
                Err(NhlError::RequestFailed { status: s, .. }) if s == status
            ));
        }
    }

    #[tokio::test]
    async fn test_game() {
        let cases = [
            (json!({"gameData": {"game": {"pk": null}}}), Game::default()),
            (
                json!({"gameData": {"game": {"pk": 2017020001}}}),
                Game {
                    pk: Some(2017020001),
                    ..Game::default()
                },
            ),
            (json!({"GameData": {"not_valid_key": "f"}}), Game::default()),
        ];

        for status in [200u16, 300] {
            for (body, expected) in cases.clone() {
                let server = MockServer::start().await;
                serve(&server, "game/2017020001/feed/live", status, body).await;
                let game = mock_api(&server).game(GAME_ID).await.unwrap();
                assert_eq!(game, expected);
            }
        }
    }

    #[tokio::test]
    async fn test_game_invalid_id_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = mock_api(&server);
        assert!(matches!(api.game(123).await, Err(NhlError::InvalidGameId(_))));
        assert!(matches!(api.boxscore(0).await, Err(NhlError::InvalidGameId(_))));
        assert!(matches!(
            api.plays(99_999_999_999, false, false).await,
            Err(NhlError::InvalidGameId(_))
        ));
    }

    #[tokio::test]
    async fn test_boxscore() {
        let cases = [
            (
                json!({"teams": {"away": {"teamStats": {}}}}),
                Boxscore {
                    away_team_stats: Some(serde_json::Map::new()),
                    ..Boxscore::default()
                },
            ),
            (json!({"not_valid_key": "f"}), Boxscore::default()),
            (
                json!({"teams": {"away": {"team": {"id": 1}}}}),
                Boxscore {
                    away_team: Some(team(1)),
                    ..Boxscore::default()
                },
            ),
        ];

        for (body, expected) in cases {
            let server = MockServer::start().await;
            serve(&server, "game/2017020001/boxscore", 200, body).await;
            let boxscore = mock_api(&server).boxscore(GAME_ID).await.unwrap();
            assert_eq!(boxscore, expected);
        }
    }

    #[tokio::test]
    async fn test_boxscore_error_status() {
        let server = MockServer::start().await;
        serve(&server, "game/2017020001/boxscore", 500, json!({})).await;
        assert!(matches!(
            mock_api(&server).boxscore(GAME_ID).await,
            Err(NhlError::RequestFailed { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_game_feed_variants() {
        let server = MockServer::start().await;
        serve(&server, "game/2017020001/linescore", 200, json!({"currentPeriod": 3})).await;
        serve(&server, "game/2017020001/boxscore", 200, json!({"officials": []})).await;
        serve(&server, "game/2017020001/feed/live", 200, json!({"gamePk": 2017020001})).await;

        let api = mock_api(&server);
        let linescore = api.game_feed(GAME_ID, false, true).await.unwrap();
        assert_eq!(linescore.data.get("currentPeriod"), Some(&json!(3)));
        let boxscore = api.game_feed(GAME_ID, true, false).await.unwrap();
        assert!(boxscore.data.contains_key("officials"));
        let live = api.game_feed(GAME_ID, false, false).await.unwrap();
        assert!(live.data.contains_key("gamePk"));
    }

    #[tokio::test]
    async fn test_game_feed_both_variants_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = mock_api(&server).game_feed(GAME_ID, true, true).await;
        assert!(matches!(result, Err(NhlError::InvalidArgument(_))));
    }

    fn two_play_feed() -> Value {
        json!({
            "liveData": {
                "plays": {
                    "allPlays": [
                        {"result": {"event": "event0"}},
                        {"result": {"event": "event1"}}
                    ],
                    "scoringPlays": [0],
                    "penaltyPlays": [1]
                }
            }
        })
    }

    #[tokio::test]
    async fn test_plays_all() {
        let server = MockServer::start().await;
        serve(&server, "game/2017020001/feed/live", 200, two_play_feed()).await;
        let plays = mock_api(&server).plays(GAME_ID, false, false).await.unwrap();
        assert_eq!(plays, vec![play("event0"), play("event1")]);
    }

    #[tokio::test]
    async fn test_plays_scoring_only() {
        let server = MockServer::start().await;
        serve(&server, "game/2017020001/feed/live", 200, two_play_feed()).await;
        let plays = mock_api(&server).plays(GAME_ID, true, false).await.unwrap();
        assert_eq!(plays, vec![play("event0")]);
    }

    #[tokio::test]
    async fn test_plays_penalty_only() {
        let server = MockServer::start().await;
        serve(&server, "game/2017020001/feed/live", 200, two_play_feed()).await;
        let plays = mock_api(&server).plays(GAME_ID, false, true).await.unwrap();
        assert_eq!(plays, vec![play("event1")]);
    }

    #[tokio::test]
    async fn test_plays_both_filters_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_play_feed()))
            .expect(0)
            .mount(&server)
            .await;

        let result = mock_api(&server).plays(GAME_ID, true, true).await;
        assert!(matches!(result, Err(NhlError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_plays_without_play_data() {
        let bodies = [
            json!({"liveData": {"plays": {}}}),
            json!({"liveData": {"plays": {"result": {"not_valid_key": "f"}}}}),
            json!({}),
        ];
        for body in bodies {
            for (scoring, penalty) in [(false, false), (true, false), (false, true)] {
                let server = MockServer::start().await;
                serve(&server, "game/2017020001/feed/live", 200, body.clone()).await;
                let plays = mock_api(&server).plays(GAME_ID, scoring, penalty).await.unwrap();
                assert!(plays.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_plays_missing_index_list_and_out_of_range() {
        let server = MockServer::start().await;
        serve(
            &server,
            "game/2017020001/feed/live",
            200,
            json!({"liveData": {"plays": {
                "allPlays": [{"result": {"event": "event0"}}],
                "scoringPlays": [0, 5]
            }}}),
        )
        .await;

        let api = mock_api(&server);
        assert_eq!(api.plays(GAME_ID, true, false).await.unwrap(), vec![play("event0")]);
        assert!(api.plays(GAME_ID, false, true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_plays_error_status() {
        let server = MockServer::start().await;
        serve(&server, "game/2017020001/feed/live", 400, two_play_feed()).await;
        assert!(matches!(
            mock_api(&server).plays(GAME_ID, false, false).await,
            Err(NhlError::RequestFailed { status: 400, .. })
        ));
    }

    #[tokio::test]
    async fn test_schedule() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/schedule"))
            .and(query_param("teamId", "1"))
            .and(query_param("gameType", "R"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalGames": 1,
                "dates": [{
                    "date": "2017-10-06",
                    "totalGames": 1,
                    "games": [{"gamePk": 2017020013, "teams": {"home": {"team": {"id": 1}}}}]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = ScheduleQuery::new().team(1).game_type(crate::query::GameType::Regular);
        let dates = mock_api(&server).schedule(&query).await.unwrap();
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].date.as_deref(), Some("2017-10-06"));
        let games = dates[0].games.as_ref().unwrap();
        assert_eq!(games[0].pk, Some(2017020013));
        assert_eq!(games[0].home, Some(team(1)));
    }

    #[tokio::test]
    async fn test_schedule_without_dates() {
        let server = MockServer::start().await;
        serve(&server, "schedule", 200, json!({"totalGames": 0, "dates": []})).await;
        let dates = mock_api(&server).schedule(&ScheduleQuery::new()).await.unwrap();
        assert!(dates.is_empty());
    }
}

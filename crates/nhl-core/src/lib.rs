//! NHL Stats Core Library
//!
//! This crate provides a client for the NHL statistics API
//! (`statsapi.web.nhl.com`).
//!
//! # Features
//! - Teams, optionally restricted by id and season, with roster and stats
//! - Live game feeds, boxscores and linescores
//! - Plays of a game, optionally only scoring or penalty plays
//! - Schedules by team, season, game type and date range
//!
//! Responses are mapped into records whose fields are all optional.
//! Keys are normalized from camelCase to snake_case and unknown keys are
//! dropped, so new fields in the API never break deserialization.

pub mod api;
pub mod client;
pub mod error;
pub mod parser;
pub mod query;
pub mod response;
pub mod types;

// Re-export main types for convenience
pub use api::NhlApi;
pub use client::{ClientConfig, NhlClient};
pub use error::{NhlError, Result};
pub use parser::Record;
pub use query::{GameFeed, GameId, GameType, ScheduleQuery, TeamsQuery};
pub use response::Response;
pub use types::{Boxscore, Game, Play, ScheduleDate, Team};

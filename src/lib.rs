//! League Core - double round-robin league simulation.
//!
//! Builds a balanced home-and-away calendar, resolves matches with a Poisson model
//! driven by team ratings, form, morale and physical condition, and ranks teams
//! with a cascading tie-break.
//!
//! Every function that samples takes its RNG as a parameter, so seeding a
//! `ChaCha8Rng` reproduces a whole season.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod fixture;
pub mod league;
pub mod loader;
pub mod match_model;
pub mod registry;
pub mod render;
pub mod sampling;
pub mod schedule;
pub mod standings;
pub mod team;

pub use config::Config;
pub use error::{LeagueError, NarratorError, Result};
pub use events::{trigger_random_event, EventNarrator, RandomEvent, TemplateNarrator};
pub use fixture::{Fixture, MatchOutcome, MatchResult};
pub use league::{champion_distribution, League};
pub use loader::load_teams;
pub use match_model::{match_lambdas, predict_outcome, MatchLambdas, OutcomeProbabilities};
pub use registry::TeamRegistry;
pub use schedule::{generate_schedule, Round, Schedule};
pub use standings::{generate_standings, Standings, TeamStatistic};
pub use team::{DynamicAttribute, DynamicAttributes, Team};

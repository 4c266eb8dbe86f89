use thiserror::Error;

/// Errors raised by the league core and the team loader.
#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Fixture consistency error: {0}")]
    FixtureConsistency(String),

    #[error("Team [{0}] was not found in the standings")]
    TeamNotFound(String),

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse [{path}]: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Team [{team}] has {attribute} = {value}, expected a value in [0, 10]")]
    InvalidRating {
        team: String,
        attribute: &'static str,
        value: f64,
    },
}

impl LeagueError {
    /// Errors that point to a caller or data bug rather than to the environment.
    pub fn is_consistency_violation(&self) -> bool {
        matches!(
            self,
            LeagueError::FixtureConsistency(_) | LeagueError::TeamNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;

/// Failure of the narrative text collaborator. Never fatal to a season.
#[derive(Error, Debug)]
pub enum NarratorError {
    #[error("Narrator unavailable: {0}")]
    Unavailable(String),

    #[error("Narrator rejected the event: {0}")]
    Rejected(String),
}

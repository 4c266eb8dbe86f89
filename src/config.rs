use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::EVENT_UPDATE_STDDEV;
use crate::error::{LeagueError, Result};

/// Run settings of the simulator. Every field has a default, so a config file
/// only needs the values it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one JSON record per team
    pub teams_dir: PathBuf,
    /// Seed of the season RNG; entropy when absent
    pub seed: Option<u64>,
    /// Seasons simulated by the champion distribution
    pub champion_runs: usize,
    /// Trigger a narrated random event between interactive rounds
    pub narrate_events: bool,
    /// Spread of random event deltas
    pub event_stddev: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            teams_dir: PathBuf::from("teams"),
            seed: None,
            champion_runs: 1000,
            narrate_events: false,
            event_stddev: EVENT_UPDATE_STDDEV,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| LeagueError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| LeagueError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let raw = serde_json::to_string_pretty(self).map_err(|source| LeagueError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, raw).map_err(|source| LeagueError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

use std::collections::BTreeMap;

use crate::error::{LeagueError, Result};
use crate::team::Team;

/// Owner of every team taking part in a league.
///
/// Teams are keyed by name and iterated in name order, so a seeded season is
/// reproducible regardless of how the registry was filled.
#[derive(Clone, Debug, Default)]
pub struct TeamRegistry {
    teams: BTreeMap<String, Team>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        TeamRegistry {
            teams: BTreeMap::new(),
        }
    }

    /// Add a team after validating its ratings. Names must be unique.
    pub fn insert(&mut self, team: Team) -> Result<()> {
        team.validate()?;
        if self.teams.contains_key(&team.name) {
            return Err(LeagueError::InvalidInput(format!(
                "team [{}] is registered twice",
                team.name
            )));
        }
        self.teams.insert(team.name.clone(), team);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Team> {
        self.teams.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Team> {
        self.teams.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams.contains_key(name)
    }

    /// All team names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.teams.keys().cloned().collect()
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl TryFrom<Vec<Team>> for TeamRegistry {
    type Error = LeagueError;

    fn try_from(teams: Vec<Team>) -> Result<Self> {
        let mut registry = TeamRegistry::new();
        for team in teams {
            registry.insert(team)?;
        }
        Ok(registry)
    }
}

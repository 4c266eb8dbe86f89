use std::fmt;

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::error::{LeagueError, Result};
use crate::match_model::match_lambdas;
use crate::registry::TeamRegistry;
use crate::sampling::poisson_knuth;
use crate::team::Team;

/// Result of a fixture from the point of view of one team.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchOutcome {
    pub fn symbol(&self) -> char {
        match self {
            MatchOutcome::Win => 'W',
            MatchOutcome::Draw => 'D',
            MatchOutcome::Loss => 'L',
        }
    }
}

/// Immutable record of a played fixture, kept in team histories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
}

impl MatchResult {
    /// Goals scored and conceded by `team`, or `None` if it did not take part.
    pub fn goals_for_against(&self, team: &str) -> Option<(u32, u32)> {
        if self.home_team == team {
            Some((self.home_score, self.away_score))
        } else if self.away_team == team {
            Some((self.away_score, self.home_score))
        } else {
            None
        }
    }

    pub fn goal_diff_for(&self, team: &str) -> Option<i32> {
        self.goals_for_against(team)
            .map(|(scored, conceded)| scored as i32 - conceded as i32)
    }

    pub fn outcome_for(&self, team: &str) -> Option<MatchOutcome> {
        self.goals_for_against(team)
            .map(|(scored, conceded)| match scored.cmp(&conceded) {
                std::cmp::Ordering::Greater => MatchOutcome::Win,
                std::cmp::Ordering::Equal => MatchOutcome::Draw,
                std::cmp::Ordering::Less => MatchOutcome::Loss,
            })
    }
}

/// A scheduled match between two teams, unscored until played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Fixture {
    home_team: String,
    away_team: String,
    score: Option<(u32, u32)>,
}

impl Fixture {
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Fixture {
            home_team: home_team.into(),
            away_team: away_team.into(),
            score: None,
        }
    }

    /// Fixture whose result is already known.
    pub fn with_score(
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home_score: u32,
        away_score: u32,
    ) -> Self {
        Fixture {
            home_team: home_team.into(),
            away_team: away_team.into(),
            score: Some((home_score, away_score)),
        }
    }

    pub fn home_team(&self) -> &str {
        &self.home_team
    }

    pub fn away_team(&self) -> &str {
        &self.away_team
    }

    pub fn home_score(&self) -> Option<u32> {
        self.score.map(|(home, _)| home)
    }

    pub fn away_score(&self) -> Option<u32> {
        self.score.map(|(_, away)| away)
    }

    pub fn is_played(&self) -> bool {
        self.score.is_some()
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    /// Played result of this fixture, if any.
    pub fn result(&self) -> Option<MatchResult> {
        self.score.map(|(home_score, away_score)| MatchResult {
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
            home_score,
            away_score,
        })
    }

    /// Swap home and away sides. Only meaningful before the fixture is played.
    pub(crate) fn swap_sides(&mut self) {
        std::mem::swap(&mut self.home_team, &mut self.away_team);
    }

    /// Unscored copy with home and away sides swapped.
    pub fn mirrored(&self) -> Fixture {
        Fixture::new(self.away_team.clone(), self.home_team.clone())
    }

    /// Resolve the fixture's score and feed the result back into both teams.
    ///
    /// Fails if either team is unknown to the registry or if the fixture was
    /// already played.
    pub fn play<R: Rng + ?Sized>(&mut self, registry: &mut TeamRegistry, rng: &mut R) -> Result<()> {
        if self.is_played() {
            return Err(LeagueError::FixtureConsistency(format!(
                "fixture {} x {} was already played",
                self.home_team, self.away_team
            )));
        }
        if self.home_team == self.away_team {
            return Err(LeagueError::FixtureConsistency(format!(
                "team [{}] cannot play against itself",
                self.home_team
            )));
        }

        let lambdas = {
            let home = lookup(registry, &self.home_team)?;
            let away = lookup(registry, &self.away_team)?;
            match_lambdas(home, away)?
        };

        let home_score = poisson_knuth(rng, lambdas.home);
        let away_score = poisson_knuth(rng, lambdas.away);
        self.score = Some((home_score, away_score));

        debug!(
            "{} {} x {} {} (lambda {:.3} / {:.3})",
            self.home_team, home_score, away_score, self.away_team, lambdas.home, lambdas.away
        );

        let result = MatchResult {
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
            home_score,
            away_score,
        };

        lookup_mut(registry, &self.home_team)?.record_result(result.clone(), rng)?;
        lookup_mut(registry, &self.away_team)?.record_result(result, rng)?;
        Ok(())
    }
}

fn lookup<'a>(registry: &'a TeamRegistry, name: &str) -> Result<&'a Team> {
    registry
        .get(name)
        .ok_or_else(|| LeagueError::FixtureConsistency(format!("team [{}] is not registered", name)))
}

fn lookup_mut<'a>(registry: &'a mut TeamRegistry, name: &str) -> Result<&'a mut Team> {
    registry
        .get_mut(name)
        .ok_or_else(|| LeagueError::FixtureConsistency(format!("team [{}] is not registered", name)))
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.score {
            Some((home, away)) => write!(f, "{} {} x {} {}", self.home_team, home, away, self.away_team),
            None => write!(f, "{} - x - {}", self.home_team, self.away_team),
        }
    }
}

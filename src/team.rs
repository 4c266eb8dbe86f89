use std::collections::VecDeque;
use std::fmt;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ATTRIBUTE_MAX, ATTRIBUTE_MIN, FORM_WINDOW, INITIAL_DYNAMIC_ATTRIBUTE, MORALE_CONTRIBUTION_IMPACT,
    MORALE_UPDATE_STDDEV, PHYSICAL_CONDITION_CONTRIBUTION_IMPACT, PHYSICAL_CONDITION_UPDATE_STDDEV,
    RECENT_FORM_WEIGHTS,
};
use crate::error::{LeagueError, Result};
use crate::fixture::{MatchOutcome, MatchResult};
use crate::sampling::{clamp_attribute, normal_sample};

/// Team with static ratings and the state that drifts over a season.
///
/// Ratings are in [0, 10]. The on-disk record only carries the ratings; dynamic
/// attributes always start neutral.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Team {
    pub name: String,
    pub attack: f64,
    pub midfield: f64,
    pub defense: f64,
    pub home_factor: f64,

    #[serde(skip)]
    pub dynamic: DynamicAttributes,
}

/// Mutable per-team state updated after every fixture.
#[derive(Clone, Debug)]
pub struct DynamicAttributes {
    pub morale: f64,
    pub physical_condition: f64,
    recent_results: VecDeque<MatchResult>,
}

impl Default for DynamicAttributes {
    fn default() -> Self {
        DynamicAttributes {
            morale: INITIAL_DYNAMIC_ATTRIBUTE,
            physical_condition: INITIAL_DYNAMIC_ATTRIBUTE,
            recent_results: VecDeque::with_capacity(FORM_WINDOW),
        }
    }
}

impl DynamicAttributes {
    /// Last results, most recent first. Never longer than `FORM_WINDOW`.
    pub fn recent_results(&self) -> impl Iterator<Item = &MatchResult> {
        self.recent_results.iter()
    }

    pub fn recent_len(&self) -> usize {
        self.recent_results.len()
    }

    fn push_result(&mut self, result: MatchResult) {
        if self.recent_results.len() == FORM_WINDOW {
            self.recent_results.pop_back();
        }
        self.recent_results.push_front(result);
    }
}

/// The two attributes that drift during a season.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DynamicAttribute {
    Morale,
    PhysicalCondition,
}

impl DynamicAttribute {
    pub const ALL: [DynamicAttribute; 2] = [DynamicAttribute::Morale, DynamicAttribute::PhysicalCondition];

    pub fn name(&self) -> &'static str {
        match self {
            DynamicAttribute::Morale => "MORALE",
            DynamicAttribute::PhysicalCondition => "PHYSICAL_CONDITION",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DynamicAttribute::Morale => "The morale of the squad, ranging from 0 to 10.",
            DynamicAttribute::PhysicalCondition => "The physical condition of the squad, ranging from 0 to 10.",
        }
    }

    /// Strength impact used by the contribution multiplier.
    pub fn impact(&self) -> f64 {
        match self {
            DynamicAttribute::Morale => MORALE_CONTRIBUTION_IMPACT,
            DynamicAttribute::PhysicalCondition => PHYSICAL_CONDITION_CONTRIBUTION_IMPACT,
        }
    }

    pub fn value(&self, attributes: &DynamicAttributes) -> f64 {
        match self {
            DynamicAttribute::Morale => attributes.morale,
            DynamicAttribute::PhysicalCondition => attributes.physical_condition,
        }
    }

    /// Add `delta` to the attribute, clamped to [0, 10].
    pub fn apply(&self, attributes: &mut DynamicAttributes, delta: f64) {
        let slot = match self {
            DynamicAttribute::Morale => &mut attributes.morale,
            DynamicAttribute::PhysicalCondition => &mut attributes.physical_condition,
        };
        *slot = clamp_attribute(*slot + delta);
    }
}

impl fmt::Display for DynamicAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Team {
    pub fn new(name: impl Into<String>, attack: f64, midfield: f64, defense: f64, home_factor: f64) -> Self {
        Team {
            name: name.into(),
            attack,
            midfield,
            defense,
            home_factor,
            dynamic: DynamicAttributes::default(),
        }
    }

    /// Check every static rating lies in [0, 10].
    pub fn validate(&self) -> Result<()> {
        let ratings = [
            ("Attack", self.attack),
            ("Midfield", self.midfield),
            ("Defense", self.defense),
            ("HomeFactor", self.home_factor),
        ];
        for (attribute, value) in ratings {
            if !(ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&value) {
                return Err(LeagueError::InvalidRating {
                    team: self.name.clone(),
                    attribute,
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn attack_strength(&self) -> f64 {
        1.5 * self.attack + self.midfield
    }

    pub fn defense_strength(&self) -> f64 {
        1.5 * self.defense + self.midfield
    }

    /// Weighted recent-form score in [0, 10].
    ///
    /// Slots without a played match count as half their weight.
    pub fn form_contribution(&self) -> Result<f64> {
        let mut results = self.dynamic.recent_results();
        let mut contribution = 0.0;

        for weight in RECENT_FORM_WEIGHTS {
            contribution += match results.next() {
                None => weight / 2.0,
                Some(result) => match self.outcome_in(result)? {
                    MatchOutcome::Win => weight,
                    MatchOutcome::Draw => weight / 2.0,
                    MatchOutcome::Loss => 0.0,
                },
            };
        }

        Ok(contribution * 10.0)
    }

    /// Push a played result into the history and apply the post-match drift.
    pub fn record_result<R: Rng + ?Sized>(&mut self, result: MatchResult, rng: &mut R) -> Result<()> {
        let goal_diff = result.goal_diff_for(&self.name).ok_or_else(|| {
            LeagueError::FixtureConsistency(format!(
                "team [{}] did not play {} x {}",
                self.name, result.home_team, result.away_team
            ))
        })?;

        self.dynamic.push_result(result);

        let morale_mean = goal_diff as f64 * MORALE_UPDATE_STDDEV;
        let morale_delta = normal_sample(rng, morale_mean, MORALE_UPDATE_STDDEV);
        let physical_delta = normal_sample(rng, 0.0, PHYSICAL_CONDITION_UPDATE_STDDEV);

        DynamicAttribute::Morale.apply(&mut self.dynamic, morale_delta);
        DynamicAttribute::PhysicalCondition.apply(&mut self.dynamic, physical_delta);

        debug!(
            "{}: morale {:.2} ({:+.2}), physical condition {:.2} ({:+.2})",
            self.name, self.dynamic.morale, morale_delta, self.dynamic.physical_condition, physical_delta
        );
        Ok(())
    }

    pub fn change_attribute(&mut self, attribute: DynamicAttribute, delta: f64) {
        attribute.apply(&mut self.dynamic, delta);
    }

    fn outcome_in(&self, result: &MatchResult) -> Result<MatchOutcome> {
        result.outcome_for(&self.name).ok_or_else(|| {
            LeagueError::FixtureConsistency(format!(
                "history of [{}] holds {} x {}",
                self.name, result.home_team, result.away_team
            ))
        })
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} | {} | {} | {}",
            self.name, self.attack, self.midfield, self.defense, self.home_factor
        )
    }
}

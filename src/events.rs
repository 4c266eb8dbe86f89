//! Random between-rounds events that shift a team's morale or physical condition.
//!
//! Narrative text comes from an [`EventNarrator`]. A narrator failure never stops a
//! season: the effect is applied and the event is reported without text.

use std::fmt;

use log::{info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::NarratorError;
use crate::registry::TeamRegistry;
use crate::sampling::normal_sample;
use crate::team::DynamicAttribute;

/// Produces descriptive text for an event.
pub trait EventNarrator {
    fn describe_event(&self, team: &str, attribute: DynamicAttribute, delta: f64) -> Result<String, NarratorError>;
}

/// Offline narrator building text from the attribute, sign and size of the change.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateNarrator;

impl EventNarrator for TemplateNarrator {
    fn describe_event(&self, team: &str, attribute: DynamicAttribute, delta: f64) -> Result<String, NarratorError> {
        if !delta.is_finite() {
            return Err(NarratorError::Rejected(format!("delta {} is not finite", delta)));
        }

        let size = match delta.abs() {
            d if d < 1.0 => "minor",
            d if d < 3.0 => "notable",
            _ => "major",
        };
        let text = match (attribute, delta >= 0.0) {
            (DynamicAttribute::Morale, true) => format!(
                "A {} boost in the dressing room: {} players are buzzing after a week of good news.",
                size, team
            ),
            (DynamicAttribute::Morale, false) => format!(
                "A {} row behind closed doors leaves the {} squad unsettled.",
                size, team
            ),
            (DynamicAttribute::PhysicalCondition, true) => format!(
                "The {} medical staff report a {} improvement, with key players back in full training.",
                team, size
            ),
            (DynamicAttribute::PhysicalCondition, false) => format!(
                "A {} injury setback hits {} ahead of the next round.",
                size, team
            ),
        };
        Ok(text)
    }
}

/// An event applied to a team between rounds.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomEvent {
    pub team: String,
    pub attribute: DynamicAttribute,
    pub delta: f64,
    pub narration: Option<String>,
}

impl fmt::Display for RandomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = &self.narration {
            writeln!(f, "\t- {}", text)?;
        }
        let sign = if self.delta < 0.0 { '-' } else { '+' };
        write!(
            f,
            "\t- Effect: {}'s {}: {}{:.2}",
            self.team,
            self.attribute,
            sign,
            self.delta.abs()
        )
    }
}

/// Pick a random team and attribute, shift it by Normal(0, `stddev`) and narrate it.
///
/// Returns `None` only when the registry is empty.
pub fn trigger_random_event<R: Rng + ?Sized>(
    registry: &mut TeamRegistry,
    narrator: &dyn EventNarrator,
    stddev: f64,
    rng: &mut R,
) -> Option<RandomEvent> {
    let names = registry.names();
    let team_name = names.choose(rng)?.clone();
    let attribute = *DynamicAttribute::ALL.choose(rng)?;
    let delta = normal_sample(rng, 0.0, stddev);

    let team = registry.get_mut(&team_name)?;
    team.change_attribute(attribute, delta);
    info!(
        "Event: {} {} {:+.2} -> {:.2}",
        team_name,
        attribute,
        delta,
        attribute.value(&team.dynamic)
    );

    let narration = match narrator.describe_event(&team_name, attribute, delta) {
        Ok(text) => Some(text),
        Err(err) => {
            warn!("Unable to narrate event for [{}]: {}", team_name, err);
            None
        }
    };

    Some(RandomEvent {
        team: team_name,
        attribute,
        delta,
        narration,
    })
}

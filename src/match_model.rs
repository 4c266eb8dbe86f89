use statrs::distribution::{Discrete, Poisson};

use crate::constants::{HOME_BONUS_FACTOR, MAX_PREDICTED_GOALS, RECENT_FORM_CONTRIBUTION_IMPACT};
use crate::error::Result;
use crate::sampling::{attenuate_strength, contribution_multiplier};
use crate::team::{DynamicAttribute, Team};

/// Poisson scoring rates of both sides of a fixture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchLambdas {
    pub home: f64,
    pub away: f64,
}

/// Analytic result probabilities for a fixture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutcomeProbabilities {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}

/// Strength bonus of the home side.
pub fn stadium_strength(home: &Team) -> f64 {
    HOME_BONUS_FACTOR * (home.home_factor / 10.0)
}

/// Product of the form, morale and physical condition multipliers of a team.
pub fn state_multiplier(team: &Team) -> Result<f64> {
    let form = contribution_multiplier(team.form_contribution()?, RECENT_FORM_CONTRIBUTION_IMPACT);
    let state: f64 = DynamicAttribute::ALL
        .iter()
        .map(|attribute| contribution_multiplier(attribute.value(&team.dynamic), attribute.impact()))
        .product();
    Ok(form * state)
}

/// Strength of an attack against a defense, before any multiplier.
pub fn raw_strength(attack: f64, opposing_defense: f64) -> f64 {
    if attack <= 0.0 {
        return 0.0;
    }
    attack / (1.0 + opposing_defense / attack)
}

/// Calculate the non-attenuated strengths of both sides.
///
/// Only the home side receives the stadium bonus.
pub fn match_strengths(home: &Team, away: &Team) -> Result<(f64, f64)> {
    let home_raw = raw_strength(home.attack_strength(), away.defense_strength());
    let away_raw = raw_strength(away.attack_strength(), home.defense_strength());

    let home_strength = home_raw * stadium_strength(home) * state_multiplier(home)?;
    let away_strength = away_raw * state_multiplier(away)?;

    Ok((home_strength, away_strength))
}

/// Calculate the scoring rates of a fixture given the current state of both teams.
pub fn match_lambdas(home: &Team, away: &Team) -> Result<MatchLambdas> {
    let (home_strength, away_strength) = match_strengths(home, away)?;
    Ok(MatchLambdas {
        home: attenuate_strength(home_strength),
        away: attenuate_strength(away_strength),
    })
}

/// Calculate home win, draw and away win probabilities.
///
/// Uses independent Poisson score distributions truncated at `MAX_PREDICTED_GOALS`
/// and renormalized, so the three probabilities sum to 1.
pub fn predict_outcome(home: &Team, away: &Team) -> Result<OutcomeProbabilities> {
    let lambdas = match_lambdas(home, away)?;
    let home_pmf = score_pmf(lambdas.home);
    let away_pmf = score_pmf(lambdas.away);

    let mut home_win = 0.0;
    let mut draw = 0.0;
    let mut away_win = 0.0;
    for (h, &ph) in home_pmf.iter().enumerate() {
        for (a, &pa) in away_pmf.iter().enumerate() {
            let p = ph * pa;
            if h > a {
                home_win += p;
            } else if h == a {
                draw += p;
            } else {
                away_win += p;
            }
        }
    }

    let total = home_win + draw + away_win;
    Ok(OutcomeProbabilities {
        home_win: home_win / total,
        draw: draw / total,
        away_win: away_win / total,
    })
}

fn score_pmf(lambda: f64) -> Vec<f64> {
    match Poisson::new(lambda) {
        Ok(dist) => (0..=MAX_PREDICTED_GOALS).map(|k| dist.pmf(k)).collect(),
        // Rate 0: the side never scores
        Err(_) => {
            let mut pmf = vec![0.0; MAX_PREDICTED_GOALS as usize + 1];
            pmf[0] = 1.0;
            pmf
        }
    }
}

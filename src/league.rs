use std::collections::HashMap;

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::error::{LeagueError, Result};
use crate::events::{trigger_random_event, EventNarrator, RandomEvent};
use crate::registry::TeamRegistry;
use crate::schedule::{generate_schedule, Schedule};
use crate::standings::{generate_standings, Standings};

/// Stream of the season seed reserved for standings coin flips.
const TIE_BREAK_STREAM: u64 = 1;

/// A season in progress: the teams, their calendar and the season's RNGs.
///
/// Matches and events draw from `rng`; standings coin flips draw from
/// `tie_break_rng`, so looking at the table never changes later results.
#[derive(Clone, Debug)]
pub struct League {
    registry: TeamRegistry,
    schedule: Schedule,
    rng: ChaCha8Rng,
    tie_break_rng: ChaCha8Rng,
}

impl League {
    /// Generate the schedule for `registry`. A seed makes the whole season reproducible.
    pub fn new(registry: TeamRegistry, seed: Option<u64>) -> Result<Self> {
        let mut rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut tie_break_rng = rng.clone();
        tie_break_rng.set_stream(TIE_BREAK_STREAM);
        let schedule = generate_schedule(registry.names(), &mut rng)?;

        Ok(League {
            registry,
            schedule,
            rng,
            tie_break_rng,
        })
    }

    pub fn registry(&self) -> &TeamRegistry {
        &self.registry
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn is_finished(&self) -> bool {
        self.schedule.is_finished()
    }

    pub fn play_next_round(&mut self) -> Result<()> {
        self.schedule.play_next_round(&mut self.registry, &mut self.rng)
    }

    pub fn play_all(&mut self) -> Result<()> {
        self.schedule.play_all_fixtures(&mut self.registry, &mut self.rng)
    }

    /// Standings after the last played round, `None` before the first round.
    pub fn standings(&mut self) -> Option<Standings> {
        let round = self.schedule.current_round()?;
        Some(generate_standings(&self.schedule, round, &mut self.tie_break_rng))
    }

    /// Leader of the final table once every round was played.
    pub fn champion(&mut self) -> Option<String> {
        if !self.schedule.is_finished() {
            return None;
        }
        self.standings()
            .and_then(|standings| standings.leader().map(|stat| stat.name.clone()))
    }

    pub fn random_event(&mut self, narrator: &dyn EventNarrator, stddev: f64) -> Option<RandomEvent> {
        trigger_random_event(&mut self.registry, narrator, stddev, &mut self.rng)
    }
}

/// Simulate `runs` independent seasons and count the titles of each team.
///
/// Seasons run in parallel, each from a copy of `registry` and its own RNG stream
/// derived from `seed`. Every team is listed, most titles first, ties by name.
pub fn champion_distribution(registry: &TeamRegistry, runs: usize, seed: Option<u64>) -> Result<Vec<(String, usize)>> {
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    let season_seeds: Vec<u64> = (0..runs).map(|_| rng.gen::<u64>()).collect();

    let champions: Vec<String> = season_seeds
        .par_iter()
        .map(|&season_seed| {
            let mut league = League::new(registry.clone(), Some(season_seed))?;
            league.play_all()?;
            league
                .champion()
                .ok_or_else(|| LeagueError::InvalidInput("season finished without a champion".to_string()))
        })
        .collect::<Result<Vec<String>>>()?;

    let mut counts: HashMap<String, usize> = registry.names().into_iter().map(|name| (name, 0)).collect();
    for champion in champions {
        *counts.entry(champion).or_insert(0) += 1;
    }

    let mut ranking: Vec<(String, usize)> = counts.into_iter().collect();
    ranking.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    info!("Simulated {} seasons", runs);
    Ok(ranking)
}

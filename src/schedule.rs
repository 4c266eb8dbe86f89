use std::collections::{BTreeSet, HashMap};

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{LeagueError, Result};
use crate::fixture::Fixture;
use crate::registry::TeamRegistry;

/// Fixtures in which every team plays at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Round {
    fixtures: Vec<Fixture>,
}

impl Round {
    pub fn new(fixtures: Vec<Fixture>) -> Self {
        Round { fixtures }
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    pub fn is_played(&self) -> bool {
        self.fixtures.iter().all(Fixture::is_played)
    }

    /// Play every fixture of the round that has not been played yet.
    pub fn play_fixtures<R: Rng + ?Sized>(&mut self, registry: &mut TeamRegistry, rng: &mut R) -> Result<()> {
        for fixture in self.fixtures.iter_mut().filter(|f| !f.is_played()) {
            fixture.play(registry, rng)?;
        }
        Ok(())
    }
}

/// Double round-robin calendar of a league.
#[derive(Clone, Debug)]
pub struct Schedule {
    teams: Vec<String>,
    rounds: Vec<Round>,
    current_round: Option<usize>,
    next_round: Option<usize>,
    finished: bool,
}

/// Build a double round-robin schedule.
///
/// The first half pairs teams with the circle method over a shuffled order and
/// balances home and away sides; the second half mirrors it.
pub fn generate_schedule<I, S, R>(team_names: I, rng: &mut R) -> Result<Schedule>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    R: Rng + ?Sized,
{
    let names: BTreeSet<String> = team_names.into_iter().map(Into::into).collect();
    if names.is_empty() || names.len() % 2 != 0 {
        return Err(LeagueError::InvalidInput(format!(
            "number of teams must be even and positive, got {}",
            names.len()
        )));
    }

    let teams: Vec<String> = names.into_iter().collect();
    let mut order = teams.clone();
    order.shuffle(rng);

    let mut first_half = circle_rounds(&mut order);
    balance_home_away(&mut first_half);

    let second_half: Vec<Round> = first_half
        .iter()
        .map(|round| Round::new(round.fixtures.iter().map(Fixture::mirrored).collect()))
        .collect();

    let mut rounds = first_half;
    rounds.extend(second_half);

    info!("Generated schedule: {} teams, {} rounds", teams.len(), rounds.len());
    Ok(Schedule::from_rounds(teams, rounds))
}

/// Circle method: position 0 stays fixed while the rest rotate one slot per round.
fn circle_rounds(order: &mut [String]) -> Vec<Round> {
    let n = order.len();
    let mut rounds = Vec::with_capacity(n - 1);

    for _ in 0..n - 1 {
        let fixtures = (0..n / 2)
            .map(|j| Fixture::new(order[j].clone(), order[n - 1 - j].clone()))
            .collect();
        rounds.push(Round::new(fixtures));
        order[1..].rotate_right(1);
    }

    rounds
}

/// Swap fixture sides so each team alternates home and away as evenly as possible.
fn balance_home_away(rounds: &mut [Round]) {
    let mut balance: HashMap<String, i32> = HashMap::new();

    for round in rounds.iter_mut() {
        for fixture in round.fixtures.iter_mut() {
            let home_count = *balance.get(fixture.home_team()).unwrap_or(&0);
            let away_count = *balance.get(fixture.away_team()).unwrap_or(&0);

            let swap = if home_count.abs() > away_count.abs() {
                home_count > 0
            } else {
                away_count < 0
            };
            if swap {
                fixture.swap_sides();
            }

            *balance.entry(fixture.home_team().to_string()).or_insert(0) += 1;
            *balance.entry(fixture.away_team().to_string()).or_insert(0) -= 1;
        }
    }
}

impl Schedule {
    /// Wrap prebuilt rounds. No round is considered played yet.
    pub fn from_rounds(teams: Vec<String>, rounds: Vec<Round>) -> Self {
        let next_round = if rounds.is_empty() { None } else { Some(0) };
        Schedule {
            teams,
            finished: rounds.is_empty(),
            rounds,
            current_round: None,
            next_round,
        }
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    /// Index of the last fully played round.
    pub fn current_round(&self) -> Option<usize> {
        self.current_round
    }

    pub fn next_round(&self) -> Option<usize> {
        self.next_round
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn last_played_round(&self) -> Option<&Round> {
        self.current_round.and_then(|index| self.rounds.get(index))
    }

    /// Play every unplayed fixture in round order.
    pub fn play_all_fixtures<R: Rng + ?Sized>(&mut self, registry: &mut TeamRegistry, rng: &mut R) -> Result<()> {
        for round in self.rounds.iter_mut() {
            round.play_fixtures(registry, rng)?;
        }

        self.current_round = self.rounds.len().checked_sub(1);
        self.next_round = None;
        self.finished = true;
        info!("Season finished after {} rounds", self.rounds.len());
        Ok(())
    }

    /// Play the next round. Does nothing once the schedule is finished.
    pub fn play_next_round<R: Rng + ?Sized>(&mut self, registry: &mut TeamRegistry, rng: &mut R) -> Result<()> {
        let index = match (self.finished, self.next_round) {
            (false, Some(index)) => index,
            _ => return Ok(()),
        };

        self.rounds[index].play_fixtures(registry, rng)?;

        self.current_round = Some(index);
        if index + 1 == self.rounds.len() {
            self.next_round = None;
            self.finished = true;
        } else {
            self.next_round = Some(index + 1);
        }
        info!("Played round {} of {}", index + 1, self.rounds.len());
        Ok(())
    }

    /// Played fixtures of rounds `[0, last_round]`.
    pub fn played_fixtures_until(&self, last_round: usize) -> impl Iterator<Item = &Fixture> {
        self.rounds
            .iter()
            .take(last_round.saturating_add(1))
            .flat_map(|round| round.fixtures.iter())
            .filter(|fixture| fixture.is_played())
    }
}

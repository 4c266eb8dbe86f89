use std::cmp::Ordering;
use std::collections::HashMap;

use rand::Rng;
use serde::Serialize;

use crate::constants::{POINTS_FOR_DRAW, POINTS_FOR_WIN};
use crate::error::{LeagueError, Result};
use crate::schedule::Schedule;

/// Aggregated league record of a team up to some round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TeamStatistic {
    pub name: String,
    pub matches: u32,
    pub points: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goals_diff: i32,
}

impl TeamStatistic {
    pub fn new(name: impl Into<String>) -> Self {
        TeamStatistic {
            name: name.into(),
            ..Default::default()
        }
    }

    fn add_result(&mut self, scored: u32, conceded: u32) {
        self.matches += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        self.goals_diff += scored as i32 - conceded as i32;

        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.won += 1;
                self.points += POINTS_FOR_WIN;
            }
            Ordering::Equal => {
                self.drawn += 1;
                self.points += POINTS_FOR_DRAW;
            }
            Ordering::Less => self.lost += 1,
        }
    }
}

/// Ranking rules, applied in order until one separates two teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankCriterion {
    Points,
    GoalsDiff,
    GoalsFor,
    HeadToHead,
    // Last resort
    CoinFlip,
}

pub const TIE_BREAK_CASCADE: [RankCriterion; 5] = [
    RankCriterion::Points,
    RankCriterion::GoalsDiff,
    RankCriterion::GoalsFor,
    RankCriterion::HeadToHead,
    RankCriterion::CoinFlip,
];

/// Ranked table at a round, with the table of the round before for position changes.
#[derive(Clone, Debug, Serialize)]
pub struct Standings {
    round_index: usize,
    table: Vec<TeamStatistic>,
    previous_table: Option<Vec<TeamStatistic>>,
}

/// Build the standings after round `round_index` (0-based, inclusive).
///
/// Both the table and the previous round's table are recomputed from the played
/// fixtures. The coin flip of the last tie-break rule is drawn from `rng`.
pub fn generate_standings<R: Rng + ?Sized>(schedule: &Schedule, round_index: usize, rng: &mut R) -> Standings {
    let round_index = round_index.min(schedule.rounds().len().saturating_sub(1));
    let table = team_statistics_until(schedule, round_index, rng);
    let previous_table = round_index
        .checked_sub(1)
        .map(|previous| team_statistics_until(schedule, previous, rng));

    Standings {
        round_index,
        table,
        previous_table,
    }
}

/// Ranked statistics of every team of the schedule over rounds `[0, round_index]`.
pub fn team_statistics_until<R: Rng + ?Sized>(
    schedule: &Schedule,
    round_index: usize,
    rng: &mut R,
) -> Vec<TeamStatistic> {
    let mut by_team: HashMap<&str, TeamStatistic> = schedule
        .teams()
        .iter()
        .map(|name| (name.as_str(), TeamStatistic::new(name.clone())))
        .collect();

    for fixture in schedule.played_fixtures_until(round_index) {
        let (home_score, away_score) = match (fixture.home_score(), fixture.away_score()) {
            (Some(home), Some(away)) => (home, away),
            _ => continue,
        };
        if let Some(home) = by_team.get_mut(fixture.home_team()) {
            home.add_result(home_score, away_score);
        }
        if let Some(away) = by_team.get_mut(fixture.away_team()) {
            away.add_result(away_score, home_score);
        }
    }

    // One key per team keeps the coin flip consistent across comparisons
    let coin: HashMap<&str, u64> = schedule
        .teams()
        .iter()
        .map(|name| (name.as_str(), rng.gen::<u64>()))
        .collect();

    let mut table: Vec<TeamStatistic> = schedule
        .teams()
        .iter()
        .filter_map(|name| by_team.remove(name.as_str()))
        .collect();

    rank_by(&mut table, |a, b| {
        TIE_BREAK_CASCADE
            .iter()
            .map(|criterion| compare(*criterion, a, b, schedule, round_index, &coin))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
    table
}

fn compare(
    criterion: RankCriterion,
    a: &TeamStatistic,
    b: &TeamStatistic,
    schedule: &Schedule,
    round_index: usize,
    coin: &HashMap<&str, u64>,
) -> Ordering {
    match criterion {
        RankCriterion::Points => b.points.cmp(&a.points),
        RankCriterion::GoalsDiff => b.goals_diff.cmp(&a.goals_diff),
        RankCriterion::GoalsFor => b.goals_for.cmp(&a.goals_for),
        RankCriterion::HeadToHead => {
            let (a_goals, b_goals) = head_to_head(schedule, round_index, &a.name, &b.name);
            b_goals.cmp(&a_goals)
        }
        RankCriterion::CoinFlip => coin.get(a.name.as_str()).cmp(&coin.get(b.name.as_str())),
    }
}

/// Goals scored by `team1` and `team2` against each other over rounds `[0, round_index]`.
pub fn head_to_head(schedule: &Schedule, round_index: usize, team1: &str, team2: &str) -> (u32, u32) {
    schedule
        .played_fixtures_until(round_index)
        .filter(|fixture| fixture.involves(team1) && fixture.involves(team2))
        .filter_map(|fixture| fixture.result())
        .fold((0, 0), |(team1_goals, team2_goals), result| {
            let (scored, conceded) = result.goals_for_against(team1).unwrap_or((0, 0));
            (team1_goals + scored, team2_goals + conceded)
        })
}

/// Stable insertion sort.
///
/// Head-to-head is not transitive across three teams, so the comparator may not be
/// a total order; insertion sort still terminates with a sensible ranking.
fn rank_by<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

impl Standings {
    pub fn round_index(&self) -> usize {
        self.round_index
    }

    pub fn table(&self) -> &[TeamStatistic] {
        &self.table
    }

    pub fn previous_table(&self) -> Option<&[TeamStatistic]> {
        self.previous_table.as_deref()
    }

    pub fn leader(&self) -> Option<&TeamStatistic> {
        self.table.first()
    }

    /// Places gained since the previous round (negative when the team dropped).
    pub fn position_change(&self, team: &str) -> Result<i32> {
        let previous = match &self.previous_table {
            Some(previous) => previous,
            None => return Ok(0),
        };

        let current_position = position_of(&self.table, team)?;
        let previous_position = position_of(previous, team)?;
        Ok(previous_position as i32 - current_position as i32)
    }
}

fn position_of(table: &[TeamStatistic], team: &str) -> Result<usize> {
    table
        .iter()
        .position(|stat| stat.name == team)
        .ok_or_else(|| LeagueError::TeamNotFound(team.to_string()))
}

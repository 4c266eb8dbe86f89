//! Plain-text rendering of rounds, standings and simulation summaries.

use std::fmt::Write;

use crate::constants::FORM_WINDOW;
use crate::error::Result;
use crate::match_model::OutcomeProbabilities;
use crate::registry::TeamRegistry;
use crate::schedule::{Round, Schedule};
use crate::standings::Standings;

pub fn render_round(index: usize, round: &Round) -> String {
    let mut out = format!("Round [{}]\n", index + 1);
    for fixture in round.fixtures() {
        let _ = writeln!(out, "\t{}", fixture);
    }
    out
}

pub fn render_schedule(schedule: &Schedule) -> String {
    schedule
        .rounds()
        .iter()
        .enumerate()
        .map(|(i, round)| render_round(i, round))
        .collect()
}

/// Last results of a team, oldest first, padded with `-`.
pub fn recent_form(registry: &TeamRegistry, team: &str) -> String {
    let mut symbols: Vec<char> = registry
        .get(team)
        .map(|t| {
            t.dynamic
                .recent_results()
                .filter_map(|result| result.outcome_for(team))
                .map(|outcome| outcome.symbol())
                .collect()
        })
        .unwrap_or_default();
    symbols.resize(FORM_WINDOW, '-');
    symbols.reverse();
    symbols.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
}

fn position_change_label(change: i32) -> String {
    match change {
        c if c > 0 => format!("+{}", c),
        c if c < 0 => c.to_string(),
        _ => "=".to_string(),
    }
}

/// Standings table with recent form and position change columns.
pub fn render_standings(standings: &Standings, registry: &TeamRegistry) -> Result<String> {
    let mut out = format!(
        "{:<6}{:<20}{:>8}{:>8}{:>6}{:>6}{:>6}{:>6}{:>6}{:>6}   {:<12}{:>6}\n",
        "Rank", "Team", "Matches", "Points", "W", "D", "L", "GF", "GA", "GD", "Form", "Change"
    );

    for (i, stat) in standings.table().iter().enumerate() {
        let change = standings.position_change(&stat.name)?;
        let _ = writeln!(
            out,
            "{:<6}{:<20}{:>8}{:>8}{:>6}{:>6}{:>6}{:>6}{:>6}{:>6}   {:<12}{:>6}",
            i + 1,
            stat.name,
            stat.matches,
            stat.points,
            stat.won,
            stat.drawn,
            stat.lost,
            stat.goals_for,
            stat.goals_against,
            stat.goals_diff,
            recent_form(registry, &stat.name),
            position_change_label(change)
        );
    }
    Ok(out)
}

pub fn render_champion(name: &str) -> String {
    let bar = "#".repeat(66);
    format!("{}\nThe champion: [{}]!\n{}\n", bar, name, bar)
}

pub fn render_champion_distribution(ranking: &[(String, usize)], runs: usize) -> String {
    let mut out = format!("Ranking of champions over {} seasons:\n", runs);
    for (team, count) in ranking {
        let share = if runs == 0 { 0.0 } else { 100.0 * *count as f64 / runs as f64 };
        let _ = writeln!(out, "{:<20}{:>6} times ({:>5.1}%)", team, count, share);
    }
    out
}

pub fn render_prediction(home: &str, away: &str, probs: &OutcomeProbabilities) -> String {
    format!(
        "{} x {}\n\t{} win: {:.1}%\n\tDraw: {:.1}%\n\t{} win: {:.1}%\n",
        home,
        away,
        home,
        100.0 * probs.home_win,
        100.0 * probs.draw,
        away,
        100.0 * probs.away_win
    )
}

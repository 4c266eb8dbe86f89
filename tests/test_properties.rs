//! Property-based tests for the schedule, the match model and the standings.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use league_core::constants::{
    MORALE_CONTRIBUTION_IMPACT, PHYSICAL_CONDITION_CONTRIBUTION_IMPACT, POINTS_FOR_DRAW, POINTS_FOR_WIN,
    RECENT_FORM_CONTRIBUTION_IMPACT,
};
use league_core::sampling::{attenuate_strength, clamp_attribute, contribution_multiplier, poisson_knuth};
use league_core::{
    generate_schedule, generate_standings, match_lambdas, predict_outcome, League, LeagueError, Team, TeamRegistry,
};

/// Strategy: an even team count in [2, 20].
fn even_team_count() -> impl Strategy<Value = usize> {
    (1..=10usize).prop_map(|half| half * 2)
}

/// Strategy: a rating in [0, 10].
fn rating() -> impl Strategy<Value = f64> {
    0.0..=10.0f64
}

fn team_names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Team{:02}", i)).collect()
}

fn registry_with(n: usize, ratings: &[(f64, f64, f64, f64)]) -> TeamRegistry {
    let teams = team_names(n)
        .into_iter()
        .zip(ratings.iter().cycle())
        .map(|(name, &(attack, midfield, defense, home))| Team::new(name, attack, midfield, defense, home))
        .collect::<Vec<_>>();
    TeamRegistry::try_from(teams).unwrap()
}

proptest! {
    // 1. Every even league gets 2(N-1) rounds of N/2 disjoint fixtures
    #[test]
    fn schedule_structure(n in even_team_count(), seed in any::<u64>()) {
        let schedule = generate_schedule(team_names(n), &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(schedule.rounds().len(), 2 * (n - 1));

        let mut ordered_pairs = HashSet::new();
        for round in schedule.rounds() {
            prop_assert_eq!(round.fixtures().len(), n / 2);
            let mut seen = HashSet::new();
            for fixture in round.fixtures() {
                prop_assert_ne!(fixture.home_team(), fixture.away_team());
                prop_assert!(seen.insert(fixture.home_team()));
                prop_assert!(seen.insert(fixture.away_team()));
                prop_assert!(ordered_pairs.insert((fixture.home_team(), fixture.away_team())));
            }
        }
        prop_assert_eq!(ordered_pairs.len(), n * (n - 1));
    }

    // 2. Odd leagues are rejected
    #[test]
    fn odd_league_rejected(half in 0..10usize, seed in any::<u64>()) {
        let err = generate_schedule(team_names(2 * half + 1), &mut ChaCha8Rng::seed_from_u64(seed)).unwrap_err();
        prop_assert!(matches!(err, LeagueError::InvalidInput(_)));
    }

    // 3. Home games stay close to away games in each half
    #[test]
    fn home_away_balance(n in even_team_count(), seed in any::<u64>()) {
        let schedule = generate_schedule(team_names(n), &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        let mut home_games: HashMap<&str, i32> = HashMap::new();
        for round in &schedule.rounds()[..n - 1] {
            for fixture in round.fixtures() {
                *home_games.entry(fixture.home_team()).or_insert(0) += 1;
            }
        }
        for name in schedule.teams() {
            let home = *home_games.get(name.as_str()).unwrap_or(&0);
            let away = n as i32 - 1 - home;
            prop_assert!((home - away).abs() <= 3, "{name}: {home} home, {away} away");
        }
    }

    // 4. Poisson draws are zero for a non-positive rate
    #[test]
    fn poisson_zero_rate(lambda in -5.0..=0.0f64, seed in any::<u64>()) {
        prop_assert_eq!(poisson_knuth(&mut ChaCha8Rng::seed_from_u64(seed), lambda), 0);
    }

    // 4b. Vanishing positive rates also give 0 goals
    #[test]
    fn poisson_tiny_rate(lambda in 0.0..1e-15f64, seed in any::<u64>()) {
        prop_assert_eq!(poisson_knuth(&mut ChaCha8Rng::seed_from_u64(seed), lambda), 0);
    }

    // 5. Multipliers are 1 at the neutral contribution and reciprocal around it
    #[test]
    fn multiplier_symmetry(offset in 0.0..=5.0f64) {
        for impact in [
            RECENT_FORM_CONTRIBUTION_IMPACT,
            MORALE_CONTRIBUTION_IMPACT,
            PHYSICAL_CONDITION_CONTRIBUTION_IMPACT,
        ] {
            let up = contribution_multiplier(5.0 + offset, impact);
            let down = contribution_multiplier(5.0 - offset, impact);
            prop_assert!((up * down - 1.0).abs() < 1e-9);
            prop_assert!(up >= 1.0);
        }
    }

    // 6. Attenuation is monotone and never negative
    #[test]
    fn attenuation_monotone(a in -10.0..100.0f64, b in -10.0..100.0f64) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(attenuate_strength(low) >= 0.0);
        prop_assert!(attenuate_strength(low) <= attenuate_strength(high));
    }

    // 7. Clamped values stay in [0, 10] and in-range values are untouched
    #[test]
    fn clamp_range(value in -100.0..100.0f64) {
        let clamped = clamp_attribute(value);
        prop_assert!((0.0..=10.0).contains(&clamped));
        if (0.0..=10.0).contains(&value) {
            prop_assert_eq!(clamped, value);
        }
    }

    // 8. Scoring rates are finite and non-negative, outcome probabilities sum to 1
    #[test]
    fn match_model_well_formed(
        home in (rating(), rating(), rating(), rating()),
        away in (rating(), rating(), rating(), rating()),
    ) {
        let home_team = Team::new("Home", home.0, home.1, home.2, home.3);
        let away_team = Team::new("Away", away.0, away.1, away.2, away.3);

        let lambdas = match_lambdas(&home_team, &away_team).unwrap();
        prop_assert!(lambdas.home.is_finite() && lambdas.home >= 0.0);
        prop_assert!(lambdas.away.is_finite() && lambdas.away >= 0.0);

        let probs = predict_outcome(&home_team, &away_team).unwrap();
        let total = probs.home_win + probs.draw + probs.away_win;
        prop_assert!((total - 1.0).abs() < 1e-6, "total={total}");
    }

    // 9. Final standings are consistent with the played season
    #[test]
    fn standings_invariants(
        half in 1..=5usize,
        seed in any::<u64>(),
        ratings in prop::collection::vec((rating(), rating(), rating(), rating()), 1..6),
    ) {
        let n = 2 * half;
        let mut league = League::new(registry_with(n, &ratings), Some(seed)).unwrap();
        league.play_all().unwrap();

        let last_round = league.schedule().rounds().len() - 1;
        let standings = generate_standings(league.schedule(), last_round, &mut ChaCha8Rng::seed_from_u64(seed));
        let table = standings.table();
        prop_assert_eq!(table.len(), n);

        let mut goals_for = 0;
        let mut goals_against = 0;
        for stat in table {
            prop_assert_eq!(stat.matches as usize, 2 * (n - 1));
            prop_assert_eq!(stat.won + stat.drawn + stat.lost, stat.matches);
            prop_assert_eq!(stat.points, POINTS_FOR_WIN * stat.won + POINTS_FOR_DRAW * stat.drawn);
            prop_assert_eq!(stat.goals_diff, stat.goals_for as i32 - stat.goals_against as i32);
            goals_for += stat.goals_for;
            goals_against += stat.goals_against;
        }
        prop_assert_eq!(goals_for, goals_against);

        for pair in table.windows(2) {
            prop_assert!(pair[0].points >= pair[1].points);
            if pair[0].points == pair[1].points {
                prop_assert!(pair[0].goals_diff >= pair[1].goals_diff);
                if pair[0].goals_diff == pair[1].goals_diff {
                    prop_assert!(pair[0].goals_for >= pair[1].goals_for);
                }
            }
        }
    }

    // 10. Dynamic attributes stay in range over a whole season
    #[test]
    fn dynamic_attributes_clamped(seed in any::<u64>()) {
        let ratings = [(9.0, 9.0, 9.0, 9.0), (1.0, 1.0, 1.0, 1.0), (5.0, 5.0, 5.0, 5.0)];
        let mut league = League::new(registry_with(6, &ratings), Some(seed)).unwrap();
        league.play_all().unwrap();
        for team in league.registry().teams() {
            prop_assert!((0.0..=10.0).contains(&team.dynamic.morale));
            prop_assert!((0.0..=10.0).contains(&team.dynamic.physical_condition));
            prop_assert_eq!(team.dynamic.recent_len(), 5);
        }
    }
}

#[test]
fn four_team_season_end_to_end() {
    let registry = TeamRegistry::try_from(vec![
        Team::new("Alpha", 8.0, 7.0, 7.5, 6.0),
        Team::new("Bravo", 6.0, 6.0, 6.0, 6.0),
        Team::new("Charlie", 4.0, 5.0, 4.5, 5.0),
        Team::new("Delta", 2.0, 3.0, 2.5, 4.0),
    ])
    .unwrap();

    let mut league = League::new(registry, Some(2024)).unwrap();
    let mut rounds_played = 0;
    while !league.is_finished() {
        league.play_next_round().unwrap();
        rounds_played += 1;
        let standings = league.standings().unwrap();
        assert_eq!(standings.round_index() + 1, rounds_played);
        assert_eq!(standings.previous_table().is_some(), rounds_played > 1);
    }
    assert_eq!(rounds_played, 6);

    let champion = league.champion().unwrap();
    let standings = league.standings().unwrap();
    let top_points = standings.leader().unwrap().points;
    let champion_stat = standings.table().iter().find(|s| s.name == champion).unwrap();
    assert_eq!(champion_stat.points, top_points);
    assert_eq!(standings.table().iter().map(|s| s.matches).sum::<u32>(), 24);
}

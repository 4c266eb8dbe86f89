//! League simulation CLI
//!
//! Plays a double round-robin season from a directory of team records.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use league_core::render::{
    render_champion, render_champion_distribution, render_prediction, render_round, render_schedule,
    render_standings,
};
use league_core::{
    champion_distribution, load_teams, predict_outcome, Config, League, LeagueError, TemplateNarrator,
};

#[derive(Parser)]
#[command(name = "league-sim")]
#[command(about = "Double round-robin league simulation", long_about = None)]
struct Cli {
    /// Config file path (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory with one JSON record per team
    #[arg(short, long)]
    teams: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full season
    Play {
        /// Wait for ENTER between rounds
        #[arg(long)]
        interactive: bool,
        /// Narrate a random event between interactive rounds
        #[arg(long)]
        narrate: bool,
    },
    /// Show result probabilities for a single fixture
    Predict {
        /// Home team name
        home: String,
        /// Away team name
        away: String,
    },
    /// Simulate many seasons and rank teams by titles won
    Champions {
        /// Number of seasons (default from config)
        #[arg(long)]
        runs: Option<usize>,
    },
    /// Write the effective settings to a config file
    InitConfig {
        /// Destination path (JSON)
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        let code = match e.downcast_ref::<LeagueError>() {
            // Inconsistent fixtures or tables are bugs, not bad input
            Some(err) if err.is_consistency_violation() => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(teams) = cli.teams {
        config.teams_dir = teams;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    if let Commands::InitConfig { path } = &cli.command {
        config.save(path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let registry = load_teams(&config.teams_dir)
        .with_context(|| format!("Unable to load teams from {}", config.teams_dir.display()))?;

    match cli.command {
        Commands::Play { interactive, narrate } => {
            config.narrate_events |= narrate;
            let mut league = League::new(registry, config.seed).context("Unable to generate fixtures")?;
            if interactive {
                play_interactive(&mut league, &config)
            } else {
                play_non_interactive(&mut league)
            }
        }
        Commands::Predict { home, away } => {
            let (Some(home_team), Some(away_team)) = (registry.get(&home), registry.get(&away)) else {
                bail!("Unknown team in fixture {} x {}", home, away);
            };
            let probs = predict_outcome(home_team, away_team)?;
            print!("{}", render_prediction(&home, &away, &probs));
            Ok(())
        }
        Commands::Champions { runs } => {
            let runs = runs.unwrap_or(config.champion_runs);
            let ranking = champion_distribution(&registry, runs, config.seed)?;
            print!("{}", render_champion_distribution(&ranking, runs));
            Ok(())
        }
        Commands::InitConfig { .. } => Ok(()),
    }
}

fn play_non_interactive(league: &mut League) -> Result<()> {
    league.play_all()?;
    print!("{}", render_schedule(league.schedule()));

    if let Some(standings) = league.standings() {
        print!("{}", render_standings(&standings, league.registry())?);
    }
    if let Some(champion) = league.champion() {
        println!();
        print!("{}", render_champion(&champion));
    }
    Ok(())
}

fn play_interactive(league: &mut League, config: &Config) -> Result<()> {
    let narrator = TemplateNarrator;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    println!("Press [ENTER] to play the next round.");
    while !league.is_finished() {
        line.clear();
        input.read_line(&mut line)?;

        league.play_next_round()?;
        let round_index = league.schedule().current_round().unwrap_or(0);
        if let Some(round) = league.schedule().last_played_round() {
            print!("{}", render_round(round_index, round));
        }
        if let Some(standings) = league.standings() {
            print!("{}", render_standings(&standings, league.registry())?);
        }

        if league.is_finished() {
            if let Some(champion) = league.champion() {
                println!();
                print!("{}", render_champion(&champion));
            }
            break;
        }

        if config.narrate_events {
            line.clear();
            input.read_line(&mut line)?;
            if let Some(event) = league.random_event(&narrator, config.event_stddev) {
                println!("Round [{}] Event:", round_index + 1);
                println!("{}\n", event);
            }
        }
    }
    Ok(())
}

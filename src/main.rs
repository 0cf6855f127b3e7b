//! Mare Nostrum - headless campaign runner
//!
//! Drives the simulation at a fixed tick cadence, prints the event log
//! as it grows, and reports a final summary. Rome idles under player
//! control unless --observer hands both factions to the opponent policy.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use mare_nostrum::core::config::SimulationConfig;
use mare_nostrum::core::error::Result;
use mare_nostrum::core::types::Faction;
use mare_nostrum::engine::Simulation;
use mare_nostrum::narrative::{LlmNarrator, NarrativeHandle};
use mare_nostrum::world::events::{GameEvent, LogEntry};

#[derive(Parser, Debug)]
#[command(name = "mare-nostrum", about = "Punic Wars campaign simulation")]
struct Args {
    /// RNG seed for combat and the opponent policy
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Days to simulate; 0 runs until a capital falls
    #[arg(long, default_value_t = 3650)]
    days: u64,

    /// Tick period in milliseconds; 0 runs as fast as possible
    #[arg(long, default_value_t = 0)]
    period_ms: u64,

    /// Let the opponent policy command both factions
    #[arg(long)]
    observer: bool,

    /// Optional TOML config override
    #[arg(long)]
    config: Option<PathBuf>,

    /// Event log lines to show in the final summary
    #[arg(long, default_value_t = 20)]
    tail: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mare_nostrum=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load_from_toml(path)?,
        None => SimulationConfig::default(),
    };
    config.validate()?;

    let world = mare_nostrum::world::World::standard(&config);
    let mut sim = Simulation::new(world, config, args.seed);
    if args.observer {
        sim = sim.observer();
    }

    // Narrative flavor is optional; without credentials the deterministic
    // fallback texts carry the log
    match LlmNarrator::from_env() {
        Ok(narrator) => {
            sim = sim.with_narrative(NarrativeHandle::spawn(Arc::new(narrator)));
            tracing::info!("narrative service attached");
        }
        Err(_) => {
            tracing::warn!("LLM_API_KEY not set - using fallback battle reports");
        }
    }

    println!("=== MARE NOSTRUM ===");
    println!(
        "seed {} | {} | {} days max",
        args.seed,
        if args.observer { "observer" } else { "player: Rome" },
        args.days
    );
    println!();

    let mut interval = (args.period_ms > 0)
        .then(|| tokio::time::interval(std::time::Duration::from_millis(args.period_ms)));

    let mut printed = 0;
    loop {
        if let Some(interval) = interval.as_mut() {
            interval.tick().await;
        }

        // Ticks while the game is over are skipped, not queued
        if sim.world.game_over() {
            break;
        }
        if args.days > 0 && sim.world.day >= args.days {
            break;
        }

        sim.tick();

        for entry in &sim.log.entries()[printed..] {
            print_entry(entry);
        }
        printed = sim.log.len();
    }

    print_summary(&sim, args.tail);
    Ok(())
}

fn print_entry(entry: &LogEntry) {
    let day = entry.day;
    match &entry.event {
        GameEvent::SeasonChanged { winter } => {
            println!(
                "[day {day}] {}",
                if *winter { "Winter closes the campaign season" } else { "Spring opens the seas" }
            );
        }
        GameEvent::AnnualIncome { faction, amount } => {
            println!("[day {day}] {faction} collects {amount} gold in tribute");
        }
        GameEvent::UnitRecruited { faction, kind, node } => {
            println!("[day {day}] {faction} musters a {kind} at {node}");
        }
        GameEvent::NodeFortified { node, level } => {
            println!("[day {day}] {node} fortified to level {level}");
        }
        GameEvent::BattleFought { report, .. } => {
            println!("[day {day}] {report}");
        }
        GameEvent::NodeCaptured { node, by } => {
            println!("[day {day}] {by} takes {node}");
        }
        GameEvent::GameOver { winner } => {
            println!("[day {day}] *** {winner} wins the war ***");
        }
        GameEvent::YearlyReport { summary } => {
            println!("[day {day}] {summary}");
        }
        GameEvent::NarrativeDelivered { describes_day, text } => {
            println!("[day {day}] (chronicle of day {describes_day}) {text}");
        }
    }
}

fn print_summary(sim: &Simulation, tail: usize) {
    println!();
    println!("=== SUMMARY (day {}) ===", sim.world.day);
    match sim.world.winner {
        Some(winner) => println!("Victor: {winner}"),
        None => println!("The war drags on"),
    }

    for faction in [Faction::Rome, Faction::Carthage] {
        let settlements = sim
            .world
            .owned_nodes(faction)
            .filter(|n| !n.kind.is_sea())
            .count();
        let zones = sim
            .world
            .owned_nodes(faction)
            .filter(|n| n.kind.is_sea())
            .count();
        let units = sim
            .world
            .units
            .iter()
            .filter(|u| u.faction == faction)
            .count();
        println!(
            "{faction}: {settlements} settlements, {zones} sea zones, {units} units, {} gold",
            sim.world.gold(faction)
        );
    }

    println!();
    println!("--- last {} log entries ---", tail.min(sim.log.len()));
    for entry in sim.log.recent(tail) {
        print_entry(entry);
    }
}

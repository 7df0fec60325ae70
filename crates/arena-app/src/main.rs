//! ARENA headless runner: plays a scripted session and prints a summary.
//!
//! Usage:
//!   cargo run --release -p arena-app -- --frames 3600 --seed 7
//!   LOG_FORMAT=json RUST_LOG=arena_sim=debug cargo run -p arena-app -- --brute-force

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use arena_app::game_loop::{self, LoopOptions};
use arena_app::script::SweepScript;
use arena_app::settings::{self, Overrides};
use arena_sim::ArenaEngine;

#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "Run the arena shooter simulation headless with scripted input")]
struct Args {
    /// JSON file with simulation settings. Missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum frames to run
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Enemies spawned at session start
    #[arg(long)]
    enemies: Option<usize>,

    /// Test every bullet against every enemy instead of using the quadtree
    #[arg(long)]
    brute_force: bool,

    /// Remove a bullet after the frame it first hits something
    #[arg(long)]
    consume_hits: bool,

    /// Hold 60 frames per second instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Write the final render snapshot to this file as JSON
    #[arg(long)]
    dump_snapshot: Option<PathBuf>,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = settings::load_config(args.config.as_deref())?;
    let config = settings::resolve(
        config,
        &Overrides {
            seed: args.seed,
            enemies: args.enemies,
            brute_force: args.brute_force,
            consume_hits: args.consume_hits,
        },
    )?;
    tracing::info!(
        seed = config.seed,
        enemies = config.enemy_count,
        collision = ?config.collision_mode,
        hits = ?config.hit_policy,
        "starting arena"
    );

    let mut engine = ArenaEngine::new(config).context("failed to start simulation")?;
    let started = Instant::now();
    let (summary, last_snapshot) = game_loop::run_game_loop(
        &mut engine,
        &mut SweepScript::default(),
        LoopOptions {
            frames: args.frames,
            realtime: args.realtime,
            stop_on_ending: true,
        },
    );
    let elapsed = started.elapsed();
    engine
        .validate()
        .context("pool invariants violated at end of run")?;

    println!("{summary}");
    println!(
        "  Wall time:     {:.3}s ({:.1} frames/s)",
        elapsed.as_secs_f64(),
        summary.frames as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );

    if let Some(path) = &args.dump_snapshot {
        let snapshot = last_snapshot.unwrap_or_default();
        let json = serde_json::to_string_pretty(&snapshot).context("failed to serialize snapshot")?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "snapshot written");
    }
    Ok(())
}

//! Disc Sim entry point
//!
//! Headless driver: builds a seeded population, feeds the stepper a fixed
//! frame time and logs the status line. Rendering and keyboard input are
//! left to a front end; `--toggle-every` stands in for the broad-phase key.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use disc_sim::setup::{seeded_rng, spawn_population};
use disc_sim::sim::{BroadPhase, World};
use disc_sim::SimConfig;

#[derive(Parser, Debug)]
#[command(name = "disc-sim", about = "Headless 2D disc collision simulator")]
struct Args {
    /// JSON config file (missing fields take defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Population seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of bodies
    #[arg(short, long)]
    bodies: Option<usize>,

    /// Rendered frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Real time per rendered frame (seconds)
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_time: f32,

    /// Start with the quadtree broad phase
    #[arg(short, long)]
    partitioned: bool,

    /// Flip the broad phase every N frames (0 = never)
    #[arg(long, default_value_t = 0)]
    toggle_every: u32,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            SimConfig::from_json(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.population.seed = seed;
    }
    if let Some(count) = args.bodies {
        config.population.count = count;
    }
    if args.partitioned {
        config.broad_phase = BroadPhase::Partitioned;
    }

    config.validate()?;

    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    if args.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    log::info!("Disc Sim starting with seed {}", config.population.seed);
    let mut rng = seeded_rng(config.population.seed);
    let bodies = spawn_population(
        &config.population,
        config.world_width,
        config.world_height,
        &mut rng,
    );
    let mut world = World::new(config, bodies);
    let energy_start = world.kinetic_energy();

    let ticks_per_second = (1.0 / world.config().dt).round() as u64;
    let mut last_report = 0;
    for frame in 1..=args.frames {
        world.step(args.frame_time);

        if args.toggle_every > 0 && frame % args.toggle_every == 0 {
            world.toggle_broad_phase();
        }
        let second = world.tick_count() / ticks_per_second.max(1);
        if second > last_report {
            last_report = second;
            log::info!("[t={}s] {}", second, world.status_line());
        }
    }

    log::info!(
        "Done: {} ticks, kinetic energy {:.1} -> {:.1}, momentum {:?}",
        world.tick_count(),
        energy_start,
        world.kinetic_energy(),
        world.momentum()
    );
    println!("{}", world.status_line());
    Ok(())
}

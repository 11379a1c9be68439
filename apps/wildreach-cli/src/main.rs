use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use tracing_subscriber::EnvFilter;
use wildreach_common::GridConfig;
use wildreach_scene::RecordingScene;
use wildreach_stream::TickTimer;
use wildreach_terrain::{Biome, Heightfield};
use wildreach_world::{Environment, GameWorld};

#[derive(Parser)]
#[command(name = "wildreach-cli", about = "CLI tool for wildreach terrain streaming")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Optional JSON grid configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Sample the heightfield and biome at a world position
    Probe {
        #[arg(long)]
        x: f32,
        #[arg(long)]
        z: f32,
    },
    /// Simulate a straight-line walk and print per-tick streaming activity
    Walk {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "32")]
        steps: usize,
        /// World units moved per tick
        #[arg(long, default_value = "25.0")]
        stride: f32,
        /// Heading in degrees (0 = +X axis)
        #[arg(long, default_value = "0.0")]
        heading: f32,
    },
    /// Load around the origin, teleport once, and print the turnover
    Teleport {
        #[arg(long, default_value = "5000.0")]
        x: f32,
        #[arg(long, default_value = "5000.0")]
        z: f32,
    },
}

fn load_grid_config(path: Option<&Path>) -> anyhow::Result<GridConfig> {
    let Some(path) = path else {
        return Ok(GridConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config: GridConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing grid config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn demo_world(config: GridConfig) -> anyhow::Result<GameWorld<RecordingScene>> {
    let mut world = GameWorld::new(config, RecordingScene::new())?;
    // The fixed set-piece catalog: placed once, alive for the process.
    world.place(
        Vec3::new(40.0, 0.0, 20.0),
        Environment::Village {
            houses: 14,
            has_well: true,
        },
    );
    world.place(
        Vec3::new(60.0, 0.0, -30.0),
        Environment::Market {
            stalls: 9,
            covered: false,
        },
    );
    world.place(
        Vec3::new(180.0, 0.0, 120.0),
        Environment::Forest {
            trees: 340,
            canopy_density: 0.8,
        },
    );
    world.place(
        Vec3::new(-360.0, 0.0, 240.0),
        Environment::Mountain {
            peak_height: 820.0,
            snow_line: 600.0,
        },
    );
    world.place(
        Vec3::new(640.0, 0.0, -640.0),
        Environment::Temple {
            pillars: 12,
            collapsed: true,
        },
    );
    Ok(world)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_grid_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("wildreach-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("stream: {}", wildreach_stream::crate_info());
            println!("world: {}", wildreach_world::crate_info());
            println!(
                "config: cell_size={} render_distance={} max_resident={:?}",
                config.cell_size, config.render_distance, config.max_resident
            );
        }
        Commands::Probe { x, z } => {
            let field = Heightfield::default();
            let height = field.height(x, z);
            let biome = Biome::classify(x.hypot(z));
            println!("({x:.1}, {z:.1}): height={height:.2} biome={biome}");
        }
        Commands::Walk {
            steps,
            stride,
            heading,
        } => {
            let mut world = demo_world(config)?;
            let dir = Vec3::new(
                heading.to_radians().cos(),
                0.0,
                heading.to_radians().sin(),
            );
            let mut timer = TickTimer::new(steps.max(1));

            println!("Walking {steps} ticks at {stride} units/tick, heading {heading} deg");
            for step in 0..steps {
                world.set_player_position(dir * stride * step as f32);
                let report = world.tick();
                timer.record(report.duration);
                if !report.created.is_empty() || !report.destroyed.is_empty() {
                    println!(
                        "  tick {step:>4}: +{} -{} resident={}",
                        report.created.len(),
                        report.destroyed.len(),
                        report.resident
                    );
                }
            }

            println!("{}", world.summary());
            println!(
                "Scene: created={} destroyed={} live={}",
                world.scene().created(),
                world.scene().destroyed(),
                world.scene().live_count()
            );
            println!(
                "Tick time: avg={:?} min={:?} max={:?}",
                timer.average(),
                timer.min(),
                timer.max()
            );
        }
        Commands::Teleport { x, z } => {
            let mut world = demo_world(config)?;

            let initial = world.tick();
            println!(
                "Initial load at origin: +{} resident={}",
                initial.created.len(),
                initial.resident
            );

            world.set_player_position(Vec3::new(x, 0.0, z));
            let report = world.tick();
            println!(
                "Teleport to ({x:.0}, {z:.0}): +{} -{} resident={} in {:?}",
                report.created.len(),
                report.destroyed.len(),
                report.resident,
                report.duration
            );
            println!("{}", world.summary());
        }
    }

    Ok(())
}

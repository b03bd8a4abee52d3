use std::path::PathBuf;

use anyhow::{Context, Result};
use circlesim_core::{Beatmap, Replay, Simulator};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod report;

#[derive(Parser)]
#[command(name = "circlesim")]
#[command(about = "Re-simulates osu! standard replays against their beatmaps", version)]
struct Args {
    /// Path to the .osu beatmap file
    beatmap: PathBuf,

    /// Path to the .osr replay file
    replay: PathBuf,

    /// Emit the result as JSON instead of the console summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("circlesim=info".parse()?)
                .add_directive("circlesim_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let beatmap = Beatmap::from_path(&args.beatmap)
        .with_context(|| format!("failed to parse beatmap {}", args.beatmap.display()))?;
    info!(
        "Loaded beatmap: {} - {} [{}] with {} objects",
        beatmap.artist,
        beatmap.title,
        beatmap.version,
        beatmap.hit_objects.len()
    );

    let replay = Replay::from_path(&args.replay)
        .with_context(|| format!("failed to parse replay {}", args.replay.display()))?;
    info!(
        "Loaded replay by {} with {} frames",
        replay.player_name.as_deref().unwrap_or("<unknown>"),
        replay.frames.len()
    );

    let judgement = Simulator::new(&beatmap, &replay)
        .run()
        .context("simulation failed")?;

    if args.json {
        println!("{}", report::format_json(&beatmap, &replay, judgement)?);
    } else {
        print!("{}", report::format_console(&beatmap, &replay, judgement));
    }

    Ok(())
}

//! Convert an ASCII frames file into a looping SVG animation.

use std::path::PathBuf;
use std::{panic, process};

use anyhow::{Context, Result};
use cascii_profile::exit_codes::{exit_code_for, EXIT_PANIC, EXIT_SUCCESS};
use cascii_profile::loader::build_animation_file;
use cascii_profile::{logger, AnimationSummary, Config};
use clap::Parser;
use log::{error, info};

#[derive(Parser, Debug)]
#[command(version, about = "Build a looping SVG animation from ASCII frames")]
struct Args {
    /// TOML config file with an [animation] table
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frames file (default: frames.txt)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// SVG to write (default: animation.svg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Lines per frame
    #[arg(long)]
    frame_height: Option<usize>,

    /// Loop duration in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Drop a short block at the next blank line instead of carrying it over
    #[arg(long)]
    reset_short_blocks: bool,

    /// Report frame count and timing of an existing animation instead of building
    #[arg(long, value_name = "SVG")]
    inspect: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        process::exit(EXIT_PANIC);
    }));

    let args = Args::parse();
    logger::init(args.log_level.as_deref());

    let code = match run(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            exit_code_for(&e)
        }
    };
    process::exit(code);
}

fn run(args: Args) -> Result<()> {
    if let Some(path) = args.inspect {
        return inspect(&path);
    }

    let mut config = Config::load_or_default(args.config.as_deref())?.animation;
    if let Some(input) = args.input {
        config.input = input;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(height) = args.frame_height {
        config.frame_height = height;
    }
    if let Some(duration) = args.duration {
        config.duration = duration;
    }
    config.reset_short_blocks |= args.reset_short_blocks;

    build_animation_file(&config)?;
    Ok(())
}

fn inspect(path: &std::path::Path) -> Result<()> {
    let svg = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let summary = AnimationSummary::from_svg(&svg).with_context(|| format!("inspecting {}", path.display()))?;

    info!("{}: {} frames", path.display(), summary.frame_count);
    match (summary.duration, summary.slot_duration()) {
        (Some(duration), Some(slot)) => info!("loop {duration}s, each frame shown for {slot:.4}s"),
        _ => info!("no frames, nothing is animated"),
    }
    Ok(())
}

//! Refresh the profile stat cards and the README joke.

use std::path::{Path, PathBuf};
use std::{panic, process};

use anyhow::{Context, Result};
use cascii_profile::exit_codes::{exit_code_for, EXIT_PANIC, EXIT_SUCCESS};
use cascii_profile::github::{GithubClient, QueryCounter};
use cascii_profile::patch::text_nodes;
use cascii_profile::stats::refresh_profile;
use cascii_profile::timing::{format_timing, perf_counter};
use cascii_profile::{format_age, logger, Config, GithubCredentials};
use chrono::Local;
use clap::Parser;
use log::{error, info};

#[derive(Parser, Debug)]
#[command(version, about = "Update stat card uptime and README joke of the day")]
struct Args {
    /// TOML config file with a [stats] table
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Jokes file, a JSON list of strings (default: jokes.json)
    #[arg(long)]
    jokes: Option<PathBuf>,

    /// README to patch (default: README.md)
    #[arg(long)]
    readme: Option<PathBuf>,

    /// Stat card to patch; repeat for several (default: dark_mode.svg, light_mode.svg)
    #[arg(long = "svg", value_name = "SVG")]
    svg_files: Vec<PathBuf>,

    /// Query GitHub for the account id and creation date of USER_NAME
    #[arg(long)]
    fetch_account: bool,

    /// Print every tspan of a stat card with its index, then exit
    #[arg(long, value_name = "SVG")]
    list: Option<PathBuf>,

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
    if let Some(path) = args.list {
        return list(&path);
    }

    let mut config = Config::load_or_default(args.config.as_deref())?.stats;
    if let Some(jokes) = args.jokes {
        config.jokes = jokes;
    }
    if let Some(readme) = args.readme {
        config.readme = readme;
    }
    if !args.svg_files.is_empty() {
        config.svg_files = args.svg_files;
    }

    info!("Calculation times:");
    let today = Local::now().date_naive();

    if args.fetch_account {
        let credentials = GithubCredentials::from_env()?;
        let client = GithubClient::new(credentials.token)?;
        let mut counter = QueryCounter::new();

        let (user, elapsed) = perf_counter(|| client.user_getter(&mut counter, &credentials.user_name));
        let user = user?;
        info!("{}", format_timing("account data", elapsed));
        info!(
            "{} ({}) joined GitHub {} ago",
            credentials.user_name,
            user.id,
            format_age(user.created_at.date_naive(), today)
        );
        info!("GitHub GraphQL API calls: {}", counter);
    }

    let report = refresh_profile(&config, today, &mut rand::thread_rng())?;
    info!("{} of {} stat cards updated", report.updated_cards(), report.cards.len());
    info!("Joke of the day: {}", report.joke);
    Ok(())
}

fn list(path: &Path) -> Result<()> {
    let svg = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    for node in text_nodes(&svg).with_context(|| format!("parsing {}", path.display()))? {
        println!("{} {}", node.index, node.text.as_deref().unwrap_or(""));
    }
    Ok(())
}

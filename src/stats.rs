//! The daily refresh: age text into the stat cards, a joke into the README.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;
use rand::Rng;

use crate::age::format_age;
use crate::jokes::JokePool;
use crate::patch::{patch_readme, patch_stat_file, StatPatch};
use crate::timing::{format_timing, perf_counter};
use crate::StatsConfig;

/// What a refresh changed.
#[derive(Clone, Debug)]
pub struct StatsReport {
    pub age: String,
    pub joke: String,
    /// Outcome per stat card, in config order
    pub cards: Vec<(PathBuf, StatPatch)>,
    /// False when the README marker was missing and the joke was appended
    pub readme_marker_found: bool,
}

impl StatsReport {
    /// Number of cards whose value node was replaced.
    pub fn updated_cards(&self) -> usize {
        self.cards
            .iter()
            .filter(|(_, outcome)| matches!(outcome, StatPatch::Replaced { .. }))
            .count()
    }
}

/// Patch every configured stat card and the README.
///
/// A card without the label is reported and skipped; I/O and parse errors
/// stop the run, possibly after earlier files were already written.
pub fn refresh_profile<R: Rng + ?Sized>(config: &StatsConfig, today: NaiveDate, rng: &mut R) -> Result<StatsReport> {
    let (age, elapsed) = perf_counter(|| format_age(config.birth_date, today));
    info!("{}", format_timing("age calculation", elapsed));

    let pool = JokePool::load(&config.jokes)
        .with_context(|| format!("loading jokes from {}", config.jokes.display()))?;
    let joke = pool.choose(rng).to_string();

    let mut cards = Vec::with_capacity(config.svg_files.len());
    for path in &config.svg_files {
        let outcome = patch_stat_file(path, &config.label, &age)
            .with_context(|| format!("updating {}", path.display()))?;
        cards.push((path.clone(), outcome));
    }

    let readme_marker_found = patch_readme(&config.readme, &config.marker, &config.heading, &joke)
        .with_context(|| format!("updating {}", config.readme.display()))?;

    Ok(StatsReport {
        age,
        joke,
        cards,
        readme_marker_found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const CARD: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><text><tspan class="key">Uptime</tspan>: <tspan class="value">old</tspan></text></svg>"#;

    #[test]
    fn refresh_patches_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = StatsConfig {
            svg_files: vec![dir.path().join("dark_mode.svg"), dir.path().join("light_mode.svg")],
            readme: dir.path().join("README.md"),
            jokes: dir.path().join("jokes.json"),
            ..StatsConfig::default()
        };
        std::fs::write(&config.svg_files[0], CARD).unwrap();
        std::fs::write(&config.svg_files[1], "<svg><text><tspan>Host</tspan></text></svg>").unwrap();
        std::fs::write(&config.readme, "# Hello\n<!-- JOKE HERE -->\n").unwrap();
        std::fs::write(&config.jokes, r#"["Why do Java developers wear glasses? They don't C#."]"#).unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let report = refresh_profile(&config, today, &mut rng).unwrap();

        assert_eq!(report.age, "21 years, 0 months, 1 day");
        assert_eq!(report.updated_cards(), 1);
        assert_eq!(report.cards[1].1, StatPatch::LabelNotFound);
        assert!(report.readme_marker_found);

        let dark = std::fs::read_to_string(&config.svg_files[0]).unwrap();
        assert_eq!(dark, CARD.replace(">old<", ">21 years, 0 months, 1 day<"));
        assert_eq!(
            std::fs::read_to_string(&config.readme).unwrap(),
            format!("# Hello\n### Awful Joke of the Day\n{}\n", report.joke)
        );
    }

    #[test]
    fn missing_jokes_file_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let card = dir.path().join("dark_mode.svg");
        std::fs::write(&card, CARD).unwrap();
        let config = StatsConfig {
            svg_files: vec![card.clone()],
            readme: dir.path().join("README.md"),
            jokes: dir.path().join("jokes.json"),
            ..StatsConfig::default()
        };

        let today = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        let err = refresh_profile(&config, today, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(err.downcast_ref::<crate::error::JokeError>().is_some());
        assert_eq!(std::fs::read_to_string(&card).unwrap(), CARD);
    }
}

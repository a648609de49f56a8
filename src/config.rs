//! Run configuration for both pipelines.
//!
//! Every field has a default, so a missing config file or a partial one is
//! fine. Overrides come from a TOML file with optional `[animation]` and
//! `[stats]` tables.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::parser::BlockMode;

/// Environment variable holding the GitHub token.
pub const ACCESS_TOKEN_VAR: &str = "ACCESS_TOKEN";
/// Environment variable holding the GitHub login to query.
pub const USER_NAME_VAR: &str = "USER_NAME";

/// Settings for turning a frames file into an SVG animation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Expected columns per frame; wider frames are reported
    pub frame_width: usize,
    /// Lines per frame
    pub frame_height: usize,
    /// Horizontal position of every line
    pub x: f64,
    /// Vertical position of the first line
    pub y_start: f64,
    /// Vertical distance between lines
    pub line_height: f64,
    /// Length of one full loop, in seconds
    pub duration: f64,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub font_family: String,
    pub font_size: f64,
    pub fill: String,
    /// Discard short blocks at each blank line instead of carrying them over
    pub reset_short_blocks: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("frames.txt"),
            output: PathBuf::from("animation.svg"),
            frame_width: 91,
            frame_height: 91,
            x: 470.0,
            y_start: 0.0,
            line_height: 15.0,
            duration: 15.0,
            canvas_width: 970,
            canvas_height: 530,
            font_family: "monospace".to_string(),
            font_size: 12.0,
            fill: "#c9d1d9".to_string(),
            reset_short_blocks: false,
        }
    }
}

impl AnimationConfig {
    /// Reject values that would produce an unplayable or broken document.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "duration must be a positive number of seconds, got {}",
                self.duration
            )));
        }
        for (name, value) in [("font_family", &self.font_family), ("fill", &self.fill)] {
            if value.contains(['<', '>', '&']) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must not contain '<', '>' or '&', got {value:?}"
                )));
            }
        }
        Ok(())
    }

    /// Block handling derived from `reset_short_blocks`.
    pub fn block_mode(&self) -> BlockMode {
        if self.reset_short_blocks {
            BlockMode::Reset
        } else {
            BlockMode::Carry
        }
    }
}

/// Settings for the daily stat card and README refresh.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub birth_date: NaiveDate,
    /// Stat cards to patch, in order
    pub svg_files: Vec<PathBuf>,
    pub readme: PathBuf,
    pub jokes: PathBuf,
    /// Text identifying the node that precedes the age value
    pub label: String,
    /// README line replaced by the joke block
    pub marker: String,
    pub heading: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            birth_date: NaiveDate::from_ymd_opt(2003, 5, 13).unwrap_or_default(),
            svg_files: vec![PathBuf::from("dark_mode.svg"), PathBuf::from("light_mode.svg")],
            readme: PathBuf::from("README.md"),
            jokes: PathBuf::from("jokes.json"),
            label: "Uptime".to_string(),
            marker: "<!-- JOKE HERE -->".to_string(),
            heading: "### Awful Joke of the Day".to_string(),
        }
    }
}

/// Top-level config file layout.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub animation: AnimationConfig,
    pub stats: StatsConfig,
}

impl Config {
    /// Parse a TOML string into `Config`.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Token and login used for the GraphQL query.
#[derive(Clone)]
pub struct GithubCredentials {
    pub token: String,
    pub user_name: String,
}

impl std::fmt::Debug for GithubCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubCredentials")
            .field("token", &"<redacted>")
            .field("user_name", &self.user_name)
            .finish()
    }
}

impl GithubCredentials {
    /// Read `ACCESS_TOKEN` and `USER_NAME` from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ACCESS_TOKEN_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingEnv(ACCESS_TOKEN_VAR))?;
        let user_name = lookup(USER_NAME_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingEnv(USER_NAME_VAR))?;
        Ok(Self { token, user_name })
    }
}

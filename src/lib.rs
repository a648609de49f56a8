//! # cascii-profile
//!
//! Profile automation for ASCII art and stat cards.
//!
//! This crate provides two independent pipelines:
//! - Grouping a text file of ASCII frames into a looping SVG animation
//!   (`ascii-to-svg`)
//! - Refreshing SVG stat cards with a calendar-aware age and a README with a
//!   joke of the day (`profile-stats`), optionally querying GitHub for the
//!   account creation date
//!
//! ## Example
//!
//! ```rust
//! use cascii_profile::{parse_frames_str, Animation, AnimationConfig, AnimationSummary, BlockMode};
//!
//! let text = "(o.o)\n\n(-.-)\n";
//! let (frames, _) = parse_frames_str(text, 1, BlockMode::Carry);
//!
//! let config = AnimationConfig { duration: 2.0, ..AnimationConfig::default() };
//! let svg = Animation::new(frames, config).to_svg();
//!
//! let summary = AnimationSummary::from_svg(&svg).unwrap();
//! assert_eq!(summary.frame_count, 2);
//! assert_eq!(summary.slot_duration(), Some(1.0));
//! ```

pub mod age;
mod animation;
pub mod config;
mod data;
pub mod error;
pub mod exit_codes;
pub mod github;
pub mod jokes;
pub mod loader;
pub mod logger;
mod parser;
pub mod patch;
pub mod render;
pub mod stats;
pub mod timing;

pub use age::{format_age, Age};
pub use animation::{slot_duration, Animation, AnimationSummary};
pub use config::{AnimationConfig, Config, GithubCredentials, StatsConfig};
pub use data::{Frame, Visibility, VisibilitySchedule};
pub use parser::{parse_frames, parse_frames_str, BlockMode, ParseStats};
pub use render::{RenderConfig, TextRun};

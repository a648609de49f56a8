//! Loading frames from a text file and writing the finished animation.

use std::path::Path;

use log::{debug, info};

use crate::error::LoadError;
use crate::parser::{parse_frames_str, ParseStats};
use crate::{Animation, AnimationConfig, Frame};

/// Frames read from disk together with the parse counters.
#[derive(Clone, Debug)]
pub struct LoadedFrames {
    pub frames: Vec<Frame>,
    pub stats: ParseStats,
}

/// Read `path` and group its lines into frames of `config.frame_height`.
pub fn load_frames(path: &Path, config: &AnimationConfig) -> Result<LoadedFrames, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (frames, stats) = parse_frames_str(&text, config.frame_height, config.block_mode());
    debug!(
        "{}: {} lines, {} frames, {} partial blocks dropped",
        path.display(),
        stats.lines,
        stats.frames,
        stats.discarded_blocks
    );
    info!("Loaded {} frames.", frames.len());

    Ok(LoadedFrames { frames, stats })
}

/// Load `config.input`, render it, and write `config.output`.
///
/// The config is validated first; nothing is read or written when it fails.
///
/// Returns the number of frames written.
pub fn build_animation_file(config: &AnimationConfig) -> Result<usize, LoadError> {
    config.validate()?;
    let loaded = load_frames(&config.input, config)?;
    let count = loaded.frames.len();
    let svg = Animation::new(loaded.frames, config.clone()).to_svg();

    std::fs::write(&config.output, svg).map_err(|source| LoadError::Io {
        path: config.output.clone(),
        source,
    })?;
    info!("SVG written to {}", config.output.display());

    Ok(count)
}

//! Grouping of flat text lines into fixed-height frames.

use crate::Frame;

/// What happens to a partial block when a blank line arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlockMode {
    /// Keep accumulating: a short block runs into the following one.
    #[default]
    Carry,
    /// Drop the partial block and start fresh after every blank line.
    Reset,
}

/// Counters gathered while parsing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines consumed, blank ones included
    pub lines: usize,
    /// Frames sealed
    pub frames: usize,
    /// Partial blocks thrown away (only in `BlockMode::Reset`, or left over at end of input)
    pub discarded_blocks: usize,
}

/// Returns true when a line separates frames.
#[inline]
fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Parse text lines into frames of exactly `height` lines.
///
/// Frames are separated by blank lines. Blocks that do not hold exactly
/// `height` lines when a separator (or the end of input) is reached are never
/// emitted. In [`BlockMode::Carry`] such a short block is kept and grows with
/// the next block; in [`BlockMode::Reset`] it is discarded.
///
/// ## Example
///
/// ```rust
/// use cascii_profile::{parse_frames, BlockMode};
///
/// let text = "ab\ncd\n\nef\ngh\n";
/// let (frames, stats) = parse_frames(text.lines(), 2, BlockMode::Carry);
///
/// assert_eq!(frames.len(), 2);
/// assert_eq!(frames[1].lines(), ["ef", "gh"]);
/// assert_eq!(stats.frames, 2);
/// ```
pub fn parse_frames<'a, I>(lines: I, height: usize, mode: BlockMode) -> (Vec<Frame>, ParseStats)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut frames = Vec::new();
    let mut stats = ParseStats::default();
    let mut current: Vec<String> = Vec::with_capacity(height);

    for line in lines {
        stats.lines += 1;

        if !is_blank(line) {
            current.push(line.to_string());
            continue;
        }

        if height > 0 && current.len() == height {
            frames.push(Frame::new(std::mem::take(&mut current)));
        } else if mode == BlockMode::Reset && !current.is_empty() {
            current.clear();
            stats.discarded_blocks += 1;
        }
    }

    // No trailing blank line after the last frame
    if current.len() == height && height > 0 {
        frames.push(Frame::new(current));
    } else if !current.is_empty() {
        stats.discarded_blocks += 1;
    }

    stats.frames = frames.len();
    (frames, stats)
}

/// Parse a whole text buffer; `\n` and `\r\n` line endings are accepted.
pub fn parse_frames_str(text: &str, height: usize, mode: BlockMode) -> (Vec<Frame>, ParseStats) {
    parse_frames(text.lines(), height, mode)
}

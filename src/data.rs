//! Core data structures for ASCII frames and their visibility schedules.

use std::fmt;

/// One still of an ASCII animation: a fixed number of raw text lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<String>,
}

impl Frame {
    /// Create a frame from its lines.
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Lines of the frame, top to bottom.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines in the frame.
    #[inline]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Width of the widest line, in characters.
    pub fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Get the frame dimensions (columns, rows).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }
}

/// Visibility of a frame group during one slot of the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    /// Value of the SVG `display` attribute for this state.
    #[inline]
    pub fn as_display(self) -> &'static str {
        match self {
            Visibility::Shown => "inline",
            Visibility::Hidden => "none",
        }
    }

    /// Parse a `display` value back into a state.
    pub fn from_display(value: &str) -> Option<Self> {
        match value.trim() {
            "inline" => Some(Visibility::Shown),
            "none" => Some(Visibility::Hidden),
            _ => None,
        }
    }
}

/// Step-function toggle for frame `index` of `total`.
///
/// Exactly one slot is [`Visibility::Shown`]: the frame's own.
///
/// ```rust
/// use cascii_profile::VisibilitySchedule;
///
/// let schedule = VisibilitySchedule::new(1, 3);
/// assert_eq!(schedule.to_string(), "none;inline;none");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilitySchedule {
    states: Vec<Visibility>,
}

impl VisibilitySchedule {
    /// Build the schedule for frame `index` among `total` frames.
    pub fn new(index: usize, total: usize) -> Self {
        let states = (0..total)
            .map(|slot| {
                if slot == index {
                    Visibility::Shown
                } else {
                    Visibility::Hidden
                }
            })
            .collect();
        Self { states }
    }

    /// Parse a `;`-separated `values` attribute. Unknown states yield `None`.
    pub fn parse(values: &str) -> Option<Self> {
        values
            .split(';')
            .map(Visibility::from_display)
            .collect::<Option<Vec<_>>>()
            .map(|states| Self { states })
    }

    /// Per-slot states.
    #[inline]
    pub fn states(&self) -> &[Visibility] {
        &self.states
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Index of the single shown slot, if the schedule is one-hot.
    pub fn shown_slot(&self) -> Option<usize> {
        let mut shown = self
            .states
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Visibility::Shown)
            .map(|(i, _)| i);
        match (shown.next(), shown.next()) {
            (Some(i), None) => Some(i),
            _ => None,
        }
    }
}

impl fmt::Display for VisibilitySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, state) in self.states.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            f.write_str(state.as_display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dimensions() {
        let frame = Frame::new(vec!["ABC".into(), "DEFG".into(), "H".into()]);
        assert_eq!(frame.dimensions(), (4, 3));
        assert_eq!(Frame::new(Vec::new()).dimensions(), (0, 0));
    }

    #[test]
    fn test_schedule_is_one_hot() {
        let total = 7;
        for index in 0..total {
            let schedule = VisibilitySchedule::new(index, total);
            assert_eq!(schedule.len(), total);
            assert_eq!(schedule.shown_slot(), Some(index));
            let hidden = schedule
                .states()
                .iter()
                .filter(|s| **s == Visibility::Hidden)
                .count();
            assert_eq!(hidden, total - 1);
        }
    }

    #[test]
    fn test_schedule_parse() {
        let parsed = VisibilitySchedule::parse("none;none;inline").unwrap();
        assert_eq!(parsed, VisibilitySchedule::new(2, 3));
        assert!(VisibilitySchedule::parse("none;block").is_none());

        let two_shown = VisibilitySchedule::parse("inline;inline").unwrap();
        assert_eq!(two_shown.shown_slot(), None);
    }

    #[test]
    fn test_single_frame_schedule() {
        assert_eq!(VisibilitySchedule::new(0, 1).to_string(), "inline");
    }
}

//! Rendering of frames into positioned SVG text runs.

use std::borrow::Cow;
use std::fmt::Write;

use quick_xml::escape::escape;

use crate::{AnimationConfig, Frame};

/// Placement settings for text runs.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// X position of every run
    pub x: f64,
    /// Y position of the first run
    pub y_start: f64,
    /// Distance between consecutive runs
    pub line_height: f64,
}

impl RenderConfig {
    /// Y position of the line at `index`.
    #[inline]
    pub fn line_y(&self, index: usize) -> f64 {
        self.y_start + index as f64 * self.line_height
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig::from(&AnimationConfig::default())
    }
}

impl From<&AnimationConfig> for RenderConfig {
    fn from(config: &AnimationConfig) -> Self {
        Self {
            x: config.x,
            y_start: config.y_start,
            line_height: config.line_height,
        }
    }
}

/// One line of a frame at its position on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Raw line content
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl TextRun {
    /// Line content with `&`, `<`, `>` and quotes escaped.
    pub fn escaped_text(&self) -> Cow<'_, str> {
        escape(self.text.as_str())
    }

    /// Append this run as a `<tspan>` element.
    pub fn write_tspan(&self, out: &mut String) {
        // Writing into a String cannot fail
        let _ = write!(
            out,
            r#"<tspan x="{}" y="{}">{}</tspan>"#,
            self.x,
            self.y,
            self.escaped_text()
        );
    }
}

/// Lay out every line of `frame` as a text run.
///
/// ## Example
///
/// ```rust
/// use cascii_profile::{render::{render_frame, RenderConfig}, Frame};
///
/// let frame = Frame::new(vec!["<o>".into(), "/|\\".into()]);
/// let config = RenderConfig { x: 10.0, y_start: 5.0, line_height: 15.0 };
/// let runs = render_frame(&frame, &config);
///
/// assert_eq!(runs.len(), 2);
/// assert_eq!(runs[1].y, 20.0);
/// assert_eq!(runs[0].escaped_text(), "&lt;o&gt;");
/// ```
pub fn render_frame(frame: &Frame, config: &RenderConfig) -> Vec<TextRun> {
    frame
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| TextRun {
            text: line.clone(),
            x: config.x,
            y: config.line_y(index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        let frame = Frame::new(vec!["a".into(), "b".into(), "c".into()]);
        let runs = render_frame(&frame, &RenderConfig::default());
        let ys: Vec<f64> = runs.iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![0.0, 15.0, 30.0]);
        assert!(runs.iter().all(|r| r.x == 470.0));
    }

    #[test]
    fn test_tspan_output() {
        let run = TextRun {
            text: "  a&b".into(),
            x: 470.0,
            y: 30.0,
        };
        let mut out = String::new();
        run.write_tspan(&mut out);
        assert_eq!(out, r#"<tspan x="470" y="30">  a&amp;b</tspan>"#);
    }

    #[test]
    fn test_fractional_positions() {
        let config = RenderConfig {
            x: 1.5,
            y_start: 0.25,
            line_height: 12.5,
        };
        let frame = Frame::new(vec!["x".into(), "y".into()]);
        let mut out = String::new();
        for run in render_frame(&frame, &config) {
            run.write_tspan(&mut out);
        }
        assert_eq!(
            out,
            r#"<tspan x="1.5" y="0.25">x</tspan><tspan x="1.5" y="12.75">y</tspan>"#
        );
    }
}

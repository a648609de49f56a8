//! Assembly of frames into a looping SVG animation, and reading one back.
//!
//! Every frame becomes a `<g>` group toggled by an `<animate>` on its
//! `display` attribute. All groups share one loop duration split into equal
//! slots, one per frame, so exactly one group is visible at any instant.

use std::fmt::Write;

use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::AnimationError;
use crate::render::{render_frame, RenderConfig};
use crate::{AnimationConfig, Frame, VisibilitySchedule};

/// Frames plus the settings used to lay them out.
#[derive(Clone, Debug)]
pub struct Animation {
    frames: Vec<Frame>,
    config: AnimationConfig,
}

impl Animation {
    pub fn new(frames: Vec<Frame>, config: AnimationConfig) -> Self {
        Self { frames, config }
    }

    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Seconds each frame stays visible per loop. `None` without frames.
    pub fn slot_duration(&self) -> Option<f64> {
        slot_duration(self.config.duration, self.frames.len())
    }

    /// Visibility schedule for the frame at `index`.
    pub fn schedule(&self, index: usize) -> VisibilitySchedule {
        VisibilitySchedule::new(index, self.frames.len())
    }

    /// Render the complete SVG document.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use cascii_profile::{Animation, AnimationConfig, Frame};
    ///
    /// let frames = vec![
    ///     Frame::new(vec!["o".into()]),
    ///     Frame::new(vec!["O".into()]),
    /// ];
    /// let svg = Animation::new(frames, AnimationConfig::default()).to_svg();
    ///
    /// assert!(svg.contains(r#"<g id="f1">"#));
    /// assert!(svg.contains(r#"values="none;inline""#));
    /// ```
    pub fn to_svg(&self) -> String {
        let config = &self.config;
        let render_config = RenderConfig::from(config);
        let total = self.frames.len();

        let mut svg = String::new();
        // Writing into a String cannot fail
        let _ = write!(
            svg,
            concat!(
                r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
                "\n  <style>\n    text {{\n",
                "      font-family: {};\n",
                "      font-size: {}px;\n",
                "      fill: {};\n",
                "      white-space: pre;\n",
                "    }}\n  </style>\n"
            ),
            config.canvas_width, config.canvas_height, config.font_family, config.font_size, config.fill
        );

        for (index, frame) in self.frames.iter().enumerate() {
            let width = frame.width();
            if width > config.frame_width {
                warn!(
                    "frame {} is {} columns wide, expected at most {}",
                    index, width, config.frame_width
                );
            }

            let _ = write!(svg, "  <g id=\"f{index}\">\n    <text>");
            for run in render_frame(frame, &render_config) {
                run.write_tspan(&mut svg);
            }
            let _ = write!(
                svg,
                concat!(
                    "</text>\n",
                    r#"    <animate attributeName="display" dur="{}s" repeatCount="indefinite" values="{}"/>"#,
                    "\n  </g>\n"
                ),
                config.duration,
                VisibilitySchedule::new(index, total)
            );
        }

        svg.push_str("</svg>\n");
        debug!("rendered {} frame groups into {} bytes", total, svg.len());
        svg
    }
}

/// Seconds per slot when `total` frames share a loop of `duration` seconds.
pub fn slot_duration(duration: f64, total: usize) -> Option<f64> {
    (total > 0).then(|| duration / total as f64)
}

/// Loop timing read back from a generated animation.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSummary {
    /// Number of frame groups
    pub frame_count: usize,
    /// Loop duration in seconds; `None` for a document without frames
    pub duration: Option<f64>,
}

impl AnimationSummary {
    /// Seconds each frame is shown per loop.
    pub fn slot_duration(&self) -> Option<f64> {
        self.duration
            .and_then(|duration| slot_duration(duration, self.frame_count))
    }

    /// Inspect an animation document.
    ///
    /// Checks that every group shares one duration and that group `i`
    /// carries a schedule of `frame_count` slots shown only at slot `i`.
    pub fn from_svg(svg: &str) -> Result<Self, AnimationError> {
        let mut reader = Reader::from_str(svg);
        let mut groups = 0usize;
        let mut duration: Option<f64> = None;
        // (group index, raw values) per animate element
        let mut schedules: Vec<(usize, String)> = Vec::new();

        loop {
            let event = reader.read_event().map_err(|e| AnimationError::Xml {
                position: reader.buffer_position() as usize,
                message: e.to_string(),
            })?;
            match event {
                Event::Start(ref e) if e.local_name().as_ref() == b"g" => {
                    groups += 1;
                }
                Event::Empty(ref e) | Event::Start(ref e)
                    if e.local_name().as_ref() == b"animate" =>
                {
                    let position = reader.buffer_position() as usize;
                    let dur = attribute(e, b"dur", position)?.ok_or(AnimationError::MissingDuration)?;
                    let seconds = parse_seconds(&dur)?;
                    match duration {
                        None => duration = Some(seconds),
                        Some(existing) if existing != seconds => {
                            return Err(AnimationError::InvalidDuration(dur));
                        }
                        Some(_) => {}
                    }
                    let values = attribute(e, b"values", position)?.unwrap_or_default();
                    schedules.push((groups.saturating_sub(1), values));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        for (index, values) in &schedules {
            let valid = VisibilitySchedule::parse(values)
                .is_some_and(|s| s.len() == groups && s.shown_slot() == Some(*index));
            if !valid {
                return Err(AnimationError::Schedule {
                    index: *index,
                    expected: groups,
                    values: values.clone(),
                });
            }
        }

        if groups > 0 && duration.is_none() {
            return Err(AnimationError::MissingDuration);
        }

        Ok(Self {
            frame_count: groups,
            duration,
        })
    }
}

fn attribute(e: &BytesStart<'_>, name: &[u8], position: usize) -> Result<Option<String>, AnimationError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| AnimationError::Xml {
            position,
            message: err.to_string(),
        })?;
        if attr.key.as_ref() == name {
            let value = std::str::from_utf8(&attr.value).map_err(|err| AnimationError::Xml {
                position,
                message: err.to_string(),
            })?;
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}

/// Parse an SVG clock value such as `15s` or `1.5s`.
fn parse_seconds(value: &str) -> Result<f64, AnimationError> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix('s').unwrap_or(trimmed);
    number
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s > 0.0)
        .ok_or_else(|| AnimationError::InvalidDuration(value.to_string()))
}

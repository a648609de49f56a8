//! In-place edits of the stat card SVGs and the README.
//!
//! Both edits are pure functions over the document text; the `*_file`
//! helpers wrap them with whole-file reads and writes.

use std::ops::Range;
use std::path::Path;

use log::{info, warn};
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::PatchError;

/// A `<tspan>` element and where its first text child lives in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextNode {
    /// Position among all tspans, in document order
    pub index: usize,
    /// Unescaped first text child. A CDATA section counts as text. `None`
    /// when the element is empty or its first child is a comment, a
    /// processing instruction or another element; such a node is never
    /// overwritten.
    pub text: Option<String>,
    slot: Slot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Slot {
    /// Byte range of the first text or CDATA child (empty for `<tspan></tspan>`)
    Inline(Range<usize>),
    /// Byte range of a self-closing `<tspan .../>`
    SelfClosing(Range<usize>),
    /// First child is markup that is not text
    Markup,
}

/// Result of a label-based replacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatPatch {
    /// The node at `index` now holds the replacement
    Replaced { index: usize, document: String },
    /// No tspan text contains the label
    LabelNotFound,
    /// The labelled tspan is the last one
    NoFollowingNode { label_index: usize },
    /// The node after the label starts with a comment or an element
    FollowingNodeNotText { index: usize },
}

impl StatPatch {
    /// Patched document, if anything changed.
    pub fn document(&self) -> Option<&str> {
        match self {
            StatPatch::Replaced { document, .. } => Some(document),
            _ => None,
        }
    }
}

/// Collect every `<tspan>` of an SVG document in order.
///
/// ```rust
/// use cascii_profile::patch::text_nodes;
///
/// let svg = r#"<svg><text><tspan>Uptime</tspan><tspan>1 day</tspan></text></svg>"#;
/// let nodes = text_nodes(svg).unwrap();
/// assert_eq!(nodes[1].text.as_deref(), Some("1 day"));
/// ```
pub fn text_nodes(svg: &str) -> Result<Vec<TextNode>, PatchError> {
    let mut reader = Reader::from_str(svg);
    let mut nodes = Vec::new();
    // Set right after a tspan start tag: (node index, byte offset of its content)
    let mut open: Option<(usize, usize)> = None;

    loop {
        let event = reader.read_event().map_err(|e| PatchError::Xml {
            position: reader.buffer_position() as usize,
            message: e.to_string(),
        })?;
        let position = reader.buffer_position() as usize;

        if let Some((index, start)) = open.take() {
            let (text, slot) = match &event {
                Event::Text(t) => {
                    let text = t.unescape().map_err(|e| PatchError::Xml {
                        position,
                        message: e.to_string(),
                    })?;
                    (Some(text.into_owned()), Slot::Inline(start..start + t.len()))
                }
                Event::CData(c) => {
                    let text = String::from_utf8_lossy(&c.clone().into_inner()).into_owned();
                    (Some(text), Slot::Inline(start..position))
                }
                Event::End(_) => (None, Slot::Inline(start..start)),
                _ => (None, Slot::Markup),
            };
            nodes.push(TextNode { index, text, slot });
        }

        match event {
            Event::Start(ref e) if e.local_name().as_ref() == b"tspan" => {
                open = Some((nodes.len(), position));
            }
            Event::Empty(ref e) if e.local_name().as_ref() == b"tspan" => {
                let start = svg[..position].rfind('<').unwrap_or(0);
                nodes.push(TextNode {
                    index: nodes.len(),
                    text: None,
                    slot: Slot::SelfClosing(start..position),
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(nodes)
}

/// Replace the text of the tspan that follows the first tspan containing `label`.
///
/// Only the bytes of that one text node change; everything else in `svg` is
/// copied through untouched.
///
/// ## Example
///
/// ```rust
/// use cascii_profile::patch::{replace_after_label, StatPatch};
///
/// let svg = r#"<text><tspan class="key">Uptime</tspan>: <tspan class="value">old</tspan></text>"#;
/// let patched = replace_after_label(svg, "Uptime", "new").unwrap();
///
/// assert_eq!(
///     patched.document(),
///     Some(r#"<text><tspan class="key">Uptime</tspan>: <tspan class="value">new</tspan></text>"#)
/// );
/// ```
pub fn replace_after_label(svg: &str, label: &str, replacement: &str) -> Result<StatPatch, PatchError> {
    let nodes = text_nodes(svg)?;

    let Some(label_index) = nodes
        .iter()
        .position(|n| n.text.as_deref().is_some_and(|t| t.contains(label)))
    else {
        return Ok(StatPatch::LabelNotFound);
    };
    let Some(target) = nodes.get(label_index + 1) else {
        return Ok(StatPatch::NoFollowingNode { label_index });
    };

    let escaped = escape(replacement);
    let mut document = String::with_capacity(svg.len() + replacement.len());
    match &target.slot {
        Slot::Inline(range) => {
            document.push_str(&svg[..range.start]);
            document.push_str(&escaped);
            document.push_str(&svg[range.end..]);
        }
        Slot::Markup => {
            return Ok(StatPatch::FollowingNodeNotText {
                index: target.index,
            });
        }
        Slot::SelfClosing(range) => {
            // "<tspan attrs/>" becomes "<tspan attrs>text</tspan>"
            let tag = svg[range.start + 1..range.end - 2].trim_end();
            let name = tag.split_whitespace().next().unwrap_or("tspan");
            document.push_str(&svg[..range.start]);
            document.push('<');
            document.push_str(tag);
            document.push('>');
            document.push_str(&escaped);
            document.push_str("</");
            document.push_str(name);
            document.push('>');
            document.push_str(&svg[range.end..]);
        }
    }

    Ok(StatPatch::Replaced {
        index: target.index,
        document,
    })
}

/// Patch a stat card on disk. The file is rewritten only when a node changed.
pub fn patch_stat_file(path: &Path, label: &str, replacement: &str) -> Result<StatPatch, PatchError> {
    let svg = read(path)?;
    let outcome = replace_after_label(&svg, label, replacement)?;

    match &outcome {
        StatPatch::Replaced { index, document } => {
            write(path, document)?;
            info!("{}: updated tspan {} after {:?}", path.display(), index, label);
        }
        StatPatch::LabelNotFound => {
            warn!("{}: {} information not found or unable to update.", path.display(), label);
        }
        StatPatch::NoFollowingNode { label_index } => {
            warn!(
                "{}: {} tspan {} has no following tspan, unable to update.",
                path.display(),
                label,
                label_index
            );
        }
        StatPatch::FollowingNodeNotText { index } => {
            warn!(
                "{}: tspan {} after {:?} does not start with text, unable to update.",
                path.display(),
                index,
                label
            );
        }
    }

    Ok(outcome)
}

/// Replace the first line containing `marker` with `heading` and `joke`.
///
/// Without a marker line the block is appended after a blank line instead.
///
/// ```rust
/// use cascii_profile::patch::insert_joke;
///
/// let readme = "# Hi\n<!-- JOKE HERE -->\nbye\n";
/// let out = insert_joke(readme, "<!-- JOKE HERE -->", "### Joke", "Knock knock");
/// assert_eq!(out, "# Hi\n### Joke\nKnock knock\nbye\n");
/// ```
pub fn insert_joke(content: &str, marker: &str, heading: &str, joke: &str) -> String {
    let block = format!("{heading}\n{joke}\n");
    let mut out = String::with_capacity(content.len() + block.len() + 1);
    let mut replaced = false;

    for line in content.split_inclusive('\n') {
        if !replaced && line.contains(marker) {
            out.push_str(&block);
            replaced = true;
        } else {
            out.push_str(line);
        }
    }

    if !replaced {
        out.push('\n');
        out.push_str(&block);
    }
    out
}

/// Patch a README on disk, replacing its whole content.
///
/// Returns `true` when the marker line was found.
pub fn patch_readme(path: &Path, marker: &str, heading: &str, joke: &str) -> Result<bool, PatchError> {
    let content = read(path)?;
    let found = content.lines().any(|l| l.contains(marker));
    if !found {
        warn!("{}: marker {:?} not found, appending joke", path.display(), marker);
    }
    write(path, &insert_joke(&content, marker, heading, joke))?;
    Ok(found)
}

fn read(path: &Path) -> Result<String, PatchError> {
    std::fs::read_to_string(path).map_err(|source| PatchError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, content: &str) -> Result<(), PatchError> {
    std::fs::write(path, content).map_err(|source| PatchError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: &str = r##"<?xml version="1.0" encoding="utf-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="985" height="530">
<!-- profile card -->
<text x="390" y="30" fill="#c9d1d9">
<tspan x="390" y="50" class="keyColor">OS</tspan>: <tspan class="valueColor">Windows 10 &amp; Linux</tspan>
<tspan x="390" y="70" class="keyColor">Uptime</tspan>: <tspan class="valueColor">20 years, 1 month, 3 days</tspan>
<tspan x="390" y="90" class="keyColor">Host</tspan>: <tspan class="valueColor">Somewhere</tspan>
</text>
</svg>
"##;

    #[test]
    fn replaces_only_the_value_node() {
        let patched = replace_after_label(CARD, "Uptime", "21 years, 0 months, 0 days 🎂").unwrap();
        let StatPatch::Replaced { index, document } = patched else {
            panic!("expected a replacement");
        };
        assert_eq!(index, 3);
        assert_eq!(
            document,
            CARD.replace("20 years, 1 month, 3 days", "21 years, 0 months, 0 days 🎂")
        );
    }

    #[test]
    fn replacement_is_escaped() {
        let patched = replace_after_label(CARD, "Host", "<b> & co").unwrap();
        let document = patched.document().unwrap();
        assert!(document.contains(r#"<tspan class="valueColor">&lt;b&gt; &amp; co</tspan>"#));
        assert_eq!(
            text_nodes(document).unwrap()[5].text.as_deref(),
            Some("<b> & co")
        );
    }

    #[test]
    fn idempotent() {
        let once = replace_after_label(CARD, "Uptime", "new").unwrap();
        let once = once.document().unwrap().to_string();
        let twice = replace_after_label(&once, "Uptime", "new").unwrap();
        assert_eq!(twice.document(), Some(once.as_str()));
    }

    #[test]
    fn label_matches_substring_of_first_tspan_only() {
        let svg = "<text><tspan>System Uptime</tspan><tspan>a</tspan><tspan>Uptime</tspan><tspan>b</tspan></text>";
        let patched = replace_after_label(svg, "Uptime", "x").unwrap();
        assert_eq!(
            patched.document(),
            Some("<text><tspan>System Uptime</tspan><tspan>x</tspan><tspan>Uptime</tspan><tspan>b</tspan></text>")
        );
    }

    #[test]
    fn entity_in_label_text() {
        let svg = "<text><tspan>Up&amp;time</tspan><tspan>old</tspan></text>";
        let patched = replace_after_label(svg, "Up&time", "new").unwrap();
        assert_eq!(
            patched.document(),
            Some("<text><tspan>Up&amp;time</tspan><tspan>new</tspan></text>")
        );
    }

    #[test]
    fn label_not_found() {
        let svg = "<svg><text><tspan>OS</tspan><tspan>Linux</tspan></text></svg>";
        assert_eq!(
            replace_after_label(svg, "Uptime", "x").unwrap(),
            StatPatch::LabelNotFound
        );
    }

    #[test]
    fn no_following_node() {
        let svg = "<svg><text><tspan>OS</tspan><tspan>Uptime</tspan></text></svg>";
        assert_eq!(
            replace_after_label(svg, "Uptime", "x").unwrap(),
            StatPatch::NoFollowingNode { label_index: 1 }
        );
    }

    #[test]
    fn empty_following_nodes_receive_text() {
        let svg = r#"<text><tspan>Uptime</tspan><tspan class="v"></tspan></text>"#;
        assert_eq!(
            replace_after_label(svg, "Uptime", "1 day").unwrap().document(),
            Some(r#"<text><tspan>Uptime</tspan><tspan class="v">1 day</tspan></text>"#)
        );

        let svg = r#"<text><tspan>Uptime</tspan><tspan class="v" /></text>"#;
        assert_eq!(
            replace_after_label(svg, "Uptime", "1 day").unwrap().document(),
            Some(r#"<text><tspan>Uptime</tspan><tspan class="v">1 day</tspan></text>"#)
        );
    }

    #[test]
    fn cdata_value_is_replaced_whole() {
        let svg = "<text><tspan>Uptime</tspan><tspan><![CDATA[old]]></tspan></text>";
        assert_eq!(text_nodes(svg).unwrap()[1].text.as_deref(), Some("old"));
        assert_eq!(
            replace_after_label(svg, "Uptime", "new").unwrap().document(),
            Some("<text><tspan>Uptime</tspan><tspan>new</tspan></text>")
        );
    }

    #[test]
    fn markup_first_child_is_left_alone() {
        for svg in [
            "<text><tspan>Uptime</tspan><tspan><!-- value -->old</tspan></text>",
            "<text><tspan>Uptime</tspan><tspan><tspan>old</tspan></tspan></text>",
        ] {
            let outcome = replace_after_label(svg, "Uptime", "new").unwrap();
            assert_eq!(outcome, StatPatch::FollowingNodeNotText { index: 1 });
            assert_eq!(outcome.document(), None);
        }
    }

    #[test]
    fn malformed_svg_is_an_error() {
        let result = replace_after_label("<svg><tspan>Uptime</svg>", "Uptime", "x");
        assert!(matches!(result, Err(PatchError::Xml { .. })));
    }

    #[test]
    fn joke_replaces_first_marker_only() {
        let readme = "intro\n<!-- JOKE HERE -->\nmiddle\n<!-- JOKE HERE -->\n";
        assert_eq!(
            insert_joke(readme, "<!-- JOKE HERE -->", "### Joke", "pun"),
            "intro\n### Joke\npun\nmiddle\n<!-- JOKE HERE -->\n"
        );
    }

    #[test]
    fn joke_appended_without_marker() {
        let readme = "# Title\nSome text\n";
        assert_eq!(
            insert_joke(readme, "<!-- JOKE HERE -->", "### Joke", "pun"),
            format!("{readme}\n### Joke\npun\n")
        );
    }

    #[test]
    fn marker_on_last_line_without_newline() {
        assert_eq!(
            insert_joke("a\n<!-- JOKE HERE -->", "<!-- JOKE HERE -->", "### Joke", "pun"),
            "a\n### Joke\npun\n"
        );
    }

    #[test]
    fn files_are_rewritten_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let card = dir.path().join("dark_mode.svg");
        let readme = dir.path().join("README.md");
        std::fs::write(&card, CARD).unwrap();
        std::fs::write(
            &readme,
            "# Me\n<!-- JOKE HERE -->\nand a long trailing paragraph that must not survive twice\n",
        )
        .unwrap();

        let outcome = patch_stat_file(&card, "Uptime", "1 day").unwrap();
        assert!(matches!(outcome, StatPatch::Replaced { index: 3, .. }));
        assert!(std::fs::read_to_string(&card).unwrap().contains(">1 day</tspan>"));

        assert!(patch_readme(&readme, "<!-- JOKE HERE -->", "### Joke", "pun").unwrap());
        assert_eq!(
            std::fs::read_to_string(&readme).unwrap(),
            "# Me\n### Joke\npun\nand a long trailing paragraph that must not survive twice\n"
        );

        // Marker is gone now, so a second run appends
        assert!(!patch_readme(&readme, "<!-- JOKE HERE -->", "### Joke", "pun2").unwrap());
        assert!(std::fs::read_to_string(&readme).unwrap().ends_with("\n\n### Joke\npun2\n"));
    }

    #[test]
    fn missing_label_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let card = dir.path().join("light_mode.svg");
        let svg = "<svg><text><tspan>OS</tspan></text></svg>";
        std::fs::write(&card, svg).unwrap();

        let outcome = patch_stat_file(&card, "Uptime", "x").unwrap();
        assert_eq!(outcome, StatPatch::LabelNotFound);
        assert_eq!(std::fs::read_to_string(&card).unwrap(), svg);
    }
}

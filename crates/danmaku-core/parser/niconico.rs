//! Niconico `<chat>` XML reader
//!
//! Each `<chat>` element carries one comment: its text content, the
//! playback position `vpos` in hundredths of a second, the submission time
//! `date`, and a space-separated `mail` attribute of style commands.
//!
//! # Example
//!
//! ```rust
//! use danmaku_core::comment::Placement;
//! use danmaku_core::parser::niconico::read_comments;
//! use danmaku_core::timeline::SequenceCounter;
//!
//! let xml = r#"<packet>
//!   <chat vpos="150" date="1400000000" mail="ue red big">hello</chat>
//! </packet>"#;
//!
//! let outcome = read_comments(xml, 25.0, &mut SequenceCounter::new())?;
//! let comment = &outcome.comments[0];
//! assert_eq!(comment.timeline(), 1.5);
//! assert_eq!(comment.placement(), Placement::Top);
//! assert_eq!(comment.font_size(), 36.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use log::warn;
use roxmltree::{Document, Node};

use super::{replace_control_chars, ReadOutcome, SourceIssue};
use crate::{
    comment::{CommentBuilder, Placement, Rgb},
    render::PICTORIAL_FONT_SIZE,
    timeline::{sort_comments, SequenceCounter},
    utils::CoreError,
    Result,
};

/// Size multiplier of the `big` command
pub const BIG_SCALE: f64 = 1.44;

/// Size multiplier of the `small` command
pub const SMALL_SCALE: f64 = 0.64;

/// Named colors accepted in the `mail` attribute
const NAMED_COLORS: &[(&str, u32)] = &[
    ("red", 0xFF_0000),
    ("pink", 0xFF_8080),
    ("orange", 0xFF_CC00),
    ("yellow", 0xFF_FF00),
    ("green", 0x00_FF00),
    ("cyan", 0x00_FFFF),
    ("blue", 0x00_00FF),
    ("purple", 0xC0_00FF),
    ("black", 0x00_0000),
    ("niconicowhite", 0xCC_CC99),
    ("white2", 0xCC_CC99),
    ("truered", 0xCC_0033),
    ("red2", 0xCC_0033),
    ("passionorange", 0xFF_6600),
    ("orange2", 0xFF_6600),
    ("madyellow", 0x99_9900),
    ("yellow2", 0x99_9900),
    ("elementalgreen", 0x00_CC66),
    ("green2", 0x00_CC66),
    ("marineblue", 0x33_FFCC),
    ("blue2", 0x33_FFCC),
    ("nobleviolet", 0x66_33CC),
    ("purple2", 0x66_33CC),
];

/// Look up a named color
#[must_use]
pub fn named_color(name: &str) -> Option<Rgb> {
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|&(_, rgb)| Rgb::new(rgb))
}

/// Style decoded from a `mail` attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MailStyle {
    pub placement: Placement,
    pub color: Rgb,
    pub font_size: f64,
    pub pictorial: bool,
}

impl MailStyle {
    /// Decode `mail` relative to the run's default font size
    ///
    /// Unknown commands are ignored. An explicit `#RRGGBB` wins over named
    /// colors regardless of order, and `gothic` pins the size to the
    /// pictorial size.
    #[must_use]
    pub fn parse(mail: &str, default_size: f64) -> Self {
        let mut style = Self {
            placement: Placement::Scroll,
            color: Rgb::WHITE,
            font_size: default_size,
            pictorial: false,
        };
        let mut explicit_color = None;
        for command in mail.split_whitespace() {
            match command {
                "ue" => style.placement = Placement::Top,
                "shita" => style.placement = Placement::Bottom,
                "big" => style.font_size = default_size * BIG_SCALE,
                "small" => style.font_size = default_size * SMALL_SCALE,
                "gothic" => style.pictorial = true,
                _ => {
                    if let Some(rgb) = Rgb::from_hex(command) {
                        explicit_color = Some(rgb);
                    } else if let Some(rgb) = named_color(command) {
                        style.color = rgb;
                    }
                }
            }
        }
        if let Some(rgb) = explicit_color {
            style.color = rgb;
        }
        if style.pictorial {
            style.font_size = PICTORIAL_FONT_SIZE;
        }
        style
    }
}

/// Read every `<chat>` element of a document
///
/// Command comments (text starting with `/`) are skipped silently.
/// Malformed elements are logged and listed in [`ReadOutcome::issues`].
///
/// # Errors
///
/// Returns [`CoreError::Parse`] when the document is not well-formed XML.
pub fn read_comments(
    xml: &str,
    default_font_size: f64,
    sequence: &mut SequenceCounter,
) -> Result<ReadOutcome> {
    let source = replace_control_chars(xml);
    let doc = Document::parse(&source).map_err(CoreError::parse)?;

    let mut outcome = ReadOutcome::default();
    let chats = doc.descendants().filter(|node| node.has_tag_name("chat"));
    for (record, node) in chats.enumerate() {
        match read_chat(node, default_font_size) {
            Ok(Some(builder)) => match builder.sequence(sequence.next_sequence()).build() {
                Ok(comment) => outcome.comments.push(comment),
                Err(e) => outcome.issues.push(issue(record, e)),
            },
            Ok(None) => {}
            Err(e) => outcome.issues.push(issue(record, e)),
        }
    }
    Ok(outcome)
}

/// Read several documents into one timeline-ordered batch
///
/// Sequence numbers continue across documents.
///
/// # Errors
///
/// Returns [`CoreError::Parse`] for the first document that is not
/// well-formed XML.
pub fn read_files<I, S>(documents: I, default_font_size: f64) -> Result<ReadOutcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sequence = SequenceCounter::new();
    let mut merged = ReadOutcome::default();
    for document in documents {
        merged.extend(read_comments(
            document.as_ref(),
            default_font_size,
            &mut sequence,
        )?);
    }
    sort_comments(&mut merged.comments);
    Ok(merged)
}

fn read_chat(node: Node<'_, '_>, default_font_size: f64) -> Result<Option<CommentBuilder>> {
    let text = node
        .text()
        .ok_or_else(|| CoreError::invalid_comment("empty <chat> element"))?;
    if text.starts_with('/') {
        return Ok(None);
    }
    let vpos = integer_attribute(node, "vpos")?;
    let date = integer_attribute(node, "date")?;
    let style = MailStyle::parse(node.attribute("mail").unwrap_or_default(), default_font_size);

    Ok(Some(
        CommentBuilder::new(text)
            .timeline(vpos.max(0) as f64 * 0.01)
            .submitted_at(date)
            .placement(style.placement)
            .color(style.color)
            .font_size(style.font_size)
            .pictorial(style.pictorial),
    ))
}

fn integer_attribute(node: Node<'_, '_>, name: &str) -> Result<i64> {
    let raw = node
        .attribute(name)
        .ok_or_else(|| CoreError::invalid_comment(format!("missing `{name}`")))?;
    raw.trim()
        .parse()
        .map_err(|_| CoreError::invalid_comment(format!("`{name}` is not an integer: {raw:?}")))
}

fn issue(record: usize, error: CoreError) -> SourceIssue {
    warn!("skipping <chat> #{record}: {error}");
    SourceIssue {
        record,
        message: error.to_string(),
    }
}

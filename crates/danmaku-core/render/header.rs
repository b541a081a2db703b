//! Script header and style naming
//!
//! Every event of a run references one of two styles: the run style built
//! from [`StageConfig`], and a fixed small style for pictorial comments.
//! Style names are derived deterministically so identical input always
//! produces identical output.

use core::fmt::{self, Write};
use core::hash::{Hash, Hasher};

use crate::{comment::Comment, utils::create_deterministic_hasher, StageConfig};

/// Font size of pictorial (block-character art) comments
pub const PICTORIAL_FONT_SIZE: f64 = 10.0;

/// Font face of pictorial comments; a CJK monospace face keeps art aligned
pub const PICTORIAL_FONT_FACE: &str = "SimHei";

/// Name of the style shared by all events of one run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleId(String);

impl StyleId {
    /// Use an explicit style name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Name derived from a 16-bit seed, e.g. `Danmaku2ASS_00ff`
    #[must_use]
    pub fn from_seed(seed: u16) -> Self {
        Self(format!("Danmaku2ASS_{seed:04x}"))
    }

    /// Name derived from the content of the comments being converted
    #[must_use]
    pub fn from_comments(comments: &[Comment]) -> Self {
        let mut hasher = create_deterministic_hasher();
        for comment in comments {
            comment.timeline().to_bits().hash(&mut hasher);
            comment.sequence().hash(&mut hasher);
            comment.text().hash(&mut hasher);
        }
        Self::from_seed((hasher.finish() & 0xFFFF) as u16)
    }

    /// The run style name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The pictorial style name that goes with this run style
    #[must_use]
    pub fn pictorial(&self) -> String {
        format!("{}_AA", self.0)
    }
}

impl Default for StyleId {
    fn default() -> Self {
        Self::from_seed(0)
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ASS alpha byte for an opacity in `0..=1` (0 = opaque)
#[must_use]
pub fn alpha_byte(opacity: f64) -> u8 {
    255 - (opacity.clamp(0.0, 1.0) * 255.0).round_ties_even() as u8
}

/// Write the `[Script Info]`, `[V4+ Styles]` and `[Events]` headers
///
/// # Errors
///
/// Propagates failures of the output sink.
pub fn write_header<W: Write>(out: &mut W, config: &StageConfig, style: &StyleId) -> fmt::Result {
    let alpha = alpha_byte(config.alpha);
    let outline = (config.font_size / 25.0).max(1.0);
    let width = config.width;
    let height = config.height;

    writeln!(out, "[Script Info]")?;
    writeln!(out, "; Script generated by danmaku-rs")?;
    writeln!(out, "ScriptType: v4.00+")?;
    writeln!(out, "PlayResX: {width}")?;
    writeln!(out, "PlayResY: {height}")?;
    writeln!(out, "Aspect Ratio: {width}:{height}")?;
    writeln!(out, "Collisions: Normal")?;
    writeln!(out, "WrapStyle: 2")?;
    writeln!(out, "ScaledBorderAndShadow: yes")?;
    writeln!(out, "YCbCr Matrix: TV.601")?;
    writeln!(out)?;
    writeln!(out, "[V4+ Styles]")?;
    writeln!(
        out,
        "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, \
         BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, \
         BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding"
    )?;
    write_style(out, style.as_str(), &config.font_face, config.font_size, alpha, outline)?;
    write_style(
        out,
        &style.pictorial(),
        PICTORIAL_FONT_FACE,
        PICTORIAL_FONT_SIZE,
        alpha,
        1.0,
    )?;
    writeln!(out)?;
    writeln!(out, "[Events]")?;
    writeln!(
        out,
        "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text"
    )
}

fn write_style<W: Write>(
    out: &mut W,
    name: &str,
    face: &str,
    size: f64,
    alpha: u8,
    outline: f64,
) -> fmt::Result {
    writeln!(
        out,
        "Style: {name}, {face}, {size:.0}, &H{alpha:02X}FFFFFF, &H{alpha:02X}FFFFFF, \
         &H{alpha:02X}000000, &H{alpha:02X}000000, 0, 0, 0, 0, 100, 100, 0.00, 0.00, 1, \
         {outline:.0}, 0, 7, 0, 0, 0, 0"
    )
}

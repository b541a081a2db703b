//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use danmaku_core::StageConfig;

/// Convert danmaku comment files into ASS subtitles
#[derive(Parser, Debug)]
#[command(name = "danmaku2ass", author, version, about, long_about = None)]
pub struct Cli {
    /// Comment files to be processed
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Output file (standard output when omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Stage size in pixels
    #[arg(short, long, value_name = "WIDTHxHEIGHT", default_value = "683x384", value_parser = parse_size)]
    pub size: (u32, u32),

    /// Font face
    #[arg(long, value_name = "FONT", default_value = "sans-serif")]
    pub font: String,

    /// Default font size
    #[arg(long, value_name = "SIZE", default_value_t = 25.0)]
    pub fontsize: f64,

    /// Text opacity
    #[arg(short, long, value_name = "ALPHA", default_value_t = 1.0)]
    pub alpha: f64,

    /// Duration of scrolling comment display
    #[arg(long, value_name = "SECONDS", default_value_t = 5.0)]
    pub duration_marquee: f64,

    /// Duration of still comment display
    #[arg(long, value_name = "SECONDS", default_value_t = 5.0)]
    pub duration_still: f64,

    /// Regular expression to filter comments (repeatable)
    #[arg(long, value_name = "REGEX")]
    pub filter: Vec<String>,

    /// Regular expressions from file, one per line, to filter comments
    #[arg(long, value_name = "FILE")]
    pub filter_file: Option<PathBuf>,

    /// Reserve blank on the bottom of the stage
    #[arg(short, long, value_name = "HEIGHT", default_value_t = 0)]
    pub protect: u32,

    /// Reduce the amount of comments if stage is full
    #[arg(short, long)]
    pub reduce: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Stage configuration described by the flags
    pub fn stage_config(&self) -> StageConfig {
        let (width, height) = self.size;
        StageConfig::default()
            .with_stage(width, height)
            .with_bottom_reserve(self.protect)
            .with_font_face(self.font.clone())
            .with_font_size(self.fontsize)
            .with_alpha(self.alpha)
            .with_durations(self.duration_marquee, self.duration_still)
            .with_drop_when_full(self.reduce)
    }

    /// Default log filter for the verbosity count
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Parse `WIDTHxHEIGHT`
fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let invalid = || format!("invalid stage size: {value:?}");
    let (width, height) = value.split_once('x').ok_or_else(invalid)?;
    let width = width.trim().parse().map_err(|_| invalid())?;
    let height = height.trim().parse().map_err(|_| invalid())?;
    Ok((width, height))
}

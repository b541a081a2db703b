//! # danmaku-core
//!
//! Converts timed danmaku ("bullet") comments into ASS subtitle events that
//! never overlap on screen. Each comment is assigned a starting row on a
//! pixel-row grid by a greedy single-pass lane scheduler, then rendered as a
//! positioned or moving dialogue line.
//!
//! ## Pipeline
//!
//! 1. [`timeline`] orders comments by playback position
//! 2. [`filter`] removes comments matching user patterns
//! 3. [`scheduler`] picks a row for each comment
//! 4. [`render`] writes the script header and one event per placement
//!
//! [`Converter`] runs all four steps.
//!
//! ## Quick Start
//!
//! ```rust
//! use danmaku_core::{CommentBuilder, Converter, Placement, StageConfig};
//!
//! let comments = vec![
//!     CommentBuilder::new("hello").timeline(1.0).build()?,
//!     CommentBuilder::new("pinned").timeline(1.0).placement(Placement::Top).build()?,
//! ];
//!
//! let mut script = String::new();
//! let report = Converter::new(StageConfig::default()).convert(&comments, &mut script)?;
//!
//! assert_eq!(report.placed, 2);
//! assert!(script.contains("\\move(683, 0, -125, 0)}hello"));
//! assert!(script.contains("\\an8\\pos(341, 0)}pinned"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - `niconico` (default): Niconico `<chat>` XML reader in [`parser::niconico`]
//! - `serde`: serialization for [`StageConfig`], [`Placement`] and
//!   [`ConversionReport`]
//! - `benches`: criterion benchmarks

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod comment;
pub mod config;
pub mod convert;
pub mod filter;
pub mod parser;
pub mod render;
pub mod scheduler;
pub mod timeline;
pub mod utils;

pub use comment::{Comment, CommentBuilder, Placement, Rgb};
pub use config::StageConfig;
pub use convert::{ConversionReport, Converter};
pub use filter::CommentFilter;
pub use render::{DialogueEvent, EventRenderer, StyleId};
pub use scheduler::{schedule, Assignment, AssignmentKind, Decision, LaneScheduler};
pub use timeline::{sort_comments, SequenceCounter};
pub use utils::{CoreError, ErrorCategory, Result};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

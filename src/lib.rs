//! # Chatlens
//!
//! A Rust library for analyzing WhatsApp chat exports.
//!
//! ## Overview
//!
//! Chatlens reads the `.txt` file WhatsApp produces with "Export chat" and
//! answers the usual questions about it: how much was said, by whom, when,
//! with which words and which emojis, and in what mood.
//!
//! The pipeline has three stages:
//!
//! 1. **Parse** ([`parser`]) raw export text into a [`ChatTable`]
//! 2. **Compute** ([`stats`]) pure statistics over the table for a
//!    participant [`Selection`](core::Selection)
//! 3. **Present** ([`report`], [`core::output`]) as text charts and
//!    CSV/SVG/JSON artifacts
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let table = preprocess(
//!     "01/01/24, 10:00 - Alice: Hello there\n\
//!      01/01/24, 10:01 - Bob: <Media omitted>\n\
//!      01/01/24, 10:02 - Alice: https://example.com check this",
//! );
//!
//! let summary = fetch_stats(&Selection::Overall, &table);
//! assert_eq!(summary.messages, 3);
//! assert_eq!(summary.words, 6);
//! assert_eq!(summary.media, 1);
//! assert_eq!(summary.links, 1);
//!
//! let report = analyze(&AnalysisContext::new(table))?;
//! assert_eq!(report.busy_users.unwrap().top[0].name, "Alice");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] — [`WhatsAppParser`](parser::WhatsAppParser), [`preprocess`](parser::preprocess)
//! - [`parsing`] — header formats and timestamp parsing
//! - [`table`] — [`ChatTable`], the parsed messages
//! - [`message`] — [`Message`] and its derived calendar fields
//! - [`core`] — filtering ([`core::filter`]) and artifact writers ([`core::output`])
//! - [`stats`] — [`StatsEngine`](stats::StatsEngine) and every statistic
//! - [`report`] — [`analyze`](report::analyze) and text rendering
//! - [`config`] — [`WhatsAppConfig`](config::WhatsAppConfig), [`AnalysisConfig`](config::AnalysisConfig)
//! - [`cli`] — CLI argument types (feature `cli`)
//! - [`error`] — [`ChatlensError`], [`Result`]
//! - [`prelude`] — Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod report;
pub mod stats;
pub mod table;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, RenderError, Result};
pub use message::Message;
pub use table::ChatTable;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    // Records
    pub use crate::{ChatTable, Message};

    // Error types
    pub use crate::error::{ChatlensError, Result};

    // Parsing
    pub use crate::parser::{ParseReport, WhatsAppParser, preprocess};
    pub use crate::parsing::DateFormat;

    // Configs
    pub use crate::config::{AnalysisConfig, WhatsAppConfig, WordCloudConfig};

    // Filtering
    pub use crate::core::filter::{FilterConfig, Selection, apply_filters};

    // Statistics
    pub use crate::stats::{
        StatsEngine, activity_heatmap, create_wordcloud, daily_timeline, emoji_emotion_summary,
        emoji_helper, fetch_stats, month_activity_map, monthly_timeline, most_busy_users,
        most_common_words, sentiment_analysis, week_activity_map,
    };

    // Presentation
    pub use crate::report::{AnalysisContext, Report, analyze, render_text};
    pub use crate::core::output::write_artifacts;
}

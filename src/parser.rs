//! WhatsApp export parser.
//!
//! Turns the raw text of an exported chat into a [`ChatTable`]. Each line
//! that starts with a date/time header opens a new message; every other line
//! belongs to the message before it.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::preprocess;
//!
//! let table = preprocess(
//!     "01/01/24, 10:00 - Alice: Hello there\n\
//!      and a second line\n\
//!      01/01/24, 10:01 - Bob: <Media omitted>",
//! );
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.messages()[0].content, "Hello there\nand a second line");
//! ```
//!
//! # Line policy
//!
//! - Header lines whose rest contains `": "` become `sender: text`
//! - Header lines without it become `group_notification` rows
//! - Lines without a valid header (including headers with an impossible
//!   date such as `31/02/24`) are appended to the previous message
//! - Lines before the first header have nothing to attach to; they are
//!   counted in [`ParseReport::orphan_lines`] and logged

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::Message;
use crate::config::WhatsAppConfig;
use crate::error::ChatlensError;
use crate::parsing::whatsapp::{DateFormat, HeaderMatcher, detect_whatsapp_format};
use crate::table::ChatTable;

/// Invisible characters WhatsApp sprinkles into exports.
const INVISIBLE_MARKS: &[char] = &['\u{FEFF}', '\u{200E}', '\u{200F}'];

/// What happened while parsing one export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// Header format used, `None` if no line looked like a header.
    pub format: Option<DateFormat>,
    /// Number of rows produced.
    pub messages: usize,
    /// Rows without a sender.
    pub notifications: usize,
    /// Lines appended to a previous message.
    pub continuation_lines: usize,
    /// Header-shaped lines whose date or time is impossible.
    pub invalid_timestamps: usize,
    /// Non-empty lines before the first message.
    pub orphan_lines: usize,
}

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust,no_run
/// use chatlens::parser::WhatsAppParser;
///
/// let parser = WhatsAppParser::new();
/// let table = parser.parse_file("WhatsApp Chat with Alice.txt")?;
/// println!("{} messages", table.len());
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct WhatsAppParser {
    config: WhatsAppConfig,
}

impl WhatsAppParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: WhatsAppConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &WhatsAppConfig {
        &self.config
    }

    /// Parses an export held in memory.
    pub fn parse_str(&self, content: &str) -> ChatTable {
        self.parse_with_report(content).0
    }

    /// Reads and parses an export file.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ChatTable, ChatlensError> {
        Ok(self.parse_file_with_report(path)?.0)
    }

    /// Reads and parses an export file, also returning the [`ParseReport`].
    pub fn parse_file_with_report(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(ChatTable, ParseReport), ChatlensError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        debug!(path = %path.display(), bytes = bytes.len(), "read chat export");
        Ok(self.parse_with_report(&content))
    }

    /// Parses an export held in memory, also returning the [`ParseReport`].
    pub fn parse_with_report(&self, content: &str) -> (ChatTable, ParseReport) {
        let cleaned;
        let content = if self.config.strip_invisible {
            cleaned = content.replace(INVISIBLE_MARKS, "");
            cleaned.as_str()
        } else {
            content
        };

        let lines: Vec<&str> = content.lines().collect();

        let mut report = ParseReport::default();

        let Some(format) = self.config.date_format.or_else(|| {
            let sample: Vec<&str> = lines
                .iter()
                .copied()
                .filter(|l| !l.trim().is_empty())
                .take(self.config.sample_size)
                .collect();
            detect_whatsapp_format(&sample)
        }) else {
            let non_empty = lines.iter().filter(|l| !l.trim().is_empty()).count();
            if non_empty > 0 {
                warn!(lines = non_empty, "no WhatsApp message header found");
            }
            report.orphan_lines = non_empty;
            return (ChatTable::default(), report);
        };
        report.format = Some(format);
        debug!(%format, "detected header format");

        let matcher = HeaderMatcher::new(format);
        let mut messages: Vec<Message> = Vec::new();

        for line in lines {
            let header = matcher.split(line);
            let timestamp = header.as_ref().and_then(|h| matcher.timestamp(h));

            match (header, timestamp) {
                (Some(header), Some(ts)) => {
                    let msg = split_sender(header.rest).map_or_else(
                        || Message::notification(ts, header.rest),
                        |(sender, text)| Message::new(ts, sender, text),
                    );
                    if msg.is_notification() {
                        report.notifications += 1;
                    }
                    messages.push(msg);
                }
                (header, _) => {
                    if header.is_some() {
                        report.invalid_timestamps += 1;
                    }
                    if let Some(last) = messages.last_mut() {
                        last.content.push('\n');
                        last.content.push_str(line);
                        report.continuation_lines += 1;
                    } else if !line.trim().is_empty() {
                        report.orphan_lines += 1;
                    }
                }
            }
        }

        if report.orphan_lines > 0 {
            warn!(
                lines = report.orphan_lines,
                "lines before the first message could not be attached"
            );
        }
        if report.invalid_timestamps > 0 {
            warn!(
                lines = report.invalid_timestamps,
                "header lines with impossible timestamps were kept as message text"
            );
        }

        report.messages = messages.len();
        debug!(
            messages = report.messages,
            notifications = report.notifications,
            continuation_lines = report.continuation_lines,
            "parsed chat export"
        );

        (ChatTable::new(messages), report)
    }
}

/// Splits `sender: text`. Returns `None` for system notices.
fn split_sender(rest: &str) -> Option<(&str, &str)> {
    let (sender, text) = rest.split_once(": ")?;
    let sender = sender.trim();
    if sender.is_empty() {
        return None;
    }
    Some((sender, text))
}

/// Parses raw export text with the default configuration.
///
/// Never fails: text without any recognizable header yields an empty table.
pub fn preprocess(raw: &str) -> ChatTable {
    WhatsAppParser::new().parse_str(raw)
}

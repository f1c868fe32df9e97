//! Parsed chat message record.
//!
//! This module provides [`Message`], one entry of a chat export after
//! parsing. Besides the raw fields it exposes the derived calendar fields
//! (date, month, weekday, hour bucket) every timeline and activity map
//! groups by.
//!
//! # Examples
//!
//! ```
//! use chatlens::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//! let msg = Message::new(ts, "Alice", "Hello there");
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.month_name(), "January");
//! assert_eq!(msg.day_name(), "Monday");
//! assert_eq!(msg.period(), "10-11");
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatlens::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let msg = Message::new(ts, "Alice", "Hello!");
//! let json = serde_json::to_string(&msg)?;
//! let parsed: Message = serde_json::from_str(&json)?;
//!
//! assert_eq!(msg, parsed);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Sender assigned to system events ("X joined", "Y changed the subject").
pub const GROUP_NOTIFICATION: &str = "group_notification";

/// One parsed chat entry.
///
/// Messages are immutable once parsed: the parser builds them, everything
/// downstream only reads them.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | Local wall-clock time from the export header |
/// | `sender` | `String` | Author name, or [`GROUP_NOTIFICATION`] |
/// | `content` | `String` | Message text, may span several lines |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent, as printed in the export.
    pub timestamp: NaiveDateTime,

    /// Display name or phone number of the author.
    pub sender: String,

    /// Text content. Attachments appear as a placeholder string.
    pub content: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            content: content.into(),
        }
    }

    /// Creates a system event message.
    pub fn notification(timestamp: NaiveDateTime, content: impl Into<String>) -> Self {
        Self::new(timestamp, GROUP_NOTIFICATION, content)
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    // =========================================================================
    // Derived calendar fields
    // =========================================================================

    /// Calendar date without the time of day.
    pub fn only_date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    /// Month number, 1-based.
    pub fn month_num(&self) -> u32 {
        self.timestamp.month()
    }

    /// Full English month name ("January").
    pub fn month_name(&self) -> String {
        self.timestamp.format("%B").to_string()
    }

    /// Day of the month, 1-based.
    pub fn day(&self) -> u32 {
        self.timestamp.day()
    }

    /// Full English weekday name ("Monday").
    pub fn day_name(&self) -> String {
        self.timestamp.format("%A").to_string()
    }

    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    pub fn minute(&self) -> u32 {
        self.timestamp.minute()
    }

    /// One-hour bucket label used by the activity heatmap.
    ///
    /// `"10-11"` for 10:xx, `"23-00"` for 23:xx and `"00-1"` for 00:xx.
    pub fn period(&self) -> String {
        period_label(self.hour())
    }

    // =========================================================================
    // Classification
    // =========================================================================

    /// Returns `true` for system events without a real sender.
    pub fn is_notification(&self) -> bool {
        self.sender == GROUP_NOTIFICATION
    }

    /// Returns `true` if the message is only an omitted-attachment placeholder.
    pub fn is_media(&self, placeholder: &str) -> bool {
        self.content.trim() == placeholder
    }

    /// Returns `true` if this message's content is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Hour bucket label for the given hour (0..=23).
pub fn period_label(hour: u32) -> String {
    match hour {
        23 => "23-00".to_string(),
        0 => "00-1".to_string(),
        h => format!("{}-{}", h, h + 1),
    }
}

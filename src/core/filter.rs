//! Filter messages by date range and sender.
//!
//! This module provides [`FilterConfig`] for the date-range controls,
//! [`Selection`] for the "show analysis for" choice, and [`apply_filters`]
//! which builds the filtered view of a table.
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Start date | [`with_start_date`](FilterConfig::with_start_date) | Messages on or after date |
//! | End date | [`with_end_date`](FilterConfig::with_end_date) | Messages on or before date |
//! | Sender | [`with_selection`](FilterConfig::with_selection) | Messages from one participant |
//!
//! # Examples
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, Selection, apply_filters};
//! use chatlens::parser::preprocess;
//!
//! # fn main() -> chatlens::Result<()> {
//! let table = preprocess(
//!     "01/01/24, 10:00 - Alice: Happy new year\n\
//!      02/03/24, 11:00 - Bob: spring already\n\
//!      05/06/24, 12:00 - Alice: summer",
//! );
//!
//! let config = FilterConfig::new()
//!     .with_start_date("2024-03-01")?
//!     .with_selection(Selection::from("Alice"));
//!
//! let filtered = apply_filters(&table, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered.messages()[0].content, "summer");
//! assert_eq!(table.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Both date bounds are inclusive whole days
//! - An inverted range (start after end) selects nothing; it is not an error
//! - Sender matching is exact; `"overall"` selects everyone
//! - Multiple filters are combined with AND logic

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::ChatlensError;
use crate::table::ChatTable;

/// Selection value meaning "every participant".
pub const OVERALL: &str = "overall";

/// Which participant the analysis is about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    /// All participants, no sender filtering.
    #[default]
    Overall,
    /// One participant, matched exactly by name.
    User(String),
}

impl Selection {
    pub fn is_overall(&self) -> bool {
        matches!(self, Selection::Overall)
    }

    /// Returns `true` if the message belongs to this selection.
    pub fn matches(&self, msg: &Message) -> bool {
        match self {
            Selection::Overall => true,
            Selection::User(name) => msg.sender == *name,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::Overall => OVERALL,
            Selection::User(name) => name,
        }
    }
}

impl From<&str> for Selection {
    fn from(s: &str) -> Self {
        if s == OVERALL {
            Selection::Overall
        } else {
            Selection::User(s.to_string())
        }
    }
}

impl From<String> for Selection {
    fn from(s: String) -> Self {
        if s == OVERALL {
            Selection::Overall
        } else {
            Selection::User(s)
        }
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Overall => OVERALL.to_string(),
            Selection::User(name) => name,
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for filtering messages by date and sender.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Include only messages on or after this date.
    pub start: Option<NaiveDate>,

    /// Include only messages on or before this date.
    pub end: Option<NaiveDate>,

    /// Include only messages from this participant.
    pub selection: Selection,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_start_date(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        self.start = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_end_date(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        self.end = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the start date directly.
    #[must_use]
    pub fn with_start(mut self, date: NaiveDate) -> Self {
        self.start = Some(date);
        self
    }

    /// Sets the end date directly.
    #[must_use]
    pub fn with_end(mut self, date: NaiveDate) -> Self {
        self.end = Some(date);
        self
    }

    /// Sets the sender selection.
    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.has_user_filter()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Returns `true` if a single participant is selected.
    pub fn has_user_filter(&self) -> bool {
        !self.selection.is_overall()
    }

    /// Returns `true` if the range is inverted and can match nothing.
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }

    /// Returns `true` if the message passes every active filter.
    pub fn matches(&self, msg: &Message) -> bool {
        let date = msg.only_date();
        if self.start.is_some_and(|start| date < start) {
            return false;
        }
        if self.end.is_some_and(|end| date > end) {
            return false;
        }
        self.selection.matches(msg)
    }
}

/// Parse a date string in YYYY-MM-DD format.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| ChatlensError::invalid_date(date_str))
}

/// Builds the filtered view of a table.
///
/// The input table is left untouched; the result is a new table holding
/// copies of the matching rows in their original order.
pub fn apply_filters(table: &ChatTable, config: &FilterConfig) -> ChatTable {
    if !config.is_active() {
        return table.clone();
    }
    table.filtered(|msg| config.matches(msg))
}

//! WhatsApp header formats and timestamp parsing.
//!
//! Every message in a WhatsApp TXT export starts with a date/time header
//! whose shape depends on the phone's platform and locale. This module knows
//! those shapes, detects which one an export uses, and turns header strings
//! into timestamps.

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Header format variants for WhatsApp exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// Android, 24-hour clock, day first
    /// Example: 01/01/24, 10:00 - Alice: Hello
    DashDayFirst,
    /// Android, 12-hour clock, month first
    /// Example: 1/15/24, 10:30 AM - Alice: Hello
    DashUs,
    /// Android, dotted date
    /// Example: 26.10.2025, 20:40 - Alice: Hello
    DashDot,
    /// iOS, 12-hour clock, month first
    /// Example: [1/15/24, 10:30:45 AM] Alice: Hello
    BracketUs,
    /// iOS, dotted date
    /// Example: [15.01.24, 10:30:45] Alice: Hello
    BracketDot,
    /// iOS, 24-hour clock, day first
    /// Example: [15/01/2024, 10:30:45] Alice: Hello
    BracketDayFirst,
}

impl DateFormat {
    /// Returns the header regex for this format.
    ///
    /// Capture groups: 1 = date, 2 = time, 3 = everything after the header.
    pub fn pattern(self) -> &'static str {
        match self {
            // 01/01/24, 10:00 - Alice: Hello
            DateFormat::DashDayFirst => {
                r"^(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}(?::\d{2})?)\s-\s(.*)$"
            }
            // 1/15/24, 10:30 AM - Alice: Hello
            DateFormat::DashUs => {
                r"^(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}(?::\d{2})?[\s\x{202F}]?[APap]\.?[Mm]\.?)\s-\s(.*)$"
            }
            // 26.10.2025, 20:40 - Alice: Hello
            DateFormat::DashDot => {
                r"^(\d{1,2}\.\d{1,2}\.\d{2,4}),\s(\d{1,2}:\d{2}(?::\d{2})?)\s-\s(.*)$"
            }
            // [1/15/24, 10:30:45 AM] Alice: Hello
            DateFormat::BracketUs => {
                r"^\[(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}(?::\d{2})?[\s\x{202F}]?[APap]\.?[Mm]\.?)\]\s(.*)$"
            }
            // [15.01.24, 10:30:45] Alice: Hello
            DateFormat::BracketDot => {
                r"^\[(\d{1,2}\.\d{1,2}\.\d{2,4}),\s(\d{1,2}:\d{2}(?::\d{2})?)\]\s(.*)$"
            }
            // [15/01/2024, 10:30:45] Alice: Hello
            DateFormat::BracketDayFirst => {
                r"^\[(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}(?::\d{2})?)\]\s(.*)$"
            }
        }
    }

    /// Returns chrono parse formats, most likely first.
    ///
    /// Slash formats also carry the opposite day/month order so that a
    /// date such as `1/15/24` still parses when the first guess fails.
    pub fn date_parse_formats(self) -> &'static [&'static str] {
        match self {
            DateFormat::DashDayFirst | DateFormat::BracketDayFirst => &[
                "%d/%m/%y, %H:%M:%S",
                "%d/%m/%y, %H:%M",
                "%d/%m/%Y, %H:%M:%S",
                "%d/%m/%Y, %H:%M",
                "%m/%d/%y, %H:%M:%S",
                "%m/%d/%y, %H:%M",
                "%m/%d/%Y, %H:%M:%S",
                "%m/%d/%Y, %H:%M",
            ],
            DateFormat::DashUs | DateFormat::BracketUs => &[
                "%m/%d/%y, %I:%M:%S %p",
                "%m/%d/%y, %I:%M %p",
                "%m/%d/%Y, %I:%M:%S %p",
                "%m/%d/%Y, %I:%M %p",
                "%d/%m/%y, %I:%M:%S %p",
                "%d/%m/%y, %I:%M %p",
                "%d/%m/%Y, %I:%M:%S %p",
                "%d/%m/%Y, %I:%M %p",
            ],
            DateFormat::DashDot | DateFormat::BracketDot => &[
                "%d.%m.%y, %H:%M:%S",
                "%d.%m.%y, %H:%M",
                "%d.%m.%Y, %H:%M:%S",
                "%d.%m.%Y, %H:%M",
            ],
        }
    }

    /// Returns all format variants, in detection priority order.
    pub fn all() -> &'static [DateFormat] {
        &[
            DateFormat::DashDayFirst,
            DateFormat::DashUs,
            DateFormat::DashDot,
            DateFormat::BracketUs,
            DateFormat::BracketDot,
            DateFormat::BracketDayFirst,
        ]
    }

    /// Compiles the header regex.
    pub fn regex(self) -> Regex {
        Regex::new(self.pattern()).expect("header patterns are static")
    }
}

impl std::fmt::Display for DateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateFormat::DashDayFirst => write!(f, "dd/mm/yy, HH:MM -"),
            DateFormat::DashUs => write!(f, "m/d/yy, h:mm AM -"),
            DateFormat::DashDot => write!(f, "dd.mm.yyyy, HH:MM -"),
            DateFormat::BracketUs => write!(f, "[m/d/yy, h:mm:ss AM]"),
            DateFormat::BracketDot => write!(f, "[dd.mm.yy, HH:MM:SS]"),
            DateFormat::BracketDayFirst => write!(f, "[dd/mm/yyyy, HH:MM:SS]"),
        }
    }
}

/// A header line split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    pub date: &'a str,
    pub time: &'a str,
    /// Everything after the header: `sender: text` or a system notice.
    pub rest: &'a str,
}

/// Matches header lines of one format.
#[derive(Debug, Clone)]
pub struct HeaderMatcher {
    format: DateFormat,
    regex: Regex,
}

impl HeaderMatcher {
    pub fn new(format: DateFormat) -> Self {
        Self {
            format,
            regex: format.regex(),
        }
    }

    pub fn format(&self) -> DateFormat {
        self.format
    }

    pub fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Splits a header line, or returns `None` for continuation lines.
    pub fn split<'a>(&self, line: &'a str) -> Option<Header<'a>> {
        let caps = self.regex.captures(line)?;
        Some(Header {
            date: caps.get(1)?.as_str(),
            time: caps.get(2)?.as_str(),
            rest: caps.get(3).map_or("", |m| m.as_str()),
        })
    }

    /// Parses the timestamp of a split header.
    pub fn timestamp(&self, header: &Header<'_>) -> Option<NaiveDateTime> {
        parse_whatsapp_timestamp(header.date, header.time, self.format)
    }
}

/// Normalizes a time string for chrono: narrow no-break space to a regular
/// space, `a.m.` to `AM`, and a space before the AM/PM marker.
fn normalize_time(time_str: &str) -> String {
    let mut time = time_str.replace('\u{202F}', " ").replace('.', "");
    let upper = time.to_ascii_uppercase();
    if upper.ends_with("AM") || upper.ends_with("PM") {
        let split = time.len() - 2;
        let (clock, marker) = upper.split_at(split);
        time = format!("{} {}", clock.trim_end(), marker);
    }
    time
}

/// Parse timestamp from date and time strings.
pub fn parse_whatsapp_timestamp(
    date_str: &str,
    time_str: &str,
    format: DateFormat,
) -> Option<NaiveDateTime> {
    let datetime_str = format!("{date_str}, {}", normalize_time(time_str));

    format
        .date_parse_formats()
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(&datetime_str, f).ok())
}

/// Auto-detect the header format by analyzing sample lines.
///
/// Every format is scored by how many lines it matches; the highest score
/// wins and ties go to the format listed first in [`DateFormat::all`].
/// Returns `None` if no format matches any line.
pub fn detect_whatsapp_format(lines: &[&str]) -> Option<DateFormat> {
    let matchers: Vec<HeaderMatcher> = DateFormat::all()
        .iter()
        .map(|&f| HeaderMatcher::new(f))
        .collect();

    let mut scores = vec![0usize; matchers.len()];

    for line in lines {
        for (i, matcher) in matchers.iter().enumerate() {
            if matcher.matches(line) {
                scores[i] += 1;
            }
        }
    }

    let max_score = *scores.iter().max()?;
    if max_score == 0 {
        return None;
    }

    let winner_idx = scores.iter().position(|&s| s == max_score)?;
    Some(matchers[winner_idx].format)
}

//! Configuration types for parsing and analysis.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`WhatsAppConfig`] - how the export text is parsed
//! - [`AnalysisConfig`] - the text policies the stats engine applies
//!   (what counts as a word, a link, a media message, a stopword)
//! - [`WordCloudConfig`] - word cloud canvas and font range
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{AnalysisConfig, WhatsAppConfig};
//!
//! let parse = WhatsAppConfig::new().with_sample_size(50);
//!
//! let analysis = AnalysisConfig::new()
//!     .with_top_words(10)
//!     .with_extra_stopwords(["lol", "ok"]);
//! assert!(analysis.validate().is_ok());
//! ```

#[cfg(feature = "json-output")]
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ChatlensError;
use crate::parsing::whatsapp::DateFormat;

/// Placeholder WhatsApp writes instead of an attachment.
pub const DEFAULT_MEDIA_PLACEHOLDER: &str = "<Media omitted>";

/// Placeholder WhatsApp writes for a message deleted by its author.
pub const DEFAULT_DELETED_PLACEHOLDER: &str = "This message was deleted";

/// Default URL pattern used for link counting.
pub const DEFAULT_LINK_PATTERN: &str = r"(?i)\b(?:https?://|www\.)\S+";

/// Built-in stopword list: common English and romanized Hindi filler words
/// found in WhatsApp chats.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "am", "an", "and", "any", "are", "as", "at", "be", "been",
    "but", "by", "can", "did", "do", "does", "for", "from", "get", "got", "had", "has", "have",
    "he", "her", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "me",
    "my", "no", "not", "now", "of", "on", "or", "our", "out", "she", "so", "that", "the",
    "their", "them", "then", "there", "they", "this", "to", "too", "up", "us", "was", "we",
    "were", "what", "when", "where", "which", "who", "why", "will", "with", "would", "you",
    "your", "aur", "bhi", "hai", "hain", "ho", "hu", "hoon", "kar", "ka", "ke", "ki", "ko",
    "kya", "mai", "main", "mein", "na", "nahi", "se", "tha", "thi", "toh", "tu", "tum",
    "ye", "yeh", "wo", "woh",
];

/// Configuration for WhatsApp export parsing.
///
/// WhatsApp exports are TXT files whose header format depends on the phone's
/// locale. The parser auto-detects the format from the first
/// [`sample_size`](Self::sample_size) non-empty lines unless one is forced.
///
/// # Example
///
/// ```rust
/// use chatlens::config::WhatsAppConfig;
/// use chatlens::parsing::whatsapp::DateFormat;
///
/// let config = WhatsAppConfig::new().with_date_format(DateFormat::DashDayFirst);
/// assert_eq!(config.date_format, Some(DateFormat::DashDayFirst));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WhatsAppConfig {
    /// Force a header format instead of detecting it (default: detect)
    pub date_format: Option<DateFormat>,

    /// Number of non-empty lines inspected by format detection (default: 20)
    pub sample_size: usize,

    /// Remove the invisible direction marks some exports carry (default: true)
    pub strip_invisible: bool,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            date_format: None,
            sample_size: 20,
            strip_invisible: true,
        }
    }
}

impl WhatsAppConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the header format.
    #[must_use]
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.date_format = Some(format);
        self
    }

    /// Sets how many lines format detection looks at.
    #[must_use]
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = size.max(1);
        self
    }

    /// Sets whether invisible direction marks are removed.
    #[must_use]
    pub fn with_strip_invisible(mut self, strip: bool) -> Self {
        self.strip_invisible = strip;
        self
    }
}

/// Word cloud canvas settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCloudConfig {
    /// Canvas width in pixels (default: 500)
    pub width: u32,
    /// Canvas height in pixels (default: 500)
    pub height: u32,
    /// Font size of the least frequent placed word (default: 10)
    pub min_font_size: u32,
    /// Font size of the most frequent word (default: 64)
    pub max_font_size: u32,
    /// Maximum number of words laid out (default: 100)
    pub max_words: usize,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            min_font_size: 10,
            max_font_size: 64,
            max_words: 100,
        }
    }
}

/// Text policies used by the stats engine.
///
/// What counts as a word, a link or a media message is defined here rather
/// than hard-coded, so it can be tuned per export via a JSON file.
///
/// # Example
///
/// ```rust
/// use chatlens::config::AnalysisConfig;
///
/// let config = AnalysisConfig::new()
///     .with_media_placeholder("<Médias omis>")
///     .with_top_words(5);
///
/// assert_eq!(config.top_words, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Exact (trimmed) text of an omitted-attachment message
    pub media_placeholder: String,

    /// Exact (trimmed) text of a deleted message
    pub deleted_placeholder: String,

    /// Regex matching one link
    pub link_pattern: String,

    /// Stopwords dropped before word frequency (compared lowercase)
    pub stopwords: Vec<String>,

    /// Lowercase tokens before counting words (default: true)
    pub lowercase_words: bool,

    /// Number of rows in the most-common-words table (default: 20)
    pub top_words: usize,

    /// Number of senders in the busiest-users chart (default: 5)
    pub top_users: usize,

    /// Number of emojis drawn in the emoji chart (default: 5)
    pub top_emojis: usize,

    /// Word cloud layout settings
    pub wordcloud: WordCloudConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            media_placeholder: DEFAULT_MEDIA_PLACEHOLDER.to_string(),
            deleted_placeholder: DEFAULT_DELETED_PLACEHOLDER.to_string(),
            link_pattern: DEFAULT_LINK_PATTERN.to_string(),
            stopwords: DEFAULT_STOPWORDS.iter().map(|s| (*s).to_string()).collect(),
            lowercase_words: true,
            top_words: 20,
            top_users: 5,
            top_emojis: 5,
            wordcloud: WordCloudConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields keep their defaults, so a file may override only the
    /// settings it cares about. The result is validated before returning.
    #[cfg(feature = "json-output")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ChatlensError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| ChatlensError::config(Some(path.to_path_buf()), e.to_string()))?;
        config
            .validate()
            .map_err(|e| match e {
                ChatlensError::Config { message, .. } => {
                    ChatlensError::config(Some(path.to_path_buf()), message)
                }
                other => other,
            })?;
        Ok(config)
    }

    /// Checks that the configuration can be used.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Config`] if the link pattern is not a valid
    /// regex, a placeholder is empty, or a size is zero.
    pub fn validate(&self) -> Result<(), ChatlensError> {
        self.link_regex()?;
        if self.media_placeholder.trim().is_empty() {
            return Err(ChatlensError::config(None, "media_placeholder must not be empty"));
        }
        if self.top_words == 0 || self.top_users == 0 || self.top_emojis == 0 {
            return Err(ChatlensError::config(None, "top_* sizes must be positive"));
        }
        let wc = &self.wordcloud;
        if wc.width == 0 || wc.height == 0 {
            return Err(ChatlensError::config(None, "word cloud canvas must be non-empty"));
        }
        if wc.min_font_size == 0 || wc.min_font_size > wc.max_font_size {
            return Err(ChatlensError::config(
                None,
                "word cloud font range must satisfy 0 < min_font_size <= max_font_size",
            ));
        }
        Ok(())
    }

    /// Compiles [`link_pattern`](Self::link_pattern).
    pub fn link_regex(&self) -> Result<Regex, ChatlensError> {
        Regex::new(&self.link_pattern)
            .map_err(|e| ChatlensError::config(None, format!("invalid link_pattern: {e}")))
    }

    /// Sets the media placeholder text.
    #[must_use]
    pub fn with_media_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.media_placeholder = placeholder.into();
        self
    }

    /// Sets the deleted-message placeholder text.
    #[must_use]
    pub fn with_deleted_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.deleted_placeholder = placeholder.into();
        self
    }

    /// Sets the link regex.
    #[must_use]
    pub fn with_link_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.link_pattern = pattern.into();
        self
    }

    /// Replaces the stopword list.
    #[must_use]
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = words.into_iter().map(Into::into).collect();
        self
    }

    /// Adds stopwords on top of the current list.
    #[must_use]
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    /// Sets whether tokens are lowercased before counting.
    #[must_use]
    pub fn with_lowercase_words(mut self, lowercase: bool) -> Self {
        self.lowercase_words = lowercase;
        self
    }

    /// Sets the size of the most-common-words table.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets the number of senders in the busiest-users chart.
    #[must_use]
    pub fn with_top_users(mut self, n: usize) -> Self {
        self.top_users = n;
        self
    }

    /// Sets the number of emojis drawn in the emoji chart.
    #[must_use]
    pub fn with_top_emojis(mut self, n: usize) -> Self {
        self.top_emojis = n;
        self
    }

    /// Sets the word cloud layout settings.
    #[must_use]
    pub fn with_wordcloud(mut self, wordcloud: WordCloudConfig) -> Self {
        self.wordcloud = wordcloud;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_config_default() {
        let config = WhatsAppConfig::default();
        assert!(config.date_format.is_none());
        assert_eq!(config.sample_size, 20);
        assert!(config.strip_invisible);
    }

    #[test]
    fn test_whatsapp_config_builder() {
        let config = WhatsAppConfig::new()
            .with_date_format(DateFormat::BracketUs)
            .with_sample_size(0)
            .with_strip_invisible(false);

        assert_eq!(config.date_format, Some(DateFormat::BracketUs));
        assert_eq!(config.sample_size, 1);
        assert!(!config.strip_invisible);
    }

    #[test]
    fn test_analysis_config_default_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.media_placeholder, "<Media omitted>");
        assert!(config.stopwords.iter().any(|w| w == "the"));
    }

    #[test]
    fn test_invalid_link_pattern() {
        let config = AnalysisConfig::new().with_link_pattern("(unclosed");
        let err = config.validate().unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("link_pattern"));
    }

    #[test]
    fn test_zero_top_words_rejected() {
        let config = AnalysisConfig::new().with_top_words(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_font_range_rejected() {
        let config = AnalysisConfig::new().with_wordcloud(WordCloudConfig {
            min_font_size: 80,
            max_font_size: 20,
            ..WordCloudConfig::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extra_stopwords() {
        let base = AnalysisConfig::new().stopwords.len();
        let config = AnalysisConfig::new().with_extra_stopwords(["lol", "ok"]);
        assert_eq!(config.stopwords.len(), base + 2);

        let replaced = AnalysisConfig::new().with_stopwords(["only"]);
        assert_eq!(replaced.stopwords, vec!["only".to_string()]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"top_words": 7}"#).unwrap();
        assert_eq!(config.top_words, 7);
        assert_eq!(config.media_placeholder, DEFAULT_MEDIA_PLACEHOLDER);
        assert_eq!(config.wordcloud, WordCloudConfig::default());
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lens.json");
        std::fs::write(&path, r#"{"media_placeholder": "image omitted"}"#).unwrap();

        let config = AnalysisConfig::from_json_file(&path).unwrap();
        assert_eq!(config.media_placeholder, "image omitted");

        std::fs::write(&path, r#"{"link_pattern": "("}"#).unwrap();
        let err = AnalysisConfig::from_json_file(&path).unwrap_err();
        assert!(err.to_string().contains("lens.json"));
    }
}

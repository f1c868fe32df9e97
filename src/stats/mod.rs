//! Descriptive statistics over a chat table.
//!
//! Every analytic is a pure function of a [`Selection`] and a [`ChatTable`]:
//! it narrows the table to the selected participant (unless the selection
//! is [`Selection::Overall`]) and returns a freshly computed view. Nothing
//! is cached between calls.
//!
//! The text policies (media placeholder, link pattern, stopwords) live in
//! [`AnalysisConfig`]; [`StatsEngine`] holds a validated copy with the link
//! regex compiled once. The free functions in this module use the default
//! policies.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::preprocess;
//! use chatlens::stats::{fetch_stats, most_busy_users};
//! use chatlens::core::Selection;
//!
//! let table = preprocess(
//!     "01/01/24, 10:00 - Alice: Hello there\n\
//!      01/01/24, 10:01 - Bob: <Media omitted>\n\
//!      01/01/24, 10:02 - Alice: https://example.com check this",
//! );
//!
//! let summary = fetch_stats(&Selection::Overall, &table);
//! assert_eq!((summary.messages, summary.words, summary.media, summary.links), (3, 6, 1, 1));
//!
//! let busy = most_busy_users(&table);
//! assert_eq!(busy.top[0].name, "Alice");
//! ```

pub mod emoji;
pub mod sentiment;
pub mod summary;
pub mod timeline;
pub mod users;
pub mod words;

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::AnalysisConfig;
use crate::core::filter::Selection;
use crate::error::ChatlensError;
use crate::table::ChatTable;

pub use emoji::{EmojiCount, Emotion, EmotionCount, emotion_of, extract_emojis};
pub use sentiment::{Sentiment, SentimentCount};
pub use summary::Summary;
pub use timeline::{ActivityCount, ActivityHeatmap, DailyPoint, TimelinePoint};
pub use users::{BusyUsers, UserCount, UserShare};
pub use words::{PlacedWord, WordCloud, WordCount};

/// Stats engine bound to one set of text policies.
#[derive(Debug, Clone)]
pub struct StatsEngine {
    config: AnalysisConfig,
    link_regex: Regex,
    stopwords: HashSet<String>,
}

impl StatsEngine {
    /// Creates an engine after validating the configuration.
    pub fn new(config: AnalysisConfig) -> Result<Self, ChatlensError> {
        config.validate()?;
        let link_regex = config.link_regex()?;
        let stopwords = config.stopwords.iter().map(|w| w.to_lowercase()).collect();
        Ok(Self {
            config,
            link_regex,
            stopwords,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub(crate) fn link_regex(&self) -> &Regex {
        &self.link_regex
    }

    pub(crate) fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Message, word, media and link counts.
    pub fn fetch_stats(&self, selection: &Selection, table: &ChatTable) -> Summary {
        summary::fetch_stats(self, &table.for_selection(selection))
    }

    /// Message counts per calendar month, oldest first.
    pub fn monthly_timeline(&self, selection: &Selection, table: &ChatTable) -> Vec<TimelinePoint> {
        timeline::monthly_timeline(&table.for_selection(selection))
    }

    /// Message counts per calendar day, oldest first.
    pub fn daily_timeline(&self, selection: &Selection, table: &ChatTable) -> Vec<DailyPoint> {
        timeline::daily_timeline(&table.for_selection(selection))
    }

    /// Message counts per weekday, busiest first.
    pub fn week_activity_map(&self, selection: &Selection, table: &ChatTable) -> Vec<ActivityCount> {
        timeline::week_activity_map(&table.for_selection(selection))
    }

    /// Message counts per month name, busiest first.
    pub fn month_activity_map(
        &self,
        selection: &Selection,
        table: &ChatTable,
    ) -> Vec<ActivityCount> {
        timeline::month_activity_map(&table.for_selection(selection))
    }

    /// Weekday by hour-of-day message counts.
    pub fn activity_heatmap(&self, selection: &Selection, table: &ChatTable) -> ActivityHeatmap {
        timeline::activity_heatmap(&table.for_selection(selection))
    }

    /// Participants ranked by message count. Only meaningful for the whole chat.
    pub fn most_busy_users(&self, table: &ChatTable) -> BusyUsers {
        users::most_busy_users(table, self.config.top_users)
    }

    /// Word cloud layout over the filtered word frequencies.
    pub fn create_wordcloud(&self, selection: &Selection, table: &ChatTable) -> WordCloud {
        words::create_wordcloud(self, &table.for_selection(selection))
    }

    /// The `top_words` most frequent words.
    pub fn most_common_words(&self, selection: &Selection, table: &ChatTable) -> Vec<WordCount> {
        words::most_common_words(self, &table.for_selection(selection))
    }

    /// Every emoji used, most frequent first.
    pub fn emoji_helper(&self, selection: &Selection, table: &ChatTable) -> Vec<EmojiCount> {
        emoji::emoji_helper(&table.for_selection(selection))
    }

    /// Emoji occurrences tallied per emotion bucket.
    pub fn emoji_emotion_summary(
        &self,
        selection: &Selection,
        table: &ChatTable,
    ) -> Vec<EmotionCount> {
        emoji::emoji_emotion_summary(&table.for_selection(selection))
    }

    /// Positive, negative and neutral message counts.
    pub fn sentiment_analysis(&self, selection: &Selection, table: &ChatTable) -> Vec<SentimentCount> {
        sentiment::sentiment_analysis(self, &table.for_selection(selection))
    }
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::new(AnalysisConfig::default()).expect("default analysis config is valid")
    }
}

static DEFAULT_ENGINE: LazyLock<StatsEngine> = LazyLock::new(StatsEngine::default);

/// See [`StatsEngine::fetch_stats`].
pub fn fetch_stats(selection: &Selection, table: &ChatTable) -> Summary {
    DEFAULT_ENGINE.fetch_stats(selection, table)
}

/// See [`StatsEngine::monthly_timeline`].
pub fn monthly_timeline(selection: &Selection, table: &ChatTable) -> Vec<TimelinePoint> {
    DEFAULT_ENGINE.monthly_timeline(selection, table)
}

/// See [`StatsEngine::daily_timeline`].
pub fn daily_timeline(selection: &Selection, table: &ChatTable) -> Vec<DailyPoint> {
    DEFAULT_ENGINE.daily_timeline(selection, table)
}

/// See [`StatsEngine::week_activity_map`].
pub fn week_activity_map(selection: &Selection, table: &ChatTable) -> Vec<ActivityCount> {
    DEFAULT_ENGINE.week_activity_map(selection, table)
}

/// See [`StatsEngine::month_activity_map`].
pub fn month_activity_map(selection: &Selection, table: &ChatTable) -> Vec<ActivityCount> {
    DEFAULT_ENGINE.month_activity_map(selection, table)
}

/// See [`StatsEngine::activity_heatmap`].
pub fn activity_heatmap(selection: &Selection, table: &ChatTable) -> ActivityHeatmap {
    DEFAULT_ENGINE.activity_heatmap(selection, table)
}

/// See [`StatsEngine::most_busy_users`].
pub fn most_busy_users(table: &ChatTable) -> BusyUsers {
    DEFAULT_ENGINE.most_busy_users(table)
}

/// See [`StatsEngine::create_wordcloud`].
pub fn create_wordcloud(selection: &Selection, table: &ChatTable) -> WordCloud {
    DEFAULT_ENGINE.create_wordcloud(selection, table)
}

/// See [`StatsEngine::most_common_words`].
pub fn most_common_words(selection: &Selection, table: &ChatTable) -> Vec<WordCount> {
    DEFAULT_ENGINE.most_common_words(selection, table)
}

/// See [`StatsEngine::emoji_helper`].
pub fn emoji_helper(selection: &Selection, table: &ChatTable) -> Vec<EmojiCount> {
    DEFAULT_ENGINE.emoji_helper(selection, table)
}

/// See [`StatsEngine::emoji_emotion_summary`].
pub fn emoji_emotion_summary(selection: &Selection, table: &ChatTable) -> Vec<EmotionCount> {
    DEFAULT_ENGINE.emoji_emotion_summary(selection, table)
}

/// See [`StatsEngine::sentiment_analysis`].
pub fn sentiment_analysis(selection: &Selection, table: &ChatTable) -> Vec<SentimentCount> {
    DEFAULT_ENGINE.sentiment_analysis(selection, table)
}

/// Counts items and orders them by count, descending.
///
/// Equal counts keep the order in which the items were first seen.
pub(crate) fn rank_by_count<K, I>(items: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for item in items {
        if let Some(&i) = index.get(&item) {
            counts[i].1 += 1;
        } else {
            index.insert(item.clone(), counts.len());
            counts.push((item, 1));
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

//! Analysis reports.
//!
//! [`AnalysisContext`] is everything a run needs: the parsed table, the
//! date range and sender selection, and the text policies. [`analyze`]
//! turns it into a [`Report`] holding every statistic, which can then be
//! printed with [`render_text`] or exported through
//! [`core::output`](crate::core::output).
//!
//! # Example
//!
//! ```rust
//! use chatlens::core::{FilterConfig, Selection};
//! use chatlens::parser::preprocess;
//! use chatlens::report::{AnalysisContext, analyze, render_text};
//!
//! # fn main() -> chatlens::Result<()> {
//! let table = preprocess(
//!     "01/01/24, 10:00 - Alice: Hello there\n\
//!      01/01/24, 10:01 - Bob: <Media omitted>\n\
//!      01/01/24, 10:02 - Alice: https://example.com check this",
//! );
//!
//! let ctx = AnalysisContext::new(table)
//!     .with_filter(FilterConfig::new().with_selection(Selection::Overall));
//! let report = analyze(&ctx)?;
//! assert_eq!(report.summary.messages, 3);
//!
//! let mut out = Vec::new();
//! render_text(&report, &mut out)?;
//! assert!(String::from_utf8_lossy(&out).contains("Total Messages"));
//! # Ok(())
//! # }
//! ```

mod render;

pub use render::{
    BAR_WIDTH, EmojiChart, NO_EMOJIS, bar_chart, emoji_chart, pie_chart, render_messages,
    render_text,
};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::core::filter::{FilterConfig, Selection, apply_filters};
use crate::error::ChatlensError;
use crate::stats::{
    ActivityCount, ActivityHeatmap, BusyUsers, DailyPoint, EmojiCount, EmotionCount,
    SentimentCount, StatsEngine, Summary, TimelinePoint, WordCloud, WordCount,
};
use crate::table::ChatTable;

/// Inputs of one analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    /// The full parsed chat.
    pub table: ChatTable,
    /// Date range and sender selection.
    pub filter: FilterConfig,
    /// Text policies for the stats engine.
    pub config: AnalysisConfig,
}

impl AnalysisContext {
    pub fn new(table: ChatTable) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn selection(&self) -> &Selection {
        &self.filter.selection
    }
}

/// Every statistic for one selection and date range.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub selection: Selection,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub summary: Summary,
    pub monthly_timeline: Vec<TimelinePoint>,
    pub daily_timeline: Vec<DailyPoint>,
    pub busy_days: Vec<ActivityCount>,
    pub busy_months: Vec<ActivityCount>,
    pub heatmap: ActivityHeatmap,
    /// Only present for the overall selection.
    pub busy_users: Option<BusyUsers>,
    pub common_words: Vec<WordCount>,
    #[serde(skip)]
    pub wordcloud: WordCloud,
    pub emojis: Vec<EmojiCount>,
    pub emotions: Vec<EmotionCount>,
    pub sentiment: Vec<SentimentCount>,
    /// Number of emojis shown in the emoji chart.
    #[serde(skip)]
    pub top_emojis: usize,
}

/// Runs every statistic for the context.
///
/// The date range is applied first; the sender selection is then handled by
/// each statistic, so the busiest-users ranking still sees every sender.
///
/// # Errors
///
/// Returns [`ChatlensError::Config`] if the analysis configuration is invalid.
pub fn analyze(ctx: &AnalysisContext) -> Result<Report, ChatlensError> {
    let engine = StatsEngine::new(ctx.config.clone())?;
    let selection = ctx.selection();

    let dated = apply_filters(
        &ctx.table,
        &FilterConfig {
            selection: Selection::Overall,
            ..ctx.filter.clone()
        },
    );
    debug!(
        rows = ctx.table.len(),
        in_range = dated.len(),
        %selection,
        "analyzing chat"
    );

    Ok(Report {
        selection: selection.clone(),
        start: ctx.filter.start,
        end: ctx.filter.end,
        summary: engine.fetch_stats(selection, &dated),
        monthly_timeline: engine.monthly_timeline(selection, &dated),
        daily_timeline: engine.daily_timeline(selection, &dated),
        busy_days: engine.week_activity_map(selection, &dated),
        busy_months: engine.month_activity_map(selection, &dated),
        heatmap: engine.activity_heatmap(selection, &dated),
        busy_users: selection
            .is_overall()
            .then(|| engine.most_busy_users(&dated)),
        common_words: engine.most_common_words(selection, &dated),
        wordcloud: engine.create_wordcloud(selection, &dated),
        emojis: engine.emoji_helper(selection, &dated),
        emotions: engine.emoji_emotion_summary(selection, &dated),
        sentiment: engine.sentiment_analysis(selection, &dated),
        top_emojis: engine.config().top_emojis,
    })
}

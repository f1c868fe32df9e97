//! Word frequency and the word cloud layout.
//!
//! Both views share one token stream. A message contributes words only if it
//! is from a real participant, is not the media placeholder and is not the
//! deleted-message placeholder. Within such a message:
//!
//! - tokens are split on whitespace
//! - link tokens are dropped
//! - surrounding punctuation is trimmed (`"hello,"` counts as `"hello"`)
//! - tokens without a letter or digit are dropped
//! - tokens are lowercased (unless disabled) and checked against the stopwords
//!
//! The word cloud is laid out here rather than drawn: each word gets a font
//! size scaled by its frequency and a position found by walking an
//! Archimedean spiral out from the canvas center until the word's box no
//! longer overlaps anything already placed. [`WordCloud::to_svg`] renders
//! the result.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::config::WordCloudConfig;
use crate::stats::{StatsEngine, rank_by_count};
use crate::table::ChatTable;

/// Frequency of one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// One word positioned on the cloud canvas.
///
/// `x`/`y` is the top-left corner of the word's bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub font_size: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacedWord {
    fn overlaps(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        x < self.x + self.width
            && self.x < x + width
            && y < self.y + self.height
            && self.y < y + height
    }
}

/// Word cloud layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    /// Placed words, most frequent first.
    pub words: Vec<PlacedWord>,
}

/// Fill colors cycled over placed words.
const PALETTE: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

/// Average glyph advance relative to the font size.
const GLYPH_ASPECT: f64 = 0.6;

/// Spiral sampling: angle step in radians and number of samples per word.
const SPIRAL_STEP: f64 = 0.1;
const SPIRAL_SAMPLES: usize = 4000;

/// Font size decrement when a word does not fit anywhere.
const SHRINK_STEP: u32 = 2;

impl WordCloud {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Renders the layout as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n\
             <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n",
            w = self.width,
            h = self.height,
        );
        for (i, placed) in self.words.iter().enumerate() {
            // SVG places text by its baseline
            let baseline = placed.y + placed.height * 0.8;
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"{}\" font-family=\"sans-serif\" fill=\"{}\">{}</text>\n",
                placed.x,
                baseline,
                placed.font_size,
                PALETTE[i % PALETTE.len()],
                escape_xml(&placed.word),
            ));
        }
        svg.push_str("</svg>\n");
        svg
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Tokens that count as words for frequency purposes.
pub(crate) fn word_tokens<'a>(
    engine: &'a StatsEngine,
    table: &'a ChatTable,
) -> impl Iterator<Item = String> + 'a {
    let config = engine.config();
    table
        .iter()
        .filter(move |m| {
            !m.is_notification()
                && !m.is_media(&config.media_placeholder)
                && m.content.trim() != config.deleted_placeholder
        })
        .flat_map(|m| m.content.split_whitespace())
        .filter(move |token| !engine.link_regex().is_match(token))
        .filter_map(move |token| {
            let token = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if !token.chars().any(char::is_alphanumeric) {
                return None;
            }
            let lower = token.to_lowercase();
            if engine.is_stopword(&lower) {
                return None;
            }
            Some(if config.lowercase_words {
                lower
            } else {
                token.to_string()
            })
        })
}

fn ranked_words(engine: &StatsEngine, table: &ChatTable) -> Vec<WordCount> {
    rank_by_count(word_tokens(engine, table))
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect()
}

pub(crate) fn most_common_words(engine: &StatsEngine, table: &ChatTable) -> Vec<WordCount> {
    let mut words = ranked_words(engine, table);
    words.truncate(engine.config().top_words);
    words
}

pub(crate) fn create_wordcloud(engine: &StatsEngine, table: &ChatTable) -> WordCloud {
    let config = &engine.config().wordcloud;
    let mut words = ranked_words(engine, table);
    words.truncate(config.max_words);
    layout(&words, config)
}

/// Places words on the canvas, most frequent first.
///
/// Input order only breaks ties between equal counts. Words that do not
/// fit even at the minimum font size are left out.
pub fn layout(words: &[WordCount], config: &WordCloudConfig) -> WordCloud {
    let canvas_w = f64::from(config.width);
    let canvas_h = f64::from(config.height);
    let mut placed: Vec<PlacedWord> = Vec::with_capacity(words.len());

    let (Some(lo), Some(hi)) = (
        words.iter().map(|w| w.count).min(),
        words.iter().map(|w| w.count).max(),
    ) else {
        return WordCloud {
            width: config.width,
            height: config.height,
            words: placed,
        };
    };

    let mut ranked: Vec<&WordCount> = words.iter().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    let center_x = canvas_w / 2.0;
    let center_y = canvas_h / 2.0;
    let max_radius = canvas_w.hypot(canvas_h) / 2.0;
    let growth = max_radius / (SPIRAL_STEP * SPIRAL_SAMPLES as f64);

    for wc in ranked {
        let mut font_size = scaled_font_size(wc.count, lo, hi, config);

        loop {
            let width = wc.word.width() as f64 * f64::from(font_size) * GLYPH_ASPECT;
            let height = f64::from(font_size);

            let spot = (0..SPIRAL_SAMPLES).find_map(|i| {
                let theta = i as f64 * SPIRAL_STEP;
                let radius = growth * theta;
                let x = center_x + radius * theta.cos() - width / 2.0;
                let y = center_y + radius * theta.sin() - height / 2.0;
                let inside = x >= 0.0 && y >= 0.0 && x + width <= canvas_w && y + height <= canvas_h;
                (inside && !placed.iter().any(|p| p.overlaps(x, y, width, height)))
                    .then_some((x, y))
            });

            if let Some((x, y)) = spot {
                placed.push(PlacedWord {
                    word: wc.word.clone(),
                    count: wc.count,
                    font_size,
                    x,
                    y,
                    width,
                    height,
                });
                break;
            }
            if font_size <= config.min_font_size {
                break;
            }
            font_size = font_size.saturating_sub(SHRINK_STEP).max(config.min_font_size);
        }
    }

    WordCloud {
        width: config.width,
        height: config.height,
        words: placed,
    }
}

fn scaled_font_size(count: usize, lo: usize, hi: usize, config: &WordCloudConfig) -> u32 {
    if hi <= lo {
        return config.max_font_size;
    }
    let span = f64::from(config.max_font_size - config.min_font_size);
    let ratio = (count - lo) as f64 / (hi - lo) as f64;
    config.min_font_size + (span * ratio).round() as u32
}

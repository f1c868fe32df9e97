//! Lexicon-based message sentiment.
//!
//! Each message gets a score: +1 for every positive word or happy/love
//! emoji, -1 for every negative word or sad/angry emoji. The sign of the
//! score decides the label. Notifications and placeholder messages are not
//! scored.

use serde::{Deserialize, Serialize};

use crate::stats::StatsEngine;
use crate::stats::emoji::{Emotion, emotion_of, extract_emojis};
use crate::table::ChatTable;

const POSITIVE_WORDS: &[&str] = &[
    "amazing", "awesome", "beautiful", "best", "brilliant", "congrats", "congratulations",
    "cool", "enjoy", "enjoyed", "excellent", "excited", "fantastic", "fun", "glad", "good",
    "great", "happy", "haha", "hahaha", "lol", "love", "loved", "lovely", "nice", "perfect",
    "thank", "thanks", "welcome", "wonderful", "wow", "yay", "yes", "accha", "badhiya",
    "mast", "shukriya",
];

const NEGATIVE_WORDS: &[&str] = &[
    "angry", "annoyed", "awful", "bad", "boring", "broken", "cry", "disappointed", "hate",
    "hated", "horrible", "hurt", "lost", "miss", "no", "not", "pathetic", "poor", "sad",
    "sick", "sorry", "stupid", "terrible", "tired", "ugh", "upset", "worried", "worse",
    "worst", "wrong", "bekar", "bura", "ganda",
];

/// Sentiment label of one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// All labels in display order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    fn from_score(score: i64) -> Self {
        match score.signum() {
            1 => Sentiment::Positive,
            -1 => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of messages carrying one sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCount {
    pub sentiment: Sentiment,
    pub messages: usize,
}

/// Sentiment score of a text.
pub fn score_text(text: &str) -> i64 {
    let words: i64 = text
        .split_whitespace()
        .map(|token| {
            let token = token
                .trim_matches(|c: char| c.is_ascii_punctuation())
                .to_lowercase();
            if POSITIVE_WORDS.contains(&token.as_str()) {
                1
            } else if NEGATIVE_WORDS.contains(&token.as_str()) {
                -1
            } else {
                0
            }
        })
        .sum();

    let emojis: i64 = extract_emojis(text)
        .filter_map(emotion_of)
        .map(|emotion| match emotion {
            Emotion::Happy | Emotion::Love => 1,
            Emotion::Sad | Emotion::Angry => -1,
        })
        .sum();

    words + emojis
}

pub(crate) fn sentiment_analysis(engine: &StatsEngine, table: &ChatTable) -> Vec<SentimentCount> {
    let config = engine.config();
    let mut counts = [0usize; Sentiment::ALL.len()];

    for msg in table.iter().filter(|m| {
        !m.is_notification()
            && !m.is_media(&config.media_placeholder)
            && m.content.trim() != config.deleted_placeholder
    }) {
        counts[Sentiment::from_score(score_text(&msg.content)) as usize] += 1;
    }

    Sentiment::ALL
        .iter()
        .zip(counts)
        .map(|(&sentiment, messages)| SentimentCount {
            sentiment,
            messages,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Selection;
    use crate::parser::preprocess;
    use crate::stats::sentiment_analysis;

    #[test]
    fn test_score_text() {
        assert_eq!(score_text("This is great, thanks!"), 2);
        assert_eq!(score_text("worst day ever 😭"), -2);
        assert_eq!(score_text("meeting at 5"), 0);
        assert_eq!(score_text("good but sad"), 0);
        assert_eq!(score_text("LOVE it ❤️"), 2);
    }

    #[test]
    fn test_sentiment_counts() {
        let table = preprocess(
            "01/01/24, 10:00 - Alice: great news 🎉
01/01/24, 10:01 - Bob: <Media omitted>
01/01/24, 10:02 - Bob: ugh, so tired
01/01/24, 10:03 - Alice: see you at 6
01/01/24, 10:04 - Carol left",
        );
        let result = sentiment_analysis(&Selection::Overall, &table);
        let counts: Vec<(Sentiment, usize)> =
            result.iter().map(|s| (s.sentiment, s.messages)).collect();
        assert_eq!(
            counts,
            vec![
                (Sentiment::Positive, 1),
                (Sentiment::Negative, 1),
                (Sentiment::Neutral, 1),
            ]
        );
    }

    #[test]
    fn test_empty_has_three_rows() {
        let result = sentiment_analysis(&Selection::Overall, &preprocess(""));
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|s| s.messages == 0));
    }
}

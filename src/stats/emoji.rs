//! Emoji extraction and emotion buckets.
//!
//! Text is walked grapheme cluster by grapheme cluster, so a flag, a
//! skin-toned hand or a ZWJ family sequence counts as one emoji. A cluster
//! is an emoji if it carries the emoji presentation selector (U+FE0F) or any
//! of its code points falls in the pictographic blocks.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::stats::rank_by_count;
use crate::table::ChatTable;

/// Occurrences of one emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiCount {
    pub emoji: String,
    pub count: usize,
}

/// Emotion bucket an emoji can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Happy,
    Love,
    Sad,
    Angry,
}

impl Emotion {
    /// All buckets in display order.
    pub const ALL: [Emotion; 4] = [Emotion::Happy, Emotion::Love, Emotion::Sad, Emotion::Angry];

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Love => "Love",
            Emotion::Sad => "Sad",
            Emotion::Angry => "Angry",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emoji occurrences tallied for one emotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion: Emotion,
    pub count: usize,
}

#[inline]
fn is_pictographic(c: char) -> bool {
    matches!(
        c as u32,
        0x1F000..=0x1FAFF | 0x2300..=0x23FF | 0x2600..=0x27BF | 0x2B00..=0x2BFF
    )
}

#[inline]
fn has_presentation_selector(grapheme: &str) -> bool {
    grapheme.contains('\u{FE0F}')
}

#[inline]
fn is_emoji_grapheme(grapheme: &str) -> bool {
    !grapheme.is_ascii()
        && (has_presentation_selector(grapheme) || grapheme.chars().any(is_pictographic))
}

/// Emoji grapheme clusters in `text`, in order of appearance.
pub fn extract_emojis(text: &str) -> impl Iterator<Item = &str> {
    text.graphemes(true).filter(|g| is_emoji_grapheme(g))
}

/// Strips the presentation selector and skin tone modifiers.
fn base_emoji(emoji: &str) -> String {
    emoji
        .chars()
        .filter(|&c| c != '\u{FE0F}' && !matches!(c as u32, 0x1F3FB..=0x1F3FF))
        .collect()
}

/// Emotion bucket of an emoji, if it has one.
pub fn emotion_of(emoji: &str) -> Option<Emotion> {
    let base = base_emoji(emoji);
    let emotion = match base.as_str() {
        "😀" | "😃" | "😄" | "😁" | "😆" | "😅" | "😂" | "🤣" | "😊" | "🙂" | "😉" | "😋"
        | "😎" | "🥳" | "🤩" | "😺" | "😸" | "😹" | "👍" | "🎉" | "😜" | "😝" | "😛" | "🙌" => {
            Emotion::Happy
        }
        "❤" | "♥" | "😍" | "🥰" | "😘" | "😗" | "😙" | "😚" | "💕" | "💖" | "💗" | "💓"
        | "💞" | "💘" | "💝" | "💜" | "💙" | "💚" | "💛" | "🧡" | "🤍" | "🖤" | "😻" | "💋" => {
            Emotion::Love
        }
        "😢" | "😭" | "😞" | "😔" | "😟" | "😕" | "🙁" | "☹" | "😣" | "😖" | "😫" | "😩"
        | "🥺" | "💔" | "😿" | "😓" | "😥" => Emotion::Sad,
        "😠" | "😡" | "🤬" | "😤" | "👿" | "💢" | "😾" | "🖕" | "👎" => Emotion::Angry,
        _ => return None,
    };
    Some(emotion)
}

pub(crate) fn emoji_helper(table: &ChatTable) -> Vec<EmojiCount> {
    rank_by_count(table.iter().flat_map(|m| extract_emojis(&m.content)))
        .into_iter()
        .map(|(emoji, count)| EmojiCount {
            emoji: emoji.to_string(),
            count,
        })
        .collect()
}

pub(crate) fn emoji_emotion_summary(table: &ChatTable) -> Vec<EmotionCount> {
    let mut counts = [0usize; Emotion::ALL.len()];
    for emotion in table
        .iter()
        .flat_map(|m| extract_emojis(&m.content))
        .filter_map(emotion_of)
    {
        counts[emotion as usize] += 1;
    }

    Emotion::ALL
        .iter()
        .zip(counts)
        .map(|(&emotion, count)| EmotionCount { emotion, count })
        .collect()
}

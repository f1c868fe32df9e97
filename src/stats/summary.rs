//! Top-line counts.

use serde::{Deserialize, Serialize};

use crate::stats::StatsEngine;
use crate::table::ChatTable;

/// Message, word, media and link totals for one view of the chat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Rows in the view, group notifications included.
    pub messages: usize,
    /// Whitespace-separated tokens that are not links.
    pub words: usize,
    /// Messages that are only the media placeholder.
    pub media: usize,
    /// Link matches across all message texts.
    pub links: usize,
}

pub(crate) fn fetch_stats(engine: &StatsEngine, table: &ChatTable) -> Summary {
    let links = engine.link_regex();
    let placeholder = &engine.config().media_placeholder;

    table.iter().fold(Summary::default(), |mut acc, msg| {
        acc.messages += 1;
        acc.words += msg
            .content
            .split_whitespace()
            .filter(|token| !links.is_match(token))
            .count();
        if msg.is_media(placeholder) {
            acc.media += 1;
        }
        acc.links += links.find_iter(&msg.content).count();
        acc
    })
}

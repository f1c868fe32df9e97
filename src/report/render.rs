//! Plain-text rendering of a report.
//!
//! Charts are drawn with block characters and aligned by display width, so
//! labels containing emoji or CJK text line up in a terminal.

use std::io::Write;

use tracing::warn;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::{ChatlensError, RenderError};
use crate::report::Report;
use crate::stats::EmojiCount;
use crate::table::ChatTable;

/// Width in cells of the longest bar.
pub const BAR_WIDTH: usize = 40;

/// Shown instead of the emoji chart when no emoji was used.
pub const NO_EMOJIS: &str = "No emojis found in this chat.";

/// Fill characters for consecutive pie slices.
const SLICE_FILLS: &[char] = &['█', '▓', '▒', '░', '▚', '▞', '▖', '▗'];

/// Heatmap shades from empty to busiest.
const SHADES: &[char] = &[' ', '░', '▒', '▓', '█'];

/// How the emoji section is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiChart {
    /// No emoji in the selection.
    Empty,
    /// Pie chart lines.
    Pie(Vec<String>),
    /// The pie could not be drawn; bar chart lines plus the reason.
    BarFallback { warning: String, lines: Vec<String> },
}

fn pad_to(label: &str, width: usize) -> String {
    let mut padded = label.to_string();
    padded.push_str(&" ".repeat(width.saturating_sub(label.width())));
    padded
}

/// Horizontal bar chart, one line per row.
///
/// Bars are scaled to the largest value; any non-zero value gets at least
/// one cell.
pub fn bar_chart<L: AsRef<str>>(rows: &[(L, usize)]) -> Vec<String> {
    let label_width = rows.iter().map(|(l, _)| l.as_ref().width()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, v)| *v).max().unwrap_or(0);

    rows.iter()
        .map(|(label, value)| {
            let cells = if max == 0 {
                0
            } else {
                (value * BAR_WIDTH / max).max(usize::from(*value > 0))
            };
            format!(
                "{} │{} {}",
                pad_to(label.as_ref(), label_width),
                "█".repeat(cells),
                value
            )
        })
        .collect()
}

/// Text pie chart: a proportional strip followed by a legend with shares.
///
/// # Errors
///
/// [`RenderError::EmptyTotal`] if all values are zero, and
/// [`RenderError::UnmeasurableLabel`] if a label holds control characters.
pub fn pie_chart<L: AsRef<str>>(slices: &[(L, usize)]) -> Result<Vec<String>, RenderError> {
    let total: usize = slices.iter().map(|(_, v)| v).sum();
    if total == 0 {
        return Err(RenderError::EmptyTotal);
    }
    if let Some((label, _)) = slices
        .iter()
        .find(|(l, _)| l.as_ref().chars().any(|c| c.width().is_none()))
    {
        return Err(RenderError::UnmeasurableLabel(label.as_ref().to_string()));
    }

    let label_width = slices.iter().map(|(l, _)| l.as_ref().width()).max().unwrap_or(0);
    let mut strip = String::new();
    let mut legend = Vec::with_capacity(slices.len());
    let mut drawn = 0;
    let mut cumulative = 0;

    for (i, (label, value)) in slices.iter().enumerate() {
        let fill = SLICE_FILLS[i % SLICE_FILLS.len()];
        cumulative += value;
        // cumulative rounding keeps the strip exactly BAR_WIDTH wide
        let end = (cumulative * BAR_WIDTH + total / 2) / total;
        strip.extend(std::iter::repeat_n(fill, end - drawn));
        drawn = end;

        legend.push(format!(
            "{fill}{fill} {} {:>5.1}%",
            pad_to(label.as_ref(), label_width),
            *value as f64 * 100.0 / total as f64
        ));
    }

    let mut lines = vec![format!("[{strip}]")];
    lines.extend(legend);
    Ok(lines)
}

/// Chooses the emoji chart for the top `top` emojis.
///
/// A pie is drawn when possible; if it fails a bar chart is used instead and
/// a warning is logged.
pub fn emoji_chart(emojis: &[EmojiCount], top: usize) -> EmojiChart {
    if emojis.is_empty() {
        return EmojiChart::Empty;
    }
    let slices: Vec<(&str, usize)> = emojis
        .iter()
        .take(top)
        .map(|e| (e.emoji.as_str(), e.count))
        .collect();

    match pie_chart(&slices) {
        Ok(lines) => EmojiChart::Pie(lines),
        Err(e) => {
            warn!(error = %e, "emoji pie chart failed, falling back to bars");
            EmojiChart::BarFallback {
                warning: format!("⚠️  Pie chart unavailable ({e}); showing bars instead"),
                lines: bar_chart(&slices),
            }
        }
    }
}

fn section(out: &mut impl Write, title: &str) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "─".repeat(title.width().max(20)))
}

fn lines(out: &mut impl Write, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}

fn none(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "  (no data)")
}

/// Writes the full report as text.
pub fn render_text(report: &Report, out: &mut impl Write) -> Result<(), ChatlensError> {
    section(out, &format!("📊 Top Statistics ({})", report.selection))?;
    let s = &report.summary;
    lines(
        out,
        &[
            format!("Total Messages  {}", s.messages),
            format!("Total Words     {}", s.words),
            format!("Media Shared    {}", s.media),
            format!("Links Shared    {}", s.links),
        ],
    )?;

    section(out, "📅 Monthly Timeline")?;
    if report.monthly_timeline.is_empty() {
        none(out)?;
    } else {
        let rows: Vec<(&str, usize)> = report
            .monthly_timeline
            .iter()
            .map(|p| (p.label.as_str(), p.count))
            .collect();
        lines(out, &bar_chart(&rows))?;
    }

    section(out, "📆 Daily Timeline")?;
    if report.daily_timeline.is_empty() {
        none(out)?;
    } else {
        let rows: Vec<(String, usize)> = report
            .daily_timeline
            .iter()
            .map(|p| (p.date.format("%Y-%m-%d").to_string(), p.count))
            .collect();
        lines(out, &bar_chart(&rows))?;
    }

    section(out, "🗓️ Most Busy Day")?;
    activity(out, &report.busy_days)?;

    section(out, "🗓️ Most Busy Month")?;
    activity(out, &report.busy_months)?;

    section(out, "🔥 Weekly Activity Map")?;
    heatmap(out, report)?;

    if let Some(busy) = &report.busy_users {
        section(out, "👥 Most Busy Users")?;
        if busy.is_empty() {
            none(out)?;
        } else {
            let rows: Vec<(&str, usize)> =
                busy.top.iter().map(|u| (u.name.as_str(), u.count)).collect();
            lines(out, &bar_chart(&rows))?;
            writeln!(out)?;
            let width = busy.shares.iter().map(|u| u.name.width()).max().unwrap_or(0);
            for share in &busy.shares {
                writeln!(out, "  {} {:>6.2}%", pad_to(&share.name, width), share.percent)?;
            }
        }
    }

    section(out, "☁️ Wordcloud")?;
    if report.wordcloud.is_empty() {
        none(out)?;
    } else {
        let words: Vec<&str> = report.wordcloud.words.iter().map(|w| w.word.as_str()).take(15).collect();
        writeln!(
            out,
            "  {} words placed: {}",
            report.wordcloud.words.len(),
            words.join(" ")
        )?;
    }

    section(out, "💬 Most Common Words")?;
    if report.common_words.is_empty() {
        none(out)?;
    } else {
        let rows: Vec<(&str, usize)> = report
            .common_words
            .iter()
            .map(|w| (w.word.as_str(), w.count))
            .collect();
        lines(out, &bar_chart(&rows))?;
    }

    section(out, "😀 Emoji Analysis")?;
    match emoji_chart(&report.emojis, report.top_emojis) {
        EmojiChart::Empty => writeln!(out, "  {NO_EMOJIS}")?,
        EmojiChart::Pie(chart) => {
            emoji_table(out, &report.emojis)?;
            writeln!(out)?;
            lines(out, &chart)?;
        }
        EmojiChart::BarFallback { warning, lines: chart } => {
            emoji_table(out, &report.emojis)?;
            writeln!(out)?;
            writeln!(out, "  {warning}")?;
            lines(out, &chart)?;
        }
    }

    section(out, "🎭 Emoji Emotions")?;
    let rows: Vec<(&str, usize)> = report
        .emotions
        .iter()
        .map(|e| (e.emotion.as_str(), e.count))
        .collect();
    lines(out, &bar_chart(&rows))?;

    section(out, "🙂 Sentiment")?;
    let rows: Vec<(&str, usize)> = report
        .sentiment
        .iter()
        .map(|s| (s.sentiment.as_str(), s.messages))
        .collect();
    lines(out, &bar_chart(&rows))?;

    out.flush()?;
    Ok(())
}

fn activity(out: &mut impl Write, counts: &[crate::stats::ActivityCount]) -> std::io::Result<()> {
    if counts.is_empty() {
        return none(out);
    }
    let rows: Vec<(&str, usize)> = counts.iter().map(|a| (a.label.as_str(), a.count)).collect();
    lines(out, &bar_chart(&rows))
}

fn emoji_table(out: &mut impl Write, emojis: &[EmojiCount]) -> std::io::Result<()> {
    let width = emojis.iter().map(|e| e.emoji.width()).max().unwrap_or(0);
    for e in emojis.iter().take(20) {
        writeln!(out, "  {} {}", pad_to(&e.emoji, width), e.count)?;
    }
    if emojis.len() > 20 {
        writeln!(out, "  … {} more", emojis.len() - 20)?;
    }
    Ok(())
}

fn heatmap(out: &mut impl Write, report: &Report) -> std::io::Result<()> {
    let heat = &report.heatmap;
    let max = heat.max();
    if max == 0 {
        return none(out);
    }
    let width = heat.days.iter().map(|d| d.width()).max().unwrap_or(0);

    // hour ruler, one cell per hour
    writeln!(
        out,
        "  {} 0     6     12    18   23",
        " ".repeat(width)
    )?;
    for (day, row) in heat.days.iter().zip(&heat.counts) {
        let cells: String = row
            .iter()
            .map(|&count| {
                let level = if count == 0 {
                    0
                } else {
                    1 + (count * (SHADES.len() - 2)) / max
                };
                SHADES[level.min(SHADES.len() - 1)]
            })
            .collect();
        writeln!(out, "  {} {cells}", pad_to(day, width))?;
    }
    Ok(())
}

/// Writes the messages table, one message per line.
///
/// Continuation lines of multi-line messages are indented under their
/// message.
pub fn render_messages(table: &ChatTable, out: &mut impl Write) -> Result<(), ChatlensError> {
    let width = table.iter().map(|m| m.sender.width()).max().unwrap_or(0);
    for msg in table {
        let mut text = msg.content.lines();
        writeln!(
            out,
            "{}  {}  {}",
            msg.timestamp.format("%Y-%m-%d %H:%M"),
            pad_to(&msg.sender, width),
            text.next().unwrap_or("")
        )?;
        for rest in text {
            writeln!(out, "{}{rest}", " ".repeat(16 + 2 + width + 2))?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::preprocess;
    use crate::report::{AnalysisContext, analyze};

    fn render(chat: &str) -> String {
        let report = analyze(&AnalysisContext::new(preprocess(chat))).unwrap();
        let mut out = Vec::new();
        render_text(&report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_bar_chart_scaling() {
        let chart = bar_chart(&[("Alice", 4), ("Bob", 1), ("Zed", 0)]);
        assert_eq!(chart[0], format!("Alice │{} 4", "█".repeat(BAR_WIDTH)));
        assert_eq!(chart[1], format!("Bob   │{} 1", "█".repeat(BAR_WIDTH / 4)));
        assert_eq!(chart[2], "Zed   │ 0");
    }

    #[test]
    fn test_bar_chart_aligns_wide_labels() {
        let chart = bar_chart(&[("😂", 2), ("ok", 1)]);
        let bar_col: Vec<usize> = chart
            .iter()
            .map(|l| l[..l.find('│').unwrap()].width())
            .collect();
        assert_eq!(bar_col[0], bar_col[1]);
    }

    #[test]
    fn test_pie_chart_strip_width_and_shares() {
        let pie = pie_chart(&[("😂", 3), ("❤️", 1)]).unwrap();
        let strip = &pie[0];
        assert_eq!(strip.chars().count(), BAR_WIDTH + 2);
        assert!(pie[1].contains("75.0%"));
        assert!(pie[2].contains("25.0%"));
    }

    #[test]
    fn test_pie_chart_errors() {
        assert_eq!(pie_chart(&[("😂", 0)]), Err(RenderError::EmptyTotal));
        assert_eq!(
            pie_chart(&[("a\u{7}", 1)]),
            Err(RenderError::UnmeasurableLabel("a\u{7}".into()))
        );
    }

    #[test]
    fn test_emoji_chart_branches() {
        assert_eq!(emoji_chart(&[], 5), EmojiChart::Empty);

        let ok = vec![EmojiCount { emoji: "😂".into(), count: 2 }];
        assert!(matches!(emoji_chart(&ok, 5), EmojiChart::Pie(_)));

        let zero = vec![EmojiCount { emoji: "😂".into(), count: 0 }];
        match emoji_chart(&zero, 5) {
            EmojiChart::BarFallback { warning, lines } => {
                assert!(warning.contains("no data"));
                assert_eq!(lines.len(), 1);
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[test]
    fn test_render_text_sections() {
        let text = render(
            "01/01/24, 10:00 - Alice: Hello there 😂
01/01/24, 10:01 - Bob: <Media omitted>",
        );
        for heading in [
            "Top Statistics (overall)",
            "Monthly Timeline",
            "Most Busy Users",
            "Most Common Words",
            "Emoji Analysis",
            "Sentiment",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.contains("Total Messages  2"));
        assert!(!text.contains(NO_EMOJIS));
    }

    #[test]
    fn test_render_no_emoji_branch() {
        let text = render("01/01/24, 10:00 - Alice: plain words only");
        assert!(text.contains(NO_EMOJIS));
    }

    #[test]
    fn test_render_empty_chat() {
        let text = render("");
        assert!(text.contains("Total Messages  0"));
        assert!(text.contains("(no data)"));
        assert!(text.contains(NO_EMOJIS));
    }

    #[test]
    fn test_render_messages_multiline() {
        let table = preprocess("01/01/24, 10:00 - Alice: first\nsecond\n01/01/24, 10:01 - Bob: yo");
        let mut out = Vec::new();
        render_messages(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "2024-01-01 10:00  Alice  first");
        assert!(rows[1].ends_with("second"));
        assert_eq!(rows[2], "2024-01-01 10:01  Bob    yo");
    }
}

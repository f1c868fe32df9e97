//! Edge case tests for chatlens.
//!
//! Malformed exports, locale quirks and empty selections must never panic:
//! they yield empty tables and zero counts instead.

use chatlens::parsing::DateFormat;
use chatlens::prelude::*;
use chatlens::stats::Sentiment;

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn test_only_continuation_lines() {
    let (table, report) =
        WhatsAppParser::new().parse_with_report("just some text\nwith no headers\n\n");
    assert!(table.is_empty());
    assert_eq!(report.orphan_lines, 2);

    let summary = fetch_stats(&Selection::Overall, &table);
    assert_eq!(summary.messages, 0);
}

#[test]
fn test_header_with_empty_text() {
    let table = preprocess("01/01/24, 10:00 - Alice: ");
    assert_eq!(table.len(), 1);
    assert!(table.messages()[0].is_empty());
    assert_eq!(fetch_stats(&Selection::Overall, &table).words, 0);
}

#[test]
fn test_sender_with_colon_space_in_text() {
    let table = preprocess("01/01/24, 10:00 - +91 98765 43210: note: call me");
    assert_eq!(table.messages()[0].sender, "+91 98765 43210");
    assert_eq!(table.messages()[0].content, "note: call me");
}

#[test]
fn test_header_line_inside_message_text() {
    // The second line looks like a header but its date is impossible.
    let table = preprocess("01/01/24, 10:00 - Alice: quoting\n32/13/24, 10:00 - Bob: fake");
    assert_eq!(table.len(), 1);
    assert!(table.messages()[0].content.ends_with("32/13/24, 10:00 - Bob: fake"));
}

// ============================================================================
// Locale formats
// ============================================================================

#[test]
fn test_us_twelve_hour_dash_format() {
    let (table, report) = WhatsAppParser::new()
        .parse_with_report("1/15/24, 9:05 PM - Alice: evening\n1/16/24, 12:30 AM - Bob: late");
    assert_eq!(report.format, Some(DateFormat::DashUs));
    assert_eq!(table.messages()[0].hour(), 21);
    assert_eq!(table.messages()[1].hour(), 0);
    assert_eq!(table.messages()[1].period(), "00-1");
}

#[test]
fn test_narrow_nbsp_before_am_pm() {
    let table = preprocess("1/15/24, 9:05\u{202F}PM - Alice: iOS 17 style");
    assert_eq!(table.len(), 1);
    assert_eq!(table.messages()[0].hour(), 21);
}

#[test]
fn test_dotted_german_format() {
    let (table, report) =
        WhatsAppParser::new().parse_with_report("26.10.2025, 20:40 - Jonas: Hallo zusammen");
    assert_eq!(report.format, Some(DateFormat::DashDot));
    assert_eq!(table.messages()[0].month_name(), "October");
}

// ============================================================================
// Selections and filters
// ============================================================================

#[test]
fn test_unknown_user_gives_empty_results() {
    let table = preprocess("01/01/24, 10:00 - Alice: hi 😂");
    let nobody = Selection::from("Nobody");

    assert_eq!(fetch_stats(&nobody, &table).messages, 0);
    assert!(monthly_timeline(&nobody, &table).is_empty());
    assert!(most_common_words(&nobody, &table).is_empty());
    assert!(emoji_helper(&nobody, &table).is_empty());
    assert!(create_wordcloud(&nobody, &table).is_empty());
    let sentiment = sentiment_analysis(&nobody, &table);
    assert!(sentiment.iter().all(|s| s.messages == 0));
    assert_eq!(sentiment[2].sentiment, Sentiment::Neutral);
}

#[test]
fn test_overall_literal_selects_everyone() {
    let table = preprocess("01/01/24, 10:00 - Alice: a\n01/01/24, 10:01 - Bob: b");
    assert_eq!(fetch_stats(&Selection::from("overall"), &table).messages, 2);
}

#[test]
fn test_group_notifications_only() {
    let table = preprocess(
        "01/01/24, 09:00 - Messages and calls are end-to-end encrypted.\n\
         01/01/24, 09:01 - Alice created group \"Trip\"",
    );
    assert_eq!(table.len(), 2);
    assert!(table.users().is_empty());
    assert!(most_busy_users(&table).is_empty());
    assert!(most_common_words(&Selection::Overall, &table).is_empty());
    // notifications still count as rows
    assert_eq!(fetch_stats(&Selection::Overall, &table).messages, 2);
}

#[test]
fn test_single_day_range() {
    let table = preprocess(
        "01/01/24, 23:59 - Alice: last\n02/01/24, 00:00 - Bob: first\n03/01/24, 00:00 - Bob: next",
    );
    let filter = FilterConfig::new()
        .with_start_date("2024-01-02")
        .unwrap()
        .with_end_date("2024-01-02")
        .unwrap();
    let day = apply_filters(&table, &filter);
    assert_eq!(day.len(), 1);
    assert_eq!(day.messages()[0].content, "first");
}

// ============================================================================
// Text policies
// ============================================================================

#[test]
fn test_link_only_message() {
    let table = preprocess("01/01/24, 10:00 - Alice: https://a.example https://b.example");
    let summary = fetch_stats(&Selection::Overall, &table);
    assert_eq!(summary.links, 2);
    assert_eq!(summary.words, 0);
}

#[test]
fn test_localized_media_placeholder() {
    let table = preprocess("01/01/24, 10:00 - Alice: <Medien ausgeschlossen>");
    assert_eq!(fetch_stats(&Selection::Overall, &table).media, 0);

    let engine = StatsEngine::new(
        AnalysisConfig::new().with_media_placeholder("<Medien ausgeschlossen>"),
    )
    .unwrap();
    assert_eq!(engine.fetch_stats(&Selection::Overall, &table).media, 1);
    assert!(engine.most_common_words(&Selection::Overall, &table).is_empty());
}

#[test]
fn test_emoji_only_messages_have_no_words() {
    let table = preprocess("01/01/24, 10:00 - Alice: 😂😂😂");
    assert!(most_common_words(&Selection::Overall, &table).is_empty());
    assert_eq!(emoji_helper(&Selection::Overall, &table)[0].count, 3);
    // still whitespace tokens for the summary
    assert_eq!(fetch_stats(&Selection::Overall, &table).words, 1);
}

#[test]
fn test_cyrillic_words() {
    let table = preprocess("01/01/24, 10:00 - Иван: Привет мир, привет!");
    let words = most_common_words(&Selection::Overall, &table);
    assert_eq!(words[0].word, "привет");
    assert_eq!(words[0].count, 2);
}

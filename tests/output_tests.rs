//! Tests for artifact writers (CSV, JSON, SVG)

use chatlens::core::output::{
    EMOJI_USAGE_FILE, REPORT_FILE, WORD_FREQUENCY_FILE, WORDCLOUD_FILE, read_emoji_csv,
    read_word_csv, to_emoji_csv, to_report_json, to_word_csv, write_artifacts, write_emoji_csv,
    write_report_json, write_svg, write_word_csv,
};
use chatlens::prelude::*;
use chatlens::stats::{EmojiCount, WordCount};
use std::fs;
use tempfile::tempdir;

const CHAT: &str = "05/06/24, 19:00 - Alice: pizza tonight? 🍕🍕
05/06/24, 19:02 - Bob: pizza & movies <3 😂
06/06/24, 08:15 - Alice: movies were great 😂
06/06/24, 08:16 - Bob: <Media omitted>";

fn sample_report() -> Report {
    analyze(&AnalysisContext::new(preprocess(CHAT))).unwrap()
}

fn sample_words() -> Vec<WordCount> {
    vec![
        WordCount { word: "pizza".into(), count: 2 },
        WordCount { word: "movies".into(), count: 2 },
        WordCount { word: "a,b".into(), count: 1 },
    ]
}

// ============================================================================
// CSV Writer Tests
// ============================================================================

mod csv_writer_tests {
    use super::*;

    #[test]
    fn test_word_csv_header_and_order() {
        let csv = to_word_csv(&sample_words()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "word,count");
        assert_eq!(lines[1], "pizza,2");
        assert_eq!(lines[2], "movies,2");
        // delimiter inside a value gets quoted
        assert_eq!(lines[3], "\"a,b\",1");
    }

    #[test]
    fn test_word_csv_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.csv");

        write_word_csv(&sample_words(), &path).unwrap();
        assert_eq!(read_word_csv(&path).unwrap(), sample_words());
    }

    #[test]
    fn test_emoji_csv_keeps_compound_emojis() {
        let emojis = vec![
            EmojiCount { emoji: "👍🏽".into(), count: 4 },
            EmojiCount { emoji: "❤️".into(), count: 1 },
        ];
        let dir = tempdir().unwrap();
        let path = dir.path().join("emojis.csv");

        write_emoji_csv(&emojis, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("emoji,count\n"));
        assert!(content.contains("👍🏽,4"));
        assert_eq!(read_emoji_csv(&path).unwrap(), emojis);
    }

    #[test]
    fn test_empty_tables_keep_header() {
        assert_eq!(to_emoji_csv(&[]).unwrap(), "emoji,count\n");
        assert_eq!(to_word_csv(&[]).unwrap(), "word,count\n");
    }

    #[test]
    fn test_write_csv_to_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("words.csv");
        let err = write_word_csv(&sample_words(), &path).unwrap_err();
        assert!(err.is_io());
    }
}

// ============================================================================
// JSON Writer Tests
// ============================================================================

mod json_writer_tests {
    use super::*;

    #[test]
    fn test_report_json_fields() {
        let json = to_report_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["selection"], "overall");
        assert_eq!(value["summary"]["messages"], 4);
        assert_eq!(value["summary"]["media"], 1);
        assert_eq!(value["common_words"][0]["word"], "pizza");
        assert_eq!(value["emojis"][0]["count"], 2);
        assert_eq!(value["sentiment"].as_array().unwrap().len(), 3);
        // the layout goes to SVG, not JSON
        assert!(value.get("wordcloud").is_none());
    }

    #[test]
    fn test_write_report_json_is_pretty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_report_json(&sample_report(), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n"));
        assert!(content.ends_with("}\n"));
    }
}

// ============================================================================
// SVG + Artifact Directory Tests
// ============================================================================

mod artifact_tests {
    use super::*;

    #[test]
    fn test_svg_escapes_markup() {
        let report = sample_report();
        let dir = tempdir().unwrap();
        let path = dir.path().join("cloud.svg");

        write_svg(&report.wordcloud, &path).unwrap();
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(">pizza</text>"));
        assert!(!svg.contains("<3"));
    }

    #[test]
    fn test_write_artifacts_creates_nested_dir() {
        let report = sample_report();
        let dir = tempdir().unwrap();
        let out = dir.path().join("a").join("b");

        let written = write_artifacts(&report, &out, false).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![WORD_FREQUENCY_FILE, EMOJI_USAGE_FILE, WORDCLOUD_FILE]);
        assert!(!out.join(REPORT_FILE).exists());
    }

    #[test]
    fn test_write_artifacts_with_json() {
        let report = sample_report();
        let dir = tempdir().unwrap();

        let written = write_artifacts(&report, dir.path(), true).unwrap();
        assert_eq!(written.last().unwrap(), &dir.path().join(REPORT_FILE));
        assert_eq!(read_emoji_csv(&written[1]).unwrap(), report.emojis);
    }

    #[test]
    fn test_emoji_free_chat_writes_emoji_header() {
        let table = preprocess("01/01/24, 10:00 - Alice: plain words only");
        let report = analyze(&AnalysisContext::new(table)).unwrap();
        let dir = tempdir().unwrap();

        write_artifacts(&report, dir.path(), false).unwrap();
        let emojis = fs::read_to_string(dir.path().join(EMOJI_USAGE_FILE)).unwrap();
        assert!(emojis.starts_with("emoji,count"));
        assert!(read_emoji_csv(dir.path().join(EMOJI_USAGE_FILE)).unwrap().is_empty());
    }

    #[test]
    fn test_artifacts_for_empty_report() {
        let report = analyze(&AnalysisContext::new(preprocess(""))).unwrap();
        let dir = tempdir().unwrap();

        let written = write_artifacts(&report, dir.path(), false).unwrap();
        assert_eq!(written.len(), 3);
        assert!(read_word_csv(&written[0]).unwrap().is_empty());
        assert_eq!(fs::read_to_string(&written[1]).unwrap(), "emoji,count\n");
        let svg = fs::read_to_string(&written[2]).unwrap();
        assert!(!svg.contains("<text"));
    }
}

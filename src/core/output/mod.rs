//! Artifact writers.
//!
//! This module writes the downloadable results of an analysis:
//! - [`write_word_csv`] / [`write_emoji_csv`] - frequency tables as CSV - requires `csv-output` feature
//! - [`write_report_json`] - the whole [`Report`](crate::report::Report) - requires `json-output` feature
//! - [`write_svg`] - the word cloud layout as SVG
//!
//! [`write_artifacts`] writes all of them into one directory under fixed
//! file names:
//!
//! | File | Content |
//! |------|---------|
//! | `word_frequency.csv` | `word,count` rows, most frequent first |
//! | `emoji_usage.csv` | `emoji,count` rows, most frequent first |
//! | `wordcloud.svg` | word cloud drawing |
//! | `report.json` | full report (only when requested) |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::output::write_artifacts;
//! use chatlens::parser::preprocess;
//! use chatlens::report::{AnalysisContext, analyze};
//!
//! let table = preprocess("01/01/24, 10:00 - Alice: pizza tonight 🍕");
//! let report = analyze(&AnalysisContext::new(table))?;
//!
//! let written = write_artifacts(&report, "out", true)?;
//! assert_eq!(written.len(), 4);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{
    read_emoji_csv, read_word_csv, to_emoji_csv, to_word_csv, write_emoji_csv, write_word_csv,
};
#[cfg(feature = "json-output")]
pub use json_writer::{to_report_json, write_report_json};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ChatlensError;
use crate::report::Report;
use crate::stats::WordCloud;

pub const WORD_FREQUENCY_FILE: &str = "word_frequency.csv";
pub const EMOJI_USAGE_FILE: &str = "emoji_usage.csv";
pub const WORDCLOUD_FILE: &str = "wordcloud.svg";
pub const REPORT_FILE: &str = "report.json";

/// Writes a word cloud as an SVG file.
pub fn write_svg(cloud: &WordCloud, path: impl AsRef<Path>) -> Result<(), ChatlensError> {
    std::fs::write(path, cloud.to_svg())?;
    Ok(())
}

/// Writes every artifact of `report` into `dir`, creating it if needed.
///
/// Returns the paths written, in the order of the table above. Artifacts
/// whose feature is disabled are skipped.
pub fn write_artifacts(
    report: &Report,
    dir: impl AsRef<Path>,
    include_json: bool,
) -> Result<Vec<PathBuf>, ChatlensError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    #[cfg(feature = "csv-output")]
    {
        let path = dir.join(WORD_FREQUENCY_FILE);
        write_word_csv(&report.common_words, &path)?;
        written.push(path);

        let path = dir.join(EMOJI_USAGE_FILE);
        write_emoji_csv(&report.emojis, &path)?;
        written.push(path);
    }

    let path = dir.join(WORDCLOUD_FILE);
    write_svg(&report.wordcloud, &path)?;
    written.push(path);

    #[cfg(feature = "json-output")]
    {
        if include_json {
            let path = dir.join(REPORT_FILE);
            write_report_json(report, &path)?;
            written.push(path);
        }
    }
    #[cfg(not(feature = "json-output"))]
    let _ = include_json;

    debug!(dir = %dir.display(), files = written.len(), "wrote artifacts");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::preprocess;
    use crate::report::{AnalysisContext, analyze};

    #[test]
    fn test_write_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cloud.svg");
        write_svg(&WordCloud { width: 10, height: 10, words: vec![] }, &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }

    #[cfg(all(feature = "csv-output", feature = "json-output"))]
    #[test]
    fn test_write_artifacts_creates_dir() {
        let table = preprocess("01/01/24, 10:00 - Alice: pizza pizza 😂");
        let report = analyze(&AnalysisContext::new(table)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/out");
        let written = write_artifacts(&report, &out, false).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![WORD_FREQUENCY_FILE, EMOJI_USAGE_FILE, WORDCLOUD_FILE]);
        assert!(!out.join(REPORT_FILE).exists());

        let words = read_word_csv(out.join(WORD_FREQUENCY_FILE)).unwrap();
        assert_eq!(words, report.common_words);
    }
}

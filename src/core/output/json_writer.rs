//! JSON report writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ChatlensError;
use crate::report::Report;

/// Writes the whole analysis report as pretty-printed JSON.
///
/// # Format
/// ```json
/// {
///   "selection": "overall",
///   "summary": {"messages": 3, "words": 6, "media": 1, "links": 1},
///   ...
/// }
/// ```
pub fn write_report_json(report: &Report, path: impl AsRef<Path>) -> Result<(), ChatlensError> {
    let json = to_report_json(report)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Same as [`write_report_json`] but returns the JSON text.
pub fn to_report_json(report: &Report) -> Result<String, ChatlensError> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::preprocess;
    use crate::report::{AnalysisContext, analyze};
    use tempfile::NamedTempFile;

    #[test]
    fn test_report_json_fields() {
        let table = preprocess(
            "01/01/24, 10:00 - Alice: Hello there 😂
01/01/24, 10:01 - Bob: <Media omitted>",
        );
        let report = analyze(&AnalysisContext::new(table)).unwrap();
        let json = to_report_json(&report).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["selection"], "overall");
        assert_eq!(value["summary"]["messages"], 2);
        assert_eq!(value["emojis"][0]["emoji"], "😂");
        assert_eq!(value["busy_users"]["top"][0]["name"], "Alice");
    }

    #[test]
    fn test_write_report_json_file() {
        let report = analyze(&AnalysisContext::new(preprocess(""))).unwrap();
        let file = NamedTempFile::new().unwrap();
        write_report_json(&report, file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("\"summary\""));
        assert!(content.ends_with("}\n"));
    }
}

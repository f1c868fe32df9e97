//! CSV artifact writer and reader.

use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ChatlensError;
use crate::stats::{EmojiCount, WordCount};

const WORD_HEADER: [&str; 2] = ["word", "count"];
const EMOJI_HEADER: [&str; 2] = ["emoji", "count"];

/// Writes the word frequency table.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `word`, `count`
/// - Encoding: UTF-8
pub fn write_word_csv(words: &[WordCount], path: impl AsRef<Path>) -> Result<(), ChatlensError> {
    write_records(WORD_HEADER, words, std::fs::File::create(path)?)
}

/// Writes the emoji usage table with columns `emoji`, `count`.
pub fn write_emoji_csv(
    emojis: &[EmojiCount],
    path: impl AsRef<Path>,
) -> Result<(), ChatlensError> {
    write_records(EMOJI_HEADER, emojis, std::fs::File::create(path)?)
}

/// Word frequency table as a CSV string.
pub fn to_word_csv(words: &[WordCount]) -> Result<String, ChatlensError> {
    to_csv_string(WORD_HEADER, words)
}

/// Emoji usage table as a CSV string.
pub fn to_emoji_csv(emojis: &[EmojiCount]) -> Result<String, ChatlensError> {
    to_csv_string(EMOJI_HEADER, emojis)
}

/// Reads a table written by [`write_word_csv`].
pub fn read_word_csv(path: impl AsRef<Path>) -> Result<Vec<WordCount>, ChatlensError> {
    read_records(std::fs::File::open(path)?)
}

/// Reads a table written by [`write_emoji_csv`].
pub fn read_emoji_csv(path: impl AsRef<Path>) -> Result<Vec<EmojiCount>, ChatlensError> {
    read_records(std::fs::File::open(path)?)
}

fn write_records<T: Serialize, W: Write>(
    header: [&str; 2],
    records: &[T],
    sink: W,
) -> Result<(), ChatlensError> {
    // serde headers only appear with the first record; empty tables still need one
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(sink);
    writer.write_record(header)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn to_csv_string<T: Serialize>(header: [&str; 2], records: &[T]) -> Result<String, ChatlensError> {
    let mut buffer = Vec::new();
    write_records(header, records, &mut buffer)?;
    // csv only writes the UTF-8 it was given
    String::from_utf8(buffer).map_err(|e| ChatlensError::invalid_format("CSV", e.to_string()))
}

fn read_records<T: DeserializeOwned, R: Read>(source: R) -> Result<Vec<T>, ChatlensError> {
    let mut reader = csv::Reader::from_reader(source);
    let records = reader.deserialize().collect::<Result<Vec<T>, csv::Error>>()?;
    Ok(records)
}

//! CSV tables exchanged with the reporting layer.
//!
//! Column names are a stable contract: exported files are re-imported by the
//! analysis flow, so `username,text,mentions,genero` and
//! `palavra,frequencia` must not change.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{HarvestError, Result};
use crate::models::{CommentRecord, ProcessingLog, WordFrequencyEntry};

pub const COMMENTS_FILE: &str = "comments.csv";
pub const WORDS_FILE: &str = "words.csv";
pub const LOG_FILE: &str = "processing.log";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRow {
    pub username: String,
    pub text: String,
    #[serde(default)]
    pub mentions: String,
    #[serde(default)]
    pub genero: String,
}

impl From<&CommentRecord> for CommentRow {
    fn from(record: &CommentRecord) -> Self {
        Self {
            username: record.handle.clone(),
            text: record.text.clone(),
            mentions: record.mentions_display(),
            genero: record.gender.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRow {
    pub palavra: String,
    pub frequencia: usize,
}

impl From<&WordFrequencyEntry> for WordRow {
    fn from(entry: &WordFrequencyEntry) -> Self {
        Self {
            palavra: entry.word.clone(),
            frequencia: entry.count,
        }
    }
}

impl From<WordRow> for WordFrequencyEntry {
    fn from(row: WordRow) -> Self {
        Self {
            word: row.palavra,
            count: row.frequencia,
        }
    }
}

pub const COMMENT_COLUMNS: [&str; 4] = ["username", "text", "mentions", "genero"];
pub const WORD_COLUMNS: [&str; 2] = ["palavra", "frequencia"];

pub fn write_comments<W: Write>(writer: W, records: &[CommentRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(writer);
    // serde only emits headers alongside the first row
    if records.is_empty() {
        wtr.write_record(COMMENT_COLUMNS)?;
    }
    for record in records {
        wtr.serialize(CommentRow::from(record))?;
    }
    wtr.flush().map_err(|e| HarvestError::io("comments table", e))?;
    Ok(())
}

pub fn write_words<W: Write>(writer: W, table: &[WordFrequencyEntry]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(writer);
    if table.is_empty() {
        wtr.write_record(WORD_COLUMNS)?;
    }
    for entry in table {
        wtr.serialize(WordRow::from(entry))?;
    }
    wtr.flush().map_err(|e| HarvestError::io("words table", e))?;
    Ok(())
}

pub fn read_comments<R: Read>(reader: R) -> Result<Vec<CommentRow>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut rows = Vec::new();
    for row in rdr.deserialize::<CommentRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

pub fn read_words<R: Read>(reader: R) -> Result<Vec<WordFrequencyEntry>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut table = Vec::new();
    for row in rdr.deserialize::<WordRow>() {
        table.push(row?.into());
    }
    Ok(table)
}

pub fn read_comments_file(path: &Path) -> Result<Vec<CommentRow>> {
    read_comments(BufReader::new(open(path)?))
}

pub fn read_words_file(path: &Path) -> Result<Vec<WordFrequencyEntry>> {
    read_words(BufReader::new(open(path)?))
}

/// Writes the three run artifacts into `dir`, creating it if needed.
pub fn write_artifacts(
    dir: &Path,
    records: &[CommentRecord],
    table: &[WordFrequencyEntry],
    log: &ProcessingLog,
) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| HarvestError::io(dir.display().to_string(), e))?;
    write_comments(BufWriter::new(create(&dir.join(COMMENTS_FILE))?), records)?;
    write_words(BufWriter::new(create(&dir.join(WORDS_FILE))?), table)?;

    let log_path = dir.join(LOG_FILE);
    let mut out = BufWriter::new(create(&log_path)?);
    out.write_all(log.to_string().as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| HarvestError::io(log_path.display().to_string(), e))?;
    Ok(())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| HarvestError::io(path.display().to_string(), e))
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| HarvestError::io(path.display().to_string(), e))
}

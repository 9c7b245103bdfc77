//! End-to-end runs.
//!
//! [`CommentPipeline::process_document`] turns a saved page into comment
//! records, a word-frequency table and a processing log.
//! [`CommentPipeline::reanalyze`] takes previously exported tables back
//! through cleanup and dedup and summarises them.

use scraper::Html;
use serde::Serialize;

use crate::dedup::{AggregateStats, CommentAggregator};
use crate::dom::DomNode;
use crate::export::CommentRow;
use crate::extractor::CommentExtractor;
use crate::frequency::{total_words, word_frequencies};
use crate::gender::NameGenderTable;
use crate::locator::locate_comment_section;
use crate::models::{CommentRecord, Gender, ProcessingLog, WordFrequencyEntry};
use crate::normalizer::Normalizer;

/// Top-words count shown in analysis summaries by default.
pub const DEFAULT_TOP_WORDS: usize = 20;

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub records: Vec<CommentRecord>,
    pub frequencies: Vec<WordFrequencyEntry>,
    pub log: ProcessingLog,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenderCount {
    pub gender: Gender,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub total_comments: usize,
    pub genders: Vec<GenderCount>,
    pub top_words: Vec<WordFrequencyEntry>,
}

#[derive(Default)]
pub struct CommentPipeline {
    extractor: CommentExtractor,
    normalizer: Normalizer,
}

impl CommentPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parts(extractor: CommentExtractor, normalizer: Normalizer) -> Self {
        Self {
            extractor,
            normalizer,
        }
    }

    /// Processes one saved page. Undecodable bytes are replaced, never rejected.
    pub fn process_document(&self, document: &[u8], names: &NameGenderTable) -> PipelineOutput {
        let mut log = ProcessingLog::new();
        log.push("Starting HTML processing...");

        let html_text = String::from_utf8_lossy(document);
        let html = Html::parse_document(&html_text);
        let section = locate_comment_section(html.root_element());
        log.push(format!(
            "Comment section located via {} (<{}>)",
            section.strategy,
            section.root.tag_name()
        ));

        let extraction = self.extractor.extract(section.root);
        log.push(format!("Seed nodes: {}", extraction.seeds));
        log.push(format!("Nodes examined: {}", extraction.nodes_examined));
        log.push(format!("Candidates extracted: {}", extraction.candidates.len()));

        push_name_table_line(&mut log, names);

        let mut aggregator = CommentAggregator::new();
        let mut discarded = 0usize;
        for candidate in &extraction.candidates {
            match self.normalizer.clean(&candidate.raw_text) {
                Some(text) => {
                    if let Err(rejection) = aggregator.push(&candidate.handle, &text, names) {
                        log::debug!("Comment by {} rejected: {:?}", candidate.handle, rejection);
                    }
                }
                None => discarded += 1,
            }
        }
        let (records, stats) = aggregator.into_records();
        push_aggregate_lines(&mut log, discarded, &stats);
        log.push(format!("Valid comments after cleanup and dedup: {}", records.len()));

        let frequencies = word_frequencies(records.iter().map(|r| r.text.as_str()));
        log.push(format!("Unique words: {}", frequencies.len()));
        log.push(format!("Total words: {}", total_words(&frequencies)));
        log.push("Processing finished successfully.");

        PipelineOutput {
            records,
            frequencies,
            log,
        }
    }

    /// Re-runs cleanup and dedup over re-imported comment rows.
    ///
    /// A row's `genero` is kept when it is a known label; otherwise the
    /// handle is classified against `names`.
    pub fn reimport(&self, rows: &[CommentRow], names: &NameGenderTable) -> PipelineOutput {
        let mut log = ProcessingLog::new();
        log.push("Starting re-analysis of exported comments...");
        log.push(format!("Rows imported: {}", rows.len()));
        push_name_table_line(&mut log, names);

        let mut aggregator = CommentAggregator::new();
        let mut discarded = 0usize;
        for row in rows {
            let Some(text) = self.normalizer.clean(&row.text) else {
                discarded += 1;
                continue;
            };
            if row.username.trim().is_empty() {
                discarded += 1;
                continue;
            }
            let imported = row.genero.parse::<Gender>().ok();
            let pushed = aggregator.push_with_gender(&row.username, &text, |handle| {
                imported.unwrap_or_else(|| names.classify(handle))
            });
            if let Err(rejection) = pushed {
                log::debug!("Imported row by {} rejected: {:?}", row.username, rejection);
            }
        }
        let (records, stats) = aggregator.into_records();
        push_aggregate_lines(&mut log, discarded, &stats);
        log.push(format!("Valid comments after cleanup and dedup: {}", records.len()));

        let frequencies = word_frequencies(records.iter().map(|r| r.text.as_str()));
        log.push(format!("Unique words: {}", frequencies.len()));
        log.push(format!("Total words: {}", total_words(&frequencies)));
        log.push("Re-analysis finished successfully.");

        PipelineOutput {
            records,
            frequencies,
            log,
        }
    }

    /// Re-imports rows and summarises them. Top words come from
    /// `imported_words` when given, else from the recomputed table.
    pub fn reanalyze(
        &self,
        rows: &[CommentRow],
        imported_words: Option<&[WordFrequencyEntry]>,
        names: &NameGenderTable,
        top_n: usize,
    ) -> (AnalysisSummary, ProcessingLog) {
        let output = self.reimport(rows, names);
        let words = imported_words.unwrap_or(output.frequencies.as_slice());
        let summary = AnalysisSummary {
            total_comments: output.records.len(),
            genders: gender_counts(&output.records),
            top_words: words.iter().take(top_n).cloned().collect(),
        };
        (summary, output.log)
    }
}

/// Per-gender counts, largest first; ties ordered female, male, unknown.
/// Genders with no comments are left out.
pub fn gender_counts(records: &[CommentRecord]) -> Vec<GenderCount> {
    let mut counts: Vec<GenderCount> = [Gender::Female, Gender::Male, Gender::Unknown]
        .into_iter()
        .map(|gender| GenderCount {
            gender,
            count: records.iter().filter(|r| r.gender == gender).count(),
        })
        .filter(|gc| gc.count > 0)
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

fn push_name_table_line(log: &mut ProcessingLog, names: &NameGenderTable) {
    match names.unavailable_reason() {
        Some(reason) => log.push(format!(
            "Name table unavailable ({}); all handles classify as unknown",
            reason
        )),
        None => log.push(format!("Name table loaded: {} names", names.len())),
    }
}

fn push_aggregate_lines(log: &mut ProcessingLog, discarded: usize, stats: &AggregateStats) {
    log.push(format!("Comments discarded by cleanup: {}", discarded));
    log.push(format!("Self-mention artifacts discarded: {}", stats.self_mentions));
    log.push(format!("Duplicates discarded: {}", stats.duplicates));
}

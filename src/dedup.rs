use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::gender::NameGenderTable;
use crate::models::{CommentRecord, Gender};

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([A-Za-z0-9._]+)").expect("valid mention regex"));

/// Every `@handle` in `text`, in order of appearance, without the `@`.
pub fn detect_mentions(text: &str) -> Vec<String> {
    MENTION_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Why a cleaned comment did not make it into the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    SelfMention,
    Duplicate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateStats {
    pub accepted: usize,
    pub self_mentions: usize,
    pub duplicates: usize,
}

/// Builds the unique record set. First occurrence wins and input order is kept.
#[derive(Debug, Default)]
pub struct CommentAggregator {
    seen: HashSet<(String, String)>,
    records: Vec<CommentRecord>,
    stats: AggregateStats,
}

impl CommentAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a cleaned comment. The gender is resolved against `names`.
    pub fn push(
        &mut self,
        handle: &str,
        text: &str,
        names: &NameGenderTable,
    ) -> Result<(), Rejection> {
        self.push_with_gender(handle, text, |h| names.classify(h))
    }

    /// Like [`push`](Self::push) with a caller-supplied gender, e.g. a
    /// value re-imported from an earlier export.
    pub fn push_with_gender(
        &mut self,
        handle: &str,
        text: &str,
        gender: impl FnOnce(&str) -> Gender,
    ) -> Result<(), Rejection> {
        let mentions = detect_mentions(text);
        let handle_lower = handle.to_lowercase();
        if mentions.iter().any(|m| m.to_lowercase() == handle_lower) {
            self.stats.self_mentions += 1;
            return Err(Rejection::SelfMention);
        }

        let key = (handle_lower, text.to_lowercase());
        if !self.seen.insert(key) {
            self.stats.duplicates += 1;
            return Err(Rejection::Duplicate);
        }

        self.stats.accepted += 1;
        self.records.push(CommentRecord {
            handle: handle.to_string(),
            text: text.to_string(),
            mentions,
            gender: gender(handle),
        });
        Ok(())
    }

    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> (Vec<CommentRecord>, AggregateStats) {
        (self.records, self.stats)
    }
}

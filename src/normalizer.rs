//! Ordered text-cleaning passes.
//!
//! Each pass is a named [`CleaningStep`] that either returns the cleaned
//! text or `None` to signal that the input is not a comment at all. The
//! [`Normalizer`] runs its steps left to right and stops at the first `None`.
//! Later steps assume the earlier ones already ran, so the order in
//! [`Normalizer::standard`] is part of the contract.

use regex::Regex;
use std::sync::LazyLock;

static UI_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:Reply|Verified)\b").expect("valid UI label regex"));

static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,4}(?:sem|w|d|h)\b").expect("valid relative time regex"));

static CHROME_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b\d+\s+curtidas?\s+)?\bResponder\s+Opções\s+de\s+comentários\b(?:\s+Curtir\b)?",
    )
    .expect("valid chrome phrase regex")
});

/// Section header shown above collapsed reply threads.
pub const HIDDEN_REPLIES_HEADER: &str = "ocultar respostas";

/// Collapses every whitespace run into one space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One pass of the cleaning pipeline.
///
/// # Contract
///
/// - **Input**: the output of the previous step (or the raw text).
/// - **Output**: the transformed text, or `None` to discard the comment.
/// - **Pure**: no state is kept between calls.
pub trait CleaningStep: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, text: String) -> Option<String>;
}

/// Drops the "Reply" and "Verified" labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripUiLabels;

impl CleaningStep for StripUiLabels {
    fn name(&self) -> &'static str {
        "strip_ui_labels"
    }

    fn apply(&self, text: String) -> Option<String> {
        Some(UI_LABEL_RE.replace_all(&text, "").into_owned())
    }
}

/// Drops relative timestamps such as `3d`, `10w`, `5h` or `2sem`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripRelativeTimes;

impl CleaningStep for StripRelativeTimes {
    fn name(&self) -> &'static str {
        "strip_relative_times"
    }

    fn apply(&self, text: String) -> Option<String> {
        Some(RELATIVE_TIME_RE.replace_all(&text, "").into_owned())
    }
}

/// Drops the like-count / reply / options footer, whole or truncated.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripChromePhrase;

impl CleaningStep for StripChromePhrase {
    fn name(&self) -> &'static str {
        "strip_chrome_phrase"
    }

    fn apply(&self, text: String) -> Option<String> {
        let mut text = text;
        // A removal can splice a new phrase together out of its neighbours.
        while CHROME_PHRASE_RE.is_match(&text) {
            text = CHROME_PHRASE_RE.replace_all(&text, "").into_owned();
        }
        Some(text)
    }
}

/// Discards "Ocultar respostas" section headers outright.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardHiddenRepliesHeader;

impl CleaningStep for DiscardHiddenRepliesHeader {
    fn name(&self) -> &'static str {
        "discard_hidden_replies_header"
    }

    fn apply(&self, text: String) -> Option<String> {
        if collapse_whitespace(&text).to_lowercase().starts_with(HIDDEN_REPLIES_HEADER) {
            None
        } else {
            Some(text)
        }
    }
}

/// Collapses whitespace; empty results are discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollapseWhitespace;

impl CleaningStep for CollapseWhitespace {
    fn name(&self) -> &'static str {
        "collapse_whitespace"
    }

    fn apply(&self, text: String) -> Option<String> {
        let collapsed = collapse_whitespace(&text);
        if collapsed.is_empty() {
            None
        } else {
            Some(collapsed)
        }
    }
}

pub struct Normalizer {
    steps: Vec<Box<dyn CleaningStep>>,
}

impl Normalizer {
    /// The production pass order.
    pub fn standard() -> Self {
        Self::with_steps(vec![
            Box::new(StripUiLabels),
            Box::new(StripRelativeTimes),
            Box::new(StripChromePhrase),
            Box::new(DiscardHiddenRepliesHeader),
            Box::new(CollapseWhitespace),
        ])
    }

    pub fn with_steps(steps: Vec<Box<dyn CleaningStep>>) -> Self {
        Self { steps }
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Cleaned display text, or `None` when the input is not a comment.
    pub fn clean(&self, raw: &str) -> Option<String> {
        let mut text = raw.to_string();
        for step in &self.steps {
            match step.apply(text) {
                Some(next) => text = next,
                None => {
                    log::debug!("Comment discarded by {}", step.name());
                    return None;
                }
            }
        }
        Some(text)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::standard()
    }
}

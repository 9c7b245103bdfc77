//! # comment_harvest
//!
//! Pulls comment threads out of saved social-media pages and turns them into
//! tables for reporting.
//!
//! A run locates the comment subtree in the page, splits each comment node
//! into author handle and body, strips interface chrome from the body,
//! drops duplicates and self-mention artifacts, tags each author with a
//! gender guessed from their first name, and counts words across the
//! surviving comments.

pub mod config;
pub mod dedup;
pub mod dom;
pub mod error;
pub mod export;
pub mod extractor;
pub mod frequency;
pub mod gender;
pub mod locator;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod profile;

pub use error::{HarvestError, Result};
pub use gender::NameGenderTable;
pub use models::{CommentCandidate, CommentRecord, Gender, ProcessingLog, WordFrequencyEntry};
pub use normalizer::{CleaningStep, Normalizer};
pub use pipeline::{AnalysisSummary, CommentPipeline, PipelineOutput};

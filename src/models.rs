use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Author handle plus the raw, whitespace-collapsed text of one comment node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentCandidate {
    pub handle: String,
    pub raw_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "female" => Ok(Gender::Female),
            "male" => Ok(Gender::Male),
            "unknown" => Ok(Gender::Unknown),
            other => Err(format!("unrecognised gender label: {other:?}")),
        }
    }
}

/// A cleaned, deduplicated comment ready for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRecord {
    pub handle: String,
    pub text: String,
    pub mentions: Vec<String>,
    pub gender: Gender,
}

impl CommentRecord {
    /// Mentions as the comma-separated list shown to users.
    pub fn mentions_display(&self) -> String {
        self.mentions.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequencyEntry {
    pub word: String,
    pub count: usize,
}

/// Ordered, append-only progress lines for diagnostic display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingLog {
    lines: Vec<String>,
}

impl ProcessingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line and mirrors it to the `log` facade.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!("{}", line);
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for ProcessingLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

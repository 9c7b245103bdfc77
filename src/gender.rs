use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use crate::error::{HarvestError, Result};
use crate::models::Gender;

#[derive(Debug, Deserialize)]
struct NameRow {
    name: String,
    classification: String,
}

/// Uppercased first name -> classification code (`F`, `M`, ...).
#[derive(Debug, Clone, Default)]
pub struct NameGenderTable {
    names: HashMap<String, String>,
    unavailable_reason: Option<String>,
}

impl NameGenderTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Empty table standing in for one that could not be loaded.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            names: HashMap::new(),
            unavailable_reason: Some(reason.into()),
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        self.unavailable_reason.as_deref()
    }

    /// Adds a name unless it is already present; the first entry wins.
    pub fn insert(&mut self, name: &str, classification: &str) {
        let key = name.trim().to_uppercase();
        if key.is_empty() {
            return;
        }
        self.names
            .entry(key)
            .or_insert_with(|| classification.trim().to_string());
    }

    pub fn classification(&self, first_name: &str) -> Option<&str> {
        self.names.get(first_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Parses a `name,classification` CSV with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut table = Self::empty();
        for row in rdr.deserialize::<NameRow>() {
            let row = row?;
            table.insert(&row.name, &row.classification);
        }
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| HarvestError::io(path.display().to_string(), e))?;
        Self::from_csv_reader(std::io::BufReader::new(file))
    }

    pub async fn fetch(url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let resp = client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.bytes().await?;
        Self::from_csv_reader(&body[..])
    }

    /// Loads from a URL or a local path. Any failure yields an empty table
    /// that remembers why, so every handle classifies as unknown.
    pub async fn load_or_empty(source: &str, timeout: Duration) -> Self {
        let loaded = if source.starts_with("http://") || source.starts_with("https://") {
            Self::fetch(source, timeout).await
        } else {
            Self::from_path(Path::new(source))
        };
        match loaded {
            Ok(table) => {
                log::info!("Loaded {} names from {}", table.len(), source);
                table
            }
            Err(e) => {
                log::warn!("Name table unavailable from {}: {}", source, e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn classify(&self, handle: &str) -> Gender {
        match self.classification(&first_name_key(handle)) {
            Some("F") => Gender::Female,
            Some(_) => Gender::Male,
            None => Gender::Unknown,
        }
    }
}

/// First `.`/`_` separated segment of a handle, uppercased.
pub fn first_name_key(handle: &str) -> String {
    handle
        .split('.')
        .next()
        .unwrap_or_default()
        .split('_')
        .next()
        .unwrap_or_default()
        .to_uppercase()
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarvestError>;

/// Failures of the fallible edges of the crate: table loading and CSV I/O.
/// Document processing itself never fails.
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status} while fetching {url}")]
    HttpStatus { url: String, status: u16 },
}

impl HarvestError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

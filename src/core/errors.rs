use crate::storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Extraction error: {0}")]
    ExtractionError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

pub type ScraperResult<T> = Result<T, ScraperError>;

/// Why a single candidate record did not make it into the output.
///
/// These never abort a run; the pipeline collects them next to the emitted
/// records so callers can inspect what was dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SkipReason {
    #[error("candidate is not a mapping node")]
    NotAMapping,

    #[error("missing home team name")]
    MissingHomeTeam,

    #[error("missing away team name")]
    MissingAwayTeam,

    #[error("missing both team names")]
    MissingTeams,
}

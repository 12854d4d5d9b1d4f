use std::io;
use std::path::PathBuf;

/// Outcome of a rejected tally update. None of these abort a scan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TallyError {
    /// Word is longer than the tally was created for; it is not counted
    #[error("word of length {len} exceeds maximum length {max}")]
    LengthExceeded { len: usize, max: usize },
    #[error("cannot tally an empty word")]
    EmptyWord,
    /// The tally has been released and must be recreated before reuse
    #[error("tally has already been released")]
    Released,
}

/// Failures that abort the whole run.
#[derive(Debug, thiserror::Error)]
pub enum HapaxError {
    /// File could not be opened
    #[error("cannot open '{}': {source}", path.display())]
    SourceUnavailable { path: PathBuf, source: io::Error },
    /// File was opened but reading it failed part way through
    #[error("error reading '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    /// Bad or missing command line argument
    #[error("{0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HapaxError>;

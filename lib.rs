//! Counts the words of text files by length and reports the hapax legomena,
//! the words that occur exactly once in a file.

pub mod config;
pub mod driver;
pub mod error;
pub mod report;
pub mod tally;
pub mod words;

pub use crate::error::{HapaxError, Result, TallyError};
pub use crate::report::{all_entries, hapax_words, hapax_words_of_length};
pub use crate::tally::{
    LengthTally, MAX_WORD_LEN, ScanSummary, tally_source, tally_words, tally_words_in_file,
};
pub use crate::words::WordExtractor;

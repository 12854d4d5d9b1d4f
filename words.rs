use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use encoding_rs::UTF_8;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{HapaxError, Result};

// Compile once; ASCII punctuation only, other scripts pass through untouched
static PUNCT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[[:punct:]]+").unwrap());

/// Normalize one whitespace-delimited chunk: drop punctuation, fold ASCII case.
fn normalize(chunk: &str) -> Option<String> {
    let stripped = PUNCT_REGEX.replace_all(chunk, "");
    if stripped.is_empty() {
        return None;
    }
    Some(stripped.to_ascii_lowercase())
}

/// Lazy, single-pass stream of words read from a text source.
///
/// Lines are pulled from the reader only when the buffered words run out, so
/// at most one line of text is held in memory. The extractor owns its reader
/// and closes it when dropped.
pub struct WordExtractor<R> {
    reader: R,
    path: PathBuf,
    max_len: usize,
    pending: VecDeque<String>,
    line: Vec<u8>,
    first_line: bool,
    done: bool,
}

impl WordExtractor<BufReader<File>> {
    /// Opens `path` for word extraction.
    pub fn open(path: impl AsRef<Path>, max_len: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HapaxError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_path(BufReader::new(file), path, max_len))
    }
}

impl<R: BufRead> WordExtractor<R> {
    pub fn new(reader: R, max_len: usize) -> Self {
        Self::with_path(reader, "<input>", max_len)
    }

    fn with_path(reader: R, path: impl Into<PathBuf>, max_len: usize) -> Self {
        Self {
            reader,
            path: path.into(),
            max_len,
            pending: VecDeque::new(),
            line: Vec::new(),
            first_line: true,
            done: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Longest word the consumer intends to keep. Longer words are still
    /// produced; filtering them is up to the tally.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Returns true if another word is available, reading further lines as
    /// needed. A read failure ends the stream.
    pub fn has_more(&mut self) -> Result<bool> {
        while self.pending.is_empty() {
            if self.done {
                return Ok(false);
            }
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => self.done = true,
                Ok(_) => self.split_line(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    self.done = true;
                    return Err(HapaxError::Read {
                        path: self.path.clone(),
                        source,
                    });
                }
            }
        }
        Ok(true)
    }

    /// Pops the next buffered word. Returns None unless `has_more` has just
    /// returned true.
    pub fn next_word(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    fn split_line(&mut self) {
        let (text, had_errors) = if self.first_line {
            self.first_line = false;
            UTF_8.decode_with_bom_removal(&self.line)
        } else {
            UTF_8.decode_without_bom_handling(&self.line)
        };
        if had_errors {
            log::debug!("malformed UTF-8 replaced in {}", self.path.display());
        }
        self.pending
            .extend(text.split_whitespace().filter_map(normalize));
    }
}

impl<R: BufRead> Iterator for WordExtractor<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.has_more() {
            Ok(true) => self.next_word().map(Ok),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

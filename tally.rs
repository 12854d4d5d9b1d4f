use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::error::{Result, TallyError};
use crate::words::WordExtractor;

/// Longest word the command line tool will count.
pub const MAX_WORD_LEN: usize = 24;

/// Word counts for a single file, partitioned by word length.
///
/// Bucket `n` holds every word of `n` characters, so a word lives in exactly
/// one bucket and a length-filtered query only ever touches one map. The
/// length is implied by the bucket and never stored with the entry.
/// Enumeration order inside a bucket is unspecified.
#[derive(Debug, Clone)]
pub struct LengthTally {
    buckets: Vec<HashMap<String, u32>>,
    max_len: usize,
    released: bool,
}

impl LengthTally {
    /// Creates an empty tally accepting words of up to `max_len` characters.
    pub fn new(max_len: usize) -> Self {
        Self {
            buckets: vec![HashMap::new(); max_len + 1],
            max_len,
            released: false,
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Counts one occurrence of `word`.
    ///
    /// Words longer than `max_len` are rejected and leave the tally untouched.
    pub fn insert(&mut self, word: &str) -> std::result::Result<(), TallyError> {
        if self.released {
            return Err(TallyError::Released);
        }
        if word.is_empty() {
            return Err(TallyError::EmptyWord);
        }
        let len = word.chars().count();
        if len > self.max_len {
            return Err(TallyError::LengthExceeded {
                len,
                max: self.max_len,
            });
        }

        let bucket = &mut self.buckets[len];
        match bucket.get_mut(word) {
            Some(count) => *count += 1,
            None => {
                bucket.insert(word.to_string(), 1);
            }
        }
        Ok(())
    }

    /// Number of times `word` has been seen, or None if it never was.
    pub fn count(&self, word: &str) -> Option<u32> {
        self.bucket(word.chars().count())?.get(word).copied()
    }

    /// The bucket for words of `len` characters, if that length is in range.
    pub(crate) fn bucket(&self, len: usize) -> Option<&HashMap<String, u32>> {
        self.buckets.get(len)
    }

    /// Non-empty buckets in increasing length order.
    pub(crate) fn buckets(&self) -> impl Iterator<Item = (usize, &HashMap<String, u32>)> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, bucket)| !bucket.is_empty())
    }

    pub fn for_each_in_length<F>(&self, len: usize, mut visit: F)
    where
        F: FnMut(&str, u32),
    {
        if let Some(bucket) = self.bucket(len) {
            for (word, &count) in bucket {
                visit(word, count);
            }
        }
    }

    pub fn for_each_all<F>(&self, mut visit: F)
    where
        F: FnMut(usize, &str, u32),
    {
        for (len, bucket) in self.buckets() {
            for (word, &count) in bucket {
                visit(len, word, count);
            }
        }
    }

    /// Number of distinct words across all lengths.
    pub fn distinct_words(&self) -> usize {
        self.buckets.iter().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.distinct_words() == 0
    }

    /// Frees every entry and bucket. The tally rejects further inserts.
    /// Releasing twice is a no-op.
    pub fn release(&mut self) {
        self.buckets = Vec::new();
        self.released = true;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

/// What a scan saw besides the counts themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Every token the source produced, counted or not
    pub total_words: u64,
    /// Tokens left out because they were too long
    pub rejected_words: u64,
}

/// Drains `words` into a fresh tally.
///
/// If the source fails part way, the partial tally is dropped and the error
/// returned; nothing of that input is ever reported.
pub fn tally_words<I>(words: I, max_len: usize) -> Result<(LengthTally, ScanSummary)>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut tally = LengthTally::new(max_len);
    let mut summary = ScanSummary::default();

    for word in words {
        let word = word?;
        summary.total_words += 1;
        match tally.insert(&word) {
            Ok(()) => {}
            Err(TallyError::LengthExceeded { len, max }) => {
                summary.rejected_words += 1;
                log::debug!("skipping '{}': length {} exceeds {}", word, len, max);
            }
            Err(e) => log::debug!("skipping '{}': {}", word, e),
        }
    }
    Ok((tally, summary))
}

/// Builds the tally for one file.
pub fn tally_words_in_file(
    path: impl AsRef<Path>,
    max_len: usize,
) -> Result<(LengthTally, ScanSummary)> {
    let source = WordExtractor::open(path.as_ref(), max_len)?;
    tally_source(source)
}

/// Builds the tally from an already constructed extractor.
pub fn tally_source<R: BufRead>(source: WordExtractor<R>) -> Result<(LengthTally, ScanSummary)> {
    let path = source.path().to_path_buf();
    let max_len = source.max_len();
    let (tally, summary) = tally_words(source, max_len)?;
    log::info!(
        "{}: {} words, {} distinct, {} too long",
        path.display(),
        summary.total_words,
        tally.distinct_words(),
        summary.rejected_words
    );
    Ok((tally, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HapaxError;
    use std::io::{self, Cursor};

    fn build(words: &[&str], max_len: usize) -> LengthTally {
        let mut tally = LengthTally::new(max_len);
        for w in words {
            let _ = tally.insert(w);
        }
        tally
    }

    #[test]
    fn counts_repeats() {
        let tally = build(&["cat", "dog", "cat"], MAX_WORD_LEN);
        assert_eq!(tally.count("cat"), Some(2));
        assert_eq!(tally.count("dog"), Some(1));
        assert_eq!(tally.count("cow"), None);
        assert_eq!(tally.distinct_words(), 2);
    }

    #[test]
    fn words_land_in_their_length_bucket() {
        let tally = build(&["a", "bb", "ccc", "bb", "dd"], MAX_WORD_LEN);
        let bucket = tally.bucket(2).unwrap();
        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket.get("bb"), Some(&2));
        assert_eq!(bucket.get("dd"), Some(&1));
        assert!(tally.bucket(1).unwrap().contains_key("a"));
        assert!(!tally.bucket(1).unwrap().contains_key("bb"));
        assert!(tally.bucket(4).unwrap().is_empty());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let tally = build(&["café"], 4);
        assert_eq!(tally.count("café"), Some(1));
        assert!(tally.bucket(4).unwrap().contains_key("café"));
    }

    #[test]
    fn boundary_length_is_accepted() {
        let mut tally = LengthTally::new(MAX_WORD_LEN);
        let longest = "a".repeat(MAX_WORD_LEN);
        assert_eq!(tally.insert(&longest), Ok(()));
        assert_eq!(tally.count(&longest), Some(1));
    }

    #[test]
    fn too_long_is_rejected_without_mutation() {
        let mut tally = build(&["keep"], MAX_WORD_LEN);
        let too_long = "a".repeat(MAX_WORD_LEN + 1);
        assert_eq!(
            tally.insert(&too_long),
            Err(TallyError::LengthExceeded {
                len: MAX_WORD_LEN + 1,
                max: MAX_WORD_LEN
            })
        );
        assert_eq!(tally.count(&too_long), None);
        assert_eq!(tally.distinct_words(), 1);

        let mut seen = 0;
        tally.for_each_all(|_, _, _| seen += 1);
        assert_eq!(seen, 1);
    }

    #[test]
    fn empty_word_is_rejected() {
        let mut tally = LengthTally::new(MAX_WORD_LEN);
        assert_eq!(tally.insert(""), Err(TallyError::EmptyWord));
        assert!(tally.is_empty());
    }

    #[test]
    fn for_each_all_walks_lengths_in_order() {
        let tally = build(&["ccc", "a", "bb", "zz", "a"], MAX_WORD_LEN);
        let mut lengths = Vec::new();
        let mut total = 0;
        tally.for_each_all(|len, word, count| {
            assert_eq!(word.chars().count(), len);
            lengths.push(len);
            total += count;
        });
        assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(total, 5);
    }

    #[test]
    fn for_each_in_length_out_of_range_visits_nothing() {
        let tally = build(&["a"], 3);
        let mut visited = false;
        tally.for_each_in_length(10, |_, _| visited = true);
        assert!(!visited);

        let mut words = Vec::new();
        tally.for_each_in_length(1, |w, c| words.push((w.to_string(), c)));
        assert_eq!(words, vec![("a".to_string(), 1)]);
    }

    #[test]
    fn release_is_idempotent_and_final() {
        let mut tally = build(&["x", "x"], MAX_WORD_LEN);
        tally.release();
        assert!(tally.is_released());
        assert!(tally.is_empty());
        assert_eq!(tally.count("x"), None);
        tally.release();
        assert!(tally.is_empty());
        assert_eq!(tally.insert("x"), Err(TallyError::Released));
    }

    #[test]
    fn scan_counts_total_and_rejected() {
        let long = "q".repeat(MAX_WORD_LEN + 1);
        let words = vec!["cat", "dog", long.as_str(), "cat"]
            .into_iter()
            .map(|w| Ok(w.to_string()));
        let (tally, summary) = tally_words(words, MAX_WORD_LEN).unwrap();
        assert_eq!(
            summary,
            ScanSummary {
                total_words: 4,
                rejected_words: 1
            }
        );
        assert_eq!(tally.count("cat"), Some(2));
        assert_eq!(tally.count(&long), None);
    }

    #[test]
    fn scan_failure_discards_the_tally() {
        let words = vec![
            Ok("cat".to_string()),
            Err(HapaxError::Read {
                path: "broken.txt".into(),
                source: io::Error::new(io::ErrorKind::Other, "gone"),
            }),
            Ok("dog".to_string()),
        ];
        assert!(matches!(
            tally_words(words, MAX_WORD_LEN),
            Err(HapaxError::Read { .. })
        ));
    }

    #[test]
    fn scan_from_extractor() {
        let source = WordExtractor::new(Cursor::new(b"Cat dog. CAT!".to_vec()), MAX_WORD_LEN);
        let (tally, summary) = tally_source(source).unwrap();
        assert_eq!(summary.total_words, 3);
        assert_eq!(tally.count("cat"), Some(2));
        assert_eq!(tally.count("dog"), Some(1));
    }
}

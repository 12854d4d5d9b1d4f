use std::collections::HashMap;
use std::io::{self, Write};

use itertools::Itertools;

use crate::tally::LengthTally;

fn singles(bucket: &HashMap<String, u32>) -> impl Iterator<Item = &str> {
    bucket
        .iter()
        .filter(|&(_, &count)| count == 1)
        .map(|(word, _)| word.as_str())
}

/// Every word seen exactly once, shortest words first.
pub fn hapax_words(tally: &LengthTally) -> impl Iterator<Item = &str> {
    tally.buckets().flat_map(|(_, bucket)| singles(bucket))
}

/// Words of exactly `len` characters seen once. A length the tally has no
/// bucket for simply yields nothing.
pub fn hapax_words_of_length(tally: &LengthTally, len: usize) -> impl Iterator<Item = &str> {
    tally.bucket(len).into_iter().flat_map(|bucket| singles(bucket))
}

/// Every `(length, word, count)` in the tally, shortest words first.
pub fn all_entries(tally: &LengthTally) -> impl Iterator<Item = (usize, &str, u32)> {
    tally.buckets().flat_map(|(len, bucket)| {
        bucket
            .iter()
            .map(move |(word, &count)| (len, word.as_str(), count))
    })
}

/// Dumps the whole tally, one block per word length.
pub fn write_data<W: Write>(out: &mut W, filename: &str, tally: &LengthTally) -> io::Result<()> {
    writeln!(out, "All word count data from file '{}':", filename)?;
    for (len, bucket) in tally.buckets() {
        writeln!(out, "Length {}:", len)?;
        for (word, count) in bucket.iter().sorted() {
            writeln!(out, "    '{}' {}", word, count)?;
        }
    }
    Ok(())
}

/// Prints the hapax legomena, optionally only those of one length.
pub fn write_hapax<W: Write>(
    out: &mut W,
    filename: &str,
    tally: &LengthTally,
    length: Option<usize>,
) -> io::Result<()> {
    match length {
        None => {
            writeln!(out, "Hapax legomena from file '{}':", filename)?;
            for (_, bucket) in tally.buckets() {
                for word in singles(bucket).sorted() {
                    writeln!(out, "{}", word)?;
                }
            }
        }
        Some(len) => {
            writeln!(
                out,
                "Hapax legomena of length '{}' from file '{}':",
                len, filename
            )?;
            for word in hapax_words_of_length(tally, len).sorted() {
                writeln!(out, "{}", word)?;
            }
        }
    }
    Ok(())
}

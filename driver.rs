use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::report::{write_data, write_hapax};
use crate::tally::tally_words_in_file;

/// Processes every file in order, stopping at the first failure.
///
/// Each file gets its own tally, which is released before the next file is
/// opened. A file that fails produces no report at all; output already written
/// for earlier files stays.
pub fn run<W: Write>(out: &mut W, config: &Config) -> Result<()> {
    for path in &config.files {
        process_file(out, config, path)
            .with_context(|| format!("Processing '{}' failed -- exiting", path.display()))?;
    }
    Ok(())
}

fn process_file<W: Write>(out: &mut W, config: &Config, path: &Path) -> Result<()> {
    let (mut tally, summary) = tally_words_in_file(path, config.max_word_len)?;
    let name = path.display().to_string();

    writeln!(out, "Total word count {}", summary.total_words)?;
    writeln!(out, "Tally loaded")?;
    if config.dump_data {
        write_data(out, &name, &tally)?;
    }
    write_hapax(out, &name, &tally, config.hapax_length)?;
    out.flush()?;

    tally.release();
    Ok(())
}

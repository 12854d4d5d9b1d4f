use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};

use crate::error::{HapaxError, Result};
use crate::tally::MAX_WORD_LEN;

const AFTER_HELP: &str = "\
If no -l option is given, all hapax legomena are printed.

Sample command line:
    hapax -l 5 smalldata.txt
This example would print all words of length 5 that exist in the
file \"smalldata.txt\".";

/// Find and print the hapax legomena in one or more files.
/// A "hapax legomenon" is a word that occurs only once in the file.
#[derive(Parser, Debug)]
#[command(name = "hapax", disable_help_flag = true, after_help = AFTER_HELP)]
pub struct Args {
    /// Print out all data loaded before printing hapax legomena
    #[arg(short = 'd')]
    pub dump_data: bool,

    /// This help. You are looking at it
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,

    /// Only print hapax legomena of length <N>
    #[arg(short = 'l', value_name = "N", value_parser = parse_hapax_length)]
    pub length: Option<usize>,

    /// Text files to scan, each one on its own
    #[arg(value_name = "datafile")]
    pub files: Vec<PathBuf>,
}

/// Accepts plain decimal digits only, no sign.
fn parse_hapax_length(s: &str) -> std::result::Result<usize, String> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("bad argument for -l: '{}'", s));
    }
    s.parse()
        .map_err(|e| format!("bad argument for -l: '{}': {}", s, e))
}

/// Settings for one run of the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub dump_data: bool,
    pub hapax_length: Option<usize>,
    pub max_word_len: usize,
    pub files: Vec<PathBuf>,
}

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Help,
    Run(Config),
}

impl Args {
    pub fn try_from_iter<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Args::try_parse_from(args).map_err(|e| HapaxError::Config(e.to_string()))
    }

    pub fn into_action(self) -> Result<Action> {
        if self.help {
            return Ok(Action::Help);
        }
        if self.files.is_empty() {
            return Err(HapaxError::Config(
                "No data processed -- provide the name of a file on the command line".into(),
            ));
        }
        if let Some(len) = self.length {
            log::info!("hapax length is now {}", len);
        }
        Ok(Action::Run(Config {
            dump_data: self.dump_data,
            hapax_length: self.length,
            max_word_len: MAX_WORD_LEN,
            files: self.files,
        }))
    }
}

/// Full usage text.
pub fn usage() -> String {
    Args::command().render_help().to_string()
}

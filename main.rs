use std::io::{self, BufWriter};
use std::process::ExitCode;

use hapax::config::{self, Action, Args};
use hapax::driver;

fn main() -> ExitCode {
    // RUST_LOG=info shows per-file totals, debug shows every skipped word
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let action = Args::try_from_iter(std::env::args_os()).and_then(Args::into_action);
    let config = match action {
        Ok(Action::Run(config)) => config,
        Ok(Action::Help) => {
            eprintln!("{}", config::usage());
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", config::usage());
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match driver::run(&mut out, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

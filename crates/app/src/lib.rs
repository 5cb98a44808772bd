//! enigma: command-line front end for the rotor machine engine.
//!
//! Reads a machine description, then converts a stream of setting lines and
//! messages (a file, stdin, or a generated sample) to a file or stdout.

pub mod config;
pub mod error;
pub mod input_gen;
pub mod machine_config;
pub mod process;

use config::Config;
use enigma_core::metrics::Metrics;
use error::{AppError, Result};
use process::Session;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Cursor, Write};

/// Execute one run described by `config` and return its metrics.
pub fn run(config: &Config) -> Result<Metrics> {
    if config.verbose {
        config.print();
    }

    let machine = machine_config::read_config(&config.config_file)?;

    let input: Box<dyn BufRead> = match (config.sample_len, &config.input_file) {
        (Some(len), _) => {
            let block = input_gen::generate_sample_input(&machine, config.seed, len)?;
            tracing::info!(seed = config.seed, symbols = len, "generated sample input");
            Box::new(Cursor::new(block))
        }
        (None, Some(path)) => {
            let file = File::open(path).map_err(|source| AppError::File {
                path: path.clone(),
                source,
            })?;
            Box::new(BufReader::new(file))
        }
        (None, None) => Box::new(io::stdin().lock()),
    };

    let mut output: Box<dyn Write> = match &config.output_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| AppError::File {
                path: path.clone(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut session = Session::new(machine);
    if config.verbose {
        session = session.with_trace(io::stderr());
    }
    session.process(input, &mut output)?;

    let metrics = session.into_metrics();
    tracing::debug!(
        keystrokes = metrics.keystrokes,
        messages = metrics.messages,
        "run complete"
    );
    Ok(metrics)
}

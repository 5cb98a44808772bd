//! Message-block processing.
//!
//! Input is a sequence of lines:
//! - `* R1 R2 ... Rn SETTING [PLUGBOARD CYCLES...]` reconfigures the
//!   machine: rotor names for slots 0..n (reflector first), one setting
//!   symbol per non-reflector slot, then an optional plugboard
//! - an empty line is copied to the output as an empty line
//! - any other line is a message; its whitespace is removed, the rest is
//!   converted and written in groups of five symbols
//!
//! Directives produce no output. A message before the first directive is
//! an error, as is any symbol outside the alphabet: the run stops at the
//! first failure.

use crate::error::{AppError, Result};
use enigma_core::metrics::Metrics;
use enigma_core::{Machine, Permutation};
use std::io::{BufRead, Write};

/// Symbols per output group.
pub const GROUP_SIZE: usize = 5;

/// Split `text` into groups of `size` symbols separated by single spaces.
/// The last group may be shorter.
pub fn group(text: &str, size: usize) -> String {
    let symbols: Vec<char> = text.chars().collect();
    symbols
        .chunks(size.max(1))
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One machine driven by a stream of directives and messages.
pub struct Session<'t> {
    machine: Machine,
    metrics: Metrics,
    /// Receives one rendered keystroke per converted symbol
    trace: Option<Box<dyn Write + 't>>,
    configured: bool,
}

impl<'t> Session<'t> {
    pub fn new(machine: Machine) -> Self {
        Self {
            machine,
            metrics: Metrics::new(),
            trace: None,
            configured: false,
        }
    }

    /// Write a trace line for every keystroke to `sink`.
    pub fn with_trace(mut self, sink: impl Write + 't) -> Self {
        self.trace = Some(Box::new(sink));
        self
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Finish the run and hand back its metrics.
    pub fn into_metrics(mut self) -> Metrics {
        self.metrics.complete();
        self.metrics
    }

    /// Process every line of `input`, writing results to `output`.
    pub fn process<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        for (i, line) in input.lines().enumerate() {
            let line = line?;
            if let Some(result) = self.process_line(i + 1, &line)? {
                writeln!(output, "{}", result)?;
            }
        }
        output.flush()?;
        Ok(())
    }

    /// Handle one input line; returns the output line, if any.
    pub fn process_line(&mut self, line_no: usize, line: &str) -> Result<Option<String>> {
        if line.trim().is_empty() {
            return Ok(Some(String::new()));
        }
        if let Some(directive) = line.trim_start().strip_prefix('*') {
            self.apply_directive(line_no, directive)?;
            return Ok(None);
        }
        if !self.configured {
            return Err(AppError::NoConfiguration);
        }

        let message: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        let converted = group(&self.convert(&message)?, GROUP_SIZE);
        self.metrics.messages += 1;
        self.metrics.characters_in += line.chars().count() as u64;
        self.metrics.characters_out += converted.chars().count() as u64;
        Ok(Some(converted))
    }

    /// Apply the fields of a `*` line (without the `*`).
    fn apply_directive(&mut self, line_no: usize, fields: &str) -> Result<()> {
        let fields: Vec<&str> = fields.split_whitespace().collect();
        let slots = self.machine.num_rotors();

        if fields.len() < slots + 1 || fields[slots].starts_with('(') {
            return Err(AppError::syntax(
                line_no,
                format!(
                    "setting line needs {} rotor names and a setting, got {} fields",
                    slots,
                    fields.len()
                ),
            ));
        }

        self.machine.insert_rotors(&fields[..slots])?;
        self.machine.set_rotors(fields[slots])?;

        let cycles = fields[slots + 1..].concat();
        let plugboard = Permutation::new(&cycles, self.machine.alphabet().clone())?;
        self.machine.set_plugboard(plugboard);

        self.configured = true;
        self.metrics.configurations += 1;
        tracing::debug!(line = line_no, window = %self.machine.window(), "applied setting line");
        Ok(())
    }

    /// Convert `message` one keystroke at a time.
    fn convert(&mut self, message: &str) -> Result<String> {
        let alphabet = self.machine.alphabet().clone();
        let mut converted = String::with_capacity(message.len());

        for symbol in message.chars() {
            let index = alphabet.to_index(symbol)?;
            let key = self.machine.convert_traced(index)?;
            if let Some(trace) = self.trace.as_mut() {
                writeln!(trace, "{}", key)?;
            }
            self.metrics.record_keystroke(&key);
            converted.push(key.output);
        }
        Ok(converted)
    }
}

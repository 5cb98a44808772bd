//! Metrics collection and reporting for a conversion run.
//!
//! This module records what the machine did while processing input:
//! - Setting directives and message lines handled
//! - Characters in and out
//! - Keystrokes, rotor advances and double steps
//! - Timing information
//!
//! # Design
//!
//! The engine does not update metrics itself. Callers feed each
//! [`Keystroke`] returned by `Machine::convert_traced` into
//! [`Metrics::record_keystroke`] and bump the line and character counters
//! as they go.
//!
//! # Thread Safety
//!
//! The `Metrics` struct is NOT thread-safe. Like the machine it describes,
//! it belongs to a single message stream.

use crate::trace::Keystroke;
use std::time::{Duration, Instant};

/// Counters and timing for one run.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input ===
    /// Setting directives (`*` lines) applied
    pub configurations: u64,

    /// Message lines converted
    pub messages: u64,

    /// Characters read on message lines, whitespace included
    pub characters_in: u64,

    /// Characters written for message lines, group separators included
    pub characters_out: u64,

    // === Mechanism ===
    /// Keystrokes processed
    pub keystrokes: u64,

    /// Individual rotor advances, summed over all slots
    pub rotor_advances: u64,

    /// Keystrokes on which a rotor was carried by its own notch
    pub double_steps: u64,

    /// Keystrokes on which more than the fastest rotor moved
    pub carries: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            configurations: 0,
            messages: 0,
            characters_in: 0,
            characters_out: 0,
            keystrokes: 0,
            rotor_advances: 0,
            double_steps: 0,
            carries: 0,
        }
    }

    /// Fold one keystroke into the counters.
    pub fn record_keystroke(&mut self, key: &Keystroke) {
        self.keystrokes += 1;
        self.rotor_advances += key.advanced.len() as u64;
        if key.advanced.len() > 1 {
            self.carries += 1;
        }
        if key.double_step {
            self.double_steps += 1;
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Average number of rotors moved per keystroke.
    ///
    /// Returns 0.0 if nothing was converted.
    pub fn advances_per_keystroke(&self) -> f64 {
        if self.keystrokes == 0 {
            0.0
        } else {
            self.rotor_advances as f64 / self.keystrokes as f64
        }
    }

    /// Fraction of keystrokes that carried into a slower rotor.
    pub fn carry_rate(&self) -> f64 {
        if self.keystrokes == 0 {
            0.0
        } else {
            self.carries as f64 / self.keystrokes as f64
        }
    }

    /// Compute throughput in characters/second.
    pub fn throughput_cps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.characters_in as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stderr, keeping stdout for output.
    pub fn print_summary(&self) {
        eprintln!("\n=== Run Summary ===");
        eprintln!("Duration: {} ms", self.duration().as_millis());
        eprintln!();

        eprintln!("=== Input ===");
        eprintln!("Setting directives: {}", self.configurations);
        eprintln!("Message lines: {}", self.messages);
        eprintln!("Characters in: {}", self.characters_in);
        eprintln!("Characters out: {}", self.characters_out);
        eprintln!();

        eprintln!("=== Rotors ===");
        eprintln!("Keystrokes: {}", self.keystrokes);
        eprintln!(
            "Rotor advances: {} ({:.3} per keystroke)",
            self.rotor_advances,
            self.advances_per_keystroke()
        );
        eprintln!("Carries: {} ({:.2}%)", self.carries, self.carry_rate() * 100.0);
        eprintln!("Double steps: {}", self.double_steps);
        eprintln!();

        eprintln!("=== Performance ===");
        eprintln!("Throughput: {:.0} chars/s", self.throughput_cps());
        eprintln!();
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             configurations={}\n\
             messages={}\n\
             characters_in={}\n\
             characters_out={}\n\
             keystrokes={}\n\
             rotor_advances={}\n\
             carries={}\n\
             double_steps={}\n",
            self.duration().as_millis(),
            self.configurations,
            self.messages,
            self.characters_in,
            self.characters_out,
            self.keystrokes,
            self.rotor_advances,
            self.carries,
            self.double_steps,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

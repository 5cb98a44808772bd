//! Per-keystroke trace records.
//!
//! [`Machine::convert_traced`](crate::machine::Machine::convert_traced)
//! returns a [`Keystroke`] describing one conversion: which rotors moved,
//! the rotor window after stepping, and the signal at every stage of its
//! path. Callers that want verbose output render it; callers that don't
//! simply drop it. The engine itself never writes anywhere.
//!
//! # Rendering
//!
//! ```text
//! [AXLF] F -> F -> T -> S -> ... -> Q
//!  ^^^^   ^    ^    ^                ^
//!  window in   plug stages (forward  output
//!              board then backward)
//! ```

use std::fmt;

/// Everything that happened during one conversion.
///
/// Symbols are resolved through the machine's alphabet while the keystroke
/// is recorded, so every field is already printable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystroke {
    /// Rotor window after stepping, leftmost rotor first
    pub window: String,

    /// Slots that advanced, fastest first
    pub advanced: Vec<usize>,

    /// True if some rotor was carried by its own notch
    pub double_step: bool,

    /// Input symbol
    pub input: char,

    /// Symbol after the entry plugboard
    pub plugged: char,

    /// Symbol after each rotor stage: forward from the fastest rotor through
    /// the reflector, then backward out to the fastest rotor
    pub stages: Vec<char>,

    /// Output symbol, after the exit plugboard
    pub output: char,

    /// Alphabet index of `output`
    pub output_index: usize,
}

impl Keystroke {
    pub(crate) fn new(input: char) -> Self {
        Self {
            window: String::new(),
            advanced: Vec::new(),
            double_step: false,
            input,
            plugged: input,
            stages: Vec::new(),
            output: input,
            output_index: 0,
        }
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} -> {} -> ", self.window, self.input, self.plugged)?;
        for stage in &self.stages {
            write!(f, "{} -> ", stage)?;
        }
        write!(f, "{}", self.output)
    }
}

//! Error types for the rotor machine engine.
//!
//! Every invariant violation is reported at the smallest scope that can
//! detect it and propagated unchanged. Nothing is retried and no defaults
//! are substituted.

use thiserror::Error;

/// Top-level error type for all engine operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Alphabet: a symbol or index outside the alphabet
/// - Permutation: a malformed cycle specification
/// - Config: a malformed rotor, catalog, slot assignment or setting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Symbol or index lookup failed
    #[error("alphabet error: {0}")]
    Alphabet(#[from] AlphabetError),

    /// Cycle specification could not be parsed
    #[error("permutation error: {0}")]
    Permutation(#[from] PermutationError),

    /// Machine or rotor configuration is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Lookup failures against an [`Alphabet`](crate::alphabet::Alphabet).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphabetError {
    /// Symbol is not a member of the alphabet
    #[error("'{0}' is not in the alphabet")]
    NotInAlphabet(char),

    /// Index is outside `[0, size)`
    #[error("index {index} out of range for alphabet of size {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

/// Malformed cycle specifications.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermutationError {
    /// `(` without a matching `)`, or `(` inside an open cycle
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis { position: usize },

    /// `()` with no symbols
    #[error("empty cycle at position {position}")]
    EmptyCycle { position: usize },

    /// Symbol appearing outside any cycle
    #[error("unexpected '{symbol}' outside a cycle at position {position}")]
    StrayCharacter { symbol: char, position: usize },

    /// Symbol listed more than once across all cycles
    #[error("'{0}' appears in more than one cycle position")]
    RepeatedSymbol(char),

    /// Cycle names a symbol the alphabet does not contain
    #[error("cycle symbol '{0}' is not in the alphabet")]
    UnknownSymbol(char),
}

/// Invalid machine, catalog, rotor or slot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Alphabet with no symbols
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    /// Alphabet listing the same symbol twice
    #[error("alphabet contains '{0}' more than once")]
    DuplicateSymbol(char),

    /// Slot count must exceed one
    #[error("machine needs more than one rotor slot, got {0}")]
    TooFewSlots(usize),

    /// Pawl count must be below the slot count
    #[error("pawl count {pawls} must be less than slot count {slots}")]
    TooManyPawls { pawls: usize, slots: usize },

    /// Catalog defines the same rotor name twice
    #[error("rotor '{0}' is defined more than once")]
    DuplicateRotorName(String),

    /// Assignment names a rotor the catalog lacks
    #[error("no rotor named '{0}'")]
    UnknownRotor(String),

    /// Assignment places one rotor in two slots
    #[error("rotor '{0}' is used in more than one slot")]
    RotorReused(String),

    /// Assignment names the wrong number of rotors
    #[error("expected {expected} rotor names, got {actual}")]
    WrongRotorCount { expected: usize, actual: usize },

    /// Slot 0 must hold a reflector
    #[error("slot 0 must hold a reflector, '{0}' is not one")]
    MissingReflector(String),

    /// Reflector outside slot 0
    #[error("reflector '{name}' placed in slot {slot}")]
    MisplacedReflector { name: String, slot: usize },

    /// Moving rotor outside the rightmost pawl slots
    #[error("moving rotor '{name}' placed in slot {slot}, which has no pawl")]
    MovingRotorWithoutPawl { name: String, slot: usize },

    /// Reflector wiring has a fixed point
    #[error("reflector '{0}' permutation is not a derangement")]
    NotDerangement(String),

    /// Reflector was asked to turn
    #[error("reflector has only one position")]
    ReflectorPosition,

    /// Notch symbol not in the rotor's alphabet
    #[error("notch '{notch}' of rotor '{name}' is not in the alphabet")]
    InvalidNotch { name: String, notch: char },

    /// Setting string length does not match the non-reflector slot count
    #[error("setting must have {expected} symbols, got {actual}")]
    SettingLength { expected: usize, actual: usize },

    /// Only moving rotors advance
    #[error("rotor '{0}' does not move")]
    Stationary(String),

    /// Conversion attempted before a rotor assignment
    #[error("no rotors have been inserted")]
    NoRotors,
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

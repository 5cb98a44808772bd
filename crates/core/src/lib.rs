//! enigma-core: Engine for simulating electromechanical rotor cipher machines
//!
//! This library models a machine built from interchangeable rotors, a
//! reflector and a plugboard wired in series. Each keystroke first steps
//! the rotors with the historical ratchet-and-pawl rule (double-stepping
//! included), then passes the signal through the plugboard, the rotor stack,
//! the reflector, back through the rotor stack and the plugboard again.
//!
//! # Architecture
//!
//! Leaf modules first:
//! - `alphabet`: Symbol <-> index bijection
//! - `permutation`: Bijections over an alphabet, parsed from cycle notation
//! - `rotor`: Immutable rotor definitions and their mounted, settable state
//! - `machine`: Slot assignment, stepping and the signal path
//! - `trace`: Per-keystroke records for verbose output
//! - `metrics`: Counters for a conversion run
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use enigma_core::{Alphabet, Machine, Permutation, Rotor};
//!
//! let alpha = Arc::new(Alphabet::default());
//! let perm = |cycles: &str| Permutation::new(cycles, alpha.clone()).unwrap();
//!
//! let catalog = vec![
//!     Rotor::reflector("B", perm("(AY)(BR)(CU)(DH)(EQ)(FS)(GL)(IP)(JX)(KN)(MO)(TZ)(VW)")).unwrap(),
//!     Rotor::moving("I", perm("(AELTPHQXRU)(BKNW)(CMOY)(DFG)(IV)(JZ)(S)"), "Q").unwrap(),
//!     Rotor::moving("II", perm("(FIXVYOMW)(CDKLHUP)(ESZ)(BJ)(GR)(NT)(A)(Q)"), "E").unwrap(),
//!     Rotor::moving("III", perm("(ABDHPEJT)(CFLVMZOYQIRWUKXSG)(N)"), "V").unwrap(),
//! ];
//!
//! let mut machine = Machine::new(alpha.clone(), 4, 3, catalog).unwrap();
//! machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
//! machine.set_rotors("AAA").unwrap();
//! assert_eq!(machine.convert_message("AAAAA").unwrap(), "BDZGO");
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and propagate unchanged
//! - **Shared wiring, local state**: Rotor definitions are immutable and
//!   shared; only mounted settings change
//! - **No global state**: Verbose output is an explicit per-call trace

pub mod alphabet;
pub mod error;
pub mod machine;
pub mod metrics;
pub mod permutation;
pub mod rotor;
pub mod trace;

// Re-export commonly used types
pub use alphabet::Alphabet;
pub use error::{Error, Result};
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{MountedRotor, Rotor, RotorKind};
pub use trace::Keystroke;

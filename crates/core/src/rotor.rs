//! Rotor definitions and mounted rotor state.
//!
//! A rotor is split in two:
//! - [`Rotor`]: the immutable definition (name, wiring, variant), built once
//!   from the catalog and shared via `Arc` by every machine configuration
//!   that mounts it
//! - [`MountedRotor`]: a rotor occupying one machine slot together with its
//!   current setting, the only state that changes while converting
//!
//! # Variants
//!
//! | Variant     | Setting        | Advances | Notches |
//! |-------------|----------------|----------|---------|
//! | `Reflector` | always 0       | never    | none    |
//! | `Fixed`     | any, by `set`  | never    | none    |
//! | `Moving`    | any, by `set`  | by pawl  | yes     |
//!
//! # Signal Path
//!
//! A signal entering contact `p` of a rotor at setting `s` meets the wiring
//! at position `p + s`, and leaves realigned to the stator frame:
//!
//! ```text
//! forward(p)  = wrap(permute(wrap(p + s)) - s)
//! backward(e) = wrap(invert(wrap(e + s)) - s)
//! ```

use crate::alphabet::Alphabet;
use crate::error::{AlphabetError, ConfigError, Result};
use crate::permutation::Permutation;
use std::sync::Arc;

/// Capability tag of a rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Stationary, derangement wiring, sits in slot 0
    Reflector,
    /// Settable but never advances
    Fixed,
    /// Advances under a pawl; `notches` holds the notch indices
    Moving { notches: Vec<usize> },
}

/// Immutable rotor definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    name: String,
    permutation: Permutation,
    kind: RotorKind,
}

impl Rotor {
    /// A reflector named `name` wired by `permutation`.
    ///
    /// # Errors
    /// `ConfigError::NotDerangement` if `permutation` has a fixed point.
    pub fn reflector(name: impl Into<String>, permutation: Permutation) -> Result<Self> {
        let name = name.into();
        if !permutation.derangement() {
            return Err(ConfigError::NotDerangement(name).into());
        }
        Ok(Self {
            name,
            permutation,
            kind: RotorKind::Reflector,
        })
    }

    /// A non-moving rotor named `name` wired by `permutation`.
    pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
        Self {
            name: name.into(),
            permutation,
            kind: RotorKind::Fixed,
        }
    }

    /// A moving rotor with a notch at each symbol of `notches`.
    ///
    /// # Errors
    /// `ConfigError::InvalidNotch` if a notch symbol is outside the alphabet.
    pub fn moving(
        name: impl Into<String>,
        permutation: Permutation,
        notches: &str,
    ) -> Result<Self> {
        let name = name.into();
        let alphabet = permutation.alphabet();

        let mut indices = Vec::new();
        for notch in notches.chars() {
            let index = alphabet
                .to_index(notch)
                .map_err(|_| ConfigError::InvalidNotch {
                    name: name.clone(),
                    notch,
                })?;
            if !indices.contains(&index) {
                indices.push(index);
            }
        }

        Ok(Self {
            name,
            permutation,
            kind: RotorKind::Moving { notches: indices },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        self.permutation.alphabet()
    }

    /// Number of contacts, equal to the alphabet size.
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    /// True for moving rotors.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// True for reflectors.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// Notch symbols in definition order (empty unless moving).
    pub fn notches(&self) -> String {
        match &self.kind {
            RotorKind::Moving { notches } => notches
                .iter()
                .map(|&i| self.alphabet().symbols()[i])
                .collect(),
            _ => String::new(),
        }
    }

    /// True if `setting` is one of this rotor's notch positions.
    fn notch_at(&self, setting: usize) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.contains(&setting),
            _ => false,
        }
    }
}

/// A rotor in a machine slot, with its current setting.
///
/// # Invariants
/// - `setting < rotor.alphabet().size()`
/// - `setting == 0` whenever the rotor is a reflector
#[derive(Debug, Clone)]
pub struct MountedRotor {
    rotor: Arc<Rotor>,
    setting: usize,
}

impl MountedRotor {
    /// Mount `rotor` at setting 0.
    pub fn new(rotor: Arc<Rotor>) -> Self {
        Self { rotor, setting: 0 }
    }

    pub fn rotor(&self) -> &Rotor {
        &self.rotor
    }

    pub fn name(&self) -> &str {
        self.rotor.name()
    }

    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Turn the rotor to `position`.
    ///
    /// # Errors
    /// - `ConfigError::ReflectorPosition` for a reflector and any non-zero position
    /// - `AlphabetError::IndexOutOfRange` if `position` is outside the alphabet
    pub fn set(&mut self, position: usize) -> Result<()> {
        if self.rotor.reflecting() && position != 0 {
            return Err(ConfigError::ReflectorPosition.into());
        }
        let size = self.rotor.permutation.size();
        if position >= size {
            return Err(AlphabetError::IndexOutOfRange {
                index: position,
                size,
            }
            .into());
        }
        self.setting = position;
        Ok(())
    }

    /// Return to setting 0, which every variant accepts.
    pub(crate) fn reset(&mut self) {
        self.setting = 0;
    }

    /// Advance one position.
    ///
    /// # Errors
    /// `ConfigError::Stationary` unless the rotor is a moving rotor.
    pub fn advance(&mut self) -> Result<()> {
        if !self.rotor.rotates() {
            return Err(ConfigError::Stationary(self.rotor.name.clone()).into());
        }
        self.setting = self.rotor.permutation.wrap(self.setting as i64 + 1);
        Ok(())
    }

    /// True if the current setting is a notch position.
    pub fn at_notch(&self) -> bool {
        self.rotor.notch_at(self.setting)
    }

    /// Contact reached by a signal entering at `p` from the right.
    pub fn convert_forward(&self, p: usize) -> Result<usize> {
        let perm = &self.rotor.permutation;
        let contact = perm.permute(perm.wrap(p as i64 + self.setting as i64))?;
        Ok(perm.wrap(contact as i64 - self.setting as i64))
    }

    /// Contact reached by a signal entering at `e` from the left.
    pub fn convert_backward(&self, e: usize) -> Result<usize> {
        let perm = &self.rotor.permutation;
        let contact = perm.invert(perm.wrap(e as i64 + self.setting as i64))?;
        Ok(perm.wrap(contact as i64 - self.setting as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const ROTOR_I: &str = "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)";
    const REFLECTOR_B: &str = "(AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)";

    fn upper() -> Arc<Alphabet> {
        Arc::new(Alphabet::default())
    }

    fn perm(cycles: &str) -> Permutation {
        Permutation::new(cycles, upper()).unwrap()
    }

    #[test]
    fn test_reflector_requires_derangement() {
        assert!(Rotor::reflector("B", perm(REFLECTOR_B)).is_ok());

        let err = Rotor::reflector("Bad", perm("(AE) (BN)")).unwrap_err();
        assert_eq!(err, Error::Config(ConfigError::NotDerangement("Bad".into())));
    }

    #[test]
    fn test_reflector_has_one_position() {
        let mut mounted = MountedRotor::new(Arc::new(Rotor::reflector("B", perm(REFLECTOR_B)).unwrap()));
        assert!(mounted.set(0).is_ok());
        assert_eq!(
            mounted.set(1).unwrap_err(),
            Error::Config(ConfigError::ReflectorPosition)
        );
        assert_eq!(mounted.setting(), 0);
    }

    #[test]
    fn test_only_moving_rotors_advance() {
        let mut fixed = MountedRotor::new(Arc::new(Rotor::fixed("Beta", perm(ROTOR_I))));
        fixed.set(5).unwrap();
        assert!(fixed.advance().is_err());
        assert_eq!(fixed.setting(), 5);
        assert!(!fixed.at_notch());

        let mut moving = MountedRotor::new(Arc::new(Rotor::moving("I", perm(ROTOR_I), "Q").unwrap()));
        moving.set(25).unwrap();
        moving.advance().unwrap();
        assert_eq!(moving.setting(), 0);
    }

    #[test]
    fn test_at_notch() {
        let rotor = Rotor::moving("VI", perm(ROTOR_I), "ZM").unwrap();
        assert_eq!(rotor.notches(), "ZM");

        let mut mounted = MountedRotor::new(Arc::new(rotor));
        mounted.set(12).unwrap();
        assert!(mounted.at_notch());
        mounted.advance().unwrap();
        assert!(!mounted.at_notch());
        mounted.set(25).unwrap();
        assert!(mounted.at_notch());
    }

    #[test]
    fn test_invalid_notch() {
        let err = Rotor::moving("I", perm(ROTOR_I), "Q!").unwrap_err();
        assert_eq!(
            err,
            Error::Config(ConfigError::InvalidNotch {
                name: "I".into(),
                notch: '!'
            })
        );
    }

    #[test]
    fn test_set_out_of_range() {
        let mut mounted = MountedRotor::new(Arc::new(Rotor::fixed("F", perm(ROTOR_I))));
        assert!(mounted.set(26).is_err());
    }

    #[test]
    fn test_convert_at_setting_zero() {
        let mounted = MountedRotor::new(Arc::new(Rotor::moving("I", perm(ROTOR_I), "Q").unwrap()));
        // A -> E, E -> L under rotor I
        assert_eq!(mounted.convert_forward(0).unwrap(), 4);
        assert_eq!(mounted.convert_forward(4).unwrap(), 11);
        assert_eq!(mounted.convert_backward(4).unwrap(), 0);
    }

    #[test]
    fn test_convert_with_offset() {
        let mut mounted = MountedRotor::new(Arc::new(Rotor::moving("I", perm(ROTOR_I), "Q").unwrap()));
        mounted.set(1).unwrap();
        // contact A meets wiring at B; B -> K; K - 1 = J
        assert_eq!(mounted.convert_forward(0).unwrap(), 9);
        assert_eq!(mounted.convert_backward(9).unwrap(), 0);

        // contact Z meets wiring at A; A -> E; E - 1 = D
        assert_eq!(mounted.convert_forward(25).unwrap(), 3);
    }

    #[test]
    fn test_forward_backward_inverse_at_every_setting() {
        let mut mounted = MountedRotor::new(Arc::new(Rotor::moving("I", perm(ROTOR_I), "Q").unwrap()));
        for setting in 0..26 {
            mounted.set(setting).unwrap();
            for p in 0..26 {
                let e = mounted.convert_forward(p).unwrap();
                assert_eq!(mounted.convert_backward(e).unwrap(), p);
            }
        }
    }

    #[test]
    fn test_variant_flags() {
        let reflector = Rotor::reflector("B", perm(REFLECTOR_B)).unwrap();
        assert!(reflector.reflecting());
        assert!(!reflector.rotates());
        assert_eq!(reflector.notches(), "");

        let fixed = Rotor::fixed("Beta", perm(ROTOR_I));
        assert!(!fixed.reflecting());
        assert!(!fixed.rotates());
        assert_eq!(fixed.kind(), &RotorKind::Fixed);
        assert_eq!(fixed.size(), 26);
    }
}

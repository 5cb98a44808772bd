//! The rotor machine: slot assignment, stepping and the signal path.
//!
//! # Slots
//!
//! ```text
//!  slot:   0           1     ...   n-pawls  ...   n-1
//!        reflector   fixed/left ... | moving rotors with pawls |
//!                                    ^-- rightmost `pawls` slots
//! ```
//!
//! Slot 0 always holds a reflector and slot `n-1` is the fastest rotor.
//! Only the rightmost `pawls` slots have pawls, so only moving rotors
//! placed there ever advance.
//!
//! # Stepping
//!
//! Before each conversion the notch state of every steppable rotor is
//! sampled once, then:
//! - the fastest rotor advances
//! - any other steppable rotor advances if the rotor to its right was at
//!   its notch, or if it was at its own notch
//! - no rotor advances more than once
//!
//! The own-notch rule produces the double step: a middle rotor that reaches
//! its notch moves again on the very next keystroke.
//!
//! # Signal Path
//!
//! ```text
//! in -> plugboard -> slot n-1 .. slot 1 -> reflector -> slot 1 .. slot n-1 -> plugboard -> out
//! ```
//!
//! # Thread Safety
//!
//! Every conversion mutates rotor settings, so the order of calls matters.
//! Use one machine per message stream.

use crate::alphabet::Alphabet;
use crate::error::{ConfigError, Result};
use crate::permutation::Permutation;
use crate::rotor::{MountedRotor, Rotor};
use crate::trace::Keystroke;
use std::collections::HashSet;
use std::sync::Arc;

/// A configurable rotor machine.
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Arc<Alphabet>,

    /// Number of rotor slots, reflector included
    num_rotors: usize,

    /// Number of rightmost slots with pawls
    pawls: usize,

    /// Every rotor available to this machine
    catalog: Vec<Arc<Rotor>>,

    /// Current assignment; empty until `insert_rotors`
    slots: Vec<MountedRotor>,

    plugboard: Permutation,
}

impl Machine {
    /// A machine over `alphabet` with `num_rotors` slots and `pawls` pawls,
    /// able to mount any rotor in `catalog`.
    ///
    /// # Errors
    /// - `ConfigError::TooFewSlots` unless `num_rotors > 1`
    /// - `ConfigError::TooManyPawls` unless `pawls < num_rotors`
    /// - `ConfigError::DuplicateRotorName` if two catalog rotors share a name
    pub fn new(
        alphabet: Arc<Alphabet>,
        num_rotors: usize,
        pawls: usize,
        catalog: impl IntoIterator<Item = Rotor>,
    ) -> Result<Self> {
        if num_rotors <= 1 {
            return Err(ConfigError::TooFewSlots(num_rotors).into());
        }
        if pawls >= num_rotors {
            return Err(ConfigError::TooManyPawls {
                pawls,
                slots: num_rotors,
            }
            .into());
        }

        let mut names = HashSet::new();
        let mut rotors = Vec::new();
        for rotor in catalog {
            if !names.insert(rotor.name().to_string()) {
                return Err(ConfigError::DuplicateRotorName(rotor.name().to_string()).into());
            }
            rotors.push(Arc::new(rotor));
        }

        Ok(Self {
            plugboard: Permutation::identity(alphabet.clone()),
            alphabet,
            num_rotors,
            pawls,
            catalog: rotors,
            slots: Vec::new(),
        })
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Number of rotor slots, reflector included.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Number of pawls, and so of rotors that can advance.
    pub fn num_pawls(&self) -> usize {
        self.pawls
    }

    /// Rotor definitions available to this machine.
    pub fn catalog(&self) -> impl Iterator<Item = &Rotor> {
        self.catalog.iter().map(|r| r.as_ref())
    }

    /// The rotor in slot `k`, if rotors have been inserted.
    pub fn rotor(&self, k: usize) -> Option<&MountedRotor> {
        self.slots.get(k)
    }

    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    pub fn set_plugboard(&mut self, plugboard: Permutation) {
        tracing::debug!(plugboard = %plugboard, "installed plugboard");
        self.plugboard = plugboard;
    }

    /// Fill the slots with the rotors named in `names`, all at setting 0.
    /// `names[0]` names the reflector.
    ///
    /// On error the previous assignment is kept.
    ///
    /// # Errors
    /// - `ConfigError::WrongRotorCount` unless exactly `num_rotors()` names
    /// - `ConfigError::UnknownRotor` for a name missing from the catalog
    /// - `ConfigError::RotorReused` for a name given twice
    /// - `ConfigError::MissingReflector` if slot 0 is not a reflector
    /// - `ConfigError::MisplacedReflector` for a reflector in any other slot
    /// - `ConfigError::MovingRotorWithoutPawl` for a moving rotor left of the pawls
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        if names.len() != self.num_rotors {
            return Err(ConfigError::WrongRotorCount {
                expected: self.num_rotors,
                actual: names.len(),
            }
            .into());
        }

        let first_pawl = self.num_rotors - self.pawls;
        let mut slots = Vec::with_capacity(self.num_rotors);

        for (slot, name) in names.iter().map(|n| n.as_ref()).enumerate() {
            let rotor = self
                .catalog
                .iter()
                .find(|r| r.name() == name)
                .ok_or_else(|| ConfigError::UnknownRotor(name.to_string()))?;

            if slots.iter().any(|m: &MountedRotor| m.name() == name) {
                return Err(ConfigError::RotorReused(name.to_string()).into());
            }
            if slot == 0 && !rotor.reflecting() {
                return Err(ConfigError::MissingReflector(name.to_string()).into());
            }
            if slot != 0 && rotor.reflecting() {
                return Err(ConfigError::MisplacedReflector {
                    name: name.to_string(),
                    slot,
                }
                .into());
            }
            if rotor.rotates() && slot < first_pawl {
                return Err(ConfigError::MovingRotorWithoutPawl {
                    name: name.to_string(),
                    slot,
                }
                .into());
            }

            slots.push(MountedRotor::new(rotor.clone()));
        }

        tracing::debug!(
            rotors = ?names.iter().map(|n| n.as_ref()).collect::<Vec<_>>(),
            "inserted rotors"
        );
        self.slots = slots;
        Ok(())
    }

    /// Set the rotors from `setting`, one symbol per slot 1..num_rotors().
    /// The first symbol is the leftmost non-reflector rotor.
    ///
    /// On error no rotor is changed.
    ///
    /// # Errors
    /// - `ConfigError::NoRotors` before `insert_rotors`
    /// - `ConfigError::SettingLength` unless `num_rotors() - 1` symbols
    /// - `AlphabetError::NotInAlphabet` for a symbol outside the alphabet
    pub fn set_rotors(&mut self, setting: &str) -> Result<()> {
        if self.slots.is_empty() {
            return Err(ConfigError::NoRotors.into());
        }

        let positions = setting
            .chars()
            .map(|c| self.alphabet.to_index(c))
            .collect::<Result<Vec<_>>>()?;
        if positions.len() != self.num_rotors - 1 {
            return Err(ConfigError::SettingLength {
                expected: self.num_rotors - 1,
                actual: positions.len(),
            }
            .into());
        }

        let mut slots = self.slots.clone();
        for (slot, position) in slots.iter_mut().skip(1).zip(positions) {
            slot.set(position)?;
        }
        self.slots = slots;

        tracing::debug!(setting, "set rotors");
        Ok(())
    }

    /// Return every mounted rotor to setting 0.
    pub fn reset_settings(&mut self) {
        for slot in &mut self.slots {
            slot.reset();
        }
    }

    /// Current settings of slots 1.., leftmost first.
    pub fn window(&self) -> String {
        let symbols = self.alphabet.symbols();
        self.slots
            .iter()
            .skip(1)
            .map(|slot| symbols[slot.setting()])
            .collect()
    }

    /// Advance the machine, then convert `index`.
    ///
    /// # Errors
    /// - `ConfigError::NoRotors` before `insert_rotors`
    /// - `AlphabetError::IndexOutOfRange` if `index` is outside the alphabet
    pub fn convert(&mut self, index: usize) -> Result<usize> {
        Ok(self.convert_traced(index)?.output_index)
    }

    /// [`convert`](Self::convert), returning a full record of the keystroke.
    pub fn convert_traced(&mut self, index: usize) -> Result<Keystroke> {
        if self.slots.is_empty() {
            return Err(ConfigError::NoRotors.into());
        }

        let alphabet = self.alphabet.clone();
        let mut key = Keystroke::new(alphabet.to_char(index)?);
        self.advance_rotors(&mut key)?;
        key.window = self.window();

        let mut signal = self.plugboard.permute(index)?;
        key.plugged = alphabet.to_char(signal)?;

        for slot in self.slots.iter().rev() {
            signal = slot.convert_forward(signal)?;
            key.stages.push(alphabet.to_char(signal)?);
        }
        for slot in self.slots.iter().skip(1) {
            signal = slot.convert_backward(signal)?;
            key.stages.push(alphabet.to_char(signal)?);
        }

        key.output_index = self.plugboard.permute(signal)?;
        key.output = alphabet.to_char(key.output_index)?;

        tracing::trace!(
            window = %key.window,
            input = %key.input,
            output = %key.output,
            "keystroke"
        );
        Ok(key)
    }

    /// Convert each symbol of `message` in order.
    ///
    /// # Errors
    /// Fails on the first symbol outside the alphabet; rotors already
    /// stepped for earlier symbols stay stepped.
    pub fn convert_message(&mut self, message: &str) -> Result<String> {
        let mut output = String::with_capacity(message.len());
        for symbol in message.chars() {
            let index = self.alphabet.to_index(symbol)?;
            let converted = self.convert(index)?;
            output.push(self.alphabet.to_char(converted)?);
        }
        Ok(output)
    }

    /// True if slot `i` has a pawl and a rotor that can move.
    fn steppable(&self, i: usize) -> bool {
        i >= self.num_rotors - self.pawls && self.slots[i].rotor().rotates()
    }

    /// Step the rotors for one keystroke, recording what moved.
    fn advance_rotors(&mut self, key: &mut Keystroke) -> Result<()> {
        let n = self.slots.len();
        let steppable: Vec<bool> = (0..n).map(|i| self.steppable(i)).collect();
        let notched: Vec<bool> = (0..n)
            .map(|i| steppable[i] && self.slots[i].at_notch())
            .collect();

        let mut advance = vec![false; n];
        advance[n - 1] = steppable[n - 1];

        for i in (0..n - 1).rev() {
            if !steppable[i] {
                continue;
            }
            let carried = notched[i + 1];
            let own_notch = notched[i];
            advance[i] = carried || own_notch;
            if own_notch && !carried {
                key.double_step = true;
            }
        }

        for i in (0..n).rev() {
            if advance[i] {
                self.slots[i].advance()?;
                key.advanced.push(i);
            }
        }
        Ok(())
    }
}

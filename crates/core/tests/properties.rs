//! Property-based tests for permutations and machines.
//!
//! These tests use proptest to verify invariants hold for all inputs:
//! - permute and invert are mutual inverses
//! - derangement() agrees with a direct fixed-point scan
//! - a machine reset to its starting settings decodes its own output
//! - no symbol ever encodes to itself

use enigma_core::{Alphabet, Machine, Permutation, Rotor};
use proptest::prelude::*;
use proptest::sample::Index;
use std::sync::Arc;

const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// Strategy for a random permutation of the upper-case alphabet, written as
// cycles of random lengths
fn cycles_strategy() -> impl Strategy<Value = String> {
    (
        Just(UPPER.chars().collect::<Vec<_>>()).prop_shuffle(),
        prop::collection::vec(1usize..=26, 1..10),
    )
        .prop_map(|(symbols, lengths)| {
            let mut text = String::new();
            let mut rest = symbols.as_slice();
            for len in lengths {
                if rest.is_empty() {
                    break;
                }
                let (cycle, tail) = rest.split_at(len.min(rest.len()));
                text.push('(');
                text.extend(cycle);
                text.push_str(") ");
                rest = tail;
            }
            text
        })
}

// Strategy for a reflector: the shuffled alphabet paired off two by two
fn reflector_strategy() -> impl Strategy<Value = String> {
    Just(UPPER.chars().collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(|symbols| {
            symbols
                .chunks(2)
                .map(|pair| format!("({}{})", pair[0], pair[1]))
                .collect()
        })
}

// Strategy for a plugboard of up to 13 swapped pairs
fn plugboard_strategy() -> impl Strategy<Value = String> {
    (reflector_strategy(), 0usize..=13).prop_map(|(pairs, count)| pairs[..count * 4].to_string())
}

fn upper() -> Arc<Alphabet> {
    Arc::new(Alphabet::default())
}

fn random_machine(
    reflector: &str,
    wirings: &[String],
    notches: &[Index],
    plugboard: &str,
) -> Machine {
    let alpha = upper();
    let perm = |c: &str| Permutation::new(c, alpha.clone()).unwrap();

    let mut catalog = vec![Rotor::reflector("R", perm(reflector)).unwrap()];
    for (i, (wiring, notch)) in wirings.iter().zip(notches).enumerate() {
        let notch = UPPER.chars().nth(notch.index(26)).unwrap().to_string();
        catalog.push(Rotor::moving(format!("M{}", i), perm(wiring), &notch).unwrap());
    }

    let mut machine = Machine::new(alpha.clone(), 4, 3, catalog).unwrap();
    machine.insert_rotors(&["R", "M0", "M1", "M2"]).unwrap();
    machine.set_plugboard(perm(plugboard));
    machine
}

proptest! {
    #[test]
    fn prop_permute_invert_round_trip(text in cycles_strategy()) {
        let perm = Permutation::new(&text, upper()).unwrap();
        for i in 0..perm.size() {
            prop_assert_eq!(perm.invert(perm.permute(i).unwrap()).unwrap(), i);
            prop_assert_eq!(perm.permute(perm.invert(i).unwrap()).unwrap(), i);
        }
    }

    #[test]
    fn prop_derangement_law(text in cycles_strategy()) {
        let perm = Permutation::new(&text, upper()).unwrap();
        let no_fixed_points = (0..perm.size()).all(|i| perm.permute(i).unwrap() != i);
        prop_assert_eq!(perm.derangement(), no_fixed_points);
    }

    #[test]
    fn prop_display_reparses(text in cycles_strategy()) {
        let perm = Permutation::new(&text, upper()).unwrap();
        let reparsed = Permutation::new(&perm.to_string(), upper()).unwrap();
        prop_assert_eq!(reparsed, perm);
    }

    #[test]
    fn prop_reflector_is_derangement(text in reflector_strategy()) {
        let perm = Permutation::new(&text, upper()).unwrap();
        prop_assert!(perm.derangement());
        prop_assert!(Rotor::reflector("R", perm).is_ok());
    }

    #[test]
    fn prop_machine_is_reciprocal(
        reflector in reflector_strategy(),
        wirings in prop::collection::vec(cycles_strategy(), 3),
        notches in prop::collection::vec(any::<Index>(), 3),
        plugboard in plugboard_strategy(),
        setting in "[A-Z]{3}",
        message in "[A-Z]{1,200}",
    ) {
        let mut machine = random_machine(&reflector, &wirings, &notches, &plugboard);

        machine.set_rotors(&setting).unwrap();
        let ciphertext = machine.convert_message(&message).unwrap();
        prop_assert_eq!(ciphertext.len(), message.len());

        machine.set_rotors(&setting).unwrap();
        prop_assert_eq!(machine.convert_message(&ciphertext).unwrap(), message);
    }

    #[test]
    fn prop_no_symbol_encodes_to_itself(
        reflector in reflector_strategy(),
        wirings in prop::collection::vec(cycles_strategy(), 3),
        notches in prop::collection::vec(any::<Index>(), 3),
        plugboard in plugboard_strategy(),
        message in "[A-Z]{1,100}",
    ) {
        let mut machine = random_machine(&reflector, &wirings, &notches, &plugboard);
        machine.set_rotors("AAA").unwrap();

        let ciphertext = machine.convert_message(&message).unwrap();
        for (p, c) in message.chars().zip(ciphertext.chars()) {
            prop_assert_ne!(p, c);
        }
    }

    #[test]
    fn prop_fastest_rotor_always_advances(
        reflector in reflector_strategy(),
        wirings in prop::collection::vec(cycles_strategy(), 3),
        notches in prop::collection::vec(any::<Index>(), 3),
        steps in 1usize..100,
    ) {
        let mut machine = random_machine(&reflector, &wirings, &notches, "");
        machine.set_rotors("AAA").unwrap();
        for _ in 0..steps {
            machine.convert(0).unwrap();
        }
        prop_assert_eq!(machine.rotor(3).unwrap().setting(), steps % 26);
    }
}

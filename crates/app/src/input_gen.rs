//! Sample input generation.
//!
//! With `--sample N` the binary ignores its input file and converts a
//! generated message block instead: one setting line followed by N random
//! symbols broken into lines.
//!
//! # Design
//!
//! The setting line is drawn from the machine's own catalog and always
//! satisfies the slot rules:
//! - a random reflector in slot 0
//! - distinct random fixed rotors in the slots without pawls
//! - distinct random moving rotors in the pawl slots
//! - a random setting and a plugboard of random disjoint pairs
//!
//! All randomness comes from a seeded ChaCha8 RNG, so a seed reproduces the
//! same block exactly.

use crate::error::{AppError, Result};
use enigma_core::{Machine, Rotor};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Symbols per generated message line.
const LINE_LENGTH: usize = 40;

/// Generate a sample block of `length` message symbols for `machine`.
///
/// # Errors
/// `AppError::Usage` if the catalog has too few rotors of some kind to
/// fill the machine's slots.
pub fn generate_sample_input(machine: &Machine, seed: u64, length: usize) -> Result<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let symbols = machine.alphabet().symbols();

    let mut block = String::from("*");
    for name in choose_rotors(machine, &mut rng)? {
        block.push(' ');
        block.push_str(&name);
    }

    block.push(' ');
    for _ in 1..machine.num_rotors() {
        block.push(symbols[rng.gen_range(0..symbols.len())]);
    }

    let mut shuffled = symbols.to_vec();
    shuffled.shuffle(&mut rng);
    let pairs = rng.gen_range(0..=shuffled.len() / 2);
    for pair in shuffled.chunks_exact(2).take(pairs) {
        block.push_str(&format!(" ({}{})", pair[0], pair[1]));
    }
    block.push('\n');

    let message: Vec<char> = (0..length)
        .map(|_| symbols[rng.gen_range(0..symbols.len())])
        .collect();
    for line in message.chunks(LINE_LENGTH) {
        block.extend(line);
        block.push('\n');
    }

    Ok(block)
}

/// Pick rotor names for every slot, reflector first.
fn choose_rotors(machine: &Machine, rng: &mut ChaCha8Rng) -> Result<Vec<String>> {
    let pick = |filter: fn(&Rotor) -> bool, count: usize, what: &str, rng: &mut ChaCha8Rng| {
        let candidates: Vec<&Rotor> = machine.catalog().filter(|r| filter(r)).collect();
        if candidates.len() < count {
            return Err(AppError::Usage(format!(
                "catalog has {} {} rotors, sample needs {}",
                candidates.len(),
                what,
                count
            )));
        }
        Ok(candidates
            .choose_multiple(rng, count)
            .map(|r| r.name().to_string())
            .collect::<Vec<_>>())
    };

    let pawls = machine.num_pawls();
    let fixed = machine.num_rotors() - 1 - pawls;

    let mut names = pick(Rotor::reflecting, 1, "reflecting", rng)?;
    names.extend(pick(|r| !r.reflecting() && !r.rotates(), fixed, "fixed", rng)?);
    names.extend(pick(Rotor::rotates, pawls, "moving", rng)?);
    Ok(names)
}

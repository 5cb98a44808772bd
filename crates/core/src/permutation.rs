//! Permutations of an alphabet's index space in cycle notation.
//!
//! A permutation is specified as a string of disjoint cycles such as
//! `"(AELT) (BKNW) (S)"`. Within a cycle each symbol maps to the next and
//! the last maps back to the first. Symbols that appear in no cycle map to
//! themselves. Whitespace anywhere in the string is ignored.
//!
//! # Representation
//!
//! Both directions are materialized eagerly as index tables when the
//! permutation is built, so `permute` and `invert` are single lookups:
//!
//! ```text
//! forward[i] = j   <=>   inverse[j] = i
//! ```
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use enigma_core::alphabet::Alphabet;
//! use enigma_core::permutation::Permutation;
//!
//! let alpha = Arc::new(Alphabet::new("ABCD").unwrap());
//! let perm = Permutation::new("(BACD)", alpha).unwrap();
//! assert_eq!(perm.permute_char('B').unwrap(), 'A');
//! assert_eq!(perm.invert_char('A').unwrap(), 'B');
//! ```

use crate::alphabet::Alphabet;
use crate::error::{AlphabetError, PermutationError, Result};
use std::fmt;
use std::sync::Arc;

/// A bijection over `0..alphabet.size()`.
///
/// # Invariants
/// - `forward` and `inverse` both have length `alphabet.size()`
/// - `inverse[forward[i]] == i` for every index i
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Parse `cycles` over `alphabet`.
    ///
    /// # Errors
    /// - `PermutationError::UnbalancedParenthesis` for nested or unclosed cycles
    /// - `PermutationError::EmptyCycle` for `()`
    /// - `PermutationError::StrayCharacter` for symbols outside parentheses
    /// - `PermutationError::UnknownSymbol` for symbols outside the alphabet
    /// - `PermutationError::RepeatedSymbol` if the cycles are not disjoint
    pub fn new(cycles: &str, alphabet: Arc<Alphabet>) -> Result<Self> {
        let size = alphabet.size();
        let mut forward: Vec<usize> = (0..size).collect();
        let mut seen = vec![false; size];

        for cycle in parse_cycles(cycles)? {
            let mut indices = Vec::with_capacity(cycle.len());
            for symbol in cycle {
                let index = alphabet
                    .to_index(symbol)
                    .map_err(|_| PermutationError::UnknownSymbol(symbol))?;
                if seen[index] {
                    return Err(PermutationError::RepeatedSymbol(symbol).into());
                }
                seen[index] = true;
                indices.push(index);
            }

            for (k, &from) in indices.iter().enumerate() {
                forward[from] = indices[(k + 1) % indices.len()];
            }
        }

        let mut inverse = vec![0; size];
        for (from, &to) in forward.iter().enumerate() {
            inverse[to] = from;
        }

        Ok(Self {
            alphabet,
            forward,
            inverse,
        })
    }

    /// The permutation that maps every index to itself.
    pub fn identity(alphabet: Arc<Alphabet>) -> Self {
        let forward: Vec<usize> = (0..alphabet.size()).collect();
        Self {
            inverse: forward.clone(),
            forward,
            alphabet,
        }
    }

    /// Size of the underlying alphabet.
    pub fn size(&self) -> usize {
        self.forward.len()
    }

    /// The alphabet this permutation is defined over.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// `p` modulo `size()`, always non-negative.
    pub fn wrap(&self, p: i64) -> usize {
        p.rem_euclid(self.size() as i64) as usize
    }

    /// Image of `index` under this permutation.
    ///
    /// # Errors
    /// `AlphabetError::IndexOutOfRange` unless `index < size()`.
    pub fn permute(&self, index: usize) -> Result<usize> {
        self.forward
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Preimage of `index` under this permutation.
    ///
    /// # Errors
    /// `AlphabetError::IndexOutOfRange` unless `index < size()`.
    pub fn invert(&self, index: usize) -> Result<usize> {
        self.inverse
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Symbol-level [`permute`](Self::permute).
    ///
    /// # Errors
    /// `AlphabetError::NotInAlphabet` if `symbol` is not in the alphabet.
    pub fn permute_char(&self, symbol: char) -> Result<char> {
        let index = self.alphabet.to_index(symbol)?;
        self.alphabet.to_char(self.forward[index])
    }

    /// Symbol-level [`invert`](Self::invert).
    ///
    /// # Errors
    /// `AlphabetError::NotInAlphabet` if `symbol` is not in the alphabet.
    pub fn invert_char(&self, symbol: char) -> Result<char> {
        let index = self.alphabet.to_index(symbol)?;
        self.alphabet.to_char(self.inverse[index])
    }

    /// True iff no index maps to itself.
    pub fn derangement(&self) -> bool {
        self.forward.iter().enumerate().all(|(i, &j)| i != j)
    }

    fn out_of_range(&self, index: usize) -> crate::error::Error {
        AlphabetError::IndexOutOfRange {
            index,
            size: self.size(),
        }
        .into()
    }
}

/// Renders the non-trivial cycles, each starting at its lowest index.
impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = self.alphabet.symbols();
        let mut visited = vec![false; self.size()];

        for start in 0..self.size() {
            if visited[start] || self.forward[start] == start {
                continue;
            }
            write!(f, "(")?;
            let mut i = start;
            while !visited[i] {
                visited[i] = true;
                write!(f, "{}", symbols[i])?;
                i = self.forward[i];
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Split a cycle string into its cycles' symbols.
fn parse_cycles(text: &str) -> std::result::Result<Vec<Vec<char>>, PermutationError> {
    let mut cycles = Vec::new();
    let mut current: Option<(usize, Vec<char>)> = None;

    for (position, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            continue;
        }
        match c {
            '(' => {
                if current.is_some() {
                    return Err(PermutationError::UnbalancedParenthesis { position });
                }
                current = Some((position, Vec::new()));
            }
            ')' => match current.take() {
                None => return Err(PermutationError::UnbalancedParenthesis { position }),
                Some((opened, symbols)) if symbols.is_empty() => {
                    return Err(PermutationError::EmptyCycle { position: opened });
                }
                Some((_, symbols)) => cycles.push(symbols),
            },
            symbol => match current.as_mut() {
                Some((_, symbols)) => symbols.push(symbol),
                None => return Err(PermutationError::StrayCharacter { symbol, position }),
            },
        }
    }

    if let Some((opened, _)) = current {
        return Err(PermutationError::UnbalancedParenthesis { position: opened });
    }

    Ok(cycles)
}

//! Ordered symbol sets with a bijection to contiguous indices.
//!
//! The K-th symbol of an alphabet has index K. An alphabet is immutable
//! once built and is shared (via `Arc`) by every permutation and rotor
//! defined over it.
//!
//! # Example
//! ```
//! use enigma_core::alphabet::Alphabet;
//!
//! let alpha = Alphabet::new("ABCD").unwrap();
//! assert_eq!(alpha.size(), 4);
//! assert_eq!(alpha.to_index('C').unwrap(), 2);
//! assert_eq!(alpha.to_char(3).unwrap(), 'D');
//! ```

use crate::error::{AlphabetError, ConfigError, Result};
use std::collections::HashMap;
use std::fmt;

/// The 26 upper-case Latin letters, used by [`Alphabet::default`].
pub const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A bijection between symbols and indices `0..size()`.
///
/// # Invariants
/// - `symbols` has no duplicates and at least one entry
/// - `positions[symbols[k]] == k` for every k
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    /// Symbols in index order
    symbols: Vec<char>,
    /// Reverse lookup: symbol -> index
    positions: HashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet from the characters of `chars`, in order.
    ///
    /// # Errors
    /// - `ConfigError::EmptyAlphabet` if `chars` is empty
    /// - `ConfigError::DuplicateSymbol` if a character repeats
    pub fn new(chars: &str) -> Result<Self> {
        let symbols: Vec<char> = chars.chars().collect();
        if symbols.is_empty() {
            return Err(ConfigError::EmptyAlphabet.into());
        }

        let mut positions = HashMap::with_capacity(symbols.len());
        for (index, &symbol) in symbols.iter().enumerate() {
            if positions.insert(symbol, index).is_some() {
                return Err(ConfigError::DuplicateSymbol(symbol).into());
            }
        }

        Ok(Self { symbols, positions })
    }

    /// Number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// True if `symbol` belongs to this alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.positions.contains_key(&symbol)
    }

    /// Symbol at `index`.
    ///
    /// # Errors
    /// `AlphabetError::IndexOutOfRange` unless `index < size()`.
    pub fn to_char(&self, index: usize) -> Result<char> {
        self.symbols.get(index).copied().ok_or_else(|| {
            AlphabetError::IndexOutOfRange {
                index,
                size: self.size(),
            }
            .into()
        })
    }

    /// Index of `symbol`. Inverse of [`to_char`](Self::to_char).
    ///
    /// # Errors
    /// `AlphabetError::NotInAlphabet` if `symbol` is absent.
    pub fn to_index(&self, symbol: char) -> Result<usize> {
        self.positions
            .get(&symbol)
            .copied()
            .ok_or_else(|| AlphabetError::NotInAlphabet(symbol).into())
    }

    /// All symbols in index order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let symbols: Vec<char> = UPPER.chars().collect();
        let positions = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, positions }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_default_is_upper_case() {
        let alpha = Alphabet::default();
        assert_eq!(alpha.size(), 26);
        assert_eq!(alpha.to_char(0).unwrap(), 'A');
        assert_eq!(alpha.to_char(25).unwrap(), 'Z');
        assert_eq!(alpha.to_string(), UPPER);
    }

    #[test]
    fn test_index_char_bijection() {
        let alpha = Alphabet::new("ZYXQDFAB").unwrap();
        for i in 0..alpha.size() {
            let symbol = alpha.to_char(i).unwrap();
            assert_eq!(alpha.to_index(symbol).unwrap(), i);
        }
    }

    #[test]
    fn test_contains() {
        let alpha = Alphabet::new("AB.1").unwrap();
        assert!(alpha.contains('.'));
        assert!(alpha.contains('1'));
        assert!(!alpha.contains('C'));
    }

    #[test]
    fn test_to_char_out_of_range() {
        let alpha = Alphabet::new("ABCD").unwrap();
        let err = alpha.to_char(4).unwrap_err();
        assert_eq!(
            err,
            Error::Alphabet(AlphabetError::IndexOutOfRange { index: 4, size: 4 })
        );
        assert!(alpha.to_char(usize::MAX).is_err());
    }

    #[test]
    fn test_to_index_missing_symbol() {
        let alpha = Alphabet::new("ABCD").unwrap();
        assert_eq!(
            alpha.to_index('Z').unwrap_err(),
            Error::Alphabet(AlphabetError::NotInAlphabet('Z'))
        );
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        assert_eq!(
            Alphabet::new("ABCA").unwrap_err(),
            Error::Config(ConfigError::DuplicateSymbol('A'))
        );
        assert_eq!(
            Alphabet::new("").unwrap_err(),
            Error::Config(ConfigError::EmptyAlphabet)
        );
    }

    #[test]
    fn test_single_symbol() {
        let alpha = Alphabet::new("Q").unwrap();
        assert_eq!(alpha.size(), 1);
        assert_eq!(alpha.to_index('Q').unwrap(), 0);
    }
}

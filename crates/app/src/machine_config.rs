//! Machine configuration file parsing.
//!
//! # File Format
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ          alphabet, in index order
//! 5 3                                 slot count, pawl count
//! I MQ   (AELTPHQXRU) (BKNW) ...      NAME TYPE CYCLES...
//! Beta N (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B R    (AE) (BN) (CK) ...
//!        (RX) (SZ) (TV)               cycles may continue on later lines
//! ```
//!
//! TYPE is `M` followed by the notch symbols for a moving rotor, `N` for a
//! fixed rotor and `R` for a reflector. Tokens are whitespace separated;
//! line breaks carry no meaning except in error messages.

use crate::error::{AppError, Result};
use enigma_core::{Alphabet, Machine, Permutation, Rotor};
use std::path::Path;
use std::sync::Arc;

/// A whitespace-separated token and the 1-based line it came from.
#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    line: usize,
}

/// Cursor over the tokens of a configuration file.
struct Tokens<'a> {
    tokens: Vec<Token<'a>>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let tokens = text
            .lines()
            .enumerate()
            .flat_map(|(i, line)| {
                line.split_whitespace()
                    .map(move |text| Token { text, line: i + 1 })
            })
            .collect();
        Self {
            tokens,
            position: 0,
        }
    }

    fn next(&mut self) -> Result<Token<'a>> {
        let token = self.peek().ok_or(AppError::Truncated)?;
        self.position += 1;
        Ok(token)
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.position).copied()
    }

    fn next_number(&mut self, what: &str) -> Result<usize> {
        let token = self.next()?;
        token.text.parse().map_err(|_| {
            AppError::syntax(token.line, format!("expected {}, got '{}'", what, token.text))
        })
    }
}

/// Build a machine from configuration file text.
///
/// # Errors
/// - `AppError::Truncated` if the alphabet, counts or a rotor type is missing
/// - `AppError::Syntax` for non-numeric counts or an unknown rotor type
/// - `AppError::Engine` for anything the engine rejects (duplicate symbols,
///   bad cycles, non-derangement reflectors, bad slot counts)
pub fn parse_config(text: &str) -> Result<Machine> {
    let mut tokens = Tokens::new(text);

    let alphabet = Arc::new(Alphabet::new(tokens.next()?.text)?);
    let num_rotors = tokens.next_number("slot count")?;
    let pawls = tokens.next_number("pawl count")?;

    let mut catalog = Vec::new();
    while tokens.peek().is_some() {
        catalog.push(parse_rotor(&mut tokens, &alphabet)?);
    }

    tracing::debug!(
        alphabet = %alphabet,
        num_rotors,
        pawls,
        rotors = catalog.len(),
        "parsed machine configuration"
    );
    Ok(Machine::new(alphabet, num_rotors, pawls, catalog)?)
}

/// Read and parse the configuration file at `path`.
pub fn read_config(path: &Path) -> Result<Machine> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::File {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}

/// Parse one `NAME TYPE CYCLES...` rotor description.
fn parse_rotor(tokens: &mut Tokens<'_>, alphabet: &Arc<Alphabet>) -> Result<Rotor> {
    let name = tokens.next()?;
    let kind = tokens.next()?;

    let mut cycles = String::new();
    while let Some(token) = tokens.peek() {
        if !token.text.starts_with('(') {
            break;
        }
        cycles.push_str(token.text);
        tokens.next()?;
    }

    let permutation = Permutation::new(&cycles, alphabet.clone())?;
    let mut kind_chars = kind.text.chars();
    let rotor = match (kind_chars.next(), kind_chars.as_str()) {
        (Some('M'), notches) => Rotor::moving(name.text, permutation, notches)?,
        (Some('N'), "") => Rotor::fixed(name.text, permutation),
        (Some('R'), "") => Rotor::reflector(name.text, permutation)?,
        (Some('N' | 'R'), _) => {
            return Err(AppError::syntax(
                kind.line,
                format!("only moving rotors have notches, rotor '{}'", name.text),
            ));
        }
        _ => {
            return Err(AppError::syntax(
                kind.line,
                format!("bad rotor type '{}' for rotor '{}'", kind.text, name.text),
            ));
        }
    };
    Ok(rotor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use enigma_core::error::{ConfigError, Error};
    use enigma_core::RotorKind;

    const DEFAULT_CONF: &str = include_str!("../../../demos/default.conf");

    #[test]
    fn test_parse_default_config() {
        let machine = parse_config(DEFAULT_CONF).unwrap();
        assert_eq!(machine.alphabet().size(), 26);
        assert_eq!(machine.num_rotors(), 5);
        assert_eq!(machine.num_pawls(), 3);

        let names: Vec<&str> = machine.catalog().map(|r| r.name()).collect();
        assert_eq!(
            names,
            ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "Beta", "Gamma", "B", "C"]
        );

        let vi = machine.catalog().find(|r| r.name() == "VI").unwrap();
        assert_eq!(vi.notches(), "ZM");
        let gamma = machine.catalog().find(|r| r.name() == "Gamma").unwrap();
        assert_eq!(gamma.kind(), &RotorKind::Fixed);
        let c = machine.catalog().find(|r| r.name() == "C").unwrap();
        assert!(c.reflecting());
    }

    #[test]
    fn test_cycles_spanning_lines() {
        let machine = parse_config("ABCD 2 1\nM MA (AB)\n  (CD)\nR R (AC)\n (BD)").unwrap();
        let m = machine.catalog().find(|r| r.name() == "M").unwrap();
        assert_eq!(m.permutation().permute_char('C').unwrap(), 'D');
        assert_eq!(m.notches(), "A");
    }

    #[test]
    fn test_truncated() {
        assert!(matches!(parse_config(""), Err(AppError::Truncated)));
        assert!(matches!(parse_config("ABCD 3"), Err(AppError::Truncated)));
        assert!(matches!(parse_config("ABCD 3 1 I"), Err(AppError::Truncated)));
    }

    #[test]
    fn test_bad_counts() {
        let err = parse_config("ABCD\nthree 1").unwrap_err();
        assert!(matches!(err, AppError::Syntax { line: 2, .. }));
    }

    #[test]
    fn test_bad_rotor_type() {
        let err = parse_config("ABCD 2 1\nX Q (AB)").unwrap_err();
        assert!(matches!(err, AppError::Syntax { line: 2, .. }));

        let err = parse_config("ABCD 2 1\nX NA (AB)").unwrap_err();
        assert!(matches!(err, AppError::Syntax { line: 2, .. }));
    }

    #[test]
    fn test_engine_errors_propagate() {
        let err = parse_config("ABCD 2 1\nR R (AB)").unwrap_err();
        assert!(matches!(
            err,
            AppError::Engine(Error::Config(ConfigError::NotDerangement(_)))
        ));

        let err = parse_config("ABCA 2 1").unwrap_err();
        assert!(matches!(
            err,
            AppError::Engine(Error::Config(ConfigError::DuplicateSymbol('A')))
        ));

        let err = parse_config("ABCD 2 2").unwrap_err();
        assert!(matches!(
            err,
            AppError::Engine(Error::Config(ConfigError::TooManyPawls { .. }))
        ));
    }
}

//! Key-sequence parsing for text front ends.
//!
//! Turns input such as `"12 + 3 ="` or `"90 sin"` into keypad presses.
//! Tokens may be separated by whitespace or written together (`"12+3="`).

use super::Key;
use crate::calculator::{Operator, ScientificOp};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// Matches strings containing only characters the key grammar uses.
    static ref KEY_SAFE_CHARS: Regex = Regex::new(
        r"^[\d\s\.\+\-\*/\^=%!a-zA-Z±×÷√π]+$"
    ).unwrap();

    /// One key token. The final `\S` catches anything unknown so it can be
    /// reported instead of skipped.
    static ref KEY_TOKEN: Regex = Regex::new(
        r"(?i)clear-history|m[+\-]|[a-z]+|\d|[.+\-*/^=%!±×÷√π]|\S"
    ).unwrap();
}

/// Why a key sequence could not be read.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("no keys given")]
    Empty,
    #[error("unrecognized key '{token}' at position {position}")]
    Unrecognized { token: String, position: usize },
}

/// Check if input could be a key sequence.
///
/// A fast pre-check before [`parse_keys`]: rejects empty input and input
/// with characters outside the key alphabet. It does not validate words.
pub fn looks_like_key_sequence(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty() && KEY_SAFE_CHARS.is_match(trimmed)
}

/// Parse a whole key sequence.
///
/// Either every token is recognized or nothing is returned, so a caller
/// never applies half of a line.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, KeyError> {
    if input.trim().is_empty() {
        return Err(KeyError::Empty);
    }

    KEY_TOKEN
        .find_iter(input)
        .map(|m| {
            parse_token(m.as_str()).ok_or_else(|| KeyError::Unrecognized {
                token: m.as_str().to_string(),
                position: m.start(),
            })
        })
        .collect()
}

/// Map a single token to its key.
fn parse_token(token: &str) -> Option<Key> {
    let lower = token.to_lowercase();

    if let Some(op) = Operator::from_symbol(&lower) {
        return Some(Key::Operator(op));
    }

    let key = match lower.as_str() {
        "." => Key::Decimal,
        "=" => Key::Equals,
        "%" => Key::Percent,
        "±" | "neg" => Key::ToggleSign,
        "c" => Key::Clear,
        "ce" => Key::ClearEntry,
        "mc" => Key::MemoryClear,
        "mr" => Key::MemoryRecall,
        "m+" => Key::MemoryAdd,
        "m-" => Key::MemorySubtract,
        "deg" => Key::ToggleDegreeMode,
        "sci" => Key::ToggleScientificMode,
        "clear-history" => Key::ClearHistory,
        digit if is_single_digit(digit) => Key::Digit(digit.chars().next()?),
        other => Key::Scientific(other.parse::<ScientificOp>().ok()?),
    };
    Some(key)
}

fn is_single_digit(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_digit())
}

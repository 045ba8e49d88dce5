mod detection;

pub use detection::{KeyError, looks_like_key_sequence, parse_keys};

use crate::calculator::{Operator, ScientificOp};

/// A single keypad input.
/// Every calculator transition is reachable through exactly one variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A digit `0`-`9`
    Digit(char),
    /// The decimal point
    Decimal,
    /// A binary operator
    Operator(Operator),
    /// Evaluate the pending operation
    Equals,
    /// Reset the whole calculator
    Clear,
    /// Reset the current entry
    ClearEntry,
    ToggleSign,
    Percent,
    /// A scientific function or constant
    Scientific(ScientificOp),
    MemoryAdd,
    MemorySubtract,
    MemoryRecall,
    MemoryClear,
    ToggleDegreeMode,
    ToggleScientificMode,
    ClearHistory,
}

impl Key {
    /// Get the label printed on the keypad for this key.
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => match op {
                Operator::Multiply => "×".to_string(),
                Operator::Divide => "÷".to_string(),
                other => other.symbol().to_string(),
            },
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::ClearEntry => "CE".to_string(),
            Self::ToggleSign => "±".to_string(),
            Self::Percent => "%".to_string(),
            Self::Scientific(op) => match op {
                ScientificOp::Square => "x²".to_string(),
                ScientificOp::Sqrt => "√".to_string(),
                ScientificOp::Reciprocal => "1/x".to_string(),
                ScientificOp::Factorial => "n!".to_string(),
                ScientificOp::Pi => "π".to_string(),
                other => other.name().to_string(),
            },
            Self::MemoryAdd => "M+".to_string(),
            Self::MemorySubtract => "M-".to_string(),
            Self::MemoryRecall => "MR".to_string(),
            Self::MemoryClear => "MC".to_string(),
            Self::ToggleDegreeMode => "DEG/RAD".to_string(),
            Self::ToggleScientificMode => "SCI".to_string(),
            Self::ClearHistory => "Clear history".to_string(),
        }
    }

    /// Check if this key is only offered in scientific mode.
    pub fn is_scientific(&self) -> bool {
        matches!(
            self,
            Self::Scientific(_) | Self::ToggleDegreeMode | Self::Operator(Operator::Power)
        )
    }

    /// Get the keypad section this key belongs to.
    pub fn section_name(&self) -> &'static str {
        match self {
            Self::Digit(_) | Self::Decimal => "Digits",
            Self::Operator(_) | Self::Equals | Self::Percent | Self::ToggleSign => "Operators",
            Self::Clear | Self::ClearEntry => "Clear",
            Self::Scientific(op) if op.is_constant() => "Constants",
            Self::Scientific(_) => "Scientific",
            Self::MemoryAdd | Self::MemorySubtract | Self::MemoryRecall | Self::MemoryClear => {
                "Memory"
            }
            Self::ToggleDegreeMode | Self::ToggleScientificMode => "Modes",
            Self::ClearHistory => "History",
        }
    }
}

/// Every key, in keypad order (grouped by section).
pub fn keypad() -> Vec<Key> {
    let mut keys = vec![
        Key::MemoryClear,
        Key::MemoryRecall,
        Key::MemoryAdd,
        Key::MemorySubtract,
        Key::ToggleDegreeMode,
        Key::ToggleScientificMode,
    ];
    keys.extend(
        ScientificOp::ALL
            .into_iter()
            .filter(|op| !op.is_constant())
            .map(Key::Scientific),
    );
    keys.extend(
        ScientificOp::ALL
            .into_iter()
            .filter(|op| op.is_constant())
            .map(Key::Scientific),
    );
    keys.extend([Key::Clear, Key::ClearEntry]);
    keys.extend(
        [
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
            Operator::Power,
        ]
        .map(Key::Operator),
    );
    keys.extend([Key::Equals, Key::Percent, Key::ToggleSign]);
    keys.extend(('0'..='9').map(Key::Digit));
    keys.extend([Key::Decimal, Key::ClearHistory]);
    keys
}

// Convenient From implementations

impl From<Operator> for Key {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

impl From<ScientificOp> for Key {
    fn from(op: ScientificOp) -> Self {
        Self::Scientific(op)
    }
}

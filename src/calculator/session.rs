//! Key dispatch and the session that owns the calculator state.

use super::state::CalculatorState;
use crate::keys::Key;
use tracing::{debug, trace};

impl CalculatorState {
    /// Apply one key press, returning the next state.
    pub fn apply(&self, key: Key) -> Self {
        match key {
            Key::Digit(d) => self.append_digit(d),
            Key::Decimal => self.append_decimal(),
            Key::Operator(op) => self.set_operation(op),
            Key::Equals => self.calculate(),
            Key::Clear => self.clear(),
            Key::ClearEntry => self.clear_entry(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Percent => self.percentage(),
            Key::Scientific(op) => self.scientific_operation(op),
            Key::MemoryAdd => self.memory_add(),
            Key::MemorySubtract => self.memory_subtract(),
            Key::MemoryRecall => self.memory_recall(),
            Key::MemoryClear => self.memory_clear(),
            Key::ToggleDegreeMode => self.toggle_degree_mode(),
            Key::ToggleScientificMode => self.toggle_scientific_mode(),
            Key::ClearHistory => self.clear_history(),
        }
    }
}

/// Owns the state of one calculator session.
///
/// Keys are applied one at a time and each press replaces the state
/// wholesale. There is no internal locking: callers on several threads must
/// serialize access, e.g. behind a `Mutex<Calculator>`.
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    state: CalculatorState,
}

impl Calculator {
    /// Create a session in the initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session from a previously saved state.
    pub fn with_state(state: CalculatorState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn into_state(self) -> CalculatorState {
        self.state
    }

    /// Apply a key press and return the new state.
    pub fn press(&mut self, key: Key) -> &CalculatorState {
        let next = self.state.apply(key);
        debug!(key = %key.label(), display = %next.display, "key applied");
        if next.error.is_some() && self.state.error.is_none() {
            debug!(error = ?next.error, "entered error state");
        }
        self.state = next;
        &self.state
    }

    /// Apply a sequence of key presses in order.
    pub fn press_all<I>(&mut self, keys: I) -> &CalculatorState
    where
        I: IntoIterator<Item = Key>,
    {
        for key in keys {
            self.press(key);
        }
        trace!(state = ?self.state, "sequence applied");
        &self.state
    }
}

//! A keypad calculator engine.
//!
//! Operators evaluate immediately and left to right, the way a desk
//! calculator does: `1 + 2 * 3 =` shows `9`. The engine is a pure state
//! machine: every key press maps the current [`CalculatorState`] to a new
//! one, and numeric failures become an Error state instead of a Rust error.
//!
//! ```
//! use zcalc::{Calculator, keys::parse_keys};
//!
//! let mut calculator = Calculator::new();
//! calculator.press_all(parse_keys("1 + 2 * 3 =").unwrap());
//! assert_eq!(calculator.state().display, "9");
//! ```

pub mod calculator;
pub mod config;
pub mod keys;
pub mod persist;
pub mod view;

pub use calculator::{CalcError, Calculator, CalculatorState, Operator, ScientificOp};
pub use keys::Key;

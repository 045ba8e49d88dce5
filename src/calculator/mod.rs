//! Calculator engine.
//!
//! This module provides:
//! - Stateless arithmetic and scientific functions
//! - Number formatting for the display, and parsing display text back
//! - The calculator state and its transitions (immediate, left-to-right
//!   evaluation of chained operators)
//! - A session type that owns the state and applies key presses

mod error;
mod format;
pub mod functions;
mod session;
mod state;
mod transitions;

pub use error::CalcError;
pub use format::{ERROR_DISPLAY, INFINITY_DISPLAY, NEG_INFINITY_DISPLAY, format_number, parse_value};
pub use session::Calculator;
pub use state::{CalculatorState, Operator, ScientificOp};

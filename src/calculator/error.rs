//! Failures raised by the calculator's numeric functions.

use thiserror::Error;

/// A numeric function could not produce a result for its input.
///
/// The `Display` text is what the engine stores as the error message when a
/// transition enters the Error state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The divisor (or the value being inverted) was zero.
    #[error("Division by zero")]
    DivisionByZero,
    /// The input lies outside the function's domain.
    #[error("{0}")]
    DomainError(&'static str),
    /// The function has no value at this input.
    #[error("{0}")]
    UndefinedResult(&'static str),
}

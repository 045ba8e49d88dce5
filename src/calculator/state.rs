//! Calculator state record and the operator/function tags it refers to.

use super::error::CalcError;
use super::format::{ERROR_DISPLAY, format_number, parse_value};
use super::functions;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A binary operator waiting for its right-hand operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    /// Symbol used on the keypad and in history lines.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
        }
    }

    /// Look up an operator by its symbol; `×` and `÷` are accepted too.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" | "×" => Some(Self::Multiply),
            "/" | "÷" => Some(Self::Divide),
            "^" => Some(Self::Power),
            _ => None,
        }
    }

    /// Evaluate `left <op> right`.
    pub fn apply(&self, left: f64, right: f64) -> Result<f64, CalcError> {
        match self {
            Self::Add => Ok(functions::add(left, right)),
            Self::Subtract => Ok(functions::subtract(left, right)),
            Self::Multiply => Ok(functions::multiply(left, right)),
            Self::Divide => functions::divide(left, right),
            Self::Power => Ok(functions::power(left, right)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single-argument scientific function or a constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScientificOp {
    Square,
    Sqrt,
    Cbrt,
    Reciprocal,
    Factorial,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Ln,
    Exp,
    Abs,
    Pi,
    E,
}

impl ScientificOp {
    pub const ALL: [ScientificOp; 17] = [
        Self::Square,
        Self::Sqrt,
        Self::Cbrt,
        Self::Reciprocal,
        Self::Factorial,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Log,
        Self::Ln,
        Self::Exp,
        Self::Abs,
        Self::Pi,
        Self::E,
    ];

    /// Tag name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Reciprocal => "reciprocal",
            Self::Factorial => "factorial",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Exp => "exp",
            Self::Abs => "abs",
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    /// Constants ignore the current value.
    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Pi | Self::E)
    }

    /// Apply the function to `value`, honouring the angle unit for trig.
    pub fn evaluate(&self, value: f64, is_degree_mode: bool) -> Result<f64, CalcError> {
        match self {
            Self::Square => Ok(functions::square(value)),
            Self::Sqrt => functions::square_root(value),
            Self::Cbrt => Ok(functions::cube_root(value)),
            Self::Reciprocal => functions::reciprocal(value),
            Self::Factorial => functions::factorial(value),
            Self::Sin => Ok(functions::sin(value, is_degree_mode)),
            Self::Cos => Ok(functions::cos(value, is_degree_mode)),
            Self::Tan => functions::tan(value, is_degree_mode),
            Self::Asin => functions::asin(value, is_degree_mode),
            Self::Acos => functions::acos(value, is_degree_mode),
            Self::Atan => Ok(functions::atan(value, is_degree_mode)),
            Self::Log => functions::log10(value),
            Self::Ln => functions::ln(value),
            Self::Exp => Ok(functions::exp(value)),
            Self::Abs => Ok(functions::absolute(value)),
            Self::Pi => Ok(functions::pi()),
            Self::E => Ok(functions::e()),
        }
    }

    /// Symbolic form written to the history log, e.g. `√(4)` or `sin(30°)`.
    pub fn symbolic_form(&self, value: f64, is_degree_mode: bool) -> String {
        let unit = if is_degree_mode { "°" } else { " rad" };
        let value = format_number(value);
        match self {
            Self::Square => format!("sqr({})", value),
            Self::Sqrt => format!("√({})", value),
            Self::Cbrt => format!("cbrt({})", value),
            Self::Reciprocal => format!("1/({})", value),
            Self::Factorial => format!("fact({})", value),
            Self::Sin => format!("sin({}{})", value, unit),
            Self::Cos => format!("cos({}{})", value, unit),
            Self::Tan => format!("tan({}{})", value, unit),
            Self::Asin => format!("asin({})", value),
            Self::Acos => format!("acos({})", value),
            Self::Atan => format!("atan({})", value),
            Self::Log => format!("log({})", value),
            Self::Ln => format!("ln({})", value),
            Self::Exp => format!("exp({})", value),
            Self::Abs => format!("abs({})", value),
            Self::Pi => "π".to_string(),
            Self::E => "e".to_string(),
        }
    }
}

impl fmt::Display for ScientificOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScientificOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        let op = match lower.as_str() {
            "sqr" => Self::Square,
            "√" => Self::Sqrt,
            "inv" | "recip" => Self::Reciprocal,
            "fact" | "!" => Self::Factorial,
            "π" => Self::Pi,
            other => {
                return Self::ALL
                    .into_iter()
                    .find(|op| op.name() == other)
                    .ok_or_else(|| format!("Unknown scientific function '{}'", s));
            }
        };
        Ok(op)
    }
}

/// Complete calculator state. Transitions never mutate it; each one
/// returns a new value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Exact text to show.
    pub display: String,
    /// Operand being entered or last computed, kept as text so partial
    /// entry like `"3."` survives.
    pub current_value: String,
    /// Left operand of the pending operation.
    pub previous_value: Option<String>,
    pub operation: Option<Operator>,
    /// Memory register, independent of the main calculation.
    #[serde(with = "display_number")]
    pub memory: f64,
    /// Completed calculations, oldest first.
    pub history: Vec<String>,
    pub is_degree_mode: bool,
    pub is_scientific_mode: bool,
    /// Set while in the Error state.
    pub error: Option<String>,
    /// `current_value` is a finished result; the next digit or decimal
    /// point starts a new operand instead of extending it.
    #[serde(default)]
    pub start_new_entry: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::initial()
    }
}

impl CalculatorState {
    /// The state a session starts in, and what `clear` returns to.
    pub fn initial() -> Self {
        Self {
            display: "0".to_string(),
            current_value: "0".to_string(),
            previous_value: None,
            operation: None,
            memory: 0.0,
            history: Vec::new(),
            is_degree_mode: true,
            is_scientific_mode: false,
            error: None,
            start_new_entry: false,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Copy of this state showing `value` as the current operand.
    pub(crate) fn with_value(&self, value: String) -> Self {
        Self {
            display: value.clone(),
            current_value: value,
            ..self.clone()
        }
    }

    /// Copy of this state showing a computed `value`.
    pub(crate) fn with_result(&self, value: String) -> Self {
        Self {
            start_new_entry: true,
            ..self.with_value(value)
        }
    }

    /// Copy of this state in the Error state. Operands are kept.
    pub(crate) fn with_error(&self, error: &CalcError) -> Self {
        Self {
            display: ERROR_DISPLAY.to_string(),
            error: Some(error.to_string()),
            ..self.clone()
        }
    }
}

/// JSON has no infinities; non-finite numbers are stored as display text.
mod display_number {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&format_number(*value))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Number(value) => value,
            Repr::Text(text) => parse_value(&text),
        })
    }
}

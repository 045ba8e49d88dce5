//! Arithmetic and scientific functions used by the calculator engine.
//!
//! Every function is stateless. Functions with a restricted domain return
//! a [`CalcError`] instead of producing `NaN` or a silent coercion.

use super::error::CalcError;
use std::f64::consts;

pub const PI: f64 = consts::PI;
pub const E: f64 = consts::E;

pub fn pi() -> f64 {
    PI
}

pub fn e() -> f64 {
    E
}

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

pub fn divide(a: f64, b: f64) -> Result<f64, CalcError> {
    if b == 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(a / b)
}

pub fn square(a: f64) -> f64 {
    a * a
}

pub fn square_root(a: f64) -> Result<f64, CalcError> {
    if a < 0.0 {
        return Err(CalcError::DomainError(
            "Cannot calculate square root of negative number",
        ));
    }
    Ok(a.sqrt())
}

/// Odd root, defined for negative inputs.
pub fn cube_root(a: f64) -> f64 {
    a.cbrt()
}

pub fn power(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

pub fn exp(a: f64) -> f64 {
    a.exp()
}

pub fn log10(a: f64) -> Result<f64, CalcError> {
    if a <= 0.0 {
        return Err(CalcError::DomainError(
            "Cannot calculate logarithm of non-positive number",
        ));
    }
    Ok(a.log10())
}

pub fn ln(a: f64) -> Result<f64, CalcError> {
    if a <= 0.0 {
        return Err(CalcError::DomainError(
            "Cannot calculate natural logarithm of non-positive number",
        ));
    }
    Ok(a.ln())
}

fn to_radians(angle: f64, is_degrees: bool) -> f64 {
    if is_degrees {
        angle * PI / 180.0
    } else {
        angle
    }
}

fn from_radians(radians: f64, in_degrees: bool) -> f64 {
    if in_degrees {
        radians * 180.0 / PI
    } else {
        radians
    }
}

pub fn sin(angle: f64, is_degrees: bool) -> f64 {
    to_radians(angle, is_degrees).sin()
}

pub fn cos(angle: f64, is_degrees: bool) -> f64 {
    to_radians(angle, is_degrees).cos()
}

/// Tangent of `angle`.
///
/// Only degree-mode singularities (90°, 270°, ...) are detected. In radian
/// mode the result near `π/2` is whatever `f64::tan` returns, typically a
/// very large finite number.
pub fn tan(angle: f64, is_degrees: bool) -> Result<f64, CalcError> {
    if is_degrees && angle.abs() % 180.0 == 90.0 {
        return Err(CalcError::UndefinedResult(
            "Tangent is undefined at this angle",
        ));
    }
    Ok(to_radians(angle, is_degrees).tan())
}

pub fn asin(value: f64, in_degrees: bool) -> Result<f64, CalcError> {
    if !(-1.0..=1.0).contains(&value) {
        return Err(CalcError::DomainError(
            "Inverse sine input must be between -1 and 1",
        ));
    }
    Ok(from_radians(value.asin(), in_degrees))
}

pub fn acos(value: f64, in_degrees: bool) -> Result<f64, CalcError> {
    if !(-1.0..=1.0).contains(&value) {
        return Err(CalcError::DomainError(
            "Inverse cosine input must be between -1 and 1",
        ));
    }
    Ok(from_radians(value.acos(), in_degrees))
}

pub fn atan(value: f64, in_degrees: bool) -> f64 {
    from_radians(value.atan(), in_degrees)
}

/// Iterative factorial over non-negative integers.
///
/// Large inputs overflow to `+Infinity`; the loop stops there.
pub fn factorial(n: f64) -> Result<f64, CalcError> {
    if n < 0.0 || n.fract() != 0.0 {
        return Err(CalcError::DomainError(
            "Factorial is only defined for non-negative integers",
        ));
    }
    if n == 0.0 || n == 1.0 {
        return Ok(1.0);
    }

    let mut result = 1.0_f64;
    let mut i = 2.0_f64;
    while i <= n {
        result *= i;
        if result.is_infinite() {
            break;
        }
        i += 1.0;
    }
    Ok(result)
}

pub fn percentage(value: f64, percent: f64) -> f64 {
    value * percent / 100.0
}

pub fn reciprocal(value: f64) -> Result<f64, CalcError> {
    if value == 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(1.0 / value)
}

pub fn absolute(value: f64) -> f64 {
    value.abs()
}

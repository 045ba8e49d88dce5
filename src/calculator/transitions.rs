//! State transitions.
//!
//! Each transition takes the current state by reference and returns the
//! next one. Failures from the function library are caught here and turn
//! into the Error state; nothing is returned to the caller as `Err`.

use super::error::CalcError;
use super::format::{format_number, parse_value};
use super::functions;
use super::state::{CalculatorState, Operator, ScientificOp};
use tracing::debug;

impl CalculatorState {
    /// Append a digit to the operand being entered.
    ///
    /// After an error or a finished result the digit starts a new operand.
    /// Non-digit characters are ignored.
    pub fn append_digit(&self, digit: char) -> Self {
        if !digit.is_ascii_digit() {
            return self.clone();
        }

        let value = if self.is_error() || self.start_new_entry || self.current_value == "0" {
            digit.to_string()
        } else {
            format!("{}{}", self.current_value, digit)
        };
        Self {
            error: None,
            start_new_entry: false,
            ..self.with_value(value)
        }
    }

    pub fn append_decimal(&self) -> Self {
        if self.is_error() || self.start_new_entry {
            return Self {
                error: None,
                start_new_entry: false,
                ..self.with_value("0.".to_string())
            };
        }

        if self.current_value.contains('.') {
            return self.clone();
        }
        self.with_value(format!("{}.", self.current_value))
    }

    /// Store `op` as the pending operation, evaluating any operation that
    /// is already pending first (left to right, no precedence).
    pub fn set_operation(&self, op: Operator) -> Self {
        if self.is_error() {
            return Self::initial();
        }

        if let (Some(previous), Some(pending)) = (&self.previous_value, self.operation) {
            return match self.evaluate_pending(previous, pending) {
                Ok(next) => Self {
                    previous_value: Some(next.current_value.clone()),
                    operation: Some(op),
                    ..next
                },
                Err(error) => self.fail(&error),
            };
        }

        Self {
            display: self.current_value.clone(),
            previous_value: Some(self.current_value.clone()),
            operation: Some(op),
            current_value: "0".to_string(),
            start_new_entry: false,
            ..self.clone()
        }
    }

    /// Evaluate the pending operation and return to idle.
    pub fn calculate(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }

        let (Some(previous), Some(pending)) = (&self.previous_value, self.operation) else {
            return self.clone();
        };

        match self.evaluate_pending(previous, pending) {
            Ok(next) => Self {
                previous_value: None,
                operation: None,
                ..next
            },
            Err(error) => self.fail(&error),
        }
    }

    /// Reset everything, including memory, history and both mode flags.
    pub fn clear(&self) -> Self {
        Self::initial()
    }

    /// Reset the current operand and leave the error state.
    pub fn clear_entry(&self) -> Self {
        Self {
            error: None,
            start_new_entry: false,
            ..self.with_value("0".to_string())
        }
    }

    /// Toggle a leading `-` on the current value.
    ///
    /// On an empty operand (`"0"`) the sign belongs to the number about to
    /// be typed, so following digits extend `"-0"` instead of replacing it.
    pub fn toggle_sign(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }

        let toggled = match self.current_value.strip_prefix('-') {
            Some(positive) => positive.to_string(),
            None => format!("-{}", self.current_value),
        };
        let is_empty_operand = matches!(self.current_value.as_str(), "0" | "-0");
        Self {
            start_new_entry: self.start_new_entry && !is_empty_operand,
            ..self.with_value(toggled)
        }
    }

    /// Percent of the left operand when one is stored, otherwise the
    /// current value divided by 100. Not recorded in history.
    pub fn percentage(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }

        let current = parse_value(&self.current_value);
        let result = match &self.previous_value {
            Some(previous) => Ok(functions::percentage(parse_value(previous), current)),
            None => functions::divide(current, 100.0),
        };

        match result {
            Ok(value) => self.with_result(format_number(value)),
            Err(error) => self.fail(&error),
        }
    }

    /// Apply a scientific function to the current value and log it.
    pub fn scientific_operation(&self, op: ScientificOp) -> Self {
        if self.is_error() {
            return self.clone();
        }

        let current = parse_value(&self.current_value);
        match op.evaluate(current, self.is_degree_mode) {
            Ok(value) => {
                let result = format_number(value);
                let entry = format!(
                    "{} = {}",
                    op.symbolic_form(current, self.is_degree_mode),
                    result
                );
                self.with_result(result).with_history_entry(entry)
            }
            Err(error) => self.fail(&error),
        }
    }

    pub fn memory_add(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }
        Self {
            memory: self.memory + parse_value(&self.current_value),
            ..self.clone()
        }
    }

    pub fn memory_subtract(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }
        Self {
            memory: self.memory - parse_value(&self.current_value),
            ..self.clone()
        }
    }

    /// Show the memory register. Clears any error.
    pub fn memory_recall(&self) -> Self {
        Self {
            error: None,
            ..self.with_result(format_number(self.memory))
        }
    }

    pub fn memory_clear(&self) -> Self {
        Self {
            memory: 0.0,
            ..self.clone()
        }
    }

    pub fn toggle_degree_mode(&self) -> Self {
        Self {
            is_degree_mode: !self.is_degree_mode,
            ..self.clone()
        }
    }

    pub fn toggle_scientific_mode(&self) -> Self {
        Self {
            is_scientific_mode: !self.is_scientific_mode,
            ..self.clone()
        }
    }

    pub fn clear_history(&self) -> Self {
        Self {
            history: Vec::new(),
            ..self.clone()
        }
    }

    /// Evaluate `previous <op> current`, producing a state that shows the
    /// result and has the calculation appended to history.
    fn evaluate_pending(&self, previous: &str, op: Operator) -> Result<Self, CalcError> {
        let value = op.apply(parse_value(previous), parse_value(&self.current_value))?;
        let result = format_number(value);
        let entry = format!("{} {} {} = {}", previous, op, self.current_value, result);
        Ok(self.with_result(result).with_history_entry(entry))
    }

    fn with_history_entry(mut self, entry: String) -> Self {
        self.history.push(entry);
        self
    }

    fn fail(&self, error: &CalcError) -> Self {
        debug!(%error, current = %self.current_value, "calculation failed");
        self.with_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn enter(state: &CalculatorState, digits: &str) -> CalculatorState {
        digits.chars().fold(state.clone(), |acc, c| match c {
            '.' => acc.append_decimal(),
            _ => acc.append_digit(c),
        })
    }

    fn start(digits: &str) -> CalculatorState {
        enter(&CalculatorState::initial(), digits)
    }

    fn value_of(state: &CalculatorState) -> f64 {
        parse_value(&state.current_value)
    }

    #[test]
    fn test_digit_entry_replaces_leading_zero() {
        let state = start("0");
        assert_eq!(state.current_value, "0");
        let state = enter(&state, "12");
        assert_eq!(state.current_value, "12");
        assert_eq!(state.display, "12");
    }

    #[test]
    fn test_non_digit_is_ignored() {
        let state = start("7");
        assert_eq!(state.append_digit('x'), state);
    }

    #[test]
    fn test_single_decimal_point() {
        let state = CalculatorState::initial().append_decimal();
        assert_eq!(state.current_value, "0.");
        let state = enter(&state, "5.2");
        assert_eq!(state.current_value, "0.52");
    }

    #[test]
    fn test_chained_operators_evaluate_left_to_right() {
        let state = start("1")
            .set_operation(Operator::Add)
            .append_digit('2')
            .set_operation(Operator::Multiply);
        assert_eq!(state.display, "3");
        assert_eq!(state.previous_value.as_deref(), Some("3"));
        assert_eq!(state.operation, Some(Operator::Multiply));

        let state = state.append_digit('3').calculate();
        assert_eq!(state.display, "9");
        assert_eq!(state.previous_value, None);
        assert_eq!(state.operation, None);
        assert_eq!(state.history, vec!["1 + 2 = 3", "3 * 3 = 9"]);
    }

    #[test]
    fn test_digit_after_result_starts_new_operand() {
        let state = start("2")
            .set_operation(Operator::Add)
            .append_digit('3')
            .calculate();
        assert!(state.start_new_entry);
        assert_eq!(state.append_digit('4').current_value, "4");
        assert_eq!(state.append_decimal().current_value, "0.");
    }

    #[test]
    fn test_equals_after_chain_reuses_result() {
        let state = start("1")
            .set_operation(Operator::Add)
            .append_digit('2')
            .set_operation(Operator::Multiply)
            .calculate();
        assert_eq!(state.display, "9");
    }

    #[test]
    fn test_set_operation_stores_left_operand() {
        let state = start("42").set_operation(Operator::Subtract);
        assert_eq!(state.previous_value.as_deref(), Some("42"));
        assert_eq!(state.current_value, "0");
        assert_eq!(state.display, "42");
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_pending_operation_invariant() {
        let states = [
            CalculatorState::initial(),
            start("5").set_operation(Operator::Add),
            start("5").set_operation(Operator::Add).append_digit('1').calculate(),
            start("5").set_operation(Operator::Divide).calculate(),
        ];
        for state in states {
            assert_eq!(state.previous_value.is_some(), state.operation.is_some());
        }
    }

    #[test]
    fn test_calculate_without_pending_operation_is_noop() {
        let state = start("8");
        assert_eq!(state.calculate(), state);
    }

    #[test]
    fn test_power_operator() {
        let state = start("2")
            .set_operation(Operator::Power)
            .append_digit('1')
            .append_digit('0')
            .calculate();
        assert_eq!(state.display, "1024");
        assert_eq!(state.history, vec!["2 ^ 10 = 1024"]);
    }

    #[test]
    fn test_division_by_zero_enters_error_state() {
        let state = start("7").set_operation(Operator::Divide).calculate();
        assert_eq!(state.display, "Error");
        assert_eq!(state.error.as_deref(), Some("Division by zero"));
        // operands survive until the next input
        assert_eq!(state.previous_value.as_deref(), Some("7"));
        assert_eq!(state.operation, Some(Operator::Divide));
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_digit_recovers_from_error() {
        let state = start("7")
            .set_operation(Operator::Divide)
            .calculate()
            .append_digit('5');
        assert_eq!(state.current_value, "5");
        assert_eq!(state.display, "5");
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_decimal_recovers_from_error() {
        let state = start("7")
            .set_operation(Operator::Divide)
            .calculate()
            .append_decimal();
        assert_eq!(state.current_value, "0.");
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_operator_in_error_resets_everything() {
        let errored = start("7")
            .memory_add()
            .set_operation(Operator::Divide)
            .calculate();
        let state = errored.set_operation(Operator::Add);
        assert_eq!(state, CalculatorState::initial());
    }

    #[test]
    fn test_calculate_in_error_is_noop() {
        let errored = start("7").set_operation(Operator::Divide).calculate();
        assert_eq!(errored.calculate(), errored);
    }

    #[test]
    fn test_chained_division_by_zero() {
        let state = start("4")
            .set_operation(Operator::Divide)
            .append_digit('0')
            .set_operation(Operator::Add);
        assert!(state.is_error());
        assert_eq!(state.display, "Error");
    }

    #[test]
    fn test_clear_resets_memory_and_modes() {
        let state = start("9")
            .memory_add()
            .toggle_degree_mode()
            .toggle_scientific_mode()
            .scientific_operation(ScientificOp::Square)
            .clear();
        assert_eq!(state, CalculatorState::initial());
    }

    #[test]
    fn test_clear_entry_keeps_pending_operation() {
        let state = start("12")
            .set_operation(Operator::Multiply)
            .append_digit('4')
            .clear_entry();
        assert_eq!(state.current_value, "0");
        assert_eq!(state.previous_value.as_deref(), Some("12"));
        assert_eq!(state.operation, Some(Operator::Multiply));
    }

    #[test]
    fn test_clear_entry_clears_error() {
        let state = start("1")
            .set_operation(Operator::Divide)
            .calculate()
            .clear_entry();
        assert_eq!(state.error, None);
        assert_eq!(state.display, "0");
        assert_eq!(state.previous_value.as_deref(), Some("1"));
    }

    #[test]
    fn test_toggle_sign() {
        let state = start("3.5").toggle_sign();
        assert_eq!(state.current_value, "-3.5");
        assert_eq!(state.toggle_sign().current_value, "3.5");
    }

    #[test]
    fn test_negative_second_operand() {
        let state = start("5")
            .set_operation(Operator::Multiply)
            .toggle_sign()
            .append_digit('3');
        assert_eq!(state.current_value, "-03");
        let state = state.calculate();
        assert_eq!(state.display, "-15");
        assert_eq!(state.history, vec!["5 * -03 = -15"]);
    }

    #[test]
    fn test_negative_decimal_second_operand() {
        let state = start("5")
            .set_operation(Operator::Add)
            .toggle_sign()
            .append_decimal()
            .append_digit('5');
        assert_eq!(state.current_value, "-0.5");
        assert_eq!(state.calculate().display, "4.5");
    }

    #[test]
    fn test_sign_after_chained_operator() {
        let state = start("2")
            .set_operation(Operator::Add)
            .append_digit('3')
            .set_operation(Operator::Subtract)
            .clear_entry()
            .toggle_sign()
            .append_digit('4');
        assert_eq!(state.current_value, "-04");
        assert_eq!(state.calculate().display, "9");
    }

    #[test]
    fn test_sign_of_result_then_new_digit() {
        let result = start("2")
            .set_operation(Operator::Add)
            .append_digit('3')
            .calculate()
            .toggle_sign();
        assert_eq!(result.display, "-5");
        assert!(result.start_new_entry);
        // the negated result is replaced by the next operand
        let state = result.append_digit('7');
        assert_eq!(state.current_value, "7");
        // but can still be used as a left operand
        let state = result
            .set_operation(Operator::Multiply)
            .append_digit('2')
            .calculate();
        assert_eq!(state.display, "-10");
    }

    #[test]
    fn test_sign_after_result_and_digit() {
        let state = start("2")
            .set_operation(Operator::Add)
            .append_digit('3')
            .calculate()
            .append_digit('8')
            .toggle_sign()
            .append_digit('1');
        assert_eq!(state.current_value, "-81");
    }

    #[test]
    fn test_percentage_without_operand() {
        let state = start("50").percentage();
        assert_eq!(state.display, "0.5");
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_percentage_of_left_operand() {
        let state = start("200")
            .set_operation(Operator::Add)
            .append_digit('1')
            .append_digit('0')
            .percentage();
        assert_eq!(state.current_value, "20");
        assert_eq!(state.previous_value.as_deref(), Some("200"));
        assert_eq!(state.operation, Some(Operator::Add));
        assert_eq!(state.calculate().display, "220");
    }

    #[test]
    fn test_history_order() {
        let state = start("2")
            .set_operation(Operator::Add)
            .append_digit('3')
            .calculate()
            .append_digit('4')
            .scientific_operation(ScientificOp::Sqrt);
        assert_eq!(state.history, vec!["2 + 3 = 5", "√(4) = 2"]);
    }

    #[test]
    fn test_sine_follows_angle_mode() {
        let degrees = start("90").scientific_operation(ScientificOp::Sin);
        assert!((value_of(&degrees) - 1.0).abs() < TOLERANCE);

        let radians = start("90")
            .toggle_degree_mode()
            .scientific_operation(ScientificOp::Sin);
        assert!((value_of(&radians) - 0.894).abs() < 1e-3);
        assert_eq!(radians.history, vec!["sin(90 rad) = 0.8939966636"]);
    }

    #[test]
    fn test_scientific_failure_enters_error_state() {
        let state = start("2")
            .toggle_sign()
            .scientific_operation(ScientificOp::Sqrt);
        assert_eq!(state.display, "Error");
        assert_eq!(
            state.error.as_deref(),
            Some("Cannot calculate square root of negative number")
        );
        assert!(state.history.is_empty());

        let tan = start("90").scientific_operation(ScientificOp::Tan);
        assert!(tan.is_error());
    }

    #[test]
    fn test_factorial_domain() {
        assert!(
            start("2.5")
                .scientific_operation(ScientificOp::Factorial)
                .is_error()
        );
        let state = start("0").scientific_operation(ScientificOp::Factorial);
        assert_eq!(state.display, "1");
    }

    #[test]
    fn test_constants_ignore_input() {
        let state = start("123").scientific_operation(ScientificOp::Pi);
        assert_eq!(state.display, "3.1415926536");
        assert_eq!(state.history, vec!["π = 3.1415926536"]);
    }

    #[test]
    fn test_scientific_is_noop_in_error() {
        let errored = start("1").set_operation(Operator::Divide).calculate();
        assert_eq!(errored.scientific_operation(ScientificOp::Pi), errored);
        assert_eq!(errored.toggle_sign(), errored);
        assert_eq!(errored.percentage(), errored);
        assert_eq!(errored.memory_add(), errored);
    }

    #[test]
    fn test_memory_register() {
        let state = start("5").memory_add().memory_add();
        assert_eq!(state.memory, 10.0);
        assert_eq!(state.display, "5");

        let state = state.clear_entry().append_digit('3').memory_subtract();
        assert_eq!(state.memory, 7.0);

        let state = state.clear_entry().memory_recall();
        assert_eq!(state.display, "7");
        assert_eq!(state.current_value, "7");
    }

    #[test]
    fn test_memory_recall_clears_error() {
        let state = start("4")
            .memory_add()
            .set_operation(Operator::Divide)
            .calculate()
            .memory_recall();
        assert_eq!(state.error, None);
        assert_eq!(state.display, "4");
    }

    #[test]
    fn test_memory_clear_is_idempotent() {
        let state = start("5").memory_add().memory_clear().memory_clear();
        assert_eq!(state.memory, 0.0);
    }

    #[test]
    fn test_clear_history_is_idempotent() {
        let state = start("4")
            .scientific_operation(ScientificOp::Sqrt)
            .clear_history()
            .clear_history();
        assert!(state.history.is_empty());
        assert_eq!(state.display, "2");
    }

    #[test]
    fn test_mode_toggles_keep_values() {
        let errored = start("1").set_operation(Operator::Divide).calculate();
        let toggled = errored.toggle_degree_mode().toggle_scientific_mode();
        assert!(!toggled.is_degree_mode);
        assert!(toggled.is_scientific_mode);
        assert_eq!(toggled.error, errored.error);
        assert_eq!(toggled.display, errored.display);
    }
}

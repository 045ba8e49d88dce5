//! What a front end shows for a calculator state.

use crate::calculator::CalculatorState;
use crate::keys::{Key, keypad};

/// The calculator display derived from a state.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayView {
    /// Pending operation, e.g. `"12 +"`. Empty when idle.
    pub expression: String,
    /// The main display text.
    pub display: String,
    /// Error message while in the Error state.
    pub error: Option<String>,
    /// Mode and memory indicators (`DEG`/`RAD`, `SCI`, `M`).
    pub indicators: Vec<&'static str>,
}

impl DisplayView {
    /// Create a view from a calculator state.
    pub fn from_state(state: &CalculatorState) -> Self {
        let expression = match (&state.previous_value, state.operation) {
            (Some(previous), Some(op)) => format!("{} {}", previous, op),
            _ => String::new(),
        };

        let mut indicators = vec![if state.is_degree_mode { "DEG" } else { "RAD" }];
        if state.is_scientific_mode {
            indicators.push("SCI");
        }
        if state.memory != 0.0 {
            indicators.push("M");
        }

        Self {
            expression,
            display: state.display.clone(),
            error: state.error.clone(),
            indicators,
        }
    }

    /// Check if this view shows an error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Render as terminal text: a status line, then the result with a
    /// `"= "` prefix (or the error message).
    pub fn render(&self) -> String {
        let status = format!("[{}]", self.indicators.join(" "));
        let header = if self.expression.is_empty() {
            status
        } else {
            format!("{} {}", status, self.expression)
        };

        match &self.error {
            Some(message) => format!("{}\n= {} ({})", header, self.display, message),
            None => format!("{}\n= {}", header, self.display),
        }
    }
}

/// Render the history log, one numbered line per entry.
pub fn render_history(history: &[String]) -> String {
    if history.is_empty() {
        return "No calculation history yet.".to_string();
    }

    history
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{:>3}. {}", i + 1, entry))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the keys available in the current mode, one section per line.
/// Scientific keys are only listed in scientific mode.
pub fn render_keypad(state: &CalculatorState) -> String {
    let mut sections: Vec<(&'static str, Vec<String>)> = Vec::new();
    for key in keypad()
        .into_iter()
        .filter(|key: &Key| state.is_scientific_mode || !key.is_scientific())
    {
        let name = key.section_name();
        match sections.last_mut() {
            Some((section, labels)) if *section == name => labels.push(key.label()),
            _ => sections.push((name, vec![key.label()])),
        }
    }

    sections
        .iter()
        .map(|(name, labels)| format!("{:<10} {}", format!("{}:", name), labels.join(" ")))
        .collect::<Vec<_>>()
        .join("\n")
}

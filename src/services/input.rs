use thiserror::Error;

use crate::models::{Answer, InputType, NumericBounds};

/// Reasons typed input is refused; the message is shown inline in the dialog
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please enter a value.")]
    Empty,

    #[error("Please enter a valid integer.")]
    NotAnInteger,

    #[error("Please enter a valid number.")]
    NotANumber,

    #[error("Value must be at least {0}.")]
    BelowMinimum(f64),

    #[error("Value must be at most {0}.")]
    AboveMaximum(f64),
}

/// Turn the raw text of a single-line input dialog into an [`Answer`].
///
/// Text input is returned trimmed and is never rejected. Numeric input must
/// parse as `i64`/finite `f64` and fall inside `bounds` (inclusive).
pub fn parse_input(
    raw: &str,
    input_type: InputType,
    bounds: NumericBounds,
) -> Result<Answer, ValidationError> {
    let value = raw.trim();

    match input_type {
        InputType::Text => Ok(Answer::Text(value.to_string())),
        InputType::Integer => {
            if value.is_empty() {
                return Err(ValidationError::Empty);
            }
            let parsed: i64 = value.parse().map_err(|_| ValidationError::NotAnInteger)?;
            check_integer_bounds(parsed, bounds)?;
            Ok(Answer::Integer(parsed))
        }
        InputType::Float => {
            if value.is_empty() {
                return Err(ValidationError::Empty);
            }
            let parsed: f64 = value.parse().map_err(|_| ValidationError::NotANumber)?;
            if !parsed.is_finite() {
                return Err(ValidationError::NotANumber);
            }
            check_bounds(parsed, bounds)?;
            Ok(Answer::Float(parsed))
        }
    }
}

// Compared as i64 so values past 2^53 are not rounded onto the bound.
// Saturating casts cover bounds outside the i64 range.
fn check_integer_bounds(value: i64, bounds: NumericBounds) -> Result<(), ValidationError> {
    const I64_END: f64 = 9_223_372_036_854_775_808.0;

    if let Some(min) = bounds.min {
        let lowest = min.ceil();
        if lowest >= I64_END || value < lowest as i64 {
            return Err(ValidationError::BelowMinimum(min));
        }
    }
    if let Some(max) = bounds.max {
        let highest = max.floor();
        if highest < -I64_END || value > highest as i64 {
            return Err(ValidationError::AboveMaximum(max));
        }
    }
    Ok(())
}

fn check_bounds(value: f64, bounds: NumericBounds) -> Result<(), ValidationError> {
    if let Some(min) = bounds.min {
        if value < min {
            return Err(ValidationError::BelowMinimum(min));
        }
    }
    if let Some(max) = bounds.max {
        if value > max {
            return Err(ValidationError::AboveMaximum(max));
        }
    }
    Ok(())
}

/// Hint shown under the prompt of a numeric input dialog; empty for text
pub fn input_hint(input_type: InputType, bounds: NumericBounds) -> String {
    let noun = match input_type {
        InputType::Text => return String::new(),
        InputType::Integer => "Enter a whole number",
        InputType::Float => "Enter a number",
    };

    match (bounds.min, bounds.max) {
        (Some(min), Some(max)) => format!("{noun} between {min} and {max}"),
        (Some(min), None) => format!("{noun} of at least {min}"),
        (None, Some(max)) => format!("{noun} of at most {max}"),
        (None, None) => noun.to_string(),
    }
}

/// Counts shown under the multi-line editor and reported with its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    pub characters: usize,
    pub lines: usize,
    pub words: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            characters: text.chars().count(),
            lines: text.split('\n').count(),
            words: text.split_whitespace().count(),
        }
    }

    /// Live counter label, e.g. "12 characters, 2 lines"
    pub fn summary(&self) -> String {
        format!("{} characters, {} lines", self.characters, self.lines)
    }
}

/// Line appended to a multi-line answer when the human attaches files
pub fn attachment_note(paths: &[String]) -> String {
    format!("\n\n[Attached Files: {}]", paths.join(", "))
}

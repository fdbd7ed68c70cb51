//! Field-level validation shared by every form-backed entity.

use crate::error::CoreError;

/// Reject a required text field that is empty or whitespace only.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Validate that `value` is one of `allowed`.
pub fn validate_choice(field: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

/// Stored enumerated value as shown on an edit form.
///
/// Unknown stored values fall back to the first allowed value.
pub fn choice_or_first(value: &str, allowed: &[&'static str]) -> &'static str {
    allowed
        .iter()
        .copied()
        .find(|a| *a == value)
        .or_else(|| allowed.first().copied())
        .unwrap_or("")
}

/// Stored enumerated value as shown on an edit form, with an explicit
/// fallback for values outside `allowed`.
pub fn choice_or(value: &str, allowed: &[&'static str], fallback: &'static str) -> &'static str {
    allowed
        .iter()
        .copied()
        .find(|a| *a == value)
        .unwrap_or(fallback)
}

/// Parse a stored boolean flag. Accepts the spellings spreadsheet tools write.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: &[&str] = &["red", "green"];

    #[test]
    fn empty_and_blank_values_are_rejected() {
        assert!(require_non_empty("title", "").is_err());
        assert!(require_non_empty("title", "   ").is_err());
        assert!(require_non_empty("title", "Intro").is_ok());
    }

    #[test]
    fn choices_are_checked() {
        assert!(validate_choice("color", "green", COLORS).is_ok());
        let err = validate_choice("color", "blue", COLORS).unwrap_err();
        assert!(err.to_string().contains("red, green"));
    }

    #[test]
    fn unknown_choice_falls_back_to_first() {
        assert_eq!(choice_or_first("green", COLORS), "green");
        assert_eq!(choice_or_first("mauve", COLORS), "red");
    }

    #[test]
    fn choice_or_uses_the_given_fallback() {
        assert_eq!(choice_or("red", COLORS, "green"), "red");
        assert_eq!(choice_or("mauve", COLORS, "green"), "green");
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert!(parse_flag("True"));
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("False"));
        assert!(!parse_flag(""));
    }
}

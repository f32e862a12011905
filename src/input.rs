//! Form input parsing and validation.
//!
//! Raw form fields arrive as optional strings; `UsageInput::parse` turns them
//! into a validated value or a `ValidationError` whose display text is the
//! user-facing message.

use thiserror::Error;

/// Why a submission was rejected. The messages are shown verbatim on the
/// form page, so they stay short and non-technical.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid number for monthly usage")]
    InvalidNumber,
    #[error("Please provide valid inputs")]
    MissingUserType,
    #[error("Please provide valid inputs")]
    NegativeUsage,
}

/// A validated calculation request.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageInput {
    /// Free-form consumer category label, never empty.
    pub user_type: String,
    /// Monthly electricity usage in kWh, finite and non-negative.
    pub monthly_usage_kwh: f64,
}

impl UsageInput {
    /// Validates raw form fields.
    ///
    /// The usage number is checked first: a missing or malformed value wins
    /// over a missing user type, matching how users encounter the fields.
    pub fn parse(
        user_type: Option<&str>,
        monthly_usage: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let monthly_usage_kwh = monthly_usage
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or(ValidationError::InvalidNumber)?
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidNumber)?;
        if !monthly_usage_kwh.is_finite() {
            return Err(ValidationError::InvalidNumber);
        }

        let user_type = user_type.map(str::trim).unwrap_or_default();
        if user_type.is_empty() {
            return Err(ValidationError::MissingUserType);
        }

        if monthly_usage_kwh < 0.0 {
            return Err(ValidationError::NegativeUsage);
        }

        Ok(Self {
            user_type: user_type.to_string(),
            monthly_usage_kwh,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_input() {
        let input = UsageInput::parse(Some("Household"), Some("300")).unwrap();
        assert_eq!(input.user_type, "Household");
        assert_eq!(input.monthly_usage_kwh, 300.0);
    }

    #[test]
    fn test_trims_whitespace() {
        let input = UsageInput::parse(Some("  Commercial "), Some(" 150.5 ")).unwrap();
        assert_eq!(input.user_type, "Commercial");
        assert_eq!(input.monthly_usage_kwh, 150.5);
    }

    #[test]
    fn test_accepts_zero_usage() {
        let input = UsageInput::parse(Some("Household"), Some("0")).unwrap();
        assert_eq!(input.monthly_usage_kwh, 0.0);
    }

    #[test]
    fn test_rejects_missing_usage() {
        assert_eq!(
            UsageInput::parse(Some("Household"), None),
            Err(ValidationError::InvalidNumber)
        );
        assert_eq!(
            UsageInput::parse(Some("Household"), Some("   ")),
            Err(ValidationError::InvalidNumber)
        );
    }

    #[test]
    fn test_rejects_non_numeric_usage() {
        assert_eq!(
            UsageInput::parse(Some("Household"), Some("abc")),
            Err(ValidationError::InvalidNumber)
        );
        assert_eq!(
            UsageInput::parse(Some("Household"), Some("12kwh")),
            Err(ValidationError::InvalidNumber)
        );
    }

    #[test]
    fn test_rejects_non_finite_usage() {
        assert_eq!(
            UsageInput::parse(Some("Household"), Some("NaN")),
            Err(ValidationError::InvalidNumber)
        );
        assert_eq!(
            UsageInput::parse(Some("Household"), Some("inf")),
            Err(ValidationError::InvalidNumber)
        );
    }

    #[test]
    fn test_rejects_missing_user_type() {
        assert_eq!(
            UsageInput::parse(None, Some("300")),
            Err(ValidationError::MissingUserType)
        );
        assert_eq!(
            UsageInput::parse(Some(""), Some("300")),
            Err(ValidationError::MissingUserType)
        );
    }

    #[test]
    fn test_rejects_negative_usage() {
        assert_eq!(
            UsageInput::parse(Some("Household"), Some("-5")),
            Err(ValidationError::NegativeUsage)
        );
    }

    #[test]
    fn test_number_error_wins_over_missing_user_type() {
        assert_eq!(
            UsageInput::parse(None, Some("abc")),
            Err(ValidationError::InvalidNumber)
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::InvalidNumber.to_string(),
            "Please enter a valid number for monthly usage"
        );
        assert_eq!(
            ValidationError::MissingUserType.to_string(),
            "Please provide valid inputs"
        );
        assert_eq!(
            ValidationError::NegativeUsage.to_string(),
            "Please provide valid inputs"
        );
    }
}

//! Contact-form validation
//!
//! Presence checks only; submission produces a feedback value for the
//! page to display. No network transport is involved.

use thiserror::Error;

/// Validation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// A contact-form submission
#[derive(Clone, Debug, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Outcome shown to the visitor
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    Success,
    Error(String),
}

impl ContactForm {
    /// Check that every required field is present
    pub fn validate(&self) -> Result<(), FormError> {
        for (value, field) in [
            (&self.name, "name"),
            (&self.email, "email"),
            (&self.message, "message"),
        ] {
            if value.trim().is_empty() {
                return Err(FormError::MissingField(field));
            }
        }
        Ok(())
    }

    /// Validate and produce user-facing feedback
    pub fn submit(&self) -> Feedback {
        match self.validate() {
            Ok(()) => Feedback::Success,
            Err(error) => {
                tracing::debug!(%error, "form submission rejected");
                Feedback::Error(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello".into(),
        }
    }

    #[test]
    fn test_complete_form_succeeds() {
        assert_eq!(filled().submit(), Feedback::Success);
    }

    #[test]
    fn test_missing_fields_are_reported_in_order() {
        let mut form = filled();
        form.name.clear();
        assert_eq!(form.validate(), Err(FormError::MissingField("name")));

        let mut form = filled();
        form.email = "   ".into();
        assert_eq!(form.validate(), Err(FormError::MissingField("email")));

        let mut form = filled();
        form.message.clear();
        assert_eq!(form.validate(), Err(FormError::MissingField("message")));
    }

    #[test]
    fn test_feedback_carries_field_name() {
        let mut form = filled();
        form.email.clear();
        match form.submit() {
            Feedback::Error(text) => assert!(text.contains("email")),
            Feedback::Success => panic!("expected an error"),
        }
    }
}

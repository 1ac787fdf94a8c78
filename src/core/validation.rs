use crate::core::ElementId;
use crate::core::field::{FieldKind, FieldSpec};
use crate::core::form::FormSpec;
use crate::core::value::FieldValues;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// `local@domain.tld` with a top-level part of at least two characters.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("required value is missing")]
    MissingRequired,
    #[error("value has an invalid format")]
    InvalidFormat,
    #[error("value is not one of the listed options")]
    InvalidOption,
    #[error("value is longer than {max} characters")]
    TooLong { max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub field: ElementId,
    pub error: FieldError,
}

impl FieldFailure {
    pub fn new(field: impl Into<ElementId>, error: FieldError) -> Self {
        Self {
            field: field.into(),
            error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// Trimmed values for every declared field, in declaration order.
    Valid(FieldValues),
    /// Every failure, in declaration order.
    Invalid(Vec<FieldFailure>),
}

impl SubmissionResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn first_failure(&self) -> Option<&FieldFailure> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(failures) => failures.first(),
        }
    }
}

/// Check a single (already trimmed) value against its field description.
pub fn validate(field: &FieldSpec, value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return if field.required {
            Err(FieldError::MissingRequired)
        } else {
            Ok(())
        };
    }

    if field.kind == FieldKind::Email && !is_valid_email(value) {
        return Err(FieldError::InvalidFormat);
    }

    if field.kind.is_choice()
        && !field.options.is_empty()
        && !field.options.iter().any(|option| option == value)
    {
        return Err(FieldError::InvalidOption);
    }

    if let Some(max) = field.max_length
        && value.chars().count() > max
    {
        return Err(FieldError::TooLong { max });
    }

    Ok(())
}

/// Trim every value and validate all fields in declaration order. Every
/// check runs; the caller reports the first failure.
pub fn validate_form(spec: &FormSpec, raw: &FieldValues) -> SubmissionResult {
    let trimmed = raw.trimmed();
    let mut values = FieldValues::new();
    let mut failures = Vec::new();

    for field in &spec.fields {
        let value = trimmed.text(field.id.as_str());
        if let Err(error) = validate(field, value) {
            failures.push(FieldFailure::new(&field.id, error));
        }
        values.insert(&field.id, value);
    }

    if failures.is_empty() {
        SubmissionResult::Valid(values)
    } else {
        SubmissionResult::Invalid(failures)
    }
}

/// Live styling applied when focus leaves a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldFeedback {
    #[default]
    Neutral,
    Valid,
    Invalid,
}

pub fn feedback(field: &FieldSpec, value: &str) -> FieldFeedback {
    let value = value.trim();
    if value.is_empty() {
        return if field.required {
            FieldFeedback::Invalid
        } else {
            FieldFeedback::Neutral
        };
    }
    match validate(field, value) {
        Ok(()) => FieldFeedback::Valid,
        Err(_) => FieldFeedback::Invalid,
    }
}

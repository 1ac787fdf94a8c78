use crate::core::ElementId;
use crate::core::value::FieldValues;
use std::fmt;
use std::time::SystemTime;
use thiserror::Error;

/// Submission lifecycle of one form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

impl SubmissionState {
    /// Success and Error keep their message on screen until cleared.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Validated values handed to a submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub form_id: ElementId,
    /// Per-form counter; completions for older sequences are ignored.
    pub sequence: u64,
    pub values: FieldValues,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub received_at: SystemTime,
    /// Identifier assigned by the backend, if it assigns one.
    pub reference: Option<String>,
}

impl Ack {
    pub fn now() -> Self {
        Self::at(SystemTime::now())
    }

    pub fn at(received_at: SystemTime) -> Self {
        Self {
            received_at,
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("submission failed: {0}")]
    SubmitFailed(String),
}

impl SubmitError {
    pub fn reason(&self) -> &str {
        match self {
            Self::SubmitFailed(reason) => reason.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionCompletion {
    pub form_id: ElementId,
    pub sequence: u64,
    pub outcome: Result<Ack, SubmitError>,
}

impl SubmissionCompletion {
    pub fn new(request: &SubmissionRequest, outcome: Result<Ack, SubmitError>) -> Self {
        Self {
            form_id: request.form_id.clone(),
            sequence: request.sequence,
            outcome,
        }
    }
}

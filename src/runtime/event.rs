use crate::core::ElementId;
use crate::core::submission::SubmissionCompletion;

/// Events delivered to a loaded page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Loaded,
    /// The user changed a field's value.
    Input { target: ElementId, value: String },
    /// Focus left a field.
    Blur { target: ElementId },
    Submit { form: ElementId },
    AnchorActivated { href: String },
    /// The success message auto-hide timer fired.
    MessageExpired { form: ElementId },
    SubmissionCompleted(SubmissionCompletion),
}

use crate::core::ElementId;
use crate::core::submission::SubmissionRequest;
use crate::runtime::scheduler::SchedulerCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTone {
    Pending,
    Success,
    Error,
}

/// Changes a controller asks the page runtime to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ShowMessage {
        target: ElementId,
        text: String,
        tone: MessageTone,
    },
    HideMessage {
        target: ElementId,
    },
    FocusField {
        target: ElementId,
    },
    DisableSubmit {
        button: ElementId,
        label: String,
    },
    RestoreSubmit {
        button: ElementId,
        label: String,
    },
    ResetForm {
        form: ElementId,
    },
    ScrollIntoView {
        target: ElementId,
    },
    Submit(SubmissionRequest),
    Schedule(SchedulerCommand),
}

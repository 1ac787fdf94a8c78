use crate::core::ElementId;
use crate::core::effect::{Effect, MessageTone};
use crate::core::form::FormSpec;
use crate::core::submission::{Ack, SubmissionCompletion, SubmissionRequest, SubmissionState, SubmitError};
use crate::core::ticket::{self, TicketRecord};
use crate::core::validation::{self, FieldFailure, SubmissionResult};
use crate::core::value::FieldValues;
use crate::dom::Document;
use crate::runtime::event::PageEvent;
use crate::runtime::scheduler::SchedulerCommand;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("element `{element}` of form `{form}` not found")]
    ElementNotFound { form: ElementId, element: ElementId },
}

/// How long a success message stays visible.
pub const SUCCESS_MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Validation and submission state for one form on the page.
///
/// The controller never touches the document itself; every handler returns the
/// effects the page runtime should apply.
#[derive(Debug)]
pub struct FormSubmissionController {
    spec: FormSpec,
    state: SubmissionState,
    sequence: u64,
    in_flight: Option<FieldValues>,
}

impl FormSubmissionController {
    /// Bind to `spec` if its form element exists in `document`.
    pub fn bind(spec: FormSpec, document: &Document) -> Result<Self, ControllerError> {
        if !document.contains(spec.id.as_str()) {
            return Err(ControllerError::ElementNotFound {
                form: spec.id.clone(),
                element: spec.id,
            });
        }
        if !document.contains(spec.message_target.as_str()) {
            let missing = ControllerError::ElementNotFound {
                form: spec.id.clone(),
                element: spec.message_target.clone(),
            };
            warn!(error = %missing, "status messages will not be shown");
        }
        for field in &spec.fields {
            if !document.contains(field.id.as_str()) {
                debug!(form = %spec.id, field = %field.id, "field element not found; it submits empty");
            }
        }
        debug!(form = %spec.id, fields = spec.fields.len(), "form controller attached");
        Ok(Self::new(spec))
    }

    /// Like [`bind`](Self::bind), logging and skipping forms that are not on the page.
    pub fn attach(spec: FormSpec, document: &Document) -> Option<Self> {
        match Self::bind(spec, document) {
            Ok(controller) => Some(controller),
            Err(err) => {
                warn!(error = %err, "controller not attached");
                None
            }
        }
    }

    pub fn new(spec: FormSpec) -> Self {
        Self {
            spec,
            state: SubmissionState::Idle,
            sequence: 0,
            in_flight: None,
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.spec.id
    }

    pub fn spec(&self) -> &FormSpec {
        &self.spec
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn owns(&self, field: &str) -> bool {
        self.spec.field(field).is_some()
    }

    fn timer_key(&self) -> String {
        format!("message:{}", self.spec.id)
    }

    fn cancel_timer(&self) -> Effect {
        Effect::Schedule(SchedulerCommand::Cancel {
            key: self.timer_key(),
        })
    }

    fn show(&self, text: String, tone: MessageTone) -> Effect {
        Effect::ShowMessage {
            target: self.spec.message_target.clone(),
            text,
            tone,
        }
    }

    fn restore_submit(&self) -> Effect {
        Effect::RestoreSubmit {
            button: self.spec.submit_button_id(),
            label: self.spec.submit_label.clone(),
        }
    }

    pub fn on_submit(&mut self, raw: &FieldValues) -> Vec<Effect> {
        if self.state == SubmissionState::Pending {
            debug!(form = %self.spec.id, "submit ignored while a submission is pending");
            return Vec::new();
        }

        match validation::validate_form(&self.spec, raw) {
            SubmissionResult::Invalid(failures) => self.reject(&failures),
            SubmissionResult::Valid(values) => self.begin_submission(values),
        }
    }

    fn reject(&mut self, failures: &[FieldFailure]) -> Vec<Effect> {
        let Some(first) = failures.first() else {
            return Vec::new();
        };
        info!(
            form = %self.spec.id,
            field = %first.field,
            reason = %first.error,
            failures = failures.len(),
            "submission rejected"
        );

        self.state = SubmissionState::Error;
        vec![
            self.cancel_timer(),
            self.show(self.spec.failure_message(first), MessageTone::Error),
            Effect::FocusField {
                target: first.field.clone(),
            },
        ]
    }

    fn begin_submission(&mut self, values: FieldValues) -> Vec<Effect> {
        self.sequence += 1;
        self.state = SubmissionState::Pending;
        self.in_flight = Some(values.clone());
        info!(form = %self.spec.id, sequence = self.sequence, "submission started");

        vec![
            self.cancel_timer(),
            Effect::DisableSubmit {
                button: self.spec.submit_button_id(),
                label: self.spec.messages.pending_label.clone(),
            },
            self.show(self.spec.messages.pending.clone(), MessageTone::Pending),
            Effect::Submit(SubmissionRequest {
                form_id: self.spec.id.clone(),
                sequence: self.sequence,
                values,
            }),
        ]
    }

    pub fn on_submission_complete(&mut self, completion: SubmissionCompletion) -> Vec<Effect> {
        if self.state != SubmissionState::Pending || completion.sequence != self.sequence {
            debug!(
                form = %self.spec.id,
                sequence = completion.sequence,
                current = self.sequence,
                "ignoring stale submission completion"
            );
            return Vec::new();
        }

        let values = self.in_flight.take().unwrap_or_default();
        match completion.outcome {
            Ok(ack) => self.accept(values, ack),
            Err(error) => self.fail(&error),
        }
    }

    fn accept(&mut self, values: FieldValues, ack: Ack) -> Vec<Effect> {
        let ticket = self.spec.ticket_prefix.as_deref().map(|prefix| {
            ack.reference
                .clone()
                .unwrap_or_else(|| ticket::ticket_number_at(prefix, ack.received_at))
        });

        if let Some(ticket) = &ticket {
            let record = TicketRecord::new(ticket.clone(), values, ack.received_at);
            match serde_json::to_string(&record) {
                Ok(json) => info!(form = %self.spec.id, ticket = %ticket, record = %json, "support ticket submitted"),
                Err(err) => warn!(form = %self.spec.id, ticket = %ticket, error = %err, "could not encode ticket record"),
            }
        } else {
            info!(form = %self.spec.id, sequence = self.sequence, "submission accepted");
        }

        self.state = SubmissionState::Success;
        let mut effects = vec![
            self.show(
                self.spec.messages.success_text(ticket.as_deref()),
                MessageTone::Success,
            ),
            Effect::ResetForm {
                form: self.spec.id.clone(),
            },
            self.restore_submit(),
        ];
        if self.spec.scroll_to_message {
            effects.push(Effect::ScrollIntoView {
                target: self.spec.message_target.clone(),
            });
        }
        effects.push(Effect::Schedule(SchedulerCommand::Debounce {
            key: self.timer_key(),
            delay: SUCCESS_MESSAGE_TTL,
            event: PageEvent::MessageExpired {
                form: self.spec.id.clone(),
            },
        }));
        effects
    }

    fn fail(&mut self, error: &SubmitError) -> Vec<Effect> {
        warn!(form = %self.spec.id, error = %error, "submission failed");
        self.state = SubmissionState::Error;
        vec![
            self.cancel_timer(),
            self.show(
                self.spec.messages.failure_text(error.reason()),
                MessageTone::Error,
            ),
            self.restore_submit(),
        ]
    }

    /// A field of this form was edited.
    pub fn on_input(&mut self) -> Vec<Effect> {
        if !self.state.is_terminal() {
            return Vec::new();
        }
        debug!(form = %self.spec.id, from = %self.state, "input clears status message");
        self.clear()
    }

    pub fn on_message_expired(&mut self) -> Vec<Effect> {
        if self.state != SubmissionState::Success {
            return Vec::new();
        }
        self.clear()
    }

    fn clear(&mut self) -> Vec<Effect> {
        self.state = SubmissionState::Idle;
        vec![
            self.cancel_timer(),
            Effect::HideMessage {
                target: self.spec.message_target.clone(),
            },
        ]
    }
}

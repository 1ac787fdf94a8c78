use crate::core::ElementId;
use crate::core::form::FormSpec;
use crate::core::submission::{Ack, SubmissionRequest, SubmitError};
use std::collections::HashMap;
use std::thread;
use std::time::{Duration, SystemTime};
use tracing::info;

/// Delivers validated form values somewhere and reports the outcome.
///
/// Implementations may block; the executor runs them off the event loop.
pub trait Submitter: Send + Sync {
    fn submit(&self, request: &SubmissionRequest) -> Result<Ack, SubmitError>;
}

impl<F> Submitter for F
where
    F: Fn(&SubmissionRequest) -> Result<Ack, SubmitError> + Send + Sync,
{
    fn submit(&self, request: &SubmissionRequest) -> Result<Ack, SubmitError> {
        self(request)
    }
}

/// Stand-in backend: waits for a per-form delay, then acknowledges.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    default_delay: Duration,
    delays: HashMap<ElementId, Duration>,
}

impl SimulatedSubmitter {
    pub fn new(default_delay: Duration) -> Self {
        Self {
            default_delay,
            delays: HashMap::new(),
        }
    }

    pub fn with_delay(mut self, form: impl Into<ElementId>, delay: Duration) -> Self {
        self.delays.insert(form.into(), delay);
        self
    }

    /// Use each form's configured `submit_delay_ms`.
    pub fn for_forms<'a>(forms: impl IntoIterator<Item = &'a FormSpec>) -> Self {
        forms
            .into_iter()
            .fold(Self::default(), |submitter, form| {
                submitter.with_delay(&form.id, Duration::from_millis(form.submit_delay_ms))
            })
    }

    pub fn delay_for(&self, form: &str) -> Duration {
        self.delays.get(form).copied().unwrap_or(self.default_delay)
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

impl Submitter for SimulatedSubmitter {
    fn submit(&self, request: &SubmissionRequest) -> Result<Ack, SubmitError> {
        let delay = self.delay_for(request.form_id.as_str());
        thread::sleep(delay);
        info!(
            form = %request.form_id,
            sequence = request.sequence,
            fields = request.values.len(),
            delay_ms = delay.as_millis() as u64,
            "simulated submission acknowledged"
        );
        Ok(Ack::now())
    }
}

/// Answers at once with a fixed outcome.
#[derive(Debug, Clone)]
pub struct ImmediateSubmitter {
    outcome: Result<Option<SystemTime>, SubmitError>,
}

impl ImmediateSubmitter {
    pub fn accepting() -> Self {
        Self { outcome: Ok(None) }
    }

    /// Acknowledge with a fixed receipt time.
    pub fn accepting_at(received_at: SystemTime) -> Self {
        Self {
            outcome: Ok(Some(received_at)),
        }
    }

    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(SubmitError::SubmitFailed(reason.into())),
        }
    }
}

impl Submitter for ImmediateSubmitter {
    fn submit(&self, _request: &SubmissionRequest) -> Result<Ack, SubmitError> {
        match &self.outcome {
            Ok(Some(at)) => Ok(Ack::at(*at)),
            Ok(None) => Ok(Ack::now()),
            Err(error) => Err(error.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ImmediateSubmitter, SimulatedSubmitter, Submitter};
    use crate::core::form::{contact_form, support_ticket_form};
    use crate::core::submission::{Ack, SubmissionRequest, SubmitError};
    use crate::core::value::FieldValues;
    use std::time::{Duration, Instant, UNIX_EPOCH};

    fn request(form: &str) -> SubmissionRequest {
        SubmissionRequest {
            form_id: form.into(),
            sequence: 1,
            values: FieldValues::new(),
        }
    }

    #[test]
    fn simulated_delays_come_from_form_specs() {
        let forms = [contact_form(), support_ticket_form()];
        let submitter = SimulatedSubmitter::for_forms(&forms);
        assert_eq!(submitter.delay_for("contactForm"), Duration::from_millis(1500));
        assert_eq!(submitter.delay_for("supportLogForm"), Duration::from_millis(2000));
        assert_eq!(submitter.delay_for("other"), Duration::from_millis(1500));
    }

    #[test]
    fn simulated_submitter_waits_then_acks() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(10));
        let started = Instant::now();
        assert!(submitter.submit(&request("contactForm")).is_ok());
        assert!(started.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn immediate_submitter_returns_fixed_outcome() {
        let at = UNIX_EPOCH + Duration::from_secs(42);
        let ack = ImmediateSubmitter::accepting_at(at)
            .submit(&request("contactForm"))
            .expect("ack");
        assert_eq!(ack, Ack::at(at));

        let error = ImmediateSubmitter::rejecting("offline")
            .submit(&request("contactForm"))
            .expect_err("rejection");
        assert_eq!(error, SubmitError::SubmitFailed("offline".to_string()));
    }

    #[test]
    fn closures_are_submitters() {
        let submitter = |request: &SubmissionRequest| -> Result<Ack, SubmitError> {
            Ok(Ack::now().with_reference(format!("REF-{}", request.sequence)))
        };
        let ack = submitter.submit(&request("contactForm")).expect("ack");
        assert_eq!(ack.reference.as_deref(), Some("REF-1"));
    }
}

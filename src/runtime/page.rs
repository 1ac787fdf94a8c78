use crate::core::ElementId;
use crate::core::controller::FormSubmissionController;
use crate::core::effect::Effect;
use crate::core::field::FieldKind;
use crate::core::page::{HOME_PAGE, PageSpec};
use crate::core::validation;
use crate::dom::{ActiveLinkMarker, Document, ScrollBlock, ScrollNavigator};
use crate::input::{counter, phone};
use crate::runtime::event::PageEvent;
use crate::runtime::scheduler::Scheduler;
use crate::task::SubmissionExecutor;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// A loaded page: its document, one controller per attached form, timers and
/// the submission executor. Runs entirely without a terminal.
pub struct Page {
    document: Document,
    controllers: Vec<FormSubmissionController>,
    scheduler: Scheduler,
    executor: SubmissionExecutor,
}

impl Page {
    pub fn load(spec: &PageSpec, executor: SubmissionExecutor, now: Instant) -> Self {
        let document = Document::from_page(spec);
        Self::with_document(document, spec, executor, now)
    }

    /// Attach controllers for `spec.forms` to an existing document. Forms
    /// whose element is missing are skipped.
    pub fn with_document(
        document: Document,
        spec: &PageSpec,
        executor: SubmissionExecutor,
        now: Instant,
    ) -> Self {
        let controllers: Vec<FormSubmissionController> = spec
            .forms
            .iter()
            .cloned()
            .filter_map(|form| FormSubmissionController::attach(form, &document))
            .collect();
        info!(
            page = %spec.path,
            forms = controllers.len(),
            "page loaded"
        );

        let mut page = Self {
            document,
            controllers,
            scheduler: Scheduler::new(),
            executor,
        };
        page.dispatch(PageEvent::Loaded, now);
        page
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn controllers(&self) -> &[FormSubmissionController] {
        &self.controllers
    }

    pub fn controller(&self, form: &str) -> Option<&FormSubmissionController> {
        self.controllers.iter().find(|c| c.id() == form)
    }

    fn controller_mut(&mut self, form: &str) -> Option<&mut FormSubmissionController> {
        self.controllers.iter_mut().find(|c| c.id() == form)
    }

    fn controller_for_field(&mut self, field: &str) -> Option<&mut FormSubmissionController> {
        self.controllers.iter_mut().find(|c| c.owns(field))
    }

    pub fn dispatch(&mut self, event: PageEvent, now: Instant) {
        let effects = match event {
            PageEvent::Loaded => {
                let path = self.document.path().to_string();
                ActiveLinkMarker::mark(&mut self.document, &path, HOME_PAGE);
                Vec::new()
            }
            PageEvent::Input { target, value } => self.handle_input(&target, &value),
            PageEvent::Blur { target } => {
                self.handle_blur(&target);
                Vec::new()
            }
            PageEvent::Submit { form } => self.handle_submit(&form),
            PageEvent::AnchorActivated { href } => {
                ScrollNavigator::activate(&mut self.document, &href);
                Vec::new()
            }
            PageEvent::MessageExpired { form } => self
                .controller_mut(form.as_str())
                .map(FormSubmissionController::on_message_expired)
                .unwrap_or_default(),
            PageEvent::SubmissionCompleted(completion) => {
                match self.controller_mut(completion.form_id.as_str()) {
                    Some(controller) => controller.on_submission_complete(completion),
                    None => {
                        debug!(form = %completion.form_id, "completion for unknown form dropped");
                        Vec::new()
                    }
                }
            }
        };
        self.apply_effects(effects, now);
    }

    fn handle_input(&mut self, target: &ElementId, value: &str) -> Vec<Effect> {
        let Some(kind) = self
            .document
            .get(target.as_str())
            .and_then(|element| element.field_kind())
        else {
            debug!(target = %target, "input for unknown field ignored");
            return Vec::new();
        };

        let value = match kind {
            FieldKind::Phone => phone::format(value),
            _ => value.to_string(),
        };
        self.document.set_value(target.as_str(), &value);
        if kind == FieldKind::Textarea {
            counter::refresh(&mut self.document, target);
        }

        self.controller_for_field(target.as_str())
            .map(FormSubmissionController::on_input)
            .unwrap_or_default()
    }

    fn handle_blur(&mut self, target: &ElementId) {
        let Some(field) = self
            .controllers
            .iter()
            .filter(|c| c.spec().live_validation)
            .find_map(|c| c.spec().field(target.as_str()))
        else {
            return;
        };
        let value = self.document.value(target.as_str()).unwrap_or("");
        let feedback = validation::feedback(field, value);
        self.document.set_feedback(target.as_str(), feedback);
    }

    fn handle_submit(&mut self, form: &ElementId) -> Vec<Effect> {
        let Some(index) = self.controllers.iter().position(|c| c.id() == form) else {
            debug!(form = %form, "submit for unattached form ignored");
            return Vec::new();
        };
        let raw = self.document.form_values(self.controllers[index].spec());
        self.controllers[index].on_submit(&raw)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            match effect {
                Effect::ShowMessage { target, text, tone } => {
                    self.document.show_message(target.as_str(), &text, tone);
                }
                Effect::HideMessage { target } => {
                    self.document.hide_message(target.as_str());
                }
                Effect::FocusField { target } => {
                    self.document.focus(target.as_str());
                }
                Effect::DisableSubmit { button, label } => {
                    self.document.set_button(button.as_str(), &label, true);
                }
                Effect::RestoreSubmit { button, label } => {
                    self.document.set_button(button.as_str(), &label, false);
                }
                Effect::ResetForm { form } => {
                    for field in self.document.reset_form(form.as_str()) {
                        counter::refresh(&mut self.document, &field);
                    }
                }
                Effect::ScrollIntoView { target } => {
                    self.document
                        .scroll_into_view(target.as_str(), ScrollBlock::Center);
                }
                Effect::Submit(request) => self.executor.spawn(request),
                Effect::Schedule(command) => self.scheduler.schedule(command, now),
            }
        }
    }

    /// Deliver finished submissions and due timers. Returns true when any
    /// event was processed.
    pub fn pump(&mut self, now: Instant) -> bool {
        let mut handled = false;
        for completion in self.executor.drain_ready() {
            self.dispatch(PageEvent::SubmissionCompleted(completion), now);
            handled = true;
        }
        for event in self.scheduler.drain_ready(now) {
            self.dispatch(event, now);
            handled = true;
        }
        handled
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.scheduler.poll_timeout(now, default_timeout)
    }
}

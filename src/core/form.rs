use crate::core::ElementId;
use crate::core::field::{FieldKind, FieldSpec};
use crate::core::validation::{FieldError, FieldFailure};
use serde::{Deserialize, Serialize};

pub const CONTACT_FORM_ID: &str = "contactForm";
pub const SUPPORT_FORM_ID: &str = "supportLogForm";

const TICKET_PLACEHOLDER: &str = "{ticket}";
const REASON_PLACEHOLDER: &str = "{reason}";

/// Declarative description of one form: its fields in declaration order and
/// where status feedback is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSpec {
    pub id: ElementId,
    #[serde(default)]
    pub title: String,
    pub fields: Vec<FieldSpec>,
    pub message_target: ElementId,
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
    #[serde(default)]
    pub messages: FormMessages,
    /// When set, accepted submissions are announced with a ticket identifier
    /// built from this prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_prefix: Option<String>,
    #[serde(default)]
    pub scroll_to_message: bool,
    /// Style fields as valid/invalid when focus leaves them.
    #[serde(default)]
    pub live_validation: bool,
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormMessages {
    pub missing_required: String,
    pub invalid_email: String,
    pub invalid_option: String,
    pub too_long: String,
    pub pending: String,
    pub pending_label: String,
    pub success: String,
    pub failure: String,
}

impl Default for FormMessages {
    fn default() -> Self {
        Self {
            missing_required: "Please fill in all required fields.".to_string(),
            invalid_email: "Please enter a valid email address.".to_string(),
            invalid_option: "Please choose one of the listed options.".to_string(),
            too_long: "Please keep this field under the character limit.".to_string(),
            pending: "Sending your message...".to_string(),
            pending_label: "Sending...".to_string(),
            success: "Thank you for your message! We will get back to you within 24 hours."
                .to_string(),
            failure: "We could not send your message: {reason}".to_string(),
        }
    }
}

impl FormMessages {
    /// Success text with `{ticket}` replaced by the ticket identifier, if any.
    pub fn success_text(&self, ticket: Option<&str>) -> String {
        match ticket {
            Some(ticket) => self.success.replace(TICKET_PLACEHOLDER, ticket),
            None => self.success.clone(),
        }
    }

    pub fn failure_text(&self, reason: &str) -> String {
        self.failure.replace(REASON_PLACEHOLDER, reason)
    }
}

fn default_submit_label() -> String {
    "Submit".to_string()
}

fn default_submit_delay_ms() -> u64 {
    1500
}

impl FormSpec {
    pub fn new(
        id: impl Into<ElementId>,
        message_target: impl Into<ElementId>,
        fields: Vec<FieldSpec>,
    ) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            fields,
            message_target: message_target.into(),
            submit_label: default_submit_label(),
            messages: FormMessages::default(),
            ticket_prefix: None,
            scroll_to_message: false,
            live_validation: false,
            submit_delay_ms: default_submit_delay_ms(),
        }
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Id of the submit button the document creates for this form.
    pub fn submit_button_id(&self) -> ElementId {
        ElementId::new(format!("{}Submit", self.id))
    }

    /// User-facing text for a validation failure.
    pub fn failure_message(&self, failure: &FieldFailure) -> String {
        match failure.error {
            FieldError::MissingRequired => self.messages.missing_required.clone(),
            FieldError::InvalidFormat => match self.field(failure.field.as_str()).map(|f| f.kind)
            {
                Some(FieldKind::Email) | None => self.messages.invalid_email.clone(),
                Some(_) => format!("{} has an invalid format.", self.label_of(&failure.field)),
            },
            FieldError::InvalidOption => self.messages.invalid_option.clone(),
            FieldError::TooLong { max } => {
                format!("{} (max {} characters)", self.messages.too_long, max)
            }
        }
    }

    fn label_of<'a>(&'a self, id: &'a ElementId) -> &'a str {
        self.field(id.as_str())
            .map(FieldSpec::display_label)
            .unwrap_or(id.as_str())
    }
}

/// General enquiry form on the contact page.
pub fn contact_form() -> FormSpec {
    let mut form = FormSpec::new(
        CONTACT_FORM_ID,
        "formMessage",
        vec![
            FieldSpec::text("name", "Name").required().with_max_length(100),
            FieldSpec::email("email", "Email").required().with_max_length(254),
            FieldSpec::textarea("message", "Message").required(),
        ],
    );
    form.title = "Send us a message".to_string();
    form.submit_label = "Send Message".to_string();
    form.submit_delay_ms = 1500;
    form
}

/// Help-desk ticket form on the support page.
pub fn support_ticket_form() -> FormSpec {
    let mut form = FormSpec::new(
        SUPPORT_FORM_ID,
        "ticketMessage",
        vec![
            FieldSpec::text("callerName", "Caller Name")
                .required()
                .with_max_length(100),
            FieldSpec::select(
                "callerDepartment",
                "Department",
                [
                    "Sales",
                    "Marketing",
                    "Finance",
                    "Human Resources",
                    "Operations",
                    "IT",
                    "Executive",
                    "Other",
                ],
            )
            .required(),
            FieldSpec::email("contactEmail", "Contact Email")
                .required()
                .with_max_length(254),
            FieldSpec::phone("contactPhone", "Contact Phone"),
            FieldSpec::text("incidentTitle", "Incident Title")
                .required()
                .with_max_length(120),
            FieldSpec::select(
                "incidentCategory",
                "Category",
                [
                    "Hardware",
                    "Software",
                    "Network",
                    "Email",
                    "Account Access",
                    "Printer",
                    "Security",
                    "Other",
                ],
            )
            .required(),
            FieldSpec::textarea("incidentDescription", "Description").required(),
            FieldSpec::radio_group("urgency", "Urgency", ["Low", "Medium", "High", "Critical"])
                .required(),
            FieldSpec::select(
                "priority",
                "Priority",
                ["P1 - Critical", "P2 - High", "P3 - Medium", "P4 - Low"],
            )
            .required(),
            FieldSpec::select(
                "ticketStatus",
                "Status",
                ["Open", "In Progress", "Pending Customer", "Resolved", "Closed"],
            )
            .required()
            .with_default("Open"),
            FieldSpec::text("assignedAgent", "Assigned Agent"),
            FieldSpec::textarea("troubleshootingSteps", "Troubleshooting Steps"),
            FieldSpec::textarea("resolutionNotes", "Resolution Notes"),
            FieldSpec::text("escalatedTo", "Escalated To"),
        ],
    );
    form.title = "Log a support ticket".to_string();
    form.submit_label = "Submit Ticket".to_string();
    form.messages.pending = "⏳ Submitting your support ticket...".to_string();
    form.messages.pending_label = "🔄 Submitting...".to_string();
    form.messages.success =
        "✅ Ticket #{ticket} submitted successfully! Our team will contact you shortly."
            .to_string();
    form.messages.failure = "❌ Ticket could not be submitted: {reason}".to_string();
    form.ticket_prefix = Some("NS-".to_string());
    form.scroll_to_message = true;
    form.live_validation = true;
    form.submit_delay_ms = 2000;
    form
}

#[cfg(test)]
mod tests {
    use super::{FormMessages, FormSpec, contact_form, support_ticket_form};
    use crate::core::field::FieldSpec;
    use crate::core::validation::{FieldError, FieldFailure};

    #[test]
    fn contact_form_uses_page_element_ids() {
        let form = contact_form();
        let ids: Vec<&str> = form.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["name", "email", "message"]);
        assert_eq!(form.message_target, "formMessage");
        assert_eq!(form.submit_button_id(), "contactFormSubmit");
    }

    #[test]
    fn support_form_declares_all_ticket_fields_in_order() {
        let form = support_ticket_form();
        let ids: Vec<&str> = form.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "callerName",
                "callerDepartment",
                "contactEmail",
                "contactPhone",
                "incidentTitle",
                "incidentCategory",
                "incidentDescription",
                "urgency",
                "priority",
                "ticketStatus",
                "assignedAgent",
                "troubleshootingSteps",
                "resolutionNotes",
                "escalatedTo",
            ]
        );
        let required: Vec<&str> = form
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(required.len(), 9);
        assert!(!required.contains(&"contactPhone"));
        assert_eq!(form.message_target, "ticketMessage");
    }

    #[test]
    fn success_text_substitutes_ticket() {
        let messages = support_ticket_form().messages;
        let text = messages.success_text(Some("NS-123456"));
        assert!(text.contains("Ticket #NS-123456 submitted successfully"));
    }

    #[test]
    fn failure_message_depends_on_reason() {
        let form = contact_form();
        let missing = FieldFailure::new("name", FieldError::MissingRequired);
        let invalid = FieldFailure::new("email", FieldError::InvalidFormat);
        assert_eq!(
            form.failure_message(&missing),
            "Please fill in all required fields."
        );
        assert_eq!(
            form.failure_message(&invalid),
            "Please enter a valid email address."
        );
    }

    #[test]
    fn yaml_spec_fills_defaults() {
        let yaml = r#"
id: feedbackForm
message_target: feedbackMessage
fields:
  - id: comment
    kind: textarea
    required: true
"#;
        let form: FormSpec = serde_yaml::from_str(yaml).expect("form spec");
        assert_eq!(form.submit_label, "Submit");
        assert_eq!(form.messages, FormMessages::default());
        assert_eq!(form.submit_delay_ms, 1500);
        assert_eq!(form.fields, vec![FieldSpec::textarea("comment", "").required()]);
    }
}

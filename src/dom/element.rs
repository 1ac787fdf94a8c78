use crate::core::ElementId;
use crate::core::effect::MessageTone;
use crate::core::field::{FieldKind, FieldSpec};
use crate::core::validation::FieldFeedback;
use crate::input::CounterTier;

pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRole {
    Nav,
    Anchor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Form,
    Field(FieldKind),
    Button,
    Message,
    Counter,
    Link(LinkRole),
    Section,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Form this element belongs to.
    pub form: Option<ElementId>,
    pub label: String,
    pub text: String,
    pub value: String,
    pub default_value: String,
    pub options: Vec<String>,
    pub href: Option<String>,
    pub required: bool,
    pub max_length: Option<usize>,
    pub visible: bool,
    pub disabled: bool,
    pub tone: Option<MessageTone>,
    pub feedback: FieldFeedback,
    pub counter_tier: Option<CounterTier>,
    pub classes: Vec<String>,
}

impl Element {
    pub fn new(id: impl Into<ElementId>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            form: None,
            label: String::new(),
            text: String::new(),
            value: String::new(),
            default_value: String::new(),
            options: Vec::new(),
            href: None,
            required: false,
            max_length: None,
            visible: true,
            disabled: false,
            tone: None,
            feedback: FieldFeedback::Neutral,
            counter_tier: None,
            classes: Vec::new(),
        }
    }

    pub fn form(id: impl Into<ElementId>, title: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Form).with_label(title)
    }

    pub fn field(spec: &FieldSpec) -> Self {
        let mut element = Self::new(&spec.id, ElementKind::Field(spec.kind))
            .with_label(spec.display_label());
        element.required = spec.required;
        element.max_length = spec.max_length;
        element.options = spec.options.clone();
        element.default_value = spec.initial_value().to_string();
        element.value = element.default_value.clone();
        element
    }

    pub fn button(id: impl Into<ElementId>, label: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Button).with_label(label)
    }

    /// Status message target; hidden until a message is shown.
    pub fn message(id: impl Into<ElementId>) -> Self {
        let mut element = Self::new(id, ElementKind::Message);
        element.visible = false;
        element
    }

    pub fn counter(id: impl Into<ElementId>) -> Self {
        let mut element = Self::new(id, ElementKind::Counter);
        element.counter_tier = Some(CounterTier::Normal);
        element
    }

    pub fn link(
        id: impl Into<ElementId>,
        href: impl Into<String>,
        label: impl Into<String>,
        role: LinkRole,
    ) -> Self {
        let mut element = Self::new(id, ElementKind::Link(role)).with_label(label);
        element.href = Some(href.into());
        element
    }

    pub fn section(id: impl Into<ElementId>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Section)
            .with_label(title)
            .with_text(body)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn in_form(mut self, form: impl Into<ElementId>) -> Self {
        self.form = Some(form.into());
        self
    }

    pub fn field_kind(&self) -> Option<FieldKind> {
        match self.kind {
            ElementKind::Field(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_field(&self) -> bool {
        self.field_kind().is_some()
    }

    pub fn is_focusable(&self) -> bool {
        match self.kind {
            ElementKind::Field(_) | ElementKind::Link(_) => true,
            ElementKind::Button => !self.disabled,
            _ => false,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }
}

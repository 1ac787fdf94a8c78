use crate::core::ElementId;
use crate::core::effect::MessageTone;
use crate::core::form::FormSpec;
use crate::core::page::PageSpec;
use crate::core::validation::FieldFeedback;
use crate::core::value::FieldValues;
use crate::dom::element::{Element, ElementKind, LinkRole};
use crate::input::counter;
use indexmap::IndexMap;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: ElementId,
    pub block: ScrollBlock,
}

/// In-memory page: elements by id, in document order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    path: String,
    title: String,
    elements: IndexMap<ElementId, Element>,
    focused: Option<ElementId>,
    scroll: Option<ScrollRequest>,
}

impl Document {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Build the element tree for a page: nav, sections, then each form with
    /// its fields, counters, submit button and message target.
    pub fn from_page(spec: &PageSpec) -> Self {
        let mut document = Self::new(spec.path.clone(), spec.title.clone());

        for link in &spec.nav {
            document.insert(Element::link(
                format!("nav:{}", link.href),
                link.href.clone(),
                link.label.clone(),
                LinkRole::Nav,
            ));
        }

        for section in &spec.sections {
            document.insert(Element::section(
                &section.id,
                section.title.clone(),
                section.body.clone(),
            ));
            for (idx, link) in section.links.iter().enumerate() {
                document.insert(Element::link(
                    format!("{}Link{}", section.id, idx),
                    link.href.clone(),
                    link.label.clone(),
                    LinkRole::Anchor,
                ));
            }
        }

        for form in &spec.forms {
            document.insert_form(form);
        }

        document
    }

    pub fn insert_form(&mut self, form: &FormSpec) {
        self.insert(Element::form(&form.id, form.title.clone()));
        for field in &form.fields {
            self.insert(Element::field(field).in_form(&form.id));
            if field.kind.is_multiline() {
                self.insert(Element::counter(counter::counter_id(&field.id)).in_form(&form.id));
                counter::refresh(self, &field.id);
            }
        }
        self.insert(Element::button(form.submit_button_id(), form.submit_label.clone()).in_form(&form.id));
        self.insert(Element::message(&form.message_target).in_form(&form.id));
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn insert(&mut self, element: Element) -> Option<Element> {
        let replaced = self.elements.insert(element.id.clone(), element);
        if let Some(old) = &replaced {
            warn!(id = %old.id, "duplicate element id; earlier element replaced");
        }
        replaced
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.get(id)
            .filter(|element| element.is_field())
            .map(|element| element.value.as_str())
    }

    /// Set a field's value, truncated to its max length. Returns false for
    /// unknown ids and non-field elements.
    pub fn set_value(&mut self, id: &str, value: &str) -> bool {
        let Some(element) = self.get_mut(id).filter(|element| element.is_field()) else {
            return false;
        };
        element.value = match element.max_length {
            Some(max) => value.chars().take(max).collect(),
            None => value.to_string(),
        };
        true
    }

    /// Current values of every field of `form` present in the document.
    pub fn form_values(&self, form: &FormSpec) -> FieldValues {
        form.fields
            .iter()
            .filter_map(|field| {
                self.value(field.id.as_str())
                    .map(|value| (field.id.clone(), value.to_string()))
            })
            .collect()
    }

    pub fn show_message(&mut self, target: &str, text: &str, tone: MessageTone) -> bool {
        let Some(element) = self.get_mut(target) else {
            return false;
        };
        element.text = text.to_string();
        element.tone = Some(tone);
        element.visible = true;
        true
    }

    pub fn hide_message(&mut self, target: &str) -> bool {
        let Some(element) = self.get_mut(target) else {
            return false;
        };
        element.visible = false;
        true
    }

    pub fn focus(&mut self, id: &str) -> bool {
        match self.elements.get_key_value(id) {
            Some((key, element)) if element.is_focusable() => {
                self.focused = Some(key.clone());
                true
            }
            _ => false,
        }
    }

    pub fn blur(&mut self) -> Option<ElementId> {
        self.focused.take()
    }

    pub fn focused(&self) -> Option<&ElementId> {
        self.focused.as_ref()
    }

    pub fn focused_element(&self) -> Option<&Element> {
        self.focused.as_ref().and_then(|id| self.get(id.as_str()))
    }

    /// Focusable element ids in document order.
    pub fn focus_order(&self) -> Vec<ElementId> {
        self.elements
            .values()
            .filter(|element| element.is_focusable())
            .map(|element| element.id.clone())
            .collect()
    }

    pub fn set_button(&mut self, id: &str, label: &str, disabled: bool) -> bool {
        let Some(element) = self
            .get_mut(id)
            .filter(|element| element.kind == ElementKind::Button)
        else {
            return false;
        };
        element.label = label.to_string();
        element.disabled = disabled;
        if disabled && self.focused.as_ref().is_some_and(|f| f == id) {
            self.focused = None;
        }
        true
    }

    /// Restore every field of `form` to its default value and clear live
    /// styling. Returns the ids of the fields that were reset.
    pub fn reset_form(&mut self, form: &str) -> Vec<ElementId> {
        let mut reset = Vec::new();
        for element in self.elements.values_mut() {
            if element.is_field() && element.form.as_ref().is_some_and(|f| f == form) {
                element.value = element.default_value.clone();
                element.feedback = FieldFeedback::Neutral;
                reset.push(element.id.clone());
            }
        }
        reset
    }

    pub fn set_feedback(&mut self, id: &str, feedback: FieldFeedback) -> bool {
        let Some(element) = self.get_mut(id).filter(|element| element.is_field()) else {
            return false;
        };
        element.feedback = feedback;
        true
    }

    pub fn scroll_into_view(&mut self, id: &str, block: ScrollBlock) -> bool {
        let Some((key, _)) = self.elements.get_key_value(id) else {
            return false;
        };
        self.scroll = Some(ScrollRequest {
            target: key.clone(),
            block,
        });
        true
    }

    pub fn scroll_request(&self) -> Option<&ScrollRequest> {
        self.scroll.as_ref()
    }

    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.scroll.take()
    }

    pub fn nav_links_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements
            .values_mut()
            .filter(|element| element.kind == ElementKind::Link(LinkRole::Nav))
    }
}

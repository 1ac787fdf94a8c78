use crate::core::ElementId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Select,
    RadioGroup,
    Textarea,
}

impl FieldKind {
    /// Select and radio-group fields hold one of a fixed set of options.
    pub fn is_choice(self) -> bool {
        matches!(self, Self::Select | Self::RadioGroup)
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, Self::Textarea)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: ElementId,
    #[serde(default)]
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl FieldSpec {
    pub fn new(id: impl Into<ElementId>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            required: false,
            max_length: None,
            options: Vec::new(),
            default: None,
        }
    }

    pub fn text(id: impl Into<ElementId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Text)
    }

    pub fn email(id: impl Into<ElementId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Email)
    }

    pub fn phone(id: impl Into<ElementId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Phone)
    }

    pub fn textarea(id: impl Into<ElementId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Textarea)
    }

    pub fn select<I, S>(id: impl Into<ElementId>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(id, label, FieldKind::Select).with_options(options)
    }

    pub fn radio_group<I, S>(id: impl Into<ElementId>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(id, label, FieldKind::RadioGroup).with_options(options)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Label used in rendering and messages; falls back to the id.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            self.id.as_str()
        } else {
            self.label.as_str()
        }
    }

    /// Value the field holds after page load and after a form reset.
    pub fn initial_value(&self) -> &str {
        self.default.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldKind, FieldSpec};

    #[test]
    fn builders_set_kind_and_flags() {
        let field = FieldSpec::select("priority", "Priority", ["P1", "P2"])
            .required()
            .with_default("P2");

        assert_eq!(field.kind, FieldKind::Select);
        assert!(field.required);
        assert_eq!(field.options, vec!["P1".to_string(), "P2".to_string()]);
        assert_eq!(field.initial_value(), "P2");
    }

    #[test]
    fn display_label_falls_back_to_id() {
        let field = FieldSpec::text("escalatedTo", "");
        assert_eq!(field.display_label(), "escalatedTo");
    }

    #[test]
    fn kind_deserializes_from_kebab_case() {
        let kind: FieldKind = serde_yaml::from_str("radio-group").expect("kind");
        assert_eq!(kind, FieldKind::RadioGroup);
        assert!(kind.is_choice());
    }
}

use crate::core::ElementId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field values keyed by field id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(IndexMap<ElementId, String>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<ElementId>, value: impl Into<String>) {
        self.0.insert(id.into(), value.into());
    }

    pub fn with(mut self, id: impl Into<ElementId>, value: impl Into<String>) -> Self {
        self.insert(id, value);
        self
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// Value of `id`, or an empty string when the field was not supplied.
    pub fn text(&self, id: &str) -> &str {
        self.get(id).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ElementId, &str)> {
        self.0.iter().map(|(id, value)| (id, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn trimmed(&self) -> Self {
        self.0
            .iter()
            .map(|(id, value)| (id.clone(), value.trim().to_string()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for FieldValues
where
    K: Into<ElementId>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, value)| (id.into(), value.into()))
                .collect(),
        )
    }
}

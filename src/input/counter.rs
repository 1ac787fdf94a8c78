use crate::core::ElementId;
use crate::dom::Document;

pub const WARNING_AFTER: usize = 500;
pub const OVER_AFTER: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterTier {
    #[default]
    Normal,
    Warning,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCount {
    pub count: usize,
    pub tier: CounterTier,
}

impl CharCount {
    pub fn of(text: &str) -> Self {
        let count = text.chars().count();
        let tier = if count > OVER_AFTER {
            CounterTier::Over
        } else if count > WARNING_AFTER {
            CounterTier::Warning
        } else {
            CounterTier::Normal
        };
        Self { count, tier }
    }

    pub fn label(&self) -> String {
        format!("{} characters", self.count)
    }
}

/// Id of the counter element shown under a textarea.
pub fn counter_id(textarea: &ElementId) -> ElementId {
    ElementId::new(format!("{textarea}Counter"))
}

/// Recompute the counter for `textarea` from its current value.
pub fn refresh(document: &mut Document, textarea: &ElementId) -> Option<CharCount> {
    let count = CharCount::of(document.value(textarea.as_str())?);
    let counter = document.get_mut(counter_id(textarea).as_str())?;
    counter.text = count.label();
    counter.counter_tier = Some(count.tier);
    Some(count)
}

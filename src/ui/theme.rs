use crate::core::effect::MessageTone;
use crate::core::validation::FieldFeedback;
use crate::input::CounterTier;
use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub heading: Style,
    pub body: Style,
    pub label: Style,
    pub hint: Style,
    pub focused: Style,
    pub nav: Style,
    pub nav_active: Style,
    pub link: Style,
    pub button: Style,
    pub button_disabled: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            title: Style::new().color(Color::Cyan).bold(),
            heading: Style::new().bold(),
            body: Style::new(),
            label: Style::new(),
            hint: Style::new().color(Color::DarkGrey),
            focused: Style::new().color(Color::Cyan).bold(),
            nav: Style::new().color(Color::DarkGrey),
            nav_active: Style::new().color(Color::Cyan).underline(),
            link: Style::new().color(Color::Blue).underline(),
            button: Style::new().bold(),
            button_disabled: Style::new().dim(),
        }
    }

    pub fn message(&self, tone: MessageTone) -> Style {
        match tone {
            MessageTone::Pending => Style::new().color(Color::Green),
            MessageTone::Success => Style::new().color(Color::Green).bold(),
            MessageTone::Error => Style::new().color(Color::Red).bold(),
        }
    }

    pub fn field(&self, feedback: FieldFeedback) -> Style {
        match feedback {
            FieldFeedback::Neutral => Style::new(),
            FieldFeedback::Valid => Style::new().color(Color::Green),
            FieldFeedback::Invalid => Style::new().color(Color::Red),
        }
    }

    pub fn counter(&self, tier: CounterTier) -> Style {
        match tier {
            CounterTier::Normal => Style::new().color(Color::DarkGrey),
            CounterTier::Warning => Style::new().color(Color::Yellow),
            CounterTier::Over => Style::new().color(Color::Red),
        }
    }
}

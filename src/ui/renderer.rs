use crate::core::ElementId;
use crate::core::field::FieldKind;
use crate::dom::element::{ACTIVE_CLASS, Element, ElementKind, LinkRole};
use crate::dom::Document;
use crate::input::CounterTier;
use crate::ui::span::{Span, SpanLine, line_width};
use crate::ui::style::Style;
use crate::ui::theme::Theme;
use std::collections::HashMap;
use unicode_width::UnicodeWidthChar;

const FOCUS_MARKER: &str = "› ";
const INDENT: &str = "  ";

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    /// First row of each element, for scrolling.
    pub rows: HashMap<ElementId, usize>,
}

impl RenderFrame {
    pub fn row_of(&self, id: &str) -> Option<usize> {
        self.rows.get(id).copied()
    }

    fn push(&mut self, line: SpanLine) {
        self.lines.push(line);
    }

    fn blank(&mut self) {
        self.lines.push(Vec::new());
    }

    fn mark(&mut self, id: &ElementId) {
        self.rows.insert(id.clone(), self.lines.len());
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn render(&self, document: &Document, width: u16) -> RenderFrame {
        let width = usize::from(width).max(20);
        let mut frame = RenderFrame::default();
        let focused = document.focused().map(ElementId::as_str);

        frame.push(vec![Span::styled(
            format!("NetSaviors Technology · {}", document.title()),
            self.theme.title,
        )]);
        self.render_nav(document, focused, &mut frame);
        frame.blank();

        for element in document.elements() {
            let is_focused = focused == Some(element.id.as_str());
            match element.kind {
                ElementKind::Link(LinkRole::Nav) => {}
                ElementKind::Section => {
                    frame.mark(&element.id);
                    frame.push(vec![Span::styled(
                        format!("== {} ==", element.label),
                        self.theme.heading,
                    )]);
                    for line in wrap(&element.text, width) {
                        frame.push(vec![Span::styled(line, self.theme.body)]);
                    }
                    frame.blank();
                }
                ElementKind::Link(LinkRole::Anchor) => {
                    frame.mark(&element.id);
                    frame.push(vec![
                        marker(is_focused),
                        Span::styled(element.label.clone(), self.link_style(is_focused)),
                        Span::styled(
                            format!(" ({})", element.href.as_deref().unwrap_or("")),
                            self.theme.hint,
                        ),
                    ]);
                }
                ElementKind::Form => {
                    frame.blank();
                    frame.mark(&element.id);
                    frame.push(vec![Span::styled(
                        format!("## {}", element.label),
                        self.theme.heading,
                    )]);
                }
                ElementKind::Field(kind) => {
                    frame.mark(&element.id);
                    self.render_field(element, kind, is_focused, width, &mut frame);
                }
                ElementKind::Counter => {
                    frame.mark(&element.id);
                    let style = self
                        .theme
                        .counter(element.counter_tier.unwrap_or(CounterTier::Normal));
                    let text = element.text.clone();
                    let pad = width.saturating_sub(unicode_width::UnicodeWidthStr::width(text.as_str()));
                    frame.push(vec![Span::new(" ".repeat(pad)), Span::styled(text, style)]);
                }
                ElementKind::Button => {
                    frame.mark(&element.id);
                    let style = if element.disabled {
                        self.theme.button_disabled
                    } else if is_focused {
                        self.theme.focused
                    } else {
                        self.theme.button
                    };
                    frame.push(vec![
                        marker(is_focused),
                        Span::styled(format!("[ {} ]", element.label), style),
                    ]);
                }
                ElementKind::Message => {
                    frame.mark(&element.id);
                    if let (true, Some(tone)) = (element.visible, element.tone) {
                        let style = self.theme.message(tone);
                        for line in wrap(&element.text, width.saturating_sub(INDENT.len())) {
                            frame.push(vec![Span::new(INDENT), Span::styled(line, style)]);
                        }
                    }
                }
            }
        }

        frame
    }

    fn render_nav(&self, document: &Document, focused: Option<&str>, frame: &mut RenderFrame) {
        let mut line: SpanLine = Vec::new();
        for link in document
            .elements()
            .filter(|e| e.kind == ElementKind::Link(LinkRole::Nav))
        {
            if !line.is_empty() {
                line.push(Span::styled(" | ", self.theme.hint));
            }
            frame.rows.insert(link.id.clone(), frame.lines.len());
            let style = if focused == Some(link.id.as_str()) {
                self.theme.focused
            } else if link.has_class(ACTIVE_CLASS) {
                self.theme.nav_active
            } else {
                self.theme.nav
            };
            line.push(Span::styled(link.label.clone(), style));
        }
        if !line.is_empty() {
            frame.push(line);
        }
    }

    fn render_field(
        &self,
        element: &Element,
        kind: FieldKind,
        is_focused: bool,
        width: usize,
        frame: &mut RenderFrame,
    ) {
        let label_style = if is_focused {
            self.theme.focused
        } else {
            self.theme.label
        };
        let required = if element.required { "*" } else { "" };
        let mut head = vec![
            marker(is_focused),
            Span::styled(format!("{}{}: ", element.label, required), label_style),
        ];
        let value_style = self.theme.field(element.feedback);
        let cursor = if is_focused { "_" } else { "" };

        match kind {
            FieldKind::Select => {
                let shown = if element.value.is_empty() {
                    "choose"
                } else {
                    element.value.as_str()
                };
                head.push(Span::styled(format!("< {shown} >"), value_style));
                frame.push(head);
            }
            FieldKind::RadioGroup => {
                for option in &element.options {
                    let mark = if *option == element.value { "(•)" } else { "( )" };
                    head.push(Span::styled(format!("{mark} {option}  "), value_style));
                }
                frame.push(head);
            }
            FieldKind::Textarea => {
                frame.push(head);
                let body_width = width.saturating_sub(INDENT.len() * 2);
                let mut lines: Vec<String> = element
                    .value
                    .split('\n')
                    .flat_map(|line| wrap(line, body_width))
                    .collect();
                if lines.is_empty() {
                    lines.push(String::new());
                }
                let last = lines.len() - 1;
                for (idx, line) in lines.into_iter().enumerate() {
                    let text = if idx == last {
                        format!("{line}{cursor}")
                    } else {
                        line
                    };
                    frame.push(vec![
                        Span::new(INDENT.repeat(2)),
                        Span::styled(text, value_style),
                    ]);
                }
            }
            FieldKind::Text | FieldKind::Email | FieldKind::Phone => {
                let available = width.saturating_sub(line_width(&head));
                let shown = tail_fit(&element.value, available.saturating_sub(1));
                head.push(Span::styled(format!("{shown}{cursor}"), value_style));
                frame.push(head);
            }
        }
    }

    fn link_style(&self, focused: bool) -> Style {
        if focused {
            self.theme.focused
        } else {
            self.theme.link
        }
    }
}

fn marker(focused: bool) -> Span {
    Span::new(if focused { FOCUS_MARKER } else { INDENT })
}

/// Greedy word wrap by display width. Empty input yields no lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width: usize = word.chars().map(|c| c.width().unwrap_or(0)).sum();
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Rightmost part of `text` that fits in `width` columns.
fn tail_fit(text: &str, width: usize) -> String {
    let mut used = 0usize;
    let mut out: Vec<char> = Vec::new();
    for ch in text.chars().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.into_iter().rev().collect()
}

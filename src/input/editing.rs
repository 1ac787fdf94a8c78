//! Keystroke edits on field values. Edits always act at the end of the value.

use crate::core::field::FieldKind;
use crate::input::phone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    Backspace,
    DeleteWordLeft,
    Newline,
    NextOption,
    PrevOption,
}

/// New value after `edit`, or `None` when the edit does not apply to `kind`.
pub fn apply(kind: FieldKind, options: &[String], value: &str, edit: Edit) -> Option<String> {
    if kind.is_choice() {
        return match edit {
            Edit::NextOption => cycle(options, value, 1),
            Edit::PrevOption => cycle(options, value, -1),
            _ => None,
        };
    }

    match edit {
        Edit::Insert(ch) if ch.is_control() => None,
        Edit::Insert(ch) => {
            let mut next = value.to_string();
            next.push(ch);
            Some(next)
        }
        Edit::Backspace if kind == FieldKind::Phone => Some(phone::backspace(value)),
        Edit::Backspace => {
            let mut next = value.to_string();
            next.pop().map(|_| next)
        }
        Edit::DeleteWordLeft => Some(delete_word_left(value)),
        Edit::Newline if kind.is_multiline() => Some(format!("{value}\n")),
        Edit::Newline | Edit::NextOption | Edit::PrevOption => None,
    }
}

fn cycle(options: &[String], value: &str, step: isize) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let len = options.len() as isize;
    let next = match options.iter().position(|option| option == value) {
        Some(index) => (index as isize + step).rem_euclid(len),
        None if step > 0 => 0,
        None => len - 1,
    };
    options.get(next as usize).cloned()
}

fn delete_word_left(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut end = chars.len();
    while end > 0 && chars[end - 1].is_whitespace() {
        end -= 1;
    }
    while end > 0 && !chars[end - 1].is_whitespace() {
        end -= 1;
    }
    chars[..end].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::{Edit, apply};
    use crate::core::field::FieldKind;

    fn options() -> Vec<String> {
        ["Low", "Medium", "High"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn text_edits_append_and_remove() {
        assert_eq!(
            apply(FieldKind::Text, &[], "An", Edit::Insert('n')),
            Some("Ann".to_string())
        );
        assert_eq!(
            apply(FieldKind::Text, &[], "Ann", Edit::Backspace),
            Some("An".to_string())
        );
        assert_eq!(apply(FieldKind::Text, &[], "", Edit::Backspace), None);
        assert_eq!(
            apply(FieldKind::Text, &[], "VPN drops  ", Edit::DeleteWordLeft),
            Some("VPN ".to_string())
        );
    }

    #[test]
    fn newline_only_in_textareas() {
        assert_eq!(apply(FieldKind::Text, &[], "a", Edit::Newline), None);
        assert_eq!(
            apply(FieldKind::Textarea, &[], "a", Edit::Newline),
            Some("a\n".to_string())
        );
    }

    #[test]
    fn phone_backspace_drops_a_digit() {
        assert_eq!(
            apply(FieldKind::Phone, &[], "(555) ", Edit::Backspace),
            Some("55".to_string())
        );
    }

    #[test]
    fn choices_cycle_through_options() {
        let options = options();
        assert_eq!(
            apply(FieldKind::RadioGroup, &options, "", Edit::NextOption),
            Some("Low".to_string())
        );
        assert_eq!(
            apply(FieldKind::RadioGroup, &options, "High", Edit::NextOption),
            Some("Low".to_string())
        );
        assert_eq!(
            apply(FieldKind::Select, &options, "", Edit::PrevOption),
            Some("High".to_string())
        );
        assert_eq!(apply(FieldKind::Select, &options, "Low", Edit::Insert('x')), None);
    }
}

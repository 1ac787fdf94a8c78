//! North American phone mask: `(555) 123-4567`.

const MAX_DIGITS: usize = 10;

pub fn digits(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGITS)
        .collect()
}

/// Strip every non-digit and regroup what is left. Partial input formats
/// partially, so the mask can be applied on every keystroke.
pub fn format(raw: &str) -> String {
    format_digits(&digits(raw))
}

fn format_digits(digits: &str) -> String {
    let len = digits.len();
    if len < 3 {
        return digits.to_string();
    }

    let (area, rest) = digits.split_at(3);
    let mut out = format!("({area}) ");
    if rest.len() <= 3 {
        out.push_str(rest);
        return out;
    }

    let (exchange, line) = rest.split_at(3);
    out.push_str(exchange);
    out.push('-');
    out.push_str(line);
    out
}

/// Remove the last digit of a formatted number and reformat.
pub fn backspace(formatted: &str) -> String {
    let mut digits = digits(formatted);
    digits.pop();
    format_digits(&digits)
}

#[cfg(test)]
mod tests {
    use super::{backspace, format};

    #[test]
    fn formats_full_number() {
        assert_eq!(format("5551234567"), "(555) 123-4567");
        assert_eq!(format("555-123-4567"), "(555) 123-4567");
        assert_eq!(format("+1 (555) 123 4567 ext"), "(155) 512-3456");
    }

    #[test]
    fn formats_partial_input() {
        assert_eq!(format(""), "");
        assert_eq!(format("5"), "5");
        assert_eq!(format("555"), "(555) ");
        assert_eq!(format("12345"), "(123) 45");
        assert_eq!(format("555123"), "(555) 123");
        assert_eq!(format("5551234"), "(555) 123-4");
    }

    #[test]
    fn extra_digits_are_dropped() {
        assert_eq!(format("555123456789"), "(555) 123-4567");
    }

    #[test]
    fn reformatting_formatted_output_is_stable() {
        for raw in ["555", "12345", "5551234567"] {
            let once = format(raw);
            assert_eq!(format(&once), once);
        }
    }

    #[test]
    fn non_digits_only_clear_the_field() {
        assert_eq!(format("abc"), "");
    }

    #[test]
    fn backspace_removes_a_digit_not_a_separator() {
        assert_eq!(backspace("(555) "), "55");
        assert_eq!(backspace("(555) 123-4"), "(555) 123");
        assert_eq!(backspace(""), "");
    }
}

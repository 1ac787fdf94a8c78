use crate::input::editing::Edit;
use crate::terminal::KeyEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    /// Submit the form that contains the focused element.
    Submit,
    NextFocus,
    PrevFocus,
    /// Enter: follow a link, press a button, or add a newline in a textarea.
    Activate,
    Edit(Edit),
    ScrollUp,
    ScrollDown,
    InputKey(KeyEvent),
}

use crate::terminal::{KeyCode, KeyEvent, KeyModifiers, TerminalEvent};
use crate::ui::span::SpanLine;
use crate::ui::style::{Color, Style};
use crossterm::event::{Event, KeyEventKind, poll, read};
use crossterm::style::{
    Attribute, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Stdout, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

pub struct Terminal {
    stdout: Stdout,
    size: Size,
    active: bool,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout: io::stdout(),
            size: Size { width, height },
            active: false,
        })
    }

    /// Raw mode on the alternate screen with the cursor hidden.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.stdout,
            terminal::EnterAlternateScreen,
            terminal::DisableLineWrap,
            cursor::Hide
        )?;
        self.active = true;
        Ok(())
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.stdout,
            cursor::Show,
            terminal::EnableLineWrap,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Waits up to `timeout` for input. Returns `Tick` when nothing arrived.
    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<TerminalEvent> {
        if !poll(timeout)? {
            return Ok(TerminalEvent::Tick);
        }
        match read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Ok(TerminalEvent::Key(map_key_event(key)))
            }
            Event::Resize(width, height) => {
                self.size = Size { width, height };
                Ok(TerminalEvent::Resize { width, height })
            }
            _ => Ok(TerminalEvent::Tick),
        }
    }

    /// Draws `lines[offset..]` from the top-left, followed by a footer pinned to the last row.
    pub fn render(&mut self, lines: &[SpanLine], offset: usize, footer: &SpanLine) -> io::Result<()> {
        let body_rows = usize::from(self.size.height.saturating_sub(1));
        queue!(
            self.stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::All)
        )?;
        for (row, line) in lines.iter().skip(offset).take(body_rows).enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, row as u16))?;
            self.write_line(line)?;
        }
        queue!(
            self.stdout,
            cursor::MoveTo(0, self.size.height.saturating_sub(1))
        )?;
        self.write_line(footer)?;
        self.stdout.flush()
    }

    fn write_line(&mut self, line: &SpanLine) -> io::Result<()> {
        for span in line {
            let style = span.style;
            if let Some(fg) = style.color {
                queue!(self.stdout, SetForegroundColor(map_color(fg)))?;
            }
            if let Some(bg) = style.background {
                queue!(self.stdout, SetBackgroundColor(map_color(bg)))?;
            }
            if style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                queue!(self.stdout, SetAttribute(Attribute::Dim))?;
            }
            if style.underline {
                queue!(self.stdout, SetAttribute(Attribute::Underlined))?;
            }
            write!(self.stdout, "{}", span.text)?;
            if !Style::is_plain(&style) {
                queue!(self.stdout, SetAttribute(Attribute::Reset), ResetColor)?;
            }
        }
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

fn map_color(color: Color) -> crossterm::style::Color {
    match color {
        Color::Reset => crossterm::style::Color::Reset,
        Color::Black => crossterm::style::Color::Black,
        Color::DarkGrey => crossterm::style::Color::DarkGrey,
        Color::Red => crossterm::style::Color::Red,
        Color::Green => crossterm::style::Color::Green,
        Color::Yellow => crossterm::style::Color::Yellow,
        Color::Blue => crossterm::style::Color::Blue,
        Color::Magenta => crossterm::style::Color::Magenta,
        Color::Cyan => crossterm::style::Color::Cyan,
        Color::White => crossterm::style::Color::White,
    }
}

fn map_key_event(event: crossterm::event::KeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(event.code),
        modifiers: map_key_modifiers(event.modifiers),
    }
}

fn map_key_code(code: crossterm::event::KeyCode) -> KeyCode {
    use crossterm::event::KeyCode as Ct;
    match code {
        Ct::Char(ch) => KeyCode::Char(ch),
        Ct::Backspace => KeyCode::Backspace,
        Ct::Enter => KeyCode::Enter,
        Ct::Esc => KeyCode::Esc,
        Ct::Left => KeyCode::Left,
        Ct::Right => KeyCode::Right,
        Ct::Up => KeyCode::Up,
        Ct::Down => KeyCode::Down,
        Ct::PageUp => KeyCode::PageUp,
        Ct::PageDown => KeyCode::PageDown,
        Ct::Home => KeyCode::Home,
        Ct::End => KeyCode::End,
        Ct::Tab => KeyCode::Tab,
        Ct::BackTab => KeyCode::BackTab,
        Ct::Delete => KeyCode::Delete,
        _ => KeyCode::Other,
    }
}

fn map_key_modifiers(modifiers: crossterm::event::KeyModifiers) -> KeyModifiers {
    use crossterm::event::KeyModifiers as Ct;
    let mut mapped = KeyModifiers::NONE;
    if modifiers.contains(Ct::SHIFT) {
        mapped |= KeyModifiers::SHIFT;
    }
    if modifiers.contains(Ct::CONTROL) {
        mapped |= KeyModifiers::CONTROL;
    }
    if modifiers.contains(Ct::ALT) {
        mapped |= KeyModifiers::ALT;
    }
    mapped
}

use crate::config::SiteConfig;
use crate::core::ElementId;
use crate::core::field::FieldKind;
use crate::core::page::PageSpec;
use crate::dom::{Document, ElementKind, LinkRole, ScrollBlock};
use crate::input::editing::{self, Edit};
use crate::runtime::command::Command;
use crate::runtime::event::PageEvent;
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::page::Page;
use crate::task::{ExecutionMode, SubmissionExecutor, Submitter};
use crate::terminal::{KeyCode, KeyModifiers, Terminal, TerminalEvent};
use crate::ui::renderer::Renderer;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const IDLE_TIMEOUT: Duration = Duration::from_millis(120);
const SCROLL_STEP: usize = 5;
const FOOTER: &str =
    "Tab/Shift+Tab move  ←/→ choose  Enter activate  Ctrl+S submit  PgUp/PgDn scroll  Esc quit";

/// Keyboard-driven browsing session over the site: the loaded page, focus
/// movement and page navigation. Owns no terminal.
pub struct Session {
    site: SiteConfig,
    page: Page,
    submitter: Arc<dyn Submitter>,
    mode: ExecutionMode,
    key_bindings: KeyBindings,
    scroll_offset: usize,
    should_exit: bool,
}

impl Session {
    pub fn open(
        site: SiteConfig,
        page_name: &str,
        submitter: Arc<dyn Submitter>,
        mode: ExecutionMode,
        now: Instant,
    ) -> Result<Self, crate::config::ConfigError> {
        let spec = site.page(page_name)?.clone();
        let page = Self::load_page(&spec, &submitter, mode, now);
        Ok(Self {
            site,
            page,
            submitter,
            mode,
            key_bindings: KeyBindings::new(),
            scroll_offset: 0,
            should_exit: false,
        })
    }

    fn load_page(
        spec: &PageSpec,
        submitter: &Arc<dyn Submitter>,
        mode: ExecutionMode,
        now: Instant,
    ) -> Page {
        let executor = SubmissionExecutor::new(Arc::clone(submitter), mode);
        let mut page = Page::load(spec, executor, now);
        focus_first_field(page.document_mut());
        page
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn document(&self) -> &Document {
        self.page.document()
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll_offset = offset;
    }

    pub fn handle_key(&mut self, key: crate::terminal::KeyEvent, now: Instant) {
        let command = self.key_bindings.resolve(key);
        self.handle_command(command, now);
    }

    pub fn handle_command(&mut self, command: Command, now: Instant) {
        match command {
            Command::Exit => self.should_exit = true,
            Command::NextFocus => self.move_focus(1, now),
            Command::PrevFocus => self.move_focus(-1, now),
            Command::Submit => {
                if let Some(form) = self.focused_form() {
                    self.page.dispatch(PageEvent::Submit { form }, now);
                }
            }
            Command::Activate => self.activate(now),
            Command::Edit(edit) => self.edit_focused(edit, now),
            Command::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(SCROLL_STEP);
            }
            Command::ScrollDown => self.scroll_offset += SCROLL_STEP,
            Command::InputKey(key) => {
                let plain = !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT);
                if let (KeyCode::Char(ch), true) = (key.code, plain) {
                    self.edit_focused(Edit::Insert(ch), now);
                }
            }
        }
    }

    /// Deliver completions and timers. Returns true when anything changed.
    pub fn pump(&mut self, now: Instant) -> bool {
        self.page.pump(now)
    }

    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.page.poll_timeout(now, IDLE_TIMEOUT)
    }

    /// Loads another page of the site by href. Unknown pages are logged and ignored.
    pub fn navigate(&mut self, href: &str, now: Instant) -> bool {
        let spec = match self.site.page(href) {
            Ok(spec) => spec.clone(),
            Err(err) => {
                warn!(href, error = %err, "navigation target not found");
                return false;
            }
        };
        info!(page = %spec.path, "navigating");
        self.page = Self::load_page(&spec, &self.submitter, self.mode, now);
        self.scroll_offset = 0;
        true
    }

    fn move_focus(&mut self, step: isize, now: Instant) {
        let order = self.document().focus_order();
        if order.is_empty() {
            return;
        }
        let current = self
            .document()
            .focused()
            .and_then(|id| order.iter().position(|candidate| candidate == id));
        let len = order.len() as isize;
        let next = match current {
            Some(index) => (index as isize + step).rem_euclid(len),
            None if step >= 0 => 0,
            None => len - 1,
        };
        let target = order[next as usize].clone();
        self.blur_focused(now);
        self.page.document_mut().focus(target.as_str());
        self.page
            .document_mut()
            .scroll_into_view(target.as_str(), ScrollBlock::Center);
    }

    fn blur_focused(&mut self, now: Instant) {
        let Some(previous) = self.page.document_mut().blur() else {
            return;
        };
        let was_field = self
            .document()
            .get(previous.as_str())
            .is_some_and(|element| element.is_field());
        if was_field {
            self.page.dispatch(PageEvent::Blur { target: previous }, now);
        }
    }

    fn focused_form(&self) -> Option<ElementId> {
        let element = self.document().focused_element()?;
        match element.kind {
            ElementKind::Form => Some(element.id.clone()),
            _ => element.form.clone(),
        }
    }

    fn activate(&mut self, now: Instant) {
        let Some(element) = self.document().focused_element() else {
            return;
        };
        match element.kind {
            ElementKind::Link(LinkRole::Nav) => {
                if let Some(href) = element.href.clone() {
                    self.navigate(&href, now);
                }
            }
            ElementKind::Link(LinkRole::Anchor) => {
                if let Some(href) = element.href.clone() {
                    self.page.dispatch(PageEvent::AnchorActivated { href }, now);
                }
            }
            ElementKind::Field(FieldKind::Textarea) => self.edit_focused(Edit::Newline, now),
            ElementKind::Field(_) | ElementKind::Button => {
                if let Some(form) = element.form.clone() {
                    self.page.dispatch(PageEvent::Submit { form }, now);
                }
            }
            _ => {}
        }
    }

    fn edit_focused(&mut self, edit: Edit, now: Instant) {
        let Some(element) = self.document().focused_element() else {
            return;
        };
        let Some(kind) = element.field_kind() else {
            return;
        };
        let Some(value) = editing::apply(kind, &element.options, &element.value, edit) else {
            debug!(target = %element.id, ?edit, "edit not applicable");
            return;
        };
        let target = element.id.clone();
        self.page.dispatch(PageEvent::Input { target, value }, now);
    }
}

fn focus_first_field(document: &mut Document) {
    let first = document
        .elements()
        .find(|element| element.is_field())
        .or_else(|| document.elements().find(|element| element.is_focusable()))
        .map(|element| element.id.clone());
    if let Some(id) = first {
        document.focus(id.as_str());
    }
}

/// Terminal host: draws the session and feeds it keys, completions and timers.
pub struct Runtime {
    session: Session,
    terminal: Terminal,
    renderer: Renderer,
}

impl Runtime {
    pub fn new(session: Session, terminal: Terminal) -> Self {
        Self {
            session,
            terminal,
            renderer: Renderer::default(),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            self.render()?;

            while !self.session.should_exit() {
                let now = Instant::now();
                let timeout = self.session.poll_timeout(now);
                let event = self.terminal.poll_event(timeout)?;
                let now = Instant::now();

                let mut dirty = match event {
                    TerminalEvent::Key(key) => {
                        self.session.handle_key(key, now);
                        true
                    }
                    TerminalEvent::Resize { .. } => true,
                    TerminalEvent::Tick => false,
                };
                dirty |= self.session.pump(now);

                if dirty && !self.session.should_exit() {
                    self.render()?;
                }
            }

            Ok(())
        })();

        let exit_result = self.terminal.exit();
        run_result.and(exit_result)
    }

    fn render(&mut self) -> io::Result<()> {
        let size = self.terminal.size();
        let frame = self.renderer.render(self.session.document(), size.width);
        let rows = usize::from(size.height.saturating_sub(1)).max(1);

        if let Some(request) = self.session.page_mut().document_mut().take_scroll_request()
            && let Some(row) = frame.row_of(request.target.as_str())
        {
            let offset = match request.block {
                ScrollBlock::Start => row,
                ScrollBlock::Center => row.saturating_sub(rows / 2),
            };
            self.session.set_scroll_offset(offset);
        }
        let max_offset = frame.lines.len().saturating_sub(rows);
        if self.session.scroll_offset() > max_offset {
            self.session.set_scroll_offset(max_offset);
        }

        let footer: SpanLine = vec![Span::styled(FOOTER, Style::new().color(Color::DarkGrey))];
        self.terminal
            .render(&frame.lines, self.session.scroll_offset(), &footer)
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::config::SiteConfig;
    use crate::core::submission::SubmissionState;
    use crate::input::editing::Edit;
    use crate::runtime::command::Command;
    use crate::task::{ExecutionMode, ImmediateSubmitter};
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::Arc;
    use std::time::Instant;

    fn session(page: &str) -> Session {
        Session::open(
            SiteConfig::builtin(),
            page,
            Arc::new(ImmediateSubmitter::accepting()),
            ExecutionMode::Inline,
            Instant::now(),
        )
        .expect("page")
    }

    fn type_text(session: &mut Session, text: &str, now: Instant) {
        for ch in text.chars() {
            session.handle_key(KeyEvent::plain(KeyCode::Char(ch)), now);
        }
    }

    #[test]
    fn opens_with_first_field_focused() {
        let session = session("contact");
        assert_eq!(session.document().focused().map(|id| id.as_str()), Some("name"));
    }

    #[test]
    fn typing_and_tab_fill_the_contact_form() {
        let now = Instant::now();
        let mut session = session("contact");
        type_text(&mut session, "Ann", now);
        session.handle_key(KeyEvent::plain(KeyCode::Tab), now);
        type_text(&mut session, "ann@example.com", now);
        session.handle_key(KeyEvent::plain(KeyCode::Tab), now);
        type_text(&mut session, "Hello", now);
        session.handle_key(KeyEvent::plain(KeyCode::Enter), now);
        type_text(&mut session, "there", now);

        let document = session.document();
        assert_eq!(document.value("name"), Some("Ann"));
        assert_eq!(document.value("email"), Some("ann@example.com"));
        assert_eq!(document.value("message"), Some("Hello\nthere"));
    }

    #[test]
    fn ctrl_s_submits_and_pump_completes() {
        let now = Instant::now();
        let mut session = session("contact");
        type_text(&mut session, "Ann", now);
        session.handle_command(Command::NextFocus, now);
        type_text(&mut session, "ann@example.com", now);
        session.handle_command(Command::NextFocus, now);
        type_text(&mut session, "Hi", now);

        session.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), now);
        let state = |s: &Session| s.page().controller("contactForm").map(|c| c.state());
        assert_eq!(state(&session), Some(SubmissionState::Pending));

        assert!(session.pump(now));
        assert_eq!(state(&session), Some(SubmissionState::Success));
        assert_eq!(session.document().value("name"), Some(""));
    }

    #[test]
    fn leaving_a_support_field_applies_feedback() {
        let now = Instant::now();
        let mut session = session("support");
        assert_eq!(session.document().focused().map(|id| id.as_str()), Some("callerName"));
        session.handle_command(Command::NextFocus, now);
        let feedback = session.document().get("callerName").map(|e| e.feedback);
        assert_eq!(feedback, Some(crate::core::validation::FieldFeedback::Invalid));
    }

    #[test]
    fn arrows_cycle_choice_fields() {
        let now = Instant::now();
        let mut session = session("support");
        session.page_mut().document_mut().focus("urgency");
        session.handle_command(Command::Edit(Edit::NextOption), now);
        assert_eq!(session.document().value("urgency"), Some("Low"));
        session.handle_command(Command::Edit(Edit::PrevOption), now);
        assert_eq!(session.document().value("urgency"), Some("Critical"));
    }

    #[test]
    fn enter_on_nav_link_loads_the_page() {
        let now = Instant::now();
        let mut session = session("index");
        session.page_mut().document_mut().focus("nav:support.html");
        session.handle_command(Command::Activate, now);
        assert_eq!(session.document().path(), "support.html");
        assert!(session.page().controller("supportLogForm").is_some());
    }

    #[test]
    fn unknown_navigation_keeps_the_page() {
        let now = Instant::now();
        let mut session = session("contact");
        assert!(!session.navigate("pricing.html", now));
        assert_eq!(session.document().path(), "contact.html");
    }

    #[test]
    fn control_chords_do_not_type() {
        let now = Instant::now();
        let mut session = session("contact");
        session.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL), now);
        assert_eq!(session.document().value("name"), Some(""));
    }

    #[test]
    fn esc_exits() {
        let mut session = session("index");
        session.handle_key(KeyEvent::plain(KeyCode::Esc), Instant::now());
        assert!(session.should_exit());
    }
}

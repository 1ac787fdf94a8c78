use netsaviors_forms::config::SiteConfig;
use netsaviors_forms::core::ElementId;
use netsaviors_forms::core::effect::MessageTone;
use netsaviors_forms::core::page::{LinkSpec, PageSpec};
use netsaviors_forms::core::submission::SubmissionState;
use netsaviors_forms::dom::{Document, ScrollBlock};
use netsaviors_forms::dom::element::ACTIVE_CLASS;
use netsaviors_forms::input::CounterTier;
use netsaviors_forms::runtime::{Page, PageEvent};
use netsaviors_forms::task::{ImmediateSubmitter, SubmissionExecutor, Submitter};
use regex::Regex;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

fn load(name: &str, submitter: impl Submitter + 'static, now: Instant) -> Page {
    let site = SiteConfig::builtin();
    let spec = site.page(name).expect("builtin page");
    Page::load(spec, SubmissionExecutor::inline(Arc::new(submitter)), now)
}

fn input(page: &mut Page, target: &str, value: &str, now: Instant) {
    page.dispatch(
        PageEvent::Input {
            target: ElementId::new(target),
            value: value.to_string(),
        },
        now,
    );
}

fn submit(page: &mut Page, form: &str, now: Instant) {
    page.dispatch(
        PageEvent::Submit {
            form: ElementId::new(form),
        },
        now,
    );
}

fn state(page: &Page, form: &str) -> SubmissionState {
    page.controller(form).expect("controller").state()
}

fn message(page: &Page, target: &str) -> (bool, String, Option<MessageTone>) {
    let element = page.document().get(target).expect("message element");
    (element.visible, element.text.clone(), element.tone)
}

fn fill_contact(page: &mut Page, now: Instant) {
    input(page, "name", "  Ann Smith ", now);
    input(page, "email", "ann@example.com", now);
    input(page, "message", "My router keeps dropping.", now);
}

fn fill_ticket(page: &mut Page, now: Instant) {
    input(page, "callerName", "Ann Smith", now);
    input(page, "callerDepartment", "Finance", now);
    input(page, "contactEmail", "ann@example.com", now);
    input(page, "contactPhone", "5551234567", now);
    input(page, "incidentTitle", "VPN down", now);
    input(page, "incidentCategory", "Network", now);
    input(page, "incidentDescription", "Cannot reach the office VPN since 9am.", now);
    input(page, "urgency", "High", now);
    input(page, "priority", "P2 - High", now);
}

#[test]
fn contact_submission_runs_pending_then_success_then_hides() {
    let start = Instant::now();
    let mut page = load("contact", ImmediateSubmitter::accepting(), start);
    fill_contact(&mut page, start);

    submit(&mut page, "contactForm", start);
    assert_eq!(state(&page, "contactForm"), SubmissionState::Pending);
    let button = page.document().get("contactFormSubmit").expect("button");
    assert!(button.disabled);
    assert_eq!(button.label, "Sending...");
    assert_eq!(
        message(&page, "formMessage"),
        (true, "Sending your message...".to_string(), Some(MessageTone::Pending))
    );

    assert!(page.pump(start));
    assert_eq!(state(&page, "contactForm"), SubmissionState::Success);
    let (visible, text, tone) = message(&page, "formMessage");
    assert!(visible);
    assert!(text.starts_with("Thank you for your message!"));
    assert_eq!(tone, Some(MessageTone::Success));
    assert_eq!(page.document().value("name"), Some(""));
    assert_eq!(page.document().value("message"), Some(""));
    let button = page.document().get("contactFormSubmit").expect("button");
    assert!(!button.disabled);
    assert_eq!(button.label, "Send Message");

    page.pump(start + Duration::from_millis(4_999));
    assert!(message(&page, "formMessage").0);

    page.pump(start + Duration::from_secs(5));
    assert!(!message(&page, "formMessage").0);
    assert_eq!(state(&page, "contactForm"), SubmissionState::Idle);
}

#[test]
fn invalid_contact_submit_reports_and_focuses_first_failure() {
    let now = Instant::now();
    let mut page = load("contact", ImmediateSubmitter::accepting(), now);
    input(&mut page, "name", "Ann", now);
    input(&mut page, "email", "ann@", now);
    input(&mut page, "message", "hello", now);

    submit(&mut page, "contactForm", now);
    assert_eq!(state(&page, "contactForm"), SubmissionState::Error);
    assert_eq!(
        message(&page, "formMessage"),
        (
            true,
            "Please enter a valid email address.".to_string(),
            Some(MessageTone::Error)
        )
    );
    assert_eq!(page.document().focused().map(|id| id.as_str()), Some("email"));
    assert!(!page.pump(now));
}

#[test]
fn editing_a_field_clears_an_error() {
    let now = Instant::now();
    let mut page = load("contact", ImmediateSubmitter::accepting(), now);
    submit(&mut page, "contactForm", now);
    assert_eq!(state(&page, "contactForm"), SubmissionState::Error);

    input(&mut page, "name", "A", now);
    assert_eq!(state(&page, "contactForm"), SubmissionState::Idle);
    assert!(!message(&page, "formMessage").0);
}

#[test]
fn ticket_submission_announces_a_ticket_number() {
    let now = Instant::now();
    let mut page = load("support", ImmediateSubmitter::accepting(), now);
    fill_ticket(&mut page, now);

    submit(&mut page, "supportLogForm", now);
    assert_eq!(
        page.document().get("supportLogFormSubmit").map(|b| b.label.as_str()),
        Some("🔄 Submitting...")
    );
    page.pump(now);

    let (visible, text, _) = message(&page, "ticketMessage");
    assert!(visible);
    let pattern = Regex::new(r"^✅ Ticket #NS-\d{6} submitted successfully!").expect("regex");
    assert!(pattern.is_match(&text), "unexpected message: {text}");
    assert_eq!(page.document().value("ticketStatus"), Some("Open"));
    assert_eq!(page.document().value("urgency"), Some(""));
}

#[test]
fn ticket_number_comes_from_receipt_time() {
    let now = Instant::now();
    let received = UNIX_EPOCH + Duration::from_millis(1_700_000_654_321);
    let mut page = load("support", ImmediateSubmitter::accepting_at(received), now);
    fill_ticket(&mut page, now);
    submit(&mut page, "supportLogForm", now);
    page.pump(now);

    let (_, text, _) = message(&page, "ticketMessage");
    assert!(text.contains("Ticket #NS-654321"), "unexpected message: {text}");
    let scroll = page.document().scroll_request().expect("scroll request");
    assert_eq!(scroll.target, "ticketMessage");
    assert_eq!(scroll.block, ScrollBlock::Center);
}

#[test]
fn rejected_submission_shows_the_reason_and_restores_the_button() {
    let now = Instant::now();
    let mut page = load("contact", ImmediateSubmitter::rejecting("mail server offline"), now);
    fill_contact(&mut page, now);
    submit(&mut page, "contactForm", now);
    page.pump(now);

    assert_eq!(state(&page, "contactForm"), SubmissionState::Error);
    let (visible, text, tone) = message(&page, "formMessage");
    assert!(visible);
    assert!(text.contains("mail server offline"));
    assert_eq!(tone, Some(MessageTone::Error));
    assert!(!page.document().get("contactFormSubmit").expect("button").disabled);
    assert_eq!(page.document().value("name"), Some("  Ann Smith "));
}

#[test]
fn submit_while_pending_is_ignored() {
    let now = Instant::now();
    let mut page = load("contact", ImmediateSubmitter::accepting(), now);
    fill_contact(&mut page, now);
    submit(&mut page, "contactForm", now);
    submit(&mut page, "contactForm", now);

    page.pump(now);
    assert_eq!(state(&page, "contactForm"), SubmissionState::Success);
    assert!(!page.pump(now));
}

#[test]
fn second_success_supersedes_the_first_hide_timer() {
    let start = Instant::now();
    let mut page = load("contact", ImmediateSubmitter::accepting(), start);
    fill_contact(&mut page, start);
    submit(&mut page, "contactForm", start);
    page.pump(start);

    let later = start + Duration::from_secs(3);
    fill_contact(&mut page, later);
    submit(&mut page, "contactForm", later);
    page.pump(later);
    assert_eq!(state(&page, "contactForm"), SubmissionState::Success);

    page.pump(start + Duration::from_secs(5));
    assert!(message(&page, "formMessage").0);

    page.pump(later + Duration::from_secs(5));
    assert!(!message(&page, "formMessage").0);
}

#[test]
fn phone_input_is_masked_as_typed() {
    let now = Instant::now();
    let mut page = load("support", ImmediateSubmitter::accepting(), now);
    input(&mut page, "contactPhone", "555", now);
    assert_eq!(page.document().value("contactPhone"), Some("(555) "));
    input(&mut page, "contactPhone", "555-123-45678999", now);
    assert_eq!(page.document().value("contactPhone"), Some("(555) 123-4567"));
}

#[test]
fn counter_tracks_textarea_length() {
    let now = Instant::now();
    let mut page = load("contact", ImmediateSubmitter::accepting(), now);
    input(&mut page, "message", "hello", now);
    let counter = page.document().get("messageCounter").expect("counter");
    assert_eq!(counter.text, "5 characters");
    assert_eq!(counter.counter_tier, Some(CounterTier::Normal));

    input(&mut page, "message", &"x".repeat(501), now);
    let counter = page.document().get("messageCounter").expect("counter");
    assert_eq!(counter.counter_tier, Some(CounterTier::Warning));
}

#[test]
fn blur_marks_support_fields_only() {
    let now = Instant::now();
    let mut page = load("support", ImmediateSubmitter::accepting(), now);
    input(&mut page, "contactEmail", "nope", now);
    page.dispatch(
        PageEvent::Blur {
            target: ElementId::new("contactEmail"),
        },
        now,
    );
    let feedback = page.document().get("contactEmail").map(|e| e.feedback);
    assert_eq!(
        feedback,
        Some(netsaviors_forms::core::validation::FieldFeedback::Invalid)
    );

    let mut contact = load("contact", ImmediateSubmitter::accepting(), now);
    input(&mut contact, "email", "nope", now);
    contact.dispatch(
        PageEvent::Blur {
            target: ElementId::new("email"),
        },
        now,
    );
    let feedback = contact.document().get("email").map(|e| e.feedback);
    assert_eq!(
        feedback,
        Some(netsaviors_forms::core::validation::FieldFeedback::Neutral)
    );
}

#[test]
fn loaded_page_marks_its_nav_link() {
    let now = Instant::now();
    let page = load("support", ImmediateSubmitter::accepting(), now);
    let active: Vec<&str> = page
        .document()
        .elements()
        .filter(|e| e.has_class(ACTIVE_CLASS))
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(active, vec!["nav:support.html"]);
}

#[test]
fn site_root_marks_the_home_link() {
    let spec = PageSpec {
        path: "/".to_string(),
        title: "Home".to_string(),
        nav: vec![
            LinkSpec::new("index.html", "Home"),
            LinkSpec::new("contact.html", "Contact"),
        ],
        sections: Vec::new(),
        forms: Vec::new(),
    };
    let executor = SubmissionExecutor::inline(Arc::new(ImmediateSubmitter::accepting()));
    let page = Page::load(&spec, executor, Instant::now());
    assert!(
        page.document()
            .get("nav:index.html")
            .expect("home link")
            .has_class(ACTIVE_CLASS)
    );
}

#[test]
fn anchors_scroll_to_existing_targets_only() {
    let now = Instant::now();
    let mut page = load("index", ImmediateSubmitter::accepting(), now);
    page.dispatch(
        PageEvent::AnchorActivated {
            href: "#missing".to_string(),
        },
        now,
    );
    assert!(page.document().scroll_request().is_none());

    page.dispatch(
        PageEvent::AnchorActivated {
            href: "#services".to_string(),
        },
        now,
    );
    let request = page.document_mut().take_scroll_request().expect("scroll");
    assert_eq!(request.target, "services");
    assert_eq!(request.block, ScrollBlock::Start);
}

#[test]
fn page_without_form_element_still_loads() {
    let site = SiteConfig::builtin();
    let spec = site.page("contact").expect("contact");
    let document = Document::new(spec.path.clone(), spec.title.clone());
    let executor = SubmissionExecutor::inline(Arc::new(ImmediateSubmitter::accepting()));
    let now = Instant::now();
    let mut page = Page::with_document(document, spec, executor, now);

    assert!(page.controllers().is_empty());
    submit(&mut page, "contactForm", now);
    input(&mut page, "name", "Ann", now);
    assert!(!page.pump(now));
}

#[test]
fn contact_success_has_no_ticket_number() {
    let now = Instant::now();
    let received: SystemTime = UNIX_EPOCH + Duration::from_secs(1);
    let mut page = load("contact", ImmediateSubmitter::accepting_at(received), now);
    fill_contact(&mut page, now);
    submit(&mut page, "contactForm", now);
    assert!(page.pump(now));
    assert_eq!(state(&page, "contactForm"), SubmissionState::Success);
    assert!(!message(&page, "formMessage").1.contains("Ticket"));
    assert!(page.document().scroll_request().is_none());
}

#[test]
fn later_error_outlives_the_earlier_hide_timer() {
    let start = Instant::now();
    let mut page = load("contact", ImmediateSubmitter::accepting(), start);
    fill_contact(&mut page, start);
    submit(&mut page, "contactForm", start);
    page.pump(start);

    submit(&mut page, "contactForm", start + Duration::from_secs(1));
    page.pump(start + Duration::from_secs(10));

    assert_eq!(state(&page, "contactForm"), SubmissionState::Error);
    let (visible, text, _) = message(&page, "formMessage");
    assert!(visible);
    assert_eq!(text, "Please fill in all required fields.");
}

//! End-to-end submit cycles against in-memory toasts and a simulated backend.

use std::time::Duration;

use formkit_notify::{Notifier, Severity, ToastQueue};
use formkit_prefs::{ACCOUNT_KEY, MemoryStorage, PreferenceStore};
use formkit_submit::forms::{DonationForm, SignInForm, TicketForm};
use formkit_submit::{
    CustomForm, FieldError, FormPipeline, INVALID_FORM_MESSAGE, LOADING_LABEL, PipelineConfig,
    SimulatedBackend, SubmissionState, SubmitOutcome,
};
use formkit_validate::{FieldSpec, RuleKind};

const LATENCY: Duration = Duration::from_millis(1500);

fn pipeline<P: formkit_submit::FormProfile>(
    profile: P,
    backend: SimulatedBackend,
) -> (FormPipeline<P, SimulatedBackend>, ToastQueue) {
    let toasts = ToastQueue::new();
    let pipeline = FormPipeline::with_config(
        profile,
        backend,
        Notifier::new(toasts.clone()),
        PipelineConfig {
            close_delay: Duration::from_millis(2000),
        },
    );
    (pipeline, toasts)
}

fn fill<P: formkit_submit::FormProfile>(
    pipeline: &mut FormPipeline<P, SimulatedBackend>,
    values: &[(&str, &str)],
) {
    for (id, value) in values {
        pipeline.input(id, *value).unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn test_invalid_ticket_reports_each_field_once() {
    let (mut form, toasts) = pipeline(TicketForm, SimulatedBackend::accepting(LATENCY));
    fill(
        &mut form,
        &[
            ("name", "A"),
            ("email", "bad"),
            ("subject", ""),
            ("category", "billing"),
            ("priority", "high"),
            ("description", "The invoice total does not match my plan."),
        ],
    );

    let outcome = form.submit().await;

    assert_eq!(
        outcome.errors(),
        &[
            FieldError {
                field: "name".to_string(),
                message: "Must be at least 2 characters".to_string(),
            },
            FieldError {
                field: "email".to_string(),
                message: "Please enter a valid email address".to_string(),
            },
            FieldError {
                field: "subject".to_string(),
                message: "This field is required".to_string(),
            },
        ]
    );
    assert_eq!(toasts.texts(), vec![INVALID_FORM_MESSAGE.to_string()]);
    assert_eq!(form.submitter().calls(), 0);
    assert_eq!(form.state(), SubmissionState::Idle);
    assert_eq!(
        form.last_transitions(),
        &[SubmissionState::Validating, SubmissionState::Idle]
    );
    assert!(form.field("name").unwrap().has_error());
    assert!(!form.field("category").unwrap().has_error());
    // Values survive a failed validation
    assert_eq!(form.field("name").unwrap().value().as_text(), "A");
}

#[tokio::test(start_paused = true)]
async fn test_one_invalid_field_blocks_submission() {
    let profile = CustomForm::new("survey")
        .field(FieldSpec::new("first", "First", RuleKind::required()))
        .field(FieldSpec::new("second", "Second", RuleKind::required()))
        .field(FieldSpec::new("email", "Email", RuleKind::Email))
        .field(FieldSpec::new("third", "Third", RuleKind::required()))
        .field(FieldSpec::new("fourth", "Fourth", RuleKind::required()));
    let (mut form, toasts) = pipeline(profile, SimulatedBackend::accepting(LATENCY));
    fill(
        &mut form,
        &[
            ("first", "a"),
            ("second", "b"),
            ("email", "nope"),
            ("third", "c"),
            ("fourth", "d"),
        ],
    );

    let outcome = form.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Invalid { .. }));
    assert_eq!(form.submitter().calls(), 0);
    let marked: Vec<&str> = form
        .fields()
        .iter()
        .filter(|f| f.has_error())
        .map(|f| f.id())
        .collect();
    assert_eq!(marked, vec!["email"]);
    assert_eq!(toasts.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_donation_success_clears_and_returns_idle() {
    let (mut form, toasts) = pipeline(DonationForm, SimulatedBackend::accepting(LATENCY));
    form.open_panel();
    fill(
        &mut form,
        &[
            ("name", "Jane"),
            ("email", "jane@x.com"),
            ("amount", "25"),
            ("frequency", "monthly"),
        ],
    );

    let outcome = form.submit().await;

    let submission = outcome.submission().expect("donation accepted");
    assert!(submission.confirmation.starts_with("DON-"));
    assert_eq!(submission.confirmation.len(), "DON-".len() + 9);
    assert_eq!(submission.payload.text("amount"), "25");

    let toast = &toasts.snapshot()[0];
    assert_eq!(toast.severity, Severity::Success);
    assert!(toast.text.contains("monthly"), "{}", toast.text);
    assert!(toast.text.contains("$25"), "{}", toast.text);

    assert!(form.fields().iter().all(|f| f.value().is_empty() && !f.has_error()));
    assert_eq!(form.state(), SubmissionState::Idle);
    assert!(!form.panel().is_open());
    assert!(!form.control().is_busy());
    assert_eq!(
        form.last_transitions(),
        &[
            SubmissionState::Validating,
            SubmissionState::Submitting,
            SubmissionState::Succeeded,
            SubmissionState::Idle,
        ]
    );
    assert_eq!(form.submitter().calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_ticket_success_echoes_confirmation() {
    let (mut form, toasts) = pipeline(TicketForm, SimulatedBackend::accepting(LATENCY));
    fill(
        &mut form,
        &[
            ("name", "Sam Doe"),
            ("email", "sam@example.com"),
            ("category", "technical"),
            ("priority", "low"),
            ("subject", "Login loop"),
            ("description", "The login page keeps redirecting back to itself."),
        ],
    );

    let outcome = form.submit().await;

    let confirmation = &outcome.submission().unwrap().confirmation;
    assert_eq!(
        toasts.texts(),
        vec![format!(
            "Ticket {confirmation} submitted! We'll get back to you within 24 hours."
        )]
    );
}

#[tokio::test(start_paused = true)]
async fn test_failure_keeps_values() {
    let (mut form, toasts) = pipeline(DonationForm, SimulatedBackend::rejecting(LATENCY));
    form.open_panel();
    fill(
        &mut form,
        &[
            ("name", "Jane"),
            ("email", "jane@x.com"),
            ("amount", "10"),
            ("frequency", "one-time"),
        ],
    );

    let outcome = form.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
    assert_eq!(
        toasts.texts(),
        vec!["Something went wrong. Please try again.".to_string()]
    );
    assert_eq!(form.field("amount").unwrap().value().as_text(), "10");
    assert!(form.panel().is_open());
    assert_eq!(form.state(), SubmissionState::Idle);
    assert_eq!(
        form.last_transitions(),
        &[
            SubmissionState::Validating,
            SubmissionState::Submitting,
            SubmissionState::Failed,
            SubmissionState::Idle,
        ]
    );

    // The form stays usable
    let retry = form.submit().await;
    assert!(matches!(retry, SubmitOutcome::Failed { .. }));
    assert_eq!(form.submitter().calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_control_is_busy_while_in_flight() {
    let (mut form, _toasts) = pipeline(DonationForm, SimulatedBackend::accepting(LATENCY));
    fill(
        &mut form,
        &[
            ("name", "Jane"),
            ("email", "jane@x.com"),
            ("amount", "5"),
            ("frequency", "annually"),
        ],
    );

    let abandoned = tokio::time::timeout(Duration::from_millis(100), form.submit()).await;
    assert!(abandoned.is_err());

    assert_eq!(form.state(), SubmissionState::Submitting);
    assert!(form.control().is_disabled());
    assert_eq!(form.control().label(), LOADING_LABEL);
    assert!(matches!(form.submit().await, SubmitOutcome::Busy));
    assert_eq!(form.submitter().calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_sign_in_remembers_account() {
    let storage = MemoryStorage::new();
    let profile = SignInForm::new(PreferenceStore::new(storage.clone()));
    let (mut form, toasts) = pipeline(profile, SimulatedBackend::accepting(LATENCY));
    fill(
        &mut form,
        &[
            ("email", "me@example.com"),
            ("password", "correct-horse"),
            ("remember", "on"),
        ],
    );

    let outcome = form.submit().await;

    assert!(outcome.is_success());
    assert_eq!(toasts.texts(), vec!["Welcome back, me@example.com!".to_string()]);
    assert_eq!(form.profile().remembered_email(), Some("me@example.com"));
    assert!(storage.raw(ACCOUNT_KEY).unwrap().contains("me@example.com"));

    // The reset form is prefilled from the account just remembered
    assert_eq!(form.field("email").unwrap().value().as_text(), "me@example.com");
    assert_eq!(form.field("remember").unwrap().value().as_text(), "true");
    assert!(form.field("password").unwrap().value().is_empty());

    form.input("password", "correct-horse").unwrap();
    assert!(form.submit().await.is_success());
    assert_eq!(
        toasts.texts().last().map(String::as_str),
        Some("Welcome back, me@example.com!")
    );
}

#[tokio::test(start_paused = true)]
async fn test_short_password_is_rejected() {
    let profile = SignInForm::new(PreferenceStore::new(MemoryStorage::new()));
    let (mut form, _toasts) = pipeline(profile, SimulatedBackend::accepting(LATENCY));
    fill(&mut form, &[("email", "me@example.com"), ("password", "short")]);

    let outcome = form.submit().await;

    assert_eq!(
        outcome.errors(),
        &[FieldError {
            field: "password".to_string(),
            message: "Password must be at least 8 characters".to_string(),
        }]
    );
}

//! Validate, submit, notify, reset.
//!
//! [`FormPipeline`] drives one form through a submit cycle. The page-specific
//! parts come from a [`FormProfile`]; the network call is a [`Submitter`].

use std::time::Duration;

use chrono::Utc;
use formkit_notify::Notifier;
use formkit_validate::{FieldSpec, FieldValue, ValidationResult};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::control::{PanelState, SubmitControl};
use crate::error::{FormError, Result};
use crate::payload::{Payload, Receipt, confirmation_id, random_suffix};
use crate::profile::{FormProfile, INVALID_FORM_MESSAGE};
use crate::state::SubmissionState;
use crate::submitter::{SubmitError, Submitter};

/// Delay between the success toast and closing the host panel.
pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_millis(2000);

/// Tunables for a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub close_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            close_delay: DEFAULT_CLOSE_DELAY,
        }
    }
}

/// A field that failed validation on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// A submission the external operation accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub confirmation: String,
    pub receipt: Receipt,
    pub payload: Payload,
}

/// How a call to [`FormPipeline::submit`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// At least one field failed; the submitter was not called.
    Invalid { errors: Vec<FieldError> },
    Succeeded(Submission),
    /// The submitter returned an error; field values are kept.
    Failed { error: SubmitError },
    /// A previous submission has not settled.
    Busy,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    pub fn submission(&self) -> Option<&Submission> {
        match self {
            Self::Succeeded(submission) => Some(submission),
            _ => None,
        }
    }

    /// Fields that failed validation, empty unless the outcome is `Invalid`.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Invalid { errors } => errors,
            _ => &[],
        }
    }
}

/// One form, its fields and its submit cycle.
pub struct FormPipeline<P, S> {
    profile: P,
    submitter: S,
    notifier: Notifier,
    config: PipelineConfig,
    fields: Vec<FieldSpec>,
    state: SubmissionState,
    control: SubmitControl,
    panel: PanelState,
    transitions: Vec<SubmissionState>,
}

impl<P: FormProfile, S: Submitter> FormPipeline<P, S> {
    pub fn new(profile: P, submitter: S, notifier: Notifier) -> Self {
        Self::with_config(profile, submitter, notifier, PipelineConfig::default())
    }

    pub fn with_config(profile: P, submitter: S, notifier: Notifier, config: PipelineConfig) -> Self {
        let fields = profile.fields();
        let control = SubmitControl::new(profile.submit_label());
        Self {
            profile,
            submitter,
            notifier,
            config,
            fields,
            state: SubmissionState::Idle,
            control,
            panel: PanelState::default(),
            transitions: Vec::new(),
        }
    }

    pub fn profile(&self) -> &P {
        &self.profile
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    pub fn open_panel(&mut self) {
        self.panel.open();
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Result<&FieldSpec> {
        self.fields
            .iter()
            .find(|field| field.id() == id)
            .ok_or_else(|| self.unknown_field(id))
    }

    /// States entered during the most recent call to [`submit`](Self::submit).
    pub fn last_transitions(&self) -> &[SubmissionState] {
        &self.transitions
    }

    /// Set a field's value and clear its error, as on an input event.
    pub fn input(&mut self, id: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.field_mut(id)?.set_value(value);
        Ok(())
    }

    /// Validate one field and show or clear its error, as on blur.
    pub fn blur(&mut self, id: &str) -> Result<ValidationResult> {
        Ok(self.field_mut(id)?.check())
    }

    /// Run one submit cycle.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.state != SubmissionState::Idle || self.control.is_disabled() {
            debug!(form = self.profile.name(), state = %self.state, "submit ignored while busy");
            return SubmitOutcome::Busy;
        }

        self.transitions.clear();
        self.transition(SubmissionState::Validating);

        let errors = self.validate_all();
        if !errors.is_empty() {
            info!(
                form = self.profile.name(),
                invalid = errors.len(),
                "form rejected by validation"
            );
            self.notifier.error(INVALID_FORM_MESSAGE);
            self.transition(SubmissionState::Idle);
            return SubmitOutcome::Invalid { errors };
        }

        self.transition(SubmissionState::Submitting);
        self.control.set_busy();

        let now = Utc::now();
        let payload = Payload::from_fields(self.profile.name(), &self.fields, now);
        let span = info_span!("submit", form = self.profile.name(), fields = payload.values.len());
        let result = self.submitter.submit(&payload).instrument(span).await;

        match result {
            Ok(receipt) => self.finish_success(payload, receipt).await,
            Err(error) => self.finish_failure(error),
        }
    }

    async fn finish_success(&mut self, payload: Payload, receipt: Receipt) -> SubmitOutcome {
        self.transition(SubmissionState::Succeeded);

        let confirmation = confirmation_id(self.profile.confirmation_prefix(), Utc::now(), random_suffix());
        info!(
            form = self.profile.name(),
            confirmation = %confirmation,
            reference = receipt.reference.as_deref().unwrap_or("-"),
            "submission accepted"
        );

        let message = self.profile.success_message(&payload, &confirmation);
        self.notifier.success(&message);
        self.profile.on_success(&payload);

        // Prefills come from the profile after its success hook ran
        let seeded = self.profile.fields();
        for field in &mut self.fields {
            field.reset();
            if let Some(seed) = seeded.iter().find(|seed| seed.id() == field.id())
                && !seed.value().is_empty()
            {
                field.set_value(seed.value().clone());
            }
        }

        tokio::time::sleep(self.config.close_delay).await;
        self.panel.hide();
        self.control.set_idle();
        self.transition(SubmissionState::Idle);

        SubmitOutcome::Succeeded(Submission {
            confirmation,
            receipt,
            payload,
        })
    }

    fn finish_failure(&mut self, error: SubmitError) -> SubmitOutcome {
        self.transition(SubmissionState::Failed);
        warn!(form = self.profile.name(), error = %error, "submission failed");

        let message = self.profile.failure_message(&error);
        self.notifier.error(&message);
        self.control.set_idle();
        self.transition(SubmissionState::Idle);

        SubmitOutcome::Failed { error }
    }

    /// Check every field in order, marking failures and clearing passes.
    fn validate_all(&mut self) -> Vec<FieldError> {
        self.fields
            .iter_mut()
            .filter_map(|field| {
                let result = field.check();
                (!result.is_valid()).then(|| FieldError {
                    field: field.id().to_string(),
                    message: result.message().to_string(),
                })
            })
            .collect()
    }

    fn transition(&mut self, next: SubmissionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {next}",
            self.state
        );
        debug!(form = self.profile.name(), from = %self.state, to = %next, "state transition");
        self.state = next;
        self.transitions.push(next);
    }

    fn field_mut(&mut self, id: &str) -> Result<&mut FieldSpec> {
        let index = self
            .fields
            .iter()
            .position(|field| field.id() == id)
            .ok_or_else(|| self.unknown_field(id))?;
        Ok(&mut self.fields[index])
    }

    fn unknown_field(&self, id: &str) -> FormError {
        FormError::UnknownField {
            form: self.profile.name().to_string(),
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::CustomForm;
    use crate::submitter::FnSubmitter;
    use formkit_notify::ToastQueue;
    use formkit_validate::RuleKind;

    type AcceptFn = fn(&Payload) -> std::result::Result<Receipt, SubmitError>;
    type Accepting = FnSubmitter<AcceptFn>;

    fn accept(_: &Payload) -> std::result::Result<Receipt, SubmitError> {
        Ok(Receipt::default())
    }

    fn pipeline() -> FormPipeline<CustomForm, Accepting> {
        let form = CustomForm::new("contact")
            .field(FieldSpec::new("name", "Name", RuleKind::required()))
            .field(FieldSpec::new("email", "Email", RuleKind::Email));
        let submitter: Accepting = FnSubmitter::new(accept as AcceptFn);
        FormPipeline::new(form, submitter, Notifier::new(ToastQueue::new()))
    }

    #[test]
    fn test_unknown_field() {
        let mut pipeline = pipeline();
        let err = pipeline.input("missing", "x").unwrap_err();
        assert_eq!(
            err,
            FormError::UnknownField {
                form: "contact".to_string(),
                id: "missing".to_string()
            }
        );
        assert!(pipeline.blur("missing").is_err());
        assert!(pipeline.field("missing").is_err());
    }

    #[test]
    fn test_blur_marks_then_input_clears() {
        let mut pipeline = pipeline();
        pipeline.input("email", "nope").unwrap();

        let result = pipeline.blur("email").unwrap();
        assert!(!result.is_valid());
        assert_eq!(
            pipeline.field("email").unwrap().error(),
            Some("Please enter a valid email address")
        );

        pipeline.input("email", "nope@example.com").unwrap();
        assert!(!pipeline.field("email").unwrap().has_error());
    }

    #[test]
    fn test_control_uses_profile_label() {
        let pipeline = pipeline();
        assert_eq!(pipeline.control().label(), "Submit");
        assert_eq!(pipeline.state(), SubmissionState::Idle);
        assert!(pipeline.last_transitions().is_empty());
    }
}

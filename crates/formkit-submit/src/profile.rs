//! Per-form strategy: which fields a form has and what it says.

use formkit_validate::FieldSpec;

use crate::payload::Payload;
use crate::submitter::SubmitError;

/// Toast shown when any field fails validation.
pub const INVALID_FORM_MESSAGE: &str = "Please fix the errors in the form";

/// Toast shown when the external operation fails.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// What a page supplies to the generic pipeline.
pub trait FormProfile {
    /// Form name, used in payloads and logs.
    fn name(&self) -> &str;

    /// Fields in the order they are validated and shown.
    fn fields(&self) -> Vec<FieldSpec>;

    /// Prefix of the confirmation identifier.
    fn confirmation_prefix(&self) -> &str;

    /// Label of the submit control when idle.
    fn submit_label(&self) -> &str {
        "Submit"
    }

    /// Success toast text.
    fn success_message(&self, payload: &Payload, confirmation: &str) -> String;

    /// Failure toast text.
    fn failure_message(&self, _error: &SubmitError) -> String {
        DEFAULT_FAILURE_MESSAGE.to_string()
    }

    /// Runs once after a successful submission, before fields are cleared.
    fn on_success(&mut self, _payload: &Payload) {}
}

type SuccessTemplate = Box<dyn Fn(&Payload, &str) -> String + Send + Sync>;

/// A profile assembled from parts, for forms without a dedicated type.
///
/// ```
/// use formkit_submit::{CustomForm, FormProfile};
/// use formkit_validate::{FieldSpec, RuleKind};
///
/// let form = CustomForm::new("newsletter")
///     .field(FieldSpec::new("email", "Email", RuleKind::Email))
///     .prefix("NEWS")
///     .on_success_message(|payload, _| format!("Subscribed {}", payload.text("email")));
/// assert_eq!(form.fields().len(), 1);
/// ```
pub struct CustomForm {
    name: String,
    fields: Vec<FieldSpec>,
    prefix: String,
    submit_label: String,
    success: SuccessTemplate,
    failure: Option<String>,
}

impl CustomForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            prefix: "REF".to_string(),
            submit_label: "Submit".to_string(),
            success: Box::new(|_, confirmation| format!("Submitted! Reference {confirmation}")),
            failure: None,
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    #[must_use]
    pub fn on_success_message(
        mut self,
        template: impl Fn(&Payload, &str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.success = Box::new(template);
        self
    }

    #[must_use]
    pub fn on_failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

impl FormProfile for CustomForm {
    fn name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Vec<FieldSpec> {
        self.fields.clone()
    }

    fn confirmation_prefix(&self) -> &str {
        &self.prefix
    }

    fn submit_label(&self) -> &str {
        &self.submit_label
    }

    fn success_message(&self, payload: &Payload, confirmation: &str) -> String {
        (self.success)(payload, confirmation)
    }

    fn failure_message(&self, _error: &SubmitError) -> String {
        self.failure
            .clone()
            .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string())
    }
}

//! Form field specs.

use serde::{Deserialize, Serialize};

use crate::result::ValidationResult;
use crate::rules::{RuleKind, validate};

/// Reference to a file the user attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub size_bytes: u64,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }
}

/// Raw value of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    File(FileRef),
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl FieldValue {
    /// Text content, or the file name for attachments.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::File(file) => &file.name,
        }
    }

    /// Whether the value is blank text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::File(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<FileRef> for FieldValue {
    fn from(value: FileRef) -> Self {
        Self::File(value)
    }
}

/// Validate a field value, size-checking attachments.
pub fn validate_value(kind: &RuleKind, value: &FieldValue) -> ValidationResult {
    match (kind, value) {
        (RuleKind::Attachment { max_bytes }, FieldValue::File(file)) => {
            if file.size_bytes > *max_bytes {
                ValidationResult::fail(format!(
                    "File must be smaller than {} MB",
                    max_bytes / (1024 * 1024)
                ))
            } else {
                ValidationResult::ok()
            }
        }
        (RuleKind::Optional(inner), FieldValue::File(_)) => validate_value(inner, value),
        (_, FieldValue::File(file)) => validate(kind, &file.name),
        (_, FieldValue::Text(text)) => validate(kind, text),
    }
}

/// One form input: its identity, current value, rule and error display.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    id: String,
    label: String,
    rule: RuleKind,
    value: FieldValue,
    /// Message currently attached to the field's error display.
    error: Option<String>,
}

impl FieldSpec {
    /// Create an empty field.
    pub fn new(id: impl Into<String>, label: impl Into<String>, rule: RuleKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            rule,
            value: FieldValue::default(),
            error: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = value.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rule(&self) -> &RuleKind {
        &self.rule
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Replace the value, as on an input or change event.
    ///
    /// Any error shown for the previous value is cleared.
    pub fn set_value(&mut self, value: impl Into<FieldValue>) {
        self.value = value.into();
        self.error = None;
    }

    /// Validate the current value without touching the error display.
    pub fn validate(&self) -> ValidationResult {
        validate_value(&self.rule, &self.value)
    }

    /// Validate and update the error display to match, as on blur.
    pub fn check(&mut self) -> ValidationResult {
        let result = self.validate();
        if result.is_valid() {
            self.clear_error();
        } else {
            self.mark_error(result.message());
        }
        result
    }

    pub fn mark_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Empty the value and clear the error display.
    pub fn reset(&mut self) {
        self.value = FieldValue::default();
        self.error = None;
    }
}

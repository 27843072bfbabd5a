//! Validation rules.
//!
//! Each [`RuleKind`] resolves to one plain function from a raw value to a
//! [`ValidationResult`]. Nothing here touches storage or the network and no
//! function returns an error: callers always get a result back.

use std::sync::LazyLock;

use regex::Regex;

use crate::result::ValidationResult;

/// Minimum number of digits in a phone number.
pub const PHONE_MIN_DIGITS: usize = 10;

/// Minimum password length in characters.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Message used when a required text field is blank.
pub const REQUIRED_MESSAGE: &str = "This field is required";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// The validation policy attached to a field.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Non-blank text with optional character bounds.
    RequiredText {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// `local-part@domain.tld` with no whitespace.
    Email,
    /// A choice other than the empty placeholder.
    SelectRequired,
    /// A choice from a fixed list of option values.
    OneOf { options: Vec<String> },
    /// At least ten digits; only digits, spaces, parentheses and hyphens.
    Phone,
    /// At least eight characters.
    Password,
    /// Value must match `regex`; `message` is reported otherwise.
    Pattern { regex: Regex, message: String },
    /// A positive decimal amount of at least `min`.
    Amount { min: f64 },
    /// Blank passes; anything else is checked against the inner rule.
    Optional(Box<RuleKind>),
    /// Optional file upload no larger than `max_bytes`.
    Attachment { max_bytes: u64 },
}

impl RuleKind {
    /// Required text without length bounds.
    pub fn required() -> Self {
        Self::RequiredText {
            min: None,
            max: None,
        }
    }

    /// Required text with inclusive character bounds.
    pub fn text(min: usize, max: usize) -> Self {
        Self::RequiredText {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Required choice restricted to `options`.
    pub fn one_of(options: &[&str]) -> Self {
        Self::OneOf {
            options: options.iter().map(|o| (*o).to_string()).collect(),
        }
    }

    /// Wrap a rule so that a blank value passes.
    pub fn optional(inner: RuleKind) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Build a pattern rule. Fails if `pattern` is not a valid regex.
    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self::Pattern {
            regex: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    /// Whether a blank value fails this rule.
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Optional(_) | Self::Attachment { .. })
    }
}

/// Validate `raw` against `kind`.
pub fn validate(kind: &RuleKind, raw: &str) -> ValidationResult {
    match kind {
        RuleKind::RequiredText { min, max } => validate_required_text(raw, *min, *max),
        RuleKind::Email => validate_email(raw),
        RuleKind::SelectRequired => validate_select(raw),
        RuleKind::OneOf { options } => validate_one_of(raw, options),
        RuleKind::Phone => validate_phone(raw),
        RuleKind::Password => validate_password(raw),
        RuleKind::Pattern { regex, message } => validate_pattern(raw, regex, message),
        RuleKind::Amount { min } => validate_amount(raw, *min),
        RuleKind::Optional(inner) => {
            if raw.trim().is_empty() {
                ValidationResult::ok()
            } else {
                validate(inner, raw)
            }
        }
        // A text value in an attachment slot is a file name the host
        // could not resolve; nothing to size-check.
        RuleKind::Attachment { .. } => ValidationResult::ok(),
    }
}

pub fn validate_required_text(raw: &str, min: Option<usize>, max: Option<usize>) -> ValidationResult {
    let value = raw.trim();
    if value.is_empty() {
        return ValidationResult::fail(REQUIRED_MESSAGE);
    }
    let len = value.chars().count();
    if let Some(min) = min
        && len < min
    {
        return ValidationResult::fail(format!("Must be at least {min} characters"));
    }
    if let Some(max) = max
        && len > max
    {
        return ValidationResult::fail(format!("Must be no more than {max} characters"));
    }
    ValidationResult::ok()
}

pub fn validate_email(raw: &str) -> ValidationResult {
    let value = raw.trim();
    if value.is_empty() {
        return ValidationResult::fail("Email is required");
    }
    if !EMAIL_RE.is_match(value) {
        return ValidationResult::fail("Please enter a valid email address");
    }
    ValidationResult::ok()
}

pub fn validate_select(raw: &str) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::fail("Please select an option");
    }
    ValidationResult::ok()
}

pub fn validate_one_of(raw: &str, options: &[String]) -> ValidationResult {
    let value = raw.trim();
    if value.is_empty() {
        return ValidationResult::fail("Please select an option");
    }
    if !options.iter().any(|option| option == value) {
        return ValidationResult::fail("Please select a valid option");
    }
    ValidationResult::ok()
}

pub fn validate_phone(raw: &str) -> ValidationResult {
    let value = raw.trim();
    if value.is_empty() {
        return ValidationResult::fail("Phone number is required");
    }
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '(' | ')' | '-');
    if !value.chars().all(allowed) {
        return ValidationResult::fail("Phone number contains invalid characters");
    }
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if digits < PHONE_MIN_DIGITS {
        return ValidationResult::fail("Please enter a valid phone number");
    }
    ValidationResult::ok()
}

pub fn validate_password(raw: &str) -> ValidationResult {
    if raw.is_empty() {
        return ValidationResult::fail("Password is required");
    }
    if raw.chars().count() < PASSWORD_MIN_LEN {
        return ValidationResult::fail(format!(
            "Password must be at least {PASSWORD_MIN_LEN} characters"
        ));
    }
    ValidationResult::ok()
}

pub fn validate_pattern(raw: &str, regex: &Regex, message: &str) -> ValidationResult {
    let value = raw.trim();
    if value.is_empty() {
        return ValidationResult::fail(REQUIRED_MESSAGE);
    }
    if !regex.is_match(value) {
        return ValidationResult::fail(message);
    }
    ValidationResult::ok()
}

pub fn validate_amount(raw: &str, min: f64) -> ValidationResult {
    let value = raw.trim();
    if value.is_empty() {
        return ValidationResult::fail("Please enter an amount");
    }
    match parse_amount(value) {
        Some(amount) if amount > 0.0 && amount >= min => ValidationResult::ok(),
        _ => ValidationResult::fail(format!(
            "Please enter an amount of at least ${}",
            format_amount(min)
        )),
    }
}

/// Parse a user-entered amount such as `25`, `$25.50` or `1,000`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

/// Format an amount without a trailing `.00` for whole numbers.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

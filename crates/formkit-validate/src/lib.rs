//! Field validation for formkit forms.
//!
//! Validation is a pure function of a rule and a raw value:
//!
//! ```
//! use formkit_validate::{RuleKind, validate};
//!
//! assert!(validate(&RuleKind::Email, "a@b.co").is_valid());
//! assert!(!validate(&RuleKind::Email, "not-an-email").is_valid());
//! ```
//!
//! [`FieldSpec`] pairs a rule with a field's current value and the error
//! message shown next to it.

mod field;
mod result;
mod rules;

pub use field::{FieldSpec, FieldValue, FileRef, validate_value};
pub use result::ValidationResult;
pub use rules::{
    PASSWORD_MIN_LEN, PHONE_MIN_DIGITS, REQUIRED_MESSAGE, RuleKind, format_amount, parse_amount,
    validate, validate_amount, validate_email, validate_one_of, validate_password,
    validate_pattern, validate_phone, validate_required_text, validate_select,
};

//! Support ticket form.

use formkit_validate::{FieldSpec, RuleKind};

use crate::payload::Payload;
use crate::profile::FormProfile;

/// Largest attachment accepted, in bytes.
pub const ATTACHMENT_MAX_BYTES: u64 = 5 * 1024 * 1024;

pub const CATEGORIES: &[&str] = &["technical", "billing", "account", "feature-request", "other"];

pub const PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];

#[derive(Debug, Clone, Copy, Default)]
pub struct TicketForm;

impl FormProfile for TicketForm {
    fn name(&self) -> &str {
        "ticket"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("name", "Full name", RuleKind::text(2, 100)),
            FieldSpec::new("email", "Email", RuleKind::Email),
            FieldSpec::new("phone", "Phone", RuleKind::optional(RuleKind::Phone)),
            FieldSpec::new("category", "Category", RuleKind::one_of(CATEGORIES)),
            FieldSpec::new("priority", "Priority", RuleKind::one_of(PRIORITIES)),
            FieldSpec::new("subject", "Subject", RuleKind::text(5, 150)),
            FieldSpec::new("description", "Description", RuleKind::text(20, 2000)),
            FieldSpec::new(
                "attachment",
                "Attachment",
                RuleKind::Attachment {
                    max_bytes: ATTACHMENT_MAX_BYTES,
                },
            ),
        ]
    }

    fn confirmation_prefix(&self) -> &str {
        "TKT"
    }

    fn submit_label(&self) -> &str {
        "Submit ticket"
    }

    fn success_message(&self, _payload: &Payload, confirmation: &str) -> String {
        format!("Ticket {confirmation} submitted! We'll get back to you within 24 hours.")
    }
}

//! Donation form.

use formkit_validate::{FieldSpec, RuleKind, format_amount, parse_amount};

use crate::payload::Payload;
use crate::profile::FormProfile;

pub const FREQUENCIES: &[&str] = &["one-time", "monthly", "annually"];

#[derive(Debug, Clone, Copy, Default)]
pub struct DonationForm;

impl FormProfile for DonationForm {
    fn name(&self) -> &str {
        "donation"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("name", "Full name", RuleKind::text(2, 100)),
            FieldSpec::new("email", "Email", RuleKind::Email),
            FieldSpec::new("amount", "Amount", RuleKind::Amount { min: 1.0 }),
            FieldSpec::new("frequency", "Frequency", RuleKind::one_of(FREQUENCIES)),
        ]
    }

    fn confirmation_prefix(&self) -> &str {
        "DON"
    }

    fn submit_label(&self) -> &str {
        "Donate"
    }

    fn success_message(&self, payload: &Payload, _confirmation: &str) -> String {
        let amount = parse_amount(payload.text("amount"))
            .map(format_amount)
            .unwrap_or_else(|| payload.text("amount").to_string());
        format!(
            "Thank you, {}! Your {} donation of ${amount} has been received.",
            payload.text("name"),
            payload.text("frequency"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn payload(amount: &str) -> Payload {
        let mut fields = DonationForm.fields();
        for (field, value) in fields.iter_mut().zip(["Jane", "jane@x.com", amount, "monthly"]) {
            field.set_value(value);
        }
        Payload::from_fields("donation", &fields, Utc::now())
    }

    #[test]
    fn test_success_message() {
        let message = DonationForm.success_message(&payload("25"), "DON-1");
        assert_eq!(
            message,
            "Thank you, Jane! Your monthly donation of $25 has been received."
        );
    }

    #[test]
    fn test_frequency_must_be_listed() {
        let mut fields = DonationForm.fields();
        let frequency = fields.iter_mut().find(|f| f.id() == "frequency").unwrap();

        frequency.set_value("weekly");
        assert_eq!(frequency.check().message(), "Please select a valid option");

        frequency.set_value("annually");
        assert!(frequency.check().is_valid());
    }

    #[test]
    fn test_success_message_normalizes_amount() {
        let message = DonationForm.success_message(&payload("$1,000.5"), "DON-1");
        assert!(message.contains("$1000.50"), "{message}");
    }
}

//! Data handed to the external submission operation.

use chrono::{DateTime, Utc};
use formkit_validate::{FieldSpec, FieldValue, FileRef};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Plain snapshot of a validated form.
///
/// Text values are trimmed. Blank optional fields are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub form: String,
    #[serde(serialize_with = "serialize_ordered")]
    pub values: Vec<(String, FieldValue)>,
    pub submitted_at: DateTime<Utc>,
}

fn serialize_ordered<S: Serializer>(
    values: &[(String, FieldValue)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(values.len()))?;
    for (id, value) in values {
        map.serialize_entry(id, value)?;
    }
    map.end()
}

impl Payload {
    /// Build a payload from fields in their declared order.
    pub fn from_fields(form: &str, fields: &[FieldSpec], submitted_at: DateTime<Utc>) -> Self {
        let values = fields
            .iter()
            .filter_map(|field| {
                let value = match field.value() {
                    FieldValue::Text(text) => FieldValue::Text(text.trim().to_string()),
                    FieldValue::File(file) => FieldValue::File(file.clone()),
                };
                if value.is_empty() && !field.rule().is_required() {
                    return None;
                }
                Some((field.id().to_string(), value))
            })
            .collect();
        Self {
            form: form.to_string(),
            values,
            submitted_at,
        }
    }

    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(field, _)| field == id)
            .map(|(_, value)| value)
    }

    /// Text value of a field, empty if absent.
    pub fn text(&self, id: &str) -> &str {
        self.get(id).map(FieldValue::as_text).unwrap_or("")
    }

    pub fn file(&self, id: &str) -> Option<&FileRef> {
        match self.get(id) {
            Some(FieldValue::File(file)) => Some(file),
            _ => None,
        }
    }

    /// Field ids present in the payload, in order.
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(id, _)| id.as_str())
    }
}

/// What the external operation resolved with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Server-side reference, when the operation returns one.
    pub reference: Option<String>,
}

/// Cosmetic confirmation identifier: `PREFIX-` + the last six digits of the
/// Unix time in milliseconds + a three-digit suffix. Not unique across sessions.
pub fn confirmation_id(prefix: &str, now: DateTime<Utc>, suffix: u16) -> String {
    let tail = now.timestamp_millis().rem_euclid(1_000_000);
    format!("{prefix}-{tail:06}{:03}", suffix % 1000)
}

/// A random suffix in `100..=999`.
pub fn random_suffix() -> u16 {
    let random = uuid::Uuid::new_v4().as_u128();
    100 + (random % 900) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use formkit_validate::RuleKind;

    fn at_millis(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_confirmation_id_format() {
        let id = confirmation_id("TKT", at_millis(1_700_000_123_456), 42);
        assert_eq!(id, "TKT-123456042");
    }

    #[test]
    fn test_confirmation_id_pads_tail() {
        let id = confirmation_id("DON", at_millis(5_000_000_000_007), 999);
        assert_eq!(id, "DON-000007999");
    }

    #[test]
    fn test_random_suffix_range() {
        for _ in 0..200 {
            let suffix = random_suffix();
            assert!((100..=999).contains(&suffix));
        }
    }

    #[test]
    fn test_payload_trims_and_skips_blank_optionals() {
        let fields = vec![
            FieldSpec::new("name", "Name", RuleKind::required()).with_value("  Jane "),
            FieldSpec::new("phone", "Phone", RuleKind::optional(RuleKind::Phone)).with_value(" "),
            FieldSpec::new(
                "attachment",
                "Attachment",
                RuleKind::Attachment { max_bytes: 10 },
            )
            .with_value(FileRef::new("a.txt", 3)),
        ];
        let payload = Payload::from_fields("ticket", &fields, at_millis(0));

        assert_eq!(payload.text("name"), "Jane");
        assert!(payload.get("phone").is_none());
        assert_eq!(payload.file("attachment").map(|f| f.size_bytes), Some(3));
        assert_eq!(payload.field_ids().collect::<Vec<_>>(), vec!["name", "attachment"]);
    }

    #[test]
    fn test_payload_json_keeps_field_order() {
        let fields = vec![
            FieldSpec::new("zeta", "Z", RuleKind::required()).with_value("z"),
            FieldSpec::new("alpha", "A", RuleKind::required()).with_value("a"),
        ];
        let payload = Payload::from_fields("custom", &fields, at_millis(0));
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""values":{"zeta":"z","alpha":"a"}"#), "{json}");
        assert!(json.contains(r#""form":"custom""#));
    }
}

//! Record ("notification") model decoded from loosely-typed documents.
//!
//! DESIGN
//! ======
//! Documents in the hosted store follow no enforced schema and different
//! deployments name the same logical field differently. Decoding therefore goes
//! through a [`RecordSchema`] listing candidate paths per field; the first
//! non-empty candidate wins. Card verification values, PINs and one-time codes
//! are never decoded.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::config::RecordSchema;

/// Operator-assigned disposition of a record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl Status {
    /// Value written to the status field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parse a stored status. Unknown or empty values read as `Pending`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

/// Card-like fields present on some records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInfo {
    /// Full card number as stored. Render through [`mask_card_number`].
    pub number: String,
    pub holder: Option<String>,
    pub expiry: Option<String>,
    pub bank: Option<String>,
    pub prefix: Option<String>,
    pub network: Option<String>,
}

impl CardInfo {
    /// Display form of the card number.
    #[must_use]
    pub fn masked_number(&self) -> String {
        mask_card_number(&self.number)
    }
}

/// Personal-identity-like fields present on some records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub identity: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub plate_type: Option<String>,
}

impl PersonalInfo {
    fn is_empty(&self) -> bool {
        self.identity.is_none()
            && self.full_name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.plate_type.is_none()
    }
}

/// One record as displayed and triaged by the operator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Document id (last segment of the document name).
    pub id: String,
    /// Creation time as stored, if any.
    pub created_date: Option<String>,
    /// Creation time in milliseconds since the Unix epoch, when parseable.
    pub created_ms: Option<i64>,
    pub status: Status,
    /// Soft-delete marker.
    pub hidden: bool,
    pub country: Option<String>,
    pub current_page: Option<String>,
    pub violation_value: Option<String>,
    pub card: Option<CardInfo>,
    pub personal: Option<PersonalInfo>,
}

impl Notification {
    /// Decode a document body into a record using `schema` to locate fields.
    #[must_use]
    pub fn from_document(id: &str, fields: &Map<String, Value>, schema: &RecordSchema) -> Self {
        let created_date = first_text(fields, &schema.created_date);
        let created_ms = created_date.as_deref().and_then(parse_timestamp_ms);
        let status = first_text(fields, &schema.status).map_or(Status::Pending, |s| Status::parse(&s));
        let hidden = schema
            .hidden
            .iter()
            .find_map(|path| lookup(fields, path))
            .is_some_and(value_is_truthy);

        let card = first_text(fields, &schema.card_number).map(|number| CardInfo {
            number,
            holder: first_text(fields, &schema.card_holder),
            expiry: first_text(fields, &schema.card_expiry).or_else(|| {
                let month = first_text(fields, &schema.card_expiry_month)?;
                let year = first_text(fields, &schema.card_expiry_year)?;
                Some(format!("{month}/{year}"))
            }),
            bank: first_text(fields, &schema.bank),
            prefix: first_text(fields, &schema.card_prefix),
            network: first_text(fields, &schema.network),
        });

        let personal = PersonalInfo {
            identity: first_text(fields, &schema.identity),
            full_name: first_text(fields, &schema.full_name),
            phone: first_text(fields, &schema.phone),
            email: first_text(fields, &schema.email),
            plate_type: first_text(fields, &schema.plate_type),
        };

        Self {
            id: id.to_owned(),
            created_date,
            created_ms,
            status,
            hidden,
            country: first_text(fields, &schema.country),
            current_page: first_text(fields, &schema.current_page),
            violation_value: first_text(fields, &schema.violation_value),
            card,
            personal: (!personal.is_empty()).then_some(personal),
        }
    }

    /// True when the record carries a non-blank card number.
    #[must_use]
    pub fn has_card_number(&self) -> bool {
        self.card.as_ref().is_some_and(|c| !c.number.trim().is_empty())
    }

    /// True when the record carries a personal identity value.
    #[must_use]
    pub fn has_identity(&self) -> bool {
        self.personal.as_ref().is_some_and(|p| p.identity.is_some())
    }

    /// Records worth announcing with the notification sound.
    #[must_use]
    pub fn is_notable(&self) -> bool {
        self.has_card_number() || self.has_identity()
    }
}

/// Sort newest-first by creation time.
///
/// Records without a parseable timestamp keep their relative order and sort
/// after timestamped ones.
pub fn sort_newest_first(records: &mut [Notification]) {
    records.sort_by(|a, b| match (a.created_ms, b.created_ms) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Mask all but the last four digits of a card number.
///
/// Non-digit separators are dropped. Numbers with four or fewer digits are
/// fully masked.
#[must_use]
pub fn mask_card_number(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }
    if digits.len() <= 4 {
        return "•".repeat(digits.len());
    }
    let tail: String = digits[digits.len() - 4..].iter().collect();
    format!("•••• {tail}")
}

/// Parse an RFC 3339 timestamp into epoch milliseconds.
#[must_use]
pub fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    let parsed = OffsetDateTime::parse(raw.trim(), &Rfc3339).ok()?;
    i64::try_from(parsed.unix_timestamp_nanos() / 1_000_000).ok()
}

/// Resolve a dotted path (`cardDetails.number`) inside a document body.
#[must_use]
pub fn lookup<'a>(fields: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = fields.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Text form of a scalar value. Blank strings, null, objects and arrays yield `None`.
#[must_use]
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn first_text(fields: &Map<String, Value>, candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .find_map(|path| lookup(fields, path).and_then(value_as_text))
}

fn value_is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.trim(), "true" | "1"),
        Value::Number(n) => n.as_i64().is_some_and(|v| v != 0),
        _ => false,
    }
}

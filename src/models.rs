use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the booking API. Some deployments hand out
/// integers, others strings; both are treated as opaque.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum BookingId {
    Number(i64),
    Text(String),
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingId::Number(value) => write!(f, "{value}"),
            BookingId::Text(value) => f.write_str(value),
        }
    }
}

/// A booking exactly as the API returns it. Everything is optional; older
/// records use `url` or `detailsUrl` instead of `link`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct RawBooking {
    pub id: Option<BookingId>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub name: Option<String>,
    pub venue: Option<String>,
    pub link: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "detailsUrl")]
    pub details_url: Option<String>,
}

/// Canonical booking record: `date` and `name` are guaranteed present,
/// `link` is empty when the record has none.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Booking {
    pub id: Option<BookingId>,
    pub date: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub name: String,
    pub venue: String,
    pub link: String,
}

/// Write payload for create/update. Serializes with `null` for absent
/// optionals, matching what the API expects.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BookingDraft {
    pub date: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub name: String,
    pub venue: String,
    pub link: Option<String>,
}

/// Placeholder listings shown on the landing page when the API is
/// unreachable.
pub fn sample_bookings() -> Vec<Booking> {
    vec![
        Booking {
            id: None,
            date: "2025-09-20".to_string(),
            start: Some("22:00".to_string()),
            end: Some("23:30".to_string()),
            name: "Books & Beats".to_string(),
            venue: "Onkrooid, Arendonk".to_string(),
            link: "https://example.com/books-and-beats".to_string(),
        },
        Booking {
            id: None,
            date: "2025-10-02".to_string(),
            start: Some("23:00".to_string()),
            end: Some("03:00".to_string()),
            name: "Girls Like DJs".to_string(),
            venue: "Kokorico, Lievegem".to_string(),
            link: "https://example.com/girls-like-djs".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_id_accepts_numbers_and_strings() {
        let numeric: BookingId = serde_json::from_str("7").expect("numeric id");
        assert_eq!(numeric, BookingId::Number(7));
        assert_eq!(numeric.to_string(), "7");

        let text: BookingId = serde_json::from_str("\"a1b2\"").expect("string id");
        assert_eq!(text, BookingId::Text("a1b2".to_string()));
        assert_eq!(text.to_string(), "a1b2");
    }

    #[test]
    fn raw_booking_tolerates_sparse_payloads() {
        let raw: RawBooking = serde_json::from_str("{}").expect("empty object");
        assert!(raw.id.is_none());
        assert!(raw.date.is_none());

        let raw: RawBooking = serde_json::from_str(
            r#"{"id":3,"date":"2025-09-20","name":"Gig","detailsUrl":"https://x"}"#,
        )
        .expect("partial object");
        assert_eq!(raw.id, Some(BookingId::Number(3)));
        assert_eq!(raw.details_url.as_deref(), Some("https://x"));
        assert!(raw.link.is_none());
    }

    #[test]
    fn draft_serializes_null_for_absent_optionals() {
        let draft = BookingDraft {
            date: "2025-09-20".to_string(),
            start: None,
            end: None,
            name: "Gig".to_string(),
            venue: "Hall".to_string(),
            link: None,
        };
        let json = serde_json::to_value(&draft).expect("serialize draft");
        assert_eq!(json["start"], serde_json::Value::Null);
        assert_eq!(json["link"], serde_json::Value::Null);
        assert_eq!(json["venue"], "Hall");
    }
}

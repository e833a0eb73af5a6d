use crate::models::{Booking, RawBooking};

/// Why a fetched record was dropped from the displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    MissingDate,
    MissingName,
}

fn present(field: &Option<String>) -> bool {
    matches!(field, Some(value) if !value.is_empty())
}

/// Maps a wire record onto the canonical shape. `link` falls back through
/// the older `url` and `detailsUrl` field names; records without a usable
/// `date` or `name` are rejected.
pub fn normalize(raw: RawBooking) -> Result<Booking, Rejected> {
    if !present(&raw.date) {
        return Err(Rejected::MissingDate);
    }
    if !present(&raw.name) {
        return Err(Rejected::MissingName);
    }

    let link = raw
        .link
        .or(raw.url)
        .or(raw.details_url)
        .unwrap_or_default();

    Ok(Booking {
        id: raw.id,
        date: raw.date.unwrap_or_default(),
        start: raw.start,
        end: raw.end,
        name: raw.name.unwrap_or_default(),
        venue: raw.venue.unwrap_or_default(),
        link,
    })
}

/// Normalizes a full API response, silently dropping rejects.
pub fn normalize_all(raw: Vec<RawBooking>) -> Vec<Booking> {
    raw.into_iter()
        .filter_map(|record| normalize(record).ok())
        .collect()
}

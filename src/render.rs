use chrono_tz::Tz;
use serde::Serialize;

use crate::calendar::google_calendar_url;
use crate::models::{Booking, BookingId};
use crate::upcoming::parse_event_date;

pub const DATE_TBD: &str = "Date TBD";
pub const TIME_TBD: &str = "Time TBD";

/// One booking prepared for display. Plain data so any front end (or a
/// template) can consume it; `link` is `None` when the record has no URL.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingView {
    pub id: Option<BookingId>,
    pub name: String,
    pub venue: String,
    pub date_label: String,
    pub time_label: String,
    pub link: Option<String>,
    pub calendar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListingView {
    pub cards: Vec<BookingView>,
    /// Whether the "no upcoming events" indicator should be shown.
    pub empty: bool,
    pub count_label: String,
}

/// `"Sat, Sep 20, 2025"` for a well-formed date; the TBD constant for the
/// empty string, the `"00:00"` placeholder, or anything unparsable.
pub fn format_date_label(raw: &str) -> String {
    if raw.is_empty() || raw == "00:00" {
        return DATE_TBD.to_string();
    }
    match parse_event_date(raw) {
        Some(date) => date.format("%a, %b %-d, %Y").to_string(),
        None => DATE_TBD.to_string(),
    }
}

pub fn format_time_label(start: Option<&str>, end: Option<&str>) -> String {
    match (start, end) {
        (Some(start), Some(end)) => format!("{start} – {end}"),
        (Some(start), None) => start.to_string(),
        (None, Some(end)) => end.to_string(),
        (None, None) => TIME_TBD.to_string(),
    }
}

pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 event".to_string()
    } else {
        format!("{count} events")
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn booking_view(booking: &Booking, tz: Tz) -> BookingView {
    let link = if booking.link.is_empty() {
        None
    } else {
        Some(booking.link.clone())
    };
    let calendar_url = google_calendar_url(
        &booking.name,
        &booking.date,
        booking.start.as_deref(),
        booking.end.as_deref(),
        &booking.venue,
        tz,
    );
    BookingView {
        id: booking.id.clone(),
        name: booking.name.clone(),
        venue: booking.venue.clone(),
        date_label: format_date_label(&booking.date),
        time_label: format_time_label(booking.start.as_deref(), booking.end.as_deref()),
        link,
        calendar_url,
    }
}

/// Pure projection of an ordered booking list into its display form.
pub fn render(bookings: &[Booking], tz: Tz) -> ListingView {
    let cards: Vec<BookingView> = bookings
        .iter()
        .map(|booking| booking_view(booking, tz))
        .collect();
    ListingView {
        empty: cards.is_empty(),
        count_label: count_label(cards.len()),
        cards,
    }
}

fn event_item_html(card: &BookingView) -> String {
    let link = match &card.link {
        Some(url) => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"link\">↗</a>",
            escape_html(url)
        ),
        None => "-".to_string(),
    };
    format!(
        concat!(
            "<div class=\"event-item\">",
            "<div class=\"event-name\">{}</div>",
            "<div class=\"event-date\">{}</div>",
            "<div class=\"event-time\">{}</div>",
            "<div class=\"event-venue\">{}</div>",
            "<div class=\"event-link\">{}</div>",
            "</div>"
        ),
        escape_html(&card.name),
        escape_html(&card.date_label),
        escape_html(&card.time_label),
        escape_html(&card.venue),
        link,
    )
}

/// Thin markup adapter over the view model; every untrusted string goes
/// through `escape_html` before touching structural markup.
pub fn render_html(view: &ListingView) -> String {
    view.cards.iter().map(event_item_html).collect()
}

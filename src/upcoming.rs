use chrono::NaiveDate;

use crate::models::Booking;

/// Strict `YYYY-MM-DD` parse; anything else (including the `"00:00"`
/// placeholder some records carry) is not a calendar date.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Ascending by the raw `date` string. Lexicographic comparison matches
/// chronological order for well-formed dates, and the stable sort keeps
/// same-day entries in input order; `start`/`end` are not consulted.
pub fn sort_by_date(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| a.date.cmp(&b.date));
}

/// Keeps bookings happening on or after `today` (today inclusive), dropping
/// anything whose date does not parse, then sorts for display.
pub fn select_upcoming(today: NaiveDate, bookings: Vec<Booking>) -> Vec<Booking> {
    let mut kept: Vec<Booking> = bookings
        .into_iter()
        .filter(|booking| {
            parse_event_date(&booking.date)
                .map(|date| date >= today)
                .unwrap_or(false)
        })
        .collect();
    sort_by_date(&mut kept);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(date: &str, name: &str) -> Booking {
        Booking {
            id: None,
            date: date.to_string(),
            start: None,
            end: None,
            name: name.to_string(),
            venue: "Hall".to_string(),
            link: String::new(),
        }
    }

    fn day(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("test date")
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(parse_event_date("2025-09-20"), Some(day("2025-09-20")));
        assert_eq!(parse_event_date("00:00"), None);
        assert_eq!(parse_event_date("not-a-date"), None);
        assert_eq!(parse_event_date(""), None);
    }

    #[test]
    fn today_is_included_and_past_excluded() {
        let today = day("2025-09-20");
        let kept = select_upcoming(
            today,
            vec![
                booking("2025-09-19", "yesterday"),
                booking("2025-09-20", "tonight"),
                booking("2025-09-21", "tomorrow"),
            ],
        );
        let names: Vec<&str> = kept.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["tonight", "tomorrow"]);
    }

    #[test]
    fn unparsable_dates_are_filtered_out() {
        let kept = select_upcoming(
            day("2025-09-20"),
            vec![booking("00:00", "tbd"), booking("2025-09-25", "real")],
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "real");
    }

    #[test]
    fn sorts_lexicographically_ascending() {
        let kept = select_upcoming(
            day("2025-09-01"),
            vec![booking("2025-10-02", "later"), booking("2025-09-20", "sooner")],
        );
        let dates: Vec<&str> = kept.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-09-20", "2025-10-02"]);
    }

    #[test]
    fn same_day_entries_keep_input_order() {
        let mut bookings = vec![
            booking("2025-09-20", "first"),
            booking("2025-09-20", "second"),
            booking("2025-09-10", "earlier"),
        ];
        sort_by_date(&mut bookings);
        let names: Vec<&str> = bookings.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["earlier", "first", "second"]);
    }
}

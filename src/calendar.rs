use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use reqwest::Url;

use crate::upcoming::parse_event_date;

const CALENDAR_BASE: &str = "https://calendar.google.com/calendar/render";
const DEFAULT_START: &str = "20:00";
const DEFAULT_DURATION_HOURS: i64 = 2;
const DETAILS_TEXT: &str = "gig-desk booking";

fn parse_hhmm(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M").ok()
}

fn resolve_local(date: NaiveDate, time: NaiveTime, tz: Tz) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(dt, _) => Some(dt),
        LocalResult::None => None,
    }
}

fn compact_utc(dt: DateTime<Tz>) -> String {
    dt.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
}

/// Builds an add-to-Google-Calendar URL for one booking.
///
/// The start instant is the local `date` + `start` (20:00 when the listing
/// has no start time). A given `end` at or before the start means the show
/// runs past midnight, so the end moves to the same wall-clock time on the
/// next calendar day; with no `end` the event is two hours long. Both
/// instants are converted to UTC for the `dates` range parameter.
///
/// Returns `None` when the date or a time cannot be resolved in `tz`, so
/// callers simply omit the affordance instead of linking a broken invite.
pub fn google_calendar_url(
    name: &str,
    date: &str,
    start: Option<&str>,
    end: Option<&str>,
    venue: &str,
    tz: Tz,
) -> Option<String> {
    let date = parse_event_date(date)?;
    let start_time = parse_hhmm(start.unwrap_or(DEFAULT_START))?;
    let start_local = resolve_local(date, start_time, tz)?;

    let end_local = match end {
        Some(raw) => {
            let end_time = parse_hhmm(raw)?;
            let same_day = resolve_local(date, end_time, tz)?;
            if same_day <= start_local {
                resolve_local(date.succ_opt()?, end_time, tz)?
            } else {
                same_day
            }
        }
        None => start_local + Duration::hours(DEFAULT_DURATION_HOURS),
    };

    let title = if name.trim().is_empty() { "Event" } else { name };
    let mut url = Url::parse(CALENDAR_BASE).ok()?;
    url.query_pairs_mut()
        .append_pair("action", "TEMPLATE")
        .append_pair("text", title)
        .append_pair(
            "dates",
            &format!("{}/{}", compact_utc(start_local), compact_utc(end_local)),
        )
        .append_pair("details", DETAILS_TEXT)
        .append_pair("location", venue);
    Some(url.into())
}

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::api::BookingApi;
use crate::models::{Booking, BookingDraft, BookingId};
use crate::utils::clean_text;

static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid time regex"));

const AUTO_DISMISS: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// User-visible feedback for one operation. Success and info notices fade
/// out on their own; errors stay until dismissed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn auto_dismiss_after(&self) -> Option<Duration> {
        match self.severity {
            Severity::Success | Severity::Info => Some(AUTO_DISMISS),
            Severity::Error => None,
        }
    }
}

/// Raw form fields as typed by the admin, before any validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub date: String,
    pub start: String,
    pub end: String,
    pub name: String,
    pub venue: String,
    pub link: String,
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Checks every rule and reports all violations at once, so the admin can
/// fix the whole form in one pass.
pub fn validate(input: &FormInput) -> Result<BookingDraft, Vec<String>> {
    let mut problems = Vec::new();

    let name = clean_text(&input.name);
    let venue = clean_text(&input.venue);
    let date = input.date.trim().to_string();
    if name.is_empty() || venue.is_empty() || date.is_empty() {
        problems.push("Please fill in all required fields (Name, Venue, Date)".to_string());
    }

    let start = optional(&input.start);
    if let Some(value) = &start {
        if !TIME_RE.is_match(value) {
            problems.push(format!("Start time must be HH:MM, got \"{value}\""));
        }
    }
    let end = optional(&input.end);
    if let Some(value) = &end {
        if !TIME_RE.is_match(value) {
            problems.push(format!("End time must be HH:MM, got \"{value}\""));
        }
    }

    let link = optional(&input.link);
    if let Some(value) = &link {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            problems.push("Link must start with http:// or https://".to_string());
        }
    }

    if problems.is_empty() {
        Ok(BookingDraft {
            date,
            start,
            end,
            name,
            venue,
            link,
        })
    } else {
        Err(problems)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Phase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// True when the repository accepted the write and the display list
    /// should be re-fetched.
    pub saved: bool,
    pub notice: Notice,
}

/// Create/update orchestration with its state held explicitly: the active
/// edit target and whether a submit is in flight. No globals, no captured
/// document handles.
#[derive(Debug, Default)]
pub struct AdminForm {
    edit_id: Option<BookingId>,
    phase: Phase,
}

impl AdminForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(&self) -> Option<&BookingId> {
        self.edit_id.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Switches the form to edit mode for a persisted booking and returns
    /// the field values to prefill. Records without an id cannot be edited.
    pub fn begin_edit(&mut self, booking: &Booking) -> Option<FormInput> {
        let id = booking.id.clone()?;
        self.edit_id = Some(id);
        Some(FormInput {
            date: booking.date.clone(),
            start: booking.start.clone().unwrap_or_default(),
            end: booking.end.clone().unwrap_or_default(),
            name: booking.name.clone(),
            venue: booking.venue.clone(),
            link: booking.link.clone(),
        })
    }

    pub fn cancel_edit(&mut self) -> Notice {
        self.edit_id = None;
        Notice::info("Edit cancelled")
    }

    /// Validates and dispatches one create or update. Invalid input never
    /// reaches the network; a repository failure leaves the edit target (and
    /// the caller's form contents) intact for correction.
    pub fn submit(&mut self, api: &BookingApi, input: &FormInput) -> SubmitOutcome {
        if self.is_submitting() {
            return SubmitOutcome {
                saved: false,
                notice: Notice::error("A save is already in progress"),
            };
        }

        let draft = match validate(input) {
            Ok(draft) => draft,
            Err(problems) => {
                return SubmitOutcome {
                    saved: false,
                    notice: Notice::error(problems.join("; ")),
                }
            }
        };

        let editing = self.edit_id.is_some();
        self.phase = Phase::Submitting;
        let result = match &self.edit_id {
            Some(id) => api.update(id, &draft).map(|_| ()),
            None => api.create(&draft).map(|_| ()),
        };
        self.phase = Phase::Idle;

        match result {
            Ok(()) => {
                self.edit_id = None;
                SubmitOutcome {
                    saved: true,
                    notice: Notice::success(if editing {
                        "Event updated successfully!"
                    } else {
                        "Event added successfully!"
                    }),
                }
            }
            Err(err) => SubmitOutcome {
                saved: false,
                notice: Notice::error(format!("Failed to save event: {err}")),
            },
        }
    }
}

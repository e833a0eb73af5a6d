pub mod admin;
pub mod api;
pub mod calendar;
pub mod config;
pub mod models;
pub mod normalize;
pub mod render;
pub mod upcoming;
pub mod utils;

use chrono::Utc;
use chrono_tz::Tz;

use admin::{AdminForm, FormInput, Notice};
use api::BookingApi;
use config::{AppConfig, ConfigStore};
use models::{sample_bookings, Booking, BookingId};
use normalize::normalize_all;
use render::{render, ListingView};
use upcoming::{select_upcoming, sort_by_date};

/// What one admin operation produced: the notices to show, in display
/// order, and the list view to paint.
#[derive(Debug)]
pub struct Feedback {
    pub notices: Vec<Notice>,
    pub view: ListingView,
}

fn today_in(tz: Tz) -> chrono::NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Landing-page listing: upcoming bookings only, oldest first. The landing
/// page never surfaces failures; when the API is unreachable it falls back
/// to the built-in sample listings.
pub fn load_landing(api: &BookingApi, tz: Tz) -> ListingView {
    let bookings = match api.list() {
        Ok(raw) => normalize_all(raw),
        Err(err) => {
            eprintln!("booking fetch failed, using samples: {err}");
            sample_bookings()
        }
    };
    let upcoming = select_upcoming(today_in(tz), bookings);
    render(&upcoming, tz)
}

/// The admin panel: owns the config store, the repository client, the form
/// state machine, and the in-memory booking list. The list belongs to the
/// reload path alone and is replaced wholesale on every successful fetch,
/// never patched in place.
pub struct AdminPanel {
    config: ConfigStore,
    api: BookingApi,
    pub form: AdminForm,
    bookings: Vec<Booking>,
    tz: Tz,
}

impl AdminPanel {
    pub fn new() -> Self {
        Self::with_store(ConfigStore::load())
    }

    pub fn with_store(config: ConfigStore) -> Self {
        let snapshot = config.read();
        Self {
            api: BookingApi::from_config(&snapshot),
            tz: snapshot.timezone(),
            config,
            form: AdminForm::new(),
            bookings: Vec::new(),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.read()
    }

    /// Points the panel at a different deployment and persists the choice.
    pub fn set_api_base(&mut self, base: &str) -> Result<(), Notice> {
        let trimmed = base.trim();
        if trimmed.is_empty() {
            return Err(Notice::error("API base address is required"));
        }
        let updated = self
            .config
            .update(|config| config.api_base = trimmed.to_string())
            .map_err(|err| Notice::error(format!("Failed to save settings: {err:#}")))?;
        self.api = BookingApi::from_config(&updated);
        Ok(())
    }

    /// Re-fetches the whole list. The admin table shows everything the API
    /// returns, past dates and "Date TBD" rows included, sorted by date.
    pub fn reload(&mut self) -> Feedback {
        match self.api.list() {
            Ok(raw) => {
                let mut bookings = normalize_all(raw);
                sort_by_date(&mut bookings);
                self.bookings = bookings;
                Feedback {
                    notices: Vec::new(),
                    view: render(&self.bookings, self.tz),
                }
            }
            Err(err) => {
                self.bookings.clear();
                let mut view = render(&self.bookings, self.tz);
                view.count_label = "Error".to_string();
                Feedback {
                    notices: vec![Notice::error(format!("Failed to load events: {err}"))],
                    view,
                }
            }
        }
    }

    /// Form submit: validate, create or update, then re-fetch on success.
    /// When the save lands but the re-fetch fails, both notices are
    /// returned in the order they would be shown.
    pub fn submit(&mut self, input: &FormInput) -> Feedback {
        let outcome = self.form.submit(&self.api, input);
        if !outcome.saved {
            return Feedback {
                notices: vec![outcome.notice],
                view: render(&self.bookings, self.tz),
            };
        }
        let mut reloaded = self.reload();
        reloaded.notices.insert(0, outcome.notice);
        reloaded
    }

    /// Deletes one booking. On failure the previously rendered list is
    /// returned unchanged alongside the error notice.
    pub fn delete(&mut self, id: &BookingId) -> Feedback {
        match self.api.delete(id) {
            Ok(()) => {
                let mut reloaded = self.reload();
                reloaded
                    .notices
                    .insert(0, Notice::success("Event deleted successfully!"));
                reloaded
            }
            Err(err) => Feedback {
                notices: vec![Notice::error(format!("Failed to delete event: {err}"))],
                view: render(&self.bookings, self.tz),
            },
        }
    }

    /// Looks the booking up in the current list and switches the form into
    /// edit mode, returning the prefilled fields.
    pub fn begin_edit(&mut self, id: &BookingId) -> Result<FormInput, Notice> {
        let booking = self
            .bookings
            .iter()
            .find(|booking| booking.id.as_ref() == Some(id))
            .cloned();
        match booking {
            Some(booking) => self
                .form
                .begin_edit(&booking)
                .ok_or_else(|| Notice::error("Event not found")),
            None => Err(Notice::error("Event not found")),
        }
    }

    pub fn cancel_edit(&mut self) -> Notice {
        self.form.cancel_edit()
    }
}

impl Default for AdminPanel {
    fn default() -> Self {
        Self::new()
    }
}

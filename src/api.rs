use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use reqwest::Url;

use crate::config::{AppConfig, PathStyle};
use crate::models::{BookingDraft, BookingId, RawBooking};

static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(20))
        .user_agent("gig-desk/0.1")
        .build()
        .expect("http client")
});

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {status}")]
    RequestFailed { status: u16 },
    #[error("response decode failed: {0}")]
    Decode(String),
    #[error("invalid api base: {0}")]
    BadBase(String),
}

/// Thin client for the remote booking store. One request per call, no
/// retries, no caching; the server remains the only source of truth.
pub struct BookingApi {
    base: String,
    style: PathStyle,
}

impl BookingApi {
    pub fn new(base: impl Into<String>, style: PathStyle) -> Self {
        Self {
            base: base.into(),
            style,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base.clone(), config.path_style)
    }

    pub fn list(&self) -> Result<Vec<RawBooking>, ApiError> {
        let url = self.collection_url()?;
        let response = send(CLIENT.get(url))?;
        decode(response)
    }

    pub fn create(&self, draft: &BookingDraft) -> Result<RawBooking, ApiError> {
        let url = self.collection_url()?;
        let response = send(CLIENT.post(url).json(draft))?;
        decode(response)
    }

    pub fn update(&self, id: &BookingId, draft: &BookingDraft) -> Result<RawBooking, ApiError> {
        let url = self.item_url(id)?;
        let response = send(CLIENT.put(url).json(draft))?;
        decode(response)
    }

    pub fn delete(&self, id: &BookingId) -> Result<(), ApiError> {
        let url = self.item_url(id)?;
        send(CLIENT.delete(url))?;
        Ok(())
    }

    fn collection_url(&self) -> Result<Url, ApiError> {
        self.url_for(match self.style {
            PathStyle::Events => "/events/".to_string(),
            PathStyle::ApiBookings => "/api/bookings".to_string(),
        })
    }

    fn item_url(&self, id: &BookingId) -> Result<Url, ApiError> {
        self.url_for(match self.style {
            PathStyle::Events => format!("/events/{id}"),
            PathStyle::ApiBookings => format!("/api/bookings/{id}"),
        })
    }

    fn url_for(&self, path: String) -> Result<Url, ApiError> {
        let joined = format!("{}{}", self.base.trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|err| ApiError::BadBase(format!("{joined}: {err}")))
    }
}

fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request
        .header(ACCEPT, "application/json")
        .send()
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::RequestFailed {
            status: status.as_u16(),
        });
    }
    Ok(response)
}

fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json().map_err(|err| ApiError::Decode(err.to_string()))
}

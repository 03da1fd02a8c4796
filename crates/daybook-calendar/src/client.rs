//! REST client for the calendar event service.

use std::sync::Arc;

use tracing::instrument;

use crate::error::CalendarError;
use crate::types::{Event, EventDraft};

const EVENTS_PATH: &str = "/api/calendar/events";

#[derive(Debug, Clone)]
pub struct CalendarClient {
    client: Arc<reqwest::Client>,
    base_url: String,
}

impl CalendarClient {
    /// Create a client for the service rooted at `base_url`.
    ///
    /// No request timeout is set; the transport default applies.
    pub fn new(base_url: &str) -> Result<Self, CalendarError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn events_url(&self) -> String {
        format!("{}{}", self.base_url, EVENTS_PATH)
    }

    fn event_url(&self, event_id: &str) -> String {
        format!("{}/{}", self.events_url(), urlencoding::encode(event_id))
    }

    /// List every event the service knows about.
    #[instrument(skip(self), level = "debug")]
    pub async fn list_events(&self) -> Result<Vec<Event>, CalendarError> {
        let response = self.client.get(self.events_url()).send().await?;
        let entries = self.handle_response(response).await?;
        Ok(decode_events(entries))
    }

    /// List events restricted to the current day.
    #[instrument(skip(self), level = "debug")]
    pub async fn list_today_events(&self) -> Result<Vec<Event>, CalendarError> {
        let url = format!("{}/today", self.events_url());
        let response = self.client.get(&url).send().await?;
        let entries = self.handle_response(response).await?;
        Ok(decode_events(entries))
    }

    /// Create a new event.
    #[instrument(skip(self, draft), fields(summary = %draft.summary), level = "info")]
    pub async fn create_event(&self, draft: &EventDraft) -> Result<(), CalendarError> {
        let response = self
            .client
            .post(self.events_url())
            .json(draft)
            .send()
            .await?;

        self.expect_success(response).await
    }

    /// Replace an existing event with the draft.
    #[instrument(skip(self, draft), fields(summary = %draft.summary), level = "info")]
    pub async fn update_event(
        &self,
        event_id: &str,
        draft: &EventDraft,
    ) -> Result<(), CalendarError> {
        let response = self
            .client
            .put(self.event_url(event_id))
            .json(draft)
            .send()
            .await?;

        self.expect_success(response).await
    }

    /// Delete an event.
    #[instrument(skip(self), level = "info")]
    pub async fn delete_event(&self, event_id: &str) -> Result<(), CalendarError> {
        let response = self
            .client
            .delete(self.event_url(event_id))
            .send()
            .await?;

        self.expect_success(response).await
    }

    /// Mutations echo the event back, but nothing reads the echo.
    async fn expect_success(&self, response: reqwest::Response) -> Result<(), CalendarError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::status_error(response).await)
        }
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CalendarError> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| CalendarError::ApiError(format!("JSON parse error: {}", e)))
        } else {
            Err(Self::status_error(response).await)
        }
    }

    async fn status_error(response: reqwest::Response) -> CalendarError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        match status.as_u16() {
            400 => CalendarError::InvalidEventData(text),
            401 | 403 => CalendarError::AuthRequired,
            404 => CalendarError::EventNotFound(text),
            _ => CalendarError::ApiError(format!("{}: {}", status, text)),
        }
    }
}

/// Decode entries one by one so a single malformed event does not hide the
/// rest of the list.
fn decode_events(entries: Vec<serde_json::Value>) -> Vec<Event> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Event>(entry) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed event");
                None
            }
        })
        .collect()
}

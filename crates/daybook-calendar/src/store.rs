//! Fire-and-log proxy over [`CalendarClient`].
//!
//! Reads never fail: a failed fetch is logged, recorded, and reported as an
//! empty list. Mutations log their failure and hand it back so the caller can
//! decide on form state, but the caller re-renders either way. Nothing is
//! retried and nothing is cached between calls.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::client::CalendarClient;
use crate::error::CalendarError;
use crate::types::{Event, EventDraft};

pub struct EventStore {
    client: CalendarClient,
    failures: AtomicU64,
    last_failure: Mutex<Option<String>>,
}

impl EventStore {
    pub fn new(client: CalendarClient) -> Self {
        Self {
            client,
            failures: AtomicU64::new(0),
            last_failure: Mutex::new(None),
        }
    }

    /// Build a store for the service at `base_url`.
    pub fn connect(base_url: &str) -> Result<Self, CalendarError> {
        Ok(Self::new(CalendarClient::new(base_url)?))
    }

    /// All events, or an empty list when the fetch fails.
    pub async fn list_events(&self) -> Vec<Event> {
        match self.client.list_events().await {
            Ok(events) => {
                tracing::debug!(count = events.len(), "Events fetched");
                events
            }
            Err(e) => {
                self.record_failure("list events", &e);
                Vec::new()
            }
        }
    }

    /// Today's events, or an empty list when the fetch fails.
    pub async fn list_today_events(&self) -> Vec<Event> {
        match self.client.list_today_events().await {
            Ok(events) => events,
            Err(e) => {
                self.record_failure("list today's events", &e);
                Vec::new()
            }
        }
    }

    pub async fn create_event(&self, draft: &EventDraft) -> Result<(), CalendarError> {
        self.client
            .create_event(draft)
            .await
            .inspect_err(|e| self.record_failure("create event", e))
    }

    pub async fn update_event(&self, event_id: &str, draft: &EventDraft) -> Result<(), CalendarError> {
        self.client
            .update_event(event_id, draft)
            .await
            .inspect_err(|e| self.record_failure("update event", e))
    }

    /// Issues the DELETE unconditionally; confirmation belongs to the caller.
    pub async fn delete_event(&self, event_id: &str) -> Result<(), CalendarError> {
        self.client
            .delete_event(event_id)
            .await
            .inspect_err(|e| self.record_failure("delete event", e))
    }

    /// Number of failed calls since the store was created.
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Description of the most recent failed call.
    pub fn last_failure(&self) -> Option<String> {
        self.last_failure.lock().clone()
    }

    fn record_failure(&self, operation: &str, error: &CalendarError) {
        tracing::error!(
            operation,
            error = %error,
            status = ?error.status(),
            retryable = error.is_retryable(),
            "Calendar request failed"
        );
        self.failures.fetch_add(1, Ordering::Relaxed);
        *self.last_failure.lock() = Some(format!("{}: {}", operation, error));
    }
}

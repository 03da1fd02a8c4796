//! Calendar events for Daybook.
//!
//! Provides the month date grid, the event wire types and the REST event store.

pub mod client;
pub mod date_grid;
pub mod error;
pub mod store;
pub mod types;

pub use client::CalendarClient;
pub use date_grid::{days_in_month, leading_blanks, month_name, CalendarDay};
pub use error::CalendarError;
pub use store::EventStore;
pub use types::{compose_timestamp, Event, EventDraft, EventTime};

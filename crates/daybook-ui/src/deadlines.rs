//! Today's deadlines list.

use std::sync::Arc;

use daybook_calendar::{Event, EventStore};

use crate::node::{Element, Node};

pub struct DeadlinesWidget {
    store: Arc<EventStore>,
}

impl DeadlinesWidget {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// Fetch today's events and build the list.
    pub async fn render(&self) -> Node {
        let events = self.store.list_today_events().await;
        deadline_list(&events)
    }
}

/// `summary (h:mm AM)` in the event's own zone.
pub fn deadline_label(event: &Event) -> String {
    let time = event
        .start
        .clock_label()
        .unwrap_or_else(|| "Time not specified".to_string());
    format!("{} ({})", event.display_summary(), time)
}

pub fn deadline_list(events: &[Event]) -> Node {
    let list = Element::new("ul").class("upcoming-deadlines");

    if events.is_empty() {
        return list
            .child(Element::new("li").text("No upcoming deadlines today."))
            .into();
    }

    list.children(
        events
            .iter()
            .map(|e| Node::from(Element::new("li").text(deadline_label(e)))),
    )
    .into()
}

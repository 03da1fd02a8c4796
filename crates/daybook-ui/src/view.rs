//! Month grid view.

use std::sync::Arc;

use daybook_calendar::{days_in_month, leading_blanks, month_name, CalendarDay, Event, EventStore};

use crate::node::{Action, Element, Node};

pub struct CalendarView {
    store: Arc<EventStore>,
}

impl CalendarView {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// Build the full grid for `month` (0-11) of `year`.
    ///
    /// Fetches the event list once per call. The result replaces any
    /// previously mounted grid; two calls against unchanged server state
    /// produce equal trees.
    pub async fn render(&self, year: i32, month: u32) -> Node {
        let days = days_in_month(year, month);
        let events = self.store.list_events().await;
        tracing::debug!(year, month, events = events.len(), "Rendering month");
        month_grid(year, month, &days, &events)
    }
}

/// Pure part of [`CalendarView::render`].
pub fn month_grid(year: i32, month: u32, days: &[CalendarDay], events: &[Event]) -> Node {
    let header = Element::new("div")
        .class("calendar-header")
        .child(Element::new("h2").class("current-month").text(month_name(month)))
        .child(
            Element::new("span")
                .class("current-year")
                .attr("data-year", year.to_string())
                .text(format!(" {}", year)),
        );

    let blanks = (0..leading_blanks(days))
        .map(|_| Node::from(Element::new("div").class("calendar-cell").class("empty-cell")));

    let cells = days.iter().map(|day| {
        let iso = day.iso_date();
        let day_events: Vec<&Event> = events.iter().filter(|e| e.starts_on(&iso)).collect();
        day_cell(day, &iso, &day_events)
    });

    Element::new("div")
        .class("calendar")
        .child(header)
        .child(
            Element::new("div")
                .class("calendar-grid")
                .children(blanks)
                .children(cells),
        )
        .into()
}

fn day_cell(day: &CalendarDay, iso: &str, events: &[&Event]) -> Node {
    let cell = Element::new("div")
        .class("calendar-cell")
        .attr("data-date", iso)
        .child(Element::new("span").class("day-number").text(day.day.to_string()));

    if events.is_empty() {
        return cell.into();
    }

    let label = Element::new("div")
        .class("events-label")
        .text("Events ")
        .child(
            Element::new("span")
                .class("events-count")
                .text(events.len().to_string()),
        );

    let items = events.iter().copied().map(event_item);

    cell.child(
        Element::new("div")
            .class("events-summary")
            .child(label)
            .child(Element::new("div").class("event-list").children(items)),
    )
    .into()
}

fn event_item(event: &Event) -> Node {
    let time = match (event.start.clock_label(), event.end.clock_label()) {
        (Some(start), Some(end)) => format!("{} - {}", start, end),
        (Some(start), None) => start,
        _ => String::new(),
    };

    Element::new("div")
        .class("event-item")
        .attr("data-event-id", event.id.as_str())
        .child(Element::new("div").class("event-time").text(time))
        .child(Element::new("div").class("event-title").text(event.display_summary()))
        .child(
            Element::new("div")
                .class("event-description")
                .text(event.description.as_deref().unwrap_or("")),
        )
        .child(
            Element::new("div")
                .class("event-actions")
                .child(
                    Element::new("button")
                        .class("edit-btn")
                        .attr("title", "Edit event")
                        .on_click(Action::EditEvent(event.clone()))
                        .text("✎"),
                )
                .child(
                    Element::new("button")
                        .class("delete-btn")
                        .attr("title", "Delete event")
                        .on_click(Action::DeleteEvent(event.id.clone()))
                        .text("X"),
                ),
        )
        .into()
}

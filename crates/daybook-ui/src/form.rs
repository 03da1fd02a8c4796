//! Add/edit form for a single event.
//!
//! The form is a two-state machine. It starts in [`FormMode::Add`]; a user
//! edit action on a rendered event moves it to [`FormMode::Edit`], and a
//! successful update, an explicit cancel, or a reset moves it back.

use chrono::{NaiveDate, NaiveTime};
use daybook_calendar::{Event, EventDraft};
use daybook_core::TimeZonePolicy;

use crate::node::{Action, Element, Node};

/// Raw field values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFormFields {
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Add,
    Edit { event_id: String },
}

/// What submitting the form asks the store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(EventDraft),
    Update { event_id: String, draft: EventDraft },
    /// A required field is empty or malformed; nothing is sent.
    Ignored,
}

#[derive(Debug, Default)]
pub struct EventFormController {
    fields: EventFormFields,
    mode: FormMode,
}

impl EventFormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &EventFormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut EventFormFields {
        &mut self.fields
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn editing_event_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Add => None,
            FormMode::Edit { event_id } => Some(event_id),
        }
    }

    /// The "Add" trigger is enabled only in add mode.
    pub fn add_enabled(&self) -> bool {
        self.mode == FormMode::Add
    }

    /// The "Update" trigger is enabled only in edit mode.
    pub fn update_enabled(&self) -> bool {
        !self.add_enabled()
    }

    /// Pre-fill every field from `event` and switch to edit mode.
    pub fn begin_edit(&mut self, event: &Event) {
        self.fields = EventFormFields {
            title: event.summary.clone(),
            date: event.start.date_part().unwrap_or_default().to_string(),
            start_time: event.start.time_part().unwrap_or_default().to_string(),
            end_time: event.end.time_part().unwrap_or_default().to_string(),
            location: event.location.clone().unwrap_or_default(),
            description: event.description.clone().unwrap_or_default(),
        };
        self.mode = FormMode::Edit {
            event_id: event.id.clone(),
        };
        tracing::debug!(event_id = %event.id, "Editing event");
    }

    /// Map the current fields to a request for the current mode.
    pub fn submit(&self, policy: TimeZonePolicy) -> Submission {
        let Some(draft) = self.draft(policy) else {
            return Submission::Ignored;
        };

        match &self.mode {
            FormMode::Add => Submission::Create(draft),
            FormMode::Edit { event_id } => Submission::Update {
                event_id: event_id.clone(),
                draft,
            },
        }
    }

    /// Clear all fields and return to add mode.
    pub fn reset(&mut self) {
        self.fields = EventFormFields::default();
        self.mode = FormMode::Add;
    }

    /// Leave edit mode without submitting. Returns false when not editing.
    pub fn cancel_edit(&mut self) -> bool {
        if self.mode == FormMode::Add {
            return false;
        }
        self.reset();
        true
    }

    fn draft(&self, policy: TimeZonePolicy) -> Option<EventDraft> {
        let f = &self.fields;

        if f.title.trim().is_empty() {
            tracing::debug!("Ignoring submit: empty title");
            return None;
        }
        if NaiveDate::parse_from_str(f.date.trim(), "%Y-%m-%d").is_err() {
            tracing::debug!(date = %f.date, "Ignoring submit: bad date");
            return None;
        }
        let (Some(start), Some(end)) = (parse_time(&f.start_time), parse_time(&f.end_time)) else {
            tracing::debug!("Ignoring submit: bad start or end time");
            return None;
        };
        if end < start {
            tracing::debug!("Ignoring submit: end before start");
            return None;
        }

        Some(EventDraft::compose(
            f.title.trim(),
            f.date.trim(),
            f.start_time.trim(),
            f.end_time.trim(),
            &f.location,
            &f.description,
            policy,
        ))
    }

    /// Form markup with the add/update triggers enabled per mode.
    pub fn render(&self) -> Node {
        let f = &self.fields;
        let input = |name: &'static str, value: &str| -> Node {
            Element::new("label")
                .child(
                    Element::new("input")
                        .attr("name", name)
                        .attr("value", value),
                )
                .into()
        };

        let mut add = Element::new("button")
            .class("add-event")
            .on_click(Action::SubmitForm)
            .text("Add Event");
        let mut update = Element::new("button")
            .class("update-event")
            .on_click(Action::SubmitForm)
            .text("Update Event");
        let mut cancel = Element::new("button")
            .class("cancel-edit")
            .on_click(Action::CancelEdit)
            .text("Cancel");

        if self.add_enabled() {
            update = update.attr("disabled", "disabled");
            cancel = cancel.attr("disabled", "disabled");
        } else {
            add = add.attr("disabled", "disabled");
        }
        if let Some(id) = self.editing_event_id() {
            update = update.attr("data-event-id", id);
        }

        Element::new("form")
            .class("event-form")
            .children([
                input("title", &f.title),
                input("date", &f.date),
                input("start-time", &f.start_time),
                input("end-time", &f.end_time),
                input("location", &f.location),
                input("description", &f.description),
            ])
            .child(add)
            .child(update)
            .child(cancel)
            .into()
    }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use daybook_calendar::EventTime;

    fn filled() -> EventFormController {
        let mut form = EventFormController::new();
        *form.fields_mut() = EventFormFields {
            title: "New Event".into(),
            date: "2024-12-25".into(),
            start_time: "10:00".into(),
            end_time: "11:00".into(),
            location: "Online".into(),
            description: "desc".into(),
        };
        form
    }

    fn existing() -> Event {
        Event {
            id: "evt-7".into(),
            summary: "Dentist".into(),
            start: EventTime::new("2024-12-03T15:30:00Z", "UTC"),
            end: EventTime::new("2024-12-03T16:15:00Z", "UTC"),
            location: Some("Main St".into()),
            description: None,
        }
    }

    #[test]
    fn test_starts_in_add_mode() {
        let form = EventFormController::new();
        assert_eq!(form.mode(), &FormMode::Add);
        assert!(form.add_enabled());
        assert!(!form.update_enabled());
    }

    #[test]
    fn test_add_submission() {
        let form = filled();
        match form.submit(TimeZonePolicy::Utc) {
            Submission::Create(draft) => {
                assert_eq!(draft.summary, "New Event");
                assert_eq!(draft.start, "2024-12-25T10:00:00Z");
                assert_eq!(draft.end, "2024-12-25T11:00:00Z");
                assert_eq!(draft.location, "Online");
            }
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_begin_edit_prefills_and_swaps_triggers() {
        let mut form = EventFormController::new();
        form.begin_edit(&existing());

        assert_eq!(form.editing_event_id(), Some("evt-7"));
        assert!(!form.add_enabled());
        assert!(form.update_enabled());

        let f = form.fields();
        assert_eq!(f.title, "Dentist");
        assert_eq!(f.date, "2024-12-03");
        assert_eq!(f.start_time, "15:30");
        assert_eq!(f.end_time, "16:15");
        assert_eq!(f.location, "Main St");
        assert_eq!(f.description, "");
    }

    #[test]
    fn test_edit_submission_targets_event() {
        let mut form = EventFormController::new();
        form.begin_edit(&existing());
        form.fields_mut().title = "Dentist (moved)".into();

        match form.submit(TimeZonePolicy::Utc) {
            Submission::Update { event_id, draft } => {
                assert_eq!(event_id, "evt-7");
                assert_eq!(draft.summary, "Dentist (moved)");
                assert_eq!(draft.start, "2024-12-03T15:30:00Z");
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_gaps_are_ignored() {
        let mut form = filled();
        form.fields_mut().title = "   ".into();
        assert_eq!(form.submit(TimeZonePolicy::Utc), Submission::Ignored);

        let mut form = filled();
        form.fields_mut().date = String::new();
        assert_eq!(form.submit(TimeZonePolicy::Utc), Submission::Ignored);

        let mut form = filled();
        form.fields_mut().end_time = "09:00".into();
        assert_eq!(form.submit(TimeZonePolicy::Utc), Submission::Ignored);

        let mut form = filled();
        form.fields_mut().start_time = "noon".into();
        assert_eq!(form.submit(TimeZonePolicy::Utc), Submission::Ignored);
    }

    #[test]
    fn test_cancel_edit_returns_to_add() {
        let mut form = EventFormController::new();
        assert!(!form.cancel_edit());

        form.begin_edit(&existing());
        assert!(form.cancel_edit());
        assert_eq!(form.mode(), &FormMode::Add);
        assert_eq!(form.fields(), &EventFormFields::default());
    }

    #[test]
    fn test_render_disables_inactive_trigger() {
        let mut form = EventFormController::new();
        let node = form.render();
        assert!(node.find_all("add-event")[0].attr_value("disabled").is_none());
        assert!(node.find_all("update-event")[0].attr_value("disabled").is_some());

        form.begin_edit(&existing());
        let node = form.render();
        assert!(node.find_all("add-event")[0].attr_value("disabled").is_some());
        let update = node.find_all("update-event")[0];
        assert!(update.attr_value("disabled").is_none());
        assert_eq!(update.attr_value("data-event-id"), Some("evt-7"));
    }
}

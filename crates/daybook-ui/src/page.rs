//! The calendar page: one owned controller for view state, form, grid and
//! deadlines.
//!
//! Every handler awaits its network calls before returning. After each
//! create, update or delete attempt the grid is re-rendered exactly once and
//! the deadlines list is refreshed, whether or not the call succeeded.
//! Overlapping fetches are not sequenced; a slow response can overwrite a
//! newer render.

use std::sync::Arc;

use chrono::NaiveDate;
use daybook_calendar::{CalendarError, EventStore};
use daybook_core::{App, TimeZonePolicy};

use crate::deadlines::DeadlinesWidget;
use crate::form::{EventFormController, Submission};
use crate::navigation::ViewState;
use crate::node::{Action, Element, Node};
use crate::view::CalendarView;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this event?";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Result of a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated,
    /// The store call failed; the failure was logged.
    Failed,
    /// Validation gap; nothing was sent and nothing re-rendered.
    Ignored,
}

pub struct CalendarPage {
    state: ViewState,
    form: EventFormController,
    store: Arc<EventStore>,
    view: CalendarView,
    deadlines: DeadlinesWidget,
    confirm: Box<dyn Confirm>,
    confirm_deletes: bool,
    time_zone: TimeZonePolicy,
    grid: Node,
    agenda: Node,
    last_error: Option<String>,
    renders: u64,
}

impl CalendarPage {
    pub fn new(
        store: Arc<EventStore>,
        time_zone: TimeZonePolicy,
        confirm: Box<dyn Confirm>,
        today: NaiveDate,
    ) -> Self {
        Self {
            state: ViewState::starting_at(today),
            form: EventFormController::new(),
            view: CalendarView::new(store.clone()),
            deadlines: DeadlinesWidget::new(store.clone()),
            store,
            confirm,
            confirm_deletes: true,
            time_zone,
            grid: Element::new("div").class("calendar").into(),
            agenda: Element::new("ul").class("upcoming-deadlines").into(),
            last_error: None,
            renders: 0,
        }
    }

    /// Build a page for the configured service, starting at the local month.
    pub fn from_app(app: &App, confirm: Box<dyn Confirm>) -> Result<Self, CalendarError> {
        let store = Arc::new(EventStore::connect(&app.config().backend.base_url)?);
        let today = chrono::Local::now().date_naive();
        Ok(Self::new(store, app.time_zone(), confirm, today)
            .with_confirm_deletes(app.config().calendar.confirm_deletes))
    }

    pub fn with_confirm_deletes(mut self, enabled: bool) -> Self {
        self.confirm_deletes = enabled;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn form(&self) -> &EventFormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EventFormController {
        &mut self.form
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Latest rendered month grid.
    pub fn grid(&self) -> &Node {
        &self.grid
    }

    /// Latest rendered deadlines list.
    pub fn agenda(&self) -> &Node {
        &self.agenda
    }

    /// Message for the most recent failed create, update or delete; cleared
    /// by the next one that succeeds.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Number of grid renders so far.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Initial render of grid and deadlines.
    pub async fn load(&mut self) {
        self.render().await;
        self.refresh_deadlines().await;
    }

    pub async fn previous_month(&mut self) {
        self.state.previous_month();
        self.render().await;
    }

    pub async fn next_month(&mut self) {
        self.state.next_month();
        self.render().await;
    }

    pub async fn set_year(&mut self, input: &str) {
        self.state.set_year(input);
        self.render().await;
    }

    /// Submit the form in its current mode.
    ///
    /// Add mode clears the form after the attempt. Edit mode returns to add
    /// mode only when the update succeeded, so a failed update can be retried.
    pub async fn submit_form(&mut self) -> SubmitOutcome {
        let outcome = match self.form.submit(self.time_zone) {
            Submission::Ignored => return SubmitOutcome::Ignored,
            Submission::Create(draft) => {
                let result = self.store.create_event(&draft).await;
                self.form.reset();
                if self.note_result(result) {
                    SubmitOutcome::Created
                } else {
                    SubmitOutcome::Failed
                }
            }
            Submission::Update { event_id, draft } => {
                let result = self.store.update_event(&event_id, &draft).await;
                if self.note_result(result) {
                    self.form.reset();
                    SubmitOutcome::Updated
                } else {
                    SubmitOutcome::Failed
                }
            }
        };

        self.sync_editing();
        self.refresh_deadlines().await;
        self.render().await;
        outcome
    }

    /// Leave edit mode without saving. No network call, no re-render.
    pub fn cancel_edit(&mut self) -> bool {
        let cancelled = self.form.cancel_edit();
        self.sync_editing();
        cancelled
    }

    /// Delete after confirmation. Returns false when the user declined.
    pub async fn delete_event(&mut self, event_id: &str) -> bool {
        if self.confirm_deletes && !self.confirm.confirm(DELETE_PROMPT) {
            tracing::debug!(event_id, "Delete declined");
            return false;
        }

        // On failure the view simply stays stale.
        let result = self.store.delete_event(event_id).await;
        self.note_result(result);

        if self.form.editing_event_id() == Some(event_id) {
            self.form.reset();
            self.sync_editing();
        }
        self.refresh_deadlines().await;
        self.render().await;
        true
    }

    /// Run the handler attached to a rendered element.
    pub async fn dispatch(&mut self, action: Action) {
        match action {
            Action::EditEvent(event) => {
                self.form.begin_edit(&event);
                self.sync_editing();
            }
            Action::DeleteEvent(id) => {
                self.delete_event(&id).await;
            }
            Action::PreviousMonth => self.previous_month().await,
            Action::NextMonth => self.next_month().await,
            Action::SetYear(input) => self.set_year(&input).await,
            Action::SubmitForm => {
                self.submit_form().await;
            }
            Action::CancelEdit => {
                self.cancel_edit();
            }
        }
    }

    /// Navigation controls, grid, form and deadlines as one tree.
    pub fn page(&self) -> Node {
        let year = self.state.current_year.to_string();
        let nav = Element::new("div")
            .class("calendar-nav")
            .child(
                Element::new("button")
                    .class("prev-month")
                    .on_click(Action::PreviousMonth)
                    .text("<"),
            )
            .child(
                Element::new("input")
                    .class("year-input")
                    .attr("type", "number")
                    .attr("name", "year")
                    .attr("value", year.clone())
                    .on_change(Action::SetYear(year)),
            )
            .child(
                Element::new("button")
                    .class("next-month")
                    .on_click(Action::NextMonth)
                    .text(">"),
            );

        let mut page = Element::new("div").class("calendar-page").child(nav);
        if let Some(message) = &self.last_error {
            page = page.child(Element::new("div").class("error-message").text(message.clone()));
        }
        page.child(self.grid.clone())
            .child(self.form.render())
            .child(self.agenda.clone())
            .into()
    }

    async fn render(&mut self) {
        self.grid = self
            .view
            .render(self.state.current_year, self.state.current_month)
            .await;
        self.renders += 1;
    }

    async fn refresh_deadlines(&mut self) {
        self.agenda = self.deadlines.render().await;
    }

    /// Remember the outcome of a mutation for display. Returns true on success.
    fn note_result(&mut self, result: Result<(), CalendarError>) -> bool {
        match result {
            Ok(()) => {
                self.last_error = None;
                true
            }
            Err(e) => {
                self.last_error = Some(e.user_message());
                false
            }
        }
    }

    fn sync_editing(&mut self) {
        self.state.editing_event_id = self.form.editing_event_id().map(str::to_string);
    }
}

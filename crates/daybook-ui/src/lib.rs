//! Calendar page for Daybook: month grid, event form, navigation and today's
//! deadlines, rendered as declarative node trees.

pub mod deadlines;
pub mod form;
pub mod navigation;
pub mod node;
pub mod page;
pub mod view;

pub use deadlines::DeadlinesWidget;
pub use form::{EventFormController, EventFormFields, FormMode, Submission};
pub use navigation::ViewState;
pub use node::{Action, Element, Node};
pub use page::{CalendarPage, Confirm, SubmitOutcome, DELETE_PROMPT};
pub use view::CalendarView;

use chrono::{Datelike, NaiveDate};

/// Displayed month and form mode for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub current_year: i32,
    /// 0-11
    pub current_month: u32,
    pub editing_event_id: Option<String>,
}

impl ViewState {
    /// `month` is clamped into 0-11.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            current_year: year,
            current_month: month.min(11),
            editing_event_id: None,
        }
    }

    /// State showing the month that contains `date`.
    pub fn starting_at(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0())
    }

    /// Step back one month, rolling into December of the previous year.
    /// Stays put when the year cannot go lower.
    pub fn previous_month(&mut self) {
        if self.current_month > 0 {
            self.current_month -= 1;
            return;
        }
        match self.current_year.checked_sub(1) {
            Some(year) => {
                self.current_year = year;
                self.current_month = 11;
            }
            None => tracing::debug!(year = self.current_year, "Already at the earliest year"),
        }
    }

    /// Step forward one month, rolling into January of the next year.
    /// Stays put when the year cannot go higher.
    pub fn next_month(&mut self) {
        if self.current_month < 11 {
            self.current_month += 1;
            return;
        }
        match self.current_year.checked_add(1) {
            Some(year) => {
                self.current_year = year;
                self.current_month = 0;
            }
            None => tracing::debug!(year = self.current_year, "Already at the latest year"),
        }
    }

    /// Set the year from user input, keeping the current year when the input
    /// is not an integer. Returns the year now in effect.
    pub fn set_year(&mut self, input: &str) -> i32 {
        match input.trim().parse::<i32>() {
            Ok(year) => self.current_year = year,
            Err(_) => tracing::debug!(input, "Ignoring non-numeric year"),
        }
        self.current_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_month_rolls_year() {
        let mut state = ViewState::new(2024, 0);
        state.previous_month();
        assert_eq!((state.current_year, state.current_month), (2023, 11));
        state.previous_month();
        assert_eq!((state.current_year, state.current_month), (2023, 10));
    }

    #[test]
    fn test_next_month_rolls_year() {
        let mut state = ViewState::new(2024, 11);
        state.next_month();
        assert_eq!((state.current_year, state.current_month), (2025, 0));
        state.next_month();
        assert_eq!((state.current_year, state.current_month), (2025, 1));
    }

    #[test]
    fn test_set_year_falls_back_on_bad_input() {
        let mut state = ViewState::new(2024, 5);
        assert_eq!(state.set_year("2030"), 2030);
        assert_eq!(state.set_year("twenty"), 2030);
        assert_eq!(state.set_year(""), 2030);
        assert_eq!(state.set_year(" 1999 "), 1999);
        assert_eq!(state.current_month, 5);
    }

    #[test]
    fn test_navigation_stops_at_year_limits() {
        let mut state = ViewState::new(2024, 11);
        assert_eq!(state.set_year("2147483647"), i32::MAX);
        state.next_month();
        assert_eq!((state.current_year, state.current_month), (i32::MAX, 11));

        let mut state = ViewState::new(2024, 0);
        assert_eq!(state.set_year("-2147483648"), i32::MIN);
        state.previous_month();
        assert_eq!((state.current_year, state.current_month), (i32::MIN, 0));

        // Inside the month the step still works at the limit
        state.next_month();
        assert_eq!((state.current_year, state.current_month), (i32::MIN, 1));
    }

    #[test]
    fn test_starting_at() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 25);
        let state = ViewState::starting_at(date.unwrap_or_default());
        assert_eq!((state.current_year, state.current_month), (2024, 11));
        assert!(state.editing_event_id.is_none());
    }
}

//! Month grid computation.
//!
//! Months are zero-based (0 = January) throughout the grid and the view state.

use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One date cell of a rendered month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub year: i32,
    /// 0-11
    pub month: u32,
    /// 1-31
    pub day: u32,
    /// 0 = Sunday
    pub weekday: u32,
}

impl CalendarDay {
    fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
            day: date.day(),
            weekday: date.weekday().num_days_from_sunday(),
        }
    }

    /// `YYYY-MM-DD`, the prefix an event's start must carry to land on this day.
    pub fn iso_date(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month + 1, self.day)
    }
}

/// Every day of `month` in `year`, ascending from the 1st.
///
/// An out-of-range month yields an empty sequence.
pub fn days_in_month(year: i32, month: u32) -> Vec<CalendarDay> {
    let Some(first) = month
        .checked_add(1)
        .and_then(|m| NaiveDate::from_ymd_opt(year, m, 1))
    else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|d| d.month0() == month)
        .map(CalendarDay::from_date)
        .collect()
}

/// Empty cells needed before day 1 so it lands in its weekday column.
pub fn leading_blanks(days: &[CalendarDay]) -> usize {
    days.first().map_or(0, |d| d.weekday as usize)
}

/// English long name of a zero-based month.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES.get(month as usize).copied().unwrap_or("")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_day_counts() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (month, count) in expected.iter().enumerate() {
            assert_eq!(days_in_month(2023, month as u32).len(), *count, "month {}", month);
        }
    }

    #[test]
    fn test_leap_februaries() {
        assert_eq!(days_in_month(2024, 1).len(), 29);
        assert_eq!(days_in_month(2000, 1).len(), 29);
        assert_eq!(days_in_month(1900, 1).len(), 28);
        assert_eq!(days_in_month(2100, 1).len(), 28);
    }

    #[test]
    fn test_days_ascend_from_first() {
        let days = days_in_month(2024, 11);
        assert_eq!(days.first().unwrap().day, 1);
        assert_eq!(days.last().unwrap().day, 31);
        assert!(days.windows(2).all(|w| w[1].day == w[0].day + 1));
        assert!(days.iter().all(|d| d.year == 2024 && d.month == 11));
    }

    #[test]
    fn test_weekdays_match_calendar() {
        // 2024-12-01 was a Sunday, 2024-12-25 a Wednesday
        let days = days_in_month(2024, 11);
        assert_eq!(days[0].weekday, 0);
        assert_eq!(days[24].weekday, 3);
        assert!(days.windows(2).all(|w| w[1].weekday == (w[0].weekday + 1) % 7));
    }

    #[test]
    fn test_leading_blanks() {
        // September 2024 starts on a Sunday, February 2024 on a Thursday
        assert_eq!(leading_blanks(&days_in_month(2024, 8)), 0);
        assert_eq!(leading_blanks(&days_in_month(2024, 1)), 4);
        // June 2024 starts on a Saturday
        assert_eq!(leading_blanks(&days_in_month(2024, 5)), 6);
        assert_eq!(leading_blanks(&[]), 0);
    }

    #[test]
    fn test_iso_date_is_zero_padded() {
        let days = days_in_month(2024, 0);
        assert_eq!(days[4].iso_date(), "2024-01-05");
    }

    #[test]
    fn test_out_of_range_month_is_empty() {
        assert!(days_in_month(2024, 12).is_empty());
        assert_eq!(month_name(12), "");
        assert_eq!(month_name(11), "December");
    }
}

//! Event wire types.

use chrono::{DateTime, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use daybook_core::TimeZonePolicy;
use serde::{Deserialize, Deserializer, Serialize};

/// Calendar event as returned by the event service.
///
/// Unknown fields sent by the service are ignored. Missing or null times
/// deserialize to an empty [`EventTime`], which never matches a day of the
/// grid; a null summary becomes empty and displays as "No Title".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: EventTime,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end: EventTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    /// True when the start timestamp textually begins with `iso_date`.
    pub fn starts_on(&self, iso_date: &str) -> bool {
        self.start
            .date_time
            .as_deref()
            .is_some_and(|dt| dt.starts_with(iso_date))
    }

    /// Title shown in the grid.
    pub fn display_summary(&self) -> &str {
        if self.summary.trim().is_empty() {
            "No Title"
        } else {
            &self.summary
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `{ dateTime, timeZone }` pair of the wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTime {
    pub fn new(date_time: impl Into<String>, time_zone: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            time_zone: Some(time_zone.into()),
        }
    }

    /// `YYYY-MM-DD` part before the `T`.
    pub fn date_part(&self) -> Option<&str> {
        let dt = self.date_time.as_deref()?;
        Some(dt.split('T').next().unwrap_or(dt))
    }

    /// `HH:MM` part after the `T`.
    pub fn time_part(&self) -> Option<&str> {
        let (_, time) = self.date_time.as_deref()?.split_once('T')?;
        time.get(..5)
    }

    /// Wall-clock time in the event's own zone.
    ///
    /// Timestamps carrying an offset are shifted into `timeZone` when that
    /// names a known zone; timestamps without an offset are taken as already
    /// local to it.
    pub fn local_time(&self) -> Option<NaiveTime> {
        let raw = self.date_time.as_deref()?;

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            let zone = self
                .time_zone
                .as_deref()
                .and_then(|name| name.parse::<Tz>().ok());
            return Some(match zone {
                Some(tz) => dt.with_timezone(&tz).time(),
                None => dt.time(),
            });
        }

        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .ok()
            .map(|dt| dt.time())
    }

    /// `10:00 AM` style label, if the timestamp parses.
    pub fn clock_label(&self) -> Option<String> {
        self.local_time().map(|t| t.format("%-I:%M %p").to_string())
    }
}

/// Body of a create or update request.
///
/// `start` and `end` are composed strings, not `{dateTime, timeZone}` pairs;
/// the zone travels separately in `timeZone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub summary: String,
    pub start: String,
    pub end: String,
    pub location: String,
    pub description: String,
    pub time_zone: String,
}

impl EventDraft {
    /// Build a draft from form-style strings.
    pub fn compose(
        summary: &str,
        date: &str,
        start_time: &str,
        end_time: &str,
        location: &str,
        description: &str,
        policy: TimeZonePolicy,
    ) -> Self {
        Self {
            summary: summary.to_string(),
            start: compose_timestamp(date, start_time, policy),
            end: compose_timestamp(date, end_time, policy),
            location: location.to_string(),
            description: description.to_string(),
            time_zone: policy.zone_name().to_string(),
        }
    }
}

/// `date + "T" + time + ":00" + suffix`.
///
/// A time that already carries seconds is used as is.
pub fn compose_timestamp(date: &str, time: &str, policy: TimeZonePolicy) -> String {
    let seconds = if time.matches(':').count() >= 2 { "" } else { ":00" };
    format!("{}T{}{}{}", date, time, seconds, policy.suffix())
}

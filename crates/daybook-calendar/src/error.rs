//! Calendar-specific error types.

use daybook_core::{AppError, NetworkError, ReqwestErrorExt};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Authentication required")]
    AuthRequired,

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Invalid event data: {0}")]
    InvalidEventData(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl CalendarError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthRequired => "Please sign in again to manage your calendar".to_string(),
            Self::EventNotFound(_) => "Event not found".to_string(),
            Self::InvalidEventData(msg) => format!("Invalid event: {}", msg),
            Self::ApiError(msg) => format!("Calendar error: {}", msg),
            Self::NetworkError(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// HTTP status carried by the failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthRequired => Some(401),
            Self::EventNotFound(_) => Some(404),
            Self::InvalidEventData(_) => Some(400),
            Self::ApiError(_) => None,
            Self::NetworkError(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// Whether repeating the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ApiError(_) | Self::NetworkError(_))
    }
}

impl From<CalendarError> for AppError {
    fn from(e: CalendarError) -> Self {
        match e {
            CalendarError::NetworkError(err) => AppError::Network(err.into_network_error()),
            CalendarError::ApiError(msg) => {
                AppError::Network(NetworkError::InvalidResponse(msg))
            }
            other => AppError::Service(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = CalendarError::AuthRequired;
        assert!(err.user_message().contains("sign in"));

        let err = CalendarError::InvalidEventData("Start and End time are required".into());
        assert!(err.user_message().contains("required"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(CalendarError::EventNotFound("x".into()).status(), Some(404));
        assert_eq!(CalendarError::ApiError("boom".into()).status(), None);
    }

    #[test]
    fn test_is_retryable() {
        assert!(CalendarError::ApiError("503".into()).is_retryable());
        assert!(!CalendarError::EventNotFound("x".into()).is_retryable());
        assert!(!CalendarError::InvalidEventData("bad".into()).is_retryable());
    }

    #[test]
    fn test_maps_into_app_error() {
        let app: AppError = CalendarError::EventNotFound("evt".into()).into();
        assert!(matches!(app, AppError::Service(msg) if msg.contains("evt")));

        let app: AppError = CalendarError::ApiError("500".into()).into();
        assert!(matches!(app, AppError::Network(NetworkError::InvalidResponse(_))));
    }
}

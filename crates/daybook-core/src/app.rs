use anyhow::Result;
use std::sync::Arc;

use crate::config::{Config, TimeZonePolicy};

/// Main application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    time_zone: TimeZonePolicy,
}

impl App {
    /// Create a new application instance from the on-disk configuration
    pub fn new() -> Result<Self> {
        let (config, _) = Config::load_validated()?;
        Self::from_config(config)
    }

    /// Create an application instance from an already loaded configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let time_zone = config.calendar.time_zone_policy()?;
        tracing::info!(
            backend = %config.backend.base_url,
            time_zone = time_zone.zone_name(),
            "Application configured"
        );

        Ok(Self {
            config: Arc::new(config),
            time_zone,
        })
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Timestamp policy resolved from `calendar.time_zone`
    pub fn time_zone(&self) -> TimeZonePolicy {
        self.time_zone
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_from_config_resolves_zone() {
        let mut config = Config::default();
        config.calendar.time_zone = "Asia/Tokyo".to_string();
        let app = App::from_config(config).unwrap();
        assert_eq!(app.time_zone().zone_name(), "Asia/Tokyo");
    }

    #[test]
    fn test_from_config_rejects_unknown_zone() {
        let mut config = Config::default();
        config.calendar.time_zone = "Nowhere/Special".to_string();
        assert!(App::from_config(config).is_err());
    }
}

//! Runtime settings for the tracker.

use crate::{
    Error,
    clock::SystemClock,
    pagination::PaginationConfig,
    storage::STORAGE_KEY,
};

/// Settings shared by the store and its callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// The key the transaction list is persisted under.
    pub storage_key: String,
    /// Page size and default page for list views.
    pub pagination: PaginationConfig,
    /// The canonical timezone used for "today", e.g. "Pacific/Auckland".
    ///
    /// `None` uses the operating system's local offset.
    pub timezone: Option<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_owned(),
            pagination: PaginationConfig::default(),
            timezone: None,
        }
    }
}

impl TrackerConfig {
    /// The clock for the configured timezone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the timezone is not a
    /// canonical timezone name.
    pub fn clock(&self) -> Result<SystemClock, Error> {
        match &self.timezone {
            Some(timezone) => SystemClock::from_timezone(timezone),
            None => Ok(SystemClock::local()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, STORAGE_KEY, TrackerConfig};

    #[test]
    fn defaults_match_reference_storage() {
        let config = TrackerConfig::default();

        assert_eq!(config.storage_key, STORAGE_KEY);
        assert_eq!(config.storage_key, "afripay-transactions");
        assert_eq!(config.pagination.page_size, 10);
        assert_eq!(config.pagination.default_page, 1);
    }

    #[test]
    fn invalid_timezone_fails_clock() {
        let config = TrackerConfig {
            timezone: Some("Nowhere/Special".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            config.clock(),
            Err(Error::InvalidTimezoneError("Nowhere/Special".to_owned()))
        );
    }
}

// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use uuid::Uuid;

use crate::{AnalyticsError, AnalyticsErrorType, AnalyticsResult, ValidationPolicy};

/// Default collection endpoint (Measurement Protocol v1).
pub const DEFAULT_ENDPOINT_URL: &str = "https://www.google-analytics.com/collect";

const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configuration for one [`crate::Tracker`] instance. Construct with
/// [`TrackerConfig::new`] and refine with the fluent `with_*` methods; the
/// facade validates the whole thing once at construction time and treats a bad
/// tracking id or endpoint as fatal to that instance.
///
/// The `default_*` fields are merged into every outgoing hit at send time
/// unless the hit sets the same parameter explicitly.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Property id the hits are attributed to, `UA-XXXXX-Y` shape.
    pub tracking_id: String,
    pub endpoint_url: String,
    /// When `false` the whole facade is a no-op: nothing is validated, sent,
    /// or counted.
    pub enabled: bool,
    pub user_agent: String,
    /// Passed through to the reqwest connection pool.
    pub pool_max_idle_per_host: usize,
    pub request_timeout: Duration,
    /// Upper bound on how long [`crate::Tracker::flush`] waits for outstanding
    /// detached sends.
    pub flush_timeout: Duration,
    pub validation_policy: ValidationPolicy,
    /// `cid` sent with every hit that does not carry its own. Generated as a
    /// random UUID when not supplied.
    pub default_client_id: String,
    pub default_user_id: Option<String>,
    pub default_application_name: Option<String>,
    pub default_application_version: Option<String>,
    pub default_data_source: Option<String>,
    pub anonymize_ip: bool,
}

impl TrackerConfig {
    #[must_use]
    pub fn new(tracking_id: impl Into<String>) -> TrackerConfig {
        TrackerConfig {
            tracking_id: tracking_id.into(),
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            enabled: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pool_max_idle_per_host: 10,
            request_timeout: Duration::from_secs(10),
            flush_timeout: Duration::from_secs(5),
            validation_policy: ValidationPolicy::Permissive,
            default_client_id: Uuid::new_v4().to_string(),
            default_user_id: None,
            default_application_name: None,
            default_application_version: None,
            default_data_source: None,
            anonymize_ip: false,
        }
    }

    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = endpoint_url.into();
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_pool_max_idle_per_host(mut self, size: usize) -> Self {
        self.pool_max_idle_per_host = size;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_flush_timeout(mut self, timeout: Duration) -> Self {
        self.flush_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_validation_policy(mut self, policy: ValidationPolicy) -> Self {
        self.validation_policy = policy;
        self
    }

    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.default_client_id = client_id.into();
        self
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.default_user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn with_application(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.default_application_name = Some(name.into());
        self.default_application_version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_data_source(mut self, data_source: impl Into<String>) -> Self {
        self.default_data_source = Some(data_source.into());
        self
    }

    #[must_use]
    pub fn with_anonymize_ip(mut self, anonymize_ip: bool) -> Self {
        self.anonymize_ip = anonymize_ip;
        self
    }

    /// Checked once by [`crate::Tracker::new`]. A malformed tracking id or an
    /// endpoint that is not http(s) is fatal to the instance.
    ///
    /// # Errors
    ///
    /// [`AnalyticsErrorType::InvalidTrackingId`] /
    /// [`AnalyticsErrorType::InvalidEndpointUrl`].
    pub fn validate(&self) -> AnalyticsResult<()> {
        if !is_well_formed_tracking_id(&self.tracking_id) {
            return AnalyticsError::new_error_result(
                AnalyticsErrorType::InvalidTrackingId,
                &format!("tracking id {:?} is not of the form UA-XXXXX-Y", self.tracking_id),
            );
        }
        if !self.endpoint_url.starts_with("http://")
            && !self.endpoint_url.starts_with("https://")
        {
            return AnalyticsError::new_error_result(
                AnalyticsErrorType::InvalidEndpointUrl,
                &format!("endpoint url {:?} is not http(s)", self.endpoint_url),
            );
        }
        Ok(())
    }
}

/// `UA-XXXXX-Y`: a two-letter prefix and two numeric segments.
fn is_well_formed_tracking_id(tracking_id: &str) -> bool {
    let mut segments = tracking_id.split('-');
    let (Some(prefix), Some(property), Some(index), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return false;
    };
    prefix.len() == 2
        && prefix.chars().all(|c| c.is_ascii_alphabetic())
        && !property.is_empty()
        && property.chars().all(|c| c.is_ascii_digit())
        && !index.is_empty()
        && index.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("UA-12345-1", true; "canonical")]
    #[test_case("ua-1-1", true; "lowercase prefix accepted")]
    #[test_case("UA-12345", false; "missing index")]
    #[test_case("UA--1", false; "empty property")]
    #[test_case("UA-12a45-1", false; "non numeric property")]
    #[test_case("", false; "empty")]
    #[test_case("UA-1-1-1", false; "too many segments")]
    fn tracking_id_shape(tracking_id: &str, well_formed: bool) {
        assert_eq!(is_well_formed_tracking_id(tracking_id), well_formed);
    }

    #[test]
    fn construction_defaults() {
        let config = TrackerConfig::new("UA-12345-1");
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert!(config.enabled);
        assert_eq!(config.validation_policy, ValidationPolicy::Permissive);
        // A client id is always present, generated when not supplied.
        assert!(!config.default_client_id.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bad_tracking_id_fails_validation() {
        let config = TrackerConfig::new("not-a-tracking-id");
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_endpoint_fails_validation() {
        let config = TrackerConfig::new("UA-12345-1").with_endpoint_url("ftp://nope");
        assert!(config.validate().is_err());
    }

    #[test]
    fn fluent_overrides() {
        let config = TrackerConfig::new("UA-12345-1")
            .with_client_id("35009a79-1a05-49d7-b876-2b884d0f825b")
            .with_application("my-app", "1.2.3")
            .with_enabled(false);
        assert_eq!(config.default_client_id, "35009a79-1a05-49d7-b876-2b884d0f825b");
        assert_eq!(config.default_application_name.as_deref(), Some("my-app"));
        assert!(!config.enabled);
    }
}

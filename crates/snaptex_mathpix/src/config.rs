/// Environment variable holding the Mathpix application id.
pub const ENV_APP_ID: &str = "MATHPIX_APP_ID";
/// Environment variable holding the Mathpix application key.
pub const ENV_APP_KEY: &str = "MATHPIX_APP_KEY";

/// Fixed recognition endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.mathpix.com/v3/text";

/// What to do when the remote call fails (transport error, non-JSON body).
///
/// A well-formed response without a `latex_simplified` field is not a failure
/// in either mode; it means no formula was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Downgrade failures to an empty result so the viewer always opens.
    #[default]
    EmptyResult,
    /// Propagate failures to the caller.
    Propagate,
}

/// Client configuration, constructed once at startup and threaded into the
/// capture dispatcher.
#[derive(Debug, Clone)]
pub struct MathpixConfig {
    pub app_id: String,
    pub app_key: String,
    pub endpoint: String,
    pub failure_policy: FailurePolicy,
}

impl MathpixConfig {
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Read credentials from the process environment.
    ///
    /// Missing variables are not validated here; an empty credential simply
    /// yields an authentication failure from the remote service.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(ENV_APP_ID).unwrap_or_default(),
            std::env::var(ENV_APP_KEY).unwrap_or_default(),
        )
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_ENDPOINT, FailurePolicy, MathpixConfig};

    #[test]
    fn defaults_to_fixed_endpoint_and_silent_failures() {
        let config = MathpixConfig::new("id", "key");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.failure_policy, FailurePolicy::EmptyResult);
    }

    #[test]
    fn builder_overrides_apply() {
        let config = MathpixConfig::new("id", "key")
            .with_endpoint("http://127.0.0.1:9999/v3/text")
            .with_failure_policy(FailurePolicy::Propagate);
        assert_eq!(config.endpoint, "http://127.0.0.1:9999/v3/text");
        assert_eq!(config.failure_policy, FailurePolicy::Propagate);
    }
}

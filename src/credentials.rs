use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;
use serde::Deserialize;

use crate::{BaasError, Result};

/// Raw configuration for [`Credentials`].
///
/// Can be filled in code or deserialized from any serde source.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Base URL of the REST API, e.g. `https://api.example.com/1`.
    pub endpoint_url: String,
    /// Application identifier sent with every request.
    pub application_id: String,
    /// REST API key used in session mode.
    pub api_key: Option<String>,
    /// Master key used in master mode.
    pub master_key: Option<String>,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Ask the backend for revocable session tokens.
    pub revocable_session: bool,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            application_id: String::new(),
            api_key: None,
            master_key: None,
            timeout_ms: 5_000,
            revocable_session: false,
        }
    }
}

/// Validated, immutable endpoint and key bundle.
///
/// Shared read-only between any number of [`Session`](crate::Session)s,
/// usually behind an `Arc`.
#[derive(Clone)]
pub struct Credentials {
    endpoint_url: String,
    application_id: String,
    api_key: Option<String>,
    master_key: Option<String>,
    timeout: Duration,
    revocable_session: bool,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint_url", &self.endpoint_url)
            .field("application_id", &self.application_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("master_key", &self.master_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("revocable_session", &self.revocable_session)
            .finish()
    }
}

impl Credentials {
    /// Validates a configuration.
    ///
    /// Fails with [`BaasError::Config`] when the endpoint or application id
    /// is empty, when neither key is set, when a key or the application id
    /// cannot be sent as a header value, or when the timeout is zero.
    pub fn new(config: CredentialsConfig) -> Result<Self> {
        let endpoint_url = config.endpoint_url.trim().trim_end_matches('/').to_owned();
        if endpoint_url.is_empty() {
            return Err(BaasError::Config("endpoint url is empty".to_owned()));
        }

        let application_id = config.application_id.trim().to_owned();
        if application_id.is_empty() {
            return Err(BaasError::Config("application id is empty".to_owned()));
        }

        let api_key = non_empty(config.api_key);
        let master_key = non_empty(config.master_key);
        if api_key.is_none() && master_key.is_none() {
            return Err(BaasError::Config(
                "api key and master key are both empty".to_owned(),
            ));
        }

        check_header_value("application id", &application_id)?;
        if let Some(key) = &api_key {
            check_header_value("api key", key)?;
        }
        if let Some(key) = &master_key {
            check_header_value("master key", key)?;
        }

        if config.timeout_ms == 0 {
            return Err(BaasError::Config("timeout must be greater than zero".to_owned()));
        }

        #[cfg(feature = "tracing")]
        if api_key.is_none() {
            tracing::warn!("no api key configured; only master-mode calls will be authorized");
        }

        Ok(Self {
            endpoint_url,
            application_id,
            api_key,
            master_key,
            timeout: Duration::from_millis(config.timeout_ms),
            revocable_session: config.revocable_session,
        })
    }

    /// Builds credentials from environment variables.
    ///
    /// Reads:
    /// - `BAAS_ENDPOINT_URL` — base REST URL (required)
    /// - `BAAS_APPLICATION_ID` — application id (required)
    /// - `BAAS_API_KEY` — REST API key
    /// - `BAAS_MASTER_KEY` — master key
    /// - `BAAS_TIMEOUT_MS` — request timeout, defaults to 5000
    /// - `BAAS_REVOCABLE_SESSION` — `1` or `true` to request revocable sessions
    ///
    /// **Not available on `wasm32` targets.**
    ///
    /// # Example
    ///
    /// ```no_run
    /// use baas_http::Credentials;
    ///
    /// let credentials = Credentials::from_env().expect("missing BAAS_* env vars");
    /// ```
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CredentialsConfig {
            endpoint_url: lookup("BAAS_ENDPOINT_URL").ok_or_else(|| {
                BaasError::Config("missing BAAS_ENDPOINT_URL environment variable".to_owned())
            })?,
            application_id: lookup("BAAS_APPLICATION_ID").ok_or_else(|| {
                BaasError::Config("missing BAAS_APPLICATION_ID environment variable".to_owned())
            })?,
            api_key: lookup("BAAS_API_KEY"),
            master_key: lookup("BAAS_MASTER_KEY"),
            ..CredentialsConfig::default()
        };

        if let Some(value) = lookup("BAAS_TIMEOUT_MS") {
            config.timeout_ms = value.trim().parse().map_err(|err| {
                BaasError::Config(format!("invalid BAAS_TIMEOUT_MS '{value}': {err}"))
            })?;
        }
        if let Some(value) = lookup("BAAS_REVOCABLE_SESSION") {
            let value = value.trim();
            config.revocable_session = value == "1" || value.eq_ignore_ascii_case("true");
        }

        Self::new(config)
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn revocable_session(&self) -> bool {
        self.revocable_session
    }

    pub fn has_master_key(&self) -> bool {
        self.master_key.is_some()
    }

    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub(crate) fn master_key(&self) -> Option<&str> {
        self.master_key.as_deref()
    }

    pub(crate) fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.endpoint_url, path)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Converts `value` into a header value; control bytes such as CR/LF are
/// rejected as [`BaasError::Config`].
pub(crate) fn header_value(what: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| BaasError::Config(format!("{what} is not a valid header value")))
}

fn check_header_value(what: &str, value: &str) -> Result<()> {
    header_value(what, value).map(|_| ())
}

//! NS web service HTTP gateway.
//!
//! Authenticates with HTTP Basic credentials sent on every request and
//! parses each response body into a [`Document`].

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::xml::{Document, XmlNode};

use super::endpoint::{Endpoint, QueryOptions};
use super::error::NsError;
use super::gateway::Gateway;

/// Default base URL for the NS web services.
pub const DEFAULT_BASE_URL: &str = "https://webservices.ns.nl";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the HTTP gateway.
#[derive(Clone)]
pub struct NsConfig {
    pub username: String,
    pub password: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NsConfig {
    /// Create a new config with the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn authorization(&self) -> Result<HeaderValue, NsError> {
        let credentials = STANDARD.encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::from_str(&format!("Basic {credentials}"))
            .map_err(|e| NsError::InvalidConfig(format!("authorization header: {e}")))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for NsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NsConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Gateway to the live NS web service.
///
/// Cloning is cheap and clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a new gateway with the given configuration.
    pub fn new(config: NsConfig) -> Result<Self, NsError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, config.authorization()?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full request URL for an endpoint and its options.
    pub fn url(&self, endpoint: Endpoint, options: &QueryOptions) -> String {
        format!("{}{}{}", self.base_url, endpoint.path(), options.encode())
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn fetch(&self, endpoint: Endpoint, options: &QueryOptions) -> Result<Document, NsError> {
        let url = self.url(endpoint, options);
        debug!(%endpoint, %url, "fetching");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            warn!(%endpoint, status = status.as_u16(), "credentials rejected");
            return Err(NsError::Authentication);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%endpoint, status = status.as_u16(), "request failed");
            return Err(NsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        debug!(%endpoint, bytes = body.len(), "received response");

        let document = Document::parse(&body)?;
        check_error_document(&document, status.as_u16())?;
        Ok(document)
    }

    async fn verify_login(&self) -> bool {
        let url = format!("{}{}", self.base_url, Endpoint::Departures.path());

        match self.http.get(&url).send().await {
            Ok(response) => {
                let ok = response.status() == reqwest::StatusCode::OK;
                debug!(status = response.status().as_u16(), ok, "login check");
                ok
            }
            Err(e) => {
                warn!(error = %e, "login check failed");
                false
            }
        }
    }
}

/// The service reports bad requests as `<error><message>..</message></error>`,
/// sometimes with a success status.
fn check_error_document(document: &Document, status: u16) -> Result<(), NsError> {
    let Some(root) = document.root() else {
        return Ok(());
    };
    if !root.tag().eq_ignore_ascii_case("error") {
        return Ok(());
    }

    let message = root
        .find_first("message")
        .map(XmlNode::text)
        .unwrap_or_else(|| root.text());
    Err(NsError::Api { status, message })
}

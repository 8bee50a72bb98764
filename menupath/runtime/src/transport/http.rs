//! JSON-over-HTTP transport.
//!
//! Each command is one `POST {base}/execute` carrying
//! `{"path": ..., "args": [...], "kwargs": {...}}`. A 2xx reply carries
//! `{"result": ...}` or, for a rejected command, `{"error": "...", "payload": ...}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{Span, instrument};
use url::Url;

use super::Transport;
use crate::error::{ConfigError, RemoteError, TransportError};
use crate::path::TransportAddress;
use crate::value::{Kwargs, Value};

/// Route appended to the base URL.
const EXECUTE_ROUTE: &str = "execute";

/// Environment variable holding the base URL for [`HttpTransport::from_env`].
pub const URL_ENV: &str = "MENUPATH_URL";

/// Environment variable holding an optional timeout in seconds.
pub const TIMEOUT_ENV: &str = "MENUPATH_TIMEOUT_SECS";

#[derive(Serialize)]
struct ExecuteEnvelope<'a> {
    path: &'a str,
    args: &'a [Value],
    kwargs: &'a Kwargs,
}

#[derive(Deserialize)]
struct ExecuteReply {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    payload: Option<Value>,
}

/// Builder for configuring an [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    base_url: Url,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
}

impl HttpTransportBuilder {
    fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
            default_headers: HeaderMap::new(),
        }
    }

    /// Sets a per-call timeout. Without one, calls wait for the engine.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let transport = HttpTransport::builder(base_url)
    ///     .timeout(Duration::from_secs(600))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every call.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Builds the [`HttpTransport`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the endpoint URL cannot be formed or the HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<HttpTransport, ConfigError> {
        let mut base = self.base_url;
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        let endpoint = base.join(EXECUTE_ROUTE)?;

        let mut client = reqwest::Client::builder()
            .default_headers(self.default_headers)
            .pool_max_idle_per_host(4);
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }

        Ok(HttpTransport {
            client: client.build()?,
            endpoint,
            timeout: self.timeout,
        })
    }
}

/// Transport that posts each command to an HTTP bridge in front of the
/// remote engine.
///
/// Reply classification:
///
/// - 2xx with `result` - success
/// - 2xx with `error` - [`RemoteError`] carrying the text and payload
/// - other 4xx/5xx - [`RemoteError`] carrying the body verbatim
/// - 502/503, refused connections and connections dropped mid-reply -
///   `Disconnected`
/// - NaN or infinite float arguments - [`RemoteError`], nothing is sent
/// - 504 and client-side timeouts - [`RemoteError`] flagged as timeout
///
/// ## Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use menupath_runtime::{HttpTransport, MenuNode};
///
/// let transport = HttpTransport::from_env()?;
/// let root = MenuNode::root(Arc::new(transport));
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a builder for the given bridge URL.
    pub fn builder(base_url: Url) -> HttpTransportBuilder {
        HttpTransportBuilder::new(base_url)
    }

    /// Creates a transport with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, ConfigError> {
        Self::builder(base_url).build()
    }

    /// Creates a transport from `MENUPATH_URL` and the optional
    /// `MENUPATH_TIMEOUT_SECS`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the URL variable is unset or either value fails
    /// to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var(URL_ENV).map_err(|_| ConfigError::MissingEnv { var: URL_ENV })?;
        let mut builder = Self::builder(Url::parse(&url)?);
        if let Ok(secs) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: TIMEOUT_ENV,
                value: secs.clone(),
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    /// The URL commands are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            RemoteError::timeout(self.timeout.unwrap_or_default()).into()
        } else if err.is_connect() || err.is_request() {
            TransportError::disconnected(err.to_string())
        } else {
            TransportError::remote(err.to_string())
        }
    }

    /// Failures while reading the reply body mean the connection went away
    /// after the status line arrived.
    fn classify_body(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            RemoteError::timeout(self.timeout.unwrap_or_default()).into()
        } else {
            TransportError::disconnected(format!("connection lost while reading reply: {err}"))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(
        name = "http_execute",
        skip(self, args, kwargs),
        fields(
            http.url = %self.endpoint,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    async fn execute(
        &self,
        address: &TransportAddress,
        args: &[Value],
        kwargs: &Kwargs,
    ) -> Result<Value, TransportError> {
        if args
            .iter()
            .chain(kwargs.iter().map(|(_, value)| value))
            .any(Value::contains_non_finite)
        {
            return Err(TransportError::remote(
                "non-finite float argument cannot be encoded as JSON",
            ));
        }

        let envelope = ExecuteEnvelope {
            path: address.as_str(),
            args,
            kwargs,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&envelope)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let body = response.text().await.map_err(|e| self.classify_body(e))?;

        if !status.is_success() {
            let message = if body.is_empty() {
                status.to_string()
            } else {
                body
            };
            return Err(match status {
                StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE => {
                    TransportError::disconnected(message)
                }
                StatusCode::GATEWAY_TIMEOUT => {
                    RemoteError::timeout(self.timeout.unwrap_or_default()).into()
                }
                _ => TransportError::remote(message),
            });
        }

        let reply: ExecuteReply = serde_json::from_str(&body)
            .map_err(|e| TransportError::remote(format!("malformed reply: {e}")))?;

        match reply.error {
            Some(message) => {
                let mut err = RemoteError::new(message);
                if let Some(payload) = reply.payload {
                    err = err.with_payload(payload);
                }
                Err(err.into())
            }
            None => Ok(reply.result),
        }
    }
}

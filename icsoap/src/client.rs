//! SOAP transport client
//!
//! A [`SoapClient`] is an immutable, cheaply cloneable handle: every clone
//! shares the same settings, prebuilt headers and HTTP transport, so calls
//! can run concurrently from any number of tasks without locking.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use reqwest::header::{
    AUTHORIZATION, CONNECTION, CONTENT_TYPE as CONTENT_TYPE_HEADER, HeaderMap, HeaderName,
    HeaderValue, USER_AGENT as USER_AGENT_HEADER,
};
use tracing::{debug, warn};
use url::Url;

use crate::context::CallContext;
use crate::error::{ConfigError, Result, SoapError, TransportError};
use crate::soap::{Envelope, FromXml, Rpc, decode_response};
use crate::transport::{
    HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TlsSettings, TransportSettings,
};
use crate::{
    CONTENT_TYPE, DEFAULT_CONNECTION_TIMEOUT, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_TLS_HANDSHAKE_TIMEOUT, USER_AGENT,
};

/// Tracing target of raw request/response dumps
pub const WIRE_TARGET: &str = "icsoap::wire";

/// HTTP basic auth credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn header_value(&self) -> std::result::Result<HeaderValue, ConfigError> {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::from_str(&format!("Basic {token}"))
            .map_err(|_| ConfigError::InvalidHeader(AUTHORIZATION.to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Effective configuration of a built client
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: Url,
    pub credentials: Option<Credentials>,
    pub tls: Option<TlsSettings>,
    pub request_timeout: Duration,
    pub connection_timeout: Duration,
    pub tls_handshake_timeout: Duration,
    pub extra_headers: HeaderMap,
    pub debug: bool,
}

/// iControl SOAP client
///
/// # Example
///
/// ```no_run
/// use icsoap::{CallContext, SoapClient};
/// use icsoap::soap::{Envelope, Rpc};
///
/// # async fn run() -> icsoap::Result<()> {
/// let client = SoapClient::builder("https://10.0.0.1/iControl/iControlPortal.cgi")
///     .basic_auth("admin", "admin")
///     .debug(true)
///     .build()?;
///
/// let envelope = Envelope::new("urn:iControl:System/SystemInfo", Rpc::new("get_version"));
/// let raw = client.call(&CallContext::background(), &envelope).await?;
/// println!("{}", String::from_utf8_lossy(&raw));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SoapClient {
    inner: Arc<Inner>,
}

struct Inner {
    settings: ClientSettings,
    headers: HeaderMap,
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for SoapClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoapClient")
            .field("settings", &self.inner.settings)
            .finish_non_exhaustive()
    }
}

impl SoapClient {
    /// Create a builder targeting `endpoint`
    pub fn builder(endpoint: impl Into<String>) -> SoapClientBuilder {
        SoapClientBuilder::new(endpoint)
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.inner.settings
    }

    pub fn endpoint(&self) -> &Url {
        &self.inner.settings.endpoint
    }

    /// Sends one envelope and returns the raw response body.
    ///
    /// The body of a 2xx/3xx answer is returned unmodified. A status >= 400
    /// yields [`SoapError::HttpStatus`] with the body as received; it is not
    /// parsed.
    pub async fn call(&self, ctx: &CallContext, envelope: &Envelope) -> Result<Bytes> {
        if ctx.is_cancelled() {
            return Err(TransportError::Cancelled.into());
        }
        if ctx.is_expired() {
            return Err(TransportError::DeadlineExceeded.into());
        }

        let body = envelope.encode()?;
        let rpc = envelope.rpc().name();
        let debug_wire = self.inner.settings.debug;

        if debug_wire {
            debug!(
                target: WIRE_TARGET,
                rpc,
                namespace = envelope.target_namespace(),
                "request:\n{}",
                String::from_utf8_lossy(&body)
            );
        }

        let request = HttpRequest {
            url: self.inner.settings.endpoint.clone(),
            headers: self.inner.headers.clone(),
            body: Bytes::from(body),
        };

        let response = match self.send(ctx, request).await {
            Ok(response) => response,
            Err(err) => {
                debug!(rpc, error = %err, "iControl request failed");
                return Err(err.into());
            }
        };

        if debug_wire {
            debug!(
                target: WIRE_TARGET,
                rpc,
                status = response.status,
                "response:\n{}",
                String::from_utf8_lossy(&response.body)
            );
        }

        if response.status >= 400 {
            warn!(rpc, status = response.status, "iControl returned an HTTP error");
            return Err(SoapError::HttpStatus {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response.body)
    }

    /// Builds the envelope for `rpc`, sends it and decodes the `return` value.
    pub async fn invoke<T: FromXml>(
        &self,
        ctx: &CallContext,
        namespace: &str,
        rpc: Rpc,
    ) -> Result<T> {
        let rpc_name = rpc.name().to_string();
        let envelope = Envelope::new(namespace, rpc);
        let raw = self.call(ctx, &envelope).await?;
        decode_response(&raw, &rpc_name)
    }

    async fn send(
        &self,
        ctx: &CallContext,
        request: HttpRequest,
    ) -> std::result::Result<HttpResponse, TransportError> {
        let deadline = async {
            match ctx.get_deadline() {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = ctx.token().cancelled() => Err(TransportError::Cancelled),
            _ = deadline => Err(TransportError::DeadlineExceeded),
            result = self.inner.transport.send(request) => result,
        }
    }
}

/// Builder for [`SoapClient`]
///
/// Later settings override earlier ones. Validation happens in
/// [`SoapClientBuilder::build`].
pub struct SoapClientBuilder {
    endpoint: String,
    credentials: Option<Credentials>,
    tls: Option<TlsSettings>,
    request_timeout: Duration,
    connection_timeout: Duration,
    tls_handshake_timeout: Duration,
    headers: Vec<(String, String)>,
    debug: bool,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl fmt::Debug for SoapClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoapClientBuilder")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .field("tls", &self.tls)
            .field("request_timeout", &self.request_timeout)
            .field("connection_timeout", &self.connection_timeout)
            .field("tls_handshake_timeout", &self.tls_handshake_timeout)
            .field("headers", &self.headers)
            .field("debug", &self.debug)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

impl SoapClientBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            credentials: None,
            tls: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
            tls_handshake_timeout: DEFAULT_TLS_HANDSHAKE_TIMEOUT,
            headers: Vec::new(),
            debug: false,
            transport: None,
        }
    }

    /// Dial timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Total round-trip timeout
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn tls_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.tls_handshake_timeout = timeout;
        self
    }

    pub fn tls(mut self, tls: TlsSettings) -> Self {
        self.tls = Some(tls);
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    pub fn credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Adds a header sent with every request.
    ///
    /// `Content-Type` and `Connection` are fixed and cannot be overridden.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Dump raw request and response bodies at debug level
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Use a custom HTTP transport instead of the reqwest one
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<SoapClient> {
        let endpoint = parse_endpoint(&self.endpoint)?;
        let extra_headers = parse_headers(&self.headers)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE_HEADER, HeaderValue::from_static(CONTENT_TYPE));
        headers.insert(USER_AGENT_HEADER, HeaderValue::from_static(USER_AGENT));
        headers.insert(CONNECTION, HeaderValue::from_static("close"));
        if let Some(credentials) = &self.credentials {
            headers.insert(AUTHORIZATION, credentials.header_value()?);
        }
        for (name, value) in &extra_headers {
            headers.insert(name.clone(), value.clone());
        }

        let settings = ClientSettings {
            endpoint,
            credentials: self.credentials,
            tls: self.tls,
            request_timeout: self.request_timeout,
            connection_timeout: self.connection_timeout,
            tls_handshake_timeout: self.tls_handshake_timeout,
            extra_headers,
            debug: self.debug,
        };

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&TransportSettings {
                request_timeout: settings.request_timeout,
                connection_timeout: settings.connection_timeout,
                tls_handshake_timeout: settings.tls_handshake_timeout,
                tls: settings.tls.clone(),
            })?),
        };

        debug!(endpoint = %settings.endpoint, debug = settings.debug, "iControl client ready");

        Ok(SoapClient {
            inner: Arc::new(Inner {
                settings,
                headers,
                transport,
            }),
        })
    }
}

fn parse_endpoint(endpoint: &str) -> std::result::Result<Url, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: reason.to_string(),
    };

    if endpoint.trim().is_empty() {
        return Err(invalid("endpoint is empty"));
    }

    let url = Url::parse(endpoint).map_err(|e| invalid(&e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(&format!("unsupported scheme {other:?}"))),
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    Ok(url)
}

fn parse_headers(headers: &[(String, String)]) -> std::result::Result<HeaderMap, ConfigError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
        if header_name == CONTENT_TYPE_HEADER || header_name == CONNECTION {
            warn!(header = %header_name, "ignoring extra header, the value is fixed");
            continue;
        }
        let header_value =
            HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = SoapClientBuilder::new("https://bigip.local/iControl/iControlPortal.cgi");
        assert_eq!(builder.request_timeout, Duration::from_secs(30));
        assert_eq!(builder.connection_timeout, Duration::from_secs(90));
        assert_eq!(builder.tls_handshake_timeout, Duration::from_secs(15));
        assert!(!builder.debug);
        assert!(builder.credentials.is_none());
    }

    #[test]
    fn later_settings_override_earlier_ones() {
        let client = SoapClient::builder("http://127.0.0.1:8080/iControl/iControlPortal.cgi")
            .request_timeout(Duration::from_secs(1))
            .request_timeout(Duration::from_secs(5))
            .basic_auth("a", "b")
            .basic_auth("admin", "secret")
            .build()
            .unwrap();

        let settings = client.settings();
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(
            settings.credentials,
            Some(Credentials::new("admin", "secret"))
        );
    }

    #[test]
    fn empty_or_relative_endpoint_is_rejected() {
        for endpoint in ["", "   ", "/iControl/iControlPortal.cgi", "ftp://host/x"] {
            let err = SoapClient::builder(endpoint).build().unwrap_err();
            assert!(
                matches!(err, SoapError::Config(ConfigError::InvalidEndpoint { .. })),
                "{endpoint:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn reserved_headers_are_not_overridden() {
        let client = SoapClient::builder("http://127.0.0.1/iControl")
            .header("Content-Type", "application/json")
            .header("Connection", "keep-alive")
            .header("X-Trace", "abc")
            .build()
            .unwrap();

        let headers = &client.inner.headers;
        assert_eq!(headers[CONTENT_TYPE_HEADER], CONTENT_TYPE);
        assert_eq!(headers[CONNECTION], "close");
        assert_eq!(headers["x-trace"], "abc");
        assert!(!client.settings().extra_headers.contains_key(CONTENT_TYPE_HEADER));
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let err = SoapClient::builder("http://127.0.0.1/iControl")
            .header("bad header", "x")
            .build()
            .unwrap_err();
        assert!(matches!(err, SoapError::Config(ConfigError::InvalidHeader(_))));
    }

    #[test]
    fn basic_auth_header_is_sensitive() {
        let client = SoapClient::builder("http://127.0.0.1/iControl")
            .basic_auth("admin", "admin")
            .build()
            .unwrap();
        let value = &client.inner.headers[AUTHORIZATION];
        assert_eq!(value, "Basic YWRtaW46YWRtaW4=");
        assert!(value.is_sensitive());

        let shown = format!("{:?}", Credentials::new("admin", "s3cret"));
        assert!(shown.contains("admin"));
        assert!(!shown.contains("s3cret"));
    }
}

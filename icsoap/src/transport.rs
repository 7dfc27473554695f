//! HTTP transport seam
//!
//! [`SoapClient`](crate::SoapClient) prepares a complete [`HttpRequest`]
//! (URL, headers, body) and hands it to an [`HttpTransport`]. The default
//! implementation is [`ReqwestTransport`]; tests and embedders can inject
//! their own.

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::header::HeaderMap;
use reqwest::{Certificate, Client};
use tracing::debug;
use url::Url;

use crate::error::{ConfigError, TransportError};

/// A fully prepared POST request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Status and complete body of an HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Sends one request and reads the whole response body.
///
/// Implementations must be usable concurrently from many tasks.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// TLS settings applied to the default transport
#[derive(Debug, Clone, Default)]
pub struct TlsSettings {
    /// Skip certificate verification (self-signed management interfaces)
    pub accept_invalid_certs: bool,
    /// Additional PEM-encoded trust anchors, one bundle per entry
    pub root_certificates: Vec<Vec<u8>>,
}

impl TlsSettings {
    /// Settings for a device presenting a self-signed certificate
    pub fn insecure() -> Self {
        Self {
            accept_invalid_certs: true,
            ..Self::default()
        }
    }

    /// Adds a PEM-encoded CA certificate
    pub fn with_root_certificate(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.root_certificates.push(pem.into());
        self
    }
}

/// Timeouts and TLS used to build the default transport
#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub request_timeout: Duration,
    pub connection_timeout: Duration,
    pub tls_handshake_timeout: Duration,
    pub tls: Option<TlsSettings>,
}

/// [`HttpTransport`] backed by a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds the client from the transport settings.
    ///
    /// reqwest has a single connect timeout covering TCP and TLS, so the
    /// dial and handshake budgets are added together.
    pub fn new(settings: &TransportSettings) -> Result<Self, ConfigError> {
        let mut builder = Client::builder()
            .connect_timeout(settings.request_timeout + settings.tls_handshake_timeout)
            .timeout(settings.connection_timeout)
            .pool_max_idle_per_host(0)
            .http1_only();

        if let Some(tls) = &settings.tls {
            builder = builder.danger_accept_invalid_certs(tls.accept_invalid_certs);
            for pem in &tls.root_certificates {
                let certificates = Certificate::from_pem_bundle(pem)
                    .map_err(|e| ConfigError::Tls(e.to_string()))?;
                if certificates.is_empty() {
                    return Err(ConfigError::Tls(
                        "no PEM certificate found in CA bundle".to_string(),
                    ));
                }
                for certificate in certificates {
                    builder = builder.add_root_certificate(certificate);
                }
            }
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wraps an existing client, e.g. one shared with other services
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut response = self
            .client
            .post(request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let mut body = BytesMut::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => body.extend_from_slice(&chunk),
                Ok(None) => break,
                // The status alone classifies an error answer
                Err(err) if status >= 400 => {
                    debug!(status, error = %err, "error body truncated");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(HttpResponse {
            status,
            body: body.freeze(),
        })
    }
}

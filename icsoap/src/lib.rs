//! # icsoap - SOAP transport for the iControl API
//!
//! `icsoap` is the generic layer under the iControl module clients: it builds
//! the request envelope, POSTs it to the device and hands back the raw
//! response, classifying every failure.
//!
//! ## Features
//!
//! - **Envelope protocol**: one parameterised envelope for every RPC, with
//!   the `item` wrapper convention for sequences ([`soap`])
//! - **Transport**: async reqwest client with Basic auth, TLS settings and
//!   the three configurable timeouts ([`SoapClient`])
//! - **Cancellation**: per-call token and deadline ([`CallContext`])
//! - **Errors**: `Encoding`, `Transport`, `HttpStatus`, `Decoding`
//!   ([`SoapError`])
//!
//! ## Quick Start
//!
//! ```no_run
//! use icsoap::{CallContext, SoapClient};
//! use icsoap::soap::Rpc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SoapClient::builder("https://bigip.example.net/iControl/iControlPortal.cgi")
//!         .basic_auth("admin", "secret")
//!         .build()?;
//!
//!     let ctx = CallContext::background();
//!     let names: Vec<String> = client
//!         .invoke(&ctx, "urn:iControl:GlobalLB/WideIP", Rpc::new("get_list"))
//!         .await?;
//!
//!     for name in names {
//!         println!("{name}");
//!     }
//!     Ok(())
//! }
//! ```

#[macro_use]
mod macros;

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod soap;
pub mod task;
pub mod transport;

use std::time::Duration;

pub use client::{ClientSettings, Credentials, SoapClient, SoapClientBuilder};
pub use config::ClientConfig;
pub use context::CallContext;
pub use error::{
    BoxError, ConfigError, DecodeError, EncodeError, Result, SoapError, TransportError,
};
pub use task::spawn_guarded;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TlsSettings};

/// Dial timeout applied when none is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Total round-trip timeout applied when none is configured
pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(90);

/// TLS handshake timeout applied when none is configured
pub const DEFAULT_TLS_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(15);

/// User-Agent sent with every request
pub const USER_AGENT: &str = concat!("icsoap/", env!("CARGO_PKG_VERSION"));

/// Content-Type of every request
pub const CONTENT_TYPE: &str = r#"text/xml; charset="utf-8""#;

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use xmltree;
}

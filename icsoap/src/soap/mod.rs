//! # SOAP envelope protocol
//!
//! Every iControl request is the same document: a root `env:Envelope`
//! declaring five namespaces, an `env:Body`, and one `tns:<rpc>` element
//! holding the parameters. Every response nests its payload as
//! `Envelope → Body → <rpc>Response → return`.
//!
//! ## Architecture
//!
//! - [`Envelope`] / [`Rpc`] : request side, one codec parameterised by
//!   target namespace and RPC name
//! - [`decode_response`] : response side, walks down to `return`
//! - [`ToXml`] / [`FromXml`] : value codec, including the `item` wrapper
//!   convention for sequences ([`wrap_items`], [`flatten_items`])
//! - [`SoapFault`] : fault documents, parsed on demand only
//!
//! ## Example
//!
//! ```
//! use icsoap::soap::{Envelope, Rpc, decode_response};
//!
//! let names = vec!["/Common/pool_a".to_string(), "/Common/pool_b".to_string()];
//! let envelope = Envelope::new(
//!     "urn:iControl:GlobalLB/Pool",
//!     Rpc::new("get_ttl").param("pool_names", &names),
//! );
//! let xml = String::from_utf8(envelope.encode().unwrap()).unwrap();
//! assert!(xml.contains("<tns:get_ttl>"));
//! assert!(xml.contains("<item>/Common/pool_a</item>"));
//!
//! let response = br#"<E:Envelope xmlns:E="http://schemas.xmlsoap.org/soap/envelope/">
//!   <E:Body><m:get_ttlResponse xmlns:m="urn:iControl:GlobalLB/Pool">
//!     <return><item>30</item><item>60</item></return>
//!   </m:get_ttlResponse></E:Body></E:Envelope>"#;
//! let ttls: Vec<i64> = decode_response(response, "get_ttl").unwrap();
//! assert_eq!(ttls, vec![30, 60]);
//! ```

mod codec;
mod envelope;
mod fault;
mod parser;

pub use codec::{
    FromXml, ITEM, ToXml, decode_field, element_text, find_child, flatten_items, text_element,
    wrap_items,
};
pub use envelope::{Envelope, Rpc};
pub use fault::SoapFault;
pub use parser::{ParsedEnvelope, decode_response, parse_envelope};

/// Namespaces declared on every envelope
pub mod namespaces {
    /// XML Schema
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema";

    /// XML Schema instance
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

    /// SOAP 1.1 envelope
    pub const ENV: &str = "http://schemas.xmlsoap.org/soap/envelope/";

    /// Vendor alias bound to `ins0`
    pub const INS0: &str = "urn:iControl";
}

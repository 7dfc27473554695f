//! SOAP response parsing

use xmltree::Element;

use super::codec::{FromXml, find_child};
use super::fault::SoapFault;
use crate::error::{DecodeError, Result, SoapError};

/// Tag of the element holding an RPC result
const RETURN: &str = "return";

/// Envelope and body elements of a parsed response
#[derive(Debug, Clone)]
pub struct ParsedEnvelope {
    pub header: Option<Element>,
    pub body: Element,
}

impl ParsedEnvelope {
    /// The single element carried by the body, if any
    pub fn payload(&self) -> Option<&Element> {
        self.body.children.iter().find_map(|n| n.as_element())
    }
}

/// Parses a SOAP envelope from raw bytes
pub fn parse_envelope(xml: &[u8]) -> std::result::Result<ParsedEnvelope, DecodeError> {
    let root = Element::parse(xml)?;

    if root.name != "Envelope" {
        return Err(DecodeError::MissingEnvelope);
    }

    let header = find_child(&root, "Header").cloned();
    let body = find_child(&root, "Body")
        .cloned()
        .ok_or(DecodeError::MissingBody)?;

    Ok(ParsedEnvelope { header, body })
}

/// Decodes `Envelope → Body → {rpc}Response → return` into `T`.
///
/// Any failure is reported as [`SoapError::Decoding`] carrying `raw`.
pub fn decode_response<T: FromXml>(raw: &[u8], rpc: &str) -> Result<T> {
    decode_return(raw, rpc).map_err(|source| SoapError::decoding(source, raw))
}

fn decode_return<T: FromXml>(raw: &[u8], rpc: &str) -> std::result::Result<T, DecodeError> {
    let envelope = parse_envelope(raw)?;
    let response_name = format!("{rpc}Response");

    let response = match find_child(&envelope.body, &response_name) {
        Some(response) => response,
        None => {
            return Err(match find_child(&envelope.body, "Fault") {
                Some(fault) => DecodeError::Fault(SoapFault::from_element(fault)),
                None => DecodeError::MissingElement(response_name),
            });
        }
    };

    match find_child(response, RETURN) {
        Some(value) => T::from_xml(value),
        None => T::from_absent(RETURN),
    }
}

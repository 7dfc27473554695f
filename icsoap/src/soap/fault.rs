//! SOAP Faults returned by iControl

use std::fmt;

use xmltree::Element;

use super::codec::{element_text, find_child};
use super::parser::parse_envelope;

/// A SOAP Fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    /// Fault code (e.g. "SOAP-ENV:Server")
    pub fault_code: String,

    /// Error message
    pub fault_string: String,
}

impl SoapFault {
    /// Extracts the fault from a full response document.
    ///
    /// Returns `None` when the body is not an envelope carrying a Fault.
    pub fn parse(body: &[u8]) -> Option<SoapFault> {
        let envelope = parse_envelope(body).ok()?;
        find_child(&envelope.body, "Fault").map(SoapFault::from_element)
    }

    pub(crate) fn from_element(fault: &Element) -> SoapFault {
        let text_of = |name: &str| {
            find_child(fault, name)
                .map(|e| element_text(e).trim().to_string())
                .unwrap_or_default()
        };

        SoapFault {
            fault_code: text_of("faultcode"),
            fault_string: text_of("faultstring"),
        }
    }
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.fault_code, self.fault_string)
    }
}

//! Request envelope construction

use xmltree::{Element, EmitterConfig, XMLNode};

use super::codec::ToXml;
use super::namespaces;
use crate::error::EncodeError;

/// One RPC invocation: the operation name and its ordered parameters.
///
/// Serialized as `<tns:{name}>` holding one child per parameter, in the
/// order they were added.
#[derive(Debug, Clone)]
pub struct Rpc {
    name: String,
    params: Vec<Element>,
}

impl Rpc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter encoded under `tag`
    pub fn param<T: ToXml + ?Sized>(mut self, tag: &str, value: &T) -> Self {
        self.params.push(value.to_xml(tag));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the element wrapping the server's answer
    pub fn response_name(&self) -> String {
        format!("{}Response", self.name)
    }

    fn to_element(&self) -> Element {
        let mut call = Element::new(&format!("tns:{}", self.name));
        call.children
            .extend(self.params.iter().cloned().map(XMLNode::Element));
        call
    }
}

/// A complete request document for one target namespace.
#[derive(Debug, Clone)]
pub struct Envelope {
    target_namespace: String,
    rpc: Rpc,
}

impl Envelope {
    /// Wraps `rpc` in the fixed envelope bound to `target_namespace`
    pub fn new(target_namespace: impl Into<String>, rpc: Rpc) -> Self {
        Self {
            target_namespace: target_namespace.into(),
            rpc,
        }
    }

    pub fn target_namespace(&self) -> &str {
        &self.target_namespace
    }

    pub fn rpc(&self) -> &Rpc {
        &self.rpc
    }

    /// XML tree of the whole document
    pub fn to_element(&self) -> Element {
        let mut body = Element::new("env:Body");
        body.children.push(XMLNode::Element(self.rpc.to_element()));

        let mut envelope = Element::new("env:Envelope");
        for (attr, value) in [
            ("xmlns:xsd", namespaces::XSD),
            ("xmlns:xsi", namespaces::XSI),
            ("xmlns:tns", self.target_namespace.as_str()),
            ("xmlns:env", namespaces::ENV),
            ("xmlns:ins0", namespaces::INS0),
        ] {
            envelope
                .attributes
                .insert(attr.to_string(), value.to_string());
        }
        envelope.children.push(XMLNode::Element(body));
        envelope
    }

    /// Serializes the document, validating names and character data first.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        if !is_xml_name(&self.rpc.name) {
            return Err(EncodeError::InvalidName(self.rpc.name.clone()));
        }
        if let Some(character) = self.target_namespace.chars().find(|c| !is_xml_char(*c)) {
            return Err(EncodeError::InvalidCharacter {
                element: "xmlns:tns".to_string(),
                character,
            });
        }
        for param in &self.rpc.params {
            validate_element(param)?;
        }

        let mut buf = Vec::new();
        let config = EmitterConfig::new()
            .write_document_declaration(true)
            .perform_indent(false);
        self.to_element().write_with_config(&mut buf, config)?;
        Ok(buf)
    }
}

fn validate_element(element: &Element) -> Result<(), EncodeError> {
    if !is_xml_name(&element.name) {
        return Err(EncodeError::InvalidName(element.name.clone()));
    }
    for node in &element.children {
        match node {
            XMLNode::Element(child) => validate_element(child)?,
            XMLNode::Text(text) => {
                if let Some(character) = text.chars().find(|c| !is_xml_char(*c)) {
                    return Err(EncodeError::InvalidCharacter {
                        element: element.name.clone(),
                        character,
                    });
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

// XML 1.0 Char production
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_to_string(envelope: &Envelope) -> String {
        String::from_utf8(envelope.encode().unwrap()).unwrap()
    }

    #[test]
    fn envelope_declares_all_namespaces() {
        let xml = encode_to_string(&Envelope::new(
            "urn:iControl:GlobalLB/WideIP",
            Rpc::new("get_list"),
        ));

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<env:Envelope"));
        assert!(xml.contains(r#"xmlns:xsd="http://www.w3.org/2001/XMLSchema""#));
        assert!(xml.contains(r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#));
        assert!(xml.contains(r#"xmlns:tns="urn:iControl:GlobalLB/WideIP""#));
        assert!(xml.contains(r#"xmlns:env="http://schemas.xmlsoap.org/soap/envelope/""#));
        assert!(xml.contains(r#"xmlns:ins0="urn:iControl""#));
        assert!(xml.contains("<env:Body>"));
        assert!(xml.contains("tns:get_list"));
    }

    #[test]
    fn parameters_keep_insertion_order() {
        let names = vec!["/Common/p1".to_string()];
        let members: Vec<Vec<String>> = vec![vec!["a".into(), "b".into()]];
        let xml = encode_to_string(&Envelope::new(
            "urn:iControl:GlobalLB/PoolMember",
            Rpc::new("get_ratio")
                .param("pool_names", &names)
                .param("members", &members),
        ));

        let pools = xml.find("<pool_names>").unwrap();
        let members = xml.find("<members>").unwrap();
        assert!(pools < members);
        assert!(xml.contains("<members><item><item>a</item><item>b</item></item></members>"));
    }

    #[test]
    fn invalid_rpc_name_is_rejected() {
        let err = Envelope::new("urn:x", Rpc::new("get list")).encode().unwrap_err();
        assert!(matches!(err, EncodeError::InvalidName(name) if name == "get list"));
    }

    #[test]
    fn control_characters_are_rejected() {
        let envelope = Envelope::new("urn:x", Rpc::new("get_view").param("view_names", "bad\u{1}"));
        let err = envelope.encode().unwrap_err();
        assert!(matches!(
            err,
            EncodeError::InvalidCharacter { character: '\u{1}', .. }
        ));
    }

    #[test]
    fn control_characters_in_namespace_are_rejected() {
        let err = Envelope::new("urn:iControl:\u{7}GlobalLB/Pool", Rpc::new("get_list"))
            .encode()
            .unwrap_err();
        assert!(matches!(
            err,
            EncodeError::InvalidCharacter { ref element, character: '\u{7}' } if element == "xmlns:tns"
        ));
    }
}

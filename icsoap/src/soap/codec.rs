//! Value codec between Rust types and iControl XML fragments

use std::borrow::Cow;

use xmltree::{Element, XMLNode};

use crate::error::DecodeError;

/// Tag of the children of a sequence wrapper
pub const ITEM: &str = "item";

/// Encodes a value as an element named by the caller.
///
/// The element name is the parameter/field tag; the value decides the
/// content (text for scalars, `item` children for sequences, named children
/// for records).
pub trait ToXml {
    fn to_xml(&self, name: &str) -> Element;
}

/// Decodes a value from the element holding it.
pub trait FromXml: Sized {
    fn from_xml(element: &Element) -> Result<Self, DecodeError>;

    /// Value to use when the element `name` is not present at all.
    ///
    /// Scalars and records fail; sequences decode to an empty `Vec`.
    fn from_absent(name: &str) -> Result<Self, DecodeError> {
        Err(DecodeError::missing(name))
    }
}

/// Builds `<name>text</name>`
pub fn text_element(name: &str, text: &str) -> Element {
    let mut element = Element::new(name);
    if !text.is_empty() {
        element.children.push(XMLNode::Text(text.to_string()));
    }
    element
}

/// Concatenated text content of an element, empty when there is none
pub fn element_text(element: &Element) -> Cow<'_, str> {
    element.get_text().unwrap_or(Cow::Borrowed(""))
}

/// First child element whose local name is `name`
pub fn find_child<'a>(parent: &'a Element, name: &str) -> Option<&'a Element> {
    parent.children.iter().find_map(|node| match node {
        XMLNode::Element(elem) if elem.name == name => Some(elem),
        _ => None,
    })
}

/// Decodes the child `name` of a record element.
pub fn decode_field<T: FromXml>(parent: &Element, name: &str) -> Result<T, DecodeError> {
    match find_child(parent, name) {
        Some(child) => T::from_xml(child),
        None => T::from_absent(name),
    }
}

/// Wraps a sequence as `<name><item>…</item>…</name>`.
///
/// An empty sequence still produces the (self-closing) wrapper.
pub fn wrap_items<T: ToXml>(name: &str, items: &[T]) -> Element {
    let mut wrapper = Element::new(name);
    wrapper.children.extend(
        items
            .iter()
            .map(|item| XMLNode::Element(item.to_xml(ITEM))),
    );
    wrapper
}

/// Flattens the `item` children of a wrapper into an ordered `Vec`.
pub fn flatten_items<T: FromXml>(wrapper: &Element) -> Result<Vec<T>, DecodeError> {
    wrapper
        .children
        .iter()
        .filter_map(|node| match node {
            XMLNode::Element(elem) if elem.name == ITEM => Some(elem),
            _ => None,
        })
        .map(T::from_xml)
        .collect()
}

impl<T: ToXml + ?Sized> ToXml for &T {
    fn to_xml(&self, name: &str) -> Element {
        (**self).to_xml(name)
    }
}

impl ToXml for str {
    fn to_xml(&self, name: &str) -> Element {
        text_element(name, self)
    }
}

impl ToXml for String {
    fn to_xml(&self, name: &str) -> Element {
        text_element(name, self)
    }
}

impl FromXml for String {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        Ok(element_text(element).into_owned())
    }
}

impl ToXml for bool {
    fn to_xml(&self, name: &str) -> Element {
        text_element(name, if *self { "true" } else { "false" })
    }
}

impl FromXml for bool {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        let text = element_text(element);
        match text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(DecodeError::invalid(&element.name, other)),
        }
    }
}

macro_rules! impl_xml_integer {
    ($($ty:ty),*) => {
        $(
            impl ToXml for $ty {
                fn to_xml(&self, name: &str) -> Element {
                    text_element(name, &self.to_string())
                }
            }

            impl FromXml for $ty {
                fn from_xml(element: &Element) -> Result<Self, DecodeError> {
                    let text = element_text(element);
                    text.trim()
                        .parse::<$ty>()
                        .map_err(|_| DecodeError::invalid(&element.name, &text))
                }
            }
        )*
    };
}

impl_xml_integer!(i32, i64, u32, u64);

impl<T: ToXml> ToXml for [T] {
    fn to_xml(&self, name: &str) -> Element {
        wrap_items(name, self)
    }
}

impl<T: ToXml> ToXml for Vec<T> {
    fn to_xml(&self, name: &str) -> Element {
        wrap_items(name, self)
    }
}

impl<T: FromXml> FromXml for Vec<T> {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        flatten_items(element)
    }

    fn from_absent(_name: &str) -> Result<Self, DecodeError> {
        Ok(Vec::new())
    }
}

impl<T: FromXml> FromXml for Option<T> {
    fn from_xml(element: &Element) -> Result<Self, DecodeError> {
        T::from_xml(element).map(Some)
    }

    fn from_absent(_name: &str) -> Result<Self, DecodeError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reparse(element: &Element) -> Element {
        let mut buf = Vec::new();
        element.write(&mut buf).unwrap();
        Element::parse(buf.as_slice()).unwrap()
    }

    #[test]
    fn flatten_inverts_wrap() {
        let cases: Vec<Vec<String>> = vec![
            vec![],
            vec!["only".to_string()],
            vec!["c".to_string(), "a".to_string(), "b".to_string()],
        ];
        for case in cases {
            let wrapped = reparse(&wrap_items("names", &case));
            let flat: Vec<String> = flatten_items(&wrapped).unwrap();
            assert_eq!(flat, case);
        }
    }

    #[test]
    fn nested_sequences_keep_both_orders() {
        let nested: Vec<Vec<i64>> = vec![vec![1, 2], vec![3]];
        let wrapped = reparse(&nested.to_xml("return"));
        let decoded: Vec<Vec<i64>> = FromXml::from_xml(&wrapped).unwrap();
        assert_eq!(decoded, vec![vec![1, 2], vec![3]]);
    }

    #[test]
    fn empty_sequence_keeps_wrapper() {
        let empty: Vec<String> = Vec::new();
        let mut buf = Vec::new();
        empty.to_xml("pool_names").write(&mut buf).unwrap();
        let xml = String::from_utf8(buf).unwrap();
        assert!(xml.contains("<pool_names />") || xml.contains("<pool_names/>"));
    }

    #[test]
    fn absent_sequence_is_empty_but_absent_scalar_fails() {
        let parent = Element::new("record");
        let names: Vec<String> = decode_field(&parent, "zone_names").unwrap();
        assert!(names.is_empty());
        let missing: Result<i64, _> = decode_field(&parent, "ttl");
        assert!(matches!(missing, Err(DecodeError::MissingElement(name)) if name == "ttl"));
    }

    #[test]
    fn scalars_decode_from_text() {
        assert_eq!(i64::from_xml(&text_element("ttl", " 42 ")).unwrap(), 42);
        assert!(bool::from_xml(&text_element("negate", "true")).unwrap());
        assert!(!bool::from_xml(&text_element("negate", "0")).unwrap());
        assert_eq!(String::from_xml(&Element::new("empty")).unwrap(), "");
        assert!(matches!(
            i64::from_xml(&text_element("ttl", "abc")),
            Err(DecodeError::InvalidValue { .. })
        ));
    }
}

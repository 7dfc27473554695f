/// Declares an open, string-based vendor enumeration.
///
/// The generated enum has one variant per listed wire value plus
/// `Other(String)`, so values introduced by newer firmware decode to their
/// literal form instead of failing.
///
/// # Syntax
///
/// ```ignore
/// vendor_enum! {
///     /// A list of enabled states.
///     pub enum EnabledState {
///         /// The object is disabled.
///         Disabled = "STATE_DISABLED",
///         /// The object is enabled.
///         Enabled = "STATE_ENABLED",
///     }
/// }
/// ```
///
/// The enum gets `as_str`, `From<&str>`, `FromStr`, `Display`, the XML
/// codec traits and string (de)serialization. `Default` is the empty
/// string, which is what the device reports for an unset value.
#[macro_export]
macro_rules! vendor_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )*
            /// Value unknown to this client release, kept verbatim
            Other(::std::string::String),
        }

        impl $name {
            /// Wire values known to this client release
            pub const KNOWN: &'static [&'static str] = &[$($wire),*];

            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $wire, )*
                    $name::Other(value) => value.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        /// The empty wire value
        impl ::std::default::Default for $name {
            fn default() -> Self {
                $name::Other(::std::string::String::new())
            }
        }

        impl ::std::convert::From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $wire => $name::$variant, )*
                    other => $name::Other(other.to_string()),
                }
            }
        }

        impl ::std::convert::From<::std::string::String> for $name {
            fn from(value: ::std::string::String) -> Self {
                $name::from(value.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::convert::Infallible;

            fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err> {
                Ok($name::from(value))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::soap::ToXml for $name {
            fn to_xml(&self, name: &str) -> $crate::__private::xmltree::Element {
                $crate::soap::text_element(name, self.as_str())
            }
        }

        impl $crate::soap::FromXml for $name {
            fn from_xml(
                element: &$crate::__private::xmltree::Element,
            ) -> ::std::result::Result<Self, $crate::DecodeError> {
                Ok($name::from($crate::soap::element_text(element).trim()))
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let value = <::std::string::String as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
                Ok($name::from(value))
            }
        }
    };
}

/// Declares a record type together with its XML codec.
///
/// Each field is bound to the tag of its child element. Decoding follows
/// the field type: sequences and `Option`s tolerate a missing child, other
/// types report [`DecodeError::MissingElement`](crate::DecodeError).
///
/// ```ignore
/// xml_struct! {
///     #[derive(Debug, Clone, PartialEq, Eq)]
///     pub struct ViewZone {
///         pub view_name: String => "view_name",
///         pub zone_name: String => "zone_name",
///     }
/// }
/// ```
#[macro_export]
macro_rules! xml_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty => $tag:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $ty, )*
        }

        impl $crate::soap::ToXml for $name {
            fn to_xml(&self, name: &str) -> $crate::__private::xmltree::Element {
                let mut element = $crate::__private::xmltree::Element::new(name);
                $(
                    element.children.push($crate::__private::xmltree::XMLNode::Element(
                        $crate::soap::ToXml::to_xml(&self.$field, $tag),
                    ));
                )*
                element
            }
        }

        impl $crate::soap::FromXml for $name {
            fn from_xml(
                element: &$crate::__private::xmltree::Element,
            ) -> ::std::result::Result<Self, $crate::DecodeError> {
                Ok($name {
                    $( $field: $crate::soap::decode_field(element, $tag)?, )*
                })
            }
        }
    };
}

//! Types shared by every iControl module (`Common` namespace)

use icsoap::{vendor_enum, xml_struct};
use serde::{Deserialize, Serialize};

vendor_enum! {
    /// A list of enabled states.
    pub enum EnabledState {
        /// The object is disabled.
        Disabled = "STATE_DISABLED",
        /// The object is enabled.
        Enabled = "STATE_ENABLED",
    }
}

vendor_enum! {
    /// Availability color of an object.
    pub enum AvailabilityStatus {
        /// Error scenario.
        None = "AVAILABILITY_STATUS_NONE",
        /// The object is available in some capacity.
        Green = "AVAILABILITY_STATUS_GREEN",
        /// The object is not available at the moment, but may become
        /// available again without user intervention.
        Yellow = "AVAILABILITY_STATUS_YELLOW",
        /// The object is not available and requires user intervention.
        Red = "AVAILABILITY_STATUS_RED",
        /// The object's availability status is unknown.
        Blue = "AVAILABILITY_STATUS_BLUE",
        /// The object is unlicensed.
        Gray = "AVAILABILITY_STATUS_GRAY",
    }
}

vendor_enum! {
    /// Enabled status of an object.
    pub enum EnabledStatus {
        /// Error scenario.
        None = "ENABLED_STATUS_NONE",
        /// Active when green, may or may not be active when blue.
        Enabled = "ENABLED_STATUS_ENABLED",
        /// Inactive regardless of availability status.
        Disabled = "ENABLED_STATUS_DISABLED",
        /// Inactive because its parent has been disabled.
        DisabledByParent = "ENABLED_STATUS_DISABLED_BY_PARENT",
    }
}

xml_struct! {
    /// Status of an object
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ObjectStatus {
        pub availability_status: AvailabilityStatus => "availability_status",
        pub enabled_status: EnabledStatus => "enabled_status",
        pub status_description: String => "status_description",
    }
}

impl ObjectStatus {
    /// Green and enabled
    pub fn is_up(&self) -> bool {
        self.availability_status == AvailabilityStatus::Green
            && self.enabled_status == EnabledStatus::Enabled
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct IpPortDefinition {
        pub address: String => "address",
        pub port: i64 => "port",
    }
}

impl IpPortDefinition {
    pub fn new(address: impl Into<String>, port: i64) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MemberRatio {
        pub member: IpPortDefinition => "member",
        pub ratio: i64 => "ratio",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MemberObjectStatus {
        pub member: IpPortDefinition => "member",
        pub status: ObjectStatus => "status",
    }
}

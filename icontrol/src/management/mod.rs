//! Management module
//!
//! DNS views, zones and resource records hosted by the device.

mod resource_record;
mod view;
mod zone;

pub use resource_record::{
    A6Record, AaaaRecord, ARecord, CnameRecord, DnameRecord, HinfoRecord, KeyRecord, MxRecord,
    NsRecord, NxtRecord, PtrRecord, ResourceRecordClient, RrList, SigRecord, SoaRecord,
    SrvRecord, TxtRecord,
};
pub use view::ViewClient;
pub use zone::ZoneClient;

use icsoap::{vendor_enum, xml_struct};
use serde::{Deserialize, Serialize};

vendor_enum! {
    /// Kind of DNS zone.
    pub enum ZoneType {
        /// Not yet initialized.
        Unset = "UNSET",
        Master = "MASTER",
        Slave = "SLAVE",
        Stub = "STUB",
        Forward = "FORWARD",
        /// The root hints zone.
        Hint = "HINT",
    }
}

xml_struct! {
    /// A view of the named configuration
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ViewInfo {
        pub view_name: String => "view_name",
        /// Position of the view in named.conf
        pub view_order: i64 => "view_order",
        pub option_seq: Vec<String> => "option_seq",
        pub zone_names: Vec<String> => "zone_names",
    }
}

xml_struct! {
    /// A zone within a view
    #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ViewZone {
        pub view_name: String => "view_name",
        pub zone_name: String => "zone_name",
    }
}

impl ViewZone {
    pub fn new(view_name: impl Into<String>, zone_name: impl Into<String>) -> Self {
        Self {
            view_name: view_name.into(),
            zone_name: zone_name.into(),
        }
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ZoneInfo {
        pub view_name: String => "view_name",
        pub zone_name: String => "zone_name",
        pub zone_type: ZoneType => "zone_type",
        /// File holding the zone data
        pub zone_file: String => "zone_file",
        pub option_seq: Vec<String> => "option_seq",
    }
}

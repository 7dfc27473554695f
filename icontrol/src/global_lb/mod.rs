//! GlobalLB module
//!
//! Interfaces of the global load balancer: pools and their members, wide
//! IPs, virtual servers and their monitors, data centers, regions and
//! topology records.

mod data_center;
mod monitor;
mod pool;
mod pool_member;
mod prober_pool;
mod region;
mod topology;
mod virtual_server;
mod wide_ip;

pub use data_center::{DataCenterClient, DataCenterServerDefinition};
pub use monitor::{
    IntPropertyType, IntegerValue, MonitorClient, MonitorIpPort, MonitorTemplate,
    StrPropertyType, StringValue, TemplateType, UserDefinedStringValue,
};
pub use pool::PoolClient;
pub use pool_member::PoolMemberClient;
pub use prober_pool::ProberPoolClient;
pub use region::{RegionClient, RegionDefinition, RegionItem};
pub use topology::{TopologyClient, TopologyEndpoint, TopologyRecord};
pub use virtual_server::{MonitorAssociation, VirtualServerClient};
pub use wide_ip::{WideIpClient, WideIpPool};

use icsoap::{vendor_enum, xml_struct};
use serde::{Deserialize, Serialize};

vendor_enum! {
    /// Topology endpoint types.
    pub enum RegionType {
        /// The IP subnet topology.
        Cidr = "REGION_TYPE_CIDR",
        Region = "REGION_TYPE_REGION",
        Continent = "REGION_TYPE_CONTINENT",
        Country = "REGION_TYPE_COUNTRY",
        State = "REGION_TYPE_STATE",
        Pool = "REGION_TYPE_POOL",
        DataCenter = "REGION_TYPE_DATA_CENTER",
        IspRegion = "REGION_TYPE_ISP_REGION",
        /// The GeoIP ISP region type.
        GeoipIsp = "REGION_TYPE_GEOIP_ISP",
    }
}

vendor_enum! {
    /// Load balancing modes.
    pub enum LbMethod {
        /// Return to DNS.
        ReturnToDns = "LB_METHOD_RETURN_TO_DNS",
        /// No load balancing mode defined.
        Null = "LB_METHOD_NULL",
        RoundRobin = "LB_METHOD_ROUND_ROBIN",
        Ratio = "LB_METHOD_RATIO",
        Topology = "LB_METHOD_TOPOLOGY",
        StaticPersist = "LB_METHOD_STATIC_PERSIST",
        GlobalAvailability = "LB_METHOD_GLOBAL_AVAILABILITY",
        /// Virtual server capacity.
        VsCapacity = "LB_METHOD_VS_CAPACITY",
        LeastConn = "LB_METHOD_LEAST_CONN",
        /// Lowest round trip time.
        LowestRtt = "LB_METHOD_LOWEST_RTT",
        LowestHops = "LB_METHOD_LOWEST_HOPS",
        PacketRate = "LB_METHOD_PACKET_RATE",
        Cpu = "LB_METHOD_CPU",
        HitRatio = "LB_METHOD_HIT_RATIO",
        /// Quality of service.
        Qos = "LB_METHOD_QOS",
        /// Bits per second.
        Bps = "LB_METHOD_BPS",
        /// Drop the request, don't answer.
        DropPacket = "LB_METHOD_DROP_PACKET",
        /// Return an explicit IP address specified by the user.
        ExplicitIp = "LB_METHOD_EXPLICIT_IP",
        /// Deprecated.
        ConnectionRate = "LB_METHOD_CONNECTION_RATE",
        /// Virtual server score.
        VsScore = "LB_METHOD_VS_SCORE",
    }
}

vendor_enum! {
    /// Shape of a monitor destination.
    pub enum AddressType {
        /// The address type is unknown.
        Unset = "ATYPE_UNSET",
        /// `*:*`
        StarAddressStarPort = "ATYPE_STAR_ADDRESS_STAR_PORT",
        /// `*:80`
        StarAddressExplicitPort = "ATYPE_STAR_ADDRESS_EXPLICIT_PORT",
        /// `10.10.10.1:80`
        ExplicitAddressExplicitPort = "ATYPE_EXPLICIT_ADDRESS_EXPLICIT_PORT",
        /// `*`, for ICMP-like monitors.
        StarAddress = "ATYPE_STAR_ADDRESS",
        ExplicitAddress = "ATYPE_EXPLICIT_ADDRESS",
    }
}

vendor_enum! {
    /// How the monitors of a rule combine.
    pub enum MonitorRuleType {
        /// Uninitialized, only returned by queries.
        Undefined = "MONITOR_RULE_TYPE_UNDEFINED",
        /// Monitoring is disabled, only returned by queries.
        None = "MONITOR_RULE_TYPE_NONE",
        Single = "MONITOR_RULE_TYPE_SINGLE",
        /// Every monitor must succeed.
        AndList = "MONITOR_RULE_TYPE_AND_LIST",
        /// At least `quorum` monitors out of the list must succeed.
        MOfN = "MONITOR_RULE_TYPE_M_OF_N",
    }
}

vendor_enum! {
    /// Region database types.
    pub enum RegionDbType {
        UserDefined = "REGION_DB_TYPE_USER_DEFINED",
        Acl = "REGION_DB_TYPE_ACL",
        Isp = "REGION_DB_TYPE_ISP",
    }
}

xml_struct! {
    /// Monitors attached to an object
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MonitorRule {
        pub kind: MonitorRuleType => "type",
        /// Only meaningful for `MOfN` rules
        pub quorum: i64 => "quorum",
        pub monitor_templates: Vec<String> => "monitor_templates",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct VirtualServerDefinition {
        pub name: String => "name",
        pub address: String => "address",
        pub port: i64 => "port",
    }
}

impl VirtualServerDefinition {
    pub fn new(name: impl Into<String>, address: impl Into<String>, port: i64) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            port,
        }
    }
}

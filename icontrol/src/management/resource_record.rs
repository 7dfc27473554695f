use icsoap::soap::Rpc;
use icsoap::{CallContext, Result, SoapClient, xml_struct};
use serde::{Deserialize, Serialize};

use super::ViewZone;

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ARecord {
        pub domain_name: String => "domain_name",
        pub ip_address: String => "ip_address",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct NsRecord {
        pub domain_name: String => "domain_name",
        /// Name server host
        pub host_name: String => "host_name",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CnameRecord {
        pub domain_name: String => "domain_name",
        pub cname: String => "cname",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    /// Start of authority; intervals are in seconds
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SoaRecord {
        pub domain_name: String => "domain_name",
        pub primary: String => "primary",
        /// Mailbox of the zone administrator
        pub email: String => "email",
        pub serial: i64 => "serial",
        pub refresh: i64 => "refresh",
        pub retry: i64 => "retry",
        pub expire: i64 => "expire",
        pub neg_ttl: i64 => "neg_ttl",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PtrRecord {
        pub ip_address: String => "ip_address",
        pub dname: String => "dname",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct HinfoRecord {
        pub domain_name: String => "domain_name",
        pub hardware: String => "hardware",
        pub os: String => "os",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MxRecord {
        pub domain_name: String => "domain_name",
        pub preference: i64 => "preference",
        /// Mail exchanger host
        pub mail: String => "mail",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TxtRecord {
        pub domain_name: String => "domain_name",
        pub text: String => "text",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SrvRecord {
        pub domain_name: String => "domain_name",
        pub priority: i64 => "priority",
        pub weight: i64 => "weight",
        pub port: i64 => "port",
        pub target: String => "target",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct KeyRecord {
        pub domain_name: String => "domain_name",
        pub flags: i64 => "flags",
        pub protocol: i64 => "protocol",
        pub algorithm: i64 => "algorithm",
        pub public_key: String => "public_key",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SigRecord {
        pub domain_name: String => "domain_name",
        /// Record type covered by the signature
        pub type_covered: i64 => "type_covered",
        pub algorithm: i64 => "algorithm",
        pub labels: i64 => "labels",
        pub orig_ttl: i64 => "orig_ttl",
        pub sig_expiration: String => "sig_expiration",
        pub sig_inception: String => "sig_inception",
        pub key_tag: i64 => "key_tag",
        pub signer_name: String => "signer_name",
        pub signature: String => "signature",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct NxtRecord {
        pub domain_name: String => "domain_name",
        pub nxt_domain: String => "nxt_domain",
        /// Record types present at the name, space separated
        pub types: String => "types",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AaaaRecord {
        pub domain_name: String => "domain_name",
        pub ip_address: String => "ip_address",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct A6Record {
        pub domain_name: String => "domain_name",
        pub prefix_bits: i64 => "prefix_bits",
        pub ip_address: String => "ip_address",
        pub prefix_name: String => "prefix_name",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DnameRecord {
        pub label: String => "label",
        pub domain_name: String => "domain_name",
        pub ttl: i64 => "ttl",
    }
}

xml_struct! {
    /// Records of one zone grouped by type
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct RrList {
        pub a_list: Vec<ARecord> => "a_list",
        pub ns_list: Vec<NsRecord> => "ns_list",
        pub cname_list: Vec<CnameRecord> => "cname_list",
        pub soa_list: Vec<SoaRecord> => "soa_list",
        pub ptr_list: Vec<PtrRecord> => "ptr_list",
        pub hinfo_list: Vec<HinfoRecord> => "hinfo_list",
        pub mx_list: Vec<MxRecord> => "mx_list",
        pub txt_list: Vec<TxtRecord> => "txt_list",
        pub srv_list: Vec<SrvRecord> => "srv_list",
        pub key_list: Vec<KeyRecord> => "key_list",
        pub sig_list: Vec<SigRecord> => "sig_list",
        pub nxt_list: Vec<NxtRecord> => "nxt_list",
        pub aaaa_list: Vec<AaaaRecord> => "aaaa_list",
        pub a6_list: Vec<A6Record> => "a6_list",
        pub dname_list: Vec<DnameRecord> => "dname_list",
    }
}

impl RrList {
    /// Number of records of every type
    pub fn len(&self) -> usize {
        self.a_list.len()
            + self.ns_list.len()
            + self.cname_list.len()
            + self.soa_list.len()
            + self.ptr_list.len()
            + self.hinfo_list.len()
            + self.mx_list.len()
            + self.txt_list.len()
            + self.srv_list.len()
            + self.key_list.len()
            + self.sig_list.len()
            + self.nxt_list.len()
            + self.aaaa_list.len()
            + self.a6_list.len()
            + self.dname_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Management.ResourceRecord
#[derive(Debug, Clone)]
pub struct ResourceRecordClient {
    client: SoapClient,
}

impl ResourceRecordClient {
    pub const NAMESPACE: &'static str = "urn:iControl:Management/ResourceRecord";

    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }

    /// Records of each zone in zone-file text form, one list per zone
    pub async fn get_rrs(
        &self,
        ctx: &CallContext,
        view_zones: &[ViewZone],
    ) -> Result<Vec<Vec<String>>> {
        self.client
            .invoke(
                ctx,
                Self::NAMESPACE,
                Rpc::new("get_rrs").param("view_zones", view_zones),
            )
            .await
    }

    /// Structured records of each zone, one list per zone
    pub async fn get_rrs_detailed(
        &self,
        ctx: &CallContext,
        view_zones: &[ViewZone],
    ) -> Result<Vec<RrList>> {
        self.client
            .invoke(
                ctx,
                Self::NAMESPACE,
                Rpc::new("get_rrs_detailed").param("view_zones", view_zones),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icsoap::soap::{FromXml, parse_envelope};

    #[test]
    fn absent_type_lists_decode_empty() {
        let xml = r#"<E:Envelope xmlns:E="http://schemas.xmlsoap.org/soap/envelope/"><E:Body>
<item>
  <mx_list>
    <item><domain_name>example.com.</domain_name><preference>10</preference><mail>mx1.example.com.</mail><ttl>3600</ttl></item>
  </mx_list>
  <txt_list/>
</item>
</E:Body></E:Envelope>"#;
        let envelope = parse_envelope(xml.as_bytes()).unwrap();
        let list = RrList::from_xml(envelope.payload().unwrap()).unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list.mx_list[0].preference, 10);
        assert_eq!(list.mx_list[0].mail, "mx1.example.com.");
        assert!(list.txt_list.is_empty());
        assert!(list.a_list.is_empty());
    }
}

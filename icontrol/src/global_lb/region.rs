use icsoap::soap::Rpc;
use icsoap::{CallContext, Result, SoapClient, xml_struct};
use serde::{Deserialize, Serialize};

use super::{RegionDbType, RegionType};

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct RegionDefinition {
        pub name: String => "name",
        pub db_type: RegionDbType => "db_type",
    }
}

impl RegionDefinition {
    pub fn new(name: impl Into<String>, db_type: RegionDbType) -> Self {
        Self {
            name: name.into(),
            db_type,
        }
    }
}

xml_struct! {
    /// One entry of a region
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct RegionItem {
        pub content: String => "content",
        pub kind: RegionType => "type",
        pub negate: bool => "negate",
    }
}

/// GlobalLB.Region: named groups of topology endpoints
#[derive(Debug, Clone)]
pub struct RegionClient {
    client: SoapClient,
}

impl RegionClient {
    pub const NAMESPACE: &'static str = "urn:iControl:GlobalLB/Region";

    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }

    pub async fn get_list(&self, ctx: &CallContext) -> Result<Vec<RegionDefinition>> {
        self.client
            .invoke(ctx, Self::NAMESPACE, Rpc::new("get_list"))
            .await
    }

    /// Items of each region, in device order
    pub async fn get_region_item(
        &self,
        ctx: &CallContext,
        regions: &[RegionDefinition],
    ) -> Result<Vec<Vec<RegionItem>>> {
        self.client
            .invoke(
                ctx,
                Self::NAMESPACE,
                Rpc::new("get_region_item").param("regions", regions),
            )
            .await
    }
}

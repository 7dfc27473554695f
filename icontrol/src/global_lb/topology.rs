use icsoap::soap::Rpc;
use icsoap::{CallContext, Result, SoapClient, xml_struct};
use serde::{Deserialize, Serialize};

use super::RegionType;

xml_struct! {
    /// One side of a topology record
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TopologyEndpoint {
        pub kind: RegionType => "type",
        pub content: String => "content",
        /// Match everything except `content`
        pub negate: bool => "negate",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TopologyRecord {
        pub server: TopologyEndpoint => "server",
        pub ldns: TopologyEndpoint => "ldns",
    }
}

/// GlobalLB.Topology: topology records used by the topology LB method
#[derive(Debug, Clone)]
pub struct TopologyClient {
    client: SoapClient,
}

impl TopologyClient {
    pub const NAMESPACE: &'static str = "urn:iControl:GlobalLB/Topology";

    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }

    /// All topology records
    pub async fn get_list(&self, ctx: &CallContext) -> Result<Vec<TopologyRecord>> {
        self.client
            .invoke(ctx, Self::NAMESPACE, Rpc::new("get_list"))
            .await
    }

    /// Evaluation order of each record
    pub async fn get_order(
        &self,
        ctx: &CallContext,
        records: &[TopologyRecord],
    ) -> Result<Vec<i64>> {
        self.client
            .invoke(
                ctx,
                Self::NAMESPACE,
                Rpc::new("get_order").param("records", records),
            )
            .await
    }
}

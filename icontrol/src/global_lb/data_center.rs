use icsoap::soap::Rpc;
use icsoap::{CallContext, Result, SoapClient, xml_struct};
use serde::{Deserialize, Serialize};

use crate::rpc::with_names;

xml_struct! {
    /// Servers located in a data center
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DataCenterServerDefinition {
        pub data_center: String => "data_center",
        pub servers: Vec<String> => "servers",
    }
}

/// GlobalLB.DataCenter
#[derive(Debug, Clone)]
pub struct DataCenterClient {
    client: SoapClient,
}

impl DataCenterClient {
    pub const NAMESPACE: &'static str = "urn:iControl:GlobalLB/DataCenter";

    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }

    pub async fn get_list(&self, ctx: &CallContext) -> Result<Vec<String>> {
        self.client
            .invoke(ctx, Self::NAMESPACE, Rpc::new("get_list"))
            .await
    }

    pub async fn get_server<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        data_centers: &[S],
    ) -> Result<Vec<DataCenterServerDefinition>> {
        self.client
            .invoke(
                ctx,
                Self::NAMESPACE,
                with_names("get_server", "data_centers", data_centers),
            )
            .await
    }
}

use icsoap::soap::Rpc;
use icsoap::{CallContext, Result, SoapClient, xml_struct};
use serde::{Deserialize, Serialize};

use super::{MonitorRule, VirtualServerDefinition};

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MonitorAssociation {
        pub virtual_server: VirtualServerDefinition => "virtual_server",
        pub monitor_rule: MonitorRule => "monitor_rule",
    }
}

/// GlobalLB.VirtualServer: virtual servers hosted by GTM servers
#[derive(Debug, Clone)]
pub struct VirtualServerClient {
    client: SoapClient,
}

impl VirtualServerClient {
    pub const NAMESPACE: &'static str = "urn:iControl:GlobalLB/VirtualServer";

    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }

    pub async fn get_list(&self, ctx: &CallContext) -> Result<Vec<VirtualServerDefinition>> {
        self.client
            .invoke(ctx, Self::NAMESPACE, Rpc::new("get_list"))
            .await
    }

    /// Server owning each virtual server
    pub async fn get_server(
        &self,
        ctx: &CallContext,
        virtual_servers: &[VirtualServerDefinition],
    ) -> Result<Vec<String>> {
        self.client
            .invoke(
                ctx,
                Self::NAMESPACE,
                Rpc::new("get_server").param("virtual_servers", virtual_servers),
            )
            .await
    }

    pub async fn get_monitor_association(
        &self,
        ctx: &CallContext,
        virtual_servers: &[VirtualServerDefinition],
    ) -> Result<Vec<MonitorAssociation>> {
        self.client
            .invoke(
                ctx,
                Self::NAMESPACE,
                Rpc::new("get_monitor_association").param("virtual_servers", virtual_servers),
            )
            .await
    }
}

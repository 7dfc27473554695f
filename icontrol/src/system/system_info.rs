use icsoap::soap::Rpc;
use icsoap::{CallContext, Result, SoapClient};

/// System.SystemInfo
#[derive(Debug, Clone)]
pub struct SystemInfoClient {
    client: SoapClient,
}

impl SystemInfoClient {
    pub const NAMESPACE: &'static str = "urn:iControl:System/SystemInfo";

    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }

    /// Software version string, e.g. `BIG-IP_v11.6.1`
    pub async fn get_version(&self, ctx: &CallContext) -> Result<String> {
        self.client
            .invoke(ctx, Self::NAMESPACE, Rpc::new("get_version"))
            .await
    }

    /// Seconds since the last boot
    pub async fn get_uptime(&self, ctx: &CallContext) -> Result<i64> {
        self.client
            .invoke(ctx, Self::NAMESPACE, Rpc::new("get_uptime"))
            .await
    }
}

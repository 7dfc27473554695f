use icsoap::soap::{FromXml, Rpc};
use icsoap::{CallContext, Result, SoapClient, xml_struct};
use serde::{Deserialize, Serialize};

use super::LbMethod;
use crate::common::{EnabledState, ObjectStatus};
use crate::rpc::with_names;

const WIDE_IPS: &str = "wide_ips";

xml_struct! {
    /// Pool attached to a wide IP
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct WideIpPool {
        pub pool_name: String => "pool_name",
        pub order: i64 => "order",
        pub ratio: i64 => "ratio",
    }
}

/// GlobalLB.WideIP: wide IPs, the names answered by GTM
#[derive(Debug, Clone)]
pub struct WideIpClient {
    client: SoapClient,
}

impl WideIpClient {
    pub const NAMESPACE: &'static str = "urn:iControl:GlobalLB/WideIP";

    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }

    pub async fn get_list(&self, ctx: &CallContext) -> Result<Vec<String>> {
        self.client
            .invoke(ctx, Self::NAMESPACE, Rpc::new("get_list"))
            .await
    }

    /// Pools of each wide IP, in wide IP order
    pub async fn get_wideip_pool<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        wide_ips: &[S],
    ) -> Result<Vec<Vec<WideIpPool>>> {
        self.by_names(ctx, "get_wideip_pool", wide_ips).await
    }

    pub async fn get_lb_method<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        wide_ips: &[S],
    ) -> Result<Vec<LbMethod>> {
        self.by_names(ctx, "get_lb_method", wide_ips).await
    }

    pub async fn get_object_status<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        wide_ips: &[S],
    ) -> Result<Vec<ObjectStatus>> {
        self.by_names(ctx, "get_object_status", wide_ips).await
    }

    pub async fn get_enabled_state<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        wide_ips: &[S],
    ) -> Result<Vec<EnabledState>> {
        self.by_names(ctx, "get_enabled_state", wide_ips).await
    }

    async fn by_names<T: FromXml, S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        rpc: &str,
        wide_ips: &[S],
    ) -> Result<T> {
        self.client
            .invoke(ctx, Self::NAMESPACE, with_names(rpc, WIDE_IPS, wide_ips))
            .await
    }
}

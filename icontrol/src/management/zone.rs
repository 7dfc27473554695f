use icsoap::soap::Rpc;
use icsoap::{CallContext, Result, SoapClient};

use super::{ViewZone, ZoneInfo};
use crate::rpc::with_names;

/// Management.Zone: zones of the DNS views
#[derive(Debug, Clone)]
pub struct ZoneClient {
    client: SoapClient,
}

impl ZoneClient {
    pub const NAMESPACE: &'static str = "urn:iControl:Management/Zone";

    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }

    /// Zones of the given views
    pub async fn get_zone_name<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        view_names: &[S],
    ) -> Result<Vec<ViewZone>> {
        self.client
            .invoke(
                ctx,
                Self::NAMESPACE,
                with_names("get_zone_name", "view_names", view_names),
            )
            .await
    }

    pub async fn get_zone(
        &self,
        ctx: &CallContext,
        view_zones: &[ViewZone],
    ) -> Result<Vec<ZoneInfo>> {
        self.by_view_zones(ctx, "get_zone", view_zones).await
    }

    /// Same as [`ZoneClient::get_zone`], served by the newer RPC
    pub async fn get_zone_v2(
        &self,
        ctx: &CallContext,
        view_zones: &[ViewZone],
    ) -> Result<Vec<ZoneInfo>> {
        self.by_view_zones(ctx, "get_zone_v2", view_zones).await
    }

    async fn by_view_zones(
        &self,
        ctx: &CallContext,
        rpc: &str,
        view_zones: &[ViewZone],
    ) -> Result<Vec<ZoneInfo>> {
        self.client
            .invoke(
                ctx,
                Self::NAMESPACE,
                Rpc::new(rpc).param("view_zones", view_zones),
            )
            .await
    }
}

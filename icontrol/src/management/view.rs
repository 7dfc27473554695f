use icsoap::soap::Rpc;
use icsoap::{CallContext, Result, SoapClient};

use super::ViewInfo;
use crate::rpc::with_names;

/// Management.View
#[derive(Debug, Clone)]
pub struct ViewClient {
    client: SoapClient,
}

impl ViewClient {
    pub const NAMESPACE: &'static str = "urn:iControl:Management/View";

    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }

    /// Every view with its options and zones
    pub async fn get_list(&self, ctx: &CallContext) -> Result<Vec<ViewInfo>> {
        self.client
            .invoke(ctx, Self::NAMESPACE, Rpc::new("get_list"))
            .await
    }

    pub async fn get_view<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        view_names: &[S],
    ) -> Result<Vec<ViewInfo>> {
        self.client
            .invoke(
                ctx,
                Self::NAMESPACE,
                with_names("get_view", "view_names", view_names),
            )
            .await
    }
}

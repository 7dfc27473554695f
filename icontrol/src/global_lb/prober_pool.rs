use icsoap::soap::Rpc;
use icsoap::{CallContext, Result, SoapClient};

use crate::rpc::with_names;

/// GlobalLB.ProberPool: servers selected to run remote monitors
#[derive(Debug, Clone)]
pub struct ProberPoolClient {
    client: SoapClient,
}

impl ProberPoolClient {
    pub const NAMESPACE: &'static str = "urn:iControl:GlobalLB/ProberPool";

    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }

    pub async fn get_list(&self, ctx: &CallContext) -> Result<Vec<String>> {
        self.client
            .invoke(ctx, Self::NAMESPACE, Rpc::new("get_list"))
            .await
    }

    /// Member servers of each pool
    pub async fn get_member<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        pools: &[S],
    ) -> Result<Vec<Vec<String>>> {
        self.client
            .invoke(ctx, Self::NAMESPACE, with_names("get_member", "pools", pools))
            .await
    }

    /// Order of each member; `members[i]` belongs to `pools[i]`
    pub async fn get_member_order<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        pools: &[S],
        members: &[Vec<String>],
    ) -> Result<Vec<Vec<i64>>> {
        let rpc = with_names("get_member_order", "pools", pools).param("members", members);
        self.client.invoke(ctx, Self::NAMESPACE, rpc).await
    }
}

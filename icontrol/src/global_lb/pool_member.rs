use icsoap::soap::{FromXml, Rpc};
use icsoap::{CallContext, Result, SoapClient};

use crate::common::{IpPortDefinition, MemberObjectStatus, MemberRatio};

/// GlobalLB.PoolMember: members of GlobalLB pools
///
/// Every query takes a list of pools and, for each pool, the list of
/// members to inspect; `members[i]` belongs to `pool_names[i]`. Answers
/// follow the same two-level order.
#[derive(Debug, Clone)]
pub struct PoolMemberClient {
    client: SoapClient,
}

impl PoolMemberClient {
    pub const NAMESPACE: &'static str = "urn:iControl:GlobalLB/PoolMember";

    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }

    pub async fn get_ratio(
        &self,
        ctx: &CallContext,
        pool_names: &[String],
        members: &[Vec<IpPortDefinition>],
    ) -> Result<Vec<Vec<MemberRatio>>> {
        self.by_members(ctx, "get_ratio", pool_names, members).await
    }

    pub async fn get_object_status(
        &self,
        ctx: &CallContext,
        pool_names: &[String],
        members: &[Vec<IpPortDefinition>],
    ) -> Result<Vec<Vec<MemberObjectStatus>>> {
        self.by_members(ctx, "get_object_status", pool_names, members)
            .await
    }

    async fn by_members<T: FromXml>(
        &self,
        ctx: &CallContext,
        rpc: &str,
        pool_names: &[String],
        members: &[Vec<IpPortDefinition>],
    ) -> Result<Vec<Vec<T>>> {
        let rpc = Rpc::new(rpc)
            .param("pool_names", pool_names)
            .param("members", members);
        self.client.invoke(ctx, Self::NAMESPACE, rpc).await
    }
}

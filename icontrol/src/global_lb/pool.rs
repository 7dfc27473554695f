use icsoap::soap::{FromXml, Rpc};
use icsoap::{CallContext, Result, SoapClient};

use super::LbMethod;
use crate::common::{EnabledState, ObjectStatus};
use crate::rpc::{first_or, with_names};

const POOL_NAMES: &str = "pool_names";

/// GlobalLB.Pool: pools of virtual servers answering wide IP requests
#[derive(Debug, Clone)]
pub struct PoolClient {
    client: SoapClient,
}

impl PoolClient {
    pub const NAMESPACE: &'static str = "urn:iControl:GlobalLB/Pool";

    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }

    /// Names of all pools
    pub async fn get_list(&self, ctx: &CallContext) -> Result<Vec<String>> {
        self.client
            .invoke(ctx, Self::NAMESPACE, Rpc::new("get_list"))
            .await
    }

    pub async fn get_alternate_lb_methods<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        pool_names: &[S],
    ) -> Result<Vec<LbMethod>> {
        self.by_names(ctx, "get_alternate_lb_method", pool_names)
            .await
    }

    /// Alternate LB method of one pool, round robin when unreported
    pub async fn get_alternate_lb_method(
        &self,
        ctx: &CallContext,
        pool_name: &str,
    ) -> Result<LbMethod> {
        let methods = self.get_alternate_lb_methods(ctx, &[pool_name]).await?;
        Ok(first_or(
            "get_alternate_lb_method",
            pool_name,
            methods,
            LbMethod::RoundRobin,
        ))
    }

    pub async fn get_preferred_lb_methods<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        pool_names: &[S],
    ) -> Result<Vec<LbMethod>> {
        self.by_names(ctx, "get_preferred_lb_method", pool_names)
            .await
    }

    /// Preferred LB method of one pool, round robin when unreported
    pub async fn get_preferred_lb_method(
        &self,
        ctx: &CallContext,
        pool_name: &str,
    ) -> Result<LbMethod> {
        let methods = self.get_preferred_lb_methods(ctx, &[pool_name]).await?;
        Ok(first_or(
            "get_preferred_lb_method",
            pool_name,
            methods,
            LbMethod::RoundRobin,
        ))
    }

    /// TTL in seconds of the answers built from each pool
    pub async fn get_ttls<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        pool_names: &[S],
    ) -> Result<Vec<i64>> {
        self.by_names(ctx, "get_ttl", pool_names).await
    }

    pub async fn get_ttl(&self, ctx: &CallContext, pool_name: &str) -> Result<i64> {
        self.first_by_name(ctx, "get_ttl", pool_name).await
    }

    pub async fn get_verify_member_availability_states<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        pool_names: &[S],
    ) -> Result<Vec<EnabledState>> {
        self.by_names(ctx, "get_verify_member_availability_state", pool_names)
            .await
    }

    pub async fn get_verify_member_availability_state(
        &self,
        ctx: &CallContext,
        pool_name: &str,
    ) -> Result<EnabledState> {
        self.first_by_name(ctx, "get_verify_member_availability_state", pool_name)
            .await
    }

    /// Maximum number of records returned in an answer
    pub async fn get_answers_to_returns<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        pool_names: &[S],
    ) -> Result<Vec<i64>> {
        self.by_names(ctx, "get_answers_to_return", pool_names)
            .await
    }

    pub async fn get_answers_to_return(&self, ctx: &CallContext, pool_name: &str) -> Result<i64> {
        self.first_by_name(ctx, "get_answers_to_return", pool_name)
            .await
    }

    pub async fn get_object_statuses<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        pool_names: &[S],
    ) -> Result<Vec<ObjectStatus>> {
        self.by_names(ctx, "get_object_status", pool_names).await
    }

    pub async fn get_object_status(
        &self,
        ctx: &CallContext,
        pool_name: &str,
    ) -> Result<ObjectStatus> {
        self.first_by_name(ctx, "get_object_status", pool_name)
            .await
    }

    pub async fn get_enabled_states<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        pool_names: &[S],
    ) -> Result<Vec<EnabledState>> {
        self.by_names(ctx, "get_enabled_state", pool_names).await
    }

    pub async fn get_enabled_state(
        &self,
        ctx: &CallContext,
        pool_name: &str,
    ) -> Result<EnabledState> {
        self.first_by_name(ctx, "get_enabled_state", pool_name)
            .await
    }

    async fn by_names<T: FromXml, S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        rpc: &str,
        pool_names: &[S],
    ) -> Result<Vec<T>> {
        self.client
            .invoke(ctx, Self::NAMESPACE, with_names(rpc, POOL_NAMES, pool_names))
            .await
    }

    async fn first_by_name<T: FromXml + Default>(
        &self,
        ctx: &CallContext,
        rpc: &str,
        pool_name: &str,
    ) -> Result<T> {
        let values = self.by_names(ctx, rpc, &[pool_name]).await?;
        Ok(first_or(rpc, pool_name, values, T::default()))
    }
}

//! # icontrol
//!
//! Typed clients for the iControl interfaces of a BIG-IP GTM/DNS device.
//!
//! Each interface (`GlobalLB.Pool`, `Management.Zone`, `System.SystemInfo`,
//! ...) is a small client wrapping a shared [`SoapClient`]. Every operation
//! takes a [`CallContext`] for cancellation and deadlines and returns the
//! decoded `return` value of the RPC.
//!
//! [`BigIp`] groups all clients of one device:
//!
//! ```no_run
//! use icontrol::BigIp;
//! use icsoap::{CallContext, ClientConfig};
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientConfig::from_env()?.into_builder()?.build()?;
//! let bigip = BigIp::new(client);
//!
//! let ctx = CallContext::with_timeout(Duration::from_secs(10));
//! let pools = bigip.global_lb.pool.get_list(&ctx).await?;
//! let methods = bigip.global_lb.pool.get_preferred_lb_methods(&ctx, &pools).await?;
//! for (pool, method) in pools.iter().zip(methods) {
//!     println!("{pool}: {method}");
//! }
//! # Ok(())
//! # }
//! ```

mod bigip;
mod rpc;

pub mod common;
pub mod global_lb;
pub mod management;
pub mod system;
pub mod utils;

pub use bigip::{BigIp, GlobalLb, Management, System};
pub use icsoap::{CallContext, Result, SoapClient, SoapError};

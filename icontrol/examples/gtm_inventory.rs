//! Example: print the wide IPs, pools and topology of a GTM device
//!
//! Run with: cargo run -p icontrol --example gtm_inventory -- [profile.yaml]
//!
//! Without a profile the client is configured from `ICONTROL__*` variables,
//! e.g. `ICONTROL__ENDPOINT=https://10.1.1.245/iControl/iControlPortal.cgi`.

use std::time::Duration;

use anyhow::Context;
use icontrol::BigIp;
use icontrol::utils::{paginate, short_name};
use icsoap::{CallContext, ClientConfig};

const PAGE_SIZE: usize = 50;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ClientConfig::from_file(&path)
            .with_context(|| format!("loading profile {path}"))?,
        None => ClientConfig::from_env()?,
    };
    let bigip = BigIp::new(config.into_builder()?.build()?);
    let ctx = CallContext::with_timeout(Duration::from_secs(60));

    let (version, uptime) = tokio::join!(
        bigip.system.system_info.get_version(&ctx),
        bigip.system.system_info.get_uptime(&ctx),
    );
    println!("{} (up {}s)\n", version?, uptime?);

    let wide_ips = bigip.global_lb.wide_ip.get_list(&ctx).await?;
    println!("=== Wide IPs ({}) ===", wide_ips.len());
    for page in paginate(&wide_ips, PAGE_SIZE) {
        let (pools, methods) = tokio::join!(
            bigip.global_lb.wide_ip.get_wideip_pool(&ctx, &page),
            bigip.global_lb.wide_ip.get_lb_method(&ctx, &page),
        );
        for ((name, pools), method) in page.iter().zip(pools?).zip(methods?) {
            println!("  {} [{}]", short_name(name).unwrap_or(name), method);
            for pool in pools {
                println!("    {} order={} ratio={}", pool.pool_name, pool.order, pool.ratio);
            }
        }
    }

    let pools = bigip.global_lb.pool.get_list(&ctx).await?;
    println!("\n=== Pools ({}) ===", pools.len());
    for page in paginate(&pools, PAGE_SIZE) {
        let statuses = bigip.global_lb.pool.get_object_statuses(&ctx, &page).await?;
        for (name, status) in page.iter().zip(statuses) {
            let state = if status.is_up() { "up" } else { "down" };
            println!("  {name}: {state} ({})", status.status_description);
        }
    }

    let records = bigip.global_lb.topology.get_list(&ctx).await?;
    println!("\n=== Topology ({}) ===", records.len());
    for record in records {
        println!(
            "  server {}{} {} / ldns {}{} {}",
            if record.server.negate { "not " } else { "" },
            record.server.kind,
            record.server.content,
            if record.ldns.negate { "not " } else { "" },
            record.ldns.kind,
            record.ldns.content,
        );
    }

    Ok(())
}

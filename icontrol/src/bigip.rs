use icsoap::SoapClient;

use crate::global_lb::{
    DataCenterClient, MonitorClient, PoolClient, PoolMemberClient, ProberPoolClient,
    RegionClient, TopologyClient, VirtualServerClient, WideIpClient,
};
use crate::management::{ResourceRecordClient, ViewClient, ZoneClient};
use crate::system::SystemInfoClient;

/// GlobalLB interfaces
#[derive(Debug, Clone)]
pub struct GlobalLb {
    pub pool: PoolClient,
    pub pool_member: PoolMemberClient,
    pub topology: TopologyClient,
    pub wide_ip: WideIpClient,
    pub data_center: DataCenterClient,
    pub monitor: MonitorClient,
    pub virtual_server: VirtualServerClient,
    pub prober_pool: ProberPoolClient,
    pub region: RegionClient,
}

/// Management interfaces
#[derive(Debug, Clone)]
pub struct Management {
    pub zone: ZoneClient,
    pub view: ViewClient,
    pub resource_record: ResourceRecordClient,
}

#[derive(Debug, Clone)]
pub struct System {
    pub system_info: SystemInfoClient,
}

/// Every module client of one device, sharing a single transport
///
/// ```no_run
/// use icontrol::BigIp;
/// use icsoap::{CallContext, SoapClient};
///
/// # async fn run() -> icsoap::Result<()> {
/// let client = SoapClient::builder("https://10.1.1.245/iControl/iControlPortal.cgi")
///     .basic_auth("admin", "admin")
///     .build()?;
/// let bigip = BigIp::new(client);
///
/// let ctx = CallContext::background();
/// println!("{}", bigip.system.system_info.get_version(&ctx).await?);
/// for name in bigip.global_lb.wide_ip.get_list(&ctx).await? {
///     println!("{name}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BigIp {
    pub global_lb: GlobalLb,
    pub management: Management,
    pub system: System,
}

impl BigIp {
    pub fn new(client: SoapClient) -> Self {
        Self {
            global_lb: GlobalLb {
                pool: PoolClient::new(client.clone()),
                pool_member: PoolMemberClient::new(client.clone()),
                topology: TopologyClient::new(client.clone()),
                wide_ip: WideIpClient::new(client.clone()),
                data_center: DataCenterClient::new(client.clone()),
                monitor: MonitorClient::new(client.clone()),
                virtual_server: VirtualServerClient::new(client.clone()),
                prober_pool: ProberPoolClient::new(client.clone()),
                region: RegionClient::new(client.clone()),
            },
            management: Management {
                zone: ZoneClient::new(client.clone()),
                view: ViewClient::new(client.clone()),
                resource_record: ResourceRecordClient::new(client.clone()),
            },
            system: System {
                system_info: SystemInfoClient::new(client),
            },
        }
    }
}

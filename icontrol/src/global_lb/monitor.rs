use icsoap::soap::{FromXml, Rpc};
use icsoap::{CallContext, Result, SoapClient, vendor_enum, xml_struct};
use serde::{Deserialize, Serialize};

use super::AddressType;
use crate::common::{EnabledState, IpPortDefinition};
use crate::rpc::with_names;

const TEMPLATE_NAMES: &str = "template_names";

vendor_enum! {
    /// Monitor template types.
    pub enum TemplateType {
        Unset = "TTYPE_UNSET",
        Icmp = "TTYPE_ICMP",
        Tcp = "TTYPE_TCP",
        TcpEcho = "TTYPE_TCP_ECHO",
        /// Runs a user-supplied program.
        External = "TTYPE_EXTERNAL",
        Http = "TTYPE_HTTP",
        Https = "TTYPE_HTTPS",
        Nntp = "TTYPE_NNTP",
        Ftp = "TTYPE_FTP",
        Pop3 = "TTYPE_POP3",
        Smtp = "TTYPE_SMTP",
        Mssql = "TTYPE_MSSQL",
        Gateway = "TTYPE_GATEWAY",
        Imap = "TTYPE_IMAP",
        Radius = "TTYPE_RADIUS",
        Ldap = "TTYPE_LDAP",
        Wmi = "TTYPE_WMI",
        SnmpDca = "TTYPE_SNMP_DCA",
        SnmpDcaBase = "TTYPE_SNMP_DCA_BASE",
        RealServer = "TTYPE_REAL_SERVER",
        Udp = "TTYPE_UDP",
        None = "TTYPE_NONE",
        Oracle = "TTYPE_ORACLE",
        Soap = "TTYPE_SOAP",
        GatewayIcmp = "TTYPE_GATEWAY_ICMP",
        Sip = "TTYPE_SIP",
        TcpHalfOpen = "TTYPE_TCP_HALF_OPEN",
        Scripted = "TTYPE_SCRIPTED",
        Wap = "TTYPE_WAP",
        Bigip = "TTYPE_BIGIP",
        BigipLink = "TTYPE_BIGIP_LINK",
        SnmpGtm = "TTYPE_SNMP_GTM",
        SnmpLink = "TTYPE_SNMP_LINK",
        FirepassGtm = "TTYPE_FIREPASS_GTM",
        RadiusAccounting = "TTYPE_RADIUS_ACCOUNTING",
        Diameter = "TTYPE_DIAMETER",
        Mysql = "TTYPE_MYSQL",
        Postgresql = "TTYPE_POSTGRESQL",
    }
}

vendor_enum! {
    /// Integer properties of a monitor template.
    pub enum IntPropertyType {
        Unset = "ITYPE_UNSET",
        /// Seconds between two checks.
        Interval = "ITYPE_INTERVAL",
        /// Seconds before a silent target is marked down.
        Timeout = "ITYPE_TIMEOUT",
        ProbeInterval = "ITYPE_PROBE_INTERVAL",
        ProbeTimeout = "ITYPE_PROBE_TIMEOUT",
        ProbeNumProbes = "ITYPE_PROBE_NUM_PROBES",
        ProbeNumSuccesses = "ITYPE_PROBE_NUM_SUCCESSES",
    }
}

vendor_enum! {
    /// String properties of a monitor template.
    pub enum StrPropertyType {
        Unset = "STYPE_UNSET",
        /// Text sent to the target.
        Send = "STYPE_SEND",
        Get = "STYPE_GET",
        /// Text expected back from the target.
        Receive = "STYPE_RECEIVE",
        Username = "STYPE_USERNAME",
        Password = "STYPE_PASSWORD",
        Run = "STYPE_RUN",
        Newsgroup = "STYPE_NEWSGROUP",
        Database = "STYPE_DATABASE",
        Domain = "STYPE_DOMAIN",
        Arguments = "STYPE_ARGUMENTS",
        Folder = "STYPE_FOLDER",
        Base = "STYPE_BASE",
        Filter = "STYPE_FILTER",
        Secret = "STYPE_SECRET",
        Method = "STYPE_METHOD",
        Url = "STYPE_URL",
        Command = "STYPE_COMMAND",
        Metrics = "STYPE_METRICS",
        Post = "STYPE_POST",
        UserAgent = "STYPE_USERAGENT",
        AgentType = "STYPE_AGENT_TYPE",
        CpuCoefficient = "STYPE_CPU_COEFFICIENT",
        CpuThreshold = "STYPE_CPU_THRESHOLD",
        MemoryCoefficient = "STYPE_MEMORY_COEFFICIENT",
        MemoryThreshold = "STYPE_MEMORY_THRESHOLD",
        DiskCoefficient = "STYPE_DISK_COEFFICIENT",
        DiskThreshold = "STYPE_DISK_THRESHOLD",
        SnmpVersion = "STYPE_SNMP_VERSION",
        Community = "STYPE_COMMUNITY",
        SendPackets = "STYPE_SEND_PACKETS",
        TimeoutPackets = "STYPE_TIMEOUT_PACKETS",
        ReceiveDrain = "STYPE_RECEIVE_DRAIN",
        ReceiveRow = "STYPE_RECEIVE_ROW",
        ReceiveColumn = "STYPE_RECEIVE_COLUMN",
        Debug = "STYPE_DEBUG",
        Security = "STYPE_SECURITY",
        Mode = "STYPE_MODE",
        CipherList = "STYPE_CIPHER_LIST",
        Namespace = "STYPE_NAMESPACE",
        ParameterName = "STYPE_PARAMETER_NAME",
        ParameterValue = "STYPE_PARAMETER_VALUE",
        ParameterType = "STYPE_PARAMETER_TYPE",
        ReturnType = "STYPE_RETURN_TYPE",
        ReturnValue = "STYPE_RETURN_VALUE",
        SoapFault = "STYPE_SOAP_FAULT",
        SslOptions = "STYPE_SSL_OPTIONS",
        ClientCertificate = "STYPE_CLIENT_CERTIFICATE",
        Protocol = "STYPE_PROTOCOL",
        MandatoryAttrs = "STYPE_MANDATORY_ATTRS",
        Filename = "STYPE_FILENAME",
        AccountingNode = "STYPE_ACCOUNTING_NODE",
        AccountingPort = "STYPE_ACCOUNTING_PORT",
        ServerId = "STYPE_SERVER_ID",
        CallId = "STYPE_CALL_ID",
        SessionId = "STYPE_SESSION_ID",
        FramedAddress = "STYPE_FRAMED_ADDRESS",
        SnmpPort = "STYPE_SNMP_PORT",
        AggregateDynamicRatios = "STYPE_AGGREGATE_DYNAMIC_RATIOS",
        DbCount = "STYPE_DB_COUNT",
        NasIp = "STYPE_NAS_IP",
        ClientKey = "STYPE_CLIENT_KEY",
        MaxLoadAverage = "STYPE_MAX_LOAD_AVERAGE",
        ConcurrencyLimit = "STYPE_CONCURRENCY_LIMIT",
        FilterNeg = "STYPE_FILTER_NEG",
        Request = "STYPE_REQUEST",
        Headers = "STYPE_HEADERS",
        DiameterAcctApplicationId = "STYPE_DIAMETER_ACCT_APPLICATION_ID",
        DiameterAuthApplicationId = "STYPE_DIAMETER_AUTH_APPLICATION_ID",
        DiameterOriginHost = "STYPE_DIAMETER_ORIGIN_HOST",
        DiameterOriginRealm = "STYPE_DIAMETER_ORIGIN_REALM",
        DiameterHostIpAddress = "STYPE_DIAMETER_HOST_IP_ADDRESS",
        DiameterVendorId = "STYPE_DIAMETER_VENDOR_ID",
        DiameterProductName = "STYPE_DIAMETER_PRODUCT_NAME",
        DiameterVendorSpecificVendorId = "STYPE_DIAMETER_VENDOR_SPECIFIC_VENDOR_ID",
        DiameterVendorSpecificAcctApplicationId =
            "STYPE_DIAMETER_VENDOR_SPECIFIC_ACCT_APPLICATION_ID",
        DiameterVendorSpecificAuthApplicationId =
            "STYPE_DIAMETER_VENDOR_SPECIFIC_AUTH_APPLICATION_ID",
        RunV2 = "STYPE_RUN_V2",
        ClientCertificateV2 = "STYPE_CLIENT_CERTIFICATE_V2",
        ClientKeyV2 = "STYPE_CLIENT_KEY_V2",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MonitorTemplate {
        pub template_name: String => "template_name",
        pub template_type: TemplateType => "template_type",
    }
}

xml_struct! {
    /// Destination probed by a monitor template
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MonitorIpPort {
        pub address_type: AddressType => "address_type",
        pub ipport: IpPortDefinition => "ipport",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct IntegerValue {
        pub kind: IntPropertyType => "type",
        pub value: i64 => "value",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct StringValue {
        pub kind: StrPropertyType => "type",
        pub value: String => "value",
    }
}

xml_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserDefinedStringValue {
        pub name: String => "name",
        pub value: String => "value",
    }
}

/// GlobalLB.Monitor: health monitor templates
///
/// Property queries pair `template_names[i]` with the i-th requested
/// property.
#[derive(Debug, Clone)]
pub struct MonitorClient {
    client: SoapClient,
}

impl MonitorClient {
    pub const NAMESPACE: &'static str = "urn:iControl:GlobalLB/Monitor";

    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }

    /// Every template with its type
    pub async fn get_template_list(&self, ctx: &CallContext) -> Result<Vec<MonitorTemplate>> {
        self.client
            .invoke(ctx, Self::NAMESPACE, Rpc::new("get_template_list"))
            .await
    }

    pub async fn get_template_type<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        template_names: &[S],
    ) -> Result<Vec<TemplateType>> {
        self.by_names(ctx, "get_template_type", template_names)
            .await
    }

    /// Template each template was derived from
    pub async fn get_parent_template<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        template_names: &[S],
    ) -> Result<Vec<String>> {
        self.by_names(ctx, "get_parent_template", template_names)
            .await
    }

    pub async fn get_template_address_type<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        template_names: &[S],
    ) -> Result<Vec<AddressType>> {
        self.by_names(ctx, "get_template_address_type", template_names)
            .await
    }

    pub async fn get_template_destination<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        template_names: &[S],
    ) -> Result<Vec<MonitorIpPort>> {
        self.by_names(ctx, "get_template_destination", template_names)
            .await
    }

    pub async fn get_template_integer_property<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        template_names: &[S],
        property_types: &[IntPropertyType],
    ) -> Result<Vec<IntegerValue>> {
        let rpc = with_names("get_template_integer_property", TEMPLATE_NAMES, template_names)
            .param("property_types", property_types);
        self.client.invoke(ctx, Self::NAMESPACE, rpc).await
    }

    pub async fn get_template_state<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        template_names: &[S],
    ) -> Result<Vec<EnabledState>> {
        self.by_names(ctx, "get_template_state", template_names)
            .await
    }

    pub async fn get_template_string_property<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        template_names: &[S],
        property_types: &[StrPropertyType],
    ) -> Result<Vec<StringValue>> {
        let rpc = with_names("get_template_string_property", TEMPLATE_NAMES, template_names)
            .param("property_types", property_types);
        self.client.invoke(ctx, Self::NAMESPACE, rpc).await
    }

    /// Custom string properties, looked up by name
    pub async fn get_template_user_defined_string_property<S: AsRef<str>, P: AsRef<str>>(
        &self,
        ctx: &CallContext,
        template_names: &[S],
        property_names: &[P],
    ) -> Result<Vec<UserDefinedStringValue>> {
        let property_names: Vec<&str> = property_names.iter().map(AsRef::as_ref).collect();
        let rpc = with_names(
            "get_template_user_defined_string_property",
            TEMPLATE_NAMES,
            template_names,
        )
        .param("property_names", &property_names);
        self.client.invoke(ctx, Self::NAMESPACE, rpc).await
    }

    /// Whether a matching receive string marks the target down
    pub async fn get_template_reverse_mode<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        template_names: &[S],
    ) -> Result<Vec<bool>> {
        self.by_names(ctx, "get_template_reverse_mode", template_names)
            .await
    }

    pub async fn get_template_transparent_mode<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        template_names: &[S],
    ) -> Result<Vec<bool>> {
        self.by_names(ctx, "get_template_transparent_mode", template_names)
            .await
    }

    pub async fn get_ignore_down_response_state<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        template_names: &[S],
    ) -> Result<Vec<EnabledState>> {
        self.by_names(ctx, "get_ignore_down_response_state", template_names)
            .await
    }

    async fn by_names<S: AsRef<str>, T: FromXml>(
        &self,
        ctx: &CallContext,
        rpc: &str,
        template_names: &[S],
    ) -> Result<Vec<T>> {
        self.client
            .invoke(
                ctx,
                Self::NAMESPACE,
                with_names(rpc, TEMPLATE_NAMES, template_names),
            )
            .await
    }
}

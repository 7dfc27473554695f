//! YAML client profiles
//!
//! A profile describes one device connection:
//!
//! ```yaml
//! endpoint: https://10.1.1.245/iControl/iControlPortal.cgi
//! username: admin
//! password: admin
//! debug: false
//! tls:
//!   insecure: true
//!   ca_file: /etc/ssl/bigip-ca.pem
//! timeouts:
//!   request_secs: 30
//!   connection_secs: 90
//!   tls_handshake_secs: 15
//! headers:
//!   X-Request-Source: dns-sync
//! ```
//!
//! Any key can be overridden from the environment with the `ICONTROL__`
//! prefix, nested keys being separated by `__`
//! (`ICONTROL__ENDPOINT`, `ICONTROL__TLS__INSECURE`, ...).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

use crate::client::{Credentials, SoapClientBuilder};
use crate::error::ConfigError;
use crate::transport::TlsSettings;
use crate::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_TLS_HANDSHAKE_TIMEOUT};

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "ICONTROL__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(deserialize_with = "scalar_string")]
    pub endpoint: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub username: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing)]
    pub password: Option<String>,
    pub debug: bool,
    pub tls: TlsConfig,
    pub timeouts: TimeoutConfig,
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Skip certificate verification
    pub insecure: bool,
    /// PEM bundle of additional trust anchors
    pub ca_file: Option<PathBuf>,
}

/// Timeouts in seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub request_secs: u64,
    pub connection_secs: u64,
    pub tls_handshake_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            connection_secs: DEFAULT_CONNECTION_TIMEOUT.as_secs(),
            tls_handshake_secs: DEFAULT_TLS_HANDSHAKE_TIMEOUT.as_secs(),
        }
    }
}

impl ClientConfig {
    /// Parses a profile, without environment overrides
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::from_yaml_with_overrides(yaml, std::iter::empty::<(String, String)>())
    }

    /// Parses a profile then applies the `ICONTROL__*` entries of `vars`
    pub fn from_yaml_with_overrides<I, K, V>(yaml: &str, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut value: Value = if yaml.trim().is_empty() {
            Value::Mapping(Mapping::new())
        } else {
            serde_yaml::from_str(yaml)?
        };
        value = lower_keys_value(value);
        apply_overrides(&mut value, vars);
        Ok(serde_yaml::from_value(value)?)
    }

    /// Loads a profile file and applies the process environment
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(config_file = %path.display(), "Loaded iControl profile");
        Self::from_yaml_with_overrides(&yaml, std::env::vars())
    }

    /// Profile built from the process environment alone
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_yaml_with_overrides("", std::env::vars())
    }

    /// Converts the profile into a client builder.
    ///
    /// Fails when the endpoint is missing or the CA file cannot be read.
    pub fn into_builder(self) -> Result<SoapClientBuilder, ConfigError> {
        let endpoint = self
            .endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "endpoint".to_string(),
                value: String::new(),
            })?;

        let credentials = match (self.username, self.password) {
            (Some(username), password) => {
                Some(Credentials::new(username, password.unwrap_or_default()))
            }
            (None, Some(_)) => {
                return Err(ConfigError::InvalidValue {
                    key: "username".to_string(),
                    value: String::new(),
                });
            }
            (None, None) => None,
        };

        let mut builder = SoapClientBuilder::new(endpoint)
            .credentials(credentials)
            .debug(self.debug)
            .request_timeout(Duration::from_secs(self.timeouts.request_secs))
            .connection_timeout(Duration::from_secs(self.timeouts.connection_secs))
            .tls_handshake_timeout(Duration::from_secs(self.timeouts.tls_handshake_secs))
            .headers(self.headers);

        if self.tls.insecure || self.tls.ca_file.is_some() {
            let mut tls = TlsSettings {
                accept_invalid_certs: self.tls.insecure,
                ..TlsSettings::default()
            };
            if let Some(ca_file) = &self.tls.ca_file {
                let pem = fs::read(ca_file).map_err(|source| ConfigError::Io {
                    path: ca_file.display().to_string(),
                    source,
                })?;
                tls = tls.with_root_certificate(pem);
            }
            builder = builder.tls(tls);
        }

        Ok(builder)
    }
}

fn apply_overrides<I, K, V>(config: &mut Value, vars: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    for (key, value) in vars {
        let Some(path) = key.as_ref().strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let key_path = path
            .split("__")
            .map(str::to_lowercase)
            .collect::<Vec<_>>();
        debug!(key = %key.as_ref(), "Applying environment override");
        set_value(config, &key_path, convert_env_value(value.as_ref()));
    }
}

fn set_value(data: &mut Value, path: &[String], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        *data = value;
        return;
    };

    if !data.is_mapping() {
        *data = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(map) = data {
        let key = Value::String(first.clone());
        if !map.contains_key(&key) {
            map.insert(key.clone(), Value::Null);
        }
        if let Some(child) = map.get_mut(&key) {
            set_value(child, rest, value);
        }
    }
}

fn convert_env_value(value: &str) -> Value {
    match serde_yaml::from_str::<Value>(value) {
        Ok(parsed @ (Value::Bool(_) | Value::Number(_))) => parsed,
        _ => Value::String(value.to_string()),
    }
}

fn lower_keys_value(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| {
                    let k = match k {
                        Value::String(s) => Value::String(s.to_lowercase()),
                        other => other,
                    };
                    (k, lower_keys_value(v))
                })
                .collect(),
        ),
        other => other,
    }
}

// Environment values such as `ICONTROL__PASSWORD=1234` arrive as numbers.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, found {other:?}"
        ))),
    }
}

use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;

use regex::Regex;

use super::{Error, ErrorKind, Result};

/// Port to open on a sidecar
///
/// Written as a bare number, or with a protocol as `port/protocol`:
///
/// ```yaml
/// port: 2000/udp
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "RawPort", into = "String")]
pub struct SidecarPort {
    /// Container port
    pub port: u32,
    /// Protocol, only meaningful alongside the port
    pub protocol: Option<String>,
}

/// Port as written in the workload file
#[derive(Deserialize)]
#[serde(untagged)]
pub enum RawPort {
    Number(u32),
    Text(String),
}

impl SidecarPort {
    pub fn new(port: u32) -> Self {
        SidecarPort { port, protocol: None }
    }

    pub fn with_protocol(port: u32, protocol: &str) -> Self {
        SidecarPort { port, protocol: Some(protocol.into()) }
    }

    /// Parse the `port/protocol` shorthand
    pub fn parse(s: &str) -> Result<SidecarPort> {
        let re = Regex::new(r"^(\d+)(?:/([A-Za-z]+))?$").unwrap();
        let caps = match re.captures(s.trim()) {
            Some(c) => c,
            None => bail!(ErrorKind::InvalidPort(s.into())),
        };
        let port: u32 = caps[1].parse().map_err(|_| ErrorKind::InvalidPort(s.into()))?;
        if port == 0 {
            bail!(ErrorKind::InvalidPort(s.into()));
        }
        let protocol = caps.get(2).map(|p| p.as_str().to_lowercase());
        Ok(SidecarPort { port, protocol })
    }
}

impl TryFrom<RawPort> for SidecarPort {
    type Error = Error;

    fn try_from(raw: RawPort) -> Result<SidecarPort> {
        match raw {
            RawPort::Number(0) => bail!(ErrorKind::InvalidPort("0".into())),
            RawPort::Number(n) => Ok(SidecarPort::new(n)),
            RawPort::Text(s) => SidecarPort::parse(&s),
        }
    }
}

impl fmt::Display for SidecarPort {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.protocol {
            Some(p) => write!(f, "{}/{}", self.port, p),
            None => write!(f, "{}", self.port),
        }
    }
}

impl From<SidecarPort> for String {
    fn from(p: SidecarPort) -> String {
        p.to_string()
    }
}

/// A volume mounted into a sidecar
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MountPoint {
    /// Name of the task volume to mount
    pub sourceVolume: String,
    /// Mounts are read only unless explicitly granted write access
    #[serde(default = "read_only_default")]
    pub readOnly: bool,
    /// Where the volume is mounted in the container
    pub containerPath: String,
}
fn read_only_default() -> bool { true }

/// A user defined container running next to the main workload container
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Sidecar {
    /// Name of the container, unique within the task
    pub name: String,
    /// Image reference
    pub image: String,

    /// Whether the task stops when this container stops
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essential: Option<bool>,
    /// Port to open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<SidecarPort>,
    /// Secrets manager secret holding private registry credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentialsParameter: Option<String>,

    /// Environment variables to inject
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
    /// Secrets to inject, keyed by env name, valued by SSM/secrets manager reference
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub secrets: BTreeMap<String, String>,
    /// Volumes to mount, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mountPoints: Vec<MountPoint>,
}

use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

use serde_yaml;

use super::{ErrorKind, Result};

/// A value for an `awslogs` option
///
/// Either a plain string, or a reference resolved by the provisioning engine
/// when the fragment is embedded in a full template.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum LogOption {
    /// Intrinsic reference in full function form, i.e. `{Ref: AWS::Region}`
    Ref { Ref: String },
    /// Literal string value
    Literal(String),
}

impl LogOption {
    pub fn reference(name: &str) -> Self {
        LogOption::Ref { Ref: name.into() }
    }

    fn verify(&self, key: &str) -> Result<()> {
        let val = match self {
            LogOption::Ref { Ref: r } => r,
            LogOption::Literal(s) => s,
        };
        if val.trim().is_empty() {
            bail!(ErrorKind::InvalidConfig(format!("{} cannot be empty", key)));
        }
        Ok(())
    }
}

impl fmt::Display for LogOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogOption::Ref { Ref: r } => write!(f, "!Ref {}", r),
            LogOption::Literal(s) => write!(f, "{}", s),
        }
    }
}

/// Ambient deployment values every container log block points at
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DeploymentContext {
    /// Region the log group lives in
    #[serde(default = "region_default")]
    pub region: LogOption,
    /// Log group containers write to
    #[serde(default = "log_group_default")]
    pub logGroup: LogOption,
    /// Prefix for each container's log streams
    #[serde(default = "stream_prefix_default")]
    pub streamPrefix: LogOption,
}
fn region_default() -> LogOption { LogOption::reference("AWS::Region") }
fn log_group_default() -> LogOption { LogOption::reference("LogGroup") }
fn stream_prefix_default() -> LogOption { LogOption::Literal("copilot".into()) }

impl Default for DeploymentContext {
    fn default() -> Self {
        DeploymentContext {
            region: region_default(),
            logGroup: log_group_default(),
            streamPrefix: stream_prefix_default(),
        }
    }
}

/// Main config, serializable from ecscat.yml
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Log destination shared by the log router and all sidecars
    #[serde(default)]
    pub logging: DeploymentContext,
}

impl Config {
    pub fn verify(&self) -> Result<()> {
        let ctx = &self.logging;
        ctx.region.verify("logging.region")?;
        ctx.logGroup.verify("logging.logGroup")?;
        ctx.streamPrefix.verify("logging.streamPrefix")?;
        Ok(())
    }

    /// Read a config file in an arbitrary path
    ///
    /// A missing file means the defaults are used.
    pub fn read_from(pwd: &PathBuf) -> Result<Config> {
        let cpath = pwd.join("ecscat.yml");
        if !cpath.exists() {
            debug!("No config in {}, using defaults", cpath.display());
            return Ok(Config::default());
        }
        trace!("Using config in {}", cpath.display());
        let mut f = File::open(&cpath)?;
        let mut data = String::new();
        f.read_to_string(&mut data)?;
        let conf: Config = serde_yaml::from_str(&data)?;
        conf.verify()?;
        Ok(conf)
    }

    /// Read a config in pwd
    pub fn read() -> Result<Config> {
        let pwd = Path::new(".");
        Config::read_from(&pwd.to_path_buf())
    }
}

use std::collections::BTreeSet;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use serde_yaml;

use super::compile;
use super::config::Config;
use super::structs::{ContainerDefinition, LogConfig, Sidecar};
use super::{ErrorKind, Result};

/// Workload description, serializable from a workload yaml file
///
/// ```yaml
/// name: frontend
/// logging:
///   image: amazon/aws-for-fluent-bit:latest
/// sidecars:
/// - name: nginx
///   image: nginx
///   port: 80/tcp
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Workload {
    /// Name of the workload
    pub name: String,
    /// Optional FireLens log router
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LogConfig>,
    /// Sidecars, in the order they should appear in the task
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sidecars: Vec<Sidecar>,
}

impl Workload {
    /// Read a workload file
    pub fn read_from(pth: &Path) -> Result<Workload> {
        if !pth.exists() {
            bail!(ErrorKind::MissingWorkload(pth.display().to_string()));
        }
        trace!("Reading workload {}", pth.display());
        let mut f = File::open(&pth)?;
        let mut data = String::new();
        f.read_to_string(&mut data)?;
        Ok(serde_yaml::from_str(&data)?)
    }

    /// Sanity check the sidecars before handing them to the compiler
    ///
    /// Duplicate container names would produce an unusable task definition.
    pub fn verify(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        if self.logging.is_some() {
            seen.insert(compile::LOG_ROUTER_NAME.to_string());
        }
        for sc in &self.sidecars {
            if sc.name.is_empty() || sc.image.is_empty() {
                warn!("{} has a sidecar with an empty name or image", self.name);
            }
            if !seen.insert(sc.name.clone()) {
                bail!("{} has more than one container named '{}'", self.name, sc.name);
            }
        }
        Ok(())
    }

    /// Container definitions for this workload's log router and sidecars
    pub fn containers(&self, conf: &Config) -> Vec<ContainerDefinition> {
        compile::containers(&conf.logging, self.logging.as_ref(), &self.sidecars)
    }
}

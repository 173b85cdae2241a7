use std::fmt;

use super::version::{self, AppVersion};
use super::{ErrorKind, Result, ResultExt};

/// Where a piece of stack metadata was fetched from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetadataSource {
    /// The app's regional stack
    Stack(String),
    /// The app's stack set
    StackSet(String),
}

impl MetadataSource {
    pub fn name(&self) -> &str {
        match self {
            MetadataSource::Stack(n) => n,
            MetadataSource::StackSet(n) => n,
        }
    }

    /// Fetch this source's raw metadata document
    ///
    /// Provider failures are wrapped with the source they came from.
    pub fn fetch<P: StackMetadata + ?Sized>(&self, provider: &P) -> Result<String> {
        let res = match self {
            MetadataSource::Stack(n) => provider.fetch_by_stack_name(n),
            MetadataSource::StackSet(n) => provider.fetch_by_stack_set_name(n),
        };
        res.chain_err(|| ErrorKind::MetadataFetch(self.clone()))
    }
}

impl fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MetadataSource::Stack(n) => write!(f, "app stack {}", n),
            MetadataSource::StackSet(n) => write!(f, "app stack set {}", n),
        }
    }
}

/// Retrieval of raw stack metadata documents
///
/// Implementations own any retry, timeout or credential handling.
pub trait StackMetadata {
    /// Metadata of a stack by stack name
    fn fetch_by_stack_name(&self, name: &str) -> Result<String>;
    /// Metadata of a stack set by stack set name
    fn fetch_by_stack_set_name(&self, name: &str) -> Result<String>;
}

/// Name of the stack holding an app's infrastructure roles
pub fn stack_name(app: &str) -> String {
    format!("{}-infrastructure-roles", app)
}

/// Name of the stack set replicating an app's infrastructure across regions
pub fn stack_set_name(app: &str) -> String {
    format!("{}-infrastructure", app)
}

/// Every source describing an app, stack first
pub fn app_sources(app: &str) -> Vec<MetadataSource> {
    vec![
        MetadataSource::Stack(stack_name(app)),
        MetadataSource::StackSet(stack_set_name(app)),
    ]
}

/// The lowest template version across a set of sources
///
/// Sources are fetched in order and the first failure aborts, so a
/// partially reconciled version is never returned. Without any sources
/// nothing is known, and that is treated as `Legacy`.
pub fn minimum<P: StackMetadata + ?Sized>(provider: &P, sources: &[MetadataSource]) -> Result<AppVersion> {
    let mut lowest: Option<AppVersion> = None;
    for src in sources {
        let raw = src.fetch(provider)?;
        let ver = version::extract(src, &raw)?;
        debug!("{} is at template version {}", src, ver);
        lowest = Some(match lowest {
            Some(cur) => cur.min(ver),
            None => ver,
        });
    }
    Ok(lowest.unwrap_or(AppVersion::Legacy))
}

/// The effective template version of an app
///
/// Both the stack and the stack set must have been upgraded before the app
/// can be considered upgraded, so the older of the two is returned.
pub fn app_version<P: StackMetadata + ?Sized>(provider: &P, app: &str) -> Result<AppVersion> {
    let ver = minimum(provider, &app_sources(app))?;
    info!("{} is at template version {}", app, ver);
    Ok(ver)
}

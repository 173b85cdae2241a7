use std::cmp::Ordering;
use std::fmt;

use semver::Version;
use serde_yaml::{self, Value};

use super::reconcile::MetadataSource;
use super::{ErrorKind, Result, ResultExt};

/// Template version assumed for stacks deployed before versions were recorded
pub const LEGACY_APP_TEMPLATE_VERSION: &str = "v0.0.0";

/// Template version of a deployed stack
///
/// `Legacy` sorts below every release. Releases compare by semver
/// precedence, so build metadata is ignored.
#[derive(Clone, Debug)]
pub enum AppVersion {
    /// No version recorded
    Legacy,
    /// A recorded version, with the text it was recorded as
    Release { raw: String, version: Version },
}

impl AppVersion {
    /// Parse a recorded version string
    ///
    /// An empty string or the legacy literal is `Legacy`. A single leading `v`
    /// is accepted as the recorded form typically carries one.
    pub fn parse(raw: &str) -> Result<AppVersion> {
        let raw = raw.trim();
        if raw.is_empty() || raw == LEGACY_APP_TEMPLATE_VERSION {
            return Ok(AppVersion::Legacy);
        }
        let bare = if raw.starts_with('v') { &raw[1..] } else { raw };
        let version = Version::parse(bare)?;
        Ok(AppVersion::Release { raw: raw.into(), version })
    }

    pub fn is_legacy(&self) -> bool {
        match self {
            AppVersion::Legacy => true,
            AppVersion::Release { .. } => false,
        }
    }

    /// The semver version, if one was recorded
    pub fn semver(&self) -> Option<&Version> {
        match self {
            AppVersion::Legacy => None,
            AppVersion::Release { version, .. } => Some(version),
        }
    }
}

impl PartialEq for AppVersion {
    fn eq(&self, other: &AppVersion) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for AppVersion {}

impl PartialOrd for AppVersion {
    fn partial_cmp(&self, other: &AppVersion) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AppVersion {
    fn cmp(&self, other: &AppVersion) -> Ordering {
        match (self, other) {
            (AppVersion::Legacy, AppVersion::Legacy) => Ordering::Equal,
            (AppVersion::Legacy, _) => Ordering::Less,
            (_, AppVersion::Legacy) => Ordering::Greater,
            (AppVersion::Release { version: a, .. }, AppVersion::Release { version: b, .. }) => a.cmp(b),
        }
    }
}

impl fmt::Display for AppVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppVersion::Legacy => write!(f, "{}", LEGACY_APP_TEMPLATE_VERSION),
            AppVersion::Release { raw, .. } => write!(f, "{}", raw),
        }
    }
}

/// The metadata subset we care about
#[derive(Deserialize, Default)]
struct Metadata {
    #[serde(default)]
    TemplateVersion: Option<String>,
}

/// Extract the template version from a stack's raw metadata document
///
/// Missing documents, keys or values are `Legacy`. Anything that is not a
/// yaml mapping, or a version that is not semver, fails with `MetadataParse`.
pub fn extract(source: &MetadataSource, raw: &str) -> Result<AppVersion> {
    if raw.trim().is_empty() {
        debug!("empty metadata for {}, assuming legacy", source);
        return Ok(AppVersion::Legacy);
    }
    let doc: Value = serde_yaml::from_str(raw)
        .chain_err(|| ErrorKind::MetadataParse(source.clone()))?;
    let md: Metadata = match doc {
        Value::Null => Metadata::default(),
        Value::Mapping(_) => serde_yaml::from_value(doc)
            .chain_err(|| ErrorKind::MetadataParse(source.clone()))?,
        _ => bail!(ErrorKind::MetadataParse(source.clone())),
    };
    let ver = match md.TemplateVersion {
        Some(v) => AppVersion::parse(&v).chain_err(|| ErrorKind::MetadataParse(source.clone()))?,
        None => AppVersion::Legacy,
    };
    if ver.is_legacy() {
        debug!("no template version recorded for {}, assuming legacy", source);
    }
    Ok(ver)
}

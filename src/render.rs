use serde_json;
use serde_yaml;

use super::structs::{ContainerDefinition, MountPoint};
use super::Result;

/// Serialize mount points into a single embeddable JSON string
///
/// Each entry is written as `sourceVolume`, `readOnly`, `containerPath`,
/// and entries keep their input order.
pub fn mount_points_value(mps: &[MountPoint]) -> String {
    // plain strings and bools, which always serialize
    serde_json::to_string(mps).unwrap_or_default()
}

/// Read back a string produced by `mount_points_value`
pub fn parse_mount_points(value: &str) -> Result<Vec<MountPoint>> {
    Ok(serde_json::from_str(value)?)
}

/// Render container definitions as a yaml sequence
///
/// The output has no document marker so it can be inlined under a
/// `ContainerDefinitions:` key of a larger template.
pub fn fragment(defs: &[ContainerDefinition]) -> Result<String> {
    let raw = serde_yaml::to_string(&defs)?;
    let body = raw.trim_start_matches("---").trim_start_matches('\n');
    let mut xs = vec![];
    for l in body.lines() {
        // trim whitespace (mostly to satisfy linters)
        xs.push(l.trim_end());
    }
    let mut res = xs.join("\n");
    res.push('\n');
    Ok(res)
}

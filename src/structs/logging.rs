/// Log router configuration for a workload
///
/// When present, a FireLens log router is prepended to the containers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Image for the log router
    pub image: String,
    /// Whether to include ECS metadata in the forwarded logs
    #[serde(default = "enable_metadata_default")]
    pub enableMetadata: bool,
    /// Path to a custom fluent-bit config file inside the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configFile: Option<String>,
}
fn enable_metadata_default() -> bool { true }

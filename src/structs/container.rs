use super::super::config::{DeploymentContext, LogOption};

// These structs are a straight translation of the ECS task definition
// ContainerDefinitions property, serialized in declaration order.
// https://docs.aws.amazon.com/AWSCloudFormation/latest/UserGuide/aws-properties-ecs-taskdefinition-containerdefinitions.html

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PortMapping {
    pub container_port: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// A plain `Name`/`Value` environment entry
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct KeyValuePair {
    pub name: String,
    pub value: String,
}

/// An environment entry resolved from SSM or secrets manager
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Secret {
    pub name: String,
    pub value_from: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AwsLogsOptions {
    #[serde(rename = "awslogs-region")]
    pub region: LogOption,
    #[serde(rename = "awslogs-group")]
    pub group: LogOption,
    #[serde(rename = "awslogs-stream-prefix")]
    pub stream_prefix: LogOption,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LogConfiguration {
    pub log_driver: String,
    pub options: AwsLogsOptions,
}

impl LogConfiguration {
    /// The `awslogs` destination every container writes to
    pub fn awslogs(ctx: &DeploymentContext) -> Self {
        LogConfiguration {
            log_driver: "awslogs".into(),
            options: AwsLogsOptions {
                region: ctx.region.clone(),
                group: ctx.logGroup.clone(),
                stream_prefix: ctx.streamPrefix.clone(),
            },
        }
    }
}

/// Options handed to the FireLens log router
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct FirelensOptions {
    pub enable_ecs_log_metadata: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file_value: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct FirelensConfiguration {
    #[serde(rename = "Type")]
    pub kind: String,
    pub options: FirelensOptions,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RepositoryCredentials {
    pub credentials_parameter: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerMountPoint {
    pub source_volume: String,
    pub read_only: bool,
    pub container_path: String,
}

/// One entry of a task definition's container definitions
///
/// Optional sections are left out of the serialized output entirely.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerDefinition {
    pub name: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub essential: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firelens_configuration: Option<FirelensConfiguration>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub port_mappings: Vec<PortMapping>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<KeyValuePair>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<Secret>,
    pub log_configuration: LogConfiguration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_credentials: Option<RepositoryCredentials>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mount_points: Vec<ContainerMountPoint>,
}

impl ContainerDefinition {
    /// A container with only the mandatory sections filled in
    pub fn new(name: &str, image: &str, ctx: &DeploymentContext) -> Self {
        ContainerDefinition {
            name: name.into(),
            image: image.into(),
            essential: None,
            firelens_configuration: None,
            port_mappings: vec![],
            environment: vec![],
            secrets: vec![],
            log_configuration: LogConfiguration::awslogs(ctx),
            repository_credentials: None,
            mount_points: vec![],
        }
    }

    /// Look up a plain environment value by name
    pub fn env(&self, name: &str) -> Option<&str> {
        self.environment.iter().find(|kv| kv.name == name).map(|kv| kv.value.as_str())
    }
}

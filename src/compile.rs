use super::config::DeploymentContext;
use super::render;
use super::structs::container::{
    ContainerDefinition, ContainerMountPoint, FirelensConfiguration, FirelensOptions,
    KeyValuePair, PortMapping, RepositoryCredentials, Secret,
};
use super::structs::{LogConfig, Sidecar};

/// Container name of the FireLens log router
pub const LOG_ROUTER_NAME: &str = "firelens_log_router";

/// Environment variable carrying a sidecar's mount points as json
pub const MOUNT_POINTS_VAR: &str = "COPILOT_MOUNT_POINTS";

/// Compile a workload's log router and sidecars into container definitions
///
/// The log router, when configured, always comes first. Sidecars follow in
/// the order given. This never fails; names and images are passed through
/// unchecked, even when empty.
pub fn containers(ctx: &DeploymentContext, logging: Option<&LogConfig>, sidecars: &[Sidecar]) -> Vec<ContainerDefinition> {
    let mut defs = Vec::with_capacity(sidecars.len() + 1);
    if let Some(lc) = logging {
        defs.push(log_router(ctx, lc));
    }
    for sc in sidecars {
        defs.push(sidecar(ctx, sc));
    }
    debug!("compiled {} container definitions", defs.len());
    defs
}

/// The FireLens router forwarding task logs
pub fn log_router(ctx: &DeploymentContext, lc: &LogConfig) -> ContainerDefinition {
    trace!("compiling log router from {}", lc.image);
    let mut def = ContainerDefinition::new(LOG_ROUTER_NAME, &lc.image, ctx);
    let mut options = FirelensOptions {
        enable_ecs_log_metadata: lc.enableMetadata.to_string(),
        config_file_type: None,
        config_file_value: None,
    };
    if let Some(ref cf) = lc.configFile {
        options.config_file_type = Some("file".into());
        options.config_file_value = Some(cf.clone());
    }
    def.firelens_configuration = Some(FirelensConfiguration {
        kind: "fluentbit".into(),
        options,
    });
    def
}

/// A single user sidecar
///
/// Each optional section is only filled in when the sidecar sets it.
pub fn sidecar(ctx: &DeploymentContext, sc: &Sidecar) -> ContainerDefinition {
    trace!("compiling sidecar {}", sc.name);
    let mut def = ContainerDefinition::new(&sc.name, &sc.image, ctx);
    def.essential = sc.essential;

    if let Some(ref p) = sc.port {
        def.port_mappings.push(PortMapping {
            container_port: p.port,
            protocol: p.protocol.clone(),
        });
    }

    for (k, v) in &sc.variables {
        def.environment.push(KeyValuePair { name: k.clone(), value: v.clone() });
    }
    if !sc.mountPoints.is_empty() {
        def.environment.push(KeyValuePair {
            name: MOUNT_POINTS_VAR.into(),
            value: render::mount_points_value(&sc.mountPoints),
        });
    }

    for (k, v) in &sc.secrets {
        def.secrets.push(Secret { name: k.clone(), value_from: v.clone() });
    }

    if let Some(ref creds) = sc.credentialsParameter {
        def.repository_credentials = Some(RepositoryCredentials {
            credentials_parameter: creds.clone(),
        });
    }

    for mp in &sc.mountPoints {
        def.mount_points.push(ContainerMountPoint {
            source_volume: mp.sourceVolume.clone(),
            read_only: mp.readOnly,
            container_path: mp.containerPath.clone(),
        });
    }
    def
}

#[cfg(test)]
mod tests {
    use super::{containers, LOG_ROUTER_NAME, MOUNT_POINTS_VAR};
    use crate::config::{DeploymentContext, LogOption};
    use crate::render::{fragment, parse_mount_points};
    use crate::structs::{LogConfig, MountPoint, Sidecar, SidecarPort};
    use maplit::btreemap;

    fn router(config_file: Option<&str>) -> LogConfig {
        LogConfig {
            image: "amazon/aws-for-fluent-bit:latest".into(),
            enableMetadata: true,
            configFile: config_file.map(String::from),
        }
    }

    fn bare(name: &str) -> Sidecar {
        Sidecar { name: name.into(), image: format!("{}:latest", name), ..Default::default() }
    }

    #[test]
    fn router_comes_first() {
        let ctx = DeploymentContext::default();
        let scs = vec![bare("b"), bare("a"), bare("c")];
        let defs = containers(&ctx, Some(&router(None)), &scs);
        let names = defs.iter().map(|d| d.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec![LOG_ROUTER_NAME, "b", "a", "c"]);

        let defs = containers(&ctx, Some(&router(None)), &[]);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, LOG_ROUTER_NAME);
    }

    #[test]
    fn no_router_without_log_config() {
        let ctx = DeploymentContext::default();
        let defs = containers(&ctx, None, &[bare("a")]);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "a");
        assert!(defs[0].firelens_configuration.is_none());
        assert!(containers(&ctx, None, &[]).is_empty());
    }

    #[test]
    fn router_config_file_fields() {
        let ctx = DeploymentContext::default();
        let plain = &containers(&ctx, Some(&router(None)), &[])[0];
        let fl = plain.firelens_configuration.clone().unwrap();
        assert_eq!(fl.kind, "fluentbit");
        assert_eq!(fl.options.enable_ecs_log_metadata, "true");
        assert!(fl.options.config_file_type.is_none());
        assert!(fl.options.config_file_value.is_none());

        let custom = &containers(&ctx, Some(&router(Some("/fluent-bit/etc/extra.conf"))), &[])[0];
        let fl = custom.firelens_configuration.clone().unwrap();
        assert_eq!(fl.options.config_file_type, Some("file".into()));
        assert_eq!(fl.options.config_file_value, Some("/fluent-bit/etc/extra.conf".into()));
    }

    #[test]
    fn port_mappings_only_with_port() {
        let ctx = DeploymentContext::default();
        let mut with_port = bare("a");
        with_port.port = Some(SidecarPort::new(80));
        let mut with_proto = bare("b");
        with_proto.port = Some(SidecarPort::with_protocol(2000, "udp"));
        let defs = containers(&ctx, None, &[bare("n"), with_port, with_proto]);

        assert!(defs[0].port_mappings.is_empty());
        assert_eq!(defs[1].port_mappings.len(), 1);
        assert_eq!(defs[1].port_mappings[0].container_port, 80);
        assert_eq!(defs[1].port_mappings[0].protocol, None);
        assert_eq!(defs[2].port_mappings[0].container_port, 2000);
        assert_eq!(defs[2].port_mappings[0].protocol, Some("udp".into()));
    }

    #[test]
    fn environment_with_mount_points() {
        let ctx = DeploymentContext::default();
        let mps = vec![
            MountPoint { sourceVolume: "efs".into(), readOnly: false, containerPath: "/data".into() },
            MountPoint { sourceVolume: "tmp".into(), readOnly: true, containerPath: "/scratch".into() },
        ];
        let mut sc = bare("a");
        sc.variables = btreemap! { "Z".to_string() => "1".to_string(), "A".to_string() => "x".to_string() };
        sc.mountPoints = mps.clone();
        let def = &containers(&ctx, None, &[sc])[0];

        let names = def.environment.iter().map(|kv| kv.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["A", "Z", MOUNT_POINTS_VAR]);
        let mpv = def.env(MOUNT_POINTS_VAR).unwrap();
        assert_eq!(parse_mount_points(mpv).unwrap(), mps);
        assert_eq!(def.mount_points.len(), 2);
        assert_eq!(def.mount_points[0].source_volume, "efs");
        assert!(!def.mount_points[0].read_only);
        assert_eq!(def.mount_points[1].container_path, "/scratch");
    }

    #[test]
    fn mount_points_alone_create_environment() {
        let ctx = DeploymentContext::default();
        let mut sc = bare("a");
        sc.mountPoints = vec![MountPoint { sourceVolume: "v".into(), readOnly: true, containerPath: "/v".into() }];
        let def = &containers(&ctx, None, &[sc])[0];
        assert_eq!(def.environment.len(), 1);
        assert_eq!(def.environment[0].name, MOUNT_POINTS_VAR);
    }

    #[test]
    fn empty_sidecar_has_only_mandatory_sections() {
        let ctx = DeploymentContext::default();
        let def = &containers(&ctx, None, &[bare("a")])[0];
        assert!(def.essential.is_none());
        assert!(def.environment.is_empty());
        assert!(def.secrets.is_empty());
        assert!(def.repository_credentials.is_none());
        assert!(def.mount_points.is_empty());
        assert_eq!(def.log_configuration.log_driver, "awslogs");

        let out = fragment(&[def.clone()]).unwrap();
        for section in &["Essential", "PortMappings", "Environment", "Secrets", "RepositoryCredentials", "MountPoints"] {
            assert!(!out.contains(section), "unexpected {} in {}", section, out);
        }
    }

    #[test]
    fn empty_name_and_image_still_compile() {
        let ctx = DeploymentContext::default();
        let defs = containers(&ctx, None, &[Sidecar::default()]);
        assert_eq!(defs[0].name, "");
        assert_eq!(defs[0].image, "");
    }

    #[test]
    fn secrets_credentials_and_essential() {
        let ctx = DeploymentContext::default();
        let mut sc = bare("a");
        sc.essential = Some(false);
        sc.secrets = btreemap! { "DB".to_string() => "/copilot/db".to_string() };
        sc.credentialsParameter = Some("arn:aws:secretsmanager:us-east-1:1:secret:creds".into());
        let def = &containers(&ctx, None, &[sc])[0];
        assert_eq!(def.essential, Some(false));
        assert_eq!(def.secrets[0].name, "DB");
        assert_eq!(def.secrets[0].value_from, "/copilot/db");
        assert!(def.environment.is_empty());
        let creds = def.repository_credentials.clone().unwrap();
        assert_eq!(creds.credentials_parameter, "arn:aws:secretsmanager:us-east-1:1:secret:creds");
    }

    #[test]
    fn log_destination_comes_from_context() {
        let ctx = DeploymentContext {
            region: LogOption::Literal("eu-west-1".into()),
            logGroup: LogOption::Literal("/ecs/demo".into()),
            streamPrefix: LogOption::Literal("demo".into()),
        };
        let defs = containers(&ctx, Some(&router(None)), &[bare("a")]);
        for d in &defs {
            assert_eq!(d.log_configuration.options.region, LogOption::Literal("eu-west-1".into()));
            assert_eq!(d.log_configuration.options.group, LogOption::Literal("/ecs/demo".into()));
            assert_eq!(d.log_configuration.options.stream_prefix, LogOption::Literal("demo".into()));
        }
        assert_eq!(defs[0].log_configuration, defs[1].log_configuration);
    }

    #[test]
    fn section_order_is_fixed() {
        let ctx = DeploymentContext::default();
        let mut sc = bare("full");
        sc.essential = Some(true);
        sc.port = Some(SidecarPort::with_protocol(8080, "tcp"));
        sc.variables = btreemap! { "A".to_string() => "b".to_string() };
        sc.secrets = btreemap! { "S".to_string() => "ref".to_string() };
        sc.credentialsParameter = Some("creds".into());
        sc.mountPoints = vec![MountPoint { sourceVolume: "v".into(), readOnly: true, containerPath: "/v".into() }];
        let out = fragment(&containers(&ctx, None, &[sc])).unwrap();

        let order = ["Name:", "Image:", "Essential:", "PortMappings:", "Environment:",
                     "Secrets:", "LogConfiguration:", "RepositoryCredentials:", "MountPoints:"];
        let idx = order.iter().map(|k| out.find(k).unwrap()).collect::<Vec<_>>();
        let mut sorted = idx.clone();
        sorted.sort();
        assert_eq!(idx, sorted, "sections out of order in {}", out);
    }
}

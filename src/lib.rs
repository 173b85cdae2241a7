#![recursion_limit = "1024"]
#![allow(non_snake_case)]

#[macro_use]
extern crate serde_derive;
extern crate serde;
extern crate serde_json;
extern crate serde_yaml;

extern crate regex;
extern crate semver;

#[macro_use]
extern crate log;

#[macro_use]
extern crate error_chain;
error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }
    links {}
    foreign_links {
        Io(::std::io::Error) #[cfg(unix)];
        SerdeY(serde_yaml::Error);
        SerdeJ(serde_json::Error);
        SemVer(semver::SemVerError);
    }
    errors {
        MetadataFetch(source: reconcile::MetadataSource) {
            description("failed to fetch stack metadata")
            display("failed to get metadata for {}", source)
        }
        MetadataParse(source: reconcile::MetadataSource) {
            description("failed to parse stack metadata")
            display("failed to parse metadata for {}", source)
        }
        InvalidPort(port: String) {
            description("invalid sidecar port")
            display("sidecar port '{}' is not of the form <port> or <port>/<protocol>", port)
        }
        MissingWorkload(path: String) {
            description("workload file not found")
            display("workload file {} does not exist", path)
        }
        InvalidConfig(reason: String) {
            description("invalid deployment configuration")
            display("invalid deployment configuration: {}", reason)
        }
    }
}

/// Deployment context shared by every compiled container
pub mod config;
pub use config::{Config, DeploymentContext, LogOption};

/// Structs for workloads and the container definitions they compile into
pub mod structs;
pub use structs::{ContainerDefinition, LogConfig, MountPoint, Sidecar};

/// Workload files
pub mod workload;
pub use workload::Workload;

/// Scalar and composite field formatting
pub mod render;

/// Container definition compiler
pub mod compile;

/// Template versions extracted from stack metadata
pub mod version;
pub use version::{AppVersion, LEGACY_APP_TEMPLATE_VERSION};

/// Minimum template version across an app's stack and stack set
pub mod reconcile;
pub use reconcile::{MetadataSource, StackMetadata};

/// Stack metadata read from a local directory
pub mod filebacked;
pub use filebacked::FileMetadata;

#![allow(non_snake_case)]

/// Allow normal error handling from structs
pub use super::{Error, ErrorKind, Result};

// Structs that exist in the workload file

/// Log router configuration
mod logging;
pub use self::logging::LogConfig;

/// User sidecars and their mount points
mod sidecar;
pub use self::sidecar::{MountPoint, Sidecar, SidecarPort};

// Structs that exist in the compiled fragment

/// Container definitions - straight translations of the ECS task definition schema
pub mod container;
pub use self::container::{ContainerDefinition, ContainerMountPoint, KeyValuePair};

pub mod cli;
pub mod domain;
pub mod error;
pub mod infra;
pub mod services;

// Exposed for integration tests
pub mod test_support;

pub use domain::{
    ComposeProject, ContainerEngine, ContainerGroup, ContainerId, ListScope, WorkspacePath,
};
pub use error::DevError;
pub use infra::{EngineAdapter, GlobalConfig};
pub use services::{ContainerResolver, DevcontainerService, KillMode, LifecycleService};

mod devcontainer_service;
mod lifecycle_service;
mod resolver;

pub use devcontainer_service::DevcontainerService;
pub use lifecycle_service::{KillMode, LifecycleService};
pub use resolver::ContainerResolver;

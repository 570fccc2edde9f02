use super::container::{ComposeProject, ContainerId, LabelFilter, ListScope};
use super::workspace::WorkspaceFolder;
use anyhow::Result;
use std::fmt::Debug;
use std::path::Path;

/// Trait for the docker-compatible engine CLI (docker, podman)
///
/// Query methods capture output; lifecycle methods stream the engine's
/// stdout/stderr straight to the terminal and fail when it exits non-zero.
pub trait ContainerEngine: Send + Sync + Debug {
    /// Executable name or path of the engine
    fn tool(&self) -> &str;

    /// IDs of containers carrying the label in `filter`, in engine order
    fn list_ids(&self, filter: &LabelFilter, scope: ListScope) -> Result<Vec<ContainerId>>;

    /// Compose project label of a container
    fn compose_project(&self, id: &ContainerId) -> Result<ComposeProject>;

    /// Print a table of all dev containers
    fn list_devcontainers(&self) -> Result<()>;

    /// Gracefully stop containers
    fn stop(&self, ids: &[ContainerId]) -> Result<()>;

    /// Force-remove containers, killing them if running
    fn remove_force(&self, ids: &[ContainerId]) -> Result<()>;

    /// Send SIGKILL to containers without removing them
    fn kill(&self, ids: &[ContainerId]) -> Result<()>;

    /// Print (or follow) container logs
    fn logs(&self, id: &ContainerId, follow: bool) -> Result<()>;

    /// Print port mappings
    fn ports(&self, id: &ContainerId) -> Result<()>;

    /// Prune stopped containers
    fn prune_containers(&self) -> Result<()>;

    /// Prune unused networks
    fn prune_networks(&self) -> Result<()>;
}

/// Trait for the `devcontainer` CLI
pub trait DevcontainerCli: Send + Sync + Debug {
    /// Folder the workspace is mounted at; falls back to the default on any failure
    fn workspace_folder(&self, workspace: &Path) -> WorkspaceFolder;

    /// Build and start the dev container, streaming output
    fn up(&self, workspace: &Path) -> Result<()>;

    /// Run a command inside the dev container attached to the terminal
    fn exec(&self, workspace: &Path, command: &[String]) -> Result<()>;
}

/// Starts the editor without waiting for it
pub trait EditorLauncher: Send + Sync + Debug {
    fn open_folder_uri(&self, uri: &str) -> Result<()>;
}

/// Translates native paths to the host's namespace (WSL -> Windows)
pub trait PathTranslator: Send + Sync + Debug {
    /// `None` when no compatibility layer is active or translation failed
    fn to_host(&self, path: &Path) -> Option<String>;
}

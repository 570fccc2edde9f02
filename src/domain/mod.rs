mod container;
pub mod traits;
pub mod workspace;

pub use container::{
    COMPOSE_PROJECT_LABEL, ComposeProject, ContainerGroup, ContainerId, LOCAL_FOLDER_LABEL,
    LabelFilter, ListScope, NO_VALUE_PLACEHOLDER, parse_ids,
};
pub use traits::{ContainerEngine, DevcontainerCli, EditorLauncher, PathTranslator};
pub use workspace::{WorkspaceFolder, WorkspacePath, editor_uri};

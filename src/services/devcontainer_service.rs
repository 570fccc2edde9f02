use crate::domain::{DevcontainerCli, EditorLauncher, WorkspacePath, editor_uri};
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// Picks the best shell the container has
const SHELL_PROBE: &str = "if command -v zsh >/dev/null 2>&1; then zsh; \
                           elif command -v bash >/dev/null 2>&1; then bash; else sh; fi";

/// Dev-container workflows: bring up, open in the editor, attach a shell
pub struct DevcontainerService {
    devcontainer: Arc<dyn DevcontainerCli>,
    editor: Arc<dyn EditorLauncher>,
}

impl DevcontainerService {
    pub fn new(devcontainer: Arc<dyn DevcontainerCli>, editor: Arc<dyn EditorLauncher>) -> Self {
        Self {
            devcontainer,
            editor,
        }
    }

    pub fn up(&self, workspace: &WorkspacePath) -> Result<()> {
        println!("Subindo container em: {}", workspace);
        self.devcontainer.up(workspace.native())
    }

    /// Brings the container up, then opens it in the editor
    pub fn run(&self, workspace: &WorkspacePath) -> Result<()> {
        self.devcontainer.up(workspace.native())?;
        self.open(workspace)
    }

    /// Opens the editor attached to the container; does not wait for it
    pub fn open(&self, workspace: &WorkspacePath) -> Result<()> {
        let uri = self.container_uri(workspace);
        println!("Abrindo VS Code...");
        self.editor.open_folder_uri(&uri)
    }

    pub fn container_uri(&self, workspace: &WorkspacePath) -> String {
        let folder = self.devcontainer.workspace_folder(workspace.native());
        let uri = editor_uri(workspace, &folder);
        debug!("URI do container: {}", uri);
        uri
    }

    pub fn shell(&self, workspace: &WorkspacePath) -> Result<()> {
        let command = shell_command();
        self.devcontainer.exec(workspace.native(), &command)
    }

    pub fn exec(&self, workspace: &WorkspacePath, command: &[String]) -> Result<()> {
        self.devcontainer.exec(workspace.native(), command)
    }
}

fn shell_command() -> Vec<String> {
    vec!["/bin/sh".into(), "-c".into(), SHELL_PROBE.into()]
}

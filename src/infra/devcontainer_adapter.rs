use crate::domain::{DevcontainerCli, WorkspaceFolder};
use crate::error::ensure_success;
use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

const DEVCONTAINER: &str = "devcontainer";

/// Runs the `devcontainer` CLI.
#[derive(Debug, Clone)]
pub struct DevcontainerAdapter {
    program: String,
}

impl DevcontainerAdapter {
    pub fn new() -> Self {
        Self::with_program(DEVCONTAINER)
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, verb: &str, workspace: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(verb)
            .arg("--workspace-folder")
            .arg(workspace.as_os_str());
        cmd
    }
}

impl Default for DevcontainerAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl DevcontainerCli for DevcontainerAdapter {
    fn workspace_folder(&self, workspace: &Path) -> WorkspaceFolder {
        let output = self
            .command("read-configuration", workspace)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                WorkspaceFolder::from_read_configuration(&String::from_utf8_lossy(&output.stdout))
            }
            Ok(output) => {
                debug!(
                    "read-configuration retornou {:?}, usando pasta padrão",
                    output.status
                );
                WorkspaceFolder::Default
            }
            Err(e) => {
                debug!("read-configuration indisponível, usando pasta padrão: {}", e);
                WorkspaceFolder::Default
            }
        }
    }

    fn up(&self, workspace: &Path) -> Result<()> {
        let status = self
            .command("up", workspace)
            .status()
            .with_context(|| format!("executando {} up", self.program))?;

        ensure_success(&self.program, status, "subindo dev container")
    }

    fn exec(&self, workspace: &Path, command: &[String]) -> Result<()> {
        let status = self
            .command("exec", workspace)
            .args(command.iter().map(OsStr::new))
            .status()
            .with_context(|| format!("executando {} exec", self.program))?;

        ensure_success(&self.program, status, "executando comando no container")
    }
}

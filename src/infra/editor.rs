use crate::domain::EditorLauncher;
use anyhow::{Context, Result};
use std::process::{Command, Stdio};
use tracing::debug;

/// Launches VS Code (`code --folder-uri`) detached from this process.
#[derive(Debug, Clone)]
pub struct CodeLauncher {
    program: String,
}

impl CodeLauncher {
    pub fn new() -> Self {
        Self::with_program("code")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for CodeLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorLauncher for CodeLauncher {
    fn open_folder_uri(&self, uri: &str) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(["--folder-uri", uri])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // Own process group, so the editor survives the terminal closing
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let child = cmd
            .spawn()
            .with_context(|| format!("abrindo {}", self.program))?;
        debug!("{} iniciado (pid {})", self.program, child.id());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_editor_is_reported() {
        let launcher = CodeLauncher::with_program("devcli-editor-missing");
        assert!(launcher.open_folder_uri("vscode-remote://x").is_err());
    }
}

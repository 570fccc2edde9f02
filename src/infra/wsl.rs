use crate::domain::PathTranslator;
use std::env;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Variable WSL sets in every distribution shell.
pub const WSL_ENV_VAR: &str = "WSL_DISTRO_NAME";

const WSLPATH: &str = "wslpath";

/// Translates Linux paths to Windows paths with `wslpath -w` when running under WSL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WslPathTranslator {
    active: bool,
    program: String,
}

impl WslPathTranslator {
    /// Detects WSL from the environment
    pub fn detect() -> Self {
        let active = env::var_os(WSL_ENV_VAR).is_some_and(|v| !v.is_empty());
        Self {
            active,
            program: WSLPATH.to_string(),
        }
    }

    pub fn inactive() -> Self {
        Self {
            active: false,
            program: WSLPATH.to_string(),
        }
    }

    /// Active translator running `program` instead of `wslpath`
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            active: true,
            program: program.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl PathTranslator for WslPathTranslator {
    fn to_host(&self, path: &Path) -> Option<String> {
        if !self.active {
            return None;
        }

        let output = match Command::new(&self.program)
            .arg("-w")
            .arg(path)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                debug!("{} indisponível, mantendo caminho original: {}", self.program, e);
                return None;
            }
        };

        if !output.status.success() {
            debug!("{} falhou para {:?}, mantendo caminho original", self.program, path);
            return None;
        }

        let translated = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if translated.is_empty() {
            return None;
        }

        Some(translated)
    }
}

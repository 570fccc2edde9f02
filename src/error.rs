//! Conditions the CLI reports with a specific message or exit code.

use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevError {
    /// No container carries the workspace label, on any path form tried
    #[error("nenhum container ativo encontrado para o caminho: {path}")]
    NotFound { path: String },

    /// A delegated external command exited non-zero
    #[error("{program} retornou status {} ({action})", display_code(.code))]
    Subprocess {
        program: String,
        action: String,
        code: Option<i32>,
    },
}

impl DevError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => 1,
            // Killed by a signal: no code to forward
            Self::Subprocess { code, .. } => code.filter(|c| *c != 0).unwrap_or(1),
        }
    }
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "desconhecido".to_string(), |c| c.to_string())
}

/// `Ok` for a successful `status`, otherwise `DevError::Subprocess`.
pub fn ensure_success(program: &str, status: ExitStatus, action: &str) -> anyhow::Result<()> {
    if status.success() {
        return Ok(());
    }

    Err(DevError::Subprocess {
        program: program.to_string(),
        action: action.to_string(),
        code: status.code(),
    }
    .into())
}

/// Process exit code for an error returned by a command.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<DevError>())
        .map_or(1, DevError::exit_code)
}

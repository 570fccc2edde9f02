use super::args::{Cli, CompletionShell};
use crate::infra::config::{ensure_config_dir, home_dir};
use anyhow::{Context, Result, bail};
use clap::CommandFactory;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

const BIN_NAME: &str = "dev";

/// Installs the completion script and hooks it into the shell's startup file.
pub fn install(shell: Option<CompletionShell>, config_dir: &Path) -> Result<()> {
    let shell = match shell.or_else(detect_shell) {
        Some(shell) => shell,
        None => bail!(
            "shell não suportado ou não detectado: {}. Use explícito: dev add-completion [bash|zsh|powershell]",
            std::env::var("SHELL").unwrap_or_default()
        ),
    };

    let script = write_script(shell, config_dir)?;
    let rc_file = startup_file(shell)?;
    append_if_missing(&rc_file, &shell.source_line(&script))?;

    match shell {
        CompletionShell::Powershell => println!(
            "Autocompletar configurado no {}!\nReinicie o PowerShell para aplicar.",
            rc_file.display()
        ),
        _ => println!(
            "Autocompletar configurado no {}!\nRode 'source {}' ou reinicie o terminal.",
            rc_file.display(),
            rc_file.display()
        ),
    }

    Ok(())
}

fn detect_shell() -> Option<CompletionShell> {
    if cfg!(windows) {
        return Some(CompletionShell::Powershell);
    }
    detect_shell_from(&std::env::var("SHELL").unwrap_or_default())
}

/// Picks the shell named in a `$SHELL` value
pub fn detect_shell_from(shell_env: &str) -> Option<CompletionShell> {
    if shell_env.contains("zsh") {
        Some(CompletionShell::Zsh)
    } else if shell_env.contains("bash") {
        Some(CompletionShell::Bash)
    } else {
        None
    }
}

/// Writes `completion.<ext>` into `dir` and returns its path
pub fn write_script(shell: CompletionShell, dir: &Path) -> Result<PathBuf> {
    ensure_config_dir(dir)?;

    let path = dir.join(format!("completion.{}", shell.file_extension()));
    let mut file =
        fs::File::create(&path).with_context(|| format!("criando {:?}", path))?;
    clap_complete::generate(shell.generator(), &mut Cli::command(), BIN_NAME, &mut file);

    debug!("Script de autocompletar gerado em {:?}", path);
    Ok(path)
}

fn startup_file(shell: CompletionShell) -> Result<PathBuf> {
    match shell {
        CompletionShell::Bash => Ok(home_dir().join(".bashrc")),
        CompletionShell::Zsh => Ok(home_dir().join(".zshrc")),
        CompletionShell::Powershell => powershell_profile(),
    }
}

fn powershell_profile() -> Result<PathBuf> {
    let output = Command::new("powershell")
        .args(["-NoProfile", "-Command", "Write-Host $PROFILE"])
        .output()
        .context("falha ao localizar o $PROFILE do PowerShell")?;

    let profile = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !output.status.success() || profile.is_empty() {
        bail!("caminho do $PROFILE retornou vazio");
    }

    let profile = PathBuf::from(profile);
    if let Some(parent) = profile.parent() {
        fs::create_dir_all(parent).with_context(|| format!("criando {:?}", parent))?;
    }
    Ok(profile)
}

/// Appends `line` under a marker comment unless the file already contains it
pub fn append_if_missing(file: &Path, line: &str) -> Result<bool> {
    if fs::read_to_string(file).is_ok_and(|content| content.contains(line)) {
        debug!("{:?} já carrega o autocompletar", file);
        return Ok(false);
    }

    let mut handle = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .with_context(|| format!("abrindo {:?}", file))?;
    write!(handle, "\n# Dev CLI Autocompletion\n{}\n", line)
        .with_context(|| format!("escrevendo {:?}", file))?;

    Ok(true)
}

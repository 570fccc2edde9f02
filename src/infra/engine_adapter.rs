use crate::domain::{
    ComposeProject, ContainerEngine, ContainerId, LOCAL_FOLDER_LABEL, LabelFilter, ListScope,
    parse_ids,
};
use crate::error::ensure_success;
use crate::infra::config::GlobalConfig;
use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::process::{Command, Stdio};
use tracing::debug;

const COMPOSE_PROJECT_TEMPLATE: &str =
    r#"{{ if .Config.Labels }}{{ index .Config.Labels "com.docker.compose.project" }}{{ end }}"#;

/// Drives a docker-compatible CLI (docker, podman) through subprocesses.
#[derive(Debug, Clone)]
pub struct EngineAdapter {
    tool: String,
}

impl EngineAdapter {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    pub fn from_config(config: &GlobalConfig) -> Self {
        Self::new(config.tool())
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.tool);
        cmd.args(args);
        cmd
    }

    /// Runs a query and returns its stdout. The engine's stderr reaches the terminal.
    fn capture<I, S>(&self, args: I, context: &str) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| format!("executando {} ({context})", self.tool))?;

        ensure_success(&self.tool, output.status, context)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Runs a lifecycle verb attached to the terminal.
    fn dispatch<I, S>(&self, args: I, context: &str) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let status = self
            .command(args)
            .status()
            .with_context(|| format!("executando {} ({context})", self.tool))?;

        ensure_success(&self.tool, status, context)
    }
}

fn devcontainer_table_format() -> String {
    format!(
        "table {{{{.ID}}}}\t{{{{.Names}}}}\t{{{{.Status}}}}\t{{{{.Label \"{LOCAL_FOLDER_LABEL}\"}}}}"
    )
}

fn with_ids<'a>(verb: &[&'a str], ids: &'a [ContainerId]) -> Vec<&'a str> {
    verb.iter()
        .copied()
        .chain(ids.iter().map(ContainerId::as_str))
        .collect()
}

impl ContainerEngine for EngineAdapter {
    fn tool(&self) -> &str {
        &self.tool
    }

    fn list_ids(&self, filter: &LabelFilter, scope: ListScope) -> Result<Vec<ContainerId>> {
        let filter_arg = filter.to_filter_arg();
        let mut args = vec!["ps"];
        if scope == ListScope::All {
            args.push("-a");
        }
        args.extend(["-q", "--filter", filter_arg.as_str()]);

        let stdout = self.capture(&args, &format!("listando containers com {filter_arg}"))?;
        let ids = parse_ids(&stdout);
        debug!("{} container(s) com {}", ids.len(), filter_arg);
        Ok(ids)
    }

    /// Engine stderr is captured here; a failed inspect is the caller's to absorb.
    fn compose_project(&self, id: &ContainerId) -> Result<ComposeProject> {
        let context = format!("inspecionando container {id}");
        let output = self
            .command(["inspect", "-f", COMPOSE_PROJECT_TEMPLATE, id.as_str()])
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("executando {} ({context})", self.tool))?;

        if let Err(e) = ensure_success(&self.tool, output.status, &context) {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(if stderr.is_empty() { e } else { e.context(stderr) });
        }

        Ok(ComposeProject::from_inspect(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    fn list_devcontainers(&self) -> Result<()> {
        let filter = format!("label={LOCAL_FOLDER_LABEL}");
        let format = devcontainer_table_format();
        self.dispatch(
            ["ps", "--filter", filter.as_str(), "--format", format.as_str()],
            "listando dev containers",
        )
    }

    fn stop(&self, ids: &[ContainerId]) -> Result<()> {
        self.dispatch(with_ids(&["stop"], ids), "parando containers")
    }

    fn remove_force(&self, ids: &[ContainerId]) -> Result<()> {
        self.dispatch(with_ids(&["rm", "-f"], ids), "removendo containers")
    }

    fn kill(&self, ids: &[ContainerId]) -> Result<()> {
        self.dispatch(with_ids(&["kill"], ids), "encerrando containers")
    }

    fn logs(&self, id: &ContainerId, follow: bool) -> Result<()> {
        let mut args = vec!["logs"];
        if follow {
            args.push("-f");
        }
        args.push(id.as_str());
        self.dispatch(args, &format!("exibindo logs de {}", id.short()))
    }

    fn ports(&self, id: &ContainerId) -> Result<()> {
        self.dispatch(
            ["port", id.as_str()],
            &format!("listando portas de {}", id.short()),
        )
    }

    fn prune_containers(&self) -> Result<()> {
        self.dispatch(["container", "prune", "-f"], "removendo containers parados")
    }

    fn prune_networks(&self) -> Result<()> {
        self.dispatch(["network", "prune", "-f"], "removendo redes não utilizadas")
    }
}

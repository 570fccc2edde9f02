use crate::domain::{
    ComposeProject, ContainerEngine, ContainerId, DevcontainerCli, EditorLauncher, LabelFilter,
    ListScope, PathTranslator, WorkspaceFolder, parse_ids,
};
use crate::error::DevError;
use anyhow::{Result, bail};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::RwLock;

fn scope_name(scope: ListScope) -> &'static str {
    match scope {
        ListScope::Running => "running",
        ListScope::All => "all",
    }
}

fn joined(ids: &[ContainerId]) -> String {
    ids.iter()
        .map(ContainerId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Scripted engine recording every call as `verb:args`
pub struct MockEngine {
    tool: String,
    ids: RwLock<HashMap<(String, ListScope), Vec<ContainerId>>>,
    projects: RwLock<HashMap<String, ComposeProject>>,
    failing_inspects: RwLock<HashSet<String>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            tool: "docker".to_string(),
            ids: RwLock::new(HashMap::new()),
            projects: RwLock::new(HashMap::new()),
            failing_inspects: RwLock::new(HashSet::new()),
            commands: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
        }
    }

    /// Makes `ps` with `filter` and `scope` print `ids`
    pub fn set_ids(&self, filter: LabelFilter, scope: ListScope, ids: &[&str]) {
        let parsed = parse_ids(&ids.join("\n"));
        self.ids
            .write()
            .unwrap()
            .insert((filter.to_filter_arg(), scope), parsed);
    }

    pub fn set_project(&self, id: &str, project: ComposeProject) {
        self.projects
            .write()
            .unwrap()
            .insert(id.to_string(), project);
    }

    pub fn fail_inspect(&self, id: &str) {
        self.failing_inspects
            .write()
            .unwrap()
            .insert(id.to_string());
    }

    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    /// Fails like an engine exiting with status 1
    fn check_fail(&self, operation: &str) -> Result<()> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                return Err(DevError::Subprocess {
                    program: self.tool.clone(),
                    action: operation.to_string(),
                    code: Some(1),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockEngine").field("tool", &self.tool).finish()
    }
}

impl ContainerEngine for MockEngine {
    fn tool(&self) -> &str {
        &self.tool
    }

    fn list_ids(&self, filter: &LabelFilter, scope: ListScope) -> Result<Vec<ContainerId>> {
        let filter_arg = filter.to_filter_arg();
        self.record_command(&format!("ps:{}:{}", scope_name(scope), filter_arg));
        self.check_fail("ps")?;

        Ok(self
            .ids
            .read()
            .unwrap()
            .get(&(filter_arg, scope))
            .cloned()
            .unwrap_or_default())
    }

    fn compose_project(&self, id: &ContainerId) -> Result<ComposeProject> {
        self.record_command(&format!("inspect:{}", id));
        self.check_fail("inspect")?;

        if self.failing_inspects.read().unwrap().contains(id.as_str()) {
            bail!("Mock inspect failure on: {}", id);
        }

        Ok(self
            .projects
            .read()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .unwrap_or(ComposeProject::Absent))
    }

    fn list_devcontainers(&self) -> Result<()> {
        self.record_command("list");
        self.check_fail("list")
    }

    fn stop(&self, ids: &[ContainerId]) -> Result<()> {
        self.record_command(&format!("stop:{}", joined(ids)));
        self.check_fail("stop")
    }

    fn remove_force(&self, ids: &[ContainerId]) -> Result<()> {
        self.record_command(&format!("rm:{}", joined(ids)));
        self.check_fail("rm")
    }

    fn kill(&self, ids: &[ContainerId]) -> Result<()> {
        self.record_command(&format!("kill:{}", joined(ids)));
        self.check_fail("kill")
    }

    fn logs(&self, id: &ContainerId, follow: bool) -> Result<()> {
        if follow {
            self.record_command(&format!("logs:-f:{}", id));
        } else {
            self.record_command(&format!("logs:{}", id));
        }
        self.check_fail("logs")
    }

    fn ports(&self, id: &ContainerId) -> Result<()> {
        self.record_command(&format!("port:{}", id));
        self.check_fail("port")
    }

    fn prune_containers(&self) -> Result<()> {
        self.record_command("prune:containers");
        self.check_fail("prune_containers")
    }

    fn prune_networks(&self) -> Result<()> {
        self.record_command("prune:networks");
        self.check_fail("prune_networks")
    }
}

/// Scripted `devcontainer` CLI recording `verb:workspace[:command]`
#[derive(Debug)]
pub struct MockDevcontainer {
    folder: RwLock<WorkspaceFolder>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
}

impl MockDevcontainer {
    pub fn new() -> Self {
        Self {
            folder: RwLock::new(WorkspaceFolder::Default),
            commands: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
        }
    }

    pub fn set_workspace_folder(&self, folder: WorkspaceFolder) {
        *self.folder.write().unwrap() = folder;
    }

    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    fn record_command(&self, cmd: String) {
        self.commands.write().unwrap().push(cmd);
    }

    fn check_fail(&self, operation: &str) -> Result<()> {
        if self.fail_on.read().unwrap().as_deref() == Some(operation) {
            return Err(DevError::Subprocess {
                program: "devcontainer".to_string(),
                action: operation.to_string(),
                code: Some(1),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for MockDevcontainer {
    fn default() -> Self {
        Self::new()
    }
}

impl DevcontainerCli for MockDevcontainer {
    fn workspace_folder(&self, workspace: &Path) -> WorkspaceFolder {
        self.record_command(format!("read-configuration:{}", workspace.display()));
        self.folder.read().unwrap().clone()
    }

    fn up(&self, workspace: &Path) -> Result<()> {
        self.record_command(format!("up:{}", workspace.display()));
        self.check_fail("up")
    }

    fn exec(&self, workspace: &Path, command: &[String]) -> Result<()> {
        self.record_command(format!("exec:{}:{}", workspace.display(), command.join(" ")));
        self.check_fail("exec")
    }
}

/// Editor launcher remembering the URIs it was asked to open
#[derive(Debug, Default)]
pub struct MockEditor {
    uris: RwLock<Vec<String>>,
}

impl MockEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_uris(&self) -> Vec<String> {
        self.uris.read().unwrap().clone()
    }
}

impl EditorLauncher for MockEditor {
    fn open_folder_uri(&self, uri: &str) -> Result<()> {
        self.uris.write().unwrap().push(uri.to_string());
        Ok(())
    }
}

/// Translator returning a fixed host path (or none)
#[derive(Debug, Clone, Default)]
pub struct FixedTranslator {
    host: Option<String>,
}

impl FixedTranslator {
    pub fn new(host: Option<&str>) -> Self {
        Self {
            host: host.map(str::to_string),
        }
    }
}

impl PathTranslator for FixedTranslator {
    fn to_host(&self, _path: &Path) -> Option<String> {
        self.host.clone()
    }
}

use crate::domain::{ContainerEngine, ContainerGroup, ContainerId, ListScope, WorkspacePath};
use crate::error::DevError;
use crate::services::ContainerResolver;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// How `kill` gets rid of a workspace's containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillMode {
    /// `rm -f`: kill and remove
    Remove,
    /// `kill`: kill only, containers stay for inspection
    Keep,
}

/// Lifecycle verbs on a workspace's containers, delegated to the engine
pub struct LifecycleService {
    engine: Arc<dyn ContainerEngine>,
    resolver: ContainerResolver,
}

impl LifecycleService {
    pub fn new(engine: Arc<dyn ContainerEngine>) -> Self {
        let resolver = ContainerResolver::new(engine.clone());
        Self { engine, resolver }
    }

    pub fn list(&self) -> Result<()> {
        self.engine.list_devcontainers()
    }

    /// Prunes stopped containers and unused networks.
    ///
    /// Both steps always run; the first failure is returned afterwards.
    pub fn clean(&self) -> Result<()> {
        let tool = self.engine.tool();

        println!("Removendo containers parados...");
        let containers = self.engine.prune_containers();
        if let Err(e) = &containers {
            warn!("Falha ao remover containers via {}: {:#}", tool, e);
        }

        println!("Removendo redes não utilizadas...");
        let networks = self.engine.prune_networks();
        if let Err(e) = &networks {
            warn!("Falha ao remover redes via {}: {:#}", tool, e);
        }

        containers.and(networks)?;
        println!("Limpeza concluída.");
        Ok(())
    }

    /// Gracefully stops the workspace containers and their Compose siblings
    pub fn down(&self, workspace: &WorkspacePath) -> Result<ContainerGroup> {
        let group = self.resolver.resolve_group(workspace)?;

        println!("Parando {} container(s): {}", group.len(), short_ids(&group));
        self.engine.stop(group.ids())?;

        Ok(group)
    }

    pub fn kill(&self, workspace: &WorkspacePath, mode: KillMode) -> Result<ContainerGroup> {
        let group = self.resolver.resolve_group(workspace)?;

        println!("Encerrando {} container(s): {}", group.len(), short_ids(&group));
        match mode {
            KillMode::Remove => self.engine.remove_force(group.ids())?,
            KillMode::Keep => self.engine.kill(group.ids())?,
        }

        Ok(group)
    }

    pub fn logs(&self, workspace: &WorkspacePath, follow: bool) -> Result<()> {
        let id = self.running_container(workspace)?;
        self.engine.logs(&id, follow)
    }

    pub fn ports(&self, workspace: &WorkspacePath) -> Result<()> {
        let id = self.running_container(workspace)?;
        println!("Portas mapeadas para o container ({}):", id.short());
        self.engine.ports(&id)
    }

    /// First running container of the workspace; logs and ports take a single container
    fn running_container(&self, workspace: &WorkspacePath) -> Result<ContainerId> {
        let mut ids = self
            .resolver
            .find_primary(workspace, ListScope::Running)?
            .into_iter();

        // find_primary never returns an empty list
        let first = ids.next().ok_or_else(|| DevError::NotFound {
            path: workspace.to_string(),
        })?;

        let extra = ids.count();
        if extra > 0 {
            debug!("{} container(s) adicionais ignorados para {}", extra, workspace);
        }

        Ok(first)
    }
}

fn short_ids(group: &ContainerGroup) -> String {
    group
        .iter()
        .map(ContainerId::short)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ComposeProject, LabelFilter};
    use crate::test_support::MockEngine;

    fn create_service() -> (LifecycleService, Arc<MockEngine>) {
        let mock = Arc::new(MockEngine::new());
        let service = LifecycleService::new(mock.clone());
        (service, mock)
    }

    fn workspace() -> WorkspacePath {
        WorkspacePath::from_parts("/tmp/project", None)
    }

    #[test]
    fn test_down_stops_whole_group_in_one_call() {
        let (service, mock) = create_service();
        mock.set_ids(LabelFilter::LocalFolder("/tmp/project"), ListScope::All, &["main1"]);
        mock.set_project("main1", ComposeProject::Named("projx".into()));
        mock.set_ids(
            LabelFilter::ComposeProject("projx"),
            ListScope::All,
            &["main1", "side1"],
        );

        service.down(&workspace()).unwrap();

        let commands = mock.get_commands();
        let stops: Vec<&String> = commands.iter().filter(|c| c.starts_with("stop:")).collect();
        assert_eq!(stops, vec!["stop:main1,side1"]);
    }

    #[test]
    fn test_kill_removes_by_default_and_keeps_on_request() {
        let (service, mock) = create_service();
        mock.set_ids(LabelFilter::LocalFolder("/tmp/project"), ListScope::All, &["main1"]);

        service.kill(&workspace(), KillMode::Remove).unwrap();
        service.kill(&workspace(), KillMode::Keep).unwrap();

        let commands = mock.get_commands();
        assert!(commands.contains(&"rm:main1".to_string()));
        assert!(commands.contains(&"kill:main1".to_string()));
    }

    #[test]
    fn test_down_without_containers_dispatches_nothing() {
        let (service, mock) = create_service();

        assert!(service.down(&workspace()).is_err());
        assert!(
            !mock
                .get_commands()
                .iter()
                .any(|c| c.starts_with("stop:"))
        );
    }

    #[test]
    fn test_logs_uses_running_containers_only() {
        let (service, mock) = create_service();
        mock.set_ids(LabelFilter::LocalFolder("/tmp/project"), ListScope::All, &["stopped"]);
        mock.set_ids(
            LabelFilter::LocalFolder("/tmp/project"),
            ListScope::Running,
            &["live1", "live2"],
        );

        service.logs(&workspace(), true).unwrap();

        let commands = mock.get_commands();
        assert!(commands.contains(&"logs:-f:live1".to_string()));
        assert!(!commands.iter().any(|c| c.contains("stopped")));
    }

    #[test]
    fn test_ports_not_found_invokes_nothing_else() {
        let (service, mock) = create_service();
        let ws = WorkspacePath::from_parts("/home/user/project", Some("C:\\project".into()));

        let err = service.ports(&ws).unwrap_err();
        assert!(err.to_string().contains("/home/user/project"));

        let commands = mock.get_commands();
        assert_eq!(commands.len(), 2);
        assert!(commands.iter().all(|c| c.starts_with("ps:running:")));
    }

    #[test]
    fn test_clean_runs_both_steps_and_reports_failure() {
        let (service, mock) = create_service();
        mock.set_fail_on("prune_containers");

        let err = service.clean().unwrap_err();
        assert_eq!(crate::error::exit_code(&err), 1);

        let commands = mock.get_commands();
        assert_eq!(commands, vec!["prune:containers", "prune:networks"]);
    }

    #[test]
    fn test_clean_succeeds_when_both_steps_succeed() {
        let (service, mock) = create_service();

        service.clean().unwrap();
        assert_eq!(mock.get_commands().len(), 2);
    }

    #[test]
    fn test_stop_failure_propagates() {
        let (service, mock) = create_service();
        mock.set_ids(LabelFilter::LocalFolder("/tmp/project"), ListScope::All, &["main1"]);
        mock.set_fail_on("stop");

        assert!(service.down(&workspace()).is_err());
    }
}

use crate::domain::{
    ComposeProject, ContainerEngine, ContainerGroup, ContainerId, LabelFilter, ListScope,
    WorkspacePath,
};
use crate::error::DevError;
use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maps a workspace path to its containers and their Compose siblings
pub struct ContainerResolver {
    engine: Arc<dyn ContainerEngine>,
}

impl ContainerResolver {
    pub fn new(engine: Arc<dyn ContainerEngine>) -> Self {
        Self { engine }
    }

    /// Containers labelled with the workspace folder.
    ///
    /// The native form is queried first; the host form only when the native
    /// query found nothing. A failed query counts as no match for that form.
    ///
    /// # Errors
    /// * `DevError::NotFound` - no form matched any container
    pub fn find_primary(
        &self,
        workspace: &WorkspacePath,
        scope: ListScope,
    ) -> Result<Vec<ContainerId>> {
        for form in workspace.label_forms() {
            match self.engine.list_ids(&LabelFilter::LocalFolder(&form), scope) {
                Ok(ids) if !ids.is_empty() => {
                    debug!("{} container(s) para {}", ids.len(), form);
                    return Ok(ids);
                }
                Ok(_) => debug!("Nenhum container com a label para {}", form),
                Err(e) => debug!("Falha ao listar containers para {}: {:#}", form, e),
            }
        }

        Err(DevError::NotFound {
            path: workspace.to_string(),
        }
        .into())
    }

    /// Adds every container sharing a Compose project with a primary container.
    ///
    /// A failed inspect or sibling query only skips expansion for that
    /// container; the primaries are always part of the group.
    pub fn expand(&self, primary: &[ContainerId]) -> ContainerGroup {
        let mut group: ContainerGroup = primary.iter().cloned().collect();
        let mut expanded_projects = HashSet::new();

        for id in primary {
            let project = match self.engine.compose_project(id) {
                Ok(ComposeProject::Named(project)) => project,
                Ok(ComposeProject::Absent) => {
                    debug!("{} não pertence a um projeto Compose", id.short());
                    continue;
                }
                Err(e) => {
                    debug!("Falha ao inspecionar {}: {:#}", id.short(), e);
                    continue;
                }
            };

            if !expanded_projects.insert(project.clone()) {
                continue;
            }

            match self
                .engine
                .list_ids(&LabelFilter::ComposeProject(&project), ListScope::All)
            {
                Ok(siblings) if siblings.is_empty() => {
                    debug!("Projeto Compose {} sem containers listados", project);
                }
                Ok(siblings) => {
                    let before = group.len();
                    group.extend(siblings);
                    debug!(
                        "Projeto Compose {} adicionou {} container(s)",
                        project,
                        group.len() - before
                    );
                }
                Err(e) => {
                    warn!("Falha ao listar containers do projeto {}: {:#}", project, e);
                }
            }
        }

        group
    }

    /// Primary containers (running or stopped) plus their Compose siblings
    pub fn resolve_group(&self, workspace: &WorkspacePath) -> Result<ContainerGroup> {
        let primary = self.find_primary(workspace, ListScope::All)?;
        Ok(self.expand(&primary))
    }
}

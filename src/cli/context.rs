use crate::domain::{PathTranslator, WorkspacePath};
use crate::infra::{CodeLauncher, DevcontainerAdapter, EngineAdapter, GlobalConfig, WslPathTranslator};
use crate::services::{DevcontainerService, LifecycleService};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Everything a command needs, wired once per invocation
pub struct AppContext {
    config_dir: PathBuf,
    translator: Arc<dyn PathTranslator>,
    lifecycle: LifecycleService,
    devcontainer: DevcontainerService,
}

impl AppContext {
    /// Wires the real adapters from the config found in `config_dir`
    pub fn new(config_dir: &Path) -> Self {
        let config = GlobalConfig::load(config_dir);
        let translator = WslPathTranslator::detect();
        debug!(
            "Motor de containers: {} (WSL: {})",
            config.tool(),
            translator.is_active()
        );

        Self::with_parts(
            config_dir,
            Arc::new(translator),
            LifecycleService::new(Arc::new(EngineAdapter::from_config(&config))),
            DevcontainerService::new(
                Arc::new(DevcontainerAdapter::new()),
                Arc::new(CodeLauncher::new()),
            ),
        )
    }

    pub fn with_parts(
        config_dir: &Path,
        translator: Arc<dyn PathTranslator>,
        lifecycle: LifecycleService,
        devcontainer: DevcontainerService,
    ) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            translator,
            lifecycle,
            devcontainer,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn lifecycle(&self) -> &LifecycleService {
        &self.lifecycle
    }

    pub fn devcontainer(&self) -> &DevcontainerService {
        &self.devcontainer
    }

    /// Resolves an optional CLI path argument; none means the current directory
    pub fn workspace(&self, raw: Option<&str>) -> Result<WorkspacePath> {
        let workspace = WorkspacePath::resolve(raw.unwrap_or_default(), self.translator.as_ref())?;
        if let Some(host) = workspace.host() {
            debug!("Workspace {} (host: {})", workspace, host);
        }
        Ok(workspace)
    }
}

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_TOOL: &str = "docker";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_config_dir() -> PathBuf {
    home_dir().join(".dev-cli")
}

pub fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    fs::create_dir_all(config_dir).with_context(|| format!("criando {:?}", config_dir))
}

pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoreConfig {
    /// Container engine executable (docker, podman)
    #[serde(default)]
    pub tool: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
        }
    }
}

/// User-wide settings persisted under the config directory.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GlobalConfig {
    #[serde(default)]
    pub core: CoreConfig,
}

impl GlobalConfig {
    /// Loads the config, falling back to defaults when the file is missing or unreadable.
    pub fn load(config_dir: &Path) -> Self {
        let path = config_path(config_dir);

        let mut config = match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<GlobalConfig>(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Config inválida em {:?}, usando padrões: {}", path, e);
                    GlobalConfig::default()
                }
            },
            Err(_) => {
                debug!("Config ausente em {:?}, usando padrões", path);
                GlobalConfig::default()
            }
        };

        if config.core.tool.trim().is_empty() {
            config.core.tool = DEFAULT_TOOL.to_string();
        }

        config
    }

    pub fn save(&self, config_dir: &Path) -> Result<()> {
        ensure_config_dir(config_dir)?;

        let path = config_path(config_dir);
        let content = toml::to_string_pretty(self).context("serializando configuração")?;
        fs::write(&path, content).with_context(|| format!("escrevendo {:?}", path))
    }

    pub fn tool(&self) -> &str {
        &self.core.tool
    }
}

/// Keys accepted by `dev config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    CoreTool,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 1] = [ConfigKey::CoreTool];

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == key)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CoreTool => "core.tool",
        }
    }

    /// Prompt shown by the interactive selector
    pub fn label(&self) -> &'static str {
        match self {
            Self::CoreTool => "Selecione o motor de containers padrão",
        }
    }

    pub fn valid_values(&self) -> &'static [&'static str] {
        match self {
            Self::CoreTool => &["docker", "podman"],
        }
    }

    pub fn get<'a>(&self, config: &'a GlobalConfig) -> &'a str {
        match self {
            Self::CoreTool => &config.core.tool,
        }
    }

    pub fn set(&self, config: &mut GlobalConfig, value: &str) -> Result<()> {
        if !self.valid_values().contains(&value) {
            let options: Vec<String> = self
                .valid_values()
                .iter()
                .map(|v| format!("* {v}"))
                .collect();
            bail!(
                "valor inválido para '{}'.\n\nOpções permitidas:\n{}",
                self.name(),
                options.join("\n")
            );
        }

        match self {
            Self::CoreTool => config.core.tool = value.to_string(),
        }

        Ok(())
    }
}

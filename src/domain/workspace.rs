use super::traits::PathTranslator;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Folder used inside the container when the configuration names none.
pub const DEFAULT_WORKSPACE_FOLDER: &str = "/workspaces";

const EDITOR_URI_PREFIX: &str = "vscode-remote://dev-container+";

/// A dev-container project directory, in native and (optionally) host form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePath {
    /// Absolute path as seen by this process
    native: PathBuf,
    /// Host-native form, only when a compatibility layer translated it to
    /// something different from `native`
    host: Option<String>,
}

impl WorkspacePath {
    /// Resolves a raw CLI path and asks `translator` for its host form.
    ///
    /// An empty `raw` means the current directory. Translation failures are
    /// not errors: the workspace simply has no host form.
    pub fn resolve(raw: &str, translator: &dyn PathTranslator) -> Result<Self> {
        let native = absolute_path(raw)?;
        let host = translator.to_host(&native);
        Ok(Self::from_parts(native, host))
    }

    pub fn from_parts(native: impl Into<PathBuf>, host: Option<String>) -> Self {
        let native = native.into();
        let host = host.filter(|h| !h.is_empty() && Path::new(h) != native.as_path());
        Self { native, host }
    }

    pub fn native(&self) -> &Path {
        &self.native
    }

    pub fn native_label(&self) -> String {
        self.native.to_string_lossy().into_owned()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The form the compatibility layer's host tools know the folder by.
    pub fn host_or_native(&self) -> String {
        self.host.clone().unwrap_or_else(|| self.native_label())
    }

    /// Label values to query, native first, translated form as fallback.
    pub fn label_forms(&self) -> Vec<String> {
        let mut forms = vec![self.native_label()];
        if let Some(host) = &self.host {
            forms.push(host.clone());
        }
        forms
    }
}

impl fmt::Display for WorkspacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.native.display())
    }
}

/// Makes `raw` absolute against the current directory and cleans it lexically.
///
/// A leading `~` is expanded. Symlinks are not resolved, matching the path the
/// dev-container tooling records in its labels.
pub fn absolute_path(raw: &str) -> Result<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return std::env::current_dir().context("lendo diretório atual");
    }

    let expanded = shellexpand::tilde(raw);
    let path = Path::new(expanded.as_ref());
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("lendo diretório atual")?
            .join(path)
    };

    Ok(clean(&joined))
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Folder the workspace is mounted at inside the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceFolder {
    Configured(String),
    Default,
}

#[derive(Deserialize)]
struct ReadConfiguration {
    #[serde(default)]
    workspace: Option<ReadConfigurationWorkspace>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadConfigurationWorkspace {
    #[serde(default)]
    workspace_folder: Option<String>,
}

impl WorkspaceFolder {
    /// Parses `devcontainer read-configuration` JSON output.
    pub fn from_read_configuration(json: &str) -> Self {
        serde_json::from_str::<ReadConfiguration>(json)
            .ok()
            .and_then(|cfg| cfg.workspace)
            .and_then(|ws| ws.workspace_folder)
            .filter(|folder| !folder.is_empty())
            .map_or(Self::Default, Self::Configured)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Configured(folder) => folder,
            Self::Default => DEFAULT_WORKSPACE_FOLDER,
        }
    }

    /// Path segment of the editor URI.
    ///
    /// The editor opens the folder itself only for `.../workspaces`; any other
    /// folder needs the trailing `//`.
    pub fn uri_path(&self) -> String {
        let folder = self.as_str();
        if folder.ends_with("workspaces/") {
            format!("{folder}/")
        } else if folder.ends_with("workspaces") {
            folder.to_string()
        } else {
            format!("{folder}//")
        }
    }
}

/// Builds the `vscode-remote` URI that opens `workspace` inside its container.
pub fn editor_uri(workspace: &WorkspacePath, folder: &WorkspaceFolder) -> String {
    let encoded = hex::encode(workspace.host_or_native().as_bytes());
    format!("{EDITOR_URI_PREFIX}{encoded}{}", folder.uri_path())
}

use std::collections::HashSet;
use std::fmt;

/// Label set by the dev-container tooling on every workspace container.
pub const LOCAL_FOLDER_LABEL: &str = "devcontainer.local_folder";

/// Label set by Compose on every container of a project.
pub const COMPOSE_PROJECT_LABEL: &str = "com.docker.compose.project";

/// What the engine's Go templates print for a missing map key.
pub const NO_VALUE_PLACEHOLDER: &str = "<no value>";

/// Opaque container identifier as printed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(String);

impl ContainerId {
    /// Returns `None` for blank tokens, so an empty line never becomes an ID.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 characters, the way `ps` abbreviates IDs.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(12) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContainerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Splits `ps -q` output into IDs, keeping engine order.
///
/// Engines on Windows hosts print `\r\n`; both conventions (and a mix of them)
/// yield the same list.
pub fn parse_ids(output: &str) -> Vec<ContainerId> {
    output.split_whitespace().filter_map(ContainerId::parse).collect()
}

/// Which containers a `ps` query should see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListScope {
    /// Only running containers (`ps`).
    Running,
    /// Running and stopped containers (`ps -a`).
    All,
}

/// A `label=<key>=<value>` filter understood by the engine's `ps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFilter<'a> {
    LocalFolder(&'a str),
    ComposeProject(&'a str),
}

impl LabelFilter<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Self::LocalFolder(_) => LOCAL_FOLDER_LABEL,
            Self::ComposeProject(_) => COMPOSE_PROJECT_LABEL,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::LocalFolder(value) | Self::ComposeProject(value) => value,
        }
    }

    pub fn to_filter_arg(&self) -> String {
        format!("label={}={}", self.label(), self.value())
    }
}

/// Compose project a container belongs to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeProject {
    Absent,
    Named(String),
}

impl ComposeProject {
    /// Interprets the output of the label-extracting `inspect` template.
    pub fn from_inspect(output: &str) -> Self {
        let value = output.trim();
        if value.is_empty() || value == NO_VALUE_PLACEHOLDER {
            return Self::Absent;
        }
        Self::Named(value.to_string())
    }
}

/// Deduplicated set of containers belonging to one workspace.
///
/// Insertion order is kept so the primary containers come first.
#[derive(Debug, Clone, Default)]
pub struct ContainerGroup {
    ids: Vec<ContainerId>,
    seen: HashSet<ContainerId>,
}

impl ContainerGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` unless already present. Returns whether it was new.
    pub fn insert(&mut self, id: ContainerId) -> bool {
        if !self.seen.insert(id.clone()) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[ContainerId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContainerId> {
        self.ids.iter()
    }
}

impl Extend<ContainerId> for ContainerGroup {
    fn extend<T: IntoIterator<Item = ContainerId>>(&mut self, iter: T) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl FromIterator<ContainerId> for ContainerGroup {
    fn from_iter<T: IntoIterator<Item = ContainerId>>(iter: T) -> Self {
        let mut group = Self::new();
        group.extend(iter);
        group
    }
}

impl PartialEq for ContainerGroup {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl Eq for ContainerGroup {}

impl fmt::Display for ContainerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.ids.iter().map(ContainerId::as_str).collect();
        f.write_str(&joined.join(" "))
    }
}

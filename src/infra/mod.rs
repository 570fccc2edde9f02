pub mod config;
pub mod devcontainer_adapter;
pub mod editor;
pub mod engine_adapter;
pub mod wsl;

pub use config::{ConfigKey, GlobalConfig};
pub use devcontainer_adapter::DevcontainerAdapter;
pub use editor::CodeLauncher;
pub use engine_adapter::EngineAdapter;
pub use wsl::WslPathTranslator;

// Adapters - External system implementations

pub mod exec_process;
pub mod fs_std;
pub mod toml_config;

// Re-export adapters
pub use exec_process::ProcessEncoder;
pub use fs_std::StdFileOps;
pub use toml_config::TomlConfigAdapter;

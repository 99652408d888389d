//! Configuration schema and loading.

pub mod file_config;
pub mod loader;

pub use file_config::{
    ConfigValidationError, CycleSection, FileConfig, LedgerSection, ModelsSection,
    WorkersSection, WorkspaceSection,
};
pub use loader::ConfigLoader;

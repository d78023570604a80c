//! vidbatch library
//!
//! Batch video transcoding through an external encoder and deterministic,
//! directory-scoped ordinal renaming of files in a tree.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{BatchReport, ExtensionFilter, PrefixStyle, RenameOutcome};
pub use engine::{EncodeJob, EncodeJobConfig, OutputLayout, RenameConfig, Renamer};
pub use error::{VidbatchError, VidbatchResult};
pub use ports::{EncodeOutcome, EncodeRequest, Encoder, FileOps, OutputMode};

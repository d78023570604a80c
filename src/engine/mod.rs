//! Batch engines: directory walking, renaming and encoding

pub mod encode_job;
pub mod renamer;
pub mod walker;

pub use encode_job::{output_path, EncodeJob, EncodeJobConfig, OutputLayout};
pub use renamer::{RenameConfig, Renamer};
pub use walker::{DirectorySnapshot, TreeWalker};

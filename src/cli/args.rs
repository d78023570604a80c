//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Processing root shared by every command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct RootArgs {
    /// Root directory to process (walked recursively)
    #[arg(required_unless_present = "here", conflicts_with = "here")]
    pub root: Option<PathBuf>,

    /// Process the current working directory
    #[arg(long)]
    pub here: bool,
}

impl RootArgs {
    /// The directory to process; `--here` means `.`
    pub fn resolve(&self) -> PathBuf {
        match &self.root {
            Some(root) => root.clone(),
            None => PathBuf::from("."),
        }
    }
}

/// Arguments for the rename command
#[derive(Args, Debug, Clone)]
pub struct RenameArgs {
    #[command(flatten)]
    pub target: RootArgs,

    /// Prefix style: numeric (`1_`) or episode (`E01_`)
    #[arg(long)]
    pub style: Option<String>,

    /// Only rename files ending in this extension (repeatable)
    #[arg(long = "only", value_name = "EXT", conflicts_with = "exclude")]
    pub only: Vec<String>,

    /// Never rename files ending in this extension (repeatable)
    #[arg(long = "exclude", value_name = "EXT")]
    pub exclude: Vec<String>,

    /// Skip this directory and everything below it (repeatable)
    #[arg(long = "exclude-path", value_name = "PATH")]
    pub exclude_paths: Vec<PathBuf>,

    /// Show the planned renames without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the transcode command
#[derive(Args, Debug, Clone)]
pub struct TranscodeArgs {
    #[command(flatten)]
    pub target: RootArgs,

    /// Encoder executable
    #[arg(long)]
    pub encoder: Option<String>,

    /// Input extension to transcode (repeatable, replaces the defaults)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Extension of the written output
    #[arg(long, value_name = "EXT")]
    pub output_ext: Option<String>,

    /// Stream encoder output line by line
    #[arg(long)]
    pub stream: bool,

    /// Skip this directory and everything below it (repeatable)
    #[arg(long = "exclude-path", value_name = "PATH")]
    pub exclude_paths: Vec<PathBuf>,
}

/// Arguments for the remux command
#[derive(Args, Debug, Clone)]
pub struct RemuxArgs {
    #[command(flatten)]
    pub target: RootArgs,

    /// Encoder executable
    #[arg(long)]
    pub encoder: Option<String>,

    /// Input extension to remux (repeatable, replaces the defaults)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Output root; relative paths are taken relative to the processing root
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Leave inputs alone when their output already exists
    #[arg(long)]
    pub skip_existing: bool,

    /// Stream encoder output line by line
    #[arg(long)]
    pub stream: bool,

    /// Skip this directory and everything below it (repeatable)
    #[arg(long = "exclude-path", value_name = "PATH")]
    pub exclude_paths: Vec<PathBuf>,
}

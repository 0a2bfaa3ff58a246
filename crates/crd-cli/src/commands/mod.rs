pub mod convert;
pub mod info;

use std::path::PathBuf;

/// Global options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub set_values: Vec<String>,
    pub quiet: bool,
}

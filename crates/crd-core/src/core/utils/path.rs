use std::path::{Path, PathBuf};

/// Returns `path` with `extension` appended when it has no extension.
///
/// Paths that already carry an extension are returned unchanged.
pub fn with_default_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}

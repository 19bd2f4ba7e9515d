use std::path::{Component, Path, PathBuf};

/// Lexically cleans a relative path: drops `.` segments and resolves `..`
/// against the segments seen so far.
pub fn normalize_path(source: &Path) -> PathBuf {
    let mut new_path = PathBuf::new();

    for component in source.components() {
        match component {
            // Skip the current-dir marker "."
            Component::CurDir => {}

            // For "..", pop the last component if possible
            Component::ParentDir => {
                new_path.pop();
            }

            other => new_path.push(other.as_os_str()),
        }
    }

    new_path
}

/// Maps `path` onto `destination_root` by its position relative to `base`.
///
/// Returns `None` when `path` does not live under `base`.
pub fn mirror_path(path: &Path, base: &Path, destination_root: &Path) -> Option<PathBuf> {
    path.strip_prefix(base)
        .ok()
        .map(|relative| destination_root.join(relative))
}

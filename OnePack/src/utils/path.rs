//! Path utilities

use std::path::{Component, Path, PathBuf};

/// Normalize path separators to forward slashes (for archive entry names)
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Get relative path without touching its separators
///
/// Both sides are cleaned first, so `./demo/a.png` and `demo/a.png` are both
/// inside `./demo`, and everything relative is inside `.`.
pub fn relative_path<P: AsRef<Path>>(path: P, base: P) -> Option<String> {
    let path = clean_path(path);
    let base = clean_path(base);
    path.strip_prefix(&base)
        .ok()
        .map(|p| p.to_string_lossy().into_owned())
}

/// Resolve `.` and `..` components without touching the filesystem
///
/// `..` cancels a preceding normal component, is dropped directly after the
/// root, and is kept when there is nothing left to cancel (`../x` stays).
pub fn clean_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

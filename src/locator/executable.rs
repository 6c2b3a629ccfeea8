//! Executable lookup helpers used by the locator strategies.

use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Whether `path` is an existing, executable file.
pub fn is_executable_file(path: &Path) -> bool {
    path.is_file() && is_executable(path)
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Each directory is tried with every name in `names`, in order. Returns the
/// first match that exists and is executable. Does NOT use the `which`
/// command: `which` behavior varies across systems and is sometimes a shell
/// builtin with inconsistent error handling.
pub fn resolve_tool_path(names: &[String], path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        for name in names {
            let candidate = dir.join(name);
            if is_executable_file(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

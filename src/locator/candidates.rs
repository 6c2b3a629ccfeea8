//! Built-in conda install locations.
//!
//! These cover the default install roots of the Miniconda, Anaconda,
//! Miniforge and Mambaforge installers, per-user first.

use std::path::{Path, PathBuf};

use crate::shell::OsFamily;

/// Per-user install directory names, relative to the home directory.
const USER_ROOTS: &[&str] = &["miniconda3", "anaconda3", "miniforge3", "mambaforge"];

/// System-wide Windows install roots.
const WINDOWS_SYSTEM_ROOTS: &[&str] = &[
    "C:\\ProgramData\\miniconda3",
    "C:\\ProgramData\\anaconda3",
    "C:\\ProgramData\\miniforge3",
];

/// System-wide Unix install roots.
const UNIX_SYSTEM_ROOTS: &[&str] = &[
    "/opt/conda",
    "/opt/miniconda3",
    "/opt/anaconda3",
    "/usr/local/miniconda3",
    "/usr/local/anaconda3",
];

/// Homebrew cask roots (macOS only).
const MACOS_CASK_ROOTS: &[&str] = &[
    "/opt/homebrew/Caskroom/miniconda/base",
    "/usr/local/Caskroom/miniconda/base",
];

/// Executable file names for conda on the given platform.
pub fn conda_executable_names(os: OsFamily) -> Vec<String> {
    match os {
        OsFamily::Windows => vec!["conda.exe".to_string(), "conda.bat".to_string()],
        _ => vec!["conda".to_string()],
    }
}

/// Relative locations of the conda executable inside an install root.
fn executable_subpaths(os: OsFamily) -> &'static [&'static str] {
    match os {
        OsFamily::Windows => &["Scripts\\conda.exe", "condabin\\conda.bat"],
        _ => &["bin/conda", "condabin/conda"],
    }
}

/// Ordered built-in candidate paths for conda.
///
/// Per-user roots are skipped when there is no home directory.
pub fn builtin_candidates(os: OsFamily, home: Option<&Path>) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = match home.filter(|h| !h.as_os_str().is_empty()) {
        Some(home) => USER_ROOTS.iter().map(|r| home.join(r)).collect(),
        None => Vec::new(),
    };

    match os {
        OsFamily::Windows => {
            roots.extend(WINDOWS_SYSTEM_ROOTS.iter().map(PathBuf::from));
        }
        OsFamily::Macos => {
            roots.extend(UNIX_SYSTEM_ROOTS.iter().map(PathBuf::from));
            roots.extend(MACOS_CASK_ROOTS.iter().map(PathBuf::from));
        }
        OsFamily::Linux | OsFamily::Other => {
            roots.extend(UNIX_SYSTEM_ROOTS.iter().map(PathBuf::from));
        }
    }

    let subpaths = executable_subpaths(os);
    roots
        .iter()
        .flat_map(|root| subpaths.iter().map(move |sub| root.join(sub)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_names_include_exe_and_bat() {
        let names = conda_executable_names(OsFamily::Windows);
        assert_eq!(names, vec!["conda.exe", "conda.bat"]);
    }

    #[test]
    fn unix_names_are_bare() {
        assert_eq!(conda_executable_names(OsFamily::Linux), vec!["conda"]);
        assert_eq!(conda_executable_names(OsFamily::Macos), vec!["conda"]);
    }

    #[test]
    fn user_roots_come_first() {
        let home = PathBuf::from("/home/me");
        let candidates = builtin_candidates(OsFamily::Linux, Some(&home));
        assert_eq!(candidates[0], home.join("miniconda3").join("bin/conda"));
        assert!(candidates.contains(&PathBuf::from("/opt/conda").join("bin/conda")));
    }

    #[test]
    fn windows_candidates_use_scripts_dir() {
        let home = PathBuf::from("C:\\Users\\me");
        let candidates = builtin_candidates(OsFamily::Windows, Some(&home));
        assert!(candidates
            .iter()
            .all(|c| c.to_string_lossy().contains("conda.")));
        assert!(candidates.iter().any(|c| c
            .to_string_lossy()
            .contains("ProgramData\\miniconda3")));
    }

    #[test]
    fn macos_includes_cask_roots() {
        let candidates = builtin_candidates(OsFamily::Macos, Some(Path::new("/Users/me")));
        assert!(candidates
            .iter()
            .any(|c| c.to_string_lossy().contains("Caskroom")));
    }

    #[test]
    fn candidates_have_no_duplicates() {
        let candidates = builtin_candidates(OsFamily::Linux, Some(Path::new("/home/me")));
        let mut deduped = candidates.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), candidates.len());
    }

    #[test]
    fn no_home_means_system_roots_only() {
        for home in [None, Some(Path::new(""))] {
            let candidates = builtin_candidates(OsFamily::Linux, home);
            assert!(!candidates.is_empty());
            assert!(candidates.iter().all(|c| c.has_root()), "{:?}", candidates);
            assert!(candidates[0].starts_with("/opt"));
        }
    }
}

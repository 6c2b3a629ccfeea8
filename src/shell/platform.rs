//! Platform detection and the platform guard.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MlenvError, Result};

/// Operating-system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Windows,
    Linux,
    Macos,
    Other,
}

impl OsFamily {
    /// Map a `std::env::consts::OS` identifier to a family.
    pub fn from_os_id(os: &str) -> Self {
        match os {
            "windows" => OsFamily::Windows,
            "linux" => OsFamily::Linux,
            "macos" => OsFamily::Macos,
            _ => OsFamily::Other,
        }
    }

    /// Family of the running host.
    pub fn current() -> Self {
        Self::from_os_id(std::env::consts::OS)
    }

    /// Lowercase identifier, as used in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Windows => "windows",
            OsFamily::Linux => "linux",
            OsFamily::Macos => "macos",
            OsFamily::Other => "other",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsFamily {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" => Ok(Self::Windows),
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" => Ok(Self::Macos),
            _ => Err(format!("unknown operating system: {}", s)),
        }
    }
}

/// Fail unless `actual` is the `required` family.
///
/// No side effects; callers run this before anything persistent.
pub fn check_platform(required: OsFamily, actual: OsFamily) -> Result<()> {
    if required == actual {
        Ok(())
    } else {
        Err(MlenvError::UnsupportedPlatform {
            required: required.to_string(),
            actual: actual.to_string(),
        })
    }
}

/// Check if running in a CI environment.
///
/// Used to auto-detect CI and force non-interactive mode in `main()`.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_family_from_os_id() {
        assert_eq!(OsFamily::from_os_id("windows"), OsFamily::Windows);
        assert_eq!(OsFamily::from_os_id("linux"), OsFamily::Linux);
        assert_eq!(OsFamily::from_os_id("macos"), OsFamily::Macos);
        assert_eq!(OsFamily::from_os_id("freebsd"), OsFamily::Other);
    }

    #[test]
    fn os_family_from_str() {
        assert_eq!("Windows".parse::<OsFamily>(), Ok(OsFamily::Windows));
        assert_eq!("darwin".parse::<OsFamily>(), Ok(OsFamily::Macos));
        assert!("plan9".parse::<OsFamily>().is_err());
    }

    #[test]
    fn current_matches_consts() {
        assert_eq!(
            OsFamily::current(),
            OsFamily::from_os_id(std::env::consts::OS)
        );
    }

    #[test]
    fn check_platform_accepts_match() {
        assert!(check_platform(OsFamily::Windows, OsFamily::Windows).is_ok());
    }

    #[test]
    fn check_platform_rejects_mismatch() {
        let err = check_platform(OsFamily::Windows, OsFamily::Linux).unwrap_err();
        match err {
            MlenvError::UnsupportedPlatform { required, actual } => {
                assert_eq!(required, "windows");
                assert_eq!(actual, "linux");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn is_ci_detects_environment() {
        // Just ensure function doesn't panic
        let _ = is_ci();
    }
}

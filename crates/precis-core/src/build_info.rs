//! Build metadata embedded by `build.rs`, shown by `precis info` and the TUI
//! header.

use serde::Serialize;

/// Short git commit hash at build time.
pub const GIT_HASH: &str = env!("PRECIS_GIT_HASH");

/// Build time as Unix epoch seconds.
pub const BUILD_TIMESTAMP: &str = env!("PRECIS_BUILD_TIMESTAMP");

/// Cargo profile (`debug` or `release`).
pub const BUILD_PROFILE: &str = env!("PRECIS_BUILD_PROFILE");

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build metadata as one serializable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub profile: &'static str,
    pub timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            git_hash: GIT_HASH,
            profile: BUILD_PROFILE,
            timestamp: BUILD_TIMESTAMP,
        }
    }
}

/// Version with git hash and profile, e.g. `"0.1.0 (abc1234, debug)"`.
pub fn version_string() -> String {
    format!("{VERSION} ({GIT_HASH}, {BUILD_PROFILE})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string_contains_parts() {
        let v = version_string();
        assert!(v.starts_with(VERSION));
        assert!(v.contains(GIT_HASH));
    }

    #[test]
    fn test_current_matches_constants() {
        let info = BuildInfo::current();
        assert_eq!(info.version, VERSION);
        assert_eq!(info.profile, BUILD_PROFILE);
        assert!(!info.git_hash.is_empty());
        assert!(info.timestamp.parse::<u64>().is_ok());
    }
}

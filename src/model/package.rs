use crate::error::Error;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("package name pattern"));

/// A dependency package whose version should be kept in sync in
/// configuration files.
///
/// The name must consist of ASCII letters, digits and hyphens; the version
/// must be a full semantic version (`MAJOR.MINOR.PATCH` with optional
/// `-PRERELEASE` and `+BUILD`, no leading zeros in numeric components).
/// Validation happens before any file is processed, via [`Package::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Checks the name and version against the accepted grammars.
    ///
    /// Both problems are reported at once when name and version are bad.
    pub fn validate(&self) -> Result<(), Error> {
        let mut problems = Vec::new();

        if !NAME_PATTERN.is_match(&self.name) {
            problems.push(format!("invalid name format: {}", self.name));
        }
        if semver::Version::parse(&self.version).is_err() {
            problems.push(format!("invalid version format: {}", self.version));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidPackage {
                package: self.to_string(),
                reason: problems.join("; "),
            })
        }
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

impl std::str::FromStr for Package {
    type Err = Error;

    /// Parses `NAME@VERSION`; a leading `v` on the version is tolerated
    /// and stripped (`pkg@v1.2.3` pins `1.2.3`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, version) = s.split_once('@').ok_or_else(|| Error::InvalidPackage {
            package: s.to_string(),
            reason: "expected NAME@VERSION".to_string(),
        })?;
        let version = version.strip_prefix('v').unwrap_or(version);

        let package = Package::new(name, version);
        package.validate()?;
        Ok(package)
    }
}

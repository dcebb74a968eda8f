//! Decides whether a declared npm range has fallen behind the registry

use node_semver::{Range, Version};

use crate::registry::PackageVersions;
use crate::version::resolver::resolve;

/// Which releases count as an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    /// Compare against the latest stable release instead of the latest overall
    pub stable: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self { stable: true }
    }
}

/// Result of checking a declared range against published versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Freshness {
    /// Range as declared in the manifest
    pub required: String,
    /// Latest stable release, if any
    pub stable: Option<String>,
    /// Latest release overall, pre-releases included
    pub latest: Option<String>,
    pub status: VersionStatus,
}

impl Freshness {
    pub fn is_outdated(&self) -> bool {
        self.status == VersionStatus::Outdated
    }
}

/// Status of the declared range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    /// The newest release is allowed by the range
    Latest,
    /// The newest release is above everything the range allows
    Outdated,
    /// The range allows versions beyond the newest release
    Newer,
    /// The range is not a semver range (git URL, file path, tag, ...)
    Invalid,
    /// The newest release is below or between the range's bounds and no
    /// published version satisfies the range
    NotFound,
}

/// Compare the declared range with the versions published on the registry
pub fn check(required: &str, package: &PackageVersions, options: CheckOptions) -> Freshness {
    let (stable, latest) = resolve(package);
    let status = status(required, package, stable.as_deref(), latest.as_deref(), options);

    Freshness {
        required: required.to_string(),
        stable,
        latest,
        status,
    }
}

fn status(
    required: &str,
    package: &PackageVersions,
    stable: Option<&str>,
    latest: Option<&str>,
    options: CheckOptions,
) -> VersionStatus {
    let required = if required.trim().is_empty() {
        "*"
    } else {
        required
    };

    let Ok(range) = Range::parse(required) else {
        return VersionStatus::Invalid;
    };

    let target = if options.stable { stable } else { latest };
    let Some(target) = target.and_then(|v| Version::parse(v).ok()) else {
        return VersionStatus::Latest;
    };

    if range.satisfies(&target) {
        return VersionStatus::Latest;
    }

    if is_above(&range, &target) {
        return VersionStatus::Outdated;
    }

    let any_satisfying = package
        .versions
        .iter()
        .filter_map(|v| Version::parse(v).ok())
        .any(|v| range.satisfies(&v));

    if any_satisfying {
        VersionStatus::Newer
    } else {
        VersionStatus::NotFound
    }
}

/// Whether `version` is greater than every version `range` allows
fn is_above(range: &Range, version: &Version) -> bool {
    Range::parse(format!(">={}", version))
        .map(|at_or_above| !range.allows_any(&at_or_above))
        .unwrap_or(false)
}

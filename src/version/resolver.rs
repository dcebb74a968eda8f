//! Picks the "latest stable" and "latest overall" releases of a package
//!
//! npm publishes a `latest` dist-tag, which usually but not always points at
//! the newest stable release. Pre-release versions are only ever considered
//! for the "latest overall" answer.

use std::collections::HashMap;

use semver::Version;

use crate::registry::PackageVersions;

/// Find the semantically maximum version from a list
///
/// Invalid versions are skipped.
pub fn find_semantic_max<'a, I>(versions: I) -> Option<String>
where
    I: IntoIterator<Item = &'a String>,
{
    versions
        .into_iter()
        .filter_map(|v| Version::parse(v).ok().map(|parsed| (v, parsed)))
        .max_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(original, _)| original.clone())
}

/// Whether `version` is a release without a pre-release tag
pub fn is_stable(version: &str) -> bool {
    Version::parse(version).is_ok_and(|v| v.pre.is_empty())
}

/// Latest stable release
///
/// Prioritizes the `latest` dist-tag when it names a stable release,
/// otherwise the highest stable version.
pub fn resolve_stable(versions: &[String], dist_tags: &HashMap<String, String>) -> Option<String> {
    if let Some(latest) = dist_tags.get("latest")
        && is_stable(latest)
    {
        return Some(latest.clone());
    }

    find_semantic_max(versions.iter().filter(|v| is_stable(v)))
}

/// Latest release overall, pre-releases included
pub fn resolve_latest(versions: &[String]) -> Option<String> {
    find_semantic_max(versions)
}

/// Both answers at once for a fetched package
pub fn resolve(package: &PackageVersions) -> (Option<String>, Option<String>) {
    (
        resolve_stable(&package.versions, &package.dist_tags),
        resolve_latest(&package.versions),
    )
}

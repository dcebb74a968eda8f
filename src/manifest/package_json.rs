//! package.json parser

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::manifest::error::ManifestError;
use crate::manifest::types::{Dependency, DependencyGroup, Manifest};

/// Only the repository's root package.json is a manifest by default
static DEFAULT_MANIFEST_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^package\.json$").expect("valid manifest pattern"));

/// Check whether `file_path` names a manifest.
///
/// `pattern` overrides the default root-package.json pattern.
pub fn is_manifest(file_path: &str, pattern: Option<&Regex>) -> bool {
    pattern
        .unwrap_or(&*DEFAULT_MANIFEST_PATTERN)
        .is_match(file_path)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PackageJson {
    dependencies: IndexMap<String, serde_json::Value>,
    dev_dependencies: IndexMap<String, serde_json::Value>,
    optional_dependencies: IndexMap<String, serde_json::Value>,
}

/// Parser for package.json files
#[derive(Debug, Default)]
pub struct PackageJsonParser;

impl PackageJsonParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse manifest text into its dependency groups
    pub fn parse(&self, content: &str) -> Result<Manifest, ManifestError> {
        let root: serde_json::Value = serde_json::from_str(content)?;
        if !root.is_object() {
            return Err(ManifestError::NotAnObject);
        }

        // Re-read into ordered maps; serde_json::Value does not keep key order
        let package_json: PackageJson = serde_json::from_str(content)?;

        let mut manifest = Manifest::default();
        for (group, entries) in [
            (DependencyGroup::Dependencies, package_json.dependencies),
            (DependencyGroup::DevDependencies, package_json.dev_dependencies),
            (
                DependencyGroup::OptionalDependencies,
                package_json.optional_dependencies,
            ),
        ] {
            let dependencies = manifest.group_mut(group);
            for (name, value) in entries {
                let Some(raw) = value.as_str() else {
                    debug!("Skipping {} in {}: not a version string", name, group);
                    continue;
                };
                dependencies.push(Self::dependency(name, raw));
            }
        }

        Ok(manifest)
    }

    fn dependency(name: String, raw: &str) -> Dependency {
        match parse_npm_alias(raw) {
            Some((package, required)) => Dependency {
                name,
                package,
                required,
            },
            None => Dependency::new(name, raw.trim()),
        }
    }
}

/// Split an npm alias (`npm:pkg@range`, `npm:@scope/pkg@range`) into
/// package name and range. A missing range means "latest".
fn parse_npm_alias(value: &str) -> Option<(String, String)> {
    let rest = value.strip_prefix("npm:")?;

    // Skip a leading scope '@' so it is not taken as the version separator
    let search_from = usize::from(rest.starts_with('@'));
    match rest[search_from..].find('@') {
        Some(at) => {
            let at = search_from + at;
            Some((rest[..at].to_string(), rest[at + 1..].to_string()))
        }
        None => Some((rest.to_string(), "latest".to_string())),
    }
}

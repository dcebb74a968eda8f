//! Registry test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use npm_stale::registry::{PackageVersions, Registry, RegistryError};

/// Registry serving fixed versions and recording every lookup
#[derive(Default)]
pub struct InMemoryRegistry {
    packages: HashMap<String, PackageVersions>,
    requested: Mutex<Vec<String>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(mut self, package: &str, versions: Vec<&str>) -> Self {
        self.packages.insert(
            package.to_string(),
            PackageVersions::new(versions.into_iter().map(|v| v.to_string()).collect()),
        );
        self
    }

    pub fn with_dist_tag(mut self, package: &str, tag: &str, version: &str) -> Self {
        if let Some(versions) = self.packages.remove(package) {
            self.packages
                .insert(package.to_string(), versions.with_dist_tag(tag, version));
        }
        self
    }

    /// Packages requested so far, sorted
    pub fn requested(&self) -> Vec<String> {
        let mut requested = self.requested.lock().unwrap().clone();
        requested.sort();
        requested
    }
}

#[async_trait]
impl Registry for InMemoryRegistry {
    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError> {
        self.requested.lock().unwrap().push(package_name.to_string());
        match self.packages.get(package_name) {
            Some(versions) => Ok(versions.clone()),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}

/// npm registry document body for a package
pub fn npm_document(name: &str, versions: &[&str], latest: &str) -> String {
    let versions: serde_json::Map<String, serde_json::Value> = versions
        .iter()
        .map(|v| (v.to_string(), json!({ "name": name, "version": v })))
        .collect();

    json!({
        "name": name,
        "dist-tags": { "latest": latest },
        "versions": versions,
    })
    .to_string()
}

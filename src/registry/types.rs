use std::collections::HashMap;

/// Versions published for a package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageVersions {
    /// Valid semver versions, lowest first, highest last
    pub versions: Vec<String>,
    /// Dist-tags such as `latest` or `next`
    pub dist_tags: HashMap<String, String>,
}

impl PackageVersions {
    pub fn new(versions: Vec<String>) -> Self {
        Self {
            versions,
            dist_tags: HashMap::new(),
        }
    }

    pub fn with_dist_tag(mut self, tag: &str, version: &str) -> Self {
        self.dist_tags.insert(tag.to_string(), version.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

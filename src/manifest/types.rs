//! Common types for manifests

use serde::Serialize;

/// One of the dependency sections of a package.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DependencyGroup {
    #[serde(rename = "Dependencies")]
    Dependencies,
    #[serde(rename = "Dev dependencies")]
    DevDependencies,
    #[serde(rename = "Optional dependencies")]
    OptionalDependencies,
}

impl DependencyGroup {
    /// All groups in report order
    pub const ALL: [DependencyGroup; 3] = [
        DependencyGroup::Dependencies,
        DependencyGroup::DevDependencies,
        DependencyGroup::OptionalDependencies,
    ];

    /// Key of this group in package.json
    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencyGroup::Dependencies => "dependencies",
            DependencyGroup::DevDependencies => "devDependencies",
            DependencyGroup::OptionalDependencies => "optionalDependencies",
        }
    }

    /// Human-readable category label
    pub fn label(&self) -> &'static str {
        match self {
            DependencyGroup::Dependencies => "Dependencies",
            DependencyGroup::DevDependencies => "Dev dependencies",
            DependencyGroup::OptionalDependencies => "Optional dependencies",
        }
    }
}

impl std::fmt::Display for DependencyGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A dependency declared in a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Key as written in the manifest (e.g., "lodash", "my-fork")
    pub name: String,
    /// Package name on the registry. Differs from `name` for npm aliases
    pub package: String,
    /// Declared version range (e.g., "^4.17.21")
    pub required: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, required: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            package: name.clone(),
            name,
            required: required.into(),
        }
    }
}

/// Dependencies of a manifest, per group, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub dependencies: Vec<Dependency>,
    pub dev_dependencies: Vec<Dependency>,
    pub optional_dependencies: Vec<Dependency>,
}

impl Manifest {
    pub fn group(&self, group: DependencyGroup) -> &[Dependency] {
        match group {
            DependencyGroup::Dependencies => &self.dependencies,
            DependencyGroup::DevDependencies => &self.dev_dependencies,
            DependencyGroup::OptionalDependencies => &self.optional_dependencies,
        }
    }

    pub fn group_mut(&mut self, group: DependencyGroup) -> &mut Vec<Dependency> {
        match group {
            DependencyGroup::Dependencies => &mut self.dependencies,
            DependencyGroup::DevDependencies => &mut self.dev_dependencies,
            DependencyGroup::OptionalDependencies => &mut self.optional_dependencies,
        }
    }

    pub fn is_empty(&self) -> bool {
        DependencyGroup::ALL
            .iter()
            .all(|group| self.group(*group).is_empty())
    }
}

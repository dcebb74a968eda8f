//! Registry trait for fetching published versions of a package

pub mod error;
pub mod npm;
pub mod types;

#[cfg(test)]
use mockall::automock;

pub use error::RegistryError;
pub use npm::NpmRegistry;
pub use types::PackageVersions;

/// Trait for fetching package versions from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches all versions and dist-tags for a package
    ///
    /// # Arguments
    /// * `package_name` - The registry name of the package (e.g., "lodash", "@types/node")
    ///
    /// # Returns
    /// * `Ok(PackageVersions)` - Versions ordered from oldest to newest
    /// * `Err(RegistryError)` - If the fetch fails
    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<PackageVersions, RegistryError>;
}

//! Manifest layer
//! - types.rs: Dependency groups and the parsed manifest
//! - package_json.rs: package.json detection and parsing
//! - error.rs: Manifest parse errors

pub mod error;
pub mod package_json;
pub mod types;

pub use error::ManifestError;
pub use package_json::{PackageJsonParser, is_manifest};
pub use types::{Dependency, DependencyGroup, Manifest};

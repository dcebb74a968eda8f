//! Version freshness layer
//!
//! Turns the versions a registry publishes into an answer for one declared
//! range: is there a newer release than the range allows?
//!
//! # Modules
//!
//! - [`resolver`]: Latest stable / latest overall release selection
//! - [`checker`]: Range-vs-release comparison and status determination

pub mod checker;
pub mod resolver;

pub use checker::{CheckOptions, Freshness, VersionStatus, check};

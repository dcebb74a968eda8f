//! Shared test utilities

#![allow(dead_code, unused_imports)]

pub mod registry;

pub use registry::{InMemoryRegistry, npm_document};

//! npm-stale: finds package.json dependencies whose declared range has fallen
//! behind the latest stable release on the npm registry.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Manifest   │────▶│  Analyser   │────▶│   Report    │
//! │  (parse)    │     │ (orchestr.) │     │  (sinks)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                      │          │
//!                      ▼          ▼
//!               ┌───────────┐ ┌───────────┐
//!               │ Registry  │ │  Locator  │
//!               │ + Version │ │ (line no.)│
//!               └───────────┘ └───────────┘
//! ```

pub mod analyser;
pub mod config;
pub mod locator;
pub mod logging;
pub mod manifest;
pub mod registry;
pub mod report;
pub mod version;

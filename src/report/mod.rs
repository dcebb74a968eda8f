//! Report records produced for outdated dependencies
//!
//! # Modules
//!
//! - [`sink`]: Writers for a finished report (analyser JSON, human-readable)

pub mod sink;

use serde::Serialize;

use crate::manifest::DependencyGroup;

pub use sink::{HumanSink, JsonSink, ReportSink};

/// Analyser name stamped on every record
pub const ANALYSER_NAME: &str = env!("CARGO_PKG_NAME");

/// Kind of finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    DependencyOutdated,
    DevDependencyOutdated,
    OptionalDependencyOutdated,
}

impl From<DependencyGroup> for Kind {
    fn from(group: DependencyGroup) -> Self {
        match group {
            DependencyGroup::Dependencies => Kind::DependencyOutdated,
            DependencyGroup::DevDependencies => Kind::DevDependencyOutdated,
            DependencyGroup::OptionalDependencies => Kind::OptionalDependencyOutdated,
        }
    }
}

/// Span of a finding in the manifest. Lines are 1-indexed; columns are always 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub start_line: usize,
    pub end_line: usize,
    pub start_col: usize,
    pub end_col: usize,
}

impl Location {
    /// A whole-line location
    pub fn line(line: usize) -> Self {
        Self {
            start_line: line,
            end_line: line,
            start_col: 0,
            end_col: 0,
        }
    }
}

/// One outdated dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub analyser: &'static str,
    pub location: Location,
    pub message: String,
    pub kind: Kind,
    pub category: DependencyGroup,
    /// Versions behind the message; not part of the analyser record
    #[serde(skip)]
    pub update: Option<Update>,
}

impl Annotation {
    pub fn new(group: DependencyGroup, line: usize, message: String) -> Self {
        Self {
            analyser: ANALYSER_NAME,
            location: Location::line(line),
            message,
            kind: group.into(),
            category: group,
            update: None,
        }
    }

    /// Record for an outdated dependency, message rendered from `update`
    pub fn outdated(group: DependencyGroup, line: usize, update: Update) -> Self {
        let message = outdated_message(
            &update.name,
            &update.required,
            update.stable.as_deref(),
            update.latest.as_deref(),
        );
        Self {
            update: Some(update),
            ..Self::new(group, line, message)
        }
    }
}

/// Declared range of a dependency and the releases it could move to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub name: String,
    pub required: String,
    pub stable: Option<String>,
    pub latest: Option<String>,
}

impl Update {
    pub fn new(
        name: impl Into<String>,
        required: impl Into<String>,
        stable: Option<&str>,
        latest: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            required: required.into(),
            stable: stable.map(str::to_string),
            latest: latest.map(str::to_string),
        }
    }
}

/// Message for an outdated dependency; missing values print as `*` / `None`
pub fn outdated_message(
    name: &str,
    required: &str,
    stable: Option<&str>,
    latest: Option<&str>,
) -> String {
    let required = if required.is_empty() { "*" } else { required };
    format!(
        "Dependency '{}' is out of date. You use '{}', which could be updated to stable: '{}' (latest: '{}').",
        name,
        required,
        stable.unwrap_or("None"),
        latest.unwrap_or("None"),
    )
}

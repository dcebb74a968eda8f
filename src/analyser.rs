//! Outdated-dependency analysis
//!
//! Parses a manifest, asks the registry about every dependency of the enabled
//! groups, and turns each outdated one into an [`Annotation`] pointing at the
//! manifest line that declares it.

use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use serde::Deserialize;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::{AnalyserConfig, ConfigError, FETCH_STAGGER_DELAY_MS};
use crate::locator::{LocationResult, LookupStrategy, locate, locate_in_section, quoted};
use crate::manifest::{
    Dependency, DependencyGroup, Manifest, ManifestError, PackageJsonParser, is_manifest,
};
use crate::registry::{Registry, RegistryError};
use crate::report::{Annotation, Update};
use crate::version::{Freshness, check};

#[derive(Debug, Error)]
pub enum AnalyseError {
    #[error("No manifest content to analyse")]
    EmptyManifest,

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unable to get versions of {package}: {source}")]
    Registry {
        package: String,
        #[source]
        source: RegistryError,
    },
}

/// Input handed over by an analyser runner
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyserSetup {
    /// Path of the file relative to the repository root
    pub file_path: String,
    /// Raw file content
    pub content: String,
    /// Overrides the manifest pattern
    #[serde(default)]
    pub file_regex: Option<String>,
}

/// A dependency with a newer release than its range allows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutdatedDependency {
    pub dependency: Dependency,
    pub freshness: Freshness,
}

/// Outdated dependencies of one group, in manifest order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    pub group: DependencyGroup,
    pub outdated: Vec<OutdatedDependency>,
}

pub struct Analyser {
    parser: PackageJsonParser,
    registry: Arc<dyn Registry>,
    config: AnalyserConfig,
}

impl Analyser {
    pub fn new(registry: Arc<dyn Registry>, config: AnalyserConfig) -> Self {
        Self {
            parser: PackageJsonParser::new(),
            registry,
            config,
        }
    }

    /// Entry point for an analyser runner.
    ///
    /// Files that are not the manifest produce an empty result.
    pub async fn run_setup(&self, setup: &AnalyserSetup) -> Result<Vec<Annotation>, AnalyseError> {
        let pattern = match &setup.file_regex {
            Some(file_regex) => Some(regex::Regex::new(file_regex).map_err(ConfigError::from)?),
            None => self.config.manifest_pattern()?,
        };

        if !is_manifest(&setup.file_path, pattern.as_ref()) {
            info!("{} is not a manifest, nothing to analyse", setup.file_path);
            return Ok(Vec::new());
        }

        self.run(&setup.content).await
    }

    /// Analyse manifest text and return one annotation per outdated dependency
    pub async fn run(&self, content: &str) -> Result<Vec<Annotation>, AnalyseError> {
        if content.trim().is_empty() {
            return Err(AnalyseError::EmptyManifest);
        }

        let manifest = self.parser.parse(content)?;
        let reports = self.scan(&manifest).await?;
        let annotations = self.annotate(&reports, content);

        info!("Found {} outdated dependencies", annotations.len());
        Ok(annotations)
    }

    /// Check every dependency of the enabled groups against the registry.
    ///
    /// Groups are scanned concurrently. A package missing from the registry is
    /// skipped; any other registry failure fails the whole scan.
    pub async fn scan(&self, manifest: &Manifest) -> Result<Vec<GroupReport>, AnalyseError> {
        let groups = self.config.groups.enabled();
        try_join_all(
            groups
                .into_iter()
                .map(|group| self.scan_group(group, manifest.group(group))),
        )
        .await
    }

    async fn scan_group(
        &self,
        group: DependencyGroup,
        dependencies: &[Dependency],
    ) -> Result<GroupReport, AnalyseError> {
        debug!("Checking {} {}", dependencies.len(), group);

        let futures = dependencies.iter().enumerate().map(|(i, dependency)| {
            let delay = Duration::from_millis(FETCH_STAGGER_DELAY_MS * i as u64);
            async move {
                sleep(delay).await;
                self.check_dependency(dependency).await
            }
        });

        let outdated = try_join_all(futures).await?.into_iter().flatten().collect();

        Ok(GroupReport { group, outdated })
    }

    async fn check_dependency(
        &self,
        dependency: &Dependency,
    ) -> Result<Option<OutdatedDependency>, AnalyseError> {
        let versions = match self.registry.fetch_all_versions(&dependency.package).await {
            Ok(versions) => versions,
            Err(RegistryError::NotFound(_)) => {
                warn!(
                    "Package not found on registry: {}. Skipping.",
                    dependency.package
                );
                return Ok(None);
            }
            Err(source) => {
                return Err(AnalyseError::Registry {
                    package: dependency.package.clone(),
                    source,
                });
            }
        };

        let freshness = check(&dependency.required, &versions, self.config.check_options());
        debug!(
            "{} {}: {:?} (stable: {:?}, latest: {:?})",
            dependency.name,
            dependency.required,
            freshness.status,
            freshness.stable,
            freshness.latest
        );

        Ok(freshness
            .is_outdated()
            .then(|| OutdatedDependency {
                dependency: dependency.clone(),
                freshness,
            }))
    }

    /// Build annotations in group order, pointing at each declaration line
    pub fn annotate(&self, reports: &[GroupReport], content: &str) -> Vec<Annotation> {
        reports
            .iter()
            .flat_map(|report| {
                report
                    .outdated
                    .iter()
                    .map(move |outdated| self.annotation(report.group, outdated, content))
            })
            .collect()
    }

    fn annotation(
        &self,
        group: DependencyGroup,
        outdated: &OutdatedDependency,
        content: &str,
    ) -> Annotation {
        let dependency = &outdated.dependency;
        let token = quoted(&dependency.name);
        let location = match self.config.lookup {
            LookupStrategy::FirstMatch => locate(&token, content),
            LookupStrategy::SectionScoped => {
                locate_in_section(&quoted(group.manifest_key()), &token, content)
            }
        };

        let line = match location {
            LocationResult::Found { line } => line,
            LocationResult::NotFound => {
                warn!("Declaration of {} not found in manifest", dependency.name);
                1
            }
        };

        let freshness = &outdated.freshness;
        let update = Update::new(
            dependency.name.as_str(),
            freshness.required.as_str(),
            freshness.stable.as_deref(),
            freshness.latest.as_deref(),
        );

        Annotation::outdated(group, line, update)
    }
}

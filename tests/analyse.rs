//! Analyser tests against an in-memory registry

mod helper;

use std::sync::Arc;

use helper::InMemoryRegistry;
use npm_stale::analyser::{Analyser, AnalyserSetup};
use npm_stale::config::AnalyserConfig;
use npm_stale::manifest::DependencyGroup;
use npm_stale::report::Kind;

fn registry() -> InMemoryRegistry {
    InMemoryRegistry::new()
        .with_versions("david", vec!["0.0.1", "11.0.0", "12.0.0-beta.0"])
        .with_dist_tag("david", "latest", "11.0.0")
        .with_versions("bluebird", vec!["3.7.0", "3.7.2"])
        .with_versions("chai", vec!["0.0.1", "4.3.10"])
        .with_versions("mocha", vec!["10.0.0", "10.2.0"])
        .with_versions("jscs", vec!["0.0.1", "3.0.7"])
}

fn manifest(dependencies: &str, dev_dependencies: &str, optional_dependencies: &str) -> String {
    format!(
        r#"{{
  "name": "npm-stale-fixture",
  "version": "1.0.0",
  "dependencies": {{{}
  }},
  "devDependencies": {{{}
  }},
  "optionalDependencies": {{{}
  }}
}}"#,
        dependencies, dev_dependencies, optional_dependencies
    )
}

fn count(annotations: &[npm_stale::report::Annotation], group: DependencyGroup) -> usize {
    annotations.iter().filter(|a| a.category == group).count()
}

#[tokio::test]
async fn reports_one_outdated_dependency_per_group() {
    let content = manifest(
        "\n    \"david\": \"0.0.1\",\n    \"bluebird\": \"^3.7.0\"",
        "\n    \"chai\": \"0.0.1\",\n    \"mocha\": \"^10.0.0\"",
        "\n    \"jscs\": \"0.0.1\"",
    );
    let analyser = Analyser::new(Arc::new(registry()), AnalyserConfig::default());

    let annotations = analyser.run(&content).await.unwrap();

    assert_eq!(count(&annotations, DependencyGroup::Dependencies), 1);
    assert_eq!(count(&annotations, DependencyGroup::DevDependencies), 1);
    assert_eq!(count(&annotations, DependencyGroup::OptionalDependencies), 1);

    let david = &annotations[0];
    assert_eq!(david.analyser, "npm-stale");
    assert_eq!(david.kind, Kind::DependencyOutdated);
    assert_eq!(david.location.start_line, 5);
    assert!(
        david
            .message
            .starts_with("Dependency 'david' is out of date. You use '0.0.1'"),
        "unexpected message: {}",
        david.message
    );
    assert!(david.message.ends_with("stable: '11.0.0' (latest: '12.0.0-beta.0')."));
}

#[tokio::test]
async fn reports_only_dev_dependencies_when_runtime_ones_are_current() {
    let content = manifest(
        "\n    \"bluebird\": \"^3.7.0\"",
        "\n    \"chai\": \"0.0.1\"",
        "",
    );
    let analyser = Analyser::new(Arc::new(registry()), AnalyserConfig::default());

    let annotations = analyser.run(&content).await.unwrap();

    assert_eq!(count(&annotations, DependencyGroup::Dependencies), 0);
    assert_eq!(count(&annotations, DependencyGroup::DevDependencies), 1);
}

#[tokio::test]
async fn reports_only_runtime_dependencies_when_dev_ones_are_current() {
    let content = manifest(
        "\n    \"david\": \"0.0.1\"",
        "\n    \"mocha\": \"^10.0.0\"",
        "",
    );
    let analyser = Analyser::new(Arc::new(registry()), AnalyserConfig::default());

    let annotations = analyser.run(&content).await.unwrap();

    assert_eq!(count(&annotations, DependencyGroup::Dependencies), 1);
    assert_eq!(count(&annotations, DependencyGroup::DevDependencies), 0);
}

#[tokio::test]
async fn reports_optional_dependencies_alone() {
    let content = manifest("", "", "\n    \"jscs\": \"0.0.1\"");
    let analyser = Analyser::new(Arc::new(registry()), AnalyserConfig::default());

    let annotations = analyser.run(&content).await.unwrap();

    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].kind, Kind::OptionalDependencyOutdated);
    assert_eq!(annotations[0].location.start_line, 9);
}

#[tokio::test]
async fn disabled_groups_are_not_fetched() {
    let content = manifest(
        "\n    \"david\": \"0.0.1\"",
        "\n    \"chai\": \"0.0.1\"",
        "\n    \"jscs\": \"0.0.1\"",
    );
    let registry = Arc::new(registry());
    let mut config = AnalyserConfig::default();
    config.groups.dev_dependencies = false;
    config.groups.optional_dependencies = false;
    let analyser = Analyser::new(registry.clone(), config);

    let annotations = analyser.run(&content).await.unwrap();

    assert_eq!(annotations.len(), 1);
    assert_eq!(registry.requested(), vec!["david".to_string()]);
}

#[tokio::test]
async fn npm_alias_is_checked_under_its_registry_name() {
    let content = r#"{
  "dependencies": {
    "promise": "npm:bluebird@3.7.0"
  }
}"#;
    let registry = Arc::new(registry());
    let analyser = Analyser::new(registry.clone(), AnalyserConfig::default());

    let annotations = analyser.run(content).await.unwrap();

    assert_eq!(registry.requested(), vec!["bluebird".to_string()]);
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].location.start_line, 3);
    assert!(annotations[0].message.starts_with("Dependency 'promise'"));
}

#[tokio::test]
async fn run_setup_returns_nothing_for_other_files() {
    let registry = Arc::new(registry());
    let analyser = Analyser::new(registry.clone(), AnalyserConfig::default());
    let setup = AnalyserSetup {
        file_path: "tsconfig.json".to_string(),
        content: "{}".to_string(),
        file_regex: None,
    };

    let annotations = analyser.run_setup(&setup).await.unwrap();

    assert!(annotations.is_empty());
    assert!(registry.requested().is_empty());
}

//! Integration tests for the deploy pipeline

use kapok_core::{DeployOptions, Provider};
use kapok_deploy::testing::RecordingRunner;
use kapok_deploy::{
    CommandError, CommandRunner, DeployError, DeployOutcome, Deployer, StaticContext,
};
use std::path::Path;
use tempfile::TempDir;

fn no_context() -> StaticContext {
    StaticContext(String::new())
}

#[test]
fn test_dry_run_never_invokes_installer() {
    let runner = RecordingRunner::succeeding("");
    let context = no_context();

    let options = DeployOptions {
        dry_run: true,
        ..Default::default()
    };
    let outcome = Deployer::new(&runner, &context).deploy(&options).unwrap();

    assert!(runner.invocations().is_empty());

    // The scratch directory is the deliverable of a dry run
    let chart_dir = outcome.chart_dir().to_path_buf();
    assert!(chart_dir.join("Chart.yaml").is_file());
    std::fs::remove_dir_all(chart_dir.parent().unwrap()).unwrap();
}

#[test]
fn test_install_invoked_once_with_namespace() {
    let dir = TempDir::new().unwrap();
    let runner = RecordingRunner::succeeding("Release \"kapok\" has been upgraded.");
    let context = no_context();

    let options = DeployOptions {
        namespace: "staging".to_string(),
        output_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let outcome = Deployer::new(&runner, &context).deploy(&options).unwrap();

    let calls = runner.invocations();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "helm");
    assert_eq!(calls[0].flag_value("--namespace"), Some("staging"));
    assert_eq!(calls[0].flag_value("--timeout"), Some("10m"));
    assert!(calls[0].args.contains(&"--create-namespace".to_string()));
    assert!(calls[0].args.contains(&"--wait".to_string()));

    match outcome {
        DeployOutcome::Installed {
            output, cleaned_up, ..
        } => {
            assert!(output.contains("has been upgraded"));
            assert!(!cleaned_up);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    // Caller-supplied directories are never removed
    assert!(dir.path().join("kapok").join("values.yaml").is_file());
}

#[test]
fn test_custom_timeout_and_binary() {
    let dir = TempDir::new().unwrap();
    let runner = RecordingRunner::succeeding("");
    let context = no_context();

    let options = DeployOptions {
        timeout: "3m".to_string(),
        helm_binary: "/opt/helm/bin/helm".to_string(),
        output_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    Deployer::new(&runner, &context).deploy(&options).unwrap();

    let calls = runner.invocations();
    assert_eq!(calls[0].program, "/opt/helm/bin/helm");
    assert_eq!(calls[0].flag_value("--timeout"), Some("3m"));
}

#[test]
fn test_owned_scratch_removed_after_install() {
    let runner = RecordingRunner::succeeding("ok");
    let context = no_context();

    let outcome = Deployer::new(&runner, &context)
        .deploy(&DeployOptions::default())
        .unwrap();

    match &outcome {
        DeployOutcome::Installed { cleaned_up, .. } => assert!(cleaned_up),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(!outcome.chart_dir().exists());
    assert!(!outcome.chart_dir().parent().unwrap().exists());
}

/// Succeeds after deleting the scratch directory behind the guard's back
struct VanishingRunner;

impl CommandRunner for VanishingRunner {
    fn run(&self, _program: &str, args: &[String]) -> Result<String, CommandError> {
        let chart = Path::new(&args[3]);
        std::fs::remove_dir_all(chart.parent().unwrap()).unwrap();
        Ok(String::new())
    }
}

#[test]
fn test_cleaned_up_reflects_actual_removal() {
    let context = no_context();

    let outcome = Deployer::new(&VanishingRunner, &context)
        .deploy(&DeployOptions::default())
        .unwrap();

    match outcome {
        DeployOutcome::Installed { cleaned_up, .. } => assert!(!cleaned_up),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_install_failure_is_wrapped_and_cleans_up() {
    let runner = RecordingRunner::failing("Error: context deadline exceeded");
    let context = no_context();

    let err = Deployer::new(&runner, &context)
        .deploy(&DeployOptions::default())
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("helm upgrade --install failed"), "{message}");
    assert!(message.contains("context deadline exceeded"), "{message}");

    match err {
        DeployError::Install { chart, namespace, .. } => {
            assert_eq!(namespace, "kapok");
            assert!(!chart.parent().unwrap().exists());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(runner.invocations().len(), 1);
}

#[test]
fn test_install_failure_keeps_caller_directory() {
    let dir = TempDir::new().unwrap();
    let runner = RecordingRunner::failing("boom");
    let context = no_context();

    let options = DeployOptions {
        output_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    assert!(Deployer::new(&runner, &context).deploy(&options).is_err());
    assert!(dir.path().join("kapok").join("Chart.yaml").is_file());
}

#[test]
fn test_generation_failure_skips_install() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("kapok"), "in the way").unwrap();
    let runner = RecordingRunner::succeeding("");
    let context = no_context();

    let options = DeployOptions {
        output_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let err = Deployer::new(&runner, &context).deploy(&options).unwrap_err();

    assert!(matches!(err, DeployError::Generate(_)));
    assert!(err.to_string().contains(&dir.path().join("kapok").display().to_string()));
    assert!(runner.invocations().is_empty());
}

#[test]
fn test_context_drives_provider_defaults() {
    let dir = TempDir::new().unwrap();
    let runner = RecordingRunner::succeeding("");
    let context = StaticContext("prod-dns-1234.hcp.eastus.azmk8s.io".to_string());

    let options = DeployOptions {
        output_dir: Some(dir.path().to_path_buf()),
        dry_run: true,
        ..Default::default()
    };
    let outcome = Deployer::new(&runner, &context).deploy(&options).unwrap();

    let config = outcome.config();
    assert_eq!(config.provider, Provider::Azure);
    assert_eq!(config.storage_class, "managed-premium");
    assert_eq!(config.ingress_class, "azure-application-gateway");
}

#[test]
fn test_end_to_end_gcp() {
    let dir = TempDir::new().unwrap();
    let runner = RecordingRunner::succeeding("");
    // The explicit provider must win over this AWS context
    let context = StaticContext("arn:aws:eks:eu-west-1:1:cluster/other".to_string());

    let options = DeployOptions {
        provider: Some(Provider::Gcp),
        namespace: "prod".to_string(),
        domain: "app.com".to_string(),
        image_tag: "v2".to_string(),
        dry_run: false,
        output_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    Deployer::new(&runner, &context).deploy(&options).unwrap();

    let values = std::fs::read_to_string(dir.path().join("kapok").join("values.yaml")).unwrap();
    let parsed: serde_yaml::Value = serde_yaml::from_str(&values).unwrap();
    assert_eq!(parsed["global"]["cloud"].as_str(), Some("gcp"));
    assert_eq!(parsed["global"]["storageClass"].as_str(), Some("standard-rwo"));
    assert_eq!(parsed["global"]["ingressClass"].as_str(), Some("gce"));
    assert_eq!(parsed["global"]["imageTag"].as_str(), Some("v2"));
    assert_eq!(parsed["global"]["domain"].as_str(), Some("app.com"));

    let calls = runner.invocations();
    assert_eq!(calls.len(), 1);
    assert_eq!(&calls[0].args[..3], ["upgrade", "--install", "kapok"]);
    assert_eq!(calls[0].flag_value("--namespace"), Some("prod"));
}

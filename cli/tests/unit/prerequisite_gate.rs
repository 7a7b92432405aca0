//! Prerequisite gate: tool presence, version floor, consent and remediation.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use logsim_installer::application::services::prerequisites::{PrerequisiteOutcome, check};
use logsim_installer::domain::{InstallError, PrerequisiteRequirement};

use crate::mocks::{FakePackages, FakeRuntime, Journal, RecordingReporter, ScriptedPrompter};

struct Gate {
    journal: Journal,
    packages: FakePackages,
    runtime: FakeRuntime,
    prompter: ScriptedPrompter,
}

impl Gate {
    fn new(installed: Option<&'static str>, answer: bool) -> Self {
        let journal = Journal::default();
        Self {
            packages: FakePackages::new(&journal),
            runtime: FakeRuntime::new(&journal, installed),
            prompter: ScriptedPrompter::answering(&journal, answer),
            journal,
        }
    }

    async fn check(&self, required: &str) -> anyhow::Result<PrerequisiteOutcome> {
        check(
            &PrerequisiteRequirement::python(required),
            &self.runtime,
            &self.packages,
            &self.prompter,
            &RecordingReporter::default(),
        )
        .await
    }
}

fn install_error(err: &anyhow::Error) -> &InstallError {
    err.downcast_ref::<InstallError>()
        .unwrap_or_else(|| panic!("expected InstallError, got {err:#}"))
}

#[tokio::test]
async fn equal_version_passes_without_prompt() {
    let gate = Gate::new(Some("3.8"), false);

    let outcome = gate.check("3.8").await.unwrap();

    assert_eq!(
        outcome,
        PrerequisiteOutcome::Satisfied {
            installed: "3.8".to_string()
        }
    );
    assert!(gate.journal.position("prompt").is_none());
}

#[tokio::test]
async fn two_digit_minor_compares_numerically() {
    let gate = Gate::new(Some("3.10.12"), false);
    assert!(matches!(
        gate.check("3.8").await.unwrap(),
        PrerequisiteOutcome::Satisfied { .. }
    ));
}

#[tokio::test]
async fn older_version_declined_is_prerequisite_error() {
    let gate = Gate::new(Some("3.7"), false);

    let err = gate.check("3.8").await.expect_err("too old");

    match install_error(&err) {
        InstallError::Prerequisite {
            name,
            required,
            found,
            ..
        } => {
            assert_eq!(name, "python3");
            assert_eq!(required, "3.8");
            assert_eq!(found, "3.7");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(gate.prompter.asked.borrow().len(), 1);
    assert!(gate.prompter.asked.borrow()[0].contains("python3 python3-pip"));
    assert!(gate.journal.position("pkg:update").is_none());
}

#[tokio::test]
async fn absent_runtime_is_unsatisfied() {
    let gate = Gate::new(None, false);

    let err = gate.check("3.8").await.expect_err("absent");

    assert!(matches!(
        install_error(&err),
        InstallError::Prerequisite { found, .. } if found == "not installed"
    ));
}

#[tokio::test]
async fn unparsable_required_version_is_config_error() {
    let gate = Gate::new(Some("3.10"), true);

    let err = gate.check("abc").await.expect_err("bad floor");

    assert!(matches!(
        install_error(&err),
        InstallError::InvalidVersion { value } if value == "abc"
    ));
    assert!(gate.journal.position("probe:runtime").is_none());
}

#[tokio::test]
async fn missing_package_tool_is_unconditional() {
    let mut gate = Gate::new(Some("3.12"), true);
    gate.packages.available = false;

    let err = gate.check("3.8").await.expect_err("no apt");

    assert!(matches!(
        install_error(&err),
        InstallError::PackageToolMissing { tool } if tool == "apt-get"
    ));
    assert_eq!(gate.journal.entries(), vec!["pkg:available"]);
}

#[tokio::test]
async fn accepted_remediation_refreshes_then_installs() {
    let gate = Gate::new(Some("3.6"), true);

    let outcome = gate.check("3.8").await.unwrap();

    assert_eq!(outcome, PrerequisiteOutcome::Remediated);
    assert_eq!(
        gate.journal.entries(),
        vec![
            "pkg:available",
            "probe:runtime",
            "prompt",
            "pkg:update",
            "pkg:install python3 python3-pip",
        ]
    );
}

#[tokio::test]
async fn failed_index_refresh_stops_before_install() {
    let mut gate = Gate::new(None, true);
    gate.packages.refresh_ok = false;

    let err = gate.check("3.8").await.expect_err("refresh fails");

    match install_error(&err) {
        InstallError::PackageInstall { step, detail } => {
            assert_eq!(step, "refresh index");
            assert!(detail.contains("could not resolve"), "{detail}");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(
        !gate
            .journal
            .entries()
            .iter()
            .any(|e| e.starts_with("pkg:install"))
    );
}

#[tokio::test]
async fn failed_package_install_is_reported() {
    let mut gate = Gate::new(None, true);
    gate.packages.install_ok = false;

    let err = gate.check("3.8").await.expect_err("install fails");

    assert!(matches!(
        install_error(&err),
        InstallError::PackageInstall { step, .. } if step.starts_with("install")
    ));
}

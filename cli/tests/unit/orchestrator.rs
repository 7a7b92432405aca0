//! Install / uninstall lifecycle properties against fake host ports.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::os::unix::fs::PermissionsExt;

use logsim_installer::application::services::orchestrator::{self, InstallOutcome};
use logsim_installer::domain::{
    InstallError, Invocation, InvocationMode, ServiceAction, ServiceState,
};

use crate::mocks::{
    AGENT_BODY, CONFIG_BODY, FakePrivilege, FakeServices, Fixture, RecordingReporter, UNIT_BODY,
};

fn invocation(mode: InvocationMode) -> Invocation {
    Invocation::new(mode, true)
}

async fn run(fx: &Fixture, mode: InvocationMode) -> anyhow::Result<InstallOutcome> {
    orchestrator::run(
        &fx.host(),
        invocation(mode),
        &fx.plan(),
        &RecordingReporter::default(),
    )
    .await
}

fn install_error(err: &anyhow::Error) -> &InstallError {
    err.downcast_ref::<InstallError>()
        .unwrap_or_else(|| panic!("expected InstallError, got {err:#}"))
}

// ── Install ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn install_twice_is_idempotent() {
    let fx = Fixture::new();

    let first = run(&fx, InvocationMode::Install).await.unwrap();
    let agent = std::fs::read(fx.paths.agent_dest()).unwrap();
    let config = std::fs::read(fx.paths.config_dest()).unwrap();

    let second = run(&fx, InvocationMode::Install).await.unwrap();

    assert_eq!(first, InstallOutcome::Installed { service: None });
    assert_eq!(first, second);
    assert_eq!(std::fs::read(fx.paths.agent_dest()).unwrap(), agent);
    assert_eq!(std::fs::read(fx.paths.config_dest()).unwrap(), config);
    assert_eq!(agent, AGENT_BODY.as_bytes());
    assert_eq!(config, CONFIG_BODY.as_bytes());
}

#[tokio::test]
async fn install_applies_modes_and_skips_service_calls() {
    let fx = Fixture::new();

    run(&fx, InvocationMode::Install).await.unwrap();

    let mode = |p: &std::path::Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(fx.paths.agent_dest().as_path()), 0o755);
    assert_eq!(mode(fx.paths.config_dest().as_path()), 0o644);
    assert!(!fx.paths.unit_dest().exists());
    assert!(
        fx.journal.entries().iter().all(|e| !e.starts_with("svc:")),
        "{:?}",
        fx.journal.entries()
    );
}

#[tokio::test]
async fn install_overwrites_stale_destination() {
    let fx = Fixture::new();
    std::fs::create_dir_all(&fx.paths.agent_dest_dir).unwrap();
    std::fs::write(fx.paths.config_dest(), "stale").unwrap();

    run(&fx, InvocationMode::Install).await.unwrap();

    assert_eq!(
        std::fs::read_to_string(fx.paths.config_dest()).unwrap(),
        CONFIG_BODY
    );
    assert!(!fx.journal.entries().iter().any(|e| e.starts_with("fs:mkdir")));
}

#[tokio::test]
async fn missing_artifact_aborts_before_any_copy() {
    let fx = Fixture::new();
    std::fs::remove_file(&fx.paths.config_source).unwrap();

    let err = run(&fx, InvocationMode::Install).await.expect_err("missing");

    assert!(matches!(
        install_error(&err),
        InstallError::MissingArtifact { path } if path == &fx.paths.config_source
    ));
    assert!(fx.journal.mutations().is_empty(), "{:?}", fx.journal.mutations());
}

#[tokio::test]
async fn plain_install_does_not_require_unit_artifact() {
    let fx = Fixture::new();
    std::fs::remove_file(&fx.paths.unit_source).unwrap();

    assert!(run(&fx, InvocationMode::Install).await.is_ok());
}

// ── Install as service ────────────────────────────────────────────────────────

#[tokio::test]
async fn service_install_copies_unit_then_reload_start_enable() {
    let fx = Fixture::new();

    let outcome = run(&fx, InvocationMode::InstallAsService).await.unwrap();

    assert_eq!(
        outcome,
        InstallOutcome::Installed {
            service: Some(ServiceState::RegisteredEnabled)
        }
    );
    assert_eq!(std::fs::read_to_string(fx.paths.unit_dest()).unwrap(), UNIT_BODY);

    let svc: Vec<String> = fx
        .journal
        .entries()
        .into_iter()
        .filter(|e| e.starts_with("svc:"))
        .collect();
    assert_eq!(svc, vec!["svc:daemon-reload", "svc:start", "svc:enable"]);

    let unit_copy = fx.journal.position("fs:copy log_simulator.service").unwrap();
    let reload = fx.journal.position("svc:daemon-reload").unwrap();
    assert!(unit_copy < reload);
}

#[tokio::test]
async fn service_install_stops_at_first_failing_transition() {
    let cases = [
        (ServiceAction::Reload, vec!["svc:daemon-reload"]),
        (ServiceAction::Start, vec!["svc:daemon-reload", "svc:start"]),
        (
            ServiceAction::Enable,
            vec!["svc:daemon-reload", "svc:start", "svc:enable"],
        ),
    ];

    for (failing, expected) in cases {
        let mut fx = Fixture::new();
        fx.services = FakeServices::failing_on(&fx.journal, failing);

        let err = run(&fx, InvocationMode::InstallAsService)
            .await
            .expect_err("injected failure");

        match install_error(&err) {
            InstallError::ServiceManager { action, detail, .. } => {
                assert_eq!(*action, failing);
                assert!(detail.contains("access denied"), "{detail}");
            }
            other => panic!("unexpected error {other:?}"),
        }
        let svc: Vec<String> = fx
            .journal
            .entries()
            .into_iter()
            .filter(|e| e.starts_with("svc:"))
            .collect();
        assert_eq!(svc, expected, "failing on {failing}");
        assert!(fx.journal.position("query:state").is_none());
    }
}

#[tokio::test]
async fn state_observation_failure_is_only_a_warning() {
    let mut fx = Fixture::new();
    fx.services.state = None;
    let reporter = RecordingReporter::default();

    let outcome = orchestrator::run(
        &fx.host(),
        invocation(InvocationMode::InstallAsService),
        &fx.plan(),
        &reporter,
    )
    .await
    .unwrap();

    assert_eq!(outcome, InstallOutcome::Installed { service: None });
    assert_eq!(reporter.warnings.borrow().len(), 1);
}

#[tokio::test]
async fn unit_that_dies_after_start_is_reported_not_running() {
    let mut fx = Fixture::new();
    fx.services.state = Some(ServiceState::from_queries("enabled", "failed"));
    let reporter = RecordingReporter::default();

    let outcome = orchestrator::run(
        &fx.host(),
        invocation(InvocationMode::InstallAsService),
        &fx.plan(),
        &reporter,
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        InstallOutcome::Installed {
            service: Some(ServiceState::EnabledNotRunning)
        }
    );
    let warnings = reporter.warnings.borrow();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("not running"), "{}", warnings[0]);
}

// ── Uninstall ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn uninstall_on_clean_host_touches_nothing() {
    let fx = Fixture::new();

    let outcome = run(&fx, InvocationMode::Uninstall).await.unwrap();

    assert_eq!(
        outcome,
        InstallOutcome::Uninstalled {
            unit_removed: false,
            agent_dir_removed: false
        }
    );
    assert!(fx.journal.mutations().is_empty(), "{:?}", fx.journal.mutations());
}

#[tokio::test]
async fn uninstall_skips_prerequisite_gate() {
    let mut fx = Fixture::new();
    fx.packages.available = false;

    assert!(run(&fx, InvocationMode::Uninstall).await.is_ok());
    assert!(fx.journal.position("pkg:available").is_none());
    assert!(fx.journal.position("probe:runtime").is_none());
}

#[tokio::test]
async fn uninstall_after_service_install_reverses_everything() {
    let fx = Fixture::new();
    run(&fx, InvocationMode::InstallAsService).await.unwrap();
    let installed = fx.journal.entries().len();

    let outcome = run(&fx, InvocationMode::Uninstall).await.unwrap();

    assert_eq!(
        outcome,
        InstallOutcome::Uninstalled {
            unit_removed: true,
            agent_dir_removed: true
        }
    );
    let teardown: Vec<String> = fx.journal.entries()[installed..]
        .iter()
        .filter(|e| e.starts_with("fs:") || e.starts_with("svc:"))
        .cloned()
        .collect();
    assert_eq!(
        teardown,
        vec![
            "svc:stop",
            "svc:disable",
            "fs:rm log_simulator.service",
            "svc:daemon-reload",
            "fs:rmdir log_simulator",
        ]
    );
    assert!(!fx.paths.unit_dest().exists());
    assert!(!fx.paths.agent_dest_dir.exists());
    assert!(fx.root().exists());
}

#[tokio::test]
async fn uninstall_never_removes_unit_when_stop_or_disable_fails() {
    for failing in [ServiceAction::Stop, ServiceAction::Disable] {
        let mut fx = Fixture::new();
        run(&fx, InvocationMode::InstallAsService).await.unwrap();
        fx.services = FakeServices::failing_on(&fx.journal, failing);

        let err = run(&fx, InvocationMode::Uninstall)
            .await
            .expect_err("injected failure");

        assert!(matches!(
            install_error(&err),
            InstallError::ServiceManager { action, .. } if *action == failing
        ));
        assert!(fx.journal.position("fs:rm log_simulator.service").is_none());
        assert!(fx.paths.unit_dest().exists());
        assert!(fx.paths.agent_dest().exists());
    }
}

#[tokio::test]
async fn uninstall_after_plain_install_removes_agent_dir_only() {
    let fx = Fixture::new();
    run(&fx, InvocationMode::Install).await.unwrap();

    let outcome = run(&fx, InvocationMode::Uninstall).await.unwrap();

    assert_eq!(
        outcome,
        InstallOutcome::Uninstalled {
            unit_removed: false,
            agent_dir_removed: true
        }
    );
    assert!(fx.journal.entries().iter().all(|e| !e.starts_with("svc:")));
}

// ── Gate precedence ───────────────────────────────────────────────────────────

#[tokio::test]
async fn unprivileged_run_touches_no_other_port() {
    for mode in [
        InvocationMode::Install,
        InvocationMode::InstallAsService,
        InvocationMode::Uninstall,
    ] {
        let mut fx = Fixture::new();
        fx.privilege = FakePrivilege::new(&fx.journal, false);
        fx.packages.available = false;

        let err = run(&fx, mode).await.expect_err("unprivileged");

        assert!(matches!(install_error(&err), InstallError::Privilege));
        assert_eq!(fx.journal.entries(), vec!["privilege"]);
    }
}

#[tokio::test]
async fn lock_is_taken_after_privilege_and_before_work() {
    let fx = Fixture::new();

    run(&fx, InvocationMode::Install).await.unwrap();

    let entries = fx.journal.entries();
    assert_eq!(&entries[..2], &["privilege", "lock"]);
}

#[tokio::test]
async fn help_mode_is_rejected_without_touching_host() {
    let fx = Fixture::new();

    let err = run(&fx, InvocationMode::Help).await.expect_err("help");

    assert!(matches!(install_error(&err), InstallError::Usage(_)));
    assert!(fx.journal.entries().is_empty());
}

#[tokio::test]
async fn prerequisite_failure_precedes_staging() {
    let mut fx = Fixture::new();
    fx.packages.available = false;

    let err = run(&fx, InvocationMode::InstallAsService)
        .await
        .expect_err("no apt");

    assert!(matches!(
        install_error(&err),
        InstallError::PackageToolMissing { .. }
    ));
    assert!(fx.journal.mutations().is_empty());
}

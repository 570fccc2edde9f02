#![cfg(unix)]

use anyhow::Result;
use devcli::domain::{
    ComposeProject, ContainerEngine, LabelFilter, ListScope, PathTranslator, WorkspacePath,
    parse_ids,
};
use devcli::error::{self, DevError};
use devcli::infra::WslPathTranslator;
use devcli::{EngineAdapter, LifecycleService};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// Scripts are written then executed; serialize so no fork inherits an open write handle
static SCRIPT_LOCK: Mutex<()> = Mutex::new(());

/// Writes a fake engine that logs its argv to `calls.log` and runs `body`
fn fake_engine(dir: &Path, body: &str) -> PathBuf {
    fake_tool(dir, "docker", body)
}

fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    let log = dir.join("calls.log");
    let script = dir.join(name);
    let content = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$*\" >> '{}'\n{}\n",
        log.display(),
        body
    );
    fs::write(&script, content).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

fn calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

const PROJECT_SCENARIO: &str = r#"case "$*" in
  "ps -a -q --filter label=devcontainer.local_folder=/tmp/project")
    printf 'main1\r\nmain2\n\n' ;;
  inspect*main1) echo projA ;;
  inspect*main2) echo '<no value>' ;;
  "ps -a -q --filter label=com.docker.compose.project=projA")
    printf 'main1\nside1\n' ;;
  stop*) exit 0 ;;
  *) exit 0 ;;
esac"#;

#[test]
fn test_down_scenario_against_script() -> Result<()> {
    let _guard = SCRIPT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir()?;
    let script = fake_engine(dir.path(), PROJECT_SCENARIO);

    let engine = Arc::new(EngineAdapter::new(script.to_string_lossy()));
    let service = LifecycleService::new(engine);
    let ws = WorkspacePath::from_parts("/tmp/project", None);

    let group = service.down(&ws)?;
    assert_eq!(group.len(), 3);

    let log = calls(dir.path());
    let stops: Vec<&String> = log.iter().filter(|c| c.starts_with("stop")).collect();
    assert_eq!(stops, vec!["stop main1 main2 side1"]);
    Ok(())
}

#[test]
fn test_inspect_placeholder_means_no_project() -> Result<()> {
    let _guard = SCRIPT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir()?;
    let script = fake_engine(dir.path(), PROJECT_SCENARIO);

    let engine = EngineAdapter::new(script.to_string_lossy());
    let ids = engine.list_ids(&LabelFilter::LocalFolder("/tmp/project"), ListScope::All)?;

    assert_eq!(engine.compose_project(&ids[0])?, ComposeProject::Named("projA".into()));
    assert_eq!(engine.compose_project(&ids[1])?, ComposeProject::Absent);
    Ok(())
}

#[test]
fn test_engine_exit_code_is_forwarded() {
    let _guard = SCRIPT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let script = fake_engine(
        dir.path(),
        r#"case "$1" in
  ps) echo live1 ;;
  port) exit 3 ;;
esac"#,
    );

    let service = LifecycleService::new(Arc::new(EngineAdapter::new(script.to_string_lossy())));
    let ws = WorkspacePath::from_parts("/tmp/project", None);

    let err = service.ports(&ws).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DevError>(),
        Some(DevError::Subprocess { code: Some(3), .. })
    ));
    assert_eq!(error::exit_code(&err), 3);
}

#[test]
fn test_running_scope_not_found_runs_nothing_else() {
    let _guard = SCRIPT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let script = fake_engine(dir.path(), "exit 0");

    let service = LifecycleService::new(Arc::new(EngineAdapter::new(script.to_string_lossy())));
    let ws = WorkspacePath::from_parts("/home/user/project", Some("C:\\work\\project".into()));

    assert!(service.logs(&ws, false).is_err());
    assert_eq!(
        calls(dir.path()),
        vec![
            "ps -q --filter label=devcontainer.local_folder=/home/user/project",
            "ps -q --filter label=devcontainer.local_folder=C:\\work\\project",
        ]
    );
}

#[test]
fn test_clean_runs_both_prunes_and_forwards_engine_code() {
    let _guard = SCRIPT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let script = fake_engine(dir.path(), "exit 125");

    let service = LifecycleService::new(Arc::new(EngineAdapter::new(script.to_string_lossy())));

    let err = service.clean().unwrap_err();
    assert_eq!(error::exit_code(&err), 125);
    assert_eq!(
        calls(dir.path()),
        vec!["container prune -f", "network prune -f"]
    );
}

#[test]
fn test_failed_native_query_falls_back_to_host_form() -> Result<()> {
    let _guard = SCRIPT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir()?;
    let script = fake_engine(
        dir.path(),
        r#"case "$*" in
  *local_folder=/home/user/project) exit 1 ;;
  *local_folder=C:*) echo win1 ;;
esac"#,
    );

    let service = LifecycleService::new(Arc::new(EngineAdapter::new(script.to_string_lossy())));
    let ws = WorkspacePath::from_parts("/home/user/project", Some("C:\\work\\project".into()));

    let group = service.down(&ws)?;
    assert_eq!(group.to_string(), "win1");

    let log = calls(dir.path());
    assert_eq!(
        log[1],
        "ps -a -q --filter label=devcontainer.local_folder=C:\\work\\project"
    );
    assert_eq!(log.last().map(String::as_str), Some("stop win1"));
    Ok(())
}

#[test]
fn test_inspect_stderr_is_kept_in_the_error() -> Result<()> {
    let _guard = SCRIPT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir()?;
    let script = fake_engine(
        dir.path(),
        r#"echo "Error: No such object: $4" >&2
exit 1"#,
    );

    let engine = EngineAdapter::new(script.to_string_lossy());
    let ids = parse_ids("gone1");
    let err = engine.compose_project(&ids[0]).unwrap_err();

    assert!(format!("{:#}", err).contains("No such object: gone1"));
    assert_eq!(error::exit_code(&err), 1);
    Ok(())
}

#[test]
fn test_wslpath_output_is_trimmed() {
    let _guard = SCRIPT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let script = fake_tool(dir.path(), "wslpath", r#"printf 'C:\\Repo\\project\r\n'"#);

    let translator = WslPathTranslator::with_program(script.to_string_lossy());
    assert_eq!(
        translator.to_host(Path::new("/home/user/project")),
        Some("C:\\Repo\\project".to_string())
    );
    assert_eq!(calls(dir.path()), vec!["-w /home/user/project"]);
}

#[test]
fn test_wslpath_failures_keep_native_path() {
    let _guard = SCRIPT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let native = Path::new("/home/user/project");

    let failing = fake_tool(dir.path(), "wslpath-fail", "echo 'C:\\x'\nexit 1");
    let empty = fake_tool(dir.path(), "wslpath-empty", "printf '  \\n'");

    assert_eq!(WslPathTranslator::with_program(failing.to_string_lossy()).to_host(native), None);
    assert_eq!(WslPathTranslator::with_program(empty.to_string_lossy()).to_host(native), None);
    assert_eq!(
        WslPathTranslator::with_program(dir.path().join("missing").to_string_lossy()).to_host(native),
        None
    );

    let ws = WorkspacePath::resolve(
        "/home/user/project",
        &WslPathTranslator::with_program(failing.to_string_lossy()),
    )
    .unwrap();
    assert_eq!(ws.host(), None);
    assert_eq!(ws.label_forms(), vec!["/home/user/project".to_string()]);
}

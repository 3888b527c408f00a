//! Built-in modules against a scratch project with stub binaries on PATH

use std::ffi::OsString;
use std::path::Path;

use code_template::config::Settings;
use code_template::ledger::Ledger;
use code_template::modules::catalog;
use code_template::state::{InstallState, Resolver};
use serial_test::serial;

/// Replaces PATH for the duration of a test
struct PathGuard(Option<OsString>);

impl PathGuard {
    fn only(dir: &Path) -> Self {
        let previous = std::env::var_os("PATH");
        std::env::set_var("PATH", dir);
        PathGuard(previous)
    }
}

impl Drop for PathGuard {
    fn drop(&mut self) {
        match self.0.take() {
            Some(path) => std::env::set_var("PATH", path),
            None => std::env::remove_var("PATH"),
        }
    }
}

fn stub_binaries(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), "#!/bin/sh\nexit 0\n").unwrap();
    }
}

#[test]
#[serial]
fn test_task_module_round_trip() {
    let project = tempfile::tempdir().unwrap();
    let tools = tempfile::tempdir().unwrap();
    stub_binaries(tools.path(), &["task"]);
    let _path = PathGuard::only(tools.path());

    let settings = Settings::for_root(project.path());
    let registry = catalog::builtin(&settings).unwrap();
    let resolver = Resolver::new(Ledger::new(&settings.ledger_path));
    let module = registry.find("task-go-test").unwrap();

    assert_eq!(resolver.resolve(module.as_ref()), InstallState::NotInstalled);
    assert!(module.install());
    assert_eq!(resolver.resolve(module.as_ref()), InstallState::UpToDate);

    let taskfile = std::fs::read_to_string(project.path().join("Taskfile.yml")).unwrap();
    assert!(taskfile.contains("go-test"));
    assert!(taskfile.contains("go test ./..."));

    assert!(module.uninstall());
    assert_eq!(resolver.resolve(module.as_ref()), InstallState::NotInstalled);
    assert!(!resolver.ledger().has_key("task-go-test").unwrap());
    let taskfile = std::fs::read_to_string(project.path().join("Taskfile.yml")).unwrap();
    assert!(!taskfile.contains("go-test"));
}

#[test]
#[serial]
fn test_missing_binary_leaves_no_trace() {
    let project = tempfile::tempdir().unwrap();
    let tools = tempfile::tempdir().unwrap();
    let _path = PathGuard::only(tools.path());

    let settings = Settings::for_root(project.path());
    let registry = catalog::builtin(&settings).unwrap();
    let module = registry.find("eslint").unwrap();

    assert!(!module.install());
    assert!(!project.path().join("eslint.config.js").exists());
    assert!(!settings.ledger_path.exists());
}

#[test]
#[serial]
fn test_eslint_writes_and_removes_config() {
    let project = tempfile::tempdir().unwrap();
    let tools = tempfile::tempdir().unwrap();
    stub_binaries(tools.path(), &["npm"]);
    let _path = PathGuard::only(tools.path());

    let settings = Settings::for_root(project.path());
    let registry = catalog::builtin(&settings).unwrap();
    let module = registry.find("linting/typescript/eslint").unwrap();
    let config = project.path().join("eslint.config.js");

    assert!(module.install());
    assert!(config.exists());
    assert!(module.is_installed());

    assert!(module.uninstall());
    assert!(!config.exists());
    assert!(!module.is_installed());
}

#[test]
#[serial]
fn test_installing_one_module_keeps_other_tasks() {
    let project = tempfile::tempdir().unwrap();
    let tools = tempfile::tempdir().unwrap();
    stub_binaries(tools.path(), &["task"]);
    let _path = PathGuard::only(tools.path());

    let settings = Settings::for_root(project.path());
    let registry = catalog::builtin(&settings).unwrap();
    let go_test = registry.find("task-go-test").unwrap();
    let go_lint = registry.find("task-go-lint").unwrap();

    assert!(go_test.install());
    assert!(go_lint.install());
    assert!(go_test.uninstall());

    assert!(!go_test.is_installed());
    assert!(go_lint.is_installed());
    let ledger = Ledger::new(&settings.ledger_path);
    assert_eq!(ledger.installed_version("task-go-lint"), 1);
}

mod common;

use code_template::cli::commands::{
    list::ListCommand, module::ModuleCommand, version::VersionCommand, Context,
};
use code_template::config::Settings;
use code_template::error::TemplateError;
use code_template::ledger::Ledger;
use common::{registry, FakeModule};
use pretty_assertions::assert_eq;

fn context(modules: impl FnOnce(&Ledger) -> Vec<code_template::ModuleRef>) -> (tempfile::TempDir, Context) {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::for_root(dir.path());
    let ledger = Ledger::new(&settings.ledger_path);
    let registry = registry(modules(&ledger));
    (dir, Context::new(settings, registry))
}

#[tokio::test]
async fn test_install_then_uninstall_by_key() {
    let (_dir, context) = context(|ledger| {
        vec![FakeModule::new("eslint", "linting/typescript/eslint", 1, ledger).shared()]
    });

    let status = ModuleCommand::install("eslint").run(&context).await.unwrap();
    assert_eq!(status, "✓ Installed eslint");

    let status = ModuleCommand::install("eslint").run(&context).await.unwrap();
    assert!(status.contains("already up to date"));

    let status = ModuleCommand::uninstall("linting/typescript/eslint")
        .run(&context)
        .await
        .unwrap();
    assert_eq!(status, "✓ Uninstalled eslint");
}

#[tokio::test]
async fn test_update_requires_installed_module() {
    let (_dir, context) = context(|ledger| vec![FakeModule::new("a", "cat/a", 2, ledger).shared()]);

    let err = ModuleCommand::update("a").run(&context).await.unwrap_err();
    assert!(matches!(err, TemplateError::Cli(_)));
}

#[tokio::test]
async fn test_update_outdated_module() {
    let (_dir, context) = context(|ledger| {
        vec![FakeModule::new("a", "cat/a", 2, ledger).preinstalled(1).shared()]
    });

    let status = ModuleCommand::update("a").run(&context).await.unwrap();
    assert_eq!(status, "✓ Updated a");
    assert_eq!(context.resolver().ledger().installed_version("a"), 2);
}

#[tokio::test]
async fn test_failed_install_is_an_error() {
    let (_dir, context) = context(|ledger| vec![FakeModule::new("a", "cat/a", 1, ledger).failing().shared()]);

    let err = ModuleCommand::install("a").run(&context).await.unwrap_err();
    match err {
        TemplateError::Cli(message) => assert_eq!(message, "✗ Failed to install a"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unknown_module() {
    let (_dir, context) = context(|_| Vec::new());
    let err = ModuleCommand::install("nope").run(&context).await.unwrap_err();
    assert!(matches!(err, TemplateError::ModuleNotFound(name) if name == "nope"));
}

#[test]
fn test_version_report() {
    let (_dir, context) = context(|ledger| {
        vec![FakeModule::new("golangci-lint", "linting/go/golangci_lint", 2, ledger)
            .preinstalled(1)
            .shared()]
    });

    let report = VersionCommand::new("golangci-lint").report(&context).unwrap();
    assert!(report.contains("declared:  v2"));
    assert!(report.contains("installed: v1"));
    assert!(report.contains("outdated"));
}

#[test]
fn test_list_renders_expanded_tree() {
    let (_dir, context) = context(|ledger| {
        vec![
            FakeModule::new("golangci-lint", "linting/go/golangci_lint", 2, ledger)
                .preinstalled(1)
                .shared(),
            FakeModule::new("eslint", "linting/typescript/eslint", 1, ledger)
                .preinstalled(1)
                .shared(),
            FakeModule::new("tdd-guard", "claude/workflow/tdd_guard", 1, ledger).shared(),
        ]
    });

    let output = ListCommand::new(None, false).render(&context).unwrap();
    let expected = [
        "claude (0/1)",
        "└─ workflow (0/1)",
        "   └─ [ ] tdd-guard v1",
        "linting (2/2)",
        "├─ go (1/1)",
        "│  └─ [↑] golangci-lint v1 → v2",
        "└─ typescript (1/1)",
        "   └─ [✓] eslint v1",
    ]
    .join("\n");
    assert_eq!(output, expected);
}

#[test]
fn test_list_filter_and_json() {
    let (_dir, context) = context(|ledger| {
        vec![
            FakeModule::new("golangci-lint", "linting/go/golangci_lint", 1, ledger).shared(),
            FakeModule::new("eslint", "linting/typescript/eslint", 1, ledger).shared(),
        ]
    });

    let output = ListCommand::new(Some("ESLint".to_string()), true)
        .render(&context)
        .unwrap();
    let rows: serde_json::Value = serde_json::from_str(&output).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "eslint");
    assert_eq!(rows[0]["state"], "not_installed");
    assert_eq!(rows[0]["installed_version"], 0);

    let output = ListCommand::new(Some("nothing".to_string()), false)
        .render(&context)
        .unwrap();
    assert_eq!(output, "No modules match");
}

//! Built-in module catalog

use std::sync::Arc;

use crate::config::Settings;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::registry::Registry;
use crate::services::{GoService, NpmService, Package, PackageService};

use super::steps::{GitignoreEntry, PackageStep, RequireBinary, TaskfileTask, WriteFile};
use super::{ModuleSpec, StepModule};

const TASKFILE: &str = "Taskfile.yml";
const GITIGNORE: &str = ".gitignore";

const GOLANGCI_SOURCE: &str = "github.com/golangci/golangci-lint/v2/cmd/golangci-lint@latest";

const ESLINT_CONFIG: &str = r#"import js from "@eslint/js";
import tseslint from "typescript-eslint";

export default tseslint.config(js.configs.recommended, ...tseslint.configs.recommended);
"#;

/// Assemble every built-in module against the given project settings
pub fn builtin(settings: &Settings) -> Result<Registry> {
    let ledger = Ledger::new(&settings.ledger_path);
    let go: Arc<dyn PackageService> = Arc::new(GoService::new(&settings.bin_dir));
    let npm: Arc<dyn PackageService> = Arc::new(NpmService::new());
    let root = &settings.root;
    let taskfile = root.join(TASKFILE);

    let golangci_lint = StepModule::new(
        ModuleSpec::new("golangci-lint", "linting/go/golangci_lint", 2, "golangci-lint"),
        ledger.clone(),
    )
    .step(RequireBinary::new("go"))
    .step(PackageStep::new(
        go.clone(),
        Package::new("golangci-lint", GOLANGCI_SOURCE),
    ))
    .step(GitignoreEntry::new(root.join(GITIGNORE), ".bin/"));

    let eslint = StepModule::new(
        ModuleSpec::new("eslint", "linting/typescript/eslint", 1, "eslint"),
        ledger.clone(),
    )
    .step(RequireBinary::new("npm"))
    .step(WriteFile::new(root.join("eslint.config.js"), ESLINT_CONFIG));

    let tdd_guard = StepModule::new(
        ModuleSpec::new("tdd-guard", "claude/workflow/tdd_guard", 1, "tdd-guard"),
        ledger.clone(),
    )
    .step(PackageStep::new(npm, Package::new("tdd-guard", "tdd-guard")).keep_installed());

    let go_test = task_module(
        &ledger,
        &taskfile,
        ModuleSpec::new("go-test", "tasks/go/go_test_task", 1, "task-go-test"),
        "Run Go tests",
        &["go test ./..."],
    );

    let go_lint = task_module(
        &ledger,
        &taskfile,
        ModuleSpec::new("go-lint", "tasks/go/go_lint_task", 1, "task-go-lint"),
        "Run golangci-lint",
        &["./.bin/golangci-lint run ./..."],
    );

    let ts_test = task_module(
        &ledger,
        &taskfile,
        ModuleSpec::new("ts-test", "tasks/typescript/ts_test_task", 1, "task-ts-test"),
        "Run TypeScript tests",
        &["npm test"],
    );

    let ts_lint = task_module(
        &ledger,
        &taskfile,
        ModuleSpec::new("ts-lint", "tasks/typescript/ts_lint_task", 1, "task-ts-lint"),
        "Run ESLint",
        &["npx eslint ."],
    );

    Registry::builder()
        .register(tdd_guard)
        .register(golangci_lint)
        .register(eslint)
        .register(go_test)
        .register(go_lint)
        .register(ts_test)
        .register(ts_lint)
        .build()
}

/// A go-task entry gated on the `task` binary
fn task_module(
    ledger: &Ledger,
    taskfile: &std::path::Path,
    spec: ModuleSpec,
    description: &str,
    commands: &[&str],
) -> StepModule {
    let task_name = spec.name.clone();
    StepModule::new(spec, ledger.clone())
        .step(RequireBinary::new("task"))
        .step(TaskfileTask::new(taskfile, task_name, description, commands))
}

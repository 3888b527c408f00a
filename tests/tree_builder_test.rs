mod common;

use code_template::module::ModuleRef;
use code_template::tree::{build_tree, build_tree_filtered, NodeKind, TreeState};
use common::{temp_ledger, visible_names, FakeModule};
use pretty_assertions::assert_eq;

fn catalog(paths: &[(&str, &str)]) -> (tempfile::TempDir, Vec<ModuleRef>) {
    let (dir, ledger) = temp_ledger();
    let modules = paths
        .iter()
        .map(|(name, path)| FakeModule::new(name, path, 1, &ledger).shared())
        .collect();
    (dir, modules)
}

fn ids(tree: &TreeState) -> Vec<String> {
    tree.iter().map(|(_, node)| node.id.clone()).collect()
}

#[test]
fn test_builds_sorted_hierarchy() {
    let (_dir, modules) = catalog(&[
        ("golangci-lint", "linting/go/golangci_lint"),
        ("go-test", "tasks/go/go_test_task"),
        ("eslint", "linting/typescript/eslint"),
        ("tdd-guard", "claude/workflow/tdd_guard"),
    ]);

    let mut tree = build_tree(&modules);
    assert_eq!(visible_names(&tree), vec!["claude", "linting", "tasks"]);

    tree.expand_all();
    assert_eq!(
        visible_names(&tree),
        vec![
            "claude",
            "workflow",
            "tdd-guard",
            "linting",
            "go",
            "golangci-lint",
            "typescript",
            "eslint",
            "tasks",
            "go",
            "go-test",
        ]
    );
}

#[test]
fn test_shared_prefix_reuses_category() {
    let (_dir, modules) = catalog(&[
        ("go-test", "tasks/go/go_test_task"),
        ("go-lint", "tasks/go/go_lint_task"),
    ]);
    let tree = build_tree(&modules);

    let categories = tree.iter().filter(|(_, node)| node.is_category()).count();
    assert_eq!(categories, 2);

    let go = tree.find("tasks/go").unwrap();
    assert_eq!(tree.node(go).children.len(), 2);
}

#[test]
fn test_categories_sort_before_modules() {
    let (_dir, modules) = catalog(&[
        ("b_mod", "a/b_mod"),
        ("m1", "a/z_cat/m1"),
        ("a_mod", "a/a_mod"),
    ]);
    let tree = build_tree(&modules);
    let a = tree.roots()[0];
    let names: Vec<&str> = tree
        .node(a)
        .children
        .iter()
        .map(|&id| tree.node(id).name.as_str())
        .collect();
    assert_eq!(names, vec!["z_cat", "a_mod", "b_mod"]);
}

#[test]
fn test_one_leaf_per_module_and_no_empty_categories() {
    let (_dir, modules) = catalog(&[
        ("one", "x/y/one"),
        ("two", "x/y/two"),
        ("three", "x/three"),
        ("four", "w/four"),
    ]);
    let tree = build_tree(&modules);

    let leaves = tree.iter().filter(|(_, node)| !node.is_category()).count();
    assert_eq!(leaves, modules.len());

    for (id, node) in tree.iter() {
        if node.is_category() {
            assert!(tree.has_modules(id), "empty category {}", node.id);
        } else {
            assert!(node.children.is_empty());
        }
    }
}

#[test]
fn test_depths_follow_paths() {
    let (_dir, modules) = catalog(&[("deep", "a/b/c/deep")]);
    let tree = build_tree(&modules);

    for (_, node) in tree.iter() {
        let expected = node.id.split('/').count() - 1;
        assert_eq!(node.depth, expected, "depth of {}", node.id);
    }
}

#[test]
fn test_parent_links_match_children() {
    let (_dir, modules) = catalog(&[("one", "x/y/one"), ("two", "x/two")]);
    let tree = build_tree(&modules);

    for (id, node) in tree.iter() {
        for &child in &node.children {
            assert_eq!(tree.node(child).parent, Some(id));
        }
        if node.parent.is_none() {
            assert!(tree.roots().contains(&id));
        }
    }
}

#[test]
fn test_build_is_deterministic() {
    let (_dir, modules) = catalog(&[
        ("b", "cat/b"),
        ("a", "cat/a"),
        ("c", "other/sub/c"),
        ("d", "cat/sub/d"),
    ]);
    assert_eq!(ids(&build_tree(&modules)), ids(&build_tree(&modules)));
}

#[test]
fn test_pathless_module_becomes_root() {
    let (_dir, modules) = catalog(&[("solo", "solo"), ("nested", "cat/nested")]);
    let tree = build_tree(&modules);

    assert_eq!(visible_names(&tree), vec!["cat", "solo"]);
    let solo = tree.find("solo").unwrap();
    assert!(matches!(tree.node(solo).kind, NodeKind::Module(_)));
    assert_eq!(tree.node(solo).depth, 0);
}

#[test]
fn test_duplicate_path_last_registration_wins() {
    let (_dir, modules) = catalog(&[("first", "cat/same"), ("second", "cat/same")]);
    let tree = build_tree(&modules);

    let cat = tree.roots()[0];
    assert_eq!(tree.node(cat).children.len(), 1);
    let leaf = tree.node(cat).children[0];
    assert_eq!(tree.node(leaf).name, "second");
    assert_eq!(tree.node(leaf).module().unwrap().name(), "second");
}

#[test]
fn test_filter_prunes_emptied_categories() {
    let (_dir, modules) = catalog(&[
        ("golangci-lint", "linting/go/golangci_lint"),
        ("eslint", "linting/typescript/eslint"),
        ("tdd-guard", "claude/workflow/tdd_guard"),
    ]);
    let mut tree = build_tree_filtered(&modules, |m| m.name() == "eslint");
    tree.expand_all();

    assert_eq!(visible_names(&tree), vec!["linting", "typescript", "eslint"]);
}

#[test]
fn test_empty_input_builds_empty_tree() {
    let tree = build_tree(&[]);
    assert!(tree.is_empty());
    assert!(tree.flat_visible().is_empty());
}

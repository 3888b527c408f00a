//! Session control: navigation, actions and the single in-flight operation
//!
//! ```text
//!          activate (not installed)         completion
//!   Idle ───────────────────────────► Installing ──────► Idle
//!     │    activate (outdated)                           ▲
//!     ├─────────────────────────────► Updating ──────────┤
//!     │    delete (installed)                            │
//!     └─────────────────────────────► Uninstalling ──────┘
//! ```
//!
//! While an operation is in flight every input is dropped, so at most one
//! module call is ever outstanding.

pub mod dispatch;

pub use dispatch::{dispatch, Completion, Operation};

use tokio::sync::mpsc;

use crate::module::ModuleRef;
use crate::state::{InstallState, Resolver};
use crate::tree::{NodeId, TreeState};

/// Mutating module operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Install,
    Update,
    Uninstall,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Install => "install",
            Verb::Update => "update",
            Verb::Uninstall => "uninstall",
        }
    }

    pub fn progressive(&self) -> &'static str {
        match self {
            Verb::Install => "Installing",
            Verb::Update => "Updating",
            Verb::Uninstall => "Uninstalling",
        }
    }

    pub fn past(&self) -> &'static str {
        match self {
            Verb::Install => "Installed",
            Verb::Update => "Updated",
            Verb::Uninstall => "Uninstalled",
        }
    }
}

/// What the session is doing right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    Idle,
    Working { verb: Verb, module: String },
}

/// User input, independent of the terminal backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Expand,
    Collapse,
    Activate,
    Delete,
    CollapseAll,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Message shown under the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

impl Status {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }
}

/// Owns the tree view state and admits module operations one at a time
pub struct Orchestrator {
    tree: TreeState,
    resolver: Resolver,
    selected: usize,
    activity: Activity,
    status: Option<Status>,
    should_quit: bool,
}

impl Orchestrator {
    pub fn new(tree: TreeState, resolver: Resolver) -> Self {
        Self {
            tree,
            resolver,
            selected: 0,
            activity: Activity::Idle,
            status: None,
            should_quit: false,
        }
    }

    pub fn tree(&self) -> &TreeState {
        &self.tree
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn is_idle(&self) -> bool {
        self.activity == Activity::Idle
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Index into the visible sequence
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.tree.flat_visible().get(self.selected).copied()
    }

    /// Handle one input. Returns an operation to dispatch when the input
    /// started one.
    pub fn handle(&mut self, action: Action) -> Option<Operation> {
        if !self.is_idle() {
            tracing::debug!(?action, "Input ignored while an operation is in flight");
            return None;
        }

        self.status = None;
        let selected = self.selected_node();

        match action {
            Action::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::Down => {
                if self.selected + 1 < self.tree.flat_visible().len() {
                    self.selected += 1;
                }
            }
            Action::Expand => {
                if let Some(id) = selected {
                    self.expand(id);
                }
            }
            Action::Collapse => {
                if let Some(id) = selected {
                    self.collapse(id);
                }
            }
            Action::Activate => {
                let id = selected?;
                let node = self.tree.node(id);
                if let Some(module) = node.module().cloned() {
                    return self.activate(module);
                }
                let category = node.id.clone();
                self.tree.toggle_expanded(&category);
                self.select(id);
            }
            Action::Delete => {
                let module = self.tree.node(selected?).module()?.clone();
                return self.remove(module);
            }
            Action::CollapseAll => {
                let top = selected.map(|id| self.tree.top_level(id));
                self.tree.collapse_all();
                match top {
                    Some(top) => self.select(top),
                    None => self.selected = 0,
                }
            }
            Action::Quit => {
                self.should_quit = true;
            }
        }
        None
    }

    fn expand(&mut self, id: NodeId) {
        let node = self.tree.node(id);
        if !node.is_category() {
            return;
        }
        if self.tree.is_expanded(&node.id) {
            if let Some(&first) = node.children.first() {
                self.select(first);
            }
        } else {
            let category = node.id.clone();
            self.tree.set_expanded(&category, true);
            self.select(id);
        }
    }

    fn collapse(&mut self, id: NodeId) {
        let node = self.tree.node(id);
        if node.is_category() && self.tree.is_expanded(&node.id) {
            let category = node.id.clone();
            self.tree.set_expanded(&category, false);
            self.select(id);
        } else if let Some(parent) = node.parent {
            self.select(parent);
        }
    }

    /// Select a node, falling back to its nearest visible ancestor
    fn select(&mut self, id: NodeId) {
        let visible = self.tree.flat_visible();
        let position = std::iter::once(id)
            .chain(self.tree.ancestors(id))
            .find_map(|candidate| visible.iter().position(|&v| v == candidate));
        self.selected = match position {
            Some(position) => position,
            None => self.selected.min(visible.len().saturating_sub(1)),
        };
    }

    /// Install, update or report up to date, depending on resolved state
    pub fn activate(&mut self, module: ModuleRef) -> Option<Operation> {
        if !self.is_idle() {
            tracing::debug!(module = module.name(), "Activation rejected: busy");
            return None;
        }
        match self.resolver.resolve(module.as_ref()) {
            InstallState::NotInstalled => self.request(Verb::Install, module),
            InstallState::Outdated => self.request(Verb::Update, module),
            InstallState::UpToDate => {
                self.status = Some(Status::info(format!(
                    "{} is already up to date (v{})",
                    module.name(),
                    module.version()
                )));
                None
            }
        }
    }

    /// Uninstall an installed module
    pub fn remove(&mut self, module: ModuleRef) -> Option<Operation> {
        if !self.is_idle() {
            tracing::debug!(module = module.name(), "Removal rejected: busy");
            return None;
        }
        if !self.resolver.resolve(module.as_ref()).is_installed() {
            self.status = Some(Status::info(format!("{} is not installed", module.name())));
            return None;
        }
        self.request(Verb::Uninstall, module)
    }

    /// Admit an operation if nothing is in flight
    pub fn request(&mut self, verb: Verb, module: ModuleRef) -> Option<Operation> {
        if let Activity::Working { verb: current, module: busy } = &self.activity {
            tracing::debug!(
                requested = verb.as_str(),
                module = module.name(),
                in_flight = current.as_str(),
                busy_with = %busy,
                "Operation rejected"
            );
            return None;
        }

        tracing::info!(verb = verb.as_str(), module = module.name(), "Starting operation");
        self.activity = Activity::Working {
            verb,
            module: module.name().to_string(),
        };
        self.status = None;
        Some(Operation { verb, module })
    }

    /// Apply a completion event and return to idle
    pub fn complete(&mut self, completion: Completion) {
        match &self.activity {
            Activity::Working { verb, module }
                if *verb == completion.verb && *module == completion.module => {}
            other => {
                tracing::warn!(?other, ?completion, "Completion does not match the operation in flight");
                return;
            }
        }

        tracing::info!(
            verb = completion.verb.as_str(),
            module = %completion.module,
            success = completion.success,
            "Operation finished"
        );

        self.activity = Activity::Idle;
        self.status = Some(if completion.success {
            Status {
                text: format!("✓ {} {}", completion.verb.past(), completion.module),
                kind: StatusKind::Success,
            }
        } else {
            Status {
                text: format!("✗ Failed to {} {}", completion.verb.as_str(), completion.module),
                kind: StatusKind::Error,
            }
        });
    }

    /// One-shot path: admit, dispatch, and wait for the completion.
    ///
    /// Returns `None` when nothing was started; `status()` says why.
    pub async fn run_to_completion(&mut self, operation: Option<Operation>) -> Option<Completion> {
        let operation = operation?;
        let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
        dispatch(operation, tx);
        let completion = rx.recv().await?;
        self.complete(completion.clone());
        Some(completion)
    }
}

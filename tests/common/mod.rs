#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use code_template::ledger::Ledger;
use code_template::module::{Module, ModuleRef};
use code_template::registry::Registry;

/// In-memory module backed by a real ledger file
pub struct FakeModule {
    pub name: String,
    pub path: String,
    pub version: u32,
    pub key: String,
    pub ledger: Ledger,
    pub installed: Arc<AtomicBool>,
    pub fail_install: bool,
    pub fail_uninstall: bool,
    pub installs: Arc<AtomicUsize>,
    pub uninstalls: Arc<AtomicUsize>,
}

impl FakeModule {
    pub fn new(name: &str, path: &str, version: u32, ledger: &Ledger) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            version,
            key: name.to_string(),
            ledger: ledger.clone(),
            installed: Arc::new(AtomicBool::new(false)),
            fail_install: false,
            fail_uninstall: false,
            installs: Arc::new(AtomicUsize::new(0)),
            uninstalls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail_install = true;
        self
    }

    /// Mark installed and record `version` in the ledger
    pub fn preinstalled(self, version: u32) -> Self {
        self.installed.store(true, Ordering::SeqCst);
        self.ledger.set_key(&self.key, version).unwrap();
        self
    }

    pub fn shared(self) -> ModuleRef {
        Arc::new(self)
    }
}

impl Module for FakeModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        self.path.split('/').next().unwrap_or("")
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn ledger_key(&self) -> &str {
        &self.key
    }

    fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    fn install(&self) -> bool {
        self.installs.fetch_add(1, Ordering::SeqCst);
        if self.fail_install {
            return false;
        }
        self.installed.store(true, Ordering::SeqCst);
        self.ledger.set_key(&self.key, self.version).is_ok()
    }

    fn uninstall(&self) -> bool {
        self.uninstalls.fetch_add(1, Ordering::SeqCst);
        if self.fail_uninstall {
            return false;
        }
        self.installed.store(false, Ordering::SeqCst);
        self.ledger.remove_key(&self.key).is_ok()
    }
}

/// Module whose install blocks until the returned sender fires (or drops)
pub struct GatedModule {
    inner: FakeModule,
    gate: Mutex<mpsc::Receiver<()>>,
}

impl GatedModule {
    pub fn new(inner: FakeModule) -> (Self, mpsc::Sender<()>) {
        let (open, gate) = mpsc::channel();
        let module = Self {
            inner,
            gate: Mutex::new(gate),
        };
        (module, open)
    }
}

impl Module for GatedModule {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn category(&self) -> &str {
        self.inner.category()
    }

    fn path(&self) -> &str {
        self.inner.path()
    }

    fn version(&self) -> u32 {
        self.inner.version()
    }

    fn ledger_key(&self) -> &str {
        self.inner.ledger_key()
    }

    fn is_installed(&self) -> bool {
        self.inner.is_installed()
    }

    fn install(&self) -> bool {
        let _ = self.gate.lock().unwrap().recv();
        self.inner.install()
    }

    fn uninstall(&self) -> bool {
        self.inner.uninstall()
    }
}

/// Temp project with an empty ledger
pub fn temp_ledger() -> (tempfile::TempDir, Ledger) {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::new(dir.path().join("code-template.yml"));
    (dir, ledger)
}

pub fn registry(modules: Vec<ModuleRef>) -> Registry {
    modules
        .into_iter()
        .fold(Registry::builder(), |builder, module| builder.register_shared(module))
        .build()
        .unwrap()
}

/// Display names of the visible rows, in order
pub fn visible_names(tree: &code_template::tree::TreeState) -> Vec<String> {
    tree.flat_visible()
        .iter()
        .map(|&id| tree.node(id).name.clone())
        .collect()
}

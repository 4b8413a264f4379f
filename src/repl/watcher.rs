use crossbeam_channel::Sender;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Watches pattern files and forwards their change events to a channel.
/// notify delivers events on its own thread.
pub struct ScriptWatcher {
    watcher: RecommendedWatcher,
    scripts: HashSet<PathBuf>,
}

impl ScriptWatcher {
    pub fn new(tx: Sender<notify::Result<Event>>) -> notify::Result<Self> {
        let watcher = notify::recommended_watcher(move |res| {
            // The receiver is gone once the REPL exits
            let _ = tx.send(res);
        })?;

        Ok(Self {
            watcher,
            scripts: HashSet::new(),
        })
    }

    /// Start watching a script. Returns false if it was already watched.
    pub fn watch<P: AsRef<Path>>(&mut self, path: P) -> notify::Result<bool> {
        let path = canonical(path.as_ref());
        if self.scripts.contains(&path) {
            return Ok(false);
        }
        self.watcher.watch(&path, RecursiveMode::NonRecursive)?;
        self.scripts.insert(path);
        Ok(true)
    }

    /// Stop watching a script. Returns false if it was not being watched.
    pub fn unwatch<P: AsRef<Path>>(&mut self, path: P) -> notify::Result<bool> {
        let path = canonical(path.as_ref());
        if !self.scripts.remove(&path) {
            return Ok(false);
        }
        self.watcher.unwatch(&path)?;
        Ok(true)
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Watched scripts touched by a modify or create event
    pub fn changed_scripts(&self, event: &Event) -> Vec<PathBuf> {
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return Vec::new();
        }
        let mut changed: Vec<PathBuf> = event
            .paths
            .iter()
            .map(|p| canonical(p))
            .filter(|p| self.scripts.contains(p))
            .collect();
        changed.dedup();
        changed
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

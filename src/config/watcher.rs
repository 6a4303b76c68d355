//! Configuration file watcher for hot reload.
//!
//! The parent directory is watched rather than the file itself. Editors and
//! mounted config volumes save by writing a sibling file and renaming it over
//! the original, which replaces the inode a file-level watch is attached to.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::NimbusConfig;

/// Watches one configuration file and emits every valid new version of it.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<NimbusConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for reloaded configurations.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<NimbusConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching on notify's background thread.
    ///
    /// Reloads stop when the returned handle is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Some(file_name) = self.path.file_name().map(OsString::from) else {
            return Err(notify::Error::generic("config path has no file name"));
        };
        let directory = watched_directory(&self.path);

        let path = self.path;
        let tx = self.update_tx;
        let handler = move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!(error = %e, "Config watch error");
                    return;
                }
            };
            if !touches_config(&event, &file_name) {
                return;
            }

            tracing::info!(path = %path.display(), kind = ?event.kind, "Config file changed, reloading");
            match load_config(&path) {
                Ok(config) => {
                    let _ = tx.send(config);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Reloaded config rejected, keeping current configuration");
                }
            }
        };

        let mut watcher = RecommendedWatcher::new(
            handler,
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&directory, RecursiveMode::NonRecursive)?;

        tracing::info!(directory = %directory.display(), "Config watcher started");
        Ok(watcher)
    }
}

/// Directory holding `path`; a bare file name lives in the working directory.
fn watched_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Whether a directory event wrote, created or renamed-in the config file.
fn touches_config(event: &Event, file_name: &OsString) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

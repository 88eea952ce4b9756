use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cfgview_common::ConfigError;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

/// Quiet period after the last file event before a reload is signalled.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Watches one settings file and signals when it changes.
pub struct SettingsWatcher {
    path: PathBuf,
}

impl SettingsWatcher {
    /// The file does not need to exist yet; its creation is a change.
    pub fn new(path: PathBuf) -> Result<Self, ConfigError> {
        if path.file_name().is_none() {
            return Err(ConfigError::WatchError(format!(
                "{} does not name a file",
                path.display()
            )));
        }
        if !path.exists() {
            warn!(path = %path.display(), "settings file does not exist yet, watching for creation");
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Watch until every signal receiver is gone or the underlying watcher
    /// stops, sending `()` once per debounced burst of changes.
    pub async fn watch(&self, tx: broadcast::Sender<()>) -> Result<(), ConfigError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = self.path.file_name().map(OsString::from).unwrap_or_default();

        // notify calls back on its own thread; bridge into async.
        let (raw_tx, mut raw_rx) = mpsc::channel::<()>(16);
        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) if is_change_to(&event, &file_name) => {
                    debug!("settings file change detected");
                    let _ = raw_tx.try_send(());
                }
                Ok(_) => {}
                Err(e) => error!("settings watcher error: {e}"),
            },
            notify::Config::default(),
        )
        .map_err(|e| ConfigError::WatchError(format!("failed to create watcher: {e}")))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::WatchError(format!("failed to watch {}: {e}", dir.display())))?;
        info!(path = %self.path.display(), "watching settings file");

        while raw_rx.recv().await.is_some() {
            // Coalesce everything that arrives within the debounce window.
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(DEBOUNCE) => break,
                    more = raw_rx.recv() => {
                        if more.is_none() {
                            return Ok(());
                        }
                    }
                }
            }

            info!("settings file changed, sending reload signal");
            if tx.send(()).is_err() {
                debug!("no reload listeners left, stopping settings watcher");
                break;
            }
        }
        Ok(())
    }
}

/// Whether a notify event is a create or modify of `file_name`.
pub(super) fn is_change_to(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|n| n == file_name.as_os_str()))
}

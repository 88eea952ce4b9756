use std::path::{Path, PathBuf};

use cfgview_common::ConfigError;
use tokio::sync::{broadcast, watch};
use tracing::{error, info, warn};

use crate::schema::ViewerSettings;
use crate::toml_loader;
use crate::validation;
use crate::watcher::SettingsWatcher;

/// Keeps a [`ViewerSettings`] value in sync with its file on disk.
pub struct ReloadManager {
    path: PathBuf,
}

impl ReloadManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the initial settings and start watching for changes.
    ///
    /// A missing file is created with defaults; an unreadable one yields
    /// defaults. Must be called inside a tokio runtime: the watcher runs as
    /// a background task until every receiver is dropped.
    pub async fn start(path: PathBuf) -> (ViewerSettings, watch::Receiver<ViewerSettings>) {
        let initial = match toml_loader::load_or_create(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("failed to load settings: {e}, using defaults");
                ViewerSettings::default()
            }
        };

        let (settings_tx, settings_rx) = watch::channel(initial.clone());
        let manager = Self::new(path);
        tokio::spawn(async move {
            manager.run(settings_tx).await;
        });

        (initial, settings_rx)
    }

    /// Reload from disk. Unlike the initial load, invalid settings are
    /// refused so a typo never replaces a working configuration.
    pub fn reload(&self) -> Result<ViewerSettings, ConfigError> {
        let settings = toml_loader::load_from_path(&self.path)?;
        validation::validate(&settings)?;
        Ok(settings)
    }

    async fn run(&self, settings_tx: watch::Sender<ViewerSettings>) {
        let watcher = match SettingsWatcher::new(self.path.clone()) {
            Ok(w) => w,
            Err(e) => {
                error!("failed to create settings watcher: {e}");
                return;
            }
        };

        let (change_tx, mut change_rx) = broadcast::channel::<()>(16);
        tokio::spawn(async move {
            if let Err(e) = watcher.watch(change_tx).await {
                error!("settings watcher error: {e}");
            }
        });

        loop {
            match change_rx.recv().await {
                Ok(()) => {
                    info!(path = %self.path.display(), "reloading settings");
                    match self.reload() {
                        Ok(settings) => {
                            if !self.publish(&settings_tx, settings) {
                                info!("all settings receivers dropped, stopping reload manager");
                                break;
                            }
                        }
                        Err(e) => warn!("settings reload failed: {e}"),
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("settings watcher lagged by {n} events");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    info!("settings watcher channel closed");
                    break;
                }
            }
        }
    }

    /// Send `settings` if it differs from the current value. Returns false
    /// once nobody is listening.
    pub(super) fn publish(&self, tx: &watch::Sender<ViewerSettings>, settings: ViewerSettings) -> bool {
        if tx.is_closed() {
            return false;
        }
        tx.send_if_modified(|current| {
            if *current == settings {
                false
            } else {
                *current = settings;
                true
            }
        });
        true
    }
}

mod app_state;
mod cli;

use std::path::PathBuf;

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use cfgview_config::{toml_loader, ReloadManager, ViewerSettings};
use cfgview_webview::{BridgeConfig, VirtualOrigin, WebViewConfig};

use app_state::{CfgviewApp, SourceDocument};

const DEFAULT_LOG_DIRECTIVE: &str = "cfgview=info";

fn init_logging(level: Option<&str>) {
    let requested = level.unwrap_or(DEFAULT_LOG_DIRECTIVE);
    let directive = requested.parse::<Directive>().unwrap_or_else(|e| {
        eprintln!("invalid log directive {requested:?} ({e}), using info");
        LevelFilter::INFO.into()
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

/// Start live settings reload on a background runtime. Without a runtime
/// the settings are loaded once.
fn start_settings(
    path: Option<PathBuf>,
) -> (
    ViewerSettings,
    Option<tokio::sync::watch::Receiver<ViewerSettings>>,
    Option<tokio::runtime::Runtime>,
) {
    let path = match path {
        Some(path) => path,
        None => match toml_loader::default_settings_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("no settings location ({e}), using defaults");
                return (ViewerSettings::default(), None, None);
            }
        },
    };

    match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
    {
        Ok(runtime) => {
            let (settings, rx) = runtime.block_on(ReloadManager::start(path));
            (settings, Some(rx), Some(runtime))
        }
        Err(e) => {
            tracing::warn!("failed to start runtime ({e}), live reload disabled");
            let settings = toml_loader::load_or_create(&path).unwrap_or_else(|e| {
                tracing::warn!("settings load failed, using defaults: {e}");
                ViewerSettings::default()
            });
            (settings, None, None)
        }
    }
}

fn main() {
    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    tracing::info!("cfgview v{} starting...", env!("CARGO_PKG_VERSION"));

    let document = match SourceDocument::load(&args.file, args.language.as_deref(), args.offset) {
        Ok(document) => document,
        Err(e) => {
            tracing::error!(path = %args.file.display(), "cannot open source file: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        path = %document.path().display(),
        language = %document.language(),
        "source loaded"
    );

    let (settings, settings_rx, runtime) = start_settings(args.config.clone());

    let bridge_config = match &args.resources {
        Some(root) => BridgeConfig::new(VirtualOrigin::default(), root),
        None => BridgeConfig::default(),
    };
    let webview_config = WebViewConfig::default().with_devtools(args.devtools || cfg!(debug_assertions));

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = CfgviewApp::new(document, settings, bridge_config, webview_config)
        .with_live_settings(settings_rx, runtime);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}

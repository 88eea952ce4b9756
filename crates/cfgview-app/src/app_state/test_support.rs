use std::sync::{Arc, Mutex};

use cfgview_common::BridgeError;
use cfgview_webview::{
    BridgeConfig, BundleLookup, GraphViewer, Interception, ScriptSink, ViewerBridge, ViewerEvents,
};

/// Script sink that keeps every evaluated script.
#[derive(Clone, Default)]
pub(super) struct Recorder(pub(super) Arc<Mutex<Vec<String>>>);

impl Recorder {
    pub(super) fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl ScriptSink for Recorder {
    fn evaluate(&self, script: &str) -> Result<(), BridgeError> {
        self.0.lock().unwrap().push(script.to_string());
        Ok(())
    }
}

pub(super) fn viewer() -> (GraphViewer<Recorder>, Recorder) {
    let recorder = Recorder::default();
    let interception = Interception::new(BridgeConfig::default(), Arc::new(BundleLookup::new()));
    let bridge = ViewerBridge::new(interception, recorder.clone());
    (GraphViewer::new(bridge, ViewerEvents::new()).unwrap(), recorder)
}

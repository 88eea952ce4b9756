//! Pushing settings and code into the viewer.

use cfgview_common::BridgeError;
use cfgview_config::{resolve_color_scheme, ViewerSettings};
use cfgview_webview::{GraphViewer, ScriptSink};

use super::document::SourceDocument;

/// Send the four display settings. An empty color scheme leaves the
/// viewer's colors untouched.
pub(super) fn push_settings<S: ScriptSink>(
    viewer: &GraphViewer<S>,
    settings: &ViewerSettings,
) -> Result<(), BridgeError> {
    viewer.set_simplify(settings.simplify)?;
    viewer.set_flat_switch(settings.flat_switch)?;
    viewer.set_highlight(settings.highlight)?;
    if let Some(scheme) = resolve_color_scheme(&settings.color_scheme) {
        viewer.set_colors(&scheme)?;
    }
    Ok(())
}

/// Settings first, then the code, so the first render already uses them.
pub(super) fn push_document<S: ScriptSink>(
    viewer: &GraphViewer<S>,
    settings: &ViewerSettings,
    document: &SourceDocument,
) -> Result<(), BridgeError> {
    push_settings(viewer, settings)?;
    viewer.set_code(document.text(), document.cursor(), document.language())
}

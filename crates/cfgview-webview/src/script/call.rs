use cfgview_common::BridgeError;

use super::encode::JsArg;

/// Whether `name` is a plain script identifier (ASCII subset).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Whether `name` is a dotted path of identifiers, e.g. `window.viewer.setCode`.
pub fn is_identifier_path(name: &str) -> bool {
    name.split('.').all(is_identifier)
}

/// Format `name(arg0, arg1, ...);` as one executable statement.
pub fn format_call(name: &str, args: &[JsArg]) -> Result<String, BridgeError> {
    if !is_identifier_path(name) {
        return Err(BridgeError::InvalidIdentifier(name.to_string()));
    }
    let args = args
        .iter()
        .map(JsArg::to_script)
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("{name}({args});"))
}

/// Format a statement that (re)defines `window.<name>` as a function.
///
/// Assigning to the same name again replaces the earlier definition. The
/// body is emitted as given.
pub fn format_function(name: &str, params: &[&str], body: &str) -> Result<String, BridgeError> {
    if !is_identifier(name) {
        return Err(BridgeError::InvalidIdentifier(name.to_string()));
    }
    if let Some(bad) = params.iter().find(|p| !is_identifier(p)) {
        return Err(BridgeError::InvalidIdentifier((*bad).to_string()));
    }
    Ok(format!(
        "window.{name} = ({}) => {{{body}}};",
        params.join(", ")
    ))
}

//! Settings validation.
//!
//! Collects every problem into a single `ConfigError::ValidationError`.

use cfgview_common::ConfigError;

use crate::colors::{ColorScheme, DARK, LIGHT};
use crate::schema::ViewerSettings;

/// Run all validations on a settings record.
pub fn validate(settings: &ViewerSettings) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_color_scheme(&mut errors, &settings.color_scheme);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_color_scheme(errors: &mut Vec<String>, value: &str) {
    if value.is_empty() || value == DARK || value == LIGHT {
        return;
    }
    if let Err(e) = ColorScheme::parse(value) {
        errors.push(format!("color_scheme: {e}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_scheme(scheme: &str) -> ViewerSettings {
        ViewerSettings {
            color_scheme: scheme.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn default_settings_are_valid() {
        assert!(validate(&ViewerSettings::default()).is_ok());
    }

    #[test]
    fn builtin_names_are_valid() {
        assert!(validate(&with_scheme("dark")).is_ok());
        assert!(validate(&with_scheme("light")).is_ok());
    }

    #[test]
    fn custom_document_is_valid() {
        let doc = r##"{"version":1,"scheme":[{"name":"graph.background","hex":"#101010"}]}"##;
        assert!(validate(&with_scheme(doc)).is_ok());
    }

    #[test]
    fn unknown_name_is_invalid() {
        let err = validate(&with_scheme("solarized")).unwrap_err();
        match err {
            ConfigError::ValidationError(msg) => assert!(msg.starts_with("color_scheme:")),
            other => panic!("unexpected error: {other}"),
        }
    }
}

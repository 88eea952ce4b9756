//! TOML settings file loading and creation.

mod loader;
mod paths;
mod template;

#[cfg(test)]
mod tests;

pub use loader::{load_default, load_from_path, load_or_create};
pub use paths::{create_default_settings, default_settings_path};

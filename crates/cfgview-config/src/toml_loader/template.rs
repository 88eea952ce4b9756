//! Default settings file with inline documentation comments.

pub(crate) fn default_settings_toml() -> &'static str {
    r##"# cfgview viewer settings
# Changes are picked up while the viewer is running.

# Render switch statements as a flat chain of branches.
flat_switch = false

# Collapse trivial nodes.
simplify = true

# Highlight the node under the cursor.
highlight = true

# "" keeps the viewer's own colors. "dark" and "light" are built in.
# Anything else must be a color scheme document, e.g.
# color_scheme = '{"version":1,"scheme":[{"name":"graph.background","hex":"#202020"}]}'
color_scheme = ""
"##
}

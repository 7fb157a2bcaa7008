//! Surface capability settings
//!
//! Capabilities the webview surface must receive at creation time. None of
//! them can be toggled once the surface exists, so the shell derives this
//! record first and applies it in one pass before any load is dispatched.

use kiosk_config::ShellConfig;

/// Creation-time webview capabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSettings {
    /// Inline media playback without a user gesture. Always on.
    pub autoplay: bool,
    /// Broad capability to resolve local file references from content
    /// itself. Strict boolean gate; local-mode directory scoping works
    /// without it.
    pub allow_file_access: bool,
    /// Custom user agent applied before any load; `None` keeps the
    /// platform default untouched.
    pub user_agent: Option<String>,
    /// Keyboard zoom shortcuts
    pub hotkeys_zoom: bool,
    /// Developer tools
    pub devtools: bool,
}

impl SurfaceSettings {
    /// Derive the surface settings from a shell configuration.
    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            autoplay: true,
            allow_file_access: config.allow_file_access,
            user_agent: config.user_agent.clone(),
            hotkeys_zoom: config.hotkeys_zoom,
            devtools: config.devtools,
        }
    }
}

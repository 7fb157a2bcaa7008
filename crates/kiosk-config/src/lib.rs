//! Kiosk Configuration
//!
//! The typed form of what the app generator bakes into a shell: one content
//! source, the headers and user agent to attach to it, and the capability
//! flags for the webview surface. Parsed and validated once at startup,
//! immutable afterwards.

mod config;
mod source;

pub use config::{ConfigError, ShellConfig, WindowConfig};
pub use source::ContentSource;

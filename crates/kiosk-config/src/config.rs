//! Shell configuration record
//!
//! Everything the generator resolves at build time, as one immutable value.
//! `validate` runs once at startup; a config that passes it never produces
//! a malformed load later.

use crate::source::ContentSource;
use http::header::{HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Window appearance, mapped from the original app metadata
/// (title, hidden status bar).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Logical width
    pub width: f64,
    /// Logical height
    pub height: f64,
    /// Borderless fullscreen instead of a decorated window
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Kiosk".to_string(),
            width: 1280.0,
            height: 800.0,
            fullscreen: false,
        }
    }
}

/// Complete shell configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// What to load
    pub source: ContentSource,
    /// Extra HTTP headers attached to remote loads (names unique here;
    /// application is append-only)
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Custom user agent; `None` keeps the platform default
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Grant the surface the broad capability to read local files referenced
    /// from content itself. Off by default; Local mode does not need it.
    #[serde(default)]
    pub allow_file_access: bool,
    /// Keyboard zoom shortcuts
    #[serde(default)]
    pub hotkeys_zoom: bool,
    /// Developer tools
    #[serde(default)]
    pub devtools: bool,
    /// Window appearance
    #[serde(default)]
    pub window: WindowConfig,
}

impl ShellConfig {
    /// Create a config for the given source with everything else defaulted.
    pub fn new(source: ContentSource) -> Self {
        Self {
            source,
            headers: BTreeMap::new(),
            user_agent: None,
            allow_file_access: false,
            hotkeys_zoom: false,
            devtools: false,
            window: WindowConfig::default(),
        }
    }

    /// Parse the generator's embedded JSON.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Validate the record once. Charged with everything the generator is
    /// supposed to guarantee, so the loader can assume a well-formed config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.source {
            ContentSource::Remote { url } => {
                if url.is_empty() {
                    return Err(ConfigError::EmptyUrl);
                }
                let parsed = Url::parse(url)
                    .map_err(|e| ConfigError::InvalidUrl { url: url.clone(), source: e })?;
                match parsed.scheme() {
                    "http" | "https" => {}
                    other => {
                        return Err(ConfigError::UnsupportedScheme {
                            scheme: other.to_string(),
                        })
                    }
                }
            }
            ContentSource::Local { site_root, start_page } => {
                if site_root.as_os_str().is_empty() {
                    return Err(ConfigError::EmptySiteRoot);
                }
                if start_page.is_empty() {
                    return Err(ConfigError::EmptyStartPage);
                }
            }
        }

        for (name, value) in &self.headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::InvalidHeaderName { name: name.clone() })?;
            HeaderValue::from_str(value)
                .map_err(|_| ConfigError::InvalidHeaderValue { name: name.clone() })?;
        }

        Ok(())
    }
}

/// Configuration errors. All of them are generation-time mistakes surfaced
/// at startup; none are recoverable at runtime.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse shell configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("remote mode configured with an empty url")]
    EmptyUrl,

    #[error("invalid remote url {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported url scheme {scheme:?} (expected http or https)")]
    UnsupportedScheme { scheme: String },

    #[error("local mode configured with an empty site root")]
    EmptySiteRoot,

    #[error("local mode configured with an empty start page")]
    EmptyStartPage,

    #[error("invalid header name {name:?}")]
    InvalidHeaderName { name: String },

    #[error("invalid value for header {name:?}")]
    InvalidHeaderValue { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_config() -> ShellConfig {
        ShellConfig::new(ContentSource::remote("https://example.com/app"))
    }

    #[test]
    fn test_valid_remote_config() {
        let mut config = remote_config();
        config.headers.insert("X-Session".to_string(), "abc".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        let config = ShellConfig::new(ContentSource::remote(""));
        assert!(matches!(config.validate(), Err(ConfigError::EmptyUrl)));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let config = ShellConfig::new(ContentSource::remote("ftp://example.com"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_bad_header_name_rejected() {
        let mut config = remote_config();
        config
            .headers
            .insert("X Session".to_string(), "abc".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidHeaderName { .. })
        ));
    }

    #[test]
    fn test_empty_header_set_valid() {
        assert!(remote_config().validate().is_ok());
    }

    #[test]
    fn test_local_config_requires_root_and_start_page() {
        let config = ShellConfig::new(ContentSource::local("/opt/app/www"));
        assert!(config.validate().is_ok());

        let config = ShellConfig::new(ContentSource::Local {
            site_root: "".into(),
            start_page: "index.html".to_string(),
        });
        assert!(matches!(config.validate(), Err(ConfigError::EmptySiteRoot)));

        let config = ShellConfig::new(ContentSource::Local {
            site_root: "/opt/app/www".into(),
            start_page: String::new(),
        });
        assert!(matches!(config.validate(), Err(ConfigError::EmptyStartPage)));
    }

    #[test]
    fn test_defaults_from_json() {
        let config = ShellConfig::from_json_str(
            r#"{ "source": { "mode": "remote", "url": "https://example.com" } }"#,
        )
        .unwrap();
        assert!(!config.allow_file_access);
        assert!(config.user_agent.is_none());
        assert!(config.headers.is_empty());
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_full_json_round() {
        let raw = r#"{
            "source": { "mode": "local", "site_root": "/opt/app/www", "start_page": "home.html" },
            "user_agent": "KioskShell/1.0",
            "allow_file_access": true,
            "window": { "title": "My App", "fullscreen": true }
        }"#;
        let config = ShellConfig::from_json_str(raw).unwrap();
        assert!(config.allow_file_access);
        assert_eq!(config.user_agent.as_deref(), Some("KioskShell/1.0"));
        assert_eq!(config.window.title, "My App");
        assert!(config.window.fullscreen);
        // Unspecified window fields keep their defaults.
        assert_eq!(config.window.width, 1280.0);
        assert!(config.validate().is_ok());
    }
}

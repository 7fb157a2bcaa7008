//! Content source selection
//!
//! A shell displays exactly one thing: a remote address or a bundled local
//! site. The tagged enum makes the two mutually exclusive by construction -
//! there is no way to configure both or neither.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the displayed content comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ContentSource {
    /// Load a remote address over the network.
    Remote {
        /// Absolute http(s) URL
        url: String,
    },
    /// Load a site bundled with the application.
    Local {
        /// Directory holding the bundled site
        site_root: PathBuf,
        /// Entry document, relative to `site_root`
        #[serde(default = "default_start_page")]
        start_page: String,
    },
}

fn default_start_page() -> String {
    "index.html".to_string()
}

impl ContentSource {
    /// Convenience constructor for remote mode.
    pub fn remote(url: impl Into<String>) -> Self {
        Self::Remote { url: url.into() }
    }

    /// Convenience constructor for local mode with the default entry document.
    pub fn local(site_root: impl Into<PathBuf>) -> Self {
        Self::Local {
            site_root: site_root.into(),
            start_page: default_start_page(),
        }
    }

    /// True when content is fetched over the network.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_json_shape() {
        let src: ContentSource =
            serde_json::from_str(r#"{ "mode": "remote", "url": "https://example.com/app" }"#)
                .unwrap();
        assert_eq!(src, ContentSource::remote("https://example.com/app"));
        assert!(src.is_remote());
    }

    #[test]
    fn test_local_default_start_page() {
        let src: ContentSource =
            serde_json::from_str(r#"{ "mode": "local", "site_root": "/opt/app/www" }"#).unwrap();
        match src {
            ContentSource::Local { start_page, .. } => assert_eq!(start_page, "index.html"),
            _ => panic!("expected local source"),
        }
    }

    #[test]
    fn test_both_sources_unrepresentable() {
        // A record carrying remote fields under local mode does not parse.
        let result: Result<ContentSource, _> =
            serde_json::from_str(r#"{ "mode": "local", "url": "https://example.com" }"#);
        assert!(result.is_err());
    }
}

//! Load request construction
//!
//! One branch per content source, decided once per presentation:
//! - Remote: the configured URL, verbatim, plus every configured header
//! - Local: the bundled entry document as an absolute path, with read
//!   access scoped to its containing directory
//!
//! Building is pure - same config in, equal request out - so re-dispatching
//! on a new presentation re-issues the identical load.

use crate::assets::normalize;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use kiosk_config::{ContentSource, ShellConfig};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// The concrete instruction handed to the webview surface.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadRequest {
    /// Network load of a remote address.
    Remote {
        /// Target, byte-for-byte as configured
        url: String,
        /// Extra request headers, appended in configuration order
        headers: HeaderMap,
    },
    /// Direct load of a bundled document.
    Local {
        /// Absolute path of the entry document
        entry: PathBuf,
        /// Directory the surface may read from (the entry's parent, nothing
        /// wider)
        scope: PathBuf,
    },
}

/// Build the load request for the configured content source.
///
/// Only the branch matching the source mode is evaluated: local paths are
/// never touched in remote mode and headers are never parsed in local mode.
pub fn build_load_request(config: &ShellConfig) -> Result<LoadRequest, LoadError> {
    match &config.source {
        ContentSource::Remote { url } => {
            // Parse for validation only. The configured string is carried
            // verbatim: round-tripping through Url would normalize it
            // (trailing slash on host-only targets, lowercased host,
            // stripped default port).
            Url::parse(url)?;
            let mut headers = HeaderMap::with_capacity(config.headers.len());
            for (name, value) in &config.headers {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|_| LoadError::InvalidHeaderName { name: name.clone() })?;
                let value = HeaderValue::from_str(value)
                    .map_err(|_| LoadError::InvalidHeaderValue { name: name.to_string() })?;
                // Append, never overwrite: standard multi-value semantics.
                headers.append(name, value);
            }
            debug!(%url, header_count = headers.len(), "built remote load request");
            Ok(LoadRequest::Remote {
                url: url.clone(),
                headers,
            })
        }
        ContentSource::Local { site_root, start_page } => {
            let root = normalize(&std::path::absolute(site_root)?);
            let entry = normalize(&root.join(start_page));
            if !entry.starts_with(&root) {
                return Err(LoadError::StartPageOutsideRoot {
                    start_page: start_page.clone(),
                });
            }
            let scope = entry
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| LoadError::NoContainingDirectory { entry: entry.clone() })?;
            debug!(entry = %entry.display(), scope = %scope.display(), "built local load request");
            Ok(LoadRequest::Local { entry, scope })
        }
    }
}

/// Failures while turning a config into a load request. A validated config
/// only hits these through filesystem-level surprises.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid remote url")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid header name {name:?}")]
    InvalidHeaderName { name: String },

    #[error("invalid value for header {name:?}")]
    InvalidHeaderValue { name: String },

    #[error("start page {start_page:?} resolves outside the site root")]
    StartPageOutsideRoot { start_page: String },

    #[error("entry document {entry:?} has no containing directory")]
    NoContainingDirectory { entry: PathBuf },

    #[error("failed to resolve site root")]
    SiteRoot(#[from] std::io::Error),
}

//! Scoped local asset resolution
//!
//! Backs the shell's custom protocol in local mode. Requests resolve
//! against the entry document's containing directory; anything outside that
//! scope is refused unless the broad file-access capability was granted at
//! surface creation.

use http::header::CONTENT_TYPE;
use http::{Response, StatusCode};
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// A loaded asset ready to hand to the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub mime_type: &'static str,
    pub data: Vec<u8>,
}

/// Resolves request paths to files under a directory scope.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    scope: PathBuf,
    entry: String,
    allow_file_access: bool,
}

impl AssetResolver {
    /// Create a resolver rooted at `scope` (the entry document's containing
    /// directory), with `entry` as the document served for the bare `/`
    /// path. `allow_file_access` widens resolution to paths escaping the
    /// scope.
    pub fn new(
        scope: impl Into<PathBuf>,
        entry: impl Into<String>,
        allow_file_access: bool,
    ) -> Self {
        Self {
            scope: normalize(&scope.into()),
            entry: entry.into(),
            allow_file_access,
        }
    }

    /// The directory requests resolve against.
    pub fn scope(&self) -> &Path {
        &self.scope
    }

    /// Resolve a request path to a filesystem path. An empty path means the
    /// entry document.
    pub fn resolve(&self, request_path: &str) -> Result<PathBuf, AssetError> {
        let rel = request_path.trim_start_matches('/');
        let rel = if rel.is_empty() { self.entry.as_str() } else { rel };
        let resolved = normalize(&self.scope.join(rel));

        if resolved.starts_with(&self.scope) {
            return Ok(resolved);
        }
        if self.allow_file_access {
            warn!(path = %resolved.display(), "serving file outside site scope");
            return Ok(resolved);
        }
        Err(AssetError::OutsideScope { path: resolved })
    }

    /// Resolve and read an asset. The MIME type comes from the resolved
    /// file, so the `/` fallback is typed by the entry document it serves.
    pub fn read(&self, request_path: &str) -> Result<Asset, AssetError> {
        let path = self.resolve(request_path)?;
        let data = fs::read(&path)?;
        debug!(path = %path.display(), bytes = data.len(), "served local asset");
        Ok(Asset {
            mime_type: guess_mime(&path.to_string_lossy()),
            data,
        })
    }

    /// Produce the protocol response for a request path: 200 with the asset,
    /// 403 outside scope, 404 when missing.
    pub fn respond(&self, request_path: &str) -> Response<Cow<'static, [u8]>> {
        match self.read(request_path) {
            Ok(asset) => http_response(StatusCode::OK, asset.mime_type, asset.data),
            Err(AssetError::OutsideScope { path }) => {
                warn!(path = %path.display(), "refused request outside site scope");
                http_response(StatusCode::FORBIDDEN, "text/plain", b"forbidden".to_vec())
            }
            Err(AssetError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                http_response(StatusCode::NOT_FOUND, "text/plain", b"not found".to_vec())
            }
            Err(AssetError::Io(e)) => {
                warn!(error = %e, "failed to read local asset");
                http_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "text/plain",
                    b"read error".to_vec(),
                )
            }
        }
    }
}

fn http_response(
    status: StatusCode,
    mime: &'static str,
    body: Vec<u8>,
) -> Response<Cow<'static, [u8]>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, mime)
        .body(Cow::Owned(body))
        .unwrap_or_else(|_| Response::new(Cow::Borrowed(&[] as &[u8])))
}

/// Asset resolution failures.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("requested path {path:?} is outside the site scope")]
    OutsideScope { path: PathBuf },

    #[error("failed to read asset")]
    Io(#[from] io::Error),
}

/// Lexical path normalization: folds `.` and `..` without touching the
/// filesystem. `..` never climbs above the root.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Guess MIME type from file extension.
pub fn guess_mime(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("");
    match ext {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "wasm" => "application/wasm",
        _ => "application/octet-stream",
    }
}

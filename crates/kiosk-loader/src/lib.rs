//! Kiosk Load Decision Unit
//!
//! Turns the immutable shell configuration into everything the webview
//! surface needs:
//! 1. Surface capabilities, fixed at creation time (autoplay, file access,
//!    user agent)
//! 2. One load request per presentation - remote URL + headers, or a local
//!    entry document scoped to its containing directory
//! 3. Scoped asset resolution backing the custom protocol in local mode
//!
//! Load outcomes (network errors, missing files at render time) are the
//! surface's concern; nothing here waits on them.

mod assets;
mod lifecycle;
mod request;
mod surface;

pub use assets::{Asset, AssetError, AssetResolver, guess_mime};
pub use lifecycle::{Lifecycle, Phase, PhaseError};
pub use request::{build_load_request, LoadError, LoadRequest};
pub use surface::SurfaceSettings;

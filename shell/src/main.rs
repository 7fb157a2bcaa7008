//! Kiosk Shell
//!
//! A single full-screen webview pinned to one destination. The app builder
//! bakes `shell.json` into the binary; at startup the shell validates it,
//! configures the webview surface once, and dispatches the configured load.
//! No navigation UI, no tabs - the webview owns everything after dispatch.

use anyhow::{Context, Result};
use kiosk_config::ShellConfig;
use kiosk_loader::{build_load_request, AssetResolver, Lifecycle, LoadRequest, SurfaceSettings};
use tao::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, WindowBuilder},
};
use std::path::Path;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use wry::{WebView, WebViewBuilder};

// Use mimalloc as the global allocator for reduced memory fragmentation
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Configuration emitted by the app builder, baked in at compile time.
const SHELL_CONFIG: &str = include_str!("../shell.json");

/// Scheme the bundled site is served under in local mode.
const LOCAL_SCHEME: &str = "kiosk";

fn main() -> Result<()> {
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    let config = ShellConfig::from_json_str(SHELL_CONFIG)
        .context("embedded shell.json is malformed")?;
    config
        .validate()
        .context("embedded shell.json failed validation")?;

    let settings = SurfaceSettings::from_config(&config);
    let request = build_load_request(&config)?;
    info!(title = %config.window.title, remote = config.source.is_remote(), "kiosk shell starting");

    let event_loop = EventLoop::new();

    let mut window_builder = WindowBuilder::new()
        .with_title(&config.window.title)
        .with_inner_size(LogicalSize::new(config.window.width, config.window.height));
    if config.window.fullscreen {
        window_builder = window_builder.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }
    let window = window_builder.build(&event_loop)?;

    // Creation-time capabilities: none of these can change once the
    // webview exists.
    let mut builder = WebViewBuilder::new()
        .with_autoplay(settings.autoplay)
        .with_hotkeys_zoom(settings.hotkeys_zoom)
        .with_devtools(settings.devtools);
    if let Some(user_agent) = &settings.user_agent {
        builder = builder.with_user_agent(user_agent);
    }
    if let LoadRequest::Local { scope, entry } = &request {
        let resolver = AssetResolver::new(scope, entry_name(entry), settings.allow_file_access);
        info!(scope = %resolver.scope().display(), "serving bundled site over {LOCAL_SCHEME}://");
        builder = builder.with_custom_protocol(LOCAL_SCHEME.to_string(), move |_id, protocol_request| {
            resolver.respond(protocol_request.uri().path())
        });
    }

    // Platform-specific build
    #[cfg(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "ios",
        target_os = "android"
    ))]
    let webview = builder.build(&window)?;

    #[cfg(not(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "ios",
        target_os = "android"
    )))]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window
            .default_vbox()
            .context("window has no GTK container to attach the webview to")?;
        builder.build_gtk(vbox)?
    };

    let mut lifecycle = Lifecycle::new();
    lifecycle.surface_ready()?;
    dispatch(&webview, &request, &mut lifecycle)?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("close requested, shutting down");
                *control_flow = ControlFlow::Exit;
            }
            // App returned to the foreground (mobile lifecycle): re-issue
            // the same load. Unchanged config means an identical request.
            Event::Resumed => {
                if let Err(e) = dispatch(&webview, &request, &mut lifecycle) {
                    warn!(error = %e, "re-dispatch on resume failed");
                }
            }
            _ => {}
        }
    });
}

/// Hand the load request to the surface. Idempotent for a fixed config:
/// every call issues the same load.
fn dispatch(webview: &WebView, request: &LoadRequest, lifecycle: &mut Lifecycle) -> Result<()> {
    match request {
        LoadRequest::Remote { url, headers } => {
            webview.load_url_with_headers(url.as_str(), headers.clone())?;
        }
        LoadRequest::Local { entry, .. } => {
            webview.load_url(&format!("{LOCAL_SCHEME}://localhost/{}", entry_name(entry)))?;
        }
    }
    lifecycle.load_dispatched()?;
    Ok(())
}

/// File name of the entry document, as served over the local scheme.
fn entry_name(entry: &Path) -> &str {
    entry
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("index.html")
}

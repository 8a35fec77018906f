//! Content views backed by `wry` webviews.
//!
//! Every tab gets its own child webview. Engine notifications are forwarded to
//! the event loop as [`UserEvent`]s tagged with the tab's [`SurfaceId`], so
//! late events from a closed tab are simply not found by the registry.

use std::path::PathBuf;
#[cfg(not(target_os = "linux"))]
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use tao::event_loop::EventLoopProxy;
#[cfg(not(target_os = "linux"))]
use tao::window::Window;
use tracing::{debug, warn};
use url::Url;
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::{PageLoadEvent, Rect, WebView, WebViewBuilder};

use crate::engine::{PageView, PageViewFactory};
use crate::ipc::is_web_url;
use crate::managers::download_manager::{suggested_file_name, DownloadManager, DownloadManagerTrait};
use crate::types::errors::NavigationError;
use crate::types::event::{SurfaceChange, SurfaceEvent};
use crate::types::tab::{SurfaceId, ViewBounds};

use super::webview_app::UserEvent;

fn engine_err(e: wry::Error) -> NavigationError {
    NavigationError::Engine(e.to_string())
}

pub(crate) fn rect(bounds: ViewBounds) -> Rect {
    Rect {
        position: LogicalPosition::new(bounds.x, bounds.y).into(),
        size: LogicalSize::new(bounds.width, bounds.height).into(),
    }
}

pub struct WryView {
    webview: WebView,
}

impl PageView for WryView {
    fn load_url(&mut self, url: &Url) -> Result<(), NavigationError> {
        self.webview.load_url(url.as_str()).map_err(engine_err)
    }

    fn back(&mut self) -> Result<(), NavigationError> {
        self.webview.evaluate_script("history.back()").map_err(engine_err)
    }

    fn forward(&mut self) -> Result<(), NavigationError> {
        self.webview.evaluate_script("history.forward()").map_err(engine_err)
    }

    fn reload(&mut self) -> Result<(), NavigationError> {
        self.webview.evaluate_script("location.reload()").map_err(engine_err)
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), NavigationError> {
        self.webview.set_visible(visible).map_err(engine_err)
    }

    fn set_bounds(&mut self, bounds: ViewBounds) -> Result<(), NavigationError> {
        self.webview.set_bounds(rect(bounds)).map_err(engine_err)
    }
}

/// Widget that hosts child webviews: a `gtk::Fixed` on Linux, the window
/// itself elsewhere.
#[cfg(target_os = "linux")]
pub type Container = gtk::Fixed;
#[cfg(not(target_os = "linux"))]
pub type Container = Rc<Window>;

/// Builds `builder` as a child of `container`.
pub(crate) fn build_child(container: &Container, builder: WebViewBuilder<'_>) -> Result<WebView, wry::Error> {
    #[cfg(target_os = "linux")]
    {
        use wry::WebViewBuilderExtUnix;
        builder.build_gtk(container)
    }
    #[cfg(not(target_os = "linux"))]
    {
        builder.build_as_child(&**container)
    }
}

/// Builds tab webviews inside the main window.
pub struct WryViewFactory {
    container: Container,
    proxy: EventLoopProxy<UserEvent>,
    downloads: Arc<Mutex<DownloadManager>>,
}

impl WryViewFactory {
    pub fn new(container: Container, proxy: EventLoopProxy<UserEvent>, downloads: Arc<Mutex<DownloadManager>>) -> Self {
        Self {
            container,
            proxy,
            downloads,
        }
    }
}

impl PageViewFactory for WryViewFactory {
    fn create_view(&mut self, id: SurfaceId, url: &Url) -> Result<Box<dyn PageView>, NavigationError> {
        let title_proxy = self.proxy.clone();
        let load_proxy = self.proxy.clone();
        let nw_proxy = self.proxy.clone();
        let downloads = self.downloads.clone();

        let builder = WebViewBuilder::new()
            .with_url(url.as_str())
            .with_visible(false)
            .with_document_title_changed_handler(move |title| {
                let _ = title_proxy.send_event(UserEvent::Surface(SurfaceEvent {
                    id,
                    change: SurfaceChange::TitleChanged(title),
                }));
            })
            .with_on_page_load_handler(move |event, url| {
                if let PageLoadEvent::Finished = event {
                    debug!(%id, %url, "page loaded");
                }
                match Url::parse(&url) {
                    Ok(url) => {
                        let _ = load_proxy.send_event(UserEvent::Surface(SurfaceEvent {
                            id,
                            change: SurfaceChange::UrlChanged(url),
                        }));
                    }
                    Err(e) => debug!(%id, error = %e, "engine reported unparsable url"),
                }
            })
            .with_new_window_req_handler(move |url, _features| {
                if let Some(url) = is_web_url(&url) {
                    let _ = nw_proxy.send_event(UserEvent::OpenInNewTab(url));
                }
                wry::NewWindowResponse::Deny
            })
            .with_download_started_handler(move |url: String, path: &mut PathBuf| {
                let name = suggested_file_name(&url, Some(path.as_path()));
                let Ok(mut manager) = downloads.lock() else {
                    warn!("download manager unavailable");
                    return false;
                };
                match manager.accept(&url, &name) {
                    Ok(target) => {
                        *path = target;
                        true
                    }
                    Err(e) => {
                        warn!(%url, error = %e, "download refused");
                        false
                    }
                }
            })
            .with_devtools(cfg!(debug_assertions));

        let webview = build_child(&self.container, builder).map_err(engine_err)?;
        Ok(Box::new(WryView { webview }))
    }
}

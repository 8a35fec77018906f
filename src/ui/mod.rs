//! GBrowser UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The window chrome is rendered as HTML/CSS/JS in its own transparent
//! WebView; every tab's page lives in a separate child WebView.

pub mod chrome_page;
pub mod webview_app;
pub mod wry_view;

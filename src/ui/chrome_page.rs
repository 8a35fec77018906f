//! The chrome page: title bar, tab strip and settings panel.

const CHROME_CSS: &str = include_str!("../../resources/ui/chrome.css");
const CHROME_BODY: &str = include_str!("../../resources/ui/chrome.html");
const CHROME_JS: &str = include_str!("../../resources/ui/chrome.js");

/// Full HTML document for the chrome webview.
pub fn chrome_html() -> String {
    let mut html = String::with_capacity(CHROME_CSS.len() + CHROME_BODY.len() + CHROME_JS.len() + 256);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><style>");
    html.push_str(CHROME_CSS);
    html.push_str("</style></head><body>");
    html.push_str(CHROME_BODY);
    html.push_str("<script>");
    html.push_str(CHROME_JS);
    html.push_str("</script></body></html>");
    html
}

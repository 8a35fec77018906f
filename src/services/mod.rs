// GBrowser services
// Services hold logic with no tab state: address parsing, settings persistence, window compositing.

pub mod address;
pub mod compositing;
pub mod settings_engine;

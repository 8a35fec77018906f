//! Property-based tests for settings persistence round-trips.

use gbrowser::services::settings_engine::{JsonFileStore, MemoryStore, SettingsEngine, SettingsEngineTrait};
use gbrowser::types::settings::{AcrylicColor, BrowserSettings, ThemeMode};
use proptest::prelude::*;
use tempfile::TempDir;
use url::Url;

fn arb_theme() -> impl Strategy<Value = ThemeMode> {
    prop_oneof![Just(ThemeMode::Dark), Just(ThemeMode::Light), Just(ThemeMode::Auto)]
}

fn arb_home_page() -> impl Strategy<Value = Url> {
    ("[a-z]{1,10}", "[a-z]{2,5}", "[a-z0-9/]{0,12}")
        .prop_map(|(name, tld, path)| Url::parse(&format!("https://{}.{}/{}", name, tld, path)).unwrap())
}

fn arb_settings() -> impl Strategy<Value = BrowserSettings> {
    (any::<u32>(), arb_theme(), arb_home_page(), any::<bool>()).prop_map(|(argb, theme, home_page, system_transparency)| {
        BrowserSettings {
            acrylic_color: AcrylicColor::from_argb(argb),
            theme,
            home_page,
            system_transparency,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Serialized settings deserialize to the same value.
    #[test]
    fn settings_json_roundtrip(settings in arb_settings()) {
        let json = serde_json::to_string(&settings).unwrap();
        let back: BrowserSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, settings);
    }

    /// Saving and reloading from the same file yields the saved settings.
    #[test]
    fn settings_file_roundtrip(settings in arb_settings()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut engine = SettingsEngine::new(Box::new(JsonFileStore::new(Some(path.clone()))));
        engine.save(settings.clone()).unwrap();

        let reopened = SettingsEngine::load(Box::new(JsonFileStore::new(Some(path)))).unwrap();
        prop_assert_eq!(reopened.settings(), &settings);
    }

    /// Reload after save on the same engine is a no-op.
    #[test]
    fn save_then_reload_is_stable(settings in arb_settings()) {
        let mut engine = SettingsEngine::new(Box::new(MemoryStore::new()));
        engine.save(settings.clone()).unwrap();
        let reloaded = engine.reload().unwrap().clone();
        prop_assert_eq!(reloaded, settings);
    }
}

//! Tests for the main window core: intents from the chrome, engine events and
//! settings flow, all against detached views and an in-memory store.

use std::cell::RefCell;
use std::rc::Rc;

use gbrowser::app::{App, APP_NAME};
use gbrowser::engine::{DetachedViewFactory, ViewCall, ViewLog};
use gbrowser::managers::tab_registry::TabRegistryTrait;
use gbrowser::services::compositing::CompositingEffect;
use gbrowser::services::settings_engine::{MemoryStore, SettingsEngine};
use gbrowser::types::errors::EffectError;
use gbrowser::types::event::{ChromeIntent, SettingsForm, SurfaceChange, SurfaceEvent, WindowCommand};
use gbrowser::types::settings::{default_home_page, AcrylicColor, ThemeMode};
use url::Url;

#[derive(Debug, Clone, PartialEq)]
enum EffectCall {
    Enable(AcrylicColor),
    Disable,
}

#[derive(Clone, Default)]
struct RecordingEffect {
    calls: Rc<RefCell<Vec<EffectCall>>>,
}

impl RecordingEffect {
    fn calls(&self) -> Vec<EffectCall> {
        self.calls.borrow().clone()
    }

    fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl CompositingEffect for RecordingEffect {
    fn enable(&mut self, color: AcrylicColor) -> Result<(), EffectError> {
        self.calls.borrow_mut().push(EffectCall::Enable(color));
        Ok(())
    }

    fn disable(&mut self) -> Result<(), EffectError> {
        self.calls.borrow_mut().push(EffectCall::Disable);
        Ok(())
    }
}

struct Harness {
    app: App,
    views: ViewLog,
    effect: RecordingEffect,
}

fn harness() -> Harness {
    let factory = DetachedViewFactory::new();
    let views = factory.log();
    let effect = RecordingEffect::default();
    let settings = SettingsEngine::load(Box::new(MemoryStore::new())).unwrap();
    let app = App::new(Box::new(factory), settings, Box::new(effect.clone())).unwrap();
    Harness { app, views, effect }
}

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn title_event(app: &App, index: usize, title: &str) -> SurfaceEvent {
    SurfaceEvent {
        id: app.registry().surface(index).unwrap().id(),
        change: SurfaceChange::TitleChanged(title.to_string()),
    }
}

fn url_event(app: &App, index: usize, to: &str) -> SurfaceEvent {
    SurfaceEvent {
        id: app.registry().surface(index).unwrap().id(),
        change: SurfaceChange::UrlChanged(url(to)),
    }
}

fn form(alpha_percent: u8, theme: ThemeMode, home_page: &str, system_transparency: bool) -> SettingsForm {
    SettingsForm {
        alpha_percent,
        theme,
        home_page: home_page.to_string(),
        system_transparency,
    }
}

// === Startup ===

#[test]
fn test_starts_with_home_page_tab() {
    let h = harness();
    assert_eq!(h.app.registry().len(), 1);
    assert_eq!(h.app.registry().current_index(), Some(0));

    let state = h.app.chrome_state();
    assert_eq!(state.tabs.len(), 1);
    assert!(state.tabs[0].is_active);
    assert_eq!(state.address, default_home_page().to_string());
    assert!(!state.can_go_back);
    assert_eq!(h.app.window_title(), format!("New Tab - {}", APP_NAME));
}

#[test]
fn test_window_shown_applies_saved_tint() {
    let mut h = harness();
    assert!(h.app.on_window_shown());
    assert_eq!(h.effect.calls(), vec![EffectCall::Enable(AcrylicColor::DEFAULT)]);
}

// === Address bar ===

#[test]
fn test_navigate_normalizes_and_loads() {
    let mut h = harness();
    h.views.clear();
    let commands = h.app.handle(ChromeIntent::Navigate("  example.com  ".to_string()));

    let id = h.app.registry().current_surface().unwrap().id();
    assert_eq!(h.views.calls_for(id), vec![ViewCall::Load(url("https://example.com/"))]);
    assert_eq!(h.app.chrome_state().address, "https://example.com/");
    assert!(h.app.chrome_state().can_go_back);
    assert!(matches!(commands.as_slice(), [WindowCommand::SetTitle(_)]));
}

#[test]
fn test_blank_address_is_dropped_silently() {
    let mut h = harness();
    h.views.clear();
    let before = h.app.chrome_state();

    let commands = h.app.handle(ChromeIntent::Navigate("   ".to_string()));
    assert!(commands.is_empty());
    assert!(h.views.calls().is_empty());
    assert_eq!(h.app.chrome_state(), before);
}

#[test]
fn test_back_and_forward_follow_history() {
    let mut h = harness();
    h.app.handle(ChromeIntent::Navigate("https://one.test/".to_string()));

    h.app.handle(ChromeIntent::Back);
    assert_eq!(h.app.chrome_state().address, "https://one.test/");
    let home = default_home_page();
    h.app.on_surface_event(url_event(&h.app, 0, home.as_str()));
    assert_eq!(h.app.chrome_state().address, home.to_string());
    assert!(h.app.chrome_state().can_go_forward);

    h.app.handle(ChromeIntent::Forward);
    h.app.on_surface_event(url_event(&h.app, 0, "https://one.test/"));
    assert_eq!(h.app.chrome_state().address, "https://one.test/");
    assert!(!h.app.chrome_state().can_go_forward);
}

#[test]
fn test_link_back_to_previous_page_keeps_back_enabled() {
    let mut h = harness();
    let home = default_home_page();
    h.app.on_surface_event(url_event(&h.app, 0, "https://one.test/"));
    h.app.on_surface_event(url_event(&h.app, 0, home.as_str()));

    let state = h.app.chrome_state();
    assert_eq!(state.address, home.to_string());
    assert!(state.can_go_back);
    assert!(!state.can_go_forward);

    h.views.clear();
    assert!(h.app.handle(ChromeIntent::Forward).is_empty());
    assert!(h.views.calls().is_empty());
}

#[test]
fn test_back_without_history_is_a_no_op() {
    let mut h = harness();
    h.views.clear();
    assert!(h.app.handle(ChromeIntent::Back).is_empty());
    assert!(h.views.calls().is_empty());
}

// === Tab strip ===

#[test]
fn test_new_tab_opens_home_page_and_selects_it() {
    let mut h = harness();
    h.app.handle(ChromeIntent::Navigate("https://one.test/".to_string()));
    let commands = h.app.handle(ChromeIntent::NewTab);

    assert_eq!(h.app.registry().len(), 2);
    assert_eq!(h.app.strip().active_index(), Some(1));
    assert_eq!(h.app.chrome_state().address, default_home_page().to_string());
    assert_eq!(commands, vec![WindowCommand::SetTitle(format!("New Tab - {}", APP_NAME))]);
}

#[test]
fn test_select_updates_address_and_title() {
    let mut h = harness();
    h.app.handle(ChromeIntent::Navigate("https://one.test/".to_string()));
    h.app.handle(ChromeIntent::NewTab);
    h.app.on_surface_event(title_event(&h.app, 0, "One"));

    let commands = h.app.handle(ChromeIntent::SelectTab(0));
    assert_eq!(h.app.chrome_state().address, "https://one.test/");
    assert_eq!(commands, vec![WindowCommand::SetTitle(format!("One - {}", APP_NAME))]);
    let active: Vec<bool> = h.app.strip().entries().iter().map(|e| e.is_active).collect();
    assert_eq!(active, vec![true, false]);
}

#[test]
fn test_close_only_tab_leaves_blank_tab() {
    let mut h = harness();
    h.app.handle(ChromeIntent::CloseTab(0));

    assert_eq!(h.app.registry().len(), 1);
    assert_eq!(h.app.chrome_state().address, "about:blank");
    assert_eq!(h.app.strip().entries().len(), 1);
}

#[test]
fn test_duplicate_appends_copy() {
    let mut h = harness();
    h.app.handle(ChromeIntent::Navigate("https://one.test/".to_string()));
    h.app.handle(ChromeIntent::NewTab);
    h.app.handle(ChromeIntent::DuplicateTab(0));

    assert_eq!(h.app.registry().len(), 3);
    assert_eq!(h.app.registry().current_index(), Some(2));
    assert_eq!(h.app.chrome_state().address, "https://one.test/");
    assert_eq!(h.app.strip().entries()[2].title, "Copy");
}

#[test]
fn test_reload_tab_reaches_that_view_only() {
    let mut h = harness();
    h.app.handle(ChromeIntent::NewTab);
    h.views.clear();
    h.app.handle(ChromeIntent::ReloadTab(0));

    let first = h.app.registry().surface(0).unwrap().id();
    assert_eq!(h.views.calls(), vec![(first, ViewCall::Reload)]);
}

#[test]
fn test_out_of_range_intent_changes_nothing() {
    let mut h = harness();
    let before = h.app.chrome_state();
    assert!(h.app.handle(ChromeIntent::CloseTab(4)).is_empty());
    assert!(h.app.handle(ChromeIntent::SelectTab(4)).is_empty());
    assert_eq!(h.app.chrome_state(), before);
}

#[test]
fn test_page_new_window_request_opens_tab() {
    let mut h = harness();
    h.app.handle(ChromeIntent::OpenInNewTab(url("https://popup.test/")));
    assert_eq!(h.app.registry().len(), 2);
    assert_eq!(h.app.chrome_state().address, "https://popup.test/");
}

// === Engine events ===

#[test]
fn test_title_of_background_tab_updates_strip_only() {
    let mut h = harness();
    h.app.handle(ChromeIntent::NewTab);

    let commands = h.app.on_surface_event(title_event(&h.app, 0, "Background"));
    assert!(commands.is_empty());
    assert_eq!(h.app.strip().entries()[0].title, "Background");
    assert_eq!(h.app.window_title(), format!("New Tab - {}", APP_NAME));
}

#[test]
fn test_title_of_current_tab_updates_window_title() {
    let mut h = harness();
    let commands = h.app.on_surface_event(title_event(&h.app, 0, "Search"));
    assert_eq!(commands, vec![WindowCommand::SetTitle(format!("Search - {}", APP_NAME))]);
}

#[test]
fn test_url_of_background_tab_leaves_address_alone() {
    let mut h = harness();
    h.app.handle(ChromeIntent::NewTab);
    let before = h.app.chrome_state().address;

    h.app.on_surface_event(url_event(&h.app, 0, "https://elsewhere.test/"));
    assert_eq!(h.app.chrome_state().address, before);
    assert_eq!(h.app.registry().surface(0).unwrap().url(), &url("https://elsewhere.test/"));
}

#[test]
fn test_url_of_current_tab_updates_address() {
    let mut h = harness();
    h.app.on_surface_event(url_event(&h.app, 0, "https://redirected.test/"));
    assert_eq!(h.app.chrome_state().address, "https://redirected.test/");
}

#[test]
fn test_event_for_closed_tab_is_ignored() {
    let mut h = harness();
    h.app.handle(ChromeIntent::NewTab);
    let stale = title_event(&h.app, 1, "Gone");
    h.app.handle(ChromeIntent::CloseTab(1));
    let before = h.app.chrome_state();

    assert!(h.app.on_surface_event(stale).is_empty());
    assert_eq!(h.app.chrome_state(), before);
}

// === Window ===

#[test]
fn test_window_buttons_map_to_commands() {
    let mut h = harness();
    assert_eq!(h.app.handle(ChromeIntent::Minimize), vec![WindowCommand::Minimize]);
    assert_eq!(h.app.handle(ChromeIntent::ToggleMaximize), vec![WindowCommand::SetMaximized(true)]);
    assert!(h.app.chrome_state().maximized);
    assert_eq!(h.app.handle(ChromeIntent::CloseWindow), vec![WindowCommand::Close]);
}

#[test]
fn test_drag_gesture_moves_window() {
    let mut h = harness();
    h.app.on_window_resized(1000.0, 700.0, false);
    h.app.on_window_moved(100.0, 100.0);

    h.app.handle(ChromeIntent::DragPress {
        x: 20.0,
        chrome_width: 1000.0,
        screen_x: 120.0,
        screen_y: 110.0,
    });
    let commands = h.app.handle(ChromeIntent::DragMove {
        screen_x: 220.0,
        screen_y: 210.0,
    });
    assert_eq!(commands, vec![WindowCommand::MoveTo { x: 200.0, y: 200.0 }]);
    h.app.handle(ChromeIntent::DragRelease);
    assert!(h.app.chrome().drag_state().is_none());
}

// === Settings ===

#[test]
fn test_open_settings_prefills_form() {
    let mut h = harness();
    assert_eq!(h.app.handle(ChromeIntent::OpenSettings), vec![WindowCommand::ShowSettings(true)]);

    let form = h.app.chrome_state().settings_form.unwrap();
    assert_eq!(form.alpha_percent, 40);
    assert_eq!(form.theme, ThemeMode::Dark);
    assert!(form.system_transparency);
}

#[test]
fn test_preview_applies_tint_without_saving() {
    let mut h = harness();
    h.app.handle(ChromeIntent::OpenSettings);
    h.app.handle(ChromeIntent::PreviewAlpha(80));

    assert_eq!(h.effect.calls(), vec![EffectCall::Enable(AcrylicColor::from_alpha_percent(80))]);
    assert_eq!(h.app.settings().acrylic_color, AcrylicColor::DEFAULT);
}

#[test]
fn test_preview_while_closed_is_ignored() {
    let mut h = harness();
    h.app.handle(ChromeIntent::PreviewAlpha(80));
    assert!(h.effect.calls().is_empty());
}

#[test]
fn test_cancel_restores_saved_tint() {
    let mut h = harness();
    h.app.handle(ChromeIntent::OpenSettings);
    h.app.handle(ChromeIntent::PreviewAlpha(90));
    h.effect.clear();

    assert_eq!(h.app.handle(ChromeIntent::CancelSettings), vec![WindowCommand::ShowSettings(false)]);
    assert_eq!(h.effect.calls(), vec![EffectCall::Enable(AcrylicColor::DEFAULT)]);
    assert!(h.app.chrome_state().settings_form.is_none());
}

#[test]
fn test_save_applies_all_fields() {
    let mut h = harness();
    h.app.handle(ChromeIntent::OpenSettings);
    let commands = h.app.handle(ChromeIntent::SaveSettings(form(60, ThemeMode::Light, "example.org", true)));

    assert_eq!(
        commands,
        vec![WindowCommand::ShowSettings(false), WindowCommand::SetTheme(ThemeMode::Light)]
    );
    let settings = h.app.settings();
    assert_eq!(settings.acrylic_color, AcrylicColor::from_alpha_percent(60));
    assert_eq!(settings.theme, ThemeMode::Light);
    assert_eq!(settings.home_page, url("https://example.org/"));
    assert_eq!(h.effect.calls(), vec![EffectCall::Enable(AcrylicColor::from_alpha_percent(60))]);
    assert!(!h.app.panel().is_open());
}

#[test]
fn test_save_with_transparency_off_removes_effect() {
    let mut h = harness();
    h.app.handle(ChromeIntent::OpenSettings);
    h.app.handle(ChromeIntent::SaveSettings(form(40, ThemeMode::Dark, "", false)));

    assert_eq!(h.effect.calls(), vec![EffectCall::Disable]);
    assert!(!h.app.settings().system_transparency);
    assert_eq!(h.app.settings().home_page, default_home_page());
}

#[test]
fn test_new_tabs_use_saved_home_page() {
    let mut h = harness();
    h.app.handle(ChromeIntent::OpenSettings);
    h.app.handle(ChromeIntent::SaveSettings(form(40, ThemeMode::Dark, "start.test", true)));
    h.app.handle(ChromeIntent::NewTab);
    assert_eq!(h.app.chrome_state().address, "https://start.test/");
}

#[test]
fn test_chrome_state_serializes_for_the_page() {
    let h = harness();
    let json = serde_json::to_value(h.app.chrome_state()).unwrap();
    assert_eq!(json["tabs"][0]["title"], "New Tab");
    assert_eq!(json["theme"], "Dark");
    assert!(json["settings_form"].is_null());
}

//! GBrowser — a frameless, translucent web browser shell.
//!
//! Entry point: opens the main browser window.
//! When built without the `gui` feature, runs a console demo against detached views.

use std::process::ExitCode;

#[cfg(feature = "gui")]
fn main() -> ExitCode {
    gbrowser::logging::init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting GBrowser");
    match gbrowser::ui::webview_app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{:#}", e);
            tracing::error!(error = %message, "failed to start main window");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "gui"))]
fn main() -> ExitCode {
    gbrowser::logging::init();
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                 GBrowser v{} — Demo Mode                  ║", env!("CARGO_PKG_VERSION"));
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let result = demo_settings().and_then(|_| demo_window()).and_then(|_| demo_downloads());
    match result {
        Ok(()) => {
            println!("═══════════════════════════════════════════════════════════════");
            println!("  ✅ All components demonstrated successfully!");
            println!("═══════════════════════════════════════════════════════════════");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("  ✗ demo failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "gui"))]
fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

#[cfg(not(feature = "gui"))]
fn demo_settings() -> anyhow::Result<()> {
    use gbrowser::services::settings_engine::{MemoryStore, SettingsEngine, SettingsEngineTrait};
    use gbrowser::types::settings::AcrylicColor;
    section("Settings Engine");

    let mut engine = SettingsEngine::load(Box::new(MemoryStore::new()))?;
    let mut settings = engine.settings().clone();
    println!("  Default tint: {:#010X} ({}% opaque)", settings.acrylic_color.argb(), settings.acrylic_color.alpha_percent());
    settings.acrylic_color = AcrylicColor::from_alpha_percent(75);
    engine.save(settings)?;
    println!("  Saved tint:   {:#010X}", engine.settings().acrylic_color.argb());
    println!("  ✓ Settings OK");
    println!();
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn demo_window() -> anyhow::Result<()> {
    use gbrowser::app::App;
    use gbrowser::engine::DetachedViewFactory;
    use gbrowser::services::compositing::NoopEffect;
    use gbrowser::services::settings_engine::{MemoryStore, SettingsEngine};
    use gbrowser::types::event::ChromeIntent;
    section("Main Window");

    let settings = SettingsEngine::load(Box::new(MemoryStore::new()))?;
    let mut app = App::new(Box::new(DetachedViewFactory::new()), settings, Box::new(NoopEffect))?;
    app.handle(ChromeIntent::Navigate("www.rust-lang.org".to_string()));
    app.handle(ChromeIntent::NewTab);
    app.handle(ChromeIntent::Navigate("   ".to_string()));
    app.handle(ChromeIntent::DuplicateTab(0));
    app.handle(ChromeIntent::CloseTab(1));

    for entry in app.strip().entries() {
        let marker = if entry.is_active { "▶" } else { " " };
        println!("  {} [{}] {}", marker, entry.index, entry.title);
    }
    println!("  Address: {}", app.chrome_state().address);
    println!("  Window title: {}", app.window_title());
    println!("  ✓ Tabs OK");
    println!();
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn demo_downloads() -> anyhow::Result<()> {
    use gbrowser::managers::download_manager::{DownloadManager, DownloadManagerTrait};
    section("Download Manager");

    let dir = std::env::temp_dir().join("gbrowser-demo-downloads");
    let mut manager = DownloadManager::new(Some(dir));
    let first = manager.accept("https://example.com/report.pdf", "report.pdf")?;
    let second = manager.accept("https://example.com/report.pdf", "report.pdf")?;
    println!("  First:  {}", first.display());
    println!("  Second: {}", second.display());
    println!("  ✓ Downloads OK");
    println!();
    Ok(())
}

use launch_pad::controller::OverlayController;
use launch_pad::gui::OverlayApp;
use launch_pad::hotkey::HotkeyTrigger;
use launch_pad::launcher::ProcessLauncher;
use launch_pad::settings::Settings;

use eframe::egui;
use std::sync::Arc;

const SETTINGS_FILE: &str = "settings.json";

fn main() -> anyhow::Result<()> {
    let (settings, settings_error) = match Settings::load(SETTINGS_FILE) {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    launch_pad::logging::init(settings.debug_logging, settings.log_file());
    if let Some(e) = settings_error {
        tracing::error!("failed to parse {SETTINGS_FILE}: {e}; using defaults");
    }

    let mut controller = OverlayController::new(
        settings.config_path(),
        settings.grid(),
        settings.hotkey_mode,
        ProcessLauncher,
    );
    controller.load_catalog();

    let trigger = Arc::new(HotkeyTrigger::new(settings.hotkey()));
    if let Err(e) = trigger.start_listener() {
        tracing::error!("failed to start hotkey listener: {e}");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("LaunchPad")
            .with_decorations(false)
            .with_fullscreen(true)
            .with_always_on_top()
            .with_taskbar(false)
            .with_visible(false),
        ..Default::default()
    };

    let dim = settings.dim();
    let label_font_size = settings.label_font_size;
    eframe::run_native(
        "LaunchPad",
        native_options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            trigger.set_waker(move || ctx.request_repaint());
            Box::new(OverlayApp::new(controller, trigger, dim, label_font_size))
        }),
    )
    .map_err(|e| anyhow::anyhow!("overlay event loop failed: {e}"))
}

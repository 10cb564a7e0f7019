use crate::controller::{OverlayController, OverlayEffect, OverlayEvent, OverlayState};
use crate::hotkey::ToggleSignal;
use crate::launcher::Launcher;

/// Forward a pending hotkey signal to the controller.
///
/// When the overlay is about to be shown, `viewport` is asked for the current
/// display size first so the layout is computed against it.
pub fn handle_visibility_trigger<S, L, F>(
    signal: &S,
    controller: &mut OverlayController<L>,
    viewport: F,
) -> Vec<OverlayEffect>
where
    S: ToggleSignal + ?Sized,
    L: Launcher,
    F: FnOnce() -> Option<(u32, u32)>,
{
    if !signal.take() {
        return Vec::new();
    }
    let mut effects = Vec::new();
    if controller.state() == OverlayState::Hidden {
        if let Some((width, height)) = viewport() {
            effects.extend(controller.handle(OverlayEvent::Resized { width, height }));
        }
    }
    effects.extend(controller.handle(OverlayEvent::Hotkey));
    tracing::debug!(to = ?controller.state(), "visibility updated");
    effects
}

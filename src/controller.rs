//! Overlay state machine.
//!
//! The controller owns the catalog, the current layout and the visibility
//! state. UI code feeds it [`OverlayEvent`]s and applies the returned
//! [`OverlayEffect`]s; nothing here touches a window directly.

use crate::catalog::TileCatalog;
use crate::hit_test::hit_test;
use crate::launcher::{LaunchRequest, Launcher};
use crate::layout::{GridLayout, GridSpec};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Hidden,
    Visible,
}

/// What the hotkey does while the overlay is already visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotkeyMode {
    /// A second press hides the overlay.
    #[default]
    Toggle,
    /// The hotkey only ever shows; hiding is left to escape, clicks and
    /// focus loss.
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKey {
    Escape,
    Reload,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    Hotkey,
    /// The overlay window lost foreground focus.
    Deactivated,
    Key(OverlayKey),
    Click { x: i32, y: i32 },
    Resized { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEffect {
    /// Capture the screen, paint and make the overlay visible.
    Show,
    Hide,
    /// Paint again with the current catalog and layout.
    Repaint,
    Launched(usize),
    LaunchFailed(usize),
}

pub struct OverlayController<L: Launcher> {
    state: OverlayState,
    catalog: TileCatalog,
    layout: GridLayout,
    grid: GridSpec,
    viewport: (u32, u32),
    hotkey_mode: HotkeyMode,
    config_path: PathBuf,
    generation: u64,
    launcher: L,
}

impl<L: Launcher> OverlayController<L> {
    pub fn new(config_path: PathBuf, grid: GridSpec, hotkey_mode: HotkeyMode, launcher: L) -> Self {
        Self {
            state: OverlayState::Hidden,
            catalog: TileCatalog::empty(),
            layout: GridLayout::compute(0, 0, grid),
            grid,
            viewport: (0, 0),
            hotkey_mode,
            config_path,
            generation: 0,
            launcher,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Bumped every time the catalog is replaced, so renderers know when
    /// cached icons are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Replace the catalog with a fresh read of the configuration document and
    /// recompute the layout.
    pub fn load_catalog(&mut self) {
        let catalog = TileCatalog::load(&self.config_path);
        self.catalog = catalog;
        self.generation += 1;
        self.relayout();
    }

    fn relayout(&mut self) {
        self.layout = GridLayout::compute(self.viewport.0, self.viewport.1, self.grid);
        if self.viewport != (0, 0) && self.catalog.len() > self.layout.capacity() {
            tracing::warn!(
                tiles = self.catalog.len(),
                capacity = self.layout.capacity(),
                "not all tiles fit on screen"
            );
        }
    }

    pub fn handle(&mut self, event: OverlayEvent) -> Vec<OverlayEffect> {
        tracing::debug!(?event, state = ?self.state, "overlay event");
        match (event, self.state) {
            (OverlayEvent::Resized { width, height }, state) => {
                if self.viewport == (width, height) {
                    return Vec::new();
                }
                self.viewport = (width, height);
                self.relayout();
                match state {
                    OverlayState::Visible => vec![OverlayEffect::Repaint],
                    OverlayState::Hidden => Vec::new(),
                }
            }
            (OverlayEvent::Hotkey, OverlayState::Hidden) => {
                self.relayout();
                self.state = OverlayState::Visible;
                vec![OverlayEffect::Show]
            }
            (OverlayEvent::Hotkey, OverlayState::Visible) => match self.hotkey_mode {
                HotkeyMode::Toggle => self.hide(),
                HotkeyMode::Show => Vec::new(),
            },
            (OverlayEvent::Deactivated, _) => self.hide(),
            (OverlayEvent::Key(OverlayKey::Escape), OverlayState::Visible) => self.hide(),
            (OverlayEvent::Key(OverlayKey::Reload), OverlayState::Visible) => {
                self.load_catalog();
                vec![OverlayEffect::Repaint]
            }
            (OverlayEvent::Click { x, y }, OverlayState::Visible) => {
                let mut effects = self.hide();
                if let Some(index) = hit_test(x, y, &self.layout, self.catalog.len()) {
                    effects.push(self.launch(index));
                }
                effects
            }
            (OverlayEvent::Key(_), _) | (OverlayEvent::Click { .. }, OverlayState::Hidden) => {
                Vec::new()
            }
        }
    }

    fn hide(&mut self) -> Vec<OverlayEffect> {
        match self.state {
            OverlayState::Visible => {
                self.state = OverlayState::Hidden;
                vec![OverlayEffect::Hide]
            }
            OverlayState::Hidden => Vec::new(),
        }
    }

    fn launch(&self, index: usize) -> OverlayEffect {
        let Some(tile) = self.catalog.get(index) else {
            return OverlayEffect::LaunchFailed(index);
        };
        match self.launcher.launch(&LaunchRequest::from(tile)) {
            Ok(()) => {
                tracing::info!(title = %tile.title, "launched tile");
                OverlayEffect::Launched(index)
            }
            Err(e) => {
                tracing::error!(
                    title = %tile.title,
                    executable = %tile.executable,
                    "launch failed: {e}"
                );
                OverlayEffect::LaunchFailed(index)
            }
        }
    }
}

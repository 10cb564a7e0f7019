//! eframe front end: paints the frozen backdrop and tiles, turns egui input
//! into [`OverlayEvent`]s and applies the controller's effects to the window.

use crate::capture::{frozen_backdrop, primary_display_size, Rgba};
use crate::controller::{OverlayController, OverlayEffect, OverlayEvent, OverlayKey, OverlayState};
use crate::hotkey::ToggleSignal;
use crate::launcher::Launcher;
use crate::render::{RenderRequest, TileSprite};
use crate::visibility::handle_visibility_trigger;
use eframe::egui;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const FULL_UV: egui::Rect = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

pub fn overlay_key(key: egui::Key) -> OverlayKey {
    match key {
        egui::Key::Escape => OverlayKey::Escape,
        egui::Key::R => OverlayKey::Reload,
        _ => OverlayKey::Other,
    }
}

/// Icon textures for one catalog generation. Failed loads are remembered so
/// a broken path is only reported once per reload.
#[derive(Default)]
struct IconCache {
    generation: u64,
    textures: HashMap<PathBuf, Option<egui::TextureHandle>>,
}

impl IconCache {
    fn reset_if_stale(&mut self, generation: u64) {
        if self.generation != generation {
            self.textures.clear();
            self.generation = generation;
        }
    }

    fn get(&mut self, ctx: &egui::Context, path: &Path) -> Option<egui::TextureHandle> {
        self.textures
            .entry(path.to_path_buf())
            .or_insert_with(|| match image::open(path) {
                Ok(img) => {
                    let rgba = img.to_rgba8();
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    Some(ctx.load_texture(
                        path.to_string_lossy(),
                        egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()),
                        egui::TextureOptions::LINEAR,
                    ))
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "failed to load tile icon: {e}");
                    None
                }
            })
            .clone()
    }
}

pub struct OverlayApp<L: Launcher> {
    controller: OverlayController<L>,
    signal: Arc<dyn ToggleSignal + Send + Sync>,
    dim: Rgba,
    label_font_size: f32,
    backdrop: Option<egui::TextureHandle>,
    icons: IconCache,
    request: Option<RenderRequest>,
    had_focus: bool,
}

impl<L: Launcher> OverlayApp<L> {
    pub fn new(
        controller: OverlayController<L>,
        signal: Arc<dyn ToggleSignal + Send + Sync>,
        dim: Rgba,
        label_font_size: f32,
    ) -> Self {
        Self {
            controller,
            signal,
            dim,
            label_font_size,
            backdrop: None,
            icons: IconCache::default(),
            request: None,
            had_focus: false,
        }
    }

    fn collect_events(&mut self, ctx: &egui::Context) -> Vec<OverlayEvent> {
        let mut events = Vec::new();
        let size = ctx.screen_rect().size();
        events.push(OverlayEvent::Resized {
            width: size.x.max(0.0) as u32,
            height: size.y.max(0.0) as u32,
        });
        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Key {
                    key, pressed: true, repeat: false, ..
                } = event
                {
                    events.push(OverlayEvent::Key(overlay_key(*key)));
                }
            }
            if i.pointer.primary_clicked() {
                if let Some(pos) = i.pointer.interact_pos() {
                    events.push(OverlayEvent::Click {
                        x: pos.x.floor() as i32,
                        y: pos.y.floor() as i32,
                    });
                }
            }
            match i.viewport().focused {
                Some(true) => self.had_focus = true,
                Some(false) if self.had_focus => {
                    self.had_focus = false;
                    events.push(OverlayEvent::Deactivated);
                }
                _ => {}
            }
        });
        events
    }

    fn apply(&mut self, ctx: &egui::Context, effects: Vec<OverlayEffect>) {
        for effect in effects {
            match effect {
                OverlayEffect::Show => {
                    let layout = self.controller.layout();
                    let image =
                        frozen_backdrop(self.dim, (layout.viewport_width, layout.viewport_height));
                    let size = [image.width() as usize, image.height() as usize];
                    self.backdrop = Some(ctx.load_texture(
                        "backdrop",
                        egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw()),
                        egui::TextureOptions::LINEAR,
                    ));
                    self.rebuild_request();
                    self.had_focus = false;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
                    ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
                }
                OverlayEffect::Hide => {
                    // textures are freed when their last handle drops
                    self.backdrop = None;
                    self.request = None;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
                }
                OverlayEffect::Repaint => self.rebuild_request(),
                OverlayEffect::Launched(_) | OverlayEffect::LaunchFailed(_) => {}
            }
        }
    }

    fn rebuild_request(&mut self) {
        self.icons.reset_if_stale(self.controller.generation());
        self.request = Some(RenderRequest::from_controller(&self.controller, self.dim));
    }

    fn paint_tile(&mut self, ctx: &egui::Context, painter: &egui::Painter, tile: &TileSprite) {
        let cell = tile.cell_size as f32;
        let rect = egui::Rect::from_min_size(
            egui::pos2(tile.left as f32, tile.top as f32),
            egui::vec2(cell, cell),
        );
        match self.icons.get(ctx, &tile.icon_path) {
            Some(texture) => {
                painter.image(texture.id(), rect, FULL_UV, egui::Color32::WHITE);
            }
            None => {
                painter.rect_filled(rect, 8.0, egui::Color32::from_gray(90));
            }
        }
        let (x, y) = tile.label_origin();
        painter.text(
            egui::pos2(x as f32, y as f32),
            egui::Align2::LEFT_TOP,
            &tile.title,
            egui::FontId::proportional(self.label_font_size),
            egui::Color32::WHITE,
        );
    }

    fn paint(&mut self, ctx: &egui::Context) {
        let Some(request) = self.request.take() else {
            return;
        };
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let painter = ui.painter().clone();
                let screen = ctx.screen_rect();
                match &self.backdrop {
                    Some(texture) => {
                        painter.image(texture.id(), screen, FULL_UV, egui::Color32::WHITE);
                    }
                    None => {
                        let dim = self.dim;
                        let fill = egui::Color32::from_rgba_unmultiplied(dim.r, dim.g, dim.b, dim.a);
                        painter.rect_filled(screen, 0.0, fill);
                    }
                }
                for tile in &request.tiles {
                    self.paint_tile(ctx, &painter, tile);
                }
            });
        self.request = Some(request);
    }
}

impl<L: Launcher> eframe::App for OverlayApp<L> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let effects = handle_visibility_trigger(
            &*self.signal,
            &mut self.controller,
            primary_display_size,
        );
        self.apply(ctx, effects);

        if self.controller.state() == OverlayState::Visible {
            for event in self.collect_events(ctx) {
                let effects = self.controller.handle(event);
                self.apply(ctx, effects);
            }
        }

        if self.controller.state() == OverlayState::Visible {
            self.paint(ctx);
        } else {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 1.0]
    }
}

use anyhow::{anyhow, Result};
use image::RgbaImage;
use screenshots::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

fn primary_screen() -> Result<Screen> {
    let mut screens = Screen::all()?;
    let index = screens
        .iter()
        .position(|s| s.display_info.is_primary)
        .unwrap_or(0);
    if index >= screens.len() {
        return Err(anyhow!("no display found"));
    }
    Ok(screens.swap_remove(index))
}

/// Size of the primary display, if one can be queried.
pub fn primary_display_size() -> Option<(u32, u32)> {
    match primary_screen() {
        Ok(screen) => Some((screen.display_info.width, screen.display_info.height)),
        Err(e) => {
            tracing::warn!("failed to query primary display: {e}");
            None
        }
    }
}

/// Grab the current contents of the primary display.
pub fn capture_primary() -> Result<RgbaImage> {
    let screen = primary_screen()?;
    let image = screen.capture()?;
    if image.width() == 0 || image.height() == 0 {
        return Err(anyhow!("display capture is empty"));
    }
    Ok(image)
}

/// Capture the primary display and darken it with `dim`. Failures yield a
/// plain `dim`-coloured backdrop of `fallback_size` so the overlay still
/// opens.
pub fn frozen_backdrop(dim: Rgba, fallback_size: (u32, u32)) -> RgbaImage {
    match capture_primary() {
        Ok(mut image) => {
            darken_in_place(&mut image, dim);
            image
        }
        Err(e) => {
            tracing::error!("screen capture failed: {e}");
            let (w, h) = (fallback_size.0.max(1), fallback_size.1.max(1));
            RgbaImage::from_pixel(w, h, image::Rgba([dim.r, dim.g, dim.b, 255]))
        }
    }
}

/// Source-over blend of `dim` onto every pixel of `image`.
pub fn darken_in_place(image: &mut RgbaImage, dim: Rgba) {
    let sa = dim.a as f32 / 255.0;
    let keep = 1.0 - sa;
    let top = [dim.r, dim.g, dim.b].map(|c| c as f32 * sa);
    for px in image.pixels_mut() {
        let da = px[3] as f32 / 255.0;
        let out_a = sa + da * keep;
        if out_a <= f32::EPSILON {
            px.0 = [0, 0, 0, 0];
            continue;
        }
        for (channel, top) in px.0.iter_mut().take(3).zip(top) {
            *channel = ((top + *channel as f32 * da * keep) / out_a)
                .round()
                .clamp(0.0, 255.0) as u8;
        }
        px[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

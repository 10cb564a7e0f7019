use crate::capture::Rgba;
use crate::controller::OverlayController;
use crate::launcher::Launcher;
use std::path::PathBuf;

/// Gap between the bottom of an icon and its label.
pub const LABEL_GAP: u32 = 4;

/// One icon and label to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSprite {
    pub index: usize,
    pub title: String,
    pub icon_path: PathBuf,
    pub left: u32,
    pub top: u32,
    pub cell_size: u32,
}

impl TileSprite {
    pub fn label_origin(&self) -> (u32, u32) {
        (self.left, self.top + self.cell_size + LABEL_GAP)
    }
}

/// Everything the compositor needs for one paint of the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub viewport: (u32, u32),
    pub dim: Rgba,
    pub tiles: Vec<TileSprite>,
}

impl RenderRequest {
    /// Build the request from the controller's current catalog and layout, so
    /// drawing uses exactly the geometry clicks are resolved against.
    pub fn from_controller<L: Launcher>(controller: &OverlayController<L>, dim: Rgba) -> Self {
        let layout = controller.layout();
        let catalog = controller.catalog();
        let tiles = layout
            .placements(catalog.len())
            .into_iter()
            .filter_map(|cell| {
                let tile = catalog.get(cell.index)?;
                Some(TileSprite {
                    index: cell.index,
                    title: tile.title.clone(),
                    icon_path: tile.icon_path.clone(),
                    left: cell.left,
                    top: cell.top,
                    cell_size: layout.cell_size,
                })
            })
            .collect();
        Self {
            viewport: (layout.viewport_width, layout.viewport_height),
            dim,
            tiles,
        }
    }
}

//! Grid geometry shared by the render pass and the hit tester.
//!
//! Everything in here is pure: the same inputs always produce the same
//! [`GridLayout`], so it is recomputed freely on every resize or reload.

/// Fixed tile size and the spacing between tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub cell_size: u32,
    pub spacing: u32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            cell_size: 96,
            spacing: 96,
        }
    }
}

impl GridSpec {
    /// Size of the repeating grid unit.
    pub fn padded_cell_size(&self) -> u32 {
        self.cell_size.saturating_add(self.spacing)
    }
}

/// Top-left corner of a tile's cell in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub index: usize,
    pub column: u32,
    pub row: u32,
    pub left: u32,
    pub top: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridLayout {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub cell_size: u32,
    pub spacing: u32,
    pub padded_cell_size: u32,
    pub columns: u32,
    pub rows: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

/// Centering margin along one axis. The spacing is counted as also due on the
/// outer edge of the grid, and the halving truncates like a right shift.
fn axis_offset(dimension: u32, spacing: u32, count: u32, padded: u32) -> u32 {
    let used = u64::from(count) * u64::from(padded);
    let free = (u64::from(dimension) + u64::from(spacing)).saturating_sub(used);
    (free >> 1) as u32
}

impl GridLayout {
    pub fn compute(viewport_width: u32, viewport_height: u32, grid: GridSpec) -> Self {
        let padded = grid.padded_cell_size();
        let (columns, rows) = if padded == 0 {
            (0, 0)
        } else {
            (viewport_width / padded, viewport_height / padded)
        };
        Self {
            viewport_width,
            viewport_height,
            cell_size: grid.cell_size,
            spacing: grid.spacing,
            padded_cell_size: padded,
            columns,
            rows,
            offset_x: axis_offset(viewport_width, grid.spacing, columns, padded),
            offset_y: axis_offset(viewport_height, grid.spacing, rows, padded),
        }
    }

    /// True when not even one cell fits horizontally or vertically.
    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// Number of cells that fit on screen.
    pub fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Row-major cell for `index`. `None` when the grid has no columns.
    pub fn cell_position(&self, index: usize) -> Option<CellPosition> {
        if self.columns == 0 {
            return None;
        }
        let columns = self.columns as usize;
        let column = index % columns;
        let row = (index - column) / columns;
        let column = column as u32;
        let row = u32::try_from(row).ok()?;
        Some(CellPosition {
            index,
            column,
            row,
            left: self.offset_x + column * self.padded_cell_size,
            top: self
                .offset_y
                .checked_add(row.checked_mul(self.padded_cell_size)?)?,
        })
    }

    /// Center of the icon square of `index`.
    pub fn cell_center(&self, index: usize) -> Option<(u32, u32)> {
        self.cell_position(index)
            .map(|cell| (cell.left + self.cell_size / 2, cell.top + self.cell_size / 2))
    }

    /// Cells for the first `count` tiles. Tiles past [`GridLayout::capacity`]
    /// would land below the viewport and are not placed.
    pub fn placements(&self, count: usize) -> Vec<CellPosition> {
        let placed = count.min(self.capacity());
        (0..placed)
            .filter_map(|index| self.cell_position(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_hd_with_default_grid() {
        let layout = GridLayout::compute(1920, 1080, GridSpec::default());
        assert_eq!(layout.padded_cell_size, 192);
        assert_eq!(layout.columns, 10);
        assert_eq!(layout.rows, 5);
        assert_eq!(layout.offset_x, 48);
        assert_eq!(layout.offset_y, 48);
    }

    #[test]
    fn odd_leftover_truncates_offset() {
        // (1001 + 10 - 9 * 110) / 2 = 21 / 2 = 10
        let layout = GridLayout::compute(1001, 500, GridSpec { cell_size: 100, spacing: 10 });
        assert_eq!(layout.columns, 9);
        assert_eq!(layout.offset_x, 10);
    }

    #[test]
    fn narrow_viewport_places_nothing() {
        let layout = GridLayout::compute(150, 1080, GridSpec::default());
        assert_eq!(layout.columns, 0);
        assert!(layout.is_empty());
        assert!(layout.cell_position(0).is_none());
        assert!(layout.placements(5).is_empty());
    }

    #[test]
    fn zero_sized_grid_does_not_divide_by_zero() {
        let layout = GridLayout::compute(800, 600, GridSpec { cell_size: 0, spacing: 0 });
        assert_eq!((layout.columns, layout.rows), (0, 0));
        assert!(layout.placements(3).is_empty());
    }

    #[test]
    fn cells_are_row_major() {
        let layout = GridLayout::compute(1920, 1080, GridSpec::default());
        let cell = layout.cell_position(12).unwrap();
        assert_eq!((cell.column, cell.row), (2, 1));
        assert_eq!((cell.left, cell.top), (48 + 2 * 192, 48 + 192));
    }

    #[test]
    fn placements_stop_at_capacity() {
        let layout = GridLayout::compute(1920, 1080, GridSpec::default());
        assert_eq!(layout.placements(3).len(), 3);
        assert_eq!(layout.placements(120).len(), 50);
    }

    #[test]
    fn cells_stay_inside_centered_margins() {
        let grids = [
            GridSpec::default(),
            GridSpec { cell_size: 64, spacing: 16 },
            GridSpec { cell_size: 48, spacing: 7 },
        ];
        for grid in grids {
            for (w, h) in [(1920, 1080), (1366, 768), (2561, 1439), (800, 601), (0, 0)] {
                let layout = GridLayout::compute(w, h, grid);
                assert_eq!(layout, GridLayout::compute(w, h, grid));
                assert!(layout.offset_x <= w / 2 + grid.spacing);
                for cell in layout.placements(layout.capacity()) {
                    assert!(cell.left >= layout.offset_x);
                    assert!(cell.top >= layout.offset_y);
                    assert!(cell.left + grid.cell_size <= w - layout.offset_x);
                    assert!(cell.top + grid.cell_size <= h - layout.offset_y);
                }
            }
        }
    }
}

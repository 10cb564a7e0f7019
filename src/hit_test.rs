use crate::layout::GridLayout;

/// Height of the label strip under each icon that still counts as part of the
/// tile when clicked.
pub const LABEL_BAND: u32 = 16;

/// Resolve the tile under `(x, y)`.
///
/// Margins, gutters between cells and indices past `tile_count` all resolve
/// to `None`. Every check is applied to every point, so the result does not
/// depend on which test would have rejected it first.
pub fn hit_test(x: i32, y: i32, layout: &GridLayout, tile_count: usize) -> Option<usize> {
    if layout.columns == 0 || layout.padded_cell_size == 0 || tile_count == 0 {
        return None;
    }
    let (x, y) = (i64::from(x), i64::from(y));
    let offset_x = i64::from(layout.offset_x);
    let offset_y = i64::from(layout.offset_y);
    let padded = i64::from(layout.padded_cell_size);
    let cell = i64::from(layout.cell_size);

    if x < offset_x || x > i64::from(layout.viewport_width) - offset_x {
        return None;
    }
    if y < offset_y || y > i64::from(layout.viewport_height) - offset_y {
        return None;
    }

    let local_x = (x - offset_x) % padded;
    if local_x > cell {
        return None;
    }
    let local_y = (y - offset_y) % padded;
    if local_y > cell + i64::from(LABEL_BAND) {
        return None;
    }

    let column = ((x - offset_x) - local_x) / padded;
    let row = ((y - offset_y) - local_y) / padded;
    let index = row * i64::from(layout.columns) + column;
    if index < 0 || index >= tile_count as i64 {
        return None;
    }
    Some(index as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GridSpec;

    fn full_hd() -> GridLayout {
        GridLayout::compute(1920, 1080, GridSpec::default())
    }

    #[test]
    fn click_in_first_cell_resolves_to_zero() {
        assert_eq!(hit_test(144, 144, &full_hd(), 10), Some(0));
        assert_eq!(hit_test(48, 48, &full_hd(), 10), Some(0));
    }

    #[test]
    fn margins_are_rejected() {
        let layout = full_hd();
        assert_eq!(hit_test(47, 100, &layout, 50), None);
        assert_eq!(hit_test(100, 47, &layout, 50), None);
        assert_eq!(hit_test(-5, -5, &layout, 50), None);
        assert_eq!(hit_test(1900, 100, &layout, 50), None);
    }

    #[test]
    fn horizontal_gutter_is_rejected() {
        let layout = full_hd();
        // last pixel of the icon still hits, the first gutter pixel does not
        assert_eq!(hit_test(48 + 96, 100, &layout, 50), Some(0));
        assert_eq!(hit_test(48 + 97, 100, &layout, 50), None);
        assert_eq!(hit_test(48 + 192 - 1, 100, &layout, 50), None);
        assert_eq!(hit_test(48 + 192, 100, &layout, 50), Some(1));
    }

    #[test]
    fn label_band_counts_as_tile() {
        let layout = full_hd();
        assert_eq!(hit_test(100, 48 + 96 + 16, &layout, 50), Some(0));
        assert_eq!(hit_test(100, 48 + 96 + 17, &layout, 50), None);
        assert_eq!(hit_test(100, 48 + 192 + 10, &layout, 50), Some(10));
    }

    #[test]
    fn index_past_catalog_is_rejected() {
        let layout = full_hd();
        assert_eq!(hit_test(48 + 192 * 3 + 10, 60, &layout, 3), None);
        assert_eq!(hit_test(48 + 192 * 2 + 10, 60, &layout, 3), Some(2));
    }

    #[test]
    fn empty_grid_never_hits() {
        let layout = GridLayout::compute(100, 100, GridSpec::default());
        for x in (-10..110).step_by(7) {
            for y in (-10..110).step_by(7) {
                assert_eq!(hit_test(x, y, &layout, 4), None);
            }
        }
    }
}

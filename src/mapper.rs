// src/mapper.rs

//! Pure geometry: translating between screen/pointer coordinates and grid
//! cell coordinates under the current pan offset and zoom scale.

/// A 2D cell coordinate in the grid, (column, row), 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

/// The view's pan offset and zoom scale.
///
/// `pan` is mutated only by the gesture controller during an active drag;
/// `zoom` only by the external slider. Both live exactly as long as one
/// mounted view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub pan: (f64, f64),
    pub zoom: f64,
}

impl ViewTransform {
    pub fn new(zoom: f64) -> Self {
        ViewTransform {
            pan: (0.0, 0.0),
            zoom,
        }
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        ViewTransform::new(1.0)
    }
}

/// Maps a pointer position to a (possibly out-of-bounds) cell coordinate.
///
/// Subtract the canvas origin and the pan offset, divide by the zoom scale,
/// divide by the cell size, floor. The result is signed: callers reject
/// out-of-bounds values, except the admin rectangle-end path which clamps
/// negative components to 0.
pub fn screen_to_cell(
    pointer: (f64, f64),
    origin: (f64, f64),
    transform: &ViewTransform,
    cell_size_px: u32,
) -> (i64, i64) {
    let local_x = (pointer.0 - origin.0 - transform.pan.0) / transform.zoom;
    let local_y = (pointer.1 - origin.1 - transform.pan.1) / transform.zoom;
    (
        (local_x / cell_size_px as f64).floor() as i64,
        (local_y / cell_size_px as f64).floor() as i64,
    )
}

/// The screen position of a cell's top-left corner. Exact inverse of
/// `screen_to_cell` so bounds checks cannot disagree at cell seams.
pub fn cell_to_screen(
    cell: Point,
    origin: (f64, f64),
    transform: &ViewTransform,
    cell_size_px: u32,
) -> (f64, f64) {
    (
        cell.x as f64 * cell_size_px as f64 * transform.zoom + transform.pan.0 + origin.0,
        cell.y as f64 * cell_size_px as f64 * transform.zoom + transform.pan.1 + origin.1,
    )
}

/// The zoom scale at which the grid initially fits the viewport: the smaller
/// of 90% of the viewport width and 70% of the viewport height (the rest is
/// reserved for the toolbars), each divided by the grid's pixel dimension.
pub fn fit_zoom(grid_w_px: f64, grid_h_px: f64, viewport_w: f64, viewport_h: f64) -> f64 {
    let by_width = 0.9 * viewport_w / grid_w_px;
    let by_height = 0.7 * viewport_h / grid_h_px;
    by_width.min(by_height)
}

/// The zoom slider bounds for a given fit scale.
pub fn zoom_range(fit: f64) -> (f64, f64) {
    (fit, fit * 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: u32 = 10;

    #[test]
    fn roundtrip_holds_for_in_bounds_cells() {
        let origin = (37.0, 12.5);
        for &zoom in &[0.25, 0.5, 1.0, 1.37, 2.0, 3.0] {
            let transform = ViewTransform {
                pan: (-14.0, 9.0),
                zoom,
            };
            for y in 0..40 {
                for x in 0..40 {
                    let cell = Point { x, y };
                    let screen = cell_to_screen(cell, origin, &transform, CELL);
                    let (cx, cy) = screen_to_cell(screen, origin, &transform, CELL);
                    assert_eq!(
                        (cx, cy),
                        (x as i64, y as i64),
                        "roundtrip failed at ({}, {}) zoom {}",
                        x,
                        y,
                        zoom
                    );
                }
            }
        }
    }

    #[test]
    fn interior_points_map_to_the_same_cell() {
        let transform = ViewTransform::new(2.0);
        let origin = (0.0, 0.0);
        // Anywhere strictly inside cell (3, 4) at zoom 2 and cell size 10:
        // x in [60, 80), y in [80, 100).
        assert_eq!(
            screen_to_cell((60.0, 80.0), origin, &transform, CELL),
            (3, 4)
        );
        assert_eq!(
            screen_to_cell((79.9, 99.9), origin, &transform, CELL),
            (3, 4)
        );
        assert_eq!(
            screen_to_cell((80.0, 100.0), origin, &transform, CELL),
            (4, 5)
        );
    }

    #[test]
    fn left_of_origin_goes_negative() {
        let transform = ViewTransform::new(1.0);
        let (cx, cy) = screen_to_cell((-1.0, -25.0), (0.0, 0.0), &transform, CELL);
        assert_eq!((cx, cy), (-1, -3));
    }

    #[test]
    fn pan_shifts_the_mapping() {
        let transform = ViewTransform {
            pan: (20.0, 0.0),
            zoom: 1.0,
        };
        // Pointer at x=25 with a 20px pan lands in cell 0, not cell 2.
        assert_eq!(
            screen_to_cell((25.0, 5.0), (0.0, 0.0), &transform, CELL),
            (0, 0)
        );
    }

    #[test]
    fn fit_zoom_picks_the_tighter_axis() {
        // Wide viewport: constrained by the 70% height budget.
        let z = fit_zoom(800.0, 800.0, 10_000.0, 1000.0);
        assert!((z - 0.875).abs() < 1e-9);
        // Narrow viewport: constrained by the 90% width budget.
        let z = fit_zoom(800.0, 800.0, 400.0, 10_000.0);
        assert!((z - 0.45).abs() < 1e-9);
    }

    #[test]
    fn zoom_range_spans_triple_the_fit() {
        let (lo, hi) = zoom_range(0.5);
        assert_eq!(lo, 0.5);
        assert_eq!(hi, 1.5);
    }
}

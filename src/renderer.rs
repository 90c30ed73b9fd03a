// src/renderer.rs

//! The `CanvasRenderer` translates grid state into fill commands against a
//! `Surface`.
//!
//! It is backend-agnostic: it contains no platform drawing code and relies on
//! the `Surface` trait for its primitives. It owns the three drawing policies
//! of the view: the full-grid repaint, the single-cell pending overlay with
//! its border highlight, and the admin whitening preview with its packed-unit
//! alignment rule.

use crate::codec::Grid;
use crate::color::Rgb;
use crate::config::Config;
use crate::mapper::Point;
use crate::surface::{PixelRect, Surface};

use anyhow::Result;
use log::trace;

const BORDER_WIDTH_PX: u32 = 1;

/// Stateless beyond its configuration; every call renders from scratch.
pub struct CanvasRenderer {
    cell_size_px: u32,
    border_tone: Rgb,
    background: Rgb,
}

impl CanvasRenderer {
    pub fn new(config: &Config) -> Self {
        CanvasRenderer {
            cell_size_px: config.appearance.cell_size_px,
            border_tone: config.appearance.pending_border,
            background: config.appearance.background,
        }
    }

    pub fn cell_size_px(&self) -> u32 {
        self.cell_size_px
    }

    fn cell_rect(&self, x: u32, y: u32) -> PixelRect {
        let cs = self.cell_size_px;
        PixelRect {
            x: x * cs,
            y: y * cs,
            width: cs,
            height: cs,
        }
    }

    /// Clears the surface and fills every cell with its decoded color.
    ///
    /// Idempotent and safe to call repeatedly without accumulating artifacts;
    /// a zero-sized grid renders nothing.
    pub fn full_repaint(&self, grid: &Grid, surface: &mut dyn Surface) -> Result<()> {
        if grid.width() == 0 || grid.height() == 0 {
            return Ok(());
        }
        trace!(
            "renderer: full repaint of {}x{} grid",
            grid.width(),
            grid.height()
        );
        surface.clear_all(self.background)?;
        for (x, y, color) in grid.iter_cells() {
            surface.fill_rect(self.cell_rect(x as u32, y as u32), color.rgb())?;
        }
        surface.present()
    }

    /// Fills one cell; with `with_border`, overlays a 1 px frame in the fixed
    /// neutral tone.
    ///
    /// The frame is drawn as a second color pass of four edge strips, not a
    /// stroke primitive, so it sits inside the cell and never overlaps
    /// neighbors.
    pub fn paint_cell(
        &self,
        cell: Point,
        color: Rgb,
        with_border: bool,
        surface: &mut dyn Surface,
    ) -> Result<()> {
        let cs = self.cell_size_px;
        let rect = self.cell_rect(cell.x as u32, cell.y as u32);
        surface.fill_rect(rect, color)?;

        if with_border {
            let (px, py) = (rect.x, rect.y);
            let lw = BORDER_WIDTH_PX;
            let strips = [
                PixelRect { x: px, y: py, width: cs, height: lw }, // top
                PixelRect { x: px, y: py + cs - lw, width: cs, height: lw }, // bottom
                PixelRect { x: px, y: py, width: lw, height: cs }, // left
                PixelRect { x: px + cs - lw, y: py, width: lw, height: cs }, // right
            ];
            for strip in strips {
                surface.fill_rect(strip, self.border_tone)?;
            }
        }
        surface.present()
    }

    /// Fills the normalized selection rectangle, snapped to the server's
    /// 2-cell packed addressing unit on the horizontal axis.
    ///
    /// The parity table must match what the whitening endpoint actually
    /// clears; the vertical axis has no alignment constraint. Do not
    /// "simplify" the asymmetry.
    pub fn fill_selection(
        &self,
        x_min: u32,
        y_min: u32,
        x_max: u32,
        y_max: u32,
        color: Rgb,
        surface: &mut dyn Surface,
    ) -> Result<()> {
        let (col_start, col_end) = match (x_min % 2, x_max % 2) {
            (0, 0) => (x_min, x_max + 2),
            (1, 1) => (x_min - 1, x_max + 1),
            (1, 0) => (x_min - 1, x_max + 1),
            _ => (x_min, x_max + 1),
        };
        let cs = self.cell_size_px;
        let rect = PixelRect {
            x: col_start * cs,
            y: y_min * cs,
            width: (col_end - col_start) * cs,
            height: (y_max + 1 - y_min) * cs,
        };
        trace!(
            "renderer: selection preview cells ({},{})..({},{}) -> columns [{}, {})",
            x_min,
            y_min,
            x_max,
            y_max,
            col_start,
            col_end
        );
        surface.fill_rect(rect, color)?;
        surface.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::color::PaletteColor;
    use crate::surface::mock::{MockSurface, SurfaceOp};

    fn renderer() -> CanvasRenderer {
        CanvasRenderer::new(&Config::default())
    }

    #[test]
    fn full_repaint_clears_then_fills_every_cell() {
        let grid = codec::decode("0123", 2, 2);
        let mut surface = MockSurface::new(20, 20);
        renderer().full_repaint(&grid, &mut surface).unwrap();

        assert!(matches!(surface.ops[0], SurfaceOp::Clear(_)));
        assert_eq!(surface.fills().len(), 4);
        assert_eq!(*surface.ops.last().unwrap(), SurfaceOp::Present);
        // Cell (1, 1) is palette index 3 at (10, 10)..(20, 20).
        let (rect, color) = surface.last_fill_at(15, 15).unwrap();
        assert_eq!(rect, PixelRect { x: 10, y: 10, width: 10, height: 10 });
        assert_eq!(color, PaletteColor::Black.rgb());
    }

    #[test]
    fn full_repaint_is_idempotent() {
        let grid = codec::decode("0123", 2, 2);
        let mut first = MockSurface::new(20, 20);
        let mut second = MockSurface::new(20, 20);
        let r = renderer();
        r.full_repaint(&grid, &mut first).unwrap();
        r.full_repaint(&grid, &mut second).unwrap();
        r.full_repaint(&grid, &mut second).unwrap();
        assert_eq!(second.ops[..first.ops.len()], first.ops[..]);
        assert_eq!(second.ops[first.ops.len()..], first.ops[..]);
    }

    #[test]
    fn zero_sized_grid_renders_nothing() {
        let grid = codec::decode("", 0, 0);
        let mut surface = MockSurface::new(0, 0);
        renderer().full_repaint(&grid, &mut surface).unwrap();
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn paint_cell_with_border_adds_four_inner_strips() {
        let mut surface = MockSurface::new(100, 100);
        let color = PaletteColor::Red.rgb();
        renderer()
            .paint_cell(Point { x: 2, y: 3 }, color, true, &mut surface)
            .unwrap();

        let fills = surface.fills();
        assert_eq!(fills.len(), 5);
        assert_eq!(
            fills[0],
            (PixelRect { x: 20, y: 30, width: 10, height: 10 }, color)
        );
        let tone = Rgb(0x55, 0x55, 0x55);
        assert_eq!(fills[1], (PixelRect { x: 20, y: 30, width: 10, height: 1 }, tone));
        assert_eq!(fills[2], (PixelRect { x: 20, y: 39, width: 10, height: 1 }, tone));
        assert_eq!(fills[3], (PixelRect { x: 20, y: 30, width: 1, height: 10 }, tone));
        assert_eq!(fills[4], (PixelRect { x: 29, y: 30, width: 1, height: 10 }, tone));
    }

    #[test]
    fn paint_cell_without_border_is_a_single_fill() {
        let mut surface = MockSurface::new(100, 100);
        renderer()
            .paint_cell(Point { x: 0, y: 0 }, PaletteColor::Blue.rgb(), false, &mut surface)
            .unwrap();
        assert_eq!(surface.fills().len(), 1);
    }

    /// Columns covered by the preview for each parity combination, with the
    /// fixed single-row vertical extent.
    #[test]
    fn selection_alignment_parity_table() {
        let cases = [
            // (x_min, x_max, expected first column, expected exclusive end)
            (2u32, 4u32, 2u32, 6u32), // even, even: pad one unit right
            (3, 5, 2, 6),             // odd, odd
            (3, 4, 2, 5),             // odd, even
            (2, 5, 2, 6),             // even, odd
        ];
        let r = renderer();
        for (x_min, x_max, col_start, col_end) in cases {
            let mut surface = MockSurface::new(200, 200);
            r.fill_selection(x_min, 0, x_max, 0, Rgb(0xFF, 0xFF, 0xFF), &mut surface)
                .unwrap();
            let fills = surface.fills();
            assert_eq!(fills.len(), 1, "case ({}, {})", x_min, x_max);
            let (rect, _) = fills[0];
            assert_eq!(
                rect,
                PixelRect {
                    x: col_start * 10,
                    y: 0,
                    width: (col_end - col_start) * 10,
                    height: 10,
                },
                "case ({}, {})",
                x_min,
                x_max
            );
        }
    }

    #[test]
    fn selection_vertical_extent_is_unpadded() {
        let mut surface = MockSurface::new(200, 200);
        renderer()
            .fill_selection(2, 3, 4, 7, Rgb(0xFF, 0xFF, 0xFF), &mut surface)
            .unwrap();
        let (rect, _) = surface.fills()[0];
        assert_eq!(rect.y, 30);
        assert_eq!(rect.height, 50); // rows [3, 8)
    }
}

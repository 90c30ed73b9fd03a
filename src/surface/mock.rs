// src/surface/mock.rs

use crate::color::Rgb;
use crate::surface::{PixelRect, Surface};
use anyhow::Result;

/// Drawing operations recorded by `MockSurface`, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceOp {
    Clear(Rgb),
    Fill(PixelRect, Rgb),
    Present,
}

/// Test double that records every drawing call instead of painting.
pub struct MockSurface {
    width_px: u32,
    height_px: u32,
    pub ops: Vec<SurfaceOp>,
}

impl MockSurface {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        MockSurface {
            width_px,
            height_px,
            ops: Vec::new(),
        }
    }

    /// Only the fill operations, in call order.
    pub fn fills(&self) -> Vec<(PixelRect, Rgb)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Fill(rect, color) => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    /// The most recent fill covering the pixel `(x, y)`.
    pub fn last_fill_at(&self, x: u32, y: u32) -> Option<(PixelRect, Rgb)> {
        self.fills()
            .into_iter()
            .rev()
            .find(|(r, _)| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height)
    }

    pub fn clear_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Clear(_)))
            .count()
    }
}

impl Surface for MockSurface {
    fn dimensions_px(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    fn clear_all(&mut self, color: Rgb) -> Result<()> {
        self.ops.push(SurfaceOp::Clear(color));
        Ok(())
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) -> Result<()> {
        self.ops.push(SurfaceOp::Fill(rect, color));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.ops.push(SurfaceOp::Present);
        Ok(())
    }
}

// src/surface/mod.rs

//! Defines the `Surface` trait (the drawing surface the renderer paints
//! into) and common pixel-space types. Concrete implementations live in
//! sub-modules; the surface is the single mutable pixel resource and only
//! the renderer writes to it.

use crate::color::Rgb;
use anyhow::Result;

pub mod console;
#[cfg(test)]
pub mod mock;

pub use console::ConsoleSurface;

/// A rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Abstract drawing surface.
///
/// Implementations own the actual pixels (a browser canvas, an ANSI console
/// framebuffer, a test recorder). All operations are fallible because real
/// surfaces can lose their backing store between calls.
pub trait Surface {
    /// The surface size in pixels (grid width/height times the cell size).
    fn dimensions_px(&self) -> (u32, u32);

    /// Fills the whole surface with one color.
    fn clear_all(&mut self, color: Rgb) -> Result<()>;

    /// Fills a rectangle, clipped to the surface bounds.
    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) -> Result<()>;

    /// Flushes pending drawing to the display.
    fn present(&mut self) -> Result<()>;
}

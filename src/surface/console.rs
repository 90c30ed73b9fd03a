// src/surface/console.rs

//! A `Surface` implementation that renders to a Unix console with ANSI
//! truecolor escape codes. Used by the spectator binary and handy for
//! debugging without a graphical host.

use crate::color::Rgb;
use crate::surface::{PixelRect, Surface};

use anyhow::{Context, Result};
use log::trace;
use std::io::{self, Write};

const SGR_BG_TRUECOLOR: &str = "\x1b[48;2;"; // followed by "r;g;bm"
const SGR_RESET: &str = "\x1b[0m";

/// Console-backed pixel framebuffer.
///
/// Pixels are kept at full resolution; `present` samples one pixel per grid
/// cell (the cell center) and prints it as a two-column colored block, so the
/// console output has one block per cell regardless of the configured cell
/// size.
pub struct ConsoleSurface {
    width_px: u32,
    height_px: u32,
    cell_size_px: u32,
    framebuffer: Vec<Rgb>,
}

impl ConsoleSurface {
    pub fn new(width_px: u32, height_px: u32, cell_size_px: u32) -> Self {
        ConsoleSurface {
            width_px,
            height_px,
            cell_size_px: cell_size_px.max(1),
            framebuffer: vec![Rgb::default(); (width_px * height_px) as usize],
        }
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb {
        self.framebuffer[(y * self.width_px + x) as usize]
    }

    fn write_frame(&self, out: &mut impl Write) -> io::Result<()> {
        let cs = self.cell_size_px;
        let cells_w = self.width_px / cs;
        let cells_h = self.height_px / cs;

        for cy in 0..cells_h {
            for cx in 0..cells_w {
                // Sample the cell center so 1px overlays (borders) do not
                // change the block color.
                let px = cx * cs + cs / 2;
                let py = cy * cs + cs / 2;
                let Rgb(r, g, b) = self.pixel_at(px, py);
                write!(out, "{}{};{};{}m  ", SGR_BG_TRUECOLOR, r, g, b)?;
            }
            writeln!(out, "{}", SGR_RESET)?;
        }
        Ok(())
    }
}

impl Surface for ConsoleSurface {
    fn dimensions_px(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    fn clear_all(&mut self, color: Rgb) -> Result<()> {
        self.framebuffer.fill(color);
        Ok(())
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) -> Result<()> {
        trace!("console surface: fill {:?} with {}", rect, color);
        let x_end = (rect.x + rect.width).min(self.width_px);
        let y_end = (rect.y + rect.height).min(self.height_px);
        for y in rect.y.min(self.height_px)..y_end {
            let row = (y * self.width_px) as usize;
            for x in rect.x.min(self.width_px)..x_end {
                self.framebuffer[row + x as usize] = color;
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = io::BufWriter::new(stdout.lock());
        self.write_frame(&mut out)
            .and_then(|()| out.flush())
            .context("failed to write frame to stdout")
    }
}

// src/codec.rs

//! Decodes the grid-state wire representation into a per-cell color grid.
//!
//! The wire format is a contract with the state endpoint: one hex digit per
//! cell, row-major, no separators. Decoding is tolerant: a bad or missing
//! digit costs that one cell (it stays at the palette default), never the
//! whole grid.

use crate::color::PaletteColor;
use log::warn;

/// A decoded grid: `width * height` palette colors, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<PaletteColor>,
}

impl Grid {
    /// An all-default grid of the given dimensions.
    pub fn blank(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![PaletteColor::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The color of cell `(x, y)`. `None` when the coordinate is out of bounds.
    pub fn color_at(&self, x: usize, y: usize) -> Option<PaletteColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// Iterates all cells as `(x, y, color)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, PaletteColor)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i % self.width, i / self.width, c))
    }
}

/// Decodes a grid-state string into a `Grid`.
///
/// Cells are read row-major: cell `(x, y)` comes from `state[y * width + x]`.
/// A character that is not a hex digit, or an index past the end of the
/// string (length mismatch), is logged with the cell coordinates and the raw
/// value and leaves that cell at the palette default. Decoding never fails
/// and is idempotent for a given input.
pub fn decode(state: &str, width: usize, height: usize) -> Grid {
    let mut grid = Grid::blank(width, height);
    let bytes = state.as_bytes();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            match bytes.get(idx) {
                Some(&b) => match PaletteColor::from_code(b as char) {
                    Ok(color) => grid.cells[idx] = color,
                    Err(_) => {
                        warn!(
                            "grid decode: invalid state digit {:?} for cell ({}, {})",
                            b as char, x, y
                        );
                    }
                },
                None => {
                    warn!(
                        "grid decode: state string too short ({} chars) for cell ({}, {})",
                        bytes.len(),
                        x,
                        y
                    );
                }
            }
        }
    }

    grid
}

// src/selection.rs

//! The two-corner rectangle an administrator marks for bulk clearing.

use log::debug;

/// A committed rectangle, corners normalized so `start <= end` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCorners {
    pub start: (u32, u32),
    pub end: (u32, u32),
}

/// Admin-mode rectangle selection state.
///
/// `start` is set on pointer-down inside the grid bounds; the rectangle is
/// completed on pointer-up, at which point both corners are normalized.
/// Cleared explicitly by an external reset action or once an upload completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRect {
    start: Option<(u32, u32)>,
    end: Option<(u32, u32)>,
}

impl SelectionRect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a selection at the pressed cell. The caller has already
    /// verified the cell is inside the grid.
    pub fn begin(&mut self, x: u32, y: u32) {
        self.start = Some((x, y));
        self.end = None;
        debug!("selection: started at ({}, {})", x, y);
    }

    /// Completes the selection from a released cell coordinate.
    ///
    /// Negative components are clamped to 0 (a release past the top/left edge
    /// still yields a valid rectangle); a release at or past the right/bottom
    /// edge aborts the commit without clearing `start`. Completing with no
    /// start corner set is a caller-input error and also returns `None`.
    /// On success both corners are normalized, stored, and returned.
    pub fn finish(
        &mut self,
        raw_x: i64,
        raw_y: i64,
        grid_width: u32,
        grid_height: u32,
    ) -> Option<SelectionCorners> {
        let Some((sx, sy)) = self.start else {
            debug!("selection: finish with no start corner, rejecting");
            return None;
        };

        let ex = raw_x.max(0) as u64;
        let ey = raw_y.max(0) as u64;
        if ex >= grid_width as u64 || ey >= grid_height as u64 {
            debug!(
                "selection: release at ({}, {}) outside {}x{} grid, keeping start",
                raw_x, raw_y, grid_width, grid_height
            );
            return None;
        }
        let (ex, ey) = (ex as u32, ey as u32);

        let corners = SelectionCorners {
            start: (sx.min(ex), sy.min(ey)),
            end: (sx.max(ex), sy.max(ey)),
        };
        self.start = Some(corners.start);
        self.end = Some(corners.end);
        debug!(
            "selection: committed {:?} -> {:?}",
            corners.start, corners.end
        );
        Some(corners)
    }

    /// The committed rectangle, if both corners are set.
    pub fn corners(&self) -> Option<SelectionCorners> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(SelectionCorners { start, end }),
            _ => None,
        }
    }

    pub fn has_start(&self) -> bool {
        self.start.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Resets both corners (external reset action or completed upload).
    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
        debug!("selection: cleared");
    }
}

// src/orchestrator.rs

//! Wires pointer events to the gesture controller, forwards committed
//! actions (single-pixel paint, rectangle selection) to the external
//! collaborator, and repaints when the authoritative grid state changes.
//!
//! One orchestrator instance owns the whole interaction state of one mounted
//! view: view transform, gesture phase, pending edit and selection. The
//! surface and the event sink are borrowed trait objects so hosts and tests
//! can supply their own implementations.

use crate::codec::{self, Grid};
use crate::color::PaletteColor;
use crate::config::Config;
use crate::gesture::{GestureController, GestureEnd, PointerButton, PointerEvent};
use crate::mapper::{self, Point, ViewTransform};
use crate::renderer::CanvasRenderer;
use crate::selection::SelectionRect;
use crate::surface::Surface;

use anyhow::Result;
use log::debug;

/// What kind of view this orchestrator drives.
///
/// One controller, one state machine definition; mode-specific gesture
/// handling is dispatched from here instead of scattering conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Painting view: click chooses a cell, drag pans.
    Normal,
    /// Whitening view: the pointer marks a rectangle, no panning.
    Admin,
    /// Spectator view: pointer events are ignored.
    ReadOnly,
}

/// Callbacks into the external collaborator that persists edits.
///
/// The orchestrator never performs network I/O itself; these are its only
/// behavioral outputs besides the rendered surface.
pub trait EventSink {
    /// A confirmed (non-drag) click chose this cell. Normal mode only.
    fn cell_chosen(&mut self, x: u32, y: u32);
    /// Normalized top-left corner of a committed selection. Admin mode only.
    fn selection_start(&mut self, x: u32, y: u32);
    /// Normalized bottom-right corner of a committed selection. Admin mode only.
    fn selection_end(&mut self, x: u32, y: u32);
}

/// The optimistic local overlay: at most one unconfirmed cell edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingEdit {
    cell: Point,
    /// Authoritative color to restore before staging a different cell.
    prior: PaletteColor,
}

pub struct CanvasOrchestrator<'a> {
    mode: Mode,
    grid: Option<Grid>,
    transform: ViewTransform,
    origin: (f64, f64),
    gesture: GestureController,
    renderer: CanvasRenderer,
    selection: SelectionRect,
    pending: Option<PendingEdit>,
    active_color: PaletteColor,
    surface: &'a mut dyn Surface,
    sink: &'a mut dyn EventSink,
}

impl<'a> CanvasOrchestrator<'a> {
    pub fn new(
        mode: Mode,
        config: &Config,
        surface: &'a mut dyn Surface,
        sink: &'a mut dyn EventSink,
    ) -> Self {
        CanvasOrchestrator {
            mode,
            grid: None,
            transform: ViewTransform::default(),
            origin: (0.0, 0.0),
            gesture: GestureController::new(config.behavior.drag_threshold_px),
            renderer: CanvasRenderer::new(config),
            selection: SelectionRect::new(),
            pending: None,
            active_color: PaletteColor::default(),
            surface,
            sink,
        }
    }

    /// Whether the view can render and take pointer input. False during the
    /// transient initial-load states (no grid yet, zero dimensions, zoom not
    /// set); those are skipped silently, not errors.
    fn ready(&self) -> bool {
        self.transform.zoom > 0.0
            && self
                .grid
                .as_ref()
                .is_some_and(|g| g.width() > 0 && g.height() > 0)
    }

    pub fn view_transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn selection(&self) -> &SelectionRect {
        &self.selection
    }

    /// The cell of the current pending edit, if any.
    pub fn pending_cell(&self) -> Option<Point> {
        self.pending.map(|p| p.cell)
    }

    /// Zoom scale, owned by the external slider.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.transform.zoom = zoom;
    }

    /// Top-left corner of the drawing surface in pointer-event coordinates.
    pub fn set_canvas_origin(&mut self, x: f64, y: f64) {
        self.origin = (x, y);
    }

    /// Replaces the authoritative grid state and repaints.
    ///
    /// Any pending edit and the last-clicked indicator are discarded: the
    /// decoded state is the source of truth from here on.
    pub fn set_grid_state(&mut self, state: &str, width: usize, height: usize) -> Result<()> {
        self.grid = Some(codec::decode(state, width, height));
        self.pending = None;
        self.repaint_if_ready()
    }

    /// Changes the paint color. A pending edit gets live feedback: its cell
    /// is repainted in the new color while still unconfirmed.
    pub fn set_active_color(&mut self, color: PaletteColor) -> Result<()> {
        self.active_color = color;
        if self.mode == Mode::Normal {
            if let Some(pending) = self.pending {
                if self.ready() {
                    self.renderer
                        .paint_cell(pending.cell, color.rgb(), true, self.surface)?;
                }
            }
        }
        Ok(())
    }

    /// Resets the selection rectangle and repaints so the whitening preview
    /// disappears. Called on the external reset action or once an upload
    /// completes.
    pub fn clear_selection(&mut self) -> Result<()> {
        self.selection.clear();
        self.repaint_if_ready()
    }

    /// Entry point for all pointer events from the host view.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Result<()> {
        if !self.ready() {
            return Ok(());
        }
        match self.mode {
            Mode::ReadOnly => Ok(()),
            Mode::Normal => self.handle_normal(event),
            Mode::Admin => self.handle_admin(event),
        }
    }

    fn repaint_if_ready(&mut self) -> Result<()> {
        if !self.ready() {
            return Ok(());
        }
        match self.grid.as_ref() {
            Some(grid) => self.renderer.full_repaint(grid, self.surface),
            None => Ok(()),
        }
    }

    /// The in-bounds cell under a pointer position, if any.
    fn cell_under(&self, pointer: (f64, f64)) -> Option<Point> {
        let grid = self.grid.as_ref()?;
        let (cx, cy) = mapper::screen_to_cell(
            pointer,
            self.origin,
            &self.transform,
            self.renderer.cell_size_px(),
        );
        if cx < 0 || cy < 0 || cx as usize >= grid.width() || cy as usize >= grid.height() {
            return None;
        }
        Some(Point {
            x: cx as usize,
            y: cy as usize,
        })
    }

    // --- Normal mode: click paints, drag pans -----------------------------

    fn handle_normal(&mut self, event: PointerEvent) -> Result<()> {
        match event {
            PointerEvent::Press { x, y, button } => {
                if button != PointerButton::Left {
                    return Ok(());
                }
                self.gesture.press((x, y), &self.transform);
                // Painting and potential-drag tracking begin together; the
                // gesture is only classified as a drag in retrospect.
                if let Some(cell) = self.cell_under((x, y)) {
                    self.stage_pending(cell)?;
                }
                Ok(())
            }
            PointerEvent::Move { x, y } => {
                self.gesture.motion((x, y), &mut self.transform);
                Ok(())
            }
            PointerEvent::Release { .. } | PointerEvent::Leave { .. } => {
                let end = match event {
                    PointerEvent::Leave { .. } => self.gesture.leave(),
                    _ => self.gesture.release(),
                };
                match end {
                    Some(GestureEnd::Click) => {
                        if let Some(pending) = self.pending {
                            debug!(
                                "orchestrator: committing click at ({}, {})",
                                pending.cell.x, pending.cell.y
                            );
                            self.sink
                                .cell_chosen(pending.cell.x as u32, pending.cell.y as u32);
                        }
                    }
                    // A pan: the paint candidate is discarded by never
                    // committing it. The optimistic overlay stays until the
                    // next grid refresh restores the authoritative state.
                    Some(GestureEnd::Pan) | None => {}
                }
                Ok(())
            }
        }
    }

    /// Stages the optimistic overlay for a pressed cell.
    ///
    /// At most one pending edit exists: a previously staged different cell is
    /// restored to its prior color first. Re-pressing the same cell keeps the
    /// original prior color.
    fn stage_pending(&mut self, cell: Point) -> Result<()> {
        if let Some(previous) = self.pending {
            if previous.cell != cell {
                self.renderer
                    .paint_cell(previous.cell, previous.prior.rgb(), false, self.surface)?;
            }
        }

        let prior = match self.pending {
            Some(previous) if previous.cell == cell => previous.prior,
            _ => self
                .grid
                .as_ref()
                .and_then(|g| g.color_at(cell.x, cell.y))
                .unwrap_or_default(),
        };

        self.pending = Some(PendingEdit { cell, prior });
        self.renderer
            .paint_cell(cell, self.active_color.rgb(), true, self.surface)
    }

    // --- Admin mode: two-corner selection, no panning ---------------------

    fn handle_admin(&mut self, event: PointerEvent) -> Result<()> {
        match event {
            PointerEvent::Press { x, y, button } => {
                if button != PointerButton::Left {
                    return Ok(());
                }
                if let Some(cell) = self.cell_under((x, y)) {
                    self.selection.begin(cell.x as u32, cell.y as u32);
                }
                Ok(())
            }
            PointerEvent::Move { .. } => Ok(()),
            PointerEvent::Release { x, y } | PointerEvent::Leave { x, y } => {
                if !self.selection.has_start() {
                    return Ok(());
                }
                let (grid_w, grid_h) = match self.grid.as_ref() {
                    Some(grid) => (grid.width() as u32, grid.height() as u32),
                    None => return Ok(()),
                };
                let (raw_x, raw_y) = mapper::screen_to_cell(
                    (x, y),
                    self.origin,
                    &self.transform,
                    self.renderer.cell_size_px(),
                );
                // An out-of-bounds release aborts the commit; `start` stays.
                let Some(corners) = self.selection.finish(raw_x, raw_y, grid_w, grid_h) else {
                    return Ok(());
                };
                self.sink.selection_start(corners.start.0, corners.start.1);
                self.sink.selection_end(corners.end.0, corners.end.1);
                // Preview the area the whitening upload will actually clear.
                self.renderer.fill_selection(
                    corners.start.0,
                    corners.start.1,
                    corners.end.0,
                    corners.end.1,
                    PaletteColor::White.rgb(),
                    self.surface,
                )
            }
        }
    }
}

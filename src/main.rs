// src/main.rs

// Declare modules
pub mod codec;
pub mod color;
pub mod config;
pub mod gesture;
pub mod mapper;
pub mod orchestrator;
pub mod renderer;
pub mod selection;
pub mod surface;

use crate::{
    config::CONFIG,
    orchestrator::{CanvasOrchestrator, EventSink, Mode},
    surface::ConsoleSurface,
};

use anyhow::Context;
use log::info;
use serde::Deserialize;

/// One grid snapshot as served by the state endpoint.
#[derive(Debug, Deserialize)]
struct GridSnapshot {
    width: usize,
    height: usize,
    state: String,
}

/// Spectator views never commit anything.
struct NullSink;

impl EventSink for NullSink {
    fn cell_chosen(&mut self, _x: u32, _y: u32) {}
    fn selection_start(&mut self, _x: u32, _y: u32) {}
    fn selection_end(&mut self, _x: u32, _y: u32) {}
}

fn read_snapshot() -> anyhow::Result<GridSnapshot> {
    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read snapshot file '{}'", path))?,
        None => {
            info!("No snapshot path given, reading from stdin.");
            std::io::read_to_string(std::io::stdin())
                .context("failed to read snapshot from stdin")?
        }
    };
    serde_json::from_str(&raw).context("snapshot is not a valid grid state document")
}

/// Entry point of the spectator viewer: reads one grid snapshot (JSON with
/// `width`, `height` and the hex-digit `state` string) and renders it to the
/// console.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting pixelwar canvas spectator view...");

    let snapshot = read_snapshot()?;
    info!(
        "Loaded {}x{} grid snapshot.",
        snapshot.width, snapshot.height
    );

    let cell_size = CONFIG.appearance.cell_size_px;
    let mut surface = ConsoleSurface::new(
        snapshot.width as u32 * cell_size,
        snapshot.height as u32 * cell_size,
        cell_size,
    );
    let mut sink = NullSink;
    let mut orchestrator =
        CanvasOrchestrator::new(Mode::ReadOnly, &CONFIG, &mut surface, &mut sink);
    orchestrator.set_zoom(1.0);
    orchestrator
        .set_grid_state(&snapshot.state, snapshot.width, snapshot.height)
        .context("failed to render the snapshot")?;

    Ok(())
}

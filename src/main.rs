use std::sync::Arc;

use anyhow::{Context, Result, ensure};
use eframe::egui;

use cube_lens::app::CubeLensApp;
use cube_lens::data::synth;

fn main() -> eframe::Result {
    env_logger::init();

    let (n_wl, ny, nx) = match demo_shape() {
        Ok(shape) => shape,
        Err(e) => {
            log::error!("invalid CUBE_LENS_DEMO_SHAPE, using default: {e:#}");
            (96, 64, 64)
        }
    };
    let cube = Arc::new(synth::emission_line_cube(n_wl, ny, nx));
    log::info!("generated demo cube with shape {:?}", cube.shape());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cube Lens – Linked Cube Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(CubeLensApp::new(cube)))),
    )
}

/// Demo cube shape override, `NλxNYxNX` (e.g. `128x80x80`).
fn demo_shape() -> Result<(usize, usize, usize)> {
    let raw = match std::env::var("CUBE_LENS_DEMO_SHAPE") {
        Ok(raw) => raw,
        Err(_) => return Ok((96, 64, 64)),
    };
    let parts: Vec<&str> = raw.split('x').collect();
    ensure!(parts.len() == 3, "expected NλxNYxNX, got {raw:?}");
    let dim = |s: &str| -> Result<usize> {
        let n: usize = s
            .trim()
            .parse()
            .with_context(|| format!("bad dimension {s:?} in {raw:?}"))?;
        ensure!(n >= 2, "dimension {n} too small in {raw:?}");
        Ok(n)
    };
    Ok((dim(parts[0])?, dim(parts[1])?, dim(parts[2])?))
}

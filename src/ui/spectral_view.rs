use std::sync::Arc;

use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, VLine};

use crate::link::LinkController;
use crate::state::Selection;

// ---------------------------------------------------------------------------
// Spectral plot (right panel)
// ---------------------------------------------------------------------------

/// Plots intensity against wavelength for the current selection and marks
/// the displayed wavelength with a vertical line.
///
/// The extracted spectrum is held between frames and refreshed only when
/// the controller raises the spectrum flag, so wavelength changes move the
/// marker without touching the data.
#[derive(Default)]
pub struct SpectralView {
    spectrum: Option<Arc<Vec<f64>>>,
}

impl SpectralView {
    pub fn show(&mut self, ui: &mut Ui, controller: &mut LinkController) {
        let state = controller.snapshot();

        if controller.take_spectrum_dirty() {
            self.spectrum = match &state.selection {
                Some(sel) => match controller.spectrum_for(sel) {
                    Ok(sp) => Some(sp),
                    Err(e) => {
                        // committed selections are validated; keep the last plot
                        log::error!("spectrum extraction failed: {e}");
                        self.spectrum.take()
                    }
                },
                None => None,
            };
        }

        let spectrum = match &self.spectrum {
            Some(sp) => sp,
            None => {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Click a pixel in the image to view its spectrum");
                });
                return;
            }
        };

        let wavelengths = controller.cube().wavelengths();
        let marker = wavelengths[state.wavelength_index];

        let name = match &state.selection {
            Some(Selection::Pixel(p)) => format!("pixel {p}"),
            Some(Selection::Region(pixels)) => format!("mean of {} px", pixels.len()),
            None => String::new(),
        };

        let points: PlotPoints = wavelengths
            .iter()
            .zip(spectrum.iter())
            .map(|(&wl, &v)| [wl, v])
            .collect();

        Plot::new("spectral_view")
            .x_axis_label("Wavelength (Å)")
            .y_axis_label("Intensity")
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_scroll(true)
            .allow_zoom(true)
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(points)
                        .name(&name)
                        .color(Color32::LIGHT_BLUE)
                        .width(1.5),
                );
                plot_ui.vline(
                    VLine::new(marker)
                        .color(Color32::from_rgb(230, 140, 60))
                        .width(1.0),
                );
            });
    }
}

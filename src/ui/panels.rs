use eframe::egui::{Color32, RichText, Slider, Ui};

use crate::link::LinkController;
use crate::state::Selection;

// ---------------------------------------------------------------------------
// Top bar – wavelength slider and readouts
// ---------------------------------------------------------------------------

/// Render the top toolbar: wavelength slider, cursor readout, view reset.
pub fn top_bar(ui: &mut Ui, controller: &mut LinkController) {
    let state = controller.snapshot();
    let cube = controller.cube().clone();
    let (n_wl, ny, nx) = cube.shape();
    let wavelengths = cube.wavelengths();

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Cube Lens");
        ui.separator();

        ui.label(format!(
            "{n_wl} × {ny} × {nx} cube, {:.3}″/px",
            cube.pixel_scale()
        ));
        ui.separator();

        // ---- Wavelength slider ----
        let mut index = state.wavelength_index;
        ui.label("λ");
        let slider = ui.add(Slider::new(&mut index, 0..=n_wl - 1).show_value(false));
        if slider.changed() {
            let _ = controller.set_wavelength_index(index);
        }
        ui.monospace(format!("{:.1} Å", wavelengths[state.wavelength_index]));
        ui.separator();

        // ---- Cursor readout ----
        match &state.selection {
            Some(Selection::Pixel(p)) => {
                ui.monospace(format!("cursor {p}"));
            }
            Some(Selection::Region(pixels)) => {
                ui.monospace(format!("region · {} px", pixels.len()));
            }
            None => {
                ui.label("no selection");
            }
        }
        ui.separator();

        ui.monospace(format!("zoom {:.2}×", state.zoom));
        if ui.small_button("Reset view").clicked() {
            let _ = controller.set_transform(1.0, (0.0, 0.0));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

use std::sync::Arc;

use eframe::egui;

use crate::data::cube::Cube;
use crate::link::LinkController;
use crate::ui::image_view::ImageView;
use crate::ui::panels;
use crate::ui::spectral_view::SpectralView;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CubeLensApp {
    pub controller: LinkController,
    image_view: ImageView,
    spectral_view: SpectralView,
}

impl CubeLensApp {
    pub fn new(cube: Arc<Cube>) -> Self {
        Self {
            controller: LinkController::new(cube),
            image_view: ImageView::default(),
            spectral_view: SpectralView::default(),
        }
    }
}

impl eframe::App for CubeLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: wavelength slider + readouts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.controller);
        });

        // ---- Right side panel: spectral plot ----
        egui::SidePanel::right("spectral_panel")
            .default_width(460.0)
            .resizable(true)
            .show(ctx, |ui| {
                self.spectral_view.show(ui, &mut self.controller);
            });

        // ---- Central panel: image canvas ----
        egui::CentralPanel::default().show(ctx, |ui| {
            self.image_view.show(ui, &mut self.controller);
        });
    }
}

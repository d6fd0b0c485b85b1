use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Intensity colour ramp
// ---------------------------------------------------------------------------

/// Maps a normalized intensity in `[0, 1]` to a heat-style colour, walking
/// the hue wheel from deep blue through red while brightening toward the
/// high end. Built once as a lookup table so per-pixel mapping is a single
/// index.
#[derive(Debug, Clone)]
pub struct IntensityRamp {
    table: Vec<Color32>,
}

const RAMP_STEPS: usize = 256;

impl Default for IntensityRamp {
    fn default() -> Self {
        let table = (0..RAMP_STEPS)
            .map(|i| {
                let t = i as f32 / (RAMP_STEPS - 1) as f32;
                // hue 250° (blue) → 0° (red), dark → bright
                let hsl = Hsl::new(250.0 * (1.0 - t), 0.85, 0.08 + 0.55 * t);
                let rgb: Srgb = hsl.into_color();
                Color32::from_rgb(
                    (rgb.red * 255.0) as u8,
                    (rgb.green * 255.0) as u8,
                    (rgb.blue * 255.0) as u8,
                )
            })
            .collect();
        IntensityRamp { table }
    }
}

impl IntensityRamp {
    /// Colour for a normalized intensity; values outside `[0, 1]` clamp.
    pub fn color_at(&self, t: f32) -> Color32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let idx = (t * (RAMP_STEPS - 1) as f32).round() as usize;
        self.table[idx]
    }
}

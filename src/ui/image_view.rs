use eframe::egui::{
    Color32, ColorImage, PointerButton, Pos2, Rect, Response, Sense, Stroke, StrokeKind,
    TextureHandle, TextureOptions, Ui, Vec2, pos2, vec2,
};

use crate::color::IntensityRamp;
use crate::data::cube::PixelCoord;
use crate::data::extract;
use crate::error::InteractionError;
use crate::link::LinkController;
use crate::state::{Selection, ViewState};

// ---------------------------------------------------------------------------
// PixelTransform – affine map between cube pixel space and display space
// ---------------------------------------------------------------------------

/// The affine transform the image view derives from zoom and pan.
///
/// `scale` is display points per cube pixel (the fit-to-viewport base scale
/// times the view's zoom). Pixel `(0, 0)`'s top-left corner lands at
/// `origin + pan`; [`to_display`](Self::to_display) maps a pixel to its
/// cell centre, and [`to_pixel`](Self::to_pixel) inverse-applies the map
/// and rounds to the nearest pixel, rejecting anything outside the cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelTransform {
    origin: Pos2,
    pan: Vec2,
    scale: f32,
    nx: usize,
    ny: usize,
}

impl PixelTransform {
    pub fn new(origin: Pos2, pan: Vec2, scale: f32, nx: usize, ny: usize) -> Self {
        PixelTransform {
            origin,
            pan,
            scale,
            nx,
            ny,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Display point at the centre of pixel `p`.
    pub fn to_display(&self, p: PixelCoord) -> Pos2 {
        self.origin
            + self.pan
            + vec2(
                (p.x as f32 + 0.5) * self.scale,
                (p.y as f32 + 0.5) * self.scale,
            )
    }

    /// Display rectangle covering pixel `p`'s cell.
    pub fn pixel_rect(&self, p: PixelCoord) -> Rect {
        let min = self.origin + self.pan + vec2(p.x as f32 * self.scale, p.y as f32 * self.scale);
        Rect::from_min_size(min, Vec2::splat(self.scale))
    }

    /// The rectangle the whole image occupies in display space.
    pub fn image_rect(&self) -> Rect {
        Rect::from_min_size(
            self.origin + self.pan,
            vec2(self.nx as f32 * self.scale, self.ny as f32 * self.scale),
        )
    }

    /// Nearest cube pixel under a display point. Positions that land
    /// outside `[0, nx) × [0, ny)` are out of range, never clamped.
    pub fn to_pixel(&self, pos: Pos2) -> Result<PixelCoord, InteractionError> {
        let local = pos - self.origin - self.pan;
        let u = local.x / self.scale - 0.5;
        let v = local.y / self.scale - 0.5;
        let p = PixelCoord::new(u.round() as i32, v.round() as i32);
        if p.x < 0 || p.x as usize >= self.nx || p.y < 0 || p.y as usize >= self.ny {
            return Err(InteractionError::OutOfRange(format!(
                "display point ({:.1}, {:.1}) maps to {p} outside [0, {}) × [0, {})",
                pos.x, pos.y, self.nx, self.ny
            )));
        }
        Ok(p)
    }
}

// ---------------------------------------------------------------------------
// ImageView – the 2-D slice canvas
// ---------------------------------------------------------------------------

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 64.0;

/// Renders the cube plane at the current wavelength index as a texture,
/// overlays the cursor marker, and translates pointer events into cube
/// pixel coordinates for the controller.
pub struct ImageView {
    texture: Option<TextureHandle>,
    /// Wavelength index the current texture was built from.
    texture_index: Option<usize>,
    ramp: IntensityRamp,
    /// Display position where an in-progress region drag started.
    drag_anchor: Option<Pos2>,
}

impl Default for ImageView {
    fn default() -> Self {
        Self {
            texture: None,
            texture_index: None,
            ramp: IntensityRamp::default(),
            drag_anchor: None,
        }
    }
}

impl ImageView {
    /// Render the image canvas and route its interactions.
    pub fn show(&mut self, ui: &mut Ui, controller: &mut LinkController) {
        let redraw = controller.take_image_dirty();
        let state = controller.snapshot();

        // the dirty flag also covers marker/transform changes, which repaint
        // anyway; only a wavelength change warrants a texture re-upload
        let stale = self.texture_index != Some(state.wavelength_index);
        if self.texture.is_none() || (redraw && stale) {
            self.refresh_texture(ui, controller, &state);
        }

        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let transform = self.transform_for(rect, controller, &state);

        self.paint(ui, rect, &transform, &state);
        self.handle_pointer(&response, &transform, controller, &state);
    }

    /// Rebuild the slice texture: min–max stretch through the colour ramp.
    /// Normalization lives here, on the presentation side, so extracted
    /// data stays raw.
    fn refresh_texture(&mut self, ui: &Ui, controller: &LinkController, state: &ViewState) {
        let cube = controller.cube();
        let (_, ny, nx) = cube.shape();
        let slice = match extract::image_slice(cube, state.wavelength_index) {
            Ok(s) => s,
            Err(e) => {
                // committed indices are always validated; keep the old texture
                log::error!("slice render failed: {e}");
                return;
            }
        };

        let min = slice.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = slice.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        let pixels: Vec<Color32> = slice
            .iter()
            .map(|&v| {
                let t = if range.abs() < f64::EPSILON {
                    0.0
                } else {
                    ((v - min) / range) as f32
                };
                self.ramp.color_at(t)
            })
            .collect();

        let image = ColorImage {
            size: [nx, ny],
            pixels,
        };
        match &mut self.texture {
            Some(tex) => tex.set(image, TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(ui.ctx()
                        .load_texture("cube_slice", image, TextureOptions::NEAREST));
            }
        }
        self.texture_index = Some(state.wavelength_index);
    }

    fn transform_for(
        &self,
        rect: Rect,
        controller: &LinkController,
        state: &ViewState,
    ) -> PixelTransform {
        let (_, ny, nx) = controller.cube().shape();
        let base = (rect.width() / nx as f32)
            .min(rect.height() / ny as f32)
            .max(f32::EPSILON);
        PixelTransform::new(
            rect.min,
            vec2(state.pan_offset.0, state.pan_offset.1),
            base * state.zoom,
            nx,
            ny,
        )
    }

    fn paint(&self, ui: &Ui, rect: Rect, transform: &PixelTransform, state: &ViewState) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::from_gray(12));

        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                transform.image_rect(),
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        // cursor marker, or bounding box of the selected region
        match &state.selection {
            Some(Selection::Pixel(p)) => {
                painter.rect_stroke(
                    transform.pixel_rect(*p).expand(1.0),
                    0.0,
                    Stroke::new(1.5, Color32::WHITE),
                    StrokeKind::Outside,
                );
            }
            Some(Selection::Region(pixels)) => {
                if let Some(bounds) = region_bounds(pixels) {
                    let r = transform
                        .pixel_rect(bounds.0)
                        .union(transform.pixel_rect(bounds.1));
                    painter.rect_stroke(
                        r,
                        0.0,
                        Stroke::new(1.5, Color32::LIGHT_YELLOW),
                        StrokeKind::Outside,
                    );
                }
            }
            None => {}
        }
    }

    fn handle_pointer(
        &mut self,
        response: &Response,
        transform: &PixelTransform,
        controller: &mut LinkController,
        state: &ViewState,
    ) {
        // scroll-wheel zoom about the hovered point, intensity readout
        if response.hovered() {
            if let Some(pos) = response.hover_pos() {
                let scroll = response.ctx.input(|i| i.raw_scroll_delta.y);
                if scroll != 0.0 {
                    self.zoom_about(pos, scroll, transform, controller, state);
                }
                if let Ok(p) = transform.to_pixel(pos) {
                    if let Ok(v) = controller.cube().sample(state.wavelength_index, p) {
                        response
                            .clone()
                            .on_hover_text(format!("{p}   {v:.3}"));
                    }
                }
            }
        }

        // right-button drag pans
        if response.dragged_by(PointerButton::Secondary) {
            let d = response.drag_delta();
            let pan = (state.pan_offset.0 + d.x, state.pan_offset.1 + d.y);
            let _ = controller.set_transform(state.zoom, pan);
            return;
        }

        // left click picks a pixel; out-of-range picks are a no-op
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                match transform.to_pixel(pos) {
                    Ok(p) => {
                        let _ = controller.set_cursor(p);
                    }
                    Err(e) => log::debug!("ignored click: {e}"),
                }
            }
        }

        // left drag sweeps out a rectangular region selection
        if response.drag_started_by(PointerButton::Primary) {
            self.drag_anchor = response.interact_pointer_pos();
        }
        if response.drag_stopped_by(PointerButton::Primary) {
            if let (Some(start), Some(end)) = (self.drag_anchor.take(), response.interact_pointer_pos())
            {
                match (transform.to_pixel(start), transform.to_pixel(end)) {
                    (Ok(a), Ok(b)) => {
                        let _ = controller.set_region(rect_pixels(a, b));
                    }
                    (Err(e), _) | (_, Err(e)) => log::debug!("ignored region drag: {e}"),
                }
            }
        }
    }

    fn zoom_about(
        &self,
        pos: Pos2,
        scroll: f32,
        transform: &PixelTransform,
        controller: &mut LinkController,
        state: &ViewState,
    ) {
        let factor = (scroll * 0.005).exp();
        let zoom = (state.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let applied = zoom / state.zoom;

        // keep the point under the pointer fixed while the scale changes
        let local = pos - transform.image_rect().min;
        let pan = (
            state.pan_offset.0 + local.x * (1.0 - applied),
            state.pan_offset.1 + local.y * (1.0 - applied),
        );
        let _ = controller.set_transform(zoom, pan);
    }
}

/// All pixels inside the axis-aligned rectangle spanned by two corners,
/// row-major.
fn rect_pixels(a: PixelCoord, b: PixelCoord) -> Vec<PixelCoord> {
    let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
    let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
    let mut pixels = Vec::with_capacity(((x1 - x0 + 1) * (y1 - y0 + 1)) as usize);
    for y in y0..=y1 {
        for x in x0..=x1 {
            pixels.push(PixelCoord::new(x, y));
        }
    }
    pixels
}

fn region_bounds(pixels: &[PixelCoord]) -> Option<(PixelCoord, PixelCoord)> {
    let first = pixels.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in pixels {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

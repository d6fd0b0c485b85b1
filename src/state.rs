use crate::data::cube::PixelCoord;

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// What the spectrum is extracted for: one pixel, or the mean over a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Pixel(PixelCoord),
    Region(Vec<PixelCoord>),
}

impl Selection {
    /// The pixel to highlight in the image view: the cursor pixel itself,
    /// or the first member of a region.
    pub fn anchor(&self) -> Option<PixelCoord> {
        match self {
            Selection::Pixel(p) => Some(*p),
            Selection::Region(pixels) => pixels.first().copied(),
        }
    }
}

/// The shared mutable state linking both views, independent of rendering.
///
/// Owned by [`LinkController`](crate::link::LinkController); views only ever
/// see committed snapshots of it, so a redraw can never observe a
/// half-updated state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Index into the cube's wavelength axis, `[0, nλ)`.
    pub wavelength_index: usize,

    /// Current cursor selection; `None` until the first pick.
    pub selection: Option<Selection>,

    /// Display zoom factor, strictly positive.
    pub zoom: f32,

    /// Display-space pan offset in points.
    pub pan_offset: (f32, f32),

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            wavelength_index: 0,
            selection: None,
            zoom: 1.0,
            pan_offset: (0.0, 0.0),
            status_message: None,
        }
    }
}

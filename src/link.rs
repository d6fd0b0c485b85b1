use std::sync::Arc;

use crate::data::cube::{Cube, PixelCoord};
use crate::data::extract::SpectrumCache;
use crate::error::InteractionError;
use crate::state::{Selection, ViewState};

/// How many extracted spectra to keep around for rapid cursor motion.
const SPECTRUM_CACHE_CAPACITY: usize = 16;

// ---------------------------------------------------------------------------
// LinkController – the single writer of ViewState
// ---------------------------------------------------------------------------

/// Owns the [`ViewState`] and funnels every mutation through validated
/// entry points, so the views only ever observe fully committed state.
///
/// Each view carries its own dirty flag. A successful update raises the
/// flags of the views it affects; repeated updates within one input batch
/// coalesce into a single raised flag, and draining a flag hands back
/// nothing but the signal — the state itself is read via [`snapshot`]
/// (a clone of the committed value, never a half-written one).
///
/// A rejected update leaves every state field untouched and surfaces only
/// a status message.
///
/// [`snapshot`]: LinkController::snapshot
pub struct LinkController {
    cube: Arc<Cube>,
    state: ViewState,
    cache: SpectrumCache,
    image_dirty: bool,
    spectrum_dirty: bool,
}

impl LinkController {
    pub fn new(cube: Arc<Cube>) -> Self {
        LinkController {
            cube,
            state: ViewState::default(),
            cache: SpectrumCache::new(SPECTRUM_CACHE_CAPACITY),
            // both views render once from the defaults
            image_dirty: true,
            spectrum_dirty: true,
        }
    }

    pub fn cube(&self) -> &Arc<Cube> {
        &self.cube
    }

    /// The committed state. Views must not hold this across updates.
    pub fn snapshot(&self) -> ViewState {
        self.state.clone()
    }

    // ---- mutation entry points -------------------------------------------

    /// Switch the displayed wavelength plane. The image view re-renders;
    /// the spectral view only moves its marker (the spectrum is
    /// pixel-dependent, not wavelength-dependent), so its extraction
    /// flag stays down.
    pub fn set_wavelength_index(&mut self, i: usize) -> Result<(), InteractionError> {
        let n_wl = self.cube.wavelengths().len();
        if i >= n_wl {
            return self.reject(InteractionError::OutOfRange(format!(
                "wavelength index {i} outside [0, {n_wl})"
            )));
        }
        self.state.wavelength_index = i;
        self.state.status_message = None;
        self.image_dirty = true;
        Ok(())
    }

    /// Move the cursor to a single pixel. The spectral view re-extracts;
    /// the image view redraws only for its marker overlay.
    pub fn set_cursor(&mut self, p: PixelCoord) -> Result<(), InteractionError> {
        if !self.cube.contains(p) {
            let (_, ny, nx) = self.cube.shape();
            return self.reject(InteractionError::OutOfRange(format!(
                "pixel {p} outside [0, {nx}) × [0, {ny})"
            )));
        }
        self.commit_selection(Selection::Pixel(p));
        Ok(())
    }

    /// Select a pixel set for an aggregate (mean) spectrum.
    pub fn set_region(&mut self, pixels: Vec<PixelCoord>) -> Result<(), InteractionError> {
        if pixels.is_empty() {
            return self.reject(InteractionError::EmptySelection);
        }
        if let Some(&bad) = pixels.iter().find(|&&p| !self.cube.contains(p)) {
            let (_, ny, nx) = self.cube.shape();
            return self.reject(InteractionError::OutOfRange(format!(
                "region pixel {bad} outside [0, {nx}) × [0, {ny})"
            )));
        }
        self.commit_selection(Selection::Region(pixels));
        Ok(())
    }

    /// Update the display transform. Only the image view redraws.
    pub fn set_transform(&mut self, zoom: f32, pan_offset: (f32, f32)) -> Result<(), InteractionError> {
        if !(zoom > 0.0) || !zoom.is_finite() {
            return self.reject(InteractionError::InvalidTransform(zoom));
        }
        self.state.zoom = zoom;
        self.state.pan_offset = pan_offset;
        self.state.status_message = None;
        self.image_dirty = true;
        Ok(())
    }

    fn commit_selection(&mut self, sel: Selection) {
        self.state.selection = Some(sel);
        self.state.status_message = None;
        self.spectrum_dirty = true;
        self.image_dirty = true;
    }

    fn reject(&mut self, err: InteractionError) -> Result<(), InteractionError> {
        log::debug!("interaction rejected: {err}");
        self.state.status_message = Some(err.to_string());
        Err(err)
    }

    // ---- redraw coordination ---------------------------------------------

    /// Drain the image view's dirty flag.
    pub fn take_image_dirty(&mut self) -> bool {
        std::mem::take(&mut self.image_dirty)
    }

    /// Drain the spectral view's extraction flag.
    pub fn take_spectrum_dirty(&mut self) -> bool {
        std::mem::take(&mut self.spectrum_dirty)
    }

    /// Cache-through spectrum extraction for the spectral render path.
    pub fn spectrum_for(&mut self, sel: &Selection) -> Result<Arc<Vec<f64>>, InteractionError> {
        self.cache.get_or_extract(&self.cube, sel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synth::demo_cube;

    fn controller() -> LinkController {
        // (5, 10, 10) cube, wavelengths 400..600 step 50
        let cube = demo_cube(5, 10, 10, 400.0, 50.0);
        LinkController::new(Arc::new(cube))
    }

    #[test]
    fn cursor_boundary_rejection_keeps_state() {
        let mut ctl = controller();
        ctl.set_cursor(PixelCoord::new(3, 3)).unwrap();
        ctl.take_image_dirty();
        ctl.take_spectrum_dirty();
        let before = ctl.snapshot();

        for bad in [PixelCoord::new(-1, 0), PixelCoord::new(10, 0)] {
            let err = ctl.set_cursor(bad).unwrap_err();
            assert!(matches!(err, InteractionError::OutOfRange(_)));
            assert_eq!(ctl.snapshot().selection, before.selection);
            // a rejection raises no redraw flag
            assert!(!ctl.take_image_dirty());
            assert!(!ctl.take_spectrum_dirty());
        }
    }

    #[test]
    fn wavelength_change_moves_marker_without_reextraction() {
        let mut ctl = controller();
        ctl.set_cursor(PixelCoord::new(3, 3)).unwrap();
        ctl.take_image_dirty();
        ctl.take_spectrum_dirty();

        ctl.set_wavelength_index(2).unwrap();
        assert_eq!(ctl.snapshot().wavelength_index, 2);
        assert!(ctl.take_image_dirty());
        assert!(!ctl.take_spectrum_dirty());
    }

    #[test]
    fn wavelength_updates_are_idempotent() {
        let mut ctl = controller();
        ctl.set_wavelength_index(2).unwrap();
        let first = ctl.snapshot();
        ctl.set_wavelength_index(2).unwrap();
        assert_eq!(ctl.snapshot(), first);
        let slice_a = ctl.cube().slice(2).unwrap().to_vec();
        let slice_b = ctl.cube().slice(2).unwrap().to_vec();
        assert_eq!(slice_a, slice_b);
    }

    #[test]
    fn wavelength_index_out_of_range_is_rejected() {
        let mut ctl = controller();
        assert!(matches!(
            ctl.set_wavelength_index(5),
            Err(InteractionError::OutOfRange(_))
        ));
        assert_eq!(ctl.snapshot().wavelength_index, 0);
    }

    #[test]
    fn transform_rejects_non_positive_zoom() {
        let mut ctl = controller();
        ctl.set_transform(2.0, (5.0, -3.0)).unwrap();
        for bad in [0.0, -1.0, f32::NAN] {
            let err = ctl.set_transform(bad, (0.0, 0.0)).unwrap_err();
            assert!(matches!(err, InteractionError::InvalidTransform(_)));
            let s = ctl.snapshot();
            assert_eq!(s.zoom, 2.0);
            assert_eq!(s.pan_offset, (5.0, -3.0));
        }
    }

    #[test]
    fn cursor_motion_coalesces_into_one_redraw() {
        let mut ctl = controller();
        for x in 0..5 {
            ctl.set_cursor(PixelCoord::new(x, 0)).unwrap();
        }
        assert!(ctl.take_spectrum_dirty());
        assert!(!ctl.take_spectrum_dirty());
    }

    #[test]
    fn empty_region_is_rejected() {
        let mut ctl = controller();
        assert_eq!(
            ctl.set_region(Vec::new()),
            Err(InteractionError::EmptySelection)
        );
        assert_eq!(ctl.snapshot().selection, None);
    }
}

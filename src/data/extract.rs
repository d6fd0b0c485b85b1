use std::sync::Arc;

use crate::data::cube::{Cube, PixelCoord};
use crate::error::InteractionError;
use crate::state::Selection;

// ---------------------------------------------------------------------------
// Slice / spectrum extraction
// ---------------------------------------------------------------------------

/// Spectrum for a single pixel. Direct cube lookup, values unmodified.
pub fn pixel_spectrum(cube: &Cube, p: PixelCoord) -> Result<Vec<f64>, InteractionError> {
    cube.spectrum(p)
}

/// Aggregate spectrum over a pixel set: elementwise mean per wavelength.
///
/// Every member is bounds-checked before any accumulation, so a bad region
/// fails whole rather than averaging a partial set.
pub fn region_spectrum(cube: &Cube, pixels: &[PixelCoord]) -> Result<Vec<f64>, InteractionError> {
    if pixels.is_empty() {
        return Err(InteractionError::EmptySelection);
    }
    for &p in pixels {
        if !cube.contains(p) {
            let (_, ny, nx) = cube.shape();
            return Err(InteractionError::OutOfRange(format!(
                "region pixel {p} outside [0, {nx}) × [0, {ny})"
            )));
        }
    }

    let n_wl = cube.wavelengths().len();
    let mut sum = vec![0.0; n_wl];
    for &p in pixels {
        for (acc, v) in sum.iter_mut().zip(cube.spectrum(p)?) {
            *acc += v;
        }
    }
    let n = pixels.len() as f64;
    Ok(sum.into_iter().map(|s| s / n).collect())
}

/// Spectrum for any selection kind.
pub fn selection_spectrum(cube: &Cube, sel: &Selection) -> Result<Vec<f64>, InteractionError> {
    match sel {
        Selection::Pixel(p) => pixel_spectrum(cube, *p),
        Selection::Region(pixels) => region_spectrum(cube, pixels),
    }
}

/// Image plane at one wavelength. No transform applied; colour mapping and
/// contrast stretching are view concerns so extracted data stays reusable.
pub fn image_slice(cube: &Cube, wavelength_index: usize) -> Result<&[f64], InteractionError> {
    cube.slice(wavelength_index)
}

// ---------------------------------------------------------------------------
// SpectrumCache – bounded memo for rapid cursor motion
// ---------------------------------------------------------------------------

/// Remembers the last few extracted spectra keyed by selection, evicting the
/// oldest entry on capacity overflow. Purely a responsiveness aid on large
/// cubes; correctness never depends on a hit.
pub struct SpectrumCache {
    capacity: usize,
    entries: Vec<(Selection, Arc<Vec<f64>>)>,
}

impl SpectrumCache {
    pub fn new(capacity: usize) -> Self {
        SpectrumCache {
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    /// Cached spectrum for `sel`, extracting and inserting on a miss.
    pub fn get_or_extract(
        &mut self,
        cube: &Cube,
        sel: &Selection,
    ) -> Result<Arc<Vec<f64>>, InteractionError> {
        if let Some((_, sp)) = self.entries.iter().find(|(k, _)| k == sel) {
            return Ok(Arc::clone(sp));
        }
        let sp = Arc::new(selection_spectrum(cube, sel)?);
        if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push((sel.clone(), Arc::clone(&sp)));
        Ok(sp)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_plane_cube() -> Cube {
        // wavelength 0: [[1, 5], [3, 7]]; wavelength 1: [[2, 6], [4, 8]]
        let data = vec![1.0, 5.0, 3.0, 7.0, 2.0, 6.0, 4.0, 8.0];
        Cube::new(data, vec![400.0, 450.0], 2, 2, 1.0).unwrap()
    }

    #[test]
    fn region_mean_is_elementwise() {
        let cube = two_plane_cube();
        // (0,0) and (0,1) hold [1, 2] and [3, 4]
        let pixels = [PixelCoord::new(0, 0), PixelCoord::new(0, 1)];
        let sp = region_spectrum(&cube, &pixels).unwrap();
        assert_eq!(sp, vec![2.0, 3.0]);
    }

    #[test]
    fn empty_region_is_rejected() {
        let cube = two_plane_cube();
        assert_eq!(
            region_spectrum(&cube, &[]),
            Err(InteractionError::EmptySelection)
        );
    }

    #[test]
    fn region_with_invalid_member_fails_whole() {
        let cube = two_plane_cube();
        let pixels = [PixelCoord::new(0, 0), PixelCoord::new(2, 0)];
        assert!(matches!(
            region_spectrum(&cube, &pixels),
            Err(InteractionError::OutOfRange(_))
        ));
    }

    #[test]
    fn cache_hits_return_the_same_allocation() {
        let cube = two_plane_cube();
        let mut cache = SpectrumCache::new(4);
        let sel = Selection::Pixel(PixelCoord::new(1, 1));
        let a = cache.get_or_extract(&cube, &sel).unwrap();
        let b = cache.get_or_extract(&cube, &sel).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_evicts_oldest_at_capacity() {
        let cube = two_plane_cube();
        let mut cache = SpectrumCache::new(2);
        let first = Selection::Pixel(PixelCoord::new(0, 0));
        for p in [(0, 0), (1, 0), (0, 1)] {
            cache
                .get_or_extract(&cube, &Selection::Pixel(PixelCoord::new(p.0, p.1)))
                .unwrap();
        }
        assert_eq!(cache.len(), 2);
        // re-extracting the evicted entry allocates anew
        let again = cache.get_or_extract(&cube, &first).unwrap();
        assert_eq!(*again, vec![1.0, 2.0]);
    }
}

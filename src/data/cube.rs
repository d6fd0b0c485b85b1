use std::fmt;

use crate::error::{CubeError, InteractionError};

// ---------------------------------------------------------------------------
// PixelCoord – a spatial position in cube pixel space
// ---------------------------------------------------------------------------

/// Integer pixel coordinate `(x, y)` in cube space.
///
/// Signed so that positions derived from inverse-transformed pointer events
/// (which can land left of or above the cube) stay representable and get
/// rejected by bounds checks instead of wrapping or clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelCoord {
    pub x: i32,
    pub y: i32,
}

impl PixelCoord {
    pub fn new(x: i32, y: i32) -> Self {
        PixelCoord { x, y }
    }
}

impl fmt::Display for PixelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Cube – the immutable spectral data cube
// ---------------------------------------------------------------------------

/// A 3-D intensity cube `data[wavelength][y][x]` plus its coordinate
/// metadata. Read-only after construction; shared across views without
/// locking.
///
/// Storage is a single flat `Vec<f64>` in `(nλ, ny, nx)` row-major order,
/// so a wavelength slice is one contiguous run of `ny * nx` values.
#[derive(Debug, Clone)]
pub struct Cube {
    data: Vec<f64>,
    wavelengths: Vec<f64>,
    ny: usize,
    nx: usize,
    /// Spatial plate scale (arcsec per pixel), display metadata only.
    pixel_scale: f64,
}

impl Cube {
    /// Build a cube, validating shape consistency. Inconsistent input from
    /// the loader is a fatal construction error, not a render-time surprise.
    pub fn new(
        data: Vec<f64>,
        wavelengths: Vec<f64>,
        ny: usize,
        nx: usize,
        pixel_scale: f64,
    ) -> Result<Self, CubeError> {
        let n_wl = wavelengths.len();
        if n_wl == 0 || ny == 0 || nx == 0 {
            return Err(CubeError::Malformed(format!(
                "all dimensions must be positive, got ({n_wl}, {ny}, {nx})"
            )));
        }
        if data.len() != n_wl * ny * nx {
            return Err(CubeError::Malformed(format!(
                "data has {} samples but shape ({n_wl}, {ny}, {nx}) needs {}",
                data.len(),
                n_wl * ny * nx
            )));
        }
        if !wavelengths.windows(2).all(|w| w[0] < w[1]) {
            return Err(CubeError::Malformed(
                "wavelength axis must be strictly increasing".into(),
            ));
        }
        Ok(Cube {
            data,
            wavelengths,
            ny,
            nx,
            pixel_scale,
        })
    }

    /// Cube shape as `(nλ, ny, nx)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.wavelengths.len(), self.ny, self.nx)
    }

    /// The ordered wavelength axis, length `nλ`.
    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    pub fn pixel_scale(&self) -> f64 {
        self.pixel_scale
    }

    /// Whether `p` lies inside `[0, nx) × [0, ny)`.
    pub fn contains(&self, p: PixelCoord) -> bool {
        p.x >= 0 && (p.x as usize) < self.nx && p.y >= 0 && (p.y as usize) < self.ny
    }

    /// The 2-D image plane at `wavelength_index`, as a contiguous
    /// `ny * nx` slice in row-major `[y][x]` order.
    pub fn slice(&self, wavelength_index: usize) -> Result<&[f64], InteractionError> {
        if wavelength_index >= self.wavelengths.len() {
            return Err(InteractionError::OutOfRange(format!(
                "wavelength index {wavelength_index} outside [0, {})",
                self.wavelengths.len()
            )));
        }
        let plane = self.ny * self.nx;
        let start = wavelength_index * plane;
        Ok(&self.data[start..start + plane])
    }

    /// The spectrum at pixel `p`: one intensity per wavelength, length `nλ`.
    pub fn spectrum(&self, p: PixelCoord) -> Result<Vec<f64>, InteractionError> {
        if !self.contains(p) {
            return Err(InteractionError::OutOfRange(format!(
                "pixel {p} outside [0, {}) × [0, {})",
                self.nx, self.ny
            )));
        }
        let plane = self.ny * self.nx;
        let offset = p.y as usize * self.nx + p.x as usize;
        Ok((0..self.wavelengths.len())
            .map(|i| self.data[i * plane + offset])
            .collect())
    }

    /// Single sample lookup, used by the image-hover intensity readout.
    pub fn sample(&self, wavelength_index: usize, p: PixelCoord) -> Result<f64, InteractionError> {
        let slice = self.slice(wavelength_index)?;
        if !self.contains(p) {
            return Err(InteractionError::OutOfRange(format!(
                "pixel {p} outside [0, {}) × [0, {})",
                self.nx, self.ny
            )));
        }
        Ok(slice[p.y as usize * self.nx + p.x as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_cube() -> Cube {
        // data[i][y][x] = 100*i + 10*y + x, shape (3, 2, 4)
        let mut data = Vec::new();
        for i in 0..3 {
            for y in 0..2 {
                for x in 0..4 {
                    data.push((100 * i + 10 * y + x) as f64);
                }
            }
        }
        Cube::new(data, vec![500.0, 510.0, 520.0], 2, 4, 0.059).unwrap()
    }

    #[test]
    fn slice_has_image_shape() {
        let cube = ramp_cube();
        let (n_wl, ny, nx) = cube.shape();
        for i in 0..n_wl {
            assert_eq!(cube.slice(i).unwrap().len(), ny * nx);
        }
        assert_eq!(cube.slice(1).unwrap()[1 * 4 + 2], 112.0);
    }

    #[test]
    fn spectrum_has_wavelength_length() {
        let cube = ramp_cube();
        for y in 0..2 {
            for x in 0..4 {
                let sp = cube.spectrum(PixelCoord::new(x, y)).unwrap();
                assert_eq!(sp.len(), cube.wavelengths().len());
            }
        }
        assert_eq!(
            cube.spectrum(PixelCoord::new(3, 1)).unwrap(),
            vec![13.0, 113.0, 213.0]
        );
    }

    #[test]
    fn out_of_range_lookups_fail() {
        let cube = ramp_cube();
        assert!(matches!(
            cube.slice(3),
            Err(InteractionError::OutOfRange(_))
        ));
        assert!(matches!(
            cube.spectrum(PixelCoord::new(-1, 0)),
            Err(InteractionError::OutOfRange(_))
        ));
        assert!(matches!(
            cube.spectrum(PixelCoord::new(4, 0)),
            Err(InteractionError::OutOfRange(_))
        ));
    }

    #[test]
    fn malformed_cubes_are_rejected() {
        // wavelength count does not match the leading dimension
        assert!(Cube::new(vec![0.0; 8], vec![500.0], 2, 4, 1.0).is_err());
        // empty spatial extent
        assert!(Cube::new(Vec::new(), vec![500.0], 0, 0, 1.0).is_err());
        // unordered wavelength axis
        assert!(Cube::new(vec![0.0; 16], vec![510.0, 500.0], 2, 4, 1.0).is_err());
    }
}

/// Data layer: the cube, extraction, and synthetic demo data.
///
/// Architecture:
/// ```text
///   external loader (or synth)
///        │
///        ▼
///   ┌──────────┐
///   │   Cube    │  immutable (nλ, ny, nx) array + wavelength axis
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  extract  │  pixel/region → spectrum, index → image slice
///   └──────────┘
/// ```
///
/// Everything below the extraction layer is read-only after load, so the
/// render paths share an `Arc<Cube>` without locking.

pub mod cube;
pub mod extract;
pub mod synth;

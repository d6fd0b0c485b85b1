//! End-to-end scenarios driving the controller the way the views do.

use std::sync::Arc;

use cube_lens::data::cube::{Cube, PixelCoord};
use cube_lens::data::synth::demo_cube;
use cube_lens::error::InteractionError;
use cube_lens::link::LinkController;
use cube_lens::state::Selection;

fn small_field() -> LinkController {
    // (5, 10, 10) cube, wavelengths 400, 450, 500, 550, 600
    LinkController::new(Arc::new(demo_cube(5, 10, 10, 400.0, 50.0)))
}

#[test]
fn cursor_pick_then_wavelength_step() {
    let mut ctl = small_field();
    assert_eq!(
        ctl.cube().wavelengths(),
        &[400.0, 450.0, 500.0, 550.0, 600.0]
    );

    // pick a pixel: the spectral view re-extracts, one point per wavelength
    ctl.set_cursor(PixelCoord::new(3, 3)).unwrap();
    assert!(ctl.take_spectrum_dirty());
    let sel = ctl.snapshot().selection.unwrap();
    let spectrum = ctl.spectrum_for(&sel).unwrap();
    assert_eq!(spectrum.len(), 5);

    // step the wavelength: the image view redraws and the marker lands on
    // 500 Å, but no new spectrum is extracted
    ctl.take_image_dirty();
    ctl.set_wavelength_index(2).unwrap();
    let state = ctl.snapshot();
    assert_eq!(state.wavelength_index, 2);
    assert_eq!(ctl.cube().wavelengths()[state.wavelength_index], 500.0);
    assert!(ctl.take_image_dirty());
    assert!(!ctl.take_spectrum_dirty());

    // the selection (and so the plotted spectrum) is unchanged
    assert_eq!(state.selection, Some(Selection::Pixel(PixelCoord::new(3, 3))));
    let (ny, nx) = (10, 10);
    assert_eq!(ctl.cube().slice(2).unwrap().len(), ny * nx);
}

#[test]
fn region_selection_plots_the_mean() {
    // wavelength 0 holds 1.0 at (0,0) and 3.0 at (0,1)
    let data = vec![
        1.0, 9.0, //
        3.0, 9.0, // plane λ0
        5.0, 9.0, //
        7.0, 9.0, // plane λ1
    ];
    let cube = Cube::new(data, vec![400.0, 450.0], 2, 2, 1.0).unwrap();
    let mut ctl = LinkController::new(Arc::new(cube));

    ctl.set_region(vec![PixelCoord::new(0, 0), PixelCoord::new(0, 1)])
        .unwrap();
    let sel = ctl.snapshot().selection.unwrap();
    let spectrum = ctl.spectrum_for(&sel).unwrap();
    assert_eq!(*spectrum, vec![2.0, 6.0]);
}

#[test]
fn out_of_range_cursor_is_a_no_op() {
    let mut ctl = small_field();
    ctl.set_cursor(PixelCoord::new(2, 2)).unwrap();
    let before = ctl.snapshot();

    for bad in [
        PixelCoord::new(-1, 0),
        PixelCoord::new(10, 0),
        PixelCoord::new(0, -1),
        PixelCoord::new(0, 10),
    ] {
        assert!(matches!(
            ctl.set_cursor(bad),
            Err(InteractionError::OutOfRange(_))
        ));
        let after = ctl.snapshot();
        assert_eq!(after.selection, before.selection);
        assert_eq!(after.wavelength_index, before.wavelength_index);
        assert_eq!(after.zoom, before.zoom);
    }
}

#[test]
fn every_pixel_yields_a_full_length_spectrum() {
    let ctl = small_field();
    let cube = ctl.cube();
    let (n_wl, ny, nx) = cube.shape();
    for y in 0..ny as i32 {
        for x in 0..nx as i32 {
            let sp = cube.spectrum(PixelCoord::new(x, y)).unwrap();
            assert_eq!(sp.len(), n_wl);
        }
    }
    for i in 0..n_wl {
        assert_eq!(cube.slice(i).unwrap().len(), ny * nx);
    }
}

#[test]
fn repeated_wavelength_updates_render_identically() {
    let mut ctl = small_field();
    ctl.set_wavelength_index(3).unwrap();
    let first = ctl.cube().slice(ctl.snapshot().wavelength_index).unwrap().to_vec();
    ctl.set_wavelength_index(3).unwrap();
    let second = ctl.cube().slice(ctl.snapshot().wavelength_index).unwrap().to_vec();
    assert_eq!(first, second);
}

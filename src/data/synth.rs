use crate::data::cube::Cube;

// ---------------------------------------------------------------------------
// Synthetic demo cube
// ---------------------------------------------------------------------------

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Build a noiseless cube with a flat ramp per plane, sized to order.
/// Handy for tests needing exact values: `data[i][y][x] = i + y + x`.
pub fn demo_cube(n_wl: usize, ny: usize, nx: usize, wl0: f64, wl_step: f64) -> Cube {
    let wavelengths: Vec<f64> = (0..n_wl).map(|i| wl0 + i as f64 * wl_step).collect();
    let mut data = Vec::with_capacity(n_wl * ny * nx);
    for i in 0..n_wl {
        for y in 0..ny {
            for x in 0..nx {
                data.push((i + y + x) as f64);
            }
        }
    }
    Cube::new(data, wavelengths, ny, nx, 1.0).expect("demo cube dimensions are consistent")
}

/// Build the emission-line cube the demo binary opens with: a Gaussian
/// spectral line whose centre drifts across the field (a crude velocity
/// gradient), sitting on a smooth continuum, with Gaussian noise on top.
pub fn emission_line_cube(n_wl: usize, ny: usize, nx: usize) -> Cube {
    let mut rng = SimpleRng::new(42);

    // dimensions of 1 would divide by zero in the field-fraction maths
    let (n_wl, ny, nx) = (n_wl.max(2), ny.max(2), nx.max(2));
    // Hα neighbourhood
    let wl_step = 48.0 / n_wl as f64;
    let wavelengths: Vec<f64> = (0..n_wl).map(|i| 6540.0 + i as f64 * wl_step).collect();

    let mut data = Vec::with_capacity(n_wl * ny * nx);
    let mut spectra = vec![Vec::with_capacity(n_wl); ny * nx];

    for y in 0..ny {
        for x in 0..nx {
            // line centre drifts ±6 Å across the field, amplitude peaks
            // in the middle of it
            let fx = x as f64 / (nx - 1) as f64;
            let fy = y as f64 / (ny - 1) as f64;
            let mu = 6564.0 + (fx - 0.5) * 12.0;
            let r2 = (fx - 0.5).powi(2) + (fy - 0.5).powi(2);
            let amp = 3.0 * (-r2 / 0.08).exp();
            let continuum = 0.4 + 0.2 * fy;

            let sp = &mut spectra[y * nx + x];
            for &wl in &wavelengths {
                let v = continuum + gaussian(wl, mu, 1.8, amp) + rng.gauss(0.0, 0.02);
                sp.push(v);
            }
        }
    }

    // transpose the per-pixel spectra into (λ, y, x) plane order
    for i in 0..n_wl {
        for sp in &spectra {
            data.push(sp[i]);
        }
    }

    Cube::new(data, wavelengths, ny, nx, 0.059).expect("generated cube dimensions are consistent")
}

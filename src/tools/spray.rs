use rand::Rng;
use std::f64::consts::TAU;

/// Dots scattered per pointer-move event
pub const SPRAY_DOTS: usize = 20;

/// Two independent standard normal samples (Box-Muller).
pub fn gaussian_pair<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    // u1 in (0, 1) so the logarithm stays finite
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    let radius = (-2.0 * u1.ln()).sqrt();
    let theta = TAU * u2;
    (radius * theta.cos(), radius * theta.sin())
}

/// Offsets of one spray burst, each axis drawn from N(0, sigma²).
pub fn spray_offsets<R: Rng + ?Sized>(rng: &mut R, sigma: f64) -> Vec<(f64, f64)> {
    (0..SPRAY_DOTS)
        .map(|_| {
            let (gx, gy) = gaussian_pair(rng);
            (gx * sigma, gy * sigma)
        })
        .collect()
}

/// Pixel positions of one spray burst around `center`.
pub fn spray_dots<R: Rng + ?Sized>(rng: &mut R, center: (i32, i32), sigma: f64) -> Vec<(i32, i32)> {
    spray_offsets(rng, sigma)
        .into_iter()
        .map(|(dx, dy)| {
            (
                center.0.saturating_add(dx.round() as i32),
                center.1.saturating_add(dy.round() as i32),
            )
        })
        .collect()
}

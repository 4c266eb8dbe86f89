use rand::Rng;

use crate::constants::{ATTRIBUTE_MAX, ATTRIBUTE_MIN, LOG_ADJUST_FACTOR, NEUTRAL_CONTRIBUTION};

/// Draw from a normal distribution using the Box–Muller transform.
pub fn normal_sample<R: Rng + ?Sized>(rng: &mut R, mean: f64, stddev: f64) -> f64 {
    // u1 in (0, 1] keeps ln(u1) finite
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + z0 * stddev
}

/// Draw a Poisson-distributed count with Knuth's product-of-uniforms algorithm.
///
/// A non-positive `lambda` always yields 0.
pub fn poisson_knuth<R: Rng + ?Sized>(rng: &mut R, lambda: f64) -> u32 {
    if lambda <= 0.0 {
        return 0;
    }

    let limit = (-lambda).exp();
    let mut k: u32 = 0;
    let mut p = 1.0;

    // At least one draw, so a limit that rounds to 1.0 still yields 0
    loop {
        k += 1;
        p *= rng.gen::<f64>();
        if p <= limit {
            break;
        }
    }

    k - 1
}

/// Compress a match strength into a Poisson rate.
pub fn attenuate_strength(strength: f64) -> f64 {
    if strength <= 0.0 {
        return 0.0;
    }
    (1.0 + LOG_ADJUST_FACTOR * strength).ln()
}

/// Map a contribution in [0, 10] to a strength multiplier.
///
/// A neutral contribution of 5 gives exactly 1, and the multiplier for 0 is the
/// reciprocal of the multiplier for 10. With `impact = 0.1487` the range is [0.5, 2.0].
pub fn contribution_multiplier(contribution: f64, impact: f64) -> f64 {
    (1.0 + impact).powf(contribution - NEUTRAL_CONTRIBUTION)
}

/// Clamp a dynamic attribute or rating into [0, 10].
pub fn clamp_attribute(value: f64) -> f64 {
    value.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX)
}

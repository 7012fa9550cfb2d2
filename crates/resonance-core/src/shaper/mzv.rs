// Modified zero-vibration shaper: three impulses over 3/4 of a period

use super::{DampedPeriod, ImpulseTrain};
use std::f64::consts::SQRT_2;

pub fn mzv(shaper_freq: f64, damping_ratio: f64) -> ImpulseTrain {
    let DampedPeriod { k, t_d } = DampedPeriod::new(shaper_freq, damping_ratio, 0.75);

    let a1 = 1.0 - 1.0 / SQRT_2;
    let a2 = (SQRT_2 - 1.0) * k;
    let a3 = a1 * k * k;

    ImpulseTrain::new(vec![a1, a2, a3], vec![0.0, 0.375 * t_d, 0.75 * t_d])
}

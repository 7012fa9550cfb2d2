// Zero-vibration shapers: ZV and its derivative-robust ZVD variant

use super::{DampedPeriod, ImpulseTrain};

pub fn zv(shaper_freq: f64, damping_ratio: f64) -> ImpulseTrain {
    let DampedPeriod { k, t_d } = DampedPeriod::new(shaper_freq, damping_ratio, 1.0);
    ImpulseTrain::new(vec![1.0, k], vec![0.0, 0.5 * t_d])
}

pub fn zvd(shaper_freq: f64, damping_ratio: f64) -> ImpulseTrain {
    let DampedPeriod { k, t_d } = DampedPeriod::new(shaper_freq, damping_ratio, 1.0);
    ImpulseTrain::new(vec![1.0, 2.0 * k, k * k], vec![0.0, 0.5 * t_d, t_d])
}

// Extra-insensitive shapers (one, two and three humps)

use super::{DampedPeriod, EI_VIBRATION_TOLERANCE, ImpulseTrain};

pub fn ei(shaper_freq: f64, damping_ratio: f64) -> ImpulseTrain {
    let v_tol = EI_VIBRATION_TOLERANCE;
    let DampedPeriod { k, t_d } = DampedPeriod::new(shaper_freq, damping_ratio, 1.0);

    let a1 = 0.25 * (1.0 + v_tol);
    let a2 = 0.5 * (1.0 - v_tol) * k;
    let a3 = a1 * k * k;

    ImpulseTrain::new(vec![a1, a2, a3], vec![0.0, 0.5 * t_d, t_d])
}

pub fn two_hump_ei(shaper_freq: f64, damping_ratio: f64) -> ImpulseTrain {
    let v_tol = EI_VIBRATION_TOLERANCE;
    let DampedPeriod { k, t_d } = DampedPeriod::new(shaper_freq, damping_ratio, 1.0);

    let v2 = v_tol * v_tol;
    let x = (v2 * ((1.0 - v2).sqrt() + 1.0)).cbrt();
    let a1 = (3.0 * x * x + 2.0 * x + 3.0 * v2) / (16.0 * x);
    let a2 = (0.5 - a1) * k;
    let a3 = a2 * k;
    let a4 = a1 * k * k * k;

    ImpulseTrain::new(
        vec![a1, a2, a3, a4],
        vec![0.0, 0.5 * t_d, t_d, 1.5 * t_d],
    )
}

pub fn three_hump_ei(shaper_freq: f64, damping_ratio: f64) -> ImpulseTrain {
    let v_tol = EI_VIBRATION_TOLERANCE;
    let DampedPeriod { k, t_d } = DampedPeriod::new(shaper_freq, damping_ratio, 1.0);

    let k2 = k * k;
    let a1 = 0.0625 * (1.0 + 3.0 * v_tol + 2.0 * (2.0 * (v_tol + 1.0) * v_tol).sqrt());
    let a2 = 0.25 * (1.0 - v_tol) * k;
    let a3 = (0.5 * (1.0 + v_tol) - 2.0 * a1) * k2;
    let a4 = a2 * k2;
    let a5 = a1 * k2 * k2;

    ImpulseTrain::new(
        vec![a1, a2, a3, a4, a5],
        vec![0.0, 0.5 * t_d, t_d, 1.5 * t_d, 2.0 * t_d],
    )
}

//! Critically damped smoothing for horizontal speed changes.

/// Move `current` toward `target` over roughly `smooth_time` seconds.
///
/// `rate` carries the rate of change between calls and must be stored with
/// the value being smoothed. The result never overshoots `target`.
///
/// A `smooth_time` of zero or below snaps straight to `target` and resets
/// `rate`. A non-positive `delta_time` leaves `current` unchanged.
pub fn smooth_damp(current: f32, target: f32, rate: &mut f32, smooth_time: f32, delta_time: f32) -> f32 {
    if !(delta_time > 0.0) {
        return current;
    }
    if !(smooth_time > 0.0) {
        *rate = 0.0;
        return target;
    }

    // Critically damped spring, exp(-omega * dt) taken from a Padé-style
    // polynomial that stays in (0, 1] for any positive step.
    let omega = 2.0 / smooth_time;
    let x = omega * delta_time;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*rate + omega * change) * delta_time;
    *rate = (*rate - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // Clamp if we crossed the target this step
    if (target - current > 0.0) == (output > target) {
        output = target;
        *rate = 0.0;
    }

    output
}

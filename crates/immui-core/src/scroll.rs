//! Critically damped scroll interpolation.

/// Rates are in viewport units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTuning {
    pub min_velocity: f32,
    pub max_velocity: f32,
    /// Proportional gain applied to the remaining distance.
    pub gain: f32,
    /// Scroll distance of one wheel notch.
    pub wheel_step: f32,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            min_velocity: 0.005,
            max_velocity: 3.0,
            gain: 7.0,
            wheel_step: 0.1,
        }
    }
}

/// Moves `current` towards `target` for one frame of `dt` seconds.
///
/// Speed is proportional to the remaining distance, clamped to
/// `[min_velocity, max_velocity]`, and the result never overshoots.
pub fn step_scroll(current: f32, target: f32, dt: f32, tuning: &ScrollTuning) -> f32 {
    let distance = target - current;
    if distance == 0.0 || dt <= 0.0 {
        return current;
    }
    let speed = (distance.abs() * tuning.gain).clamp(tuning.min_velocity, tuning.max_velocity);
    let step = speed * dt;
    if step >= distance.abs() {
        target
    } else {
        current + step * distance.signum()
    }
}

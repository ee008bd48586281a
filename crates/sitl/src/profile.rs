//! Scripted value profiles
//!
//! A `Profile` is a piecewise-linear function of time built from keyframes,
//! used to script airspeed and ground-speed histories for a simulated
//! flight. Sampling clamps to the first/last keyframe outside the scripted
//! range.

use crate::error::ProfileError;

/// Piecewise-linear profile over time.
#[derive(Debug, Clone)]
pub struct Profile {
    /// (time s, value) keyframes with strictly increasing times.
    keyframes: Vec<(f32, f32)>,
}

impl Profile {
    /// Build a profile from keyframes, validating monotonic times.
    pub fn new(keyframes: Vec<(f32, f32)>) -> Result<Self, ProfileError> {
        if keyframes.is_empty() {
            return Err(ProfileError::Empty);
        }

        for (i, (t, v)) in keyframes.iter().enumerate() {
            if !t.is_finite() || !v.is_finite() {
                return Err(ProfileError::NonFinite(i));
            }
            if i > 0 && *t <= keyframes[i - 1].0 {
                return Err(ProfileError::NonMonotonic(i));
            }
        }

        Ok(Self { keyframes })
    }

    /// Constant profile.
    pub fn constant(value: f32) -> Self {
        Self {
            keyframes: vec![(0.0, value)],
        }
    }

    /// Linear ramp from `(0, start)` to `(duration, end)`.
    pub fn ramp(start: f32, end: f32, duration: f32) -> Result<Self, ProfileError> {
        Self::new(vec![(0.0, start), (duration, end)])
    }

    /// Sample the profile at time `t` (seconds).
    pub fn sample(&self, t: f32) -> f32 {
        let first = self.keyframes[0];
        if t <= first.0 {
            return first.1;
        }

        for window in self.keyframes.windows(2) {
            let (t0, v0) = window[0];
            let (t1, v1) = window[1];
            if t <= t1 {
                let frac = (t - t0) / (t1 - t0);
                return v0 + frac * (v1 - v0);
            }
        }

        self.keyframes[self.keyframes.len() - 1].1
    }
}

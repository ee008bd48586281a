//! First-order slew-rate limiter
//!
//! Rate-limits a commanded value toward a target, used to move flaps and
//! spoilers smoothly during flight-phase changes. The limiter state is the
//! value actually sent to the actuator.

/// Slew-rate limiter with persistent state.
#[derive(Debug, Clone, Copy)]
pub struct SlewRateLimiter {
    /// Maximum rate of change, in units per second.
    max_rate: f32,
    state: f32,
}

impl SlewRateLimiter {
    /// Create a limiter starting at 0.
    pub fn new(max_rate: f32) -> Self {
        Self {
            max_rate,
            state: 0.0,
        }
    }

    /// Create a limiter with an explicit initial state.
    pub fn with_state(max_rate: f32, state: f32) -> Self {
        Self { max_rate, state }
    }

    /// Advance the state one step toward `target` and return it.
    pub fn update(&mut self, target: f32, dt: f32) -> f32 {
        let max_delta = self.max_rate * dt;
        let delta = (target - self.state).clamp(-max_delta, max_delta);
        self.state += delta;
        self.state
    }

    /// Current limiter output.
    pub fn state(&self) -> f32 {
        self.state
    }

    /// Override the state without rate limiting.
    pub fn force(&mut self, value: f32) {
        self.state = value;
    }
}

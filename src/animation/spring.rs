use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Integration substep ceiling; larger frame deltas are subdivided so stiff
/// springs stay stable across dropped frames.
const MAX_SUBSTEP_SECONDS: f64 = 1.0 / 120.0;

/// Damped-oscillator parameters for one animated scalar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    /// Below this distance to target the spring may come to rest.
    pub rest_delta: f64,
    /// Below this absolute velocity the spring may come to rest.
    pub rest_velocity: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::interactive()
    }
}

impl SpringConfig {
    /// Snappy hover transitions (slice pop-out, point emphasis).
    #[must_use]
    pub const fn interactive() -> Self {
        Self {
            stiffness: 400.0,
            damping: 25.0,
            rest_delta: 0.001,
            rest_velocity: 0.001,
        }
    }

    /// Highlight segment tracking along a path.
    #[must_use]
    pub const fn highlight() -> Self {
        Self {
            stiffness: 180.0,
            damping: 28.0,
            rest_delta: 0.001,
            rest_velocity: 0.001,
        }
    }

    /// Soft entrance/grid reveals.
    #[must_use]
    pub const fn entrance() -> Self {
        Self {
            stiffness: 60.0,
            damping: 20.0,
            rest_delta: 0.001,
            rest_velocity: 0.001,
        }
    }

    /// Radar vertex retargeting: slow settle with visible follow-through.
    #[must_use]
    pub const fn polygon() -> Self {
        Self {
            stiffness: 80.0,
            damping: 15.0,
            rest_delta: 0.001,
            rest_velocity: 0.001,
        }
    }

    /// Marker fan expansion and badge pop.
    #[must_use]
    pub const fn marker_pop() -> Self {
        Self {
            stiffness: 400.0,
            damping: 22.0,
            rest_delta: 0.001,
            rest_velocity: 0.001,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.stiffness, "stiffness"),
            (self.damping, "damping"),
            (self.rest_delta, "rest_delta"),
            (self.rest_velocity, "rest_velocity"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "spring `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// One animated scalar evolved by a mass-spring-damper model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    current: f64,
    velocity: f64,
    target: f64,
    config: SpringConfig,
    at_rest: bool,
}

impl Spring {
    #[must_use]
    pub fn new(initial: f64, config: SpringConfig) -> Self {
        Self {
            current: initial,
            velocity: 0.0,
            target: initial,
            config,
            at_rest: true,
        }
    }

    #[must_use]
    pub fn current(self) -> f64 {
        self.current
    }

    #[must_use]
    pub fn target(self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn velocity(self) -> f64 {
        self.velocity
    }

    #[must_use]
    pub fn is_at_rest(self) -> bool {
        self.at_rest
    }

    /// Retargets without disturbing the in-flight position or velocity.
    pub fn set_target(&mut self, target: f64) {
        if target != self.target {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Teleports to a value, discarding velocity.
    pub fn jump(&mut self, value: f64) {
        self.current = value;
        self.target = value;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Advances the spring by `delta_seconds` and returns the new value.
    ///
    /// Semi-implicit Euler over bounded substeps.
    pub fn step(&mut self, delta_seconds: f64) -> f64 {
        if self.at_rest || delta_seconds <= 0.0 || !delta_seconds.is_finite() {
            return self.current;
        }

        let mut remaining = delta_seconds;
        while remaining > 0.0 {
            let dt = remaining.min(MAX_SUBSTEP_SECONDS);
            remaining -= dt;

            let displacement = self.target - self.current;
            let acceleration =
                self.config.stiffness * displacement - self.config.damping * self.velocity;
            self.velocity += acceleration * dt;
            self.current += self.velocity * dt;

            if (self.target - self.current).abs() <= self.config.rest_delta
                && self.velocity.abs() <= self.config.rest_velocity
            {
                self.current = self.target;
                self.velocity = 0.0;
                self.at_rest = true;
                break;
            }
        }

        self.current
    }
}

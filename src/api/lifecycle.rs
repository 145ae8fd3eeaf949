use serde::{Deserialize, Serialize};

/// Mount state of one chart instance.
///
/// `Unmounted -> Mounting -> Ready -> Unmounted`; no transition skips
/// `Mounting`. Data updates while `Ready` retarget geometry without
/// replaying the entrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartPhase {
    Unmounted,
    Mounting,
    Ready,
}

/// Entrance-gated lifecycle clock.
///
/// Interaction stays disabled until the entrance animation window has
/// elapsed, so pointer events never target geometry that is still animating
/// into place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifecycle {
    phase: ChartPhase,
    elapsed_seconds: f64,
    entrance_seconds: f64,
}

impl Lifecycle {
    #[must_use]
    pub fn new(entrance_seconds: f64) -> Self {
        Self {
            phase: ChartPhase::Unmounted,
            elapsed_seconds: 0.0,
            entrance_seconds: entrance_seconds.max(0.0),
        }
    }

    #[must_use]
    pub fn phase(self) -> ChartPhase {
        self.phase
    }

    #[must_use]
    pub fn is_loaded(self) -> bool {
        self.phase == ChartPhase::Ready
    }

    #[must_use]
    pub fn can_interact(self) -> bool {
        self.is_loaded()
    }

    /// Fraction of the entrance window elapsed, in 0..=1.
    #[must_use]
    pub fn entrance_progress(self) -> f64 {
        match self.phase {
            ChartPhase::Unmounted => 0.0,
            ChartPhase::Ready => 1.0,
            ChartPhase::Mounting => {
                if self.entrance_seconds <= 0.0 {
                    1.0
                } else {
                    (self.elapsed_seconds / self.entrance_seconds).clamp(0.0, 1.0)
                }
            }
        }
    }

    pub fn mount(&mut self) {
        if self.phase == ChartPhase::Unmounted {
            self.phase = ChartPhase::Mounting;
            self.elapsed_seconds = 0.0;
            tracing::debug!(entrance_seconds = self.entrance_seconds, "chart mounting");
        }
    }

    pub fn unmount(&mut self) {
        self.phase = ChartPhase::Unmounted;
        self.elapsed_seconds = 0.0;
    }

    /// Advances the entrance clock; promotes to `Ready` once elapsed.
    pub fn tick(&mut self, delta_seconds: f64) {
        if self.phase != ChartPhase::Mounting || !delta_seconds.is_finite() || delta_seconds <= 0.0
        {
            return;
        }
        self.elapsed_seconds += delta_seconds;
        if self.elapsed_seconds >= self.entrance_seconds {
            self.phase = ChartPhase::Ready;
            tracing::debug!("chart entrance complete, interaction enabled");
        }
    }
}

//! Scheduler configuration

use crate::easing::Easing;

/// Configuration for a [`TweenScheduler`](crate::TweenScheduler)
#[derive(Clone, Copy, Debug)]
pub struct SchedulerConfig {
    /// Multiplier applied to `dt` for scaled update phases
    pub time_scale: f32,
    /// Upper bound on a single `dt` before scaling (`None` = unbounded)
    pub max_delta: Option<f32>,
    /// Easing assigned to newly created tweens
    pub default_easing: Easing,
    /// Slots reserved up front in the registry
    pub capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_delta: None,
            default_easing: Easing::Linear,
            capacity: 64,
        }
    }
}

impl SchedulerConfig {
    /// Frame-driven hosts: clamps hitches (e.g. a debugger pause) to 1/10 s
    pub fn realtime() -> Self {
        Self {
            max_delta: Some(0.1),
            ..Default::default()
        }
    }

    /// Fixed-step hosts: never advance more than `step` per tick
    pub fn fixed_step(step: f32) -> Self {
        Self {
            max_delta: Some(step),
            ..Default::default()
        }
    }

    /// Builder: set time scale
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Builder: set max delta
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = Some(max_delta);
        self
    }

    /// Builder: set default easing
    pub fn with_default_easing(mut self, easing: Easing) -> Self {
        self.default_easing = easing;
        self
    }

    /// Builder: set initial capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Clamp then scale a raw delta for the given phase kind
    pub(crate) fn effective_delta(&self, dt: f32, unscaled: bool) -> f32 {
        let dt = match self.max_delta {
            Some(max) => dt.min(max),
            None => dt,
        };
        if unscaled {
            dt
        } else {
            dt * self.time_scale
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_delta_scaling() {
        let config = SchedulerConfig::default().with_time_scale(0.5);
        assert_eq!(config.effective_delta(0.2, false), 0.1);
        assert_eq!(config.effective_delta(0.2, true), 0.2);
    }

    #[test]
    fn test_max_delta_clamps_before_scaling() {
        let config = SchedulerConfig::realtime().with_time_scale(2.0);
        assert_eq!(config.effective_delta(5.0, false), 0.2);
        assert_eq!(config.effective_delta(5.0, true), 0.1);
    }
}

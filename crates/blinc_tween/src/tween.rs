//! Value channels
//!
//! A channel binds a typed `from → to` pair, its interpolation strategy, and
//! the change callback. The registry stores channels type-erased behind
//! [`Driver`] so instances of every value shape share one arena.

use std::any::Any;

use crate::value::{Animatable, LerpMode};
use crate::TweenScheduler;

/// Change callback receiving the new value and the scheduler
pub type ChangeCallback<T> = Box<dyn FnMut(T, &mut TweenScheduler)>;

/// Replacement interpolation strategy
pub type LerpFn<T> = Box<dyn Fn(T, T, f32) -> T>;

/// Type-erased channel
pub(crate) trait Driver: Any {
    /// Evaluate at eased progress `t` and fire the change callback
    fn apply(&mut self, t: f32, mode: LerpMode, scheduler: &mut TweenScheduler);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub(crate) struct Channel<T: Animatable> {
    pub from: T,
    pub to: T,
    /// Overrides the mode-selected strategy when set
    pub lerp: Option<LerpFn<T>>,
    pub on_change: ChangeCallback<T>,
}

impl<T: Animatable> Channel<T> {
    pub fn new(from: T, to: T, on_change: ChangeCallback<T>) -> Self {
        Self {
            from,
            to,
            lerp: None,
            on_change,
        }
    }

    pub fn value_at(&self, t: f32, mode: LerpMode) -> T {
        match &self.lerp {
            Some(lerp) => lerp(self.from, self.to, t),
            None => T::interpolate(self.from, self.to, t, mode),
        }
    }
}

impl<T: Animatable> Driver for Channel<T> {
    fn apply(&mut self, t: f32, mode: LerpMode, scheduler: &mut TweenScheduler) {
        let value = self.value_at(t, mode);
        (self.on_change)(value, scheduler);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

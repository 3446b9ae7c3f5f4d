//! Per-instance time bookkeeping
//!
//! [`Timing`] is the state machine shared by value tweens and sequences. It
//! tracks the position inside the current pass, loop and ping-pong state,
//! playback direction, and the lifecycle [`TweenState`].
//!
//! # Loop boundaries
//!
//! Reaching a pass boundary exactly counts as finishing that pass. A
//! ping-pong tween reports the boundary value and moves away from it on the
//! next tick; a restarting tween reports the start of its next pass. The
//! final pass reports its terminal value and completes.

use crate::easing::Easing;

/// Lifecycle state of an instance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TweenState {
    /// Advancing every tick of its phase
    #[default]
    Active,
    /// Held in place until resumed
    Paused,
    /// Reached its terminal value
    Complete,
    /// Cancelled; never advances again unless preserved and restarted
    Killed,
}

/// Requested lifecycle change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Pause,
    Resume,
    Complete,
    Kill,
    Restart,
}

/// How many passes a tween plays
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Loops {
    /// Total number of passes (values below 2 disable looping)
    Count(u32),
    Infinite,
}

/// What happens at the end of a pass when more passes remain
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopMode {
    /// Jump back to the start of the pass
    #[default]
    Restart,
    /// Play the next pass in the opposite direction
    PingPong,
}

/// Loop bookkeeping, present only on looping instances
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopState {
    /// Index of the pass currently playing
    pub index: u32,
    /// Passes left after the current one (`None` = infinite)
    pub remaining: Option<u32>,
    /// Total passes as configured (`None` = infinite)
    pub total: Option<u32>,
    pub mode: LoopMode,
}

/// Result of advancing or seeking an instance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// Raw progress within the current pass, `[0, 1]`
    pub progress: f32,
    /// Progress after easing
    pub eased: f32,
    /// The instance completed during this step
    pub completed: bool,
}

/// Time state of a single instance
#[derive(Clone, Debug)]
pub struct Timing {
    state: TweenState,
    duration: f32,
    /// Position inside the current pass, `[0, duration]`
    elapsed: f32,
    progress: f32,
    easing: Easing,
    loops: Option<LoopState>,
    reverse: bool,
    /// Current ping-pong pass runs backwards
    bounced: bool,
    preserve: bool,
}

impl Timing {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            state: TweenState::Active,
            duration: duration.max(0.0),
            elapsed: 0.0,
            progress: 0.0,
            easing,
            loops: None,
            reverse: false,
            bounced: false,
            preserve: false,
        }
    }

    pub fn state(&self) -> TweenState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == TweenState::Active
    }

    /// Completed or killed; an inert instance only comes back through restart
    pub fn is_finished(&self) -> bool {
        matches!(self.state, TweenState::Complete | TweenState::Killed)
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Grow or shrink the duration (sequences recompute theirs as members join)
    pub(crate) fn set_duration(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
        self.elapsed = self.elapsed.min(self.duration);
    }

    /// Position within the current pass
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn is_reversed(&self) -> bool {
        self.reverse
    }

    pub fn set_reverse(&mut self, reverse: bool) {
        self.reverse = reverse;
    }

    pub fn is_preserved(&self) -> bool {
        self.preserve
    }

    pub fn set_preserve(&mut self, preserve: bool) {
        self.preserve = preserve;
    }

    pub fn loops(&self) -> Option<&LoopState> {
        self.loops.as_ref()
    }

    /// Configure looping; resets the loop counter
    pub fn set_loops(&mut self, loops: Loops, mode: LoopMode) {
        self.bounced = false;
        self.loops = match loops {
            Loops::Count(count) if count < 2 => None,
            Loops::Count(count) => Some(LoopState {
                index: 0,
                remaining: Some(count - 1),
                total: Some(count),
                mode,
            }),
            Loops::Infinite => Some(LoopState {
                index: 0,
                remaining: None,
                total: None,
                mode,
            }),
        };
    }

    /// Total playing time across all passes; `None` when looping forever
    pub fn total_length(&self) -> Option<f32> {
        match self.loops {
            None => Some(self.duration),
            Some(LoopState { total: None, .. }) => None,
            Some(LoopState {
                total: Some(total), ..
            }) => Some(self.duration * total as f32),
        }
    }

    /// Apply a lifecycle change if it is legal from the current state
    ///
    /// Legal moves: `Active ⇄ Paused`, `Active | Paused → Complete`,
    /// anything not yet killed `→ Killed`, and anything `→ Active` through
    /// `Restart`. Returns `false` (and leaves the state untouched) otherwise.
    pub fn transition(&mut self, transition: Transition) -> bool {
        use TweenState::*;

        let next = match (self.state, transition) {
            (Active, Transition::Pause) => Paused,
            (Paused, Transition::Resume) => Active,
            (Active | Paused, Transition::Complete) => Complete,
            (Active | Paused | Complete, Transition::Kill) => Killed,
            (_, Transition::Restart) => Active,
            (state, transition) => {
                tracing::trace!(?state, ?transition, "rejected tween transition");
                return false;
            }
        };
        tracing::trace!(from = ?self.state, to = ?next, "tween transition");
        self.state = next;
        true
    }

    fn moving_forward(&self) -> bool {
        self.bounced == self.reverse
    }

    fn remaining_passes(&self) -> Option<u32> {
        match &self.loops {
            None => Some(0),
            Some(state) => state.remaining,
        }
    }

    /// Start `count` new passes
    fn consume_passes(&mut self, count: u64) {
        let Some(state) = self.loops.as_mut() else {
            return;
        };
        let count32 = u32::try_from(count).unwrap_or(u32::MAX);
        state.index = state.index.saturating_add(count32);
        if let Some(remaining) = state.remaining.as_mut() {
            *remaining = remaining.saturating_sub(count32);
        }
        if state.mode == LoopMode::PingPong && count % 2 == 1 {
            self.bounced = !self.bounced;
        }
    }

    fn terminal_elapsed(&self) -> f32 {
        if self.moving_forward() {
            self.duration
        } else {
            0.0
        }
    }

    fn update_progress(&mut self) {
        self.progress = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else if self.moving_forward() {
            1.0
        } else {
            0.0
        };
    }

    fn step(&self, completed: bool) -> Step {
        Step {
            progress: self.progress,
            eased: self.easing.apply(self.progress),
            completed,
        }
    }

    /// Advance by `dt` seconds; `None` unless the instance is Active
    ///
    /// Negative or NaN deltas are treated as zero.
    pub fn advance(&mut self, dt: f32) -> Option<Step> {
        if self.state != TweenState::Active {
            return None;
        }
        let dt = dt.max(0.0);

        if self.duration <= 0.0 {
            return Some(self.finish());
        }

        let forward = self.moving_forward();
        self.elapsed += if forward { dt } else { -dt };
        let overshoot = if forward {
            self.elapsed - self.duration
        } else {
            -self.elapsed
        };

        if overshoot >= 0.0 {
            // Saturates for huge or infinite deltas against short passes
            let extra = (overshoot / self.duration).floor() as u64;
            let crossings = extra.saturating_add(1);
            let rem = overshoot - extra as f32 * self.duration;

            match self.remaining_passes() {
                Some(remaining) if crossings > remaining as u64 => {
                    return Some(self.finish());
                }
                _ => {
                    self.consume_passes(crossings);
                    let rem = rem.clamp(0.0, self.duration);
                    self.elapsed = if self.moving_forward() {
                        rem
                    } else {
                        self.duration - rem
                    };
                }
            }
        }

        self.update_progress();
        Some(self.step(false))
    }

    /// Jump to the terminal value of the final pass and complete
    ///
    /// Infinitely looping instances finish their current pass.
    pub fn finish(&mut self) -> Step {
        if let Some(remaining) = self.remaining_passes() {
            self.consume_passes(remaining as u64);
        }
        self.elapsed = self.terminal_elapsed();
        self.update_progress();
        self.transition(Transition::Complete);
        self.step(true)
    }

    /// Rewind to the start of playback and become Active
    pub fn restart(&mut self) {
        self.bounced = false;
        if let Some(state) = self.loops.as_mut() {
            state.index = 0;
            state.remaining = state.total.map(|total| total - 1);
        }
        self.elapsed = if self.reverse { self.duration } else { 0.0 };
        self.update_progress();
        self.transition(Transition::Restart);
    }

    /// Place the instance at absolute time `time` from its start, across
    /// passes, ignoring the reverse flag (the caller owns the clock)
    ///
    /// Seeking back before the end of a completed instance revives it.
    pub fn seek(&mut self, time: f32) -> Step {
        let time = time.max(0.0);

        if self.duration <= 0.0 {
            self.bounced = false;
            self.progress = 1.0;
            let completed = self.transition(Transition::Complete);
            return self.step(completed);
        }

        let total = self.loops.as_ref().map_or(Some(1), |state| state.total);
        let mut pass = (time / self.duration).floor() as u64;
        let mut within = time - pass as f32 * self.duration;
        if let Some(total) = total {
            if pass >= total as u64 {
                pass = total as u64 - 1;
                within = self.duration;
            }
        }

        let ping_pong = self
            .loops
            .as_ref()
            .is_some_and(|state| state.mode == LoopMode::PingPong);
        self.bounced = ping_pong && pass % 2 == 1;
        if let Some(state) = self.loops.as_mut() {
            let pass32 = u32::try_from(pass).unwrap_or(u32::MAX);
            state.index = pass32;
            state.remaining = state.total.map(|total| total - 1 - pass32.min(total - 1));
        }
        let within = within.clamp(0.0, self.duration);
        self.elapsed = if self.bounced {
            self.duration - within
        } else {
            within
        };
        self.update_progress();

        let reached_end = total.is_some_and(|total| time >= self.duration * total as f32);
        let completed = if reached_end {
            self.transition(Transition::Complete)
        } else {
            if self.state == TweenState::Complete {
                self.transition(Transition::Restart);
            }
            false
        };
        self.step(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_linear_progress() {
        let mut timing = Timing::new(2.0, Easing::Linear);
        let step = timing.advance(0.5).unwrap();
        assert!(approx(step.progress, 0.25));
        assert!(!step.completed);

        let step = timing.advance(1.5).unwrap();
        assert!(approx(step.progress, 1.0));
        assert!(step.completed);
        assert_eq!(timing.state(), TweenState::Complete);

        // No further steps once complete
        assert!(timing.advance(0.5).is_none());
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut timing = Timing::new(0.0, Easing::Linear);
        let step = timing.advance(0.016).unwrap();
        assert_eq!(step.progress, 1.0);
        assert!(step.completed);
    }

    #[test]
    fn test_ping_pong_trace() {
        let mut timing = Timing::new(1.0, Easing::Linear);
        timing.set_loops(Loops::Count(3), LoopMode::PingPong);

        let trace: Vec<(f32, bool)> = (0..6)
            .map(|_| {
                let step = timing.advance(0.5).unwrap();
                (step.progress, step.completed)
            })
            .collect();

        assert_eq!(
            trace,
            vec![
                (0.5, false),
                (1.0, false),
                (0.5, false),
                (0.0, false),
                (0.5, false),
                (1.0, true),
            ]
        );
        assert_eq!(timing.loops().unwrap().index, 2);
    }

    #[test]
    fn test_restart_loop_boundary_policy() {
        let mut timing = Timing::new(1.0, Easing::Linear);
        timing.set_loops(Loops::Count(2), LoopMode::Restart);

        let progress: Vec<f32> = (0..4)
            .map(|_| timing.advance(0.5).unwrap().progress)
            .collect();
        // The exact boundary reports the start of the next pass
        assert_eq!(progress, vec![0.5, 0.0, 0.5, 1.0]);
        assert_eq!(timing.state(), TweenState::Complete);
    }

    #[test]
    fn test_overshoot_carries_into_next_pass() {
        let mut timing = Timing::new(1.0, Easing::Linear);
        timing.set_loops(Loops::Infinite, LoopMode::Restart);
        let step = timing.advance(3.25).unwrap();
        assert!(approx(step.progress, 0.25));
        assert_eq!(timing.loops().unwrap().index, 3);
        assert!(timing.is_active());
    }

    #[test]
    fn test_large_delta_exhausts_loops() {
        let mut timing = Timing::new(1.0, Easing::Linear);
        timing.set_loops(Loops::Count(4), LoopMode::PingPong);
        let step = timing.advance(100.0).unwrap();
        assert!(step.completed);
        // Four passes: forward, back, forward, back
        assert_eq!(step.progress, 0.0);
    }

    #[test]
    fn test_unbounded_delta_does_not_overflow() {
        let mut timing = Timing::new(1.0, Easing::Linear);
        timing.set_loops(Loops::Count(3), LoopMode::PingPong);
        let step = timing.advance(f32::MAX).unwrap();
        assert!(step.completed);
        assert_eq!(step.progress, 1.0);

        let mut timing = Timing::new(1e-6, Easing::Linear);
        timing.set_loops(Loops::Infinite, LoopMode::Restart);
        let step = timing.advance(f32::INFINITY).unwrap();
        assert!(!step.completed);
        assert!((0.0..=1.0).contains(&step.progress));
        assert_eq!(timing.loops().unwrap().index, u32::MAX);
    }

    #[test]
    fn test_reverse_plays_toward_zero() {
        let mut timing = Timing::new(1.0, Easing::Linear);
        timing.advance(0.75);
        timing.set_reverse(true);
        let step = timing.advance(0.25).unwrap();
        assert!(approx(step.progress, 0.5));
        let step = timing.advance(1.0).unwrap();
        assert_eq!(step.progress, 0.0);
        assert!(step.completed);
    }

    #[test]
    fn test_transition_rules() {
        let mut timing = Timing::new(1.0, Easing::Linear);
        assert!(timing.transition(Transition::Pause));
        assert!(!timing.transition(Transition::Pause));
        assert!(timing.advance(0.5).is_none());
        assert!(timing.transition(Transition::Resume));
        assert!(timing.transition(Transition::Complete));
        // Complete cannot be paused or resumed
        assert!(!timing.transition(Transition::Pause));
        assert!(!timing.transition(Transition::Resume));
        assert!(timing.transition(Transition::Kill));
        assert!(!timing.transition(Transition::Kill));
        assert!(!timing.transition(Transition::Complete));
        assert!(timing.transition(Transition::Restart));
        assert!(timing.is_active());
    }

    #[test]
    fn test_finish_infinite_loop_ends_current_pass() {
        let mut timing = Timing::new(1.0, Easing::Linear);
        timing.set_loops(Loops::Infinite, LoopMode::PingPong);
        timing.advance(1.5);
        let step = timing.finish();
        // Second pass runs backwards, so its end is progress 0
        assert_eq!(step.progress, 0.0);
        assert_eq!(timing.state(), TweenState::Complete);
    }

    #[test]
    fn test_seek_across_ping_pong_passes() {
        let mut timing = Timing::new(2.0, Easing::Linear);
        timing.set_loops(Loops::Count(2), LoopMode::PingPong);

        let step = timing.seek(1.0);
        assert!(approx(step.progress, 0.5));
        let step = timing.seek(3.0);
        assert!(approx(step.progress, 0.5));
        assert_eq!(timing.loops().unwrap().index, 1);
        let step = timing.seek(10.0);
        assert_eq!(step.progress, 0.0);
        assert!(step.completed);

        // Seeking back revives it
        let step = timing.seek(0.5);
        assert!(!step.completed);
        assert!(timing.is_active());
        assert!(approx(step.progress, 0.25));
    }

    #[test]
    fn test_restart_resets_loops() {
        let mut timing = Timing::new(1.0, Easing::Linear);
        timing.set_loops(Loops::Count(2), LoopMode::Restart);
        timing.advance(5.0);
        assert_eq!(timing.state(), TweenState::Complete);

        timing.restart();
        assert!(timing.is_active());
        assert_eq!(timing.progress(), 0.0);
        assert_eq!(timing.loops().unwrap().remaining, Some(1));
    }

    #[test]
    fn test_total_length() {
        let mut timing = Timing::new(1.5, Easing::Linear);
        assert_eq!(timing.total_length(), Some(1.5));
        timing.set_loops(Loops::Count(3), LoopMode::Restart);
        assert_eq!(timing.total_length(), Some(4.5));
        timing.set_loops(Loops::Infinite, LoopMode::Restart);
        assert_eq!(timing.total_length(), None);
    }
}

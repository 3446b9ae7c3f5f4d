//! Tween scheduler
//!
//! Owns every tween and sequence and advances them once per host tick.
//!
//! Callbacks receive `&mut TweenScheduler` and may create, kill, or mutate
//! any instance, including the one whose callback is running. Removal is
//! deferred while a tick is in progress: killed and completed instances are
//! queued and reaped once the tick returns, so the phase bucket being walked
//! never changes underneath it.

use std::mem;

use crate::config::SchedulerConfig;
use crate::easing::Easing;
use crate::error::{Result, TweenError};
use crate::registry::{Instance, Kind, Registry, Target, TweenId, UpdatePhase};
use crate::timing::{LoopMode, Loops, Step, Timing, Transition, TweenState};
use crate::tween::{Channel, Driver};
use crate::value::{Animatable, LerpMode};

/// The scheduler that ticks all tweens and sequences
pub struct TweenScheduler {
    registry: Registry,
    config: SchedulerConfig,
    /// A phase is being walked; removals are queued
    ticking: bool,
    pending_reap: Vec<TweenId>,
    /// Final steps of tweens completed from inside their own change callback
    deferred_finish: Vec<(TweenId, Step)>,
    /// Reused snapshot buffer for the phase bucket
    scratch: Vec<TweenId>,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            registry: Registry::with_capacity(config.capacity),
            config,
            ticking: false,
            pending_reap: Vec::new(),
            deferred_finish: Vec::new(),
            scratch: Vec::with_capacity(config.capacity),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Global multiplier for scaled phases
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.config.time_scale = time_scale;
    }

    pub fn time_scale(&self) -> f32 {
        self.config.time_scale
    }

    pub(crate) fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub(crate) fn config_error(&self, message: String) -> TweenError {
        tracing::warn!(%message, "rejected tween configuration");
        TweenError::Configuration(message)
    }

    fn instance(&self, id: TweenId) -> Result<&Instance> {
        self.registry.get(id).ok_or(TweenError::HandleNotFound(id))
    }

    fn instance_mut(&mut self, id: TweenId) -> Result<&mut Instance> {
        self.registry
            .get_mut(id)
            .ok_or(TweenError::HandleNotFound(id))
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Tween `from → to` over `duration` seconds, calling `on_change` with
    /// every new value
    pub fn create<T: Animatable>(
        &mut self,
        from: T,
        to: T,
        duration: f32,
        mut on_change: impl FnMut(T) + 'static,
        phase: UpdatePhase,
    ) -> TweenId {
        self.create_with(from, to, duration, move |value, _| on_change(value), phase)
    }

    /// Like [`create`](Self::create), but the callback may also drive the
    /// scheduler
    pub fn create_with<T: Animatable>(
        &mut self,
        from: T,
        to: T,
        duration: f32,
        on_change: impl FnMut(T, &mut TweenScheduler) + 'static,
        phase: UpdatePhase,
    ) -> TweenId {
        let channel = Channel::new(from, to, Box::new(on_change));
        self.insert_channel(channel, duration, self.config.default_easing, phase)
    }

    pub(crate) fn insert_channel<T: Animatable>(
        &mut self,
        channel: Channel<T>,
        duration: f32,
        easing: Easing,
        phase: UpdatePhase,
    ) -> TweenId {
        if duration.is_nan() || duration < 0.0 {
            tracing::warn!(duration, "tween duration clamped to zero");
        }
        let driver: Box<dyn Driver> = Box::new(channel);
        let instance = Instance {
            timing: Timing::new(duration, easing),
            phase,
            target: None,
            kind: Kind::Tween(Some(driver)),
            shape: T::SHAPE,
            supports: T::supports,
            lerp_mode: LerpMode::default(),
            membership: None,
            on_complete: None,
        };
        let id = self.registry.insert(instance);
        tracing::debug!(?id, ?phase, duration, shape = %T::SHAPE, "created tween");
        id
    }

    // ========================================================================
    // Ticking
    // ========================================================================

    /// Advance every root instance registered for `phase` by `dt` seconds
    ///
    /// Instances created during the tick are first advanced on the next
    /// tick of their phase. Sequence members are driven by their sequence,
    /// never directly.
    pub fn tick(&mut self, phase: UpdatePhase, dt: f32) {
        if self.ticking {
            tracing::warn!(?phase, "nested tick ignored");
            return;
        }
        let dt = self.config.effective_delta(dt, phase.is_unscaled());

        let mut batch = mem::take(&mut self.scratch);
        self.registry.snapshot_phase(phase, &mut batch);

        self.ticking = true;
        for &id in &batch {
            self.advance(id, dt);
        }
        self.ticking = false;

        tracing::trace!(?phase, dt, count = batch.len(), "ticked phase");
        self.scratch = batch;
        self.reap();
    }

    fn advance(&mut self, id: TweenId, dt: f32) {
        let Some(instance) = self.registry.get_mut(id) else {
            return;
        };
        if instance.membership.is_some() {
            return;
        }
        if let Some(step) = instance.timing.advance(dt) {
            self.deliver(id, step);
        }
    }

    /// Push a step to the instance's observers
    ///
    /// Tweens evaluate their channel and fire the change callback; sequences
    /// seek their members. Completion callbacks run last.
    pub(crate) fn deliver(&mut self, id: TweenId, step: Step) {
        let Some(instance) = self.registry.get_mut(id) else {
            return;
        };
        let mode = instance.lerp_mode;
        let is_sequence = instance.is_sequence();
        let driver = match &mut instance.kind {
            Kind::Tween(slot) => slot.take(),
            Kind::Sequence(_) => None,
        };

        if let Some(mut driver) = driver {
            driver.apply(step.eased, mode, self);
            // The callback may have killed its own instance
            if let Some(Instance {
                kind: Kind::Tween(slot),
                ..
            }) = self.registry.get_mut(id)
            {
                *slot = Some(driver);
            }
            if let Some(finish) = self.take_deferred_finish(id) {
                let still_complete = self
                    .registry
                    .get(id)
                    .is_some_and(|instance| instance.timing.state() == TweenState::Complete);
                if still_complete {
                    self.deliver(id, finish);
                }
                return;
            }
        } else if is_sequence {
            self.drive_members(id, step);
        }

        if step.completed {
            self.completed(id);
        }
    }

    fn take_deferred_finish(&mut self, id: TweenId) -> Option<Step> {
        let index = self.deferred_finish.iter().position(|(other, _)| *other == id)?;
        Some(self.deferred_finish.swap_remove(index).1)
    }

    fn completed(&mut self, id: TweenId) {
        let Some(instance) = self.registry.get_mut(id) else {
            return;
        };
        // Killed by a callback earlier in the same step
        if instance.timing.state() != TweenState::Complete {
            return;
        }
        tracing::debug!(?id, "tween complete");
        if let Some(mut callback) = instance.on_complete.take() {
            callback(id, self);
            if let Some(instance) = self.registry.get_mut(id) {
                if instance.on_complete.is_none() {
                    instance.on_complete = Some(callback);
                }
            }
        }
        self.pending_reap.push(id);
    }

    // ========================================================================
    // Lifecycle control
    // ========================================================================

    /// Apply `transition` to `id` and, for sequences, to every member
    ///
    /// Returns whether `id` itself changed state.
    fn transition_tree(&mut self, id: TweenId, transition: Transition) -> bool {
        let mut changed = false;
        for member in self.tree_ids(id) {
            let Some(instance) = self.registry.get_mut(member) else {
                continue;
            };
            if instance.timing.transition(transition) {
                changed |= member == id;
                if transition == Transition::Kill {
                    self.pending_reap.push(member);
                }
            }
        }
        changed
    }

    /// Stop advancing `id`; returns `false` unless it was Active
    pub fn pause(&mut self, id: TweenId) -> bool {
        let paused = self.transition_tree(id, Transition::Pause);
        if paused {
            tracing::debug!(?id, "paused tween");
        }
        paused
    }

    /// Continue a paused instance
    pub fn resume(&mut self, id: TweenId) -> bool {
        let resumed = self.transition_tree(id, Transition::Resume);
        if resumed {
            tracing::debug!(?id, "resumed tween");
        }
        resumed
    }

    /// Stop `id` without a final callback
    ///
    /// Killing a sequence kills its members. Unless preserved, killed
    /// instances are removed (after the current tick if one is running).
    pub fn kill(&mut self, id: TweenId) -> bool {
        let killed = self.transition_tree(id, Transition::Kill);
        if killed {
            tracing::debug!(?id, "killed tween");
        }
        self.reap();
        killed
    }

    /// Jump to the final value, firing the change and completion callbacks
    ///
    /// Members are completed by their sequence; completing one directly is
    /// refused.
    pub fn complete(&mut self, id: TweenId) -> bool {
        let Some(instance) = self.registry.get_mut(id) else {
            return false;
        };
        if instance.membership.is_some() {
            tracing::debug!(?id, "sequence members complete with their sequence");
            return false;
        }
        if !matches!(
            instance.timing.state(),
            TweenState::Active | TweenState::Paused
        ) {
            return false;
        }
        let step = instance.timing.finish();
        if matches!(instance.kind, Kind::Tween(None)) {
            // Its change callback is running; the final value follows once it returns
            self.deferred_finish.push((id, step));
            return true;
        }
        self.deliver(id, step);
        self.reap();
        true
    }

    /// Rewind to the start and play again
    ///
    /// Works on completed and killed instances that are still alive (see
    /// [`set_preserve`](Self::set_preserve)).
    pub fn restart(&mut self, id: TweenId) -> bool {
        match self.registry.get(id) {
            None => return false,
            Some(instance) if instance.membership.is_some() => {
                tracing::debug!(?id, "sequence members restart with their sequence");
                return false;
            }
            Some(_) => {}
        }
        for member in self.tree_ids(id) {
            if let Some(instance) = self.registry.get_mut(member) {
                instance.timing.restart();
                if let Some(membership) = instance.membership.as_mut() {
                    membership.last_local = None;
                }
            }
        }
        tracing::debug!(?id, "restarted tween");
        true
    }

    /// Kill every root instance; returns how many were killed
    pub fn kill_all(&mut self) -> usize {
        let roots: Vec<TweenId> = self
            .registry
            .iter()
            .filter(|(_, instance)| instance.membership.is_none())
            .map(|(id, _)| id)
            .collect();
        let killed = roots
            .into_iter()
            .filter(|&id| self.transition_tree(id, Transition::Kill))
            .count();
        self.reap();
        killed
    }

    // ========================================================================
    // Settings
    // ========================================================================

    pub fn set_ease(&mut self, id: TweenId, easing: Easing) -> Result<()> {
        self.instance_mut(id)?.timing.set_easing(easing);
        Ok(())
    }

    /// Play `loops` passes, bouncing between the endpoints if `ping_pong`
    pub fn set_loop(&mut self, id: TweenId, loops: Loops, ping_pong: bool) -> Result<()> {
        let instance = self.instance(id)?;
        if let Some(membership) = instance.membership {
            return Err(self.config_error(format!(
                "cannot change loops of {id:?} while it belongs to {:?}",
                membership.sequence
            )));
        }
        let mode = if ping_pong {
            LoopMode::PingPong
        } else {
            LoopMode::Restart
        };
        self.instance_mut(id)?.timing.set_loops(loops, mode);
        Ok(())
    }

    /// Play backwards from `to` toward `from`; sequences pass the flag on
    pub fn set_reverse(&mut self, id: TweenId, reverse: bool) -> Result<()> {
        self.instance(id)?;
        for member in self.tree_ids(id) {
            if let Some(instance) = self.registry.get_mut(member) {
                instance.timing.set_reverse(reverse);
            }
        }
        Ok(())
    }

    /// Keep the instance alive after it completes or is killed
    pub fn set_preserve(&mut self, id: TweenId, preserve: bool) -> Result<()> {
        let instance = self.instance_mut(id)?;
        instance.timing.set_preserve(preserve);
        if !preserve && instance.timing.is_finished() {
            self.pending_reap.push(id);
            self.reap();
        }
        Ok(())
    }

    /// Select one of the built-in interpolation strategies
    pub fn set_lerp_mode(&mut self, id: TweenId, mode: LerpMode) -> Result<()> {
        let instance = self.instance(id)?;
        if !(instance.supports)(mode) {
            return Err(self.config_error(format!(
                "{mode:?} interpolation is not available for {}",
                instance.shape
            )));
        }
        self.instance_mut(id)?.lerp_mode = mode;
        Ok(())
    }

    /// Replace the interpolation strategy with `lerp`
    ///
    /// `T` must be the value type the tween was created with.
    pub fn set_lerp<T: Animatable>(
        &mut self,
        id: TweenId,
        lerp: impl Fn(T, T, f32) -> T + 'static,
    ) -> Result<()> {
        let instance = self.instance_mut(id)?;
        let found = instance.shape;
        let driver = match &mut instance.kind {
            Kind::Tween(Some(driver)) => driver,
            Kind::Tween(None) => {
                tracing::warn!(?id, "lerp replaced from inside its own change callback");
                return Err(TweenError::Configuration(format!(
                    "{id:?} is running its change callback"
                )));
            }
            Kind::Sequence(_) => {
                return Err(TweenError::ValueType {
                    expected: T::SHAPE,
                    found,
                })
            }
        };
        let channel = driver
            .as_any_mut()
            .downcast_mut::<Channel<T>>()
            .ok_or(TweenError::ValueType {
                expected: T::SHAPE,
                found,
            })?;
        channel.lerp = Some(Box::new(lerp));
        Ok(())
    }

    /// Replace the completion callback
    pub fn on_complete(
        &mut self,
        id: TweenId,
        callback: impl FnMut(TweenId, &mut TweenScheduler) + 'static,
    ) -> Result<()> {
        self.instance_mut(id)?.on_complete = Some(Box::new(callback));
        Ok(())
    }

    // ========================================================================
    // Targets
    // ========================================================================

    pub fn set_target(&mut self, id: TweenId, target: impl Into<Target>) -> Result<()> {
        self.instance(id)?;
        self.registry.set_target(id, Some(target.into()));
        Ok(())
    }

    pub fn clear_target(&mut self, id: TweenId) -> Result<()> {
        self.instance(id)?;
        self.registry.set_target(id, None);
        Ok(())
    }

    pub fn target(&self, id: TweenId) -> Result<Option<Target>> {
        Ok(self.instance(id)?.target)
    }

    /// Live instances tagged with `target`
    pub fn tweens_with_target(&self, target: impl Into<Target>) -> Vec<TweenId> {
        self.registry.with_target(target.into()).to_vec()
    }

    /// Kill every instance tagged with `target`; returns how many were killed
    pub fn kill_all_with_target(&mut self, target: impl Into<Target>) -> usize {
        let target = target.into();
        let ids = self.registry.with_target(target).to_vec();
        let killed = ids
            .into_iter()
            .filter(|&id| self.transition_tree(id, Transition::Kill))
            .count();
        tracing::debug!(?target, killed, "killed tweens with target");
        self.reap();
        killed
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn state(&self, id: TweenId) -> Result<TweenState> {
        Ok(self.instance(id)?.timing.state())
    }

    /// Raw progress within the current pass, `[0, 1]`
    pub fn progress(&self, id: TweenId) -> Result<f32> {
        Ok(self.instance(id)?.timing.progress())
    }

    /// Seconds into the current pass
    pub fn elapsed(&self, id: TweenId) -> Result<f32> {
        Ok(self.instance(id)?.timing.elapsed())
    }

    /// Length of one pass in seconds
    pub fn duration(&self, id: TweenId) -> Result<f32> {
        Ok(self.instance(id)?.timing.duration())
    }

    /// Index of the pass currently playing
    pub fn loop_index(&self, id: TweenId) -> Result<u32> {
        Ok(self.instance(id)?.timing.loops().map_or(0, |l| l.index))
    }

    pub fn is_reversed(&self, id: TweenId) -> Result<bool> {
        Ok(self.instance(id)?.timing.is_reversed())
    }

    pub fn phase(&self, id: TweenId) -> Result<UpdatePhase> {
        Ok(self.instance(id)?.phase)
    }

    /// Current value of a tween, without firing its callback
    pub fn value<T: Animatable>(&self, id: TweenId) -> Result<T> {
        let instance = self.instance(id)?;
        let mismatch = TweenError::ValueType {
            expected: T::SHAPE,
            found: instance.shape,
        };
        let Kind::Tween(Some(driver)) = &instance.kind else {
            return Err(mismatch);
        };
        let channel = driver
            .as_any()
            .downcast_ref::<Channel<T>>()
            .ok_or(mismatch)?;
        let eased = instance
            .timing
            .easing()
            .apply(instance.timing.progress());
        Ok(channel.value_at(eased, instance.lerp_mode))
    }

    /// The handle still resolves to a live instance
    pub fn is_alive(&self, id: TweenId) -> bool {
        self.registry.contains(id)
    }

    /// Number of live instances, sequences included
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    /// Number of instances currently Active
    pub fn active_count(&self) -> usize {
        self.registry
            .iter()
            .filter(|(_, instance)| instance.timing.is_active())
            .count()
    }

    /// Check if any instance still needs ticking
    pub fn has_active_tweens(&self) -> bool {
        self.registry
            .iter()
            .any(|(_, instance)| instance.timing.is_active())
    }

    // ========================================================================
    // Reaping
    // ========================================================================

    fn should_reap(instance: &Instance) -> bool {
        if instance.timing.is_preserved() {
            return false;
        }
        match instance.timing.state() {
            TweenState::Killed => true,
            TweenState::Complete => instance.membership.is_none(),
            TweenState::Active | TweenState::Paused => false,
        }
    }

    /// Remove finished instances; a no-op while a tick is running
    fn reap(&mut self) {
        if self.ticking || self.pending_reap.is_empty() {
            return;
        }
        let mut removed = 0;
        for id in mem::take(&mut self.pending_reap) {
            let reap = self.registry.get(id).is_some_and(Self::should_reap);
            if reap {
                removed += self.remove_tree(id);
            }
        }
        if removed > 0 {
            self.registry.compact();
            tracing::debug!(removed, remaining = self.registry.len(), "reaped tweens");
        }
    }

    /// Remove `id`; a removed sequence takes its unpreserved members with it
    /// and releases the preserved ones
    fn remove_tree(&mut self, id: TweenId) -> usize {
        let Some(instance) = self.registry.remove(id) else {
            return 0;
        };
        let mut removed = 1;

        if let Some(membership) = instance.membership {
            if let Some(data) = self
                .registry
                .get_mut(membership.sequence)
                .and_then(Instance::sequence_mut)
            {
                data.members.retain(|member| member.id != id);
            }
        }

        if let Kind::Sequence(data) = instance.kind {
            for member in data.members {
                let Some(child) = self.registry.get_mut(member.id) else {
                    continue;
                };
                if child.timing.is_preserved() {
                    child.membership = None;
                } else {
                    removed += self.remove_tree(member.id);
                }
            }
        }
        removed
    }
}

impl Default for TweenScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder<T: Copy + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(T) + 'static) {
        let values = Rc::new(RefCell::new(Vec::new()));
        let sink = values.clone();
        (values, move |value| sink.borrow_mut().push(value))
    }

    #[test]
    fn test_create_and_tick() {
        let mut scheduler = TweenScheduler::new();
        let (values, on_change) = recorder::<f32>();
        let id = scheduler.create(0.0, 10.0, 1.0, on_change, UpdatePhase::Update);

        scheduler.tick(UpdatePhase::Update, 0.25);
        scheduler.tick(UpdatePhase::Update, 0.25);
        assert_eq!(*values.borrow(), vec![2.5, 5.0]);
        assert_eq!(scheduler.state(id).unwrap(), TweenState::Active);
        assert!((scheduler.progress(id).unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_other_phase_untouched() {
        let mut scheduler = TweenScheduler::new();
        let (values, on_change) = recorder::<f32>();
        scheduler.create(0.0, 1.0, 1.0, on_change, UpdatePhase::LateUpdate);

        scheduler.tick(UpdatePhase::Update, 0.5);
        assert!(values.borrow().is_empty());
        scheduler.tick(UpdatePhase::LateUpdate, 0.5);
        assert_eq!(values.borrow().len(), 1);
    }

    #[test]
    fn test_completion_reaps() {
        let mut scheduler = TweenScheduler::new();
        let (values, on_change) = recorder::<f32>();
        let id = scheduler.create(0.0, 1.0, 0.5, on_change, UpdatePhase::Update);

        scheduler.tick(UpdatePhase::Update, 1.0);
        assert_eq!(*values.borrow(), vec![1.0]);
        assert!(!scheduler.is_alive(id));
        assert_eq!(scheduler.state(id), Err(TweenError::HandleNotFound(id)));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_pause_resume() {
        let mut scheduler = TweenScheduler::new();
        let (values, on_change) = recorder::<f32>();
        let id = scheduler.create(0.0, 1.0, 1.0, on_change, UpdatePhase::Update);

        assert!(scheduler.pause(id));
        assert!(!scheduler.pause(id));
        scheduler.tick(UpdatePhase::Update, 0.5);
        assert!(values.borrow().is_empty());

        assert!(scheduler.resume(id));
        scheduler.tick(UpdatePhase::Update, 0.5);
        assert_eq!(*values.borrow(), vec![0.5]);
    }

    #[test]
    fn test_complete_fires_final_value() {
        let mut scheduler = TweenScheduler::new();
        let (values, on_change) = recorder::<f32>();
        let id = scheduler.create(0.0, 4.0, 1.0, on_change, UpdatePhase::Update);
        let done = Rc::new(RefCell::new(0));
        let counter = done.clone();
        scheduler
            .on_complete(id, move |_, _| *counter.borrow_mut() += 1)
            .unwrap();

        assert!(scheduler.complete(id));
        assert_eq!(*values.borrow(), vec![4.0]);
        assert_eq!(*done.borrow(), 1);
        assert!(!scheduler.is_alive(id));
        assert!(!scheduler.complete(id));
    }

    #[test]
    fn test_preserve_keeps_completed() {
        let mut scheduler = TweenScheduler::new();
        let id = scheduler.create(0.0, 1.0, 0.5, |_| {}, UpdatePhase::Update);
        scheduler.set_preserve(id, true).unwrap();

        scheduler.tick(UpdatePhase::Update, 1.0);
        assert_eq!(scheduler.state(id).unwrap(), TweenState::Complete);

        assert!(scheduler.restart(id));
        assert_eq!(scheduler.state(id).unwrap(), TweenState::Active);
        assert_eq!(scheduler.progress(id).unwrap(), 0.0);

        scheduler.tick(UpdatePhase::Update, 1.0);
        scheduler.set_preserve(id, false).unwrap();
        assert!(!scheduler.is_alive(id));
    }

    #[test]
    fn test_value_query_and_type_check() {
        let mut scheduler = TweenScheduler::new();
        let id = scheduler.create(0.0_f32, 2.0, 1.0, |_| {}, UpdatePhase::Update);
        scheduler.tick(UpdatePhase::Update, 0.5);

        assert_eq!(scheduler.value::<f32>(id).unwrap(), 1.0);
        assert!(matches!(
            scheduler.value::<crate::value::Vec2>(id),
            Err(TweenError::ValueType { .. })
        ));
    }

    #[test]
    fn test_custom_lerp() {
        let mut scheduler = TweenScheduler::new();
        let (values, on_change) = recorder::<f32>();
        let id = scheduler.create(0.0, 1.0, 1.0, on_change, UpdatePhase::Update);
        scheduler
            .set_lerp::<f32>(id, |from, to, t| if t < 1.0 { from } else { to })
            .unwrap();

        scheduler.tick(UpdatePhase::Update, 0.5);
        scheduler.tick(UpdatePhase::Update, 0.5);
        assert_eq!(*values.borrow(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_unsupported_lerp_mode() {
        let mut scheduler = TweenScheduler::new();
        let id = scheduler.create(0.0_f32, 1.0, 1.0, |_| {}, UpdatePhase::Update);
        assert!(scheduler.set_lerp_mode(id, LerpMode::ShortestAngle).is_ok());
        assert!(matches!(
            scheduler.set_lerp_mode(id, LerpMode::Slerp),
            Err(TweenError::Configuration(_))
        ));
    }

    #[test]
    fn test_time_scale() {
        let mut scheduler = TweenScheduler::new();
        scheduler.set_time_scale(0.5);
        let scaled = scheduler.create(0.0, 1.0, 1.0, |_| {}, UpdatePhase::Update);
        let unscaled = scheduler.create(0.0, 1.0, 1.0, |_| {}, UpdatePhase::UnscaledUpdate);

        scheduler.tick(UpdatePhase::Update, 0.5);
        scheduler.tick(UpdatePhase::UnscaledUpdate, 0.5);
        assert_eq!(scheduler.progress(scaled).unwrap(), 0.25);
        assert_eq!(scheduler.progress(unscaled).unwrap(), 0.5);
    }

    #[test]
    fn test_kill_all() {
        let mut scheduler = TweenScheduler::new();
        for _ in 0..3 {
            scheduler.create(0.0, 1.0, 1.0, |_| {}, UpdatePhase::Update);
        }
        assert_eq!(scheduler.active_count(), 3);
        assert_eq!(scheduler.kill_all(), 3);
        assert!(scheduler.is_empty());
        assert!(!scheduler.has_active_tweens());
    }
}

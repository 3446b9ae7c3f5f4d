//! Shake and punch effects
//!
//! A shake gives every axis its own [`Oscillation`] with randomly jittered
//! decay rates, so the axes drift apart even though they share a duration.
//! The curves are composed into a lerp strategy that swings around `from`
//! toward `to` and settles back on `from`.

use std::f32::consts::TAU;

use rand::Rng;
use smallvec::SmallVec;

use crate::easing::{Easing, Oscillation};
use crate::registry::{TweenId, UpdatePhase};
use crate::tween::Channel;
use crate::value::{Animatable, Vec2, Vec3};
use crate::TweenScheduler;

/// Value types that can be addressed one axis at a time
pub trait ShakeAxes: Animatable {
    const AXES: usize;

    fn axis(&self, index: usize) -> f32;

    fn from_axes(f: impl FnMut(usize) -> f32) -> Self;

    /// Unit-length direction drawn uniformly
    fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl ShakeAxes for f32 {
    const AXES: usize = 1;

    fn axis(&self, _index: usize) -> f32 {
        *self
    }

    fn from_axes(mut f: impl FnMut(usize) -> f32) -> Self {
        f(0)
    }

    fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen::<bool>() {
            1.0
        } else {
            -1.0
        }
    }
}

impl ShakeAxes for Vec2 {
    const AXES: usize = 2;

    fn axis(&self, index: usize) -> f32 {
        match index {
            0 => self.x,
            _ => self.y,
        }
    }

    fn from_axes(mut f: impl FnMut(usize) -> f32) -> Self {
        Vec2::new(f(0), f(1))
    }

    fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Vec2::from_angle(rng.gen::<f32>() * TAU)
    }
}

impl ShakeAxes for Vec3 {
    const AXES: usize = 3;

    fn axis(&self, index: usize) -> f32 {
        match index {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    fn from_axes(mut f: impl FnMut(usize) -> f32) -> Self {
        Vec3::new(f(0), f(1), f(2))
    }

    fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // Uniform on the sphere: uniform height, uniform azimuth
        let z = rng.gen::<f32>() * 2.0 - 1.0;
        let (sin, cos) = (rng.gen::<f32>() * TAU).sin_cos();
        let r = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(r * cos, r * sin, z)
    }
}

/// Shake configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShakeParams {
    /// Half-cycles per axis
    pub oscillations: u32,
    /// Nominal amplitude falloff rate
    pub amplitude_decay: f32,
    /// Nominal frequency falloff rate
    pub frequency_decay: f32,
    /// Relative jitter applied to amplitude and its decay, `0` = none
    pub amplitude_randomness: f32,
    /// Relative jitter applied to the frequency decay, `0` = none
    pub frequency_randomness: f32,
}

impl Default for ShakeParams {
    fn default() -> Self {
        Self {
            oscillations: 10,
            amplitude_decay: 2.0,
            frequency_decay: 1.0,
            amplitude_randomness: 0.3,
            frequency_randomness: 0.3,
        }
    }
}

impl ShakeParams {
    pub fn new(oscillations: u32) -> Self {
        Self {
            oscillations,
            ..Default::default()
        }
    }

    /// Builder: set amplitude and frequency decay
    pub fn with_decay(mut self, amplitude_decay: f32, frequency_decay: f32) -> Self {
        self.amplitude_decay = amplitude_decay;
        self.frequency_decay = frequency_decay;
        self
    }

    /// Builder: set amplitude and frequency randomness
    pub fn with_randomness(mut self, amplitude: f32, frequency: f32) -> Self {
        self.amplitude_randomness = amplitude;
        self.frequency_randomness = frequency;
        self
    }

    /// Builder: disable all jitter
    pub fn deterministic(self) -> Self {
        self.with_randomness(0.0, 0.0)
    }
}

/// `1 + U(-randomness, randomness)`
fn jitter<R: Rng + ?Sized>(rng: &mut R, randomness: f32) -> f32 {
    if randomness > 0.0 {
        1.0 + randomness * (rng.gen::<f32>() * 2.0 - 1.0)
    } else {
        1.0
    }
}

/// Per-axis oscillation curves of one shake
#[derive(Clone, Debug, PartialEq)]
pub struct Shake {
    axes: SmallVec<[Oscillation; 3]>,
}

impl Shake {
    pub fn new<R: Rng + ?Sized>(axis_count: usize, params: &ShakeParams, rng: &mut R) -> Self {
        let axes = (0..axis_count)
            .map(|_| {
                Oscillation::new(params.oscillations)
                    .with_amplitude(jitter(rng, params.amplitude_randomness))
                    .with_amplitude_decay(
                        params.amplitude_decay * jitter(rng, params.amplitude_randomness),
                    )
                    .with_frequency_decay(
                        params.frequency_decay * jitter(rng, params.frequency_randomness),
                    )
                    .starting_positive(false)
            })
            .collect();
        Self { axes }
    }

    pub fn axes(&self) -> &[Oscillation] {
        &self.axes
    }

    /// Curve of `axis` at `t`; axes beyond the generated ones are flat
    pub fn sample(&self, axis: usize, t: f32) -> f32 {
        self.axes.get(axis).map_or(0.0, |curve| curve.sample(t))
    }

    /// Lerp strategy swinging each axis of `from` toward `to` by its curve
    pub fn into_lerp<T: ShakeAxes>(self) -> impl Fn(T, T, f32) -> T + 'static {
        move |from: T, to: T, t: f32| {
            T::from_axes(|i| {
                let from_axis = from.axis(i);
                from_axis + (to.axis(i) - from_axis) * self.sample(i, t)
            })
        }
    }
}

/// Build a shake lerp strategy for `T`
pub fn create_shake<T: ShakeAxes, R: Rng + ?Sized>(
    params: &ShakeParams,
    rng: &mut R,
) -> impl Fn(T, T, f32) -> T + 'static {
    Shake::new(T::AXES, params, rng).into_lerp::<T>()
}

impl TweenScheduler {
    /// Shake around `origin` by up to `strength` in a random direction
    pub fn shake<T: ShakeAxes>(
        &mut self,
        origin: T,
        strength: f32,
        duration: f32,
        params: &ShakeParams,
        on_change: impl FnMut(T) + 'static,
        phase: UpdatePhase,
    ) -> TweenId {
        self.shake_with_rng(
            origin,
            strength,
            duration,
            params,
            on_change,
            phase,
            &mut rand::thread_rng(),
        )
    }

    /// [`shake`](Self::shake) drawing from a caller-supplied generator
    #[allow(clippy::too_many_arguments)]
    pub fn shake_with_rng<T: ShakeAxes, R: Rng + ?Sized>(
        &mut self,
        origin: T,
        strength: f32,
        duration: f32,
        params: &ShakeParams,
        mut on_change: impl FnMut(T) + 'static,
        phase: UpdatePhase,
        rng: &mut R,
    ) -> TweenId {
        let direction = T::random_direction(rng);
        let target = T::from_axes(|i| origin.axis(i) + direction.axis(i) * strength);

        let mut channel = Channel::new(
            origin,
            target,
            Box::new(move |value: T, _: &mut TweenScheduler| on_change(value)),
        );
        channel.lerp = Some(Box::new(create_shake::<T, R>(params, rng)));

        let id = self.insert_channel(channel, duration, Easing::Linear, phase);
        tracing::debug!(?id, strength, oscillations = params.oscillations, "created shake");
        id
    }

    /// Kick `origin` by `strength` and oscillate back to rest
    ///
    /// The first swing always goes toward `origin + strength`.
    pub fn punch<T: ShakeAxes>(
        &mut self,
        origin: T,
        strength: T,
        duration: f32,
        oscillation: Oscillation,
        mut on_change: impl FnMut(T) + 'static,
        phase: UpdatePhase,
    ) -> TweenId {
        let target = T::from_axes(|i| origin.axis(i) + strength.axis(i));
        let channel = Channel::new(
            origin,
            target,
            Box::new(move |value: T, _: &mut TweenScheduler| on_change(value)),
        );
        let easing = Easing::Punch(oscillation.starting_positive(true));
        let id = self.insert_channel(channel, duration, easing, phase);
        tracing::debug!(?id, count = oscillation.count, "created punch");
        id
    }
}

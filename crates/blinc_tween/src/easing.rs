//! Easing functions for tweens
//!
//! Every curve maps normalized time to normalized progress. Inputs outside
//! `[0, 1]` are evaluated by continuing the formula rather than clamping, so
//! unclamped callers see a mathematically continued result. The one exception
//! is [`Easing::CubicBezier`], whose solver is only defined on `[0, 1]`.

use std::f32::consts::PI;

/// Easing function type
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
    CubicBezier(f32, f32, f32, f32),
    /// Damped oscillation that starts and ends at zero
    Punch(Oscillation),
    /// Caller-supplied curve
    Custom(fn(f32) -> f32),
}

const BACK_C1: f32 = 1.70158;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;
const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f32 = (2.0 * PI) / 4.5;

impl Easing {
    /// Apply the easing function to a progress value (nominally 0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuart => t * t * t * t,
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::EaseInQuint => t.powi(5),
            Easing::EaseOutQuint => 1.0 - (1.0 - t).powi(5),
            Easing::EaseInOutQuint => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
            Easing::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            Easing::EaseOutSine => (t * PI / 2.0).sin(),
            Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Easing::EaseInExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * t - 10.0)
                }
            }
            Easing::EaseOutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::EaseInOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Easing::EaseInCirc => 1.0 - (1.0 - t * t).sqrt(),
            Easing::EaseOutCirc => (1.0 - (t - 1.0) * (t - 1.0)).sqrt(),
            Easing::EaseInOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            Easing::EaseInBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
            Easing::EaseOutBack => {
                let u = t - 1.0;
                1.0 + BACK_C3 * u * u * u + BACK_C1 * u * u
            }
            Easing::EaseInOutBack => {
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2)
                        + 2.0)
                        / 2.0
                }
            }
            Easing::EaseInElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    -2f32.powf(10.0 * t - 10.0) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
                }
            }
            Easing::EaseOutElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
                }
            }
            Easing::EaseInOutElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    -(2f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
                } else {
                    (2f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
                        + 1.0
                }
            }
            Easing::EaseInBounce => 1.0 - bounce_out(1.0 - t),
            Easing::EaseOutBounce => bounce_out(t),
            Easing::EaseInOutBounce => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
            Easing::Punch(oscillation) => oscillation.sample(t),
            Easing::Custom(f) => f(t),
        }
    }
}

/// Each bounce is a parabola; the last segment lands exactly on 1.
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// CSS `cubic-bezier(x1, y1, x2, y2)`; the endpoints are pinned to 0 and 1
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let x = Bezier1D::new(x1, x2);
    let y = Bezier1D::new(y1, y2);
    y.eval(x.solve(t as f64)) as f32
}

/// One axis of a bezier through `(0, p1, p2, 1)`, in power form
///
/// Evaluated in f64; f32 jitters visibly at high refresh rates.
#[derive(Clone, Copy)]
struct Bezier1D {
    a: f64,
    b: f64,
    c: f64,
}

impl Bezier1D {
    const EPSILON: f64 = 1e-7;

    fn new(p1: f32, p2: f32) -> Self {
        let (p1, p2) = (p1 as f64, p2 as f64);
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self {
            a: 1.0 - c - b,
            b,
            c,
        }
    }

    #[inline]
    fn eval(&self, s: f64) -> f64 {
        ((self.a * s + self.b) * s + self.c) * s
    }

    #[inline]
    fn derivative(&self, s: f64) -> f64 {
        (3.0 * self.a * s + 2.0 * self.b) * s + self.c
    }

    /// Parameter `s` in `[0, 1]` where the curve reaches `target`
    fn solve(&self, target: f64) -> f64 {
        let mut s = target;
        for _ in 0..8 {
            let error = self.eval(s) - target;
            if error.abs() < Self::EPSILON {
                return s;
            }
            let slope = self.derivative(s);
            if slope.abs() < Self::EPSILON {
                break;
            }
            s -= error / slope;
        }

        // Newton stalled or left the unit interval; bisect instead
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        s = target;
        while hi - lo > Self::EPSILON {
            let value = self.eval(s);
            if (value - target).abs() < Self::EPSILON {
                break;
            }
            if value < target {
                lo = s;
            } else {
                hi = s;
            }
            s = 0.5 * (lo + hi);
        }
        s
    }
}

// ============================================================================
// Damped oscillation (punch / shake)
// ============================================================================

/// Parameters of a damped oscillation curve
///
/// The curve is zero at `t = 0` and `t = 1` and crosses zero `count - 1`
/// times in between, so `count` is the number of half-cycles.
///
/// ```text
/// warp(t)     = (1 - e^(-k t)) / (1 - e^(-k))      k = frequency_decay (t when k = 0)
/// envelope(t) = amplitude · e^(-amplitude_decay · t) · (1 - t)
/// curve(t)    = envelope(t) · sin(count · π · warp(t))
/// ```
///
/// A positive `frequency_decay` packs the oscillations toward the start and
/// slows them down later; a negative one does the opposite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillation {
    /// Number of half-cycles over `[0, 1]`
    pub count: u32,
    /// Exponential amplitude falloff rate
    pub amplitude_decay: f32,
    /// Exponential frequency falloff rate
    pub frequency_decay: f32,
    /// Peak amplitude multiplier; its sign sets the polarity of the first half-cycle
    pub amplitude: f32,
    /// Force the first half-cycle to be non-negative regardless of `amplitude`
    pub always_start_positive: bool,
}

impl Default for Oscillation {
    fn default() -> Self {
        Self {
            count: 8,
            amplitude_decay: 2.0,
            frequency_decay: 0.0,
            amplitude: 1.0,
            always_start_positive: true,
        }
    }
}

impl Oscillation {
    pub fn new(count: u32) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    /// Builder: set amplitude decay
    pub fn with_amplitude_decay(mut self, decay: f32) -> Self {
        self.amplitude_decay = decay;
        self
    }

    /// Builder: set frequency decay
    pub fn with_frequency_decay(mut self, decay: f32) -> Self {
        self.frequency_decay = decay;
        self
    }

    /// Builder: set the amplitude multiplier
    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Builder: allow or forbid a negative first half-cycle
    pub fn starting_positive(mut self, always_start_positive: bool) -> Self {
        self.always_start_positive = always_start_positive;
        self
    }

    /// Evaluate the curve at `t`
    pub fn sample(&self, t: f32) -> f32 {
        let amplitude = if self.always_start_positive {
            self.amplitude.abs()
        } else {
            self.amplitude
        };
        let envelope = amplitude * (-self.amplitude_decay * t).exp() * (1.0 - t);
        let phase = self.count as f32 * PI * self.warp(t);
        envelope * phase.sin()
    }

    fn warp(&self, t: f32) -> f32 {
        let k = self.frequency_decay;
        if k.abs() < 1e-6 {
            return t;
        }
        (-k * t).exp_m1() / (-k).exp_m1()
    }
}

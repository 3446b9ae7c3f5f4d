//! Blinc Tween System
//!
//! Time-driven value tweens, sequences, and procedural shakes.
//!
//! # Features
//!
//! - **Tweens**: `from → to` over a duration for scalars, angles, vectors and
//!   rotations, with easing, loops, ping-pong and reverse playback
//! - **Sequences**: Chain (append) or parallelize (join) tweens and nested
//!   sequences under one clock
//! - **Update Phases**: Every instance belongs to one host tick phase, scaled
//!   or unscaled
//! - **Shakes & Punches**: Per-axis randomized decaying oscillations
//! - **Targets**: Tag instances with an opaque owner key for bulk kill
//!
//! # Example
//!
//! ```
//! use blinc_tween::{Easing, TweenScheduler, UpdatePhase};
//!
//! let mut scheduler = TweenScheduler::new();
//! let fade = scheduler.create(0.0_f32, 1.0, 0.5, |alpha| println!("{alpha}"), UpdatePhase::Update);
//! scheduler.set_ease(fade, Easing::EaseOutCubic).unwrap();
//!
//! scheduler.tick(UpdatePhase::Update, 1.0 / 60.0);
//! ```

pub mod config;
pub mod easing;
pub mod error;
pub mod lerp;
pub mod registry;
pub mod scheduler;
pub mod sequence;
pub mod shake;
pub mod timing;
pub mod tween;
pub mod value;

pub use config::SchedulerConfig;
pub use easing::{Easing, Oscillation};
pub use error::{Result, TweenError};
pub use registry::{CompleteCallback, Target, TweenId, UpdatePhase};
pub use scheduler::TweenScheduler;
pub use sequence::Placement;
pub use shake::{create_shake, Shake, ShakeAxes, ShakeParams};
pub use timing::{Loops, TweenState};
pub use tween::{ChangeCallback, LerpFn};
pub use value::{Angle, Animatable, LerpMode, Quat, ValueShape, Vec2, Vec3};

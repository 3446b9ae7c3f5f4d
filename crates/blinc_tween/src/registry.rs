//! Instance storage
//!
//! The registry exclusively owns every live instance. Handles are slotmap
//! keys, so a handle to a removed instance never resolves again even after
//! its slot is reused. Phase buckets and the target index hold keys only and
//! are compacted lazily.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::sequence::{Membership, SequenceData};
use crate::timing::Timing;
use crate::tween::Driver;
use crate::value::{LerpMode, ValueShape};
use crate::TweenScheduler;

new_key_type! {
    /// Handle to a tween or sequence
    pub struct TweenId;
}

/// Which host tick drives an instance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UpdatePhase {
    #[default]
    Update,
    UnscaledUpdate,
    LateUpdate,
    UnscaledLateUpdate,
    FixedUpdate,
    UnscaledFixedUpdate,
}

impl UpdatePhase {
    pub const ALL: [UpdatePhase; 6] = [
        UpdatePhase::Update,
        UpdatePhase::UnscaledUpdate,
        UpdatePhase::LateUpdate,
        UpdatePhase::UnscaledLateUpdate,
        UpdatePhase::FixedUpdate,
        UpdatePhase::UnscaledFixedUpdate,
    ];

    /// Unscaled phases ignore the scheduler's time scale
    pub fn is_unscaled(self) -> bool {
        matches!(
            self,
            UpdatePhase::UnscaledUpdate
                | UpdatePhase::UnscaledLateUpdate
                | UpdatePhase::UnscaledFixedUpdate
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Opaque owner key used for bulk lookup and cancellation
///
/// The scheduler only compares targets for equality; it never dereferences
/// them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Target(u64);

impl Target {
    pub const fn new(key: u64) -> Self {
        Self(key)
    }

    /// Key derived from the address of `value`
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self((value as *const T).cast::<()>() as usize as u64)
    }
}

impl From<u64> for Target {
    fn from(key: u64) -> Self {
        Self(key)
    }
}

/// Completion callback
pub type CompleteCallback = Box<dyn FnMut(TweenId, &mut TweenScheduler)>;

/// What an instance animates
pub(crate) enum Kind {
    /// A value tween; the driver is taken out while its callback runs
    Tween(Option<Box<dyn Driver>>),
    /// A sequence animating its own clock
    Sequence(SequenceData),
}

/// A live instance
pub(crate) struct Instance {
    pub timing: Timing,
    pub phase: UpdatePhase,
    pub target: Option<Target>,
    pub kind: Kind,
    pub shape: ValueShape,
    pub supports: fn(LerpMode) -> bool,
    pub lerp_mode: LerpMode,
    pub membership: Option<Membership>,
    pub on_complete: Option<CompleteCallback>,
}

impl Instance {
    pub fn is_sequence(&self) -> bool {
        matches!(self.kind, Kind::Sequence(_))
    }

    pub fn sequence(&self) -> Option<&SequenceData> {
        match &self.kind {
            Kind::Sequence(data) => Some(data),
            Kind::Tween(_) => None,
        }
    }

    pub fn sequence_mut(&mut self) -> Option<&mut SequenceData> {
        match &mut self.kind {
            Kind::Sequence(data) => Some(data),
            Kind::Tween(_) => None,
        }
    }
}

/// Arena of instances plus per-phase buckets and the target index
pub(crate) struct Registry {
    instances: SlotMap<TweenId, Instance>,
    phases: [Vec<TweenId>; 6],
    targets: FxHashMap<Target, SmallVec<[TweenId; 4]>>,
}

impl Registry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: SlotMap::with_capacity_and_key(capacity),
            phases: Default::default(),
            targets: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, instance: Instance) -> TweenId {
        let phase = instance.phase;
        let target = instance.target;
        let id = self.instances.insert(instance);
        self.phases[phase.index()].push(id);
        if let Some(target) = target {
            self.targets.entry(target).or_default().push(id);
        }
        id
    }

    pub fn get(&self, id: TweenId) -> Option<&Instance> {
        self.instances.get(id)
    }

    pub fn get_mut(&mut self, id: TweenId) -> Option<&mut Instance> {
        self.instances.get_mut(id)
    }

    pub fn contains(&self, id: TweenId) -> bool {
        self.instances.contains_key(id)
    }

    /// Remove an instance; bucket entries are dropped at the next compaction
    pub fn remove(&mut self, id: TweenId) -> Option<Instance> {
        let instance = self.instances.remove(id)?;
        if let Some(target) = instance.target {
            self.unindex_target(target, id);
        }
        Some(instance)
    }

    /// Replace the target of `id` in the index
    pub fn set_target(&mut self, id: TweenId, target: Option<Target>) {
        let Some(instance) = self.instances.get_mut(id) else {
            return;
        };
        let previous = std::mem::replace(&mut instance.target, target);
        if let Some(previous) = previous {
            self.unindex_target(previous, id);
        }
        if let Some(target) = target {
            self.targets.entry(target).or_default().push(id);
        }
    }

    fn unindex_target(&mut self, target: Target, id: TweenId) {
        if let Some(ids) = self.targets.get_mut(&target) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.targets.remove(&target);
            }
        }
    }

    pub fn with_target(&self, target: Target) -> &[TweenId] {
        self.targets.get(&target).map_or(&[], |ids| ids.as_slice())
    }

    /// Copy the bucket of `phase` into `out`
    pub fn snapshot_phase(&self, phase: UpdatePhase, out: &mut Vec<TweenId>) {
        out.clear();
        out.extend_from_slice(&self.phases[phase.index()]);
    }

    /// Drop bucket entries whose instance is gone
    pub fn compact(&mut self) {
        let instances = &self.instances;
        for bucket in &mut self.phases {
            bucket.retain(|id| instances.contains_key(*id));
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TweenId, &Instance)> {
        self.instances.iter()
    }
}

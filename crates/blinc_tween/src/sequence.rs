//! Sequence composition
//!
//! A sequence is an instance in the same registry as the tweens it
//! orchestrates. Its [`Timing`](crate::timing::Timing) runs the usual state
//! machine (loops, ping-pong, reverse, easing) and its eased clock seeks each
//! member to `clock - start_time`. The sequence holds member keys and each
//! member holds its owner's key; neither owns the other.

use smallvec::SmallVec;

use crate::error::{Result, TweenError};
use crate::registry::{Instance, Kind, TweenId, UpdatePhase};
use crate::timing::{Step, Timing, TweenState};
use crate::value::ValueShape;
use crate::TweenScheduler;

/// A member entry of a sequence
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Member {
    pub id: TweenId,
    pub start: f32,
}

/// Composition state of a sequence
#[derive(Clone, Debug, Default)]
pub(crate) struct SequenceData {
    pub members: SmallVec<[Member; 8]>,
    /// Start offset for the next appended member
    pub append_time: f32,
    /// Start offset for the next joined member
    pub join_time: f32,
}

/// Back-reference from a member to its sequence
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Membership {
    pub sequence: TweenId,
    pub start: f32,
    /// Local time the member was last seeked to
    pub last_local: Option<f32>,
}

/// Where a new member goes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// After everything appended so far
    Append,
    /// Alongside the most recently appended member, without moving the
    /// append cursor
    Join,
    /// At an absolute offset; does not move the cursors
    Insert(f32),
}

impl SequenceData {
    /// Resolve a placement to a start time; only appends move the cursors
    fn place(&mut self, placement: Placement, length: f32) -> f32 {
        match placement {
            Placement::Append => {
                let start = self.append_time;
                self.join_time = start;
                self.append_time = start + length;
                start
            }
            Placement::Join => self.join_time,
            Placement::Insert(at) => at.max(0.0),
        }
    }
}

impl TweenScheduler {
    /// Create an empty sequence driven by `phase`
    pub fn create_sequence(&mut self, phase: UpdatePhase) -> TweenId {
        let instance = Instance {
            timing: Timing::new(0.0, self.config().default_easing),
            phase,
            target: None,
            kind: Kind::Sequence(SequenceData::default()),
            shape: ValueShape::Sequence,
            supports: |_| false,
            lerp_mode: Default::default(),
            membership: None,
            on_complete: None,
        };
        let id = self.registry_mut().insert(instance);
        tracing::debug!(?id, ?phase, "created sequence");
        id
    }

    /// Run `id` after everything already appended to `sequence`
    pub fn append_to_sequence(&mut self, sequence: TweenId, id: TweenId) -> Result<()> {
        self.add_to_sequence(sequence, id, Placement::Append)
    }

    /// Run `id` in parallel with the most recently appended member
    pub fn join_to_sequence(&mut self, sequence: TweenId, id: TweenId) -> Result<()> {
        self.add_to_sequence(sequence, id, Placement::Join)
    }

    /// Start `id` at absolute offset `at` within `sequence`
    pub fn insert_into_sequence(&mut self, sequence: TweenId, at: f32, id: TweenId) -> Result<()> {
        self.add_to_sequence(sequence, id, Placement::Insert(at))
    }

    /// Leave a gap of `interval` seconds before the next appended member
    pub fn append_interval(&mut self, sequence: TweenId, interval: f32) -> Result<()> {
        let instance = self
            .registry_mut()
            .get_mut(sequence)
            .ok_or(TweenError::HandleNotFound(sequence))?;
        let found = instance.shape;
        let data = instance.sequence_mut().ok_or(TweenError::ValueType {
            expected: ValueShape::Sequence,
            found,
        })?;
        data.append_time += interval.max(0.0);
        let end = data.append_time;
        let duration = instance.timing.duration().max(end);
        instance.timing.set_duration(duration);
        Ok(())
    }

    /// Add `id` to `sequence` at `placement`
    pub fn add_to_sequence(
        &mut self,
        sequence: TweenId,
        id: TweenId,
        placement: Placement,
    ) -> Result<()> {
        let length = self.validate_member(sequence, id)?;
        let registry = self.registry_mut();

        let Some(owner) = registry.get_mut(sequence) else {
            return Err(TweenError::HandleNotFound(sequence));
        };
        let found = owner.shape;
        let Some(data) = owner.sequence_mut() else {
            return Err(TweenError::ValueType {
                expected: ValueShape::Sequence,
                found,
            });
        };
        let start = data.place(placement, length);
        data.members.push(Member { id, start });
        let duration = owner.timing.duration().max(start + length);
        owner.timing.set_duration(duration);

        if let Some(member) = registry.get_mut(id) {
            member.membership = Some(Membership {
                sequence,
                start,
                last_local: None,
            });
        }
        tracing::debug!(?sequence, ?id, ?placement, start, duration, "added sequence member");
        Ok(())
    }

    /// Check that `id` may join `sequence`; returns the member's total length
    fn validate_member(&self, sequence: TweenId, id: TweenId) -> Result<f32> {
        let registry = self.registry();
        let owner = registry
            .get(sequence)
            .ok_or(TweenError::HandleNotFound(sequence))?;
        let member = registry.get(id).ok_or(TweenError::HandleNotFound(id))?;

        if !owner.is_sequence() {
            return Err(TweenError::ValueType {
                expected: ValueShape::Sequence,
                found: owner.shape,
            });
        }
        if sequence == id {
            return Err(self.config_error("a sequence cannot contain itself".into()));
        }
        if let Some(membership) = member.membership {
            return Err(self.config_error(format!(
                "{id:?} already belongs to sequence {:?}",
                membership.sequence
            )));
        }

        // Appending an ancestor would make the ownership graph cyclic
        let mut cursor = owner.membership.map(|m| m.sequence);
        while let Some(ancestor) = cursor {
            if ancestor == id {
                return Err(self.config_error(format!(
                    "{id:?} is an ancestor of sequence {sequence:?}"
                )));
            }
            cursor = registry
                .get(ancestor)
                .and_then(|instance| instance.membership)
                .map(|m| m.sequence);
        }

        member.timing.total_length().ok_or_else(|| {
            self.config_error(format!("{id:?} loops forever and cannot join a sequence"))
        })
    }

    /// Member start offset within its sequence, `None` if not a member
    pub fn start_time(&self, id: TweenId) -> Result<Option<f32>> {
        let instance = self
            .registry()
            .get(id)
            .ok_or(TweenError::HandleNotFound(id))?;
        Ok(instance.membership.map(|m| m.start))
    }

    /// Owning sequence of `id`, if any
    pub fn sequence_of(&self, id: TweenId) -> Result<Option<TweenId>> {
        let instance = self
            .registry()
            .get(id)
            .ok_or(TweenError::HandleNotFound(id))?;
        Ok(instance.membership.map(|m| m.sequence))
    }

    /// Members of a sequence in insertion order
    pub fn members(&self, sequence: TweenId) -> Result<Vec<TweenId>> {
        let instance = self
            .registry()
            .get(sequence)
            .ok_or(TweenError::HandleNotFound(sequence))?;
        let data = instance.sequence().ok_or(TweenError::ValueType {
            expected: ValueShape::Sequence,
            found: instance.shape,
        })?;
        Ok(data.members.iter().map(|m| m.id).collect())
    }

    /// Seek every member of `sequence` to the sequence's eased clock
    pub(crate) fn drive_members(&mut self, sequence: TweenId, step: Step) {
        let Some(instance) = self.registry().get(sequence) else {
            return;
        };
        let Some(data) = instance.sequence() else {
            return;
        };
        let clock = step.eased * instance.timing.duration();
        let members = data.members.clone();

        for member in members {
            self.drive_member(member.id, clock - member.start);
        }
    }

    /// Seek one member to `local` seconds from its start
    ///
    /// Members that have not started yet stay silent, and members resting at
    /// the same clamped time as last tick receive no callback.
    fn drive_member(&mut self, id: TweenId, local: f32) {
        let Some(instance) = self.registry_mut().get_mut(id) else {
            return;
        };
        if matches!(
            instance.timing.state(),
            TweenState::Paused | TweenState::Killed
        ) {
            return;
        }
        let total = instance.timing.total_length().unwrap_or(f32::MAX);
        let clamped = local.clamp(0.0, total);
        let Some(membership) = instance.membership.as_mut() else {
            return;
        };
        if local < 0.0 && membership.last_local.is_none() {
            return;
        }
        if membership.last_local == Some(clamped) {
            return;
        }
        membership.last_local = Some(clamped);

        let step = instance.timing.seek(clamped);
        self.deliver(id, step);
    }

    /// `id` followed by every nested member, depth first
    pub(crate) fn tree_ids(&self, id: TweenId) -> SmallVec<[TweenId; 8]> {
        let mut ids = SmallVec::new();
        let mut stack: SmallVec<[TweenId; 8]> = smallvec::smallvec![id];
        while let Some(next) = stack.pop() {
            let Some(instance) = self.registry().get(next) else {
                continue;
            };
            ids.push(next);
            if let Some(data) = instance.sequence() {
                stack.extend(data.members.iter().rev().map(|m| m.id));
            }
        }
        ids
    }
}

//! Deferred gameplay mutations measured on the game clock.
//!
//! The clock is advanced by the owner, so pending effects never outlive the
//! game they belong to: clearing the schedule cancels them.

use std::time::Duration;

/// A state change that fires once its delay has elapsed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TimedEffect {
    /// Ends the reversed-controls window started by a mushroom.
    RestoreControls,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct PendingEffect {
    due: Duration,
    effect: TimedEffect,
}

/// Pending timed effects plus the clock they are measured against.
#[derive(Debug, Clone, Default)]
pub struct EffectSchedule {
    clock: Duration,
    pending: Vec<PendingEffect>,
}

impl EffectSchedule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `effect` to fire `delay` from now.
    ///
    /// Scheduling an effect that is already pending moves its deadline.
    pub fn schedule(&mut self, effect: TimedEffect, delay: Duration) {
        let due = self.clock + delay;
        match self.pending.iter_mut().find(|pending| pending.effect == effect) {
            Some(pending) => pending.due = due,
            None => self.pending.push(PendingEffect { due, effect }),
        }
    }

    /// Moves the clock forward and returns the effects that fell due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimedEffect> {
        self.clock += elapsed;

        let clock = self.clock;
        let mut fired: Vec<PendingEffect> = Vec::new();
        self.pending.retain(|pending| {
            if pending.due <= clock {
                fired.push(*pending);
                false
            } else {
                true
            }
        });

        fired.sort_by_key(|pending| pending.due);
        fired.into_iter().map(|pending| pending.effect).collect()
    }

    /// Cancels every pending effect.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Time left until `effect` fires, if it is pending.
    #[must_use]
    pub fn remaining(&self, effect: TimedEffect) -> Option<Duration> {
        self.pending
            .iter()
            .find(|pending| pending.effect == effect)
            .map(|pending| pending.due.saturating_sub(self.clock))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

//! Per-character slide timers.

use std::time::Duration;

use tether_core::{Character, Direction, IceSnapshot, SLIDE_INTERVAL};

/// Slide state of a single character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct IceState {
    direction: Option<Direction>,
    remaining: Duration,
}

impl IceState {
    pub(crate) fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub(crate) fn is_active(&self) -> bool {
        self.direction.is_some()
    }

    pub(crate) fn ready(&self) -> bool {
        self.is_active() && self.remaining.is_zero()
    }

    fn start(&mut self, direction: Direction) {
        self.direction = Some(direction);
        self.remaining = SLIDE_INTERVAL;
    }

    fn refresh(&mut self) {
        self.remaining = SLIDE_INTERVAL;
    }

    fn stop(&mut self) -> bool {
        self.remaining = Duration::ZERO;
        self.direction.take().is_some()
    }

    fn elapse(&mut self, dt: Duration) {
        if self.is_active() {
            self.remaining = self.remaining.saturating_sub(dt);
        }
    }
}

/// Slide timers for both characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct IceTimers {
    a: IceState,
    b: IceState,
}

impl IceTimers {
    /// Resolution order for expired timers; B moves before A.
    const ORDER: [Character; 2] = [Character::B, Character::A];

    pub(crate) fn get(&self, character: Character) -> &IceState {
        match character {
            Character::A => &self.a,
            Character::B => &self.b,
        }
    }

    fn get_mut(&mut self, character: Character) -> &mut IceState {
        match character {
            Character::A => &mut self.a,
            Character::B => &mut self.b,
        }
    }

    pub(crate) fn any_active(&self) -> bool {
        self.a.is_active() || self.b.is_active()
    }

    pub(crate) fn start(&mut self, character: Character, direction: Direction) {
        self.get_mut(character).start(direction);
    }

    pub(crate) fn refresh(&mut self, character: Character) {
        self.get_mut(character).refresh();
    }

    /// Ends the slide, reporting whether one was in progress.
    pub(crate) fn stop(&mut self, character: Character) -> bool {
        self.get_mut(character).stop()
    }

    /// Counts every active timer down by the elapsed time.
    pub(crate) fn elapse(&mut self, dt: Duration) {
        self.a.elapse(dt);
        self.b.elapse(dt);
    }

    pub(crate) fn snapshots(&self) -> Vec<IceSnapshot> {
        Self::ORDER
            .into_iter()
            .map(|character| {
                let state = self.get(character);
                IceSnapshot {
                    character,
                    direction: state.direction,
                    remaining: state.remaining,
                }
            })
            .collect()
    }
}

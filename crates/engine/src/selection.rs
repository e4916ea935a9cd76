//! Selection / turn state machine
//!
//! Tracks the player's picks since the last cycle and guards against a second
//! cycle starting while one is in flight.
//!
//! ```text
//! WaitingFirstPick --pick--> WaitingSecondPick --distinct pick--> Resolving
//!        ^                                                            |
//!        +------------------------- finish() -------------------------+
//! ```

use arrayvec::ArrayVec;

use crate::types::{Coord, TurnState, MAX_SELECTION};

/// What a pick did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// A cycle is in flight; the pick was dropped
    Ignored,
    /// The tile is already selected; nothing changed
    Duplicate,
    /// First tile recorded
    Selected,
    /// Second distinct tile recorded; the caller must resolve `(first, second)`
    /// and then call [`Selection::finish`]
    Ready(Coord, Coord),
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    picks: ArrayVec<Coord, MAX_SELECTION>,
    state: TurnState,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn picks(&self) -> &[Coord] {
        &self.picks
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn is_resolving(&self) -> bool {
        self.state == TurnState::Resolving
    }

    pub fn pick(&mut self, pos: Coord) -> PickOutcome {
        match self.state {
            TurnState::Resolving => PickOutcome::Ignored,
            _ if self.picks.contains(&pos) => PickOutcome::Duplicate,
            TurnState::WaitingFirstPick => {
                self.picks.push(pos);
                self.state = TurnState::WaitingSecondPick;
                PickOutcome::Selected
            }
            TurnState::WaitingSecondPick => {
                let first = self.picks[0];
                self.picks.push(pos);
                // Guard is held until finish()
                self.state = TurnState::Resolving;
                PickOutcome::Ready(first, pos)
            }
        }
    }

    /// Clear the selection and release the guard. Called after every cycle,
    /// whether it cascaded, reverted, was rejected or aborted.
    pub fn finish(&mut self) {
        self.picks.clear();
        self.state = TurnState::WaitingFirstPick;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_distinct_picks_start_resolving() {
        let mut selection = Selection::new();
        let a = Coord::new(0, 0);
        let b = Coord::new(1, 0);

        assert_eq!(selection.pick(a), PickOutcome::Selected);
        assert_eq!(selection.state(), TurnState::WaitingSecondPick);
        assert_eq!(selection.pick(b), PickOutcome::Ready(a, b));
        assert!(selection.is_resolving());
        assert_eq!(selection.picks(), &[a, b]);
    }

    #[test]
    fn repeated_first_pick_keeps_one_entry() {
        let mut selection = Selection::new();
        let a = Coord::new(3, 3);

        selection.pick(a);
        assert_eq!(selection.pick(a), PickOutcome::Duplicate);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.state(), TurnState::WaitingSecondPick);
    }

    #[test]
    fn picks_while_resolving_are_dropped() {
        let mut selection = Selection::new();
        selection.pick(Coord::new(0, 0));
        selection.pick(Coord::new(0, 1));

        assert_eq!(selection.pick(Coord::new(5, 5)), PickOutcome::Ignored);
        assert_eq!(selection.pick(Coord::new(0, 0)), PickOutcome::Ignored);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn finish_releases_the_guard() {
        let mut selection = Selection::new();
        selection.pick(Coord::new(0, 0));
        selection.pick(Coord::new(7, 7));
        selection.finish();

        assert!(selection.is_empty());
        assert_eq!(selection.state(), TurnState::WaitingFirstPick);
        assert_eq!(selection.pick(Coord::new(7, 7)), PickOutcome::Selected);
    }
}

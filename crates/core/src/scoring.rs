//! Scoring module - run points and the score counter
//!
//! A popped run scores `run length * value of the item that triggered it`.
//! Runs only ever hold one kind, so this equals summing each tile's value.

/// Points for popping `run_len` tiles of an item worth `value`.
pub fn run_score(run_len: usize, value: u32) -> u32 {
    let len = u32::try_from(run_len).unwrap_or(u32::MAX);
    len.saturating_mul(value)
}

/// Process-wide score total. Never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreCounter {
    total: u32,
}

impl ScoreCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Add points, saturating at `u32::MAX`.
    ///
    /// Returns true when the total changed, i.e. when the score display
    /// needs to be told.
    pub fn add(&mut self, points: u32) -> bool {
        let next = self.total.saturating_add(points);
        let changed = next != self.total;
        self.total = next;
        changed
    }
}

//! Rolling-window exact sequence detection (the Konami code and friends).

use std::collections::VecDeque;

/// `KeyboardEvent.code` values for ↑↑↓↓←→←→BA.
pub const KONAMI_CODE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "KeyB",
    "KeyA",
];

/// Matches when the last N fed tokens equal the target, N = target length.
///
/// Comparison is exact and only happens once N tokens are buffered. The buffer
/// is cleared after a match so overlapping input cannot retrigger immediately.
#[derive(Debug, Clone)]
pub struct SequenceMatcher<T> {
    target: Vec<T>,
    buffer: VecDeque<T>,
}

impl<T: PartialEq + Clone> SequenceMatcher<T> {
    pub fn new(target: impl Into<Vec<T>>) -> Self {
        let target = target.into();
        let buffer = VecDeque::with_capacity(target.len());
        Self { target, buffer }
    }

    /// Pushes one token; true iff it completes the target.
    pub fn feed(&mut self, token: T) -> bool {
        if self.target.is_empty() {
            return false;
        }
        if self.buffer.len() == self.target.len() {
            self.buffer.pop_front();
        }
        self.buffer.push_back(token);
        if self.buffer.len() < self.target.len() {
            return false;
        }
        let matched = self.buffer.iter().eq(self.target.iter());
        if matched {
            self.buffer.clear();
        }
        matched
    }

    /// Fraction of buffered positions that line up with the target. Drives the
    /// little progress bar; it is not a prefix check.
    pub fn progress(&self) -> f32 {
        if self.target.is_empty() {
            return 0.0;
        }
        let hits = self
            .buffer
            .iter()
            .zip(self.target.iter())
            .filter(|(a, b)| a == b)
            .count();
        hits as f32 / self.target.len() as f32
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

impl SequenceMatcher<String> {
    pub fn konami() -> Self {
        Self::new(KONAMI_CODE.iter().map(|c| c.to_string()).collect::<Vec<_>>())
    }
}

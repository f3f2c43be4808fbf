//! Fixed-size sliding context window.
//!
//! The window holds `2 * radius + 1` slots; the slot at offset `radius`
//! is the current word. Slots before the start and after the end of the
//! corpus are explicitly empty, so the window has the same length for
//! its whole lifetime and sliding is a plain pop/push.

use std::collections::VecDeque;

pub struct Window {
    radius: usize,
    slots: VecDeque<Option<String>>,
}

impl Window {
    pub fn new(radius: usize) -> Self {
        Window {
            radius,
            slots: std::iter::repeat_with(|| None).take(2 * radius + 1).collect(),
        }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// The word at the center of the window, if the center slot is
    /// occupied.
    pub fn current(&self) -> Option<&str> {
        self.slots[self.radius].as_deref()
    }

    /// All occupied slots whose value differs from `stimulus`, in buffer
    /// order. A word occupying two slots is reported twice.
    pub fn neighbors(&self, stimulus: &str) -> Vec<&str> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_deref())
            .filter(|word| *word != stimulus)
            .collect()
    }

    /// Drops the oldest slot and appends `next` at the newest position.
    pub fn slide(&mut self, next: Option<String>) {
        self.slots.pop_front();
        self.slots.push_back(next);
    }

    /// The occupied window contents joined with single spaces.
    pub fn sentence(&self) -> String {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

//! Back/forward navigation model.
//!
//! Mirrors what the client script does with `history.pushState` and `popstate`: every selection
//! pushes an entry keyed by the node name; moving through the entries replays them with
//! [`SelectionState::reselect`](crate::SelectionState::reselect).

/// State carried by a navigation event. `name` is `None` for the entry the page was loaded
/// with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavEntry {
    pub name: Option<String>,
}

impl NavEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    // Number of entries at or before the current position; 0 means the initial page entry.
    position: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `name`, discarding any forward entries.
    pub fn push(&mut self, name: impl Into<String>) {
        self.entries.truncate(self.position);
        self.entries.push(name.into());
        self.position = self.entries.len();
    }

    pub fn current(&self) -> NavEntry {
        NavEntry {
            name: self
                .position
                .checked_sub(1)
                .and_then(|ix| self.entries.get(ix))
                .cloned(),
        }
    }

    /// Moves one entry back; `None` when already at the initial entry.
    pub fn back(&mut self) -> Option<NavEntry> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<NavEntry> {
        if self.position >= self.entries.len() {
            return None;
        }
        self.position += 1;
        Some(self.current())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

use crate::error::{Error, Result};
use crate::history::{History, NavEntry};
use crate::index::AdjacencyIndex;
use crate::selection::{SelectionState, Transition};
use crate::sidebar::Panel;
use crate::view::GraphView;

/// Single owner of the index, the selection and the navigation history.
///
/// Each method is one discrete input event (a click, a hover, a navigation) and runs to
/// completion.
#[derive(Debug, Clone)]
pub struct Explorer {
    index: AdjacencyIndex,
    state: SelectionState,
    history: History,
}

impl Explorer {
    pub fn new(index: AdjacencyIndex) -> Self {
        Self {
            index,
            state: SelectionState::new(),
            history: History::new(),
        }
    }

    pub fn from_view(view: &GraphView) -> Self {
        Self::new(AdjacencyIndex::build(view))
    }

    pub fn index(&self) -> &AdjacencyIndex {
        &self.index
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// A click on a node or a sidebar entry. Toggles, and records a history entry when a node
    /// becomes selected.
    pub fn click(&mut self, name: &str) -> Transition {
        let transition = self.state.select(&self.index, name);
        if let Transition::Selected(_) = transition {
            self.history.push(name);
        }
        transition
    }

    /// Like [`click`](Self::click), but an unknown name is an error.
    pub fn select_existing(&mut self, name: &str) -> Result<Transition> {
        match self.click(name) {
            Transition::Unresolved => Err(Error::UnknownNode {
                name: name.to_string(),
            }),
            other => Ok(other),
        }
    }

    /// Replays a navigation entry. Always (re)selects; an entry without a name is ignored.
    pub fn navigate(&mut self, entry: &NavEntry) -> Transition {
        match entry.name.as_deref() {
            Some(name) => self.state.reselect(&self.index, name),
            None => Transition::Ignored,
        }
    }

    pub fn back(&mut self) -> Transition {
        match self.history.back() {
            Some(entry) => self.navigate(&entry),
            None => Transition::Ignored,
        }
    }

    pub fn forward(&mut self) -> Transition {
        match self.history.forward() {
            Some(entry) => self.navigate(&entry),
            None => Transition::Ignored,
        }
    }

    pub fn hover(&mut self, name: &str) -> bool {
        self.state.hover(&self.index, name)
    }

    pub fn unhover(&mut self, name: &str) -> bool {
        self.state.unhover(&self.index, name)
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    pub fn panel(&self) -> Panel {
        Panel::render(&self.index, &self.state)
    }
}

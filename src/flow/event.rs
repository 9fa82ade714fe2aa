//! Flow event arena
//!
//! Vertices of the control flow graph. Events reference each other only by
//! [`EventId`], never by pointer, so the cycles that loops introduce carry
//! no ownership hazards: the store owns every event, the adjacency lists
//! are plain id vectors.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::ast::NodeId;

/// Identifier of one flow event.
///
/// Only uniqueness (and a stable total order) is contractual. The concrete
/// representation is private; consumers must not assume one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EventId(pub(crate) usize);

impl EventId {
    /// Position of the event in its store, also usable as a dense index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Execution phase a flow event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    /// Declaration made visible ahead of its scope's execution.
    Hoist,
    /// Control arrives at an AST node.
    Enter,
    /// Control leaves an AST node.
    Exit,
}

/// One vertex of the flow graph: a phase tag, the AST node it belongs to,
/// and ordered forward/backward adjacency.
#[derive(Debug, Clone)]
pub struct FlowEvent {
    id: EventId,
    phase: Phase,
    node: NodeId,
    forward: Vec<EventId>,
    backward: Vec<EventId>,
}

impl FlowEvent {
    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Handle of the AST node this event belongs to.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn is_hoist(&self) -> bool {
        self.phase == Phase::Hoist
    }

    pub fn is_enter(&self) -> bool {
        self.phase == Phase::Enter
    }

    pub fn is_exit(&self) -> bool {
        self.phase == Phase::Exit
    }

    /// Events that may execute immediately after this one, in insertion
    /// order.
    pub fn forward(&self) -> &[EventId] {
        &self.forward
    }

    /// Events this one may immediately follow, in insertion order.
    pub fn backward(&self) -> &[EventId] {
        &self.backward
    }

    /// True when execution cannot continue past this event.
    pub fn is_terminal(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Append-only arena of flow events.
///
/// Events are created and linked only during construction; afterwards the
/// store is frozen inside the graph and safe to share across threads.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<FlowEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new event with empty adjacency.
    pub fn create(&mut self, phase: Phase, node: NodeId) -> EventId {
        let id = EventId(self.events.len());
        self.events.push(FlowEvent {
            id,
            phase,
            node,
            forward: Vec::new(),
            backward: Vec::new(),
        });
        debug!(target: "flow", "event {} <- {:?} ast={}", id, phase, node);
        id
    }

    /// Record that `to` may execute immediately after `from`.
    ///
    /// Adjacency is kept symmetric: `to` is appended to `from`'s forward
    /// list and `from` to `to`'s backward list. An edge that is already
    /// present is skipped to keep degrees small; the contract permits
    /// duplicates, the builder just never needs them.
    pub fn link(&mut self, from: EventId, to: EventId) {
        if self.events[from.0].forward.contains(&to) {
            return;
        }
        debug!(target: "flow", "edge {} -> {}", from, to);
        self.events[from.0].forward.push(to);
        self.events[to.0].backward.push(from);
    }

    pub fn get(&self, id: EventId) -> Option<&FlowEvent> {
        self.events.get(id.0)
    }

    /// Event lookup for internal callers that hold a valid id.
    pub(crate) fn event(&self, id: EventId) -> &FlowEvent {
        &self.events[id.0]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlowEvent> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assigns_unique_ids() {
        let mut store = EventStore::new();
        let a = store.create(Phase::Enter, 0);
        let b = store.create(Phase::Exit, 0);
        let c = store.create(Phase::Hoist, 1);

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(a).unwrap().phase(), Phase::Enter);
        assert!(store.get(c).unwrap().is_hoist());
    }

    #[test]
    fn link_is_symmetric() {
        let mut store = EventStore::new();
        let a = store.create(Phase::Enter, 0);
        let b = store.create(Phase::Exit, 0);
        store.link(a, b);

        assert_eq!(store.get(a).unwrap().forward(), &[b]);
        assert_eq!(store.get(b).unwrap().backward(), &[a]);
        assert!(store.get(a).unwrap().backward().is_empty());
        assert!(store.get(b).unwrap().is_terminal());
    }

    #[test]
    fn link_preserves_insertion_order() {
        let mut store = EventStore::new();
        let fork = store.create(Phase::Exit, 0);
        let first = store.create(Phase::Enter, 1);
        let second = store.create(Phase::Enter, 2);
        store.link(fork, first);
        store.link(fork, second);

        assert_eq!(store.get(fork).unwrap().forward(), &[first, second]);
    }

    #[test]
    fn duplicate_links_are_skipped() {
        let mut store = EventStore::new();
        let a = store.create(Phase::Enter, 0);
        let b = store.create(Phase::Exit, 0);
        store.link(a, b);
        store.link(a, b);

        assert_eq!(store.get(a).unwrap().forward(), &[b]);
        assert_eq!(store.get(b).unwrap().backward(), &[a]);
    }
}

//! Control flow graph construction and queries
//!
//! [`analyse`] turns a lowered ES5 AST into a [`FlowGraph`]: a directed
//! graph of flow events (hoisting, entering or exiting one AST node) that
//! over-approximates runtime control flow. The graph is immutable once
//! built and queryable forwards and backwards from its distinguished start
//! and end events.

pub mod event;
pub mod export;
pub mod hoist;
pub mod paths;
pub mod reachability;
pub mod view;

mod build;

pub use event::{EventId, EventStore, FlowEvent, Phase};
pub use export::{export_dot, export_json, EventExport, FlowExport};
pub use paths::{count_paths, enumerate_paths, Path, PathCount, PathKind, PathLimits};
pub use reachability::{can_reach, find_reachable, find_unreachable};

use crate::ast::{Ast, Node, NodeId};
use crate::error::Result;

/// Build the control flow graph of a lowered program.
///
/// The graph takes ownership of the AST; flow events reference its nodes by
/// handle for the graph's whole lifetime.
pub fn analyse(ast: Ast) -> Result<FlowGraph> {
    build::build(ast)
}

/// An immutable control flow graph over an owned AST.
///
/// Construction is single-threaded; afterwards the graph has no interior
/// mutability and is safe to share across threads.
#[derive(Debug)]
pub struct FlowGraph {
    ast: Ast,
    store: EventStore,
    start: EventId,
    end: EventId,
}

impl FlowGraph {
    pub(crate) fn new(ast: Ast, store: EventStore, start: EventId, end: EventId) -> Self {
        Self { ast, store, start, end }
    }

    /// First event of the program: its first `Hoist`, or its `Enter` when
    /// nothing hoists.
    pub fn start_of_flow(&self) -> EventRef<'_> {
        self.event_ref(self.start)
    }

    /// The program's `Exit` event. Always terminal.
    pub fn end_of_flow(&self) -> EventRef<'_> {
        self.event_ref(self.end)
    }

    /// Look up a flow event by id.
    pub fn event(&self, id: EventId) -> Option<EventRef<'_>> {
        self.store.get(id).map(|event| EventRef { graph: self, event })
    }

    /// Shallow projection of an AST node: children appear as [`NodeId`]
    /// handles resolvable through this same accessor.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.ast.get(id)
    }

    /// The underlying AST arena.
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// Number of flow events in the graph.
    pub fn event_count(&self) -> usize {
        self.store.len()
    }

    /// All flow events, in creation order.
    pub fn events(&self) -> impl Iterator<Item = EventRef<'_>> {
        self.store.iter().map(move |event| EventRef { graph: self, event })
    }

    pub(crate) fn store(&self) -> &EventStore {
        &self.store
    }

    fn event_ref(&self, id: EventId) -> EventRef<'_> {
        EventRef { graph: self, event: self.store.event(id) }
    }
}

/// A flow event borrowed from its graph, carrying enough context to
/// traverse onwards and to resolve its AST node.
#[derive(Clone, Copy)]
pub struct EventRef<'g> {
    graph: &'g FlowGraph,
    event: &'g FlowEvent,
}

impl<'g> EventRef<'g> {
    pub fn id(&self) -> EventId {
        self.event.id()
    }

    pub fn phase(&self) -> Phase {
        self.event.phase()
    }

    pub fn is_hoist(&self) -> bool {
        self.event.is_hoist()
    }

    pub fn is_enter(&self) -> bool {
        self.event.is_enter()
    }

    pub fn is_exit(&self) -> bool {
        self.event.is_exit()
    }

    /// True when no event can execute after this one.
    pub fn is_terminal(&self) -> bool {
        self.event.is_terminal()
    }

    /// Handle of the AST node this event belongs to.
    pub fn node_id(&self) -> NodeId {
        self.event.node()
    }

    /// Shallow projection of the AST node this event belongs to.
    pub fn node(&self) -> &'g Node {
        self.graph.ast.node(self.event.node())
    }

    /// Events that may execute immediately after this one.
    pub fn forward_flows(&self) -> impl Iterator<Item = EventRef<'g>> + '_ {
        let graph = self.graph;
        self.event
            .forward()
            .iter()
            .map(move |&id| EventRef { graph, event: graph.store.event(id) })
    }

    /// Events this one may immediately follow.
    pub fn backward_flows(&self) -> impl Iterator<Item = EventRef<'g>> + '_ {
        let graph = self.graph;
        self.event
            .backward()
            .iter()
            .map(move |&id| EventRef { graph, event: graph.store.event(id) })
    }

    /// The raw event record.
    pub fn raw(&self) -> &'g FlowEvent {
        self.event
    }
}

impl std::fmt::Debug for EventRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRef")
            .field("id", &self.event.id())
            .field("phase", &self.event.phase())
            .field("node", &self.node().kind())
            .finish()
    }
}

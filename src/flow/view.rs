//! petgraph projection of a flow graph
//!
//! The event store keeps its own ordered adjacency because edge order and
//! id stability are part of the public contract. Derived analyses that
//! only need graph shape (reachability, DOT rendering) run over this
//! projection instead.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use super::event::EventId;
use super::FlowGraph;

/// A `DiGraph` mirroring the flow graph, node weights being event ids,
/// plus the id-to-index map for queries against the projection.
pub fn petgraph_view(graph: &FlowGraph) -> (DiGraph<EventId, ()>, HashMap<EventId, NodeIndex>) {
    let mut view = DiGraph::with_capacity(graph.event_count(), graph.event_count());
    let mut index = HashMap::with_capacity(graph.event_count());

    for event in graph.events() {
        index.insert(event.id(), view.add_node(event.id()));
    }
    for event in graph.events() {
        let from = index[&event.id()];
        for &succ in event.raw().forward() {
            view.add_edge(from, index[&succ], ());
        }
    }

    (view, index)
}

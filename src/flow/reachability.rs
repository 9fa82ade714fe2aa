//! Reachability analysis for flow graphs
//!
//! Unreachable events are a modeling outcome (dead code after `throw` or
//! `return`, jump exits), never an error.

use std::collections::HashSet;

use petgraph::algo::has_path_connecting;
use petgraph::visit::Dfs;

use super::event::EventId;
use super::view::petgraph_view;
use super::FlowGraph;

/// All events reachable from `start_of_flow` via forward edges.
pub fn find_reachable(graph: &FlowGraph) -> HashSet<EventId> {
    let (view, index) = petgraph_view(graph);
    let start = index[&graph.start_of_flow().id()];

    let mut reachable = HashSet::new();
    let mut dfs = Dfs::new(&view, start);
    while let Some(node) = dfs.next(&view) {
        reachable.insert(view[node]);
    }
    reachable
}

/// Events with no forward path from `start_of_flow`, in creation order.
pub fn find_unreachable(graph: &FlowGraph) -> Vec<EventId> {
    let reachable = find_reachable(graph);
    graph
        .events()
        .map(|event| event.id())
        .filter(|id| !reachable.contains(id))
        .collect()
}

/// True when a forward path `from -> to` exists.
pub fn can_reach(graph: &FlowGraph, from: EventId, to: EventId) -> bool {
    let (view, index) = petgraph_view(graph);
    let (Some(&from), Some(&to)) = (index.get(&from), index.get(&to)) else {
        return false;
    };
    has_path_connecting(&view, from, to, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Ast;
    use crate::flow::{analyse, Phase};
    use serde_json::json;

    #[test]
    fn everything_on_a_straight_line_is_reachable() {
        let value = json!({
            "type": "Program",
            "body": [{
                "type": "ExpressionStatement",
                "expression": { "type": "Identifier", "name": "x" }
            }]
        });
        let graph = analyse(Ast::from_value(&value).unwrap()).unwrap();

        let reachable = find_reachable(&graph);
        assert_eq!(reachable.len(), graph.event_count());
        assert!(find_unreachable(&graph).is_empty());
        assert!(can_reach(
            &graph,
            graph.start_of_flow().id(),
            graph.end_of_flow().id()
        ));
    }

    #[test]
    fn code_after_a_top_level_throw_is_dead() {
        let value = json!({
            "type": "Program",
            "body": [
                {
                    "type": "ThrowStatement",
                    "argument": { "type": "Identifier", "name": "e" }
                },
                {
                    "type": "ExpressionStatement",
                    "expression": { "type": "Identifier", "name": "afterwards" }
                }
            ]
        });
        let graph = analyse(Ast::from_value(&value).unwrap()).unwrap();

        let unreachable: HashSet<_> = find_unreachable(&graph).into_iter().collect();
        let dead_stmt = graph
            .events()
            .find(|e| e.phase() == Phase::Enter && e.node().kind() == "ExpressionStatement")
            .unwrap();
        assert!(unreachable.contains(&dead_stmt.id()));

        // the throw still reaches the program exit
        assert!(can_reach(
            &graph,
            graph.start_of_flow().id(),
            graph.end_of_flow().id()
        ));
    }
}

//! Flow graph export to DOT and JSON formats

use petgraph::dot::{Config, Dot};
use serde::{Deserialize, Serialize};

use super::event::Phase;
use super::view::petgraph_view;
use super::FlowGraph;

/// Render the flow graph in DOT format for Graphviz.
///
/// Vertices are phase-colored: hoists gold, enters green, exits coral.
/// Terminal events get a doubled border.
pub fn export_dot(graph: &FlowGraph) -> String {
    let (view, _) = petgraph_view(graph);
    // the Dot value borrows its attribute getters, so it is rendered in
    // the same statement that creates it
    format!(
        "{:?}",
        Dot::with_attr_getters(
            &view,
            &[Config::EdgeNoLabel, Config::NodeNoLabel],
            &|_, _| String::new(),
            &|_, (_, id): (_, &super::event::EventId)| {
                let event = graph.event(*id).expect("view mirrors the store");
                let color = match event.phase() {
                    Phase::Hoist => "gold",
                    Phase::Enter => "lightgreen",
                    Phase::Exit => "lightcoral",
                };
                let shape = if event.is_terminal() { "doubleoctagon" } else { "box" };
                format!(
                    "label=\"{}: {} {}\", shape={}, style=filled, fillcolor={}",
                    event.id(),
                    phase_name(event.phase()),
                    event.node().kind(),
                    shape,
                    color
                )
            },
        )
    )
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Hoist => "hoist",
        Phase::Enter => "enter",
        Phase::Exit => "exit",
    }
}

/// Complete flow graph export for JSON serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowExport {
    pub start: usize,
    pub end: usize,
    pub events: Vec<EventExport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventExport {
    pub id: usize,
    pub phase: String,
    /// Handle of the AST node the event belongs to.
    pub node: usize,
    /// ESTree kind of that node.
    pub kind: String,
    pub forward: Vec<usize>,
    pub backward: Vec<usize>,
}

/// Export the flow graph into a serializable form.
pub fn export_json(graph: &FlowGraph) -> FlowExport {
    let events = graph
        .events()
        .map(|event| EventExport {
            id: event.id().index(),
            phase: phase_name(event.phase()).to_string(),
            node: event.node_id(),
            kind: event.node().kind().to_string(),
            forward: event.raw().forward().iter().map(|id| id.index()).collect(),
            backward: event.raw().backward().iter().map(|id| id.index()).collect(),
        })
        .collect();

    FlowExport {
        start: graph.start_of_flow().id().index(),
        end: graph.end_of_flow().id().index(),
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Ast;
    use crate::flow::analyse;
    use serde_json::json;

    fn graph() -> FlowGraph {
        let value = json!({
            "type": "Program",
            "body": [{
                "type": "IfStatement",
                "test": { "type": "Identifier", "name": "x" },
                "consequent": {
                    "type": "BlockStatement",
                    "body": []
                }
            }]
        });
        analyse(Ast::from_value(&value).unwrap()).unwrap()
    }

    #[test]
    fn dot_output_is_valid_graphviz() {
        let dot = export_dot(&graph());

        assert!(dot.starts_with("digraph"));
        assert!(dot.trim_end().ends_with('}'));
        assert!(dot.contains("enter Program"));
        assert!(dot.contains("exit IfStatement"));
        assert!(dot.contains("fillcolor=lightgreen"));
        assert!(dot.contains("fillcolor=lightcoral"));
    }

    #[test]
    fn json_export_mirrors_the_graph() {
        let g = graph();
        let export = export_json(&g);

        assert_eq!(export.events.len(), g.event_count());
        assert_eq!(export.start, g.start_of_flow().id().index());
        assert_eq!(export.end, g.end_of_flow().id().index());

        // edge symmetry survives the export
        for event in &export.events {
            for &succ in &event.forward {
                let target = &export.events[succ];
                assert!(target.backward.contains(&event.id));
            }
        }

        // and it serializes cleanly
        let text = serde_json::to_string(&export).unwrap();
        let back: FlowExport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.events.len(), export.events.len());
    }
}

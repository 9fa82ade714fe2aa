//! Syntactic hoist collection
//!
//! ES5 makes `function` declarations and `var` bindings visible at the top
//! of their enclosing function or program scope regardless of textual
//! position. Collection is purely syntactic: declarations inside
//! never-taken branches, `catch` bodies and `for`/`for-in` initializers all
//! count (the V8/IE/Safari convention). Nested function bodies never do,
//! since they hoist into their own scope.

use crate::ast::{Ast, Node, NodeId};

/// One declaration hoisted to the top of a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hoisted {
    /// A `FunctionDeclaration` node.
    Function(NodeId),
    /// A single `VariableDeclarator` of a `var` declaration.
    Var(NodeId),
}

impl Hoisted {
    pub fn node(self) -> NodeId {
        match self {
            Hoisted::Function(id) | Hoisted::Var(id) => id,
        }
    }
}

/// Collect the hoisted declarations of one scope, given its statement list.
///
/// Function declarations come first, then `var` declarators, each group in
/// source order.
pub fn collect_scope(ast: &Ast, body: &[NodeId]) -> Vec<Hoisted> {
    let mut functions = Vec::new();
    let mut vars = Vec::new();
    for &stmt in body {
        walk(ast, stmt, &mut functions, &mut vars);
    }
    functions.extend(vars);
    functions
}

fn walk(ast: &Ast, id: NodeId, functions: &mut Vec<Hoisted>, vars: &mut Vec<Hoisted>) {
    match ast.node(id) {
        Node::FunctionDeclaration { .. } => {
            // the declaration hoists; its body is a separate scope
            functions.push(Hoisted::Function(id));
        }
        Node::VariableDeclaration { declarations, kind } => {
            if kind == "var" {
                vars.extend(declarations.iter().map(|&d| Hoisted::Var(d)));
            }
        }
        Node::BlockStatement { body } => {
            for &stmt in body {
                walk(ast, stmt, functions, vars);
            }
        }
        Node::IfStatement { consequent, alternate, .. } => {
            walk(ast, *consequent, functions, vars);
            if let Some(alt) = alternate {
                walk(ast, *alt, functions, vars);
            }
        }
        Node::LabeledStatement { body, .. } | Node::WithStatement { body, .. } => {
            walk(ast, *body, functions, vars);
        }
        Node::WhileStatement { body, .. } | Node::DoWhileStatement { body, .. } => {
            walk(ast, *body, functions, vars);
        }
        Node::ForStatement { init, body, .. } => {
            if let Some(init) = init {
                walk(ast, *init, functions, vars);
            }
            walk(ast, *body, functions, vars);
        }
        Node::ForInStatement { left, body, .. } => {
            walk(ast, *left, functions, vars);
            walk(ast, *body, functions, vars);
        }
        Node::SwitchStatement { cases, .. } => {
            for &case in cases {
                if let Node::SwitchCase { consequent, .. } = ast.node(case) {
                    for &stmt in consequent {
                        walk(ast, stmt, functions, vars);
                    }
                }
            }
        }
        Node::TryStatement { block, handler, finalizer } => {
            walk(ast, *block, functions, vars);
            if let Some(handler) = handler {
                if let Node::CatchClause { body, .. } = ast.node(*handler) {
                    walk(ast, *body, functions, vars);
                }
            }
            if let Some(finalizer) = finalizer {
                walk(ast, *finalizer, functions, vars);
            }
        }
        // expressions cannot contain var declarations in ES5
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lower(value: serde_json::Value) -> Ast {
        Ast::from_value(&value).unwrap()
    }

    fn program_body(ast: &Ast) -> Vec<NodeId> {
        match ast.node(ast.root()) {
            Node::Program { body } => body.clone(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn functions_precede_vars() {
        let ast = lower(json!({
            "type": "Program",
            "body": [
                {
                    "type": "VariableDeclaration",
                    "kind": "var",
                    "declarations": [{
                        "type": "VariableDeclarator",
                        "id": { "type": "Identifier", "name": "a" }
                    }]
                },
                {
                    "type": "FunctionDeclaration",
                    "id": { "type": "Identifier", "name": "f" },
                    "params": [],
                    "body": { "type": "BlockStatement", "body": [] }
                }
            ]
        }));

        let body = program_body(&ast);
        let hoists = collect_scope(&ast, &body);
        assert_eq!(hoists.len(), 2);
        assert!(matches!(hoists[0], Hoisted::Function(_)));
        assert!(matches!(hoists[1], Hoisted::Var(_)));
    }

    #[test]
    fn conditional_and_loop_declarations_are_collected() {
        let ast = lower(json!({
            "type": "Program",
            "body": [{
                "type": "IfStatement",
                "test": { "type": "Literal", "value": false },
                "consequent": {
                    "type": "BlockStatement",
                    "body": [{
                        "type": "ForStatement",
                        "init": {
                            "type": "VariableDeclaration",
                            "kind": "var",
                            "declarations": [{
                                "type": "VariableDeclarator",
                                "id": { "type": "Identifier", "name": "i" },
                                "init": { "type": "Literal", "value": 0 }
                            }]
                        },
                        "body": {
                            "type": "BlockStatement",
                            "body": [{
                                "type": "VariableDeclaration",
                                "kind": "var",
                                "declarations": [{
                                    "type": "VariableDeclarator",
                                    "id": { "type": "Identifier", "name": "inner" }
                                }]
                            }]
                        }
                    }]
                }
            }]
        }));

        let body = program_body(&ast);
        let hoists = collect_scope(&ast, &body);
        // both declarators, in source order, despite the never-taken branch
        assert_eq!(hoists.len(), 2);
        assert!(hoists.iter().all(|h| matches!(h, Hoisted::Var(_))));
    }

    #[test]
    fn nested_function_bodies_are_skipped() {
        let ast = lower(json!({
            "type": "Program",
            "body": [{
                "type": "FunctionDeclaration",
                "id": { "type": "Identifier", "name": "outer" },
                "params": [],
                "body": {
                    "type": "BlockStatement",
                    "body": [{
                        "type": "VariableDeclaration",
                        "kind": "var",
                        "declarations": [{
                            "type": "VariableDeclarator",
                            "id": { "type": "Identifier", "name": "hidden" }
                        }]
                    }]
                }
            }]
        }));

        let body = program_body(&ast);
        let hoists = collect_scope(&ast, &body);
        assert_eq!(hoists.len(), 1);
        assert!(matches!(hoists[0], Hoisted::Function(_)));
    }

    #[test]
    fn catch_bodies_are_collected() {
        let ast = lower(json!({
            "type": "Program",
            "body": [{
                "type": "TryStatement",
                "block": { "type": "BlockStatement", "body": [] },
                "handler": {
                    "type": "CatchClause",
                    "param": { "type": "Identifier", "name": "e" },
                    "body": {
                        "type": "BlockStatement",
                        "body": [{
                            "type": "VariableDeclaration",
                            "kind": "var",
                            "declarations": [{
                                "type": "VariableDeclarator",
                                "id": { "type": "Identifier", "name": "caught" }
                            }]
                        }]
                    }
                }
            }]
        }));

        let body = program_body(&ast);
        assert_eq!(collect_scope(&ast, &body).len(), 1);
    }
}

//! ESTree ES5 AST model
//!
//! The analyser does not parse source text. It consumes an already-parsed
//! AST in the ESTree shape, delivered as JSON, and lowers it into an
//! id-indexed arena. Children are referenced by [`NodeId`] handles, which
//! makes the arena double as the shallow projection exposed through
//! [`crate::flow::FlowGraph::get_node`].

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Handle to one AST node inside an [`Ast`] arena.
pub type NodeId = usize;

/// One ES5 AST node. Child references are arena handles.
///
/// The enumeration is closed: lowering an AST containing any other node
/// kind fails with [`Error::UnknownNodeKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Program { body: Vec<NodeId> },
    BlockStatement { body: Vec<NodeId> },
    ExpressionStatement { expression: NodeId },
    IfStatement { test: NodeId, consequent: NodeId, alternate: Option<NodeId> },
    LabeledStatement { label: String, body: NodeId },
    BreakStatement { label: Option<String> },
    ContinueStatement { label: Option<String> },
    WithStatement { object: NodeId, body: NodeId },
    SwitchStatement { discriminant: NodeId, cases: Vec<NodeId> },
    SwitchCase { test: Option<NodeId>, consequent: Vec<NodeId> },
    ReturnStatement { argument: Option<NodeId> },
    ThrowStatement { argument: NodeId },
    TryStatement { block: NodeId, handler: Option<NodeId>, finalizer: Option<NodeId> },
    CatchClause { param: NodeId, body: NodeId },
    WhileStatement { test: NodeId, body: NodeId },
    DoWhileStatement { body: NodeId, test: NodeId },
    ForStatement { init: Option<NodeId>, test: Option<NodeId>, update: Option<NodeId>, body: NodeId },
    ForInStatement { left: NodeId, right: NodeId, body: NodeId },
    FunctionDeclaration { id: NodeId, params: Vec<NodeId>, body: NodeId },
    FunctionExpression { id: Option<NodeId>, params: Vec<NodeId>, body: NodeId },
    VariableDeclaration { declarations: Vec<NodeId>, kind: String },
    VariableDeclarator { id: NodeId, init: Option<NodeId> },
    ThisExpression,
    ArrayExpression { elements: Vec<Option<NodeId>> },
    ObjectExpression { properties: Vec<NodeId> },
    Property { key: NodeId, value: NodeId, kind: String },
    SequenceExpression { expressions: Vec<NodeId> },
    UnaryExpression { operator: String, prefix: bool, argument: NodeId },
    BinaryExpression { operator: String, left: NodeId, right: NodeId },
    AssignmentExpression { operator: String, left: NodeId, right: NodeId },
    UpdateExpression { operator: String, prefix: bool, argument: NodeId },
    LogicalExpression { operator: String, left: NodeId, right: NodeId },
    ConditionalExpression { test: NodeId, consequent: NodeId, alternate: NodeId },
    CallExpression { callee: NodeId, arguments: Vec<NodeId> },
    NewExpression { callee: NodeId, arguments: Vec<NodeId> },
    MemberExpression { object: NodeId, property: NodeId, computed: bool },
    Identifier { name: String },
    Literal { value: Value },
}

impl Node {
    /// The ESTree `type` string for this node.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Program { .. } => "Program",
            Node::BlockStatement { .. } => "BlockStatement",
            Node::ExpressionStatement { .. } => "ExpressionStatement",
            Node::IfStatement { .. } => "IfStatement",
            Node::LabeledStatement { .. } => "LabeledStatement",
            Node::BreakStatement { .. } => "BreakStatement",
            Node::ContinueStatement { .. } => "ContinueStatement",
            Node::WithStatement { .. } => "WithStatement",
            Node::SwitchStatement { .. } => "SwitchStatement",
            Node::SwitchCase { .. } => "SwitchCase",
            Node::ReturnStatement { .. } => "ReturnStatement",
            Node::ThrowStatement { .. } => "ThrowStatement",
            Node::TryStatement { .. } => "TryStatement",
            Node::CatchClause { .. } => "CatchClause",
            Node::WhileStatement { .. } => "WhileStatement",
            Node::DoWhileStatement { .. } => "DoWhileStatement",
            Node::ForStatement { .. } => "ForStatement",
            Node::ForInStatement { .. } => "ForInStatement",
            Node::FunctionDeclaration { .. } => "FunctionDeclaration",
            Node::FunctionExpression { .. } => "FunctionExpression",
            Node::VariableDeclaration { .. } => "VariableDeclaration",
            Node::VariableDeclarator { .. } => "VariableDeclarator",
            Node::ThisExpression => "ThisExpression",
            Node::ArrayExpression { .. } => "ArrayExpression",
            Node::ObjectExpression { .. } => "ObjectExpression",
            Node::Property { .. } => "Property",
            Node::SequenceExpression { .. } => "SequenceExpression",
            Node::UnaryExpression { .. } => "UnaryExpression",
            Node::BinaryExpression { .. } => "BinaryExpression",
            Node::AssignmentExpression { .. } => "AssignmentExpression",
            Node::UpdateExpression { .. } => "UpdateExpression",
            Node::LogicalExpression { .. } => "LogicalExpression",
            Node::ConditionalExpression { .. } => "ConditionalExpression",
            Node::CallExpression { .. } => "CallExpression",
            Node::NewExpression { .. } => "NewExpression",
            Node::MemberExpression { .. } => "MemberExpression",
            Node::Identifier { .. } => "Identifier",
            Node::Literal { .. } => "Literal",
        }
    }
}

/// An ES5 program lowered into an arena.
///
/// The arena is append-only during lowering and read-only afterwards. The
/// flow graph holds the `Ast` for its whole lifetime, so event handles into
/// it never dangle.
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    /// Lower an ESTree JSON value into an arena.
    ///
    /// The root must be a `Program` node. Structural violations (unknown
    /// node kind, missing or ill-typed field) abort lowering.
    pub fn from_value(value: &Value) -> Result<Self> {
        let mut lowerer = Lowerer { nodes: Vec::new() };
        let root = lowerer.lower(value)?;
        if !matches!(lowerer.nodes[root], Node::Program { .. }) {
            return Err(Error::Malformed(format!(
                "root node must be a Program, got `{}`",
                lowerer.nodes[root].kind()
            )));
        }
        Ok(Ast { nodes: lowerer.nodes, root })
    }

    /// Parse JSON text and lower it.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Handle of the `Program` root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by handle.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node lookup for internal callers that hold a valid handle.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Re-serialize the subtree rooted at `id` back into ESTree JSON.
    ///
    /// Lowering followed by `to_value` is structure-preserving: applying it
    /// to the root yields a tree equal to the input (ignoring location
    /// metadata, which lowering drops).
    pub fn to_value(&self, id: NodeId) -> Value {
        let node = &self.nodes[id];
        let mut obj = Map::new();
        obj.insert("type".into(), Value::String(node.kind().into()));
        match node {
            Node::Program { body } | Node::BlockStatement { body } => {
                obj.insert("body".into(), self.list(body));
            }
            Node::ExpressionStatement { expression } => {
                obj.insert("expression".into(), self.to_value(*expression));
            }
            Node::IfStatement { test, consequent, alternate } => {
                obj.insert("test".into(), self.to_value(*test));
                obj.insert("consequent".into(), self.to_value(*consequent));
                if let Some(alt) = alternate {
                    obj.insert("alternate".into(), self.to_value(*alt));
                }
            }
            Node::LabeledStatement { label, body } => {
                obj.insert("label".into(), ident_value(label));
                obj.insert("body".into(), self.to_value(*body));
            }
            Node::BreakStatement { label } | Node::ContinueStatement { label } => {
                if let Some(name) = label {
                    obj.insert("label".into(), ident_value(name));
                }
            }
            Node::WithStatement { object, body } => {
                obj.insert("object".into(), self.to_value(*object));
                obj.insert("body".into(), self.to_value(*body));
            }
            Node::SwitchStatement { discriminant, cases } => {
                obj.insert("discriminant".into(), self.to_value(*discriminant));
                obj.insert("cases".into(), self.list(cases));
            }
            Node::SwitchCase { test, consequent } => {
                if let Some(test) = test {
                    obj.insert("test".into(), self.to_value(*test));
                }
                obj.insert("consequent".into(), self.list(consequent));
            }
            Node::ReturnStatement { argument } => {
                if let Some(arg) = argument {
                    obj.insert("argument".into(), self.to_value(*arg));
                }
            }
            Node::ThrowStatement { argument } => {
                obj.insert("argument".into(), self.to_value(*argument));
            }
            Node::TryStatement { block, handler, finalizer } => {
                obj.insert("block".into(), self.to_value(*block));
                if let Some(handler) = handler {
                    obj.insert("handler".into(), self.to_value(*handler));
                }
                if let Some(finalizer) = finalizer {
                    obj.insert("finalizer".into(), self.to_value(*finalizer));
                }
            }
            Node::CatchClause { param, body } => {
                obj.insert("param".into(), self.to_value(*param));
                obj.insert("body".into(), self.to_value(*body));
            }
            Node::WhileStatement { test, body } => {
                obj.insert("test".into(), self.to_value(*test));
                obj.insert("body".into(), self.to_value(*body));
            }
            Node::DoWhileStatement { body, test } => {
                obj.insert("body".into(), self.to_value(*body));
                obj.insert("test".into(), self.to_value(*test));
            }
            Node::ForStatement { init, test, update, body } => {
                if let Some(init) = init {
                    obj.insert("init".into(), self.to_value(*init));
                }
                if let Some(test) = test {
                    obj.insert("test".into(), self.to_value(*test));
                }
                if let Some(update) = update {
                    obj.insert("update".into(), self.to_value(*update));
                }
                obj.insert("body".into(), self.to_value(*body));
            }
            Node::ForInStatement { left, right, body } => {
                obj.insert("left".into(), self.to_value(*left));
                obj.insert("right".into(), self.to_value(*right));
                obj.insert("body".into(), self.to_value(*body));
            }
            Node::FunctionDeclaration { id, params, body } => {
                obj.insert("id".into(), self.to_value(*id));
                obj.insert("params".into(), self.list(params));
                obj.insert("body".into(), self.to_value(*body));
            }
            Node::FunctionExpression { id, params, body } => {
                if let Some(id) = id {
                    obj.insert("id".into(), self.to_value(*id));
                }
                obj.insert("params".into(), self.list(params));
                obj.insert("body".into(), self.to_value(*body));
            }
            Node::VariableDeclaration { declarations, kind } => {
                obj.insert("declarations".into(), self.list(declarations));
                obj.insert("kind".into(), Value::String(kind.clone()));
            }
            Node::VariableDeclarator { id, init } => {
                obj.insert("id".into(), self.to_value(*id));
                if let Some(init) = init {
                    obj.insert("init".into(), self.to_value(*init));
                }
            }
            Node::ThisExpression => {}
            Node::ArrayExpression { elements } => {
                let elements: Vec<Value> = elements
                    .iter()
                    .map(|el| match el {
                        Some(id) => self.to_value(*id),
                        None => Value::Null,
                    })
                    .collect();
                obj.insert("elements".into(), Value::Array(elements));
            }
            Node::ObjectExpression { properties } => {
                obj.insert("properties".into(), self.list(properties));
            }
            Node::Property { key, value, kind } => {
                obj.insert("key".into(), self.to_value(*key));
                obj.insert("value".into(), self.to_value(*value));
                obj.insert("kind".into(), Value::String(kind.clone()));
            }
            Node::SequenceExpression { expressions } => {
                obj.insert("expressions".into(), self.list(expressions));
            }
            Node::UnaryExpression { operator, prefix, argument }
            | Node::UpdateExpression { operator, prefix, argument } => {
                obj.insert("operator".into(), Value::String(operator.clone()));
                obj.insert("prefix".into(), Value::Bool(*prefix));
                obj.insert("argument".into(), self.to_value(*argument));
            }
            Node::BinaryExpression { operator, left, right }
            | Node::AssignmentExpression { operator, left, right }
            | Node::LogicalExpression { operator, left, right } => {
                obj.insert("operator".into(), Value::String(operator.clone()));
                obj.insert("left".into(), self.to_value(*left));
                obj.insert("right".into(), self.to_value(*right));
            }
            Node::ConditionalExpression { test, consequent, alternate } => {
                obj.insert("test".into(), self.to_value(*test));
                obj.insert("consequent".into(), self.to_value(*consequent));
                obj.insert("alternate".into(), self.to_value(*alternate));
            }
            Node::CallExpression { callee, arguments }
            | Node::NewExpression { callee, arguments } => {
                obj.insert("callee".into(), self.to_value(*callee));
                obj.insert("arguments".into(), self.list(arguments));
            }
            Node::MemberExpression { object, property, computed } => {
                obj.insert("object".into(), self.to_value(*object));
                obj.insert("property".into(), self.to_value(*property));
                obj.insert("computed".into(), Value::Bool(*computed));
            }
            Node::Identifier { name } => {
                obj.insert("name".into(), Value::String(name.clone()));
            }
            Node::Literal { value } => {
                obj.insert("value".into(), value.clone());
            }
        }
        Value::Object(obj)
    }

    fn list(&self, ids: &[NodeId]) -> Value {
        Value::Array(ids.iter().map(|&id| self.to_value(id)).collect())
    }
}

fn ident_value(name: &str) -> Value {
    let mut obj = Map::new();
    obj.insert("type".into(), Value::String("Identifier".into()));
    obj.insert("name".into(), Value::String(name.into()));
    Value::Object(obj)
}

/// Recursive lowering from `serde_json::Value` into the arena.
struct Lowerer {
    nodes: Vec<Node>,
}

impl Lowerer {
    fn lower(&mut self, value: &Value) -> Result<NodeId> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::Malformed(format!("expected an AST node object, got {value}")))?;
        let kind = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Malformed("AST node has no `type` field".into()))?;

        let node = match kind {
            "Program" => Node::Program { body: self.node_list(obj, kind, "body")? },
            "BlockStatement" => Node::BlockStatement { body: self.node_list(obj, kind, "body")? },
            "ExpressionStatement" => Node::ExpressionStatement {
                expression: self.child(obj, kind, "expression")?,
            },
            "IfStatement" => Node::IfStatement {
                test: self.child(obj, kind, "test")?,
                consequent: self.child(obj, kind, "consequent")?,
                alternate: self.opt_child(obj, "alternate")?,
            },
            "LabeledStatement" => Node::LabeledStatement {
                label: label_name(obj, kind, "label")?
                    .ok_or(Error::MissingField { kind: kind.into(), field: "label" })?,
                body: self.child(obj, kind, "body")?,
            },
            "BreakStatement" => Node::BreakStatement { label: label_name(obj, kind, "label")? },
            "ContinueStatement" => Node::ContinueStatement { label: label_name(obj, kind, "label")? },
            "WithStatement" => Node::WithStatement {
                object: self.child(obj, kind, "object")?,
                body: self.child(obj, kind, "body")?,
            },
            "SwitchStatement" => Node::SwitchStatement {
                discriminant: self.child(obj, kind, "discriminant")?,
                cases: self.node_list(obj, kind, "cases")?,
            },
            "SwitchCase" => Node::SwitchCase {
                test: self.opt_child(obj, "test")?,
                consequent: self.node_list(obj, kind, "consequent")?,
            },
            "ReturnStatement" => Node::ReturnStatement { argument: self.opt_child(obj, "argument")? },
            "ThrowStatement" => Node::ThrowStatement { argument: self.child(obj, kind, "argument")? },
            "TryStatement" => Node::TryStatement {
                block: self.child(obj, kind, "block")?,
                handler: self.opt_child(obj, "handler")?,
                finalizer: self.opt_child(obj, "finalizer")?,
            },
            "CatchClause" => Node::CatchClause {
                param: self.child(obj, kind, "param")?,
                body: self.child(obj, kind, "body")?,
            },
            "WhileStatement" => Node::WhileStatement {
                test: self.child(obj, kind, "test")?,
                body: self.child(obj, kind, "body")?,
            },
            "DoWhileStatement" => Node::DoWhileStatement {
                body: self.child(obj, kind, "body")?,
                test: self.child(obj, kind, "test")?,
            },
            "ForStatement" => Node::ForStatement {
                init: self.opt_child(obj, "init")?,
                test: self.opt_child(obj, "test")?,
                update: self.opt_child(obj, "update")?,
                body: self.child(obj, kind, "body")?,
            },
            "ForInStatement" => Node::ForInStatement {
                left: self.child(obj, kind, "left")?,
                right: self.child(obj, kind, "right")?,
                body: self.child(obj, kind, "body")?,
            },
            "FunctionDeclaration" => Node::FunctionDeclaration {
                id: self.child(obj, kind, "id")?,
                params: self.node_list(obj, kind, "params")?,
                body: self.child(obj, kind, "body")?,
            },
            "FunctionExpression" => Node::FunctionExpression {
                id: self.opt_child(obj, "id")?,
                params: self.node_list(obj, kind, "params")?,
                body: self.child(obj, kind, "body")?,
            },
            "VariableDeclaration" => Node::VariableDeclaration {
                declarations: self.node_list(obj, kind, "declarations")?,
                kind: str_field(obj, "kind").unwrap_or("var").to_string(),
            },
            "VariableDeclarator" => Node::VariableDeclarator {
                id: self.child(obj, kind, "id")?,
                init: self.opt_child(obj, "init")?,
            },
            "ThisExpression" => Node::ThisExpression,
            "ArrayExpression" => {
                let raw = list_field(obj, kind, "elements")?;
                let mut elements = Vec::with_capacity(raw.len());
                for el in raw {
                    elements.push(match el {
                        Value::Null => None,
                        other => Some(self.lower(other)?),
                    });
                }
                Node::ArrayExpression { elements }
            }
            "ObjectExpression" => Node::ObjectExpression {
                properties: self.node_list(obj, kind, "properties")?,
            },
            "Property" => Node::Property {
                key: self.child(obj, kind, "key")?,
                value: self.child(obj, kind, "value")?,
                kind: str_field(obj, "kind").unwrap_or("init").to_string(),
            },
            "SequenceExpression" => Node::SequenceExpression {
                expressions: self.node_list(obj, kind, "expressions")?,
            },
            "UnaryExpression" => Node::UnaryExpression {
                operator: required_str(obj, kind, "operator")?,
                prefix: bool_field(obj, "prefix").unwrap_or(true),
                argument: self.child(obj, kind, "argument")?,
            },
            "BinaryExpression" => Node::BinaryExpression {
                operator: required_str(obj, kind, "operator")?,
                left: self.child(obj, kind, "left")?,
                right: self.child(obj, kind, "right")?,
            },
            "AssignmentExpression" => Node::AssignmentExpression {
                operator: required_str(obj, kind, "operator")?,
                left: self.child(obj, kind, "left")?,
                right: self.child(obj, kind, "right")?,
            },
            "UpdateExpression" => Node::UpdateExpression {
                operator: required_str(obj, kind, "operator")?,
                prefix: bool_field(obj, "prefix").unwrap_or(false),
                argument: self.child(obj, kind, "argument")?,
            },
            "LogicalExpression" => Node::LogicalExpression {
                operator: required_str(obj, kind, "operator")?,
                left: self.child(obj, kind, "left")?,
                right: self.child(obj, kind, "right")?,
            },
            "ConditionalExpression" => Node::ConditionalExpression {
                test: self.child(obj, kind, "test")?,
                consequent: self.child(obj, kind, "consequent")?,
                alternate: self.child(obj, kind, "alternate")?,
            },
            "CallExpression" => Node::CallExpression {
                callee: self.child(obj, kind, "callee")?,
                arguments: self.node_list(obj, kind, "arguments")?,
            },
            "NewExpression" => Node::NewExpression {
                callee: self.child(obj, kind, "callee")?,
                // `new F` without an argument list is legal ES5
                arguments: match obj.get("arguments") {
                    Some(_) => self.node_list(obj, kind, "arguments")?,
                    None => Vec::new(),
                },
            },
            "MemberExpression" => Node::MemberExpression {
                object: self.child(obj, kind, "object")?,
                property: self.child(obj, kind, "property")?,
                computed: bool_field(obj, "computed").unwrap_or(false),
            },
            "Identifier" => Node::Identifier {
                name: required_str(obj, kind, "name")?,
            },
            "Literal" => Node::Literal {
                value: obj.get("value").cloned().unwrap_or(Value::Null),
            },
            other => return Err(Error::UnknownNodeKind(other.to_string())),
        };

        self.nodes.push(node);
        Ok(self.nodes.len() - 1)
    }

    fn child(&mut self, obj: &Map<String, Value>, kind: &str, field: &'static str) -> Result<NodeId> {
        match obj.get(field) {
            Some(Value::Null) | None => {
                Err(Error::MissingField { kind: kind.to_string(), field })
            }
            Some(value) => self.lower(value),
        }
    }

    fn opt_child(&mut self, obj: &Map<String, Value>, field: &str) -> Result<Option<NodeId>> {
        match obj.get(field) {
            Some(Value::Null) | None => Ok(None),
            Some(value) => Ok(Some(self.lower(value)?)),
        }
    }

    fn node_list(
        &mut self,
        obj: &Map<String, Value>,
        kind: &str,
        field: &'static str,
    ) -> Result<Vec<NodeId>> {
        let raw = list_field(obj, kind, field)?;
        let mut ids = Vec::with_capacity(raw.len());
        for value in raw {
            ids.push(self.lower(value)?);
        }
        Ok(ids)
    }
}

fn list_field<'v>(
    obj: &'v Map<String, Value>,
    kind: &str,
    field: &'static str,
) -> Result<&'v Vec<Value>> {
    obj.get(field)
        .and_then(Value::as_array)
        .ok_or(Error::MissingField { kind: kind.to_string(), field })
}

fn str_field<'v>(obj: &'v Map<String, Value>, field: &str) -> Option<&'v str> {
    obj.get(field).and_then(Value::as_str)
}

fn bool_field(obj: &Map<String, Value>, field: &str) -> Option<bool> {
    obj.get(field).and_then(Value::as_bool)
}

fn required_str(obj: &Map<String, Value>, kind: &str, field: &'static str) -> Result<String> {
    str_field(obj, field)
        .map(str::to_string)
        .ok_or(Error::MissingField { kind: kind.to_string(), field })
}

/// A `label` field is an Identifier node in ESTree; only the name matters
/// for flow construction.
fn label_name(obj: &Map<String, Value>, kind: &str, field: &'static str) -> Result<Option<String>> {
    match obj.get(field) {
        Some(Value::Null) | None => Ok(None),
        Some(value) => {
            let label = value
                .as_object()
                .and_then(|o| o.get("name"))
                .and_then(Value::as_str)
                .ok_or(Error::MissingField { kind: kind.to_string(), field })?;
            Ok(Some(label.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lowers_a_call_statement() {
        let value = json!({
            "type": "Program",
            "body": [{
                "type": "ExpressionStatement",
                "expression": {
                    "type": "CallExpression",
                    "callee": { "type": "Identifier", "name": "helloWorld" },
                    "arguments": []
                }
            }]
        });

        let ast = Ast::from_value(&value).unwrap();
        assert_eq!(ast.len(), 4); // identifier, call, statement, program

        let Node::Program { body } = ast.get(ast.root()).unwrap() else {
            panic!("root is not a Program");
        };
        assert_eq!(body.len(), 1);
        let Node::ExpressionStatement { expression } = ast.node(body[0]) else {
            panic!("expected an ExpressionStatement");
        };
        assert_eq!(ast.node(*expression).kind(), "CallExpression");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let value = json!({
            "type": "Program",
            "body": [{ "type": "ArrowFunctionExpression", "body": [] }]
        });

        let err = Ast::from_value(&value).unwrap_err();
        assert!(matches!(err, Error::UnknownNodeKind(k) if k == "ArrowFunctionExpression"));
    }

    #[test]
    fn missing_field_is_rejected() {
        let value = json!({
            "type": "Program",
            "body": [{ "type": "ExpressionStatement" }]
        });

        let err = Ast::from_value(&value).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField { ref kind, field: "expression" } if kind == "ExpressionStatement"
        ));
    }

    #[test]
    fn non_program_root_is_rejected() {
        let value = json!({ "type": "Identifier", "name": "x" });
        let err = Ast::from_value(&value).unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[test]
    fn round_trips_structurally() {
        let value = json!({
            "type": "Program",
            "body": [
                {
                    "type": "IfStatement",
                    "test": { "type": "Identifier", "name": "x" },
                    "consequent": {
                        "type": "BlockStatement",
                        "body": [{
                            "type": "ExpressionStatement",
                            "expression": {
                                "type": "AssignmentExpression",
                                "operator": "=",
                                "left": { "type": "Identifier", "name": "y" },
                                "right": { "type": "Literal", "value": 1 }
                            }
                        }]
                    }
                },
                {
                    "type": "VariableDeclaration",
                    "kind": "var",
                    "declarations": [{
                        "type": "VariableDeclarator",
                        "id": { "type": "Identifier", "name": "z" },
                        "init": {
                            "type": "ArrayExpression",
                            "elements": [null, { "type": "Literal", "value": true }]
                        }
                    }]
                }
            ]
        });

        let ast = Ast::from_value(&value).unwrap();
        assert_eq!(ast.to_value(ast.root()), value);
    }
}

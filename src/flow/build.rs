//! Flow construction
//!
//! A single recursive pass over the AST. Every rule has the same shape:
//! link the incoming frontier into the node's `Enter` event, wire the
//! interior, and hand back the frontier leaving the node's `Exit`. An
//! empty frontier means the node never completes normally. Jump targets
//! are resolved against a stack of enclosing-construct frames; routes that
//! cross a `finally` divert into the finalizer and resume from its `Exit`
//! once the finalizer's body has been wired.

use tracing::debug;

use crate::ast::{Ast, Node, NodeId};
use crate::error::{Error, Result};

use super::event::{EventId, EventStore, Phase};
use super::hoist::{self, Hoisted};
use super::FlowGraph;

pub(crate) fn build(ast: Ast) -> Result<FlowGraph> {
    let (store, start, end) = {
        let mut builder = Builder::new(&ast);
        let (start, end) = builder.program(ast.root())?;
        (builder.store, start, end)
    };
    Ok(FlowGraph::new(ast, store, start, end))
}

/// One enclosing construct that can be the target of a jump.
#[derive(Debug)]
enum Frame {
    Loop {
        labels: Vec<String>,
        break_to: EventId,
        continue_to: EventId,
    },
    Switch {
        break_to: EventId,
    },
    Labeled {
        label: String,
        break_to: EventId,
    },
    /// A `try` with a finalizer. Jumps crossing it divert into `entry`;
    /// their original targets accumulate here and become forward edges of
    /// the finalizer's `Exit`.
    Finally {
        entry: EventId,
        continuations: Vec<EventId>,
    },
    Catch {
        entry: EventId,
    },
    Function {
        return_to: EventId,
    },
    Program {
        throw_to: EventId,
    },
}

struct Builder<'a> {
    ast: &'a Ast,
    store: EventStore,
    frames: Vec<Frame>,
    /// Enter/Exit events already created for a node, either by its own rule
    /// or ahead of it when a back edge or jump needs the id early.
    enters: Vec<Option<EventId>>,
    exits: Vec<Option<EventId>>,
    /// Labels waiting for the loop they name (set by `LabeledStatement`,
    /// consumed by the immediately-labeled loop).
    pending_labels: Vec<String>,
}

impl<'a> Builder<'a> {
    fn new(ast: &'a Ast) -> Self {
        Self {
            ast,
            store: EventStore::new(),
            frames: Vec::new(),
            enters: vec![None; ast.len()],
            exits: vec![None; ast.len()],
            pending_labels: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Event bookkeeping
    // ------------------------------------------------------------------

    fn enter_event(&mut self, node: NodeId) -> EventId {
        match self.enters[node] {
            Some(id) => id,
            None => {
                let id = self.store.create(Phase::Enter, node);
                self.enters[node] = Some(id);
                id
            }
        }
    }

    fn exit_event(&mut self, node: NodeId) -> EventId {
        match self.exits[node] {
            Some(id) => id,
            None => {
                let id = self.store.create(Phase::Exit, node);
                self.exits[node] = Some(id);
                id
            }
        }
    }

    fn enter_of(&self, node: NodeId) -> EventId {
        self.enters[node].expect("child wired before its enter is referenced")
    }

    /// Create (or adopt) the node's `Enter`/`Exit` pair and absorb the
    /// incoming frontier.
    fn open(&mut self, node: NodeId, incoming: &[EventId]) -> (EventId, EventId) {
        let en = self.enter_event(node);
        self.link_all(incoming, en);
        let ex = self.exit_event(node);
        (en, ex)
    }

    /// Link the remaining frontier into the node's `Exit` and decide what
    /// leaves it. An `Exit` nothing flows into (interior short-circuited
    /// elsewhere) makes the node non-returning.
    fn close(&mut self, ex: EventId, outs: Vec<EventId>) -> Vec<EventId> {
        self.link_all(&outs, ex);
        if self.store.event(ex).backward().is_empty() {
            Vec::new()
        } else {
            vec![ex]
        }
    }

    fn link_all(&mut self, froms: &[EventId], to: EventId) {
        for &from in froms {
            self.store.link(from, to);
        }
    }

    // ------------------------------------------------------------------
    // Driver
    // ------------------------------------------------------------------

    /// Wire the program: hoist phase, then the execution phase, then the
    /// designated start/end events.
    fn program(&mut self, root: NodeId) -> Result<(EventId, EventId)> {
        let ast = self.ast;
        let Node::Program { body } = ast.node(root) else {
            return Err(Error::Malformed("root node must be a Program".into()));
        };
        debug!(target: "flow", "analysing program: {} statements", body.len());

        let en = self.enter_event(root);
        let ex = self.exit_event(root);
        self.frames.push(Frame::Program { throw_to: ex });

        let hoists = hoist::collect_scope(ast, body);
        let (chain, first_hoist) = self.emit_hoists(&hoists, Vec::new())?;
        self.link_all(&chain, en);

        let outs = self.wire_seq(body, vec![en])?;
        self.link_all(&outs, ex);
        self.frames.pop();

        Ok((first_hoist.unwrap_or(en), ex))
    }

    /// Emit the hoist chain of one scope. Function declarations get their
    /// body region wired immediately, hanging off their `Hoist` event.
    fn emit_hoists(
        &mut self,
        items: &[Hoisted],
        mut chain: Vec<EventId>,
    ) -> Result<(Vec<EventId>, Option<EventId>)> {
        let mut first = None;
        for item in items {
            let event = self.store.create(Phase::Hoist, item.node());
            self.link_all(&chain, event);
            if first.is_none() {
                first = Some(event);
            }
            if let Hoisted::Function(func) = item {
                self.wire_function(*func, event)?;
            }
            chain = vec![event];
        }
        Ok((chain, first))
    }

    /// Wire a function body as its own reachable region rooted at `root`.
    ///
    /// The region runs its scope's hoist chain, then the body; `return`
    /// targets the body's `Exit`, which stays terminal. The region never
    /// rejoins the enclosing flow.
    fn wire_function(&mut self, func: NodeId, root: EventId) -> Result<()> {
        let ast = self.ast;
        let body = match ast.node(func) {
            Node::FunctionDeclaration { body, .. } | Node::FunctionExpression { body, .. } => *body,
            other => {
                return Err(Error::Malformed(format!(
                    "expected a function node, got `{}`",
                    other.kind()
                )))
            }
        };
        let Node::BlockStatement { body: stmts } = ast.node(body) else {
            return Err(Error::Malformed("function body must be a BlockStatement".into()));
        };
        debug!(target: "flow", "wiring function region for ast node {func}");

        let hoists = hoist::collect_scope(ast, stmts);
        let (chain, _) = self.emit_hoists(&hoists, vec![root])?;

        let body_exit = self.exit_event(body);
        self.frames.push(Frame::Function { return_to: body_exit });
        self.wire(body, chain)?;
        self.frames.pop();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Per-kind rules
    // ------------------------------------------------------------------

    fn wire_seq(&mut self, nodes: &[NodeId], mut frontier: Vec<EventId>) -> Result<Vec<EventId>> {
        for &node in nodes {
            frontier = self.wire(node, frontier)?;
        }
        Ok(frontier)
    }

    /// Wire one node: `incoming` flows into its `Enter`, the returned
    /// frontier leaves its `Exit`. Non-returning nodes yield an empty
    /// frontier.
    fn wire(&mut self, id: NodeId, incoming: Vec<EventId>) -> Result<Vec<EventId>> {
        let labels = std::mem::take(&mut self.pending_labels);
        let ast = self.ast;
        match ast.node(id) {
            Node::Program { .. } => {
                Err(Error::Malformed("Program node nested inside a program".into()))
            }
            Node::SwitchCase { .. } => {
                Err(Error::Malformed("SwitchCase outside of a switch statement".into()))
            }

            Node::BlockStatement { body } => {
                let (en, ex) = self.open(id, &incoming);
                let outs = self.wire_seq(body, vec![en])?;
                Ok(self.close(ex, outs))
            }

            Node::ExpressionStatement { expression } => {
                let (en, ex) = self.open(id, &incoming);
                let outs = self.wire(*expression, vec![en])?;
                Ok(self.close(ex, outs))
            }

            Node::IfStatement { test, consequent, alternate } => {
                let (en, ex) = self.open(id, &incoming);
                let test_out = self.wire(*test, vec![en])?;
                let mut outs = self.wire(*consequent, test_out.clone())?;
                match alternate {
                    Some(alt) => outs.extend(self.wire(*alt, test_out)?),
                    // no else: the false fork goes straight to the exit
                    None => outs.extend(test_out),
                }
                Ok(self.close(ex, outs))
            }

            Node::LabeledStatement { label, body } => {
                let (en, ex) = self.open(id, &incoming);
                self.frames.push(Frame::Labeled { label: label.clone(), break_to: ex });
                self.pending_labels = labels;
                self.pending_labels.push(label.clone());
                let outs = self.wire(*body, vec![en])?;
                self.frames.pop();
                Ok(self.close(ex, outs))
            }

            Node::WithStatement { object, body } => {
                let (en, ex) = self.open(id, &incoming);
                let object_out = self.wire(*object, vec![en])?;
                let outs = self.wire(*body, object_out)?;
                Ok(self.close(ex, outs))
            }

            Node::WhileStatement { test, body } => {
                let (en, ex) = self.open(id, &incoming);
                let test_out = self.wire(*test, vec![en])?;
                let head = self.enter_of(*test);
                self.frames.push(Frame::Loop { labels, break_to: ex, continue_to: head });
                let body_out = self.wire(*body, test_out.clone())?;
                self.frames.pop();
                self.link_all(&body_out, head);
                self.link_all(&test_out, ex);
                Ok(self.close(ex, Vec::new()))
            }

            Node::DoWhileStatement { body, test } => {
                let (en, ex) = self.open(id, &incoming);
                let head = self.enter_event(*test);
                self.frames.push(Frame::Loop { labels, break_to: ex, continue_to: head });
                let body_out = self.wire(*body, vec![en])?;
                self.frames.pop();
                let test_out = self.wire(*test, body_out)?;
                let body_enter = self.enter_of(*body);
                self.link_all(&test_out, body_enter);
                self.link_all(&test_out, ex);
                Ok(self.close(ex, Vec::new()))
            }

            Node::ForStatement { init, test, update, body } => {
                let (en, ex) = self.open(id, &incoming);
                let mut frontier = vec![en];
                if let Some(init) = init {
                    frontier = self.wire(*init, frontier)?;
                }
                // the event each iteration loops back to
                let head = match test {
                    Some(test) => self.enter_event(*test),
                    None => self.enter_event(*body),
                };
                let continue_to = match update {
                    Some(update) => self.enter_event(*update),
                    None => head,
                };
                let test_out = match test {
                    Some(test) => {
                        let out = self.wire(*test, frontier)?;
                        frontier = out.clone();
                        Some(out)
                    }
                    // a missing test is always true: no edge to the exit
                    None => None,
                };
                self.frames.push(Frame::Loop { labels, break_to: ex, continue_to });
                let body_out = self.wire(*body, frontier)?;
                self.frames.pop();
                let mut tail = body_out;
                if let Some(update) = update {
                    tail = self.wire(*update, tail)?;
                }
                self.link_all(&tail, head);
                if let Some(test_out) = test_out {
                    self.link_all(&test_out, ex);
                }
                Ok(self.close(ex, Vec::new()))
            }

            Node::ForInStatement { left, right, body } => {
                let (en, ex) = self.open(id, &incoming);
                let right_out = self.wire(*right, vec![en])?;
                // the per-iteration assignment target doubles as the
                // "has next key" head
                let head = self.enter_event(*left);
                let left_out = self.wire(*left, right_out)?;
                self.frames.push(Frame::Loop { labels, break_to: ex, continue_to: head });
                let body_out = self.wire(*body, left_out.clone())?;
                self.frames.pop();
                self.link_all(&body_out, head);
                self.link_all(&left_out, ex);
                Ok(self.close(ex, Vec::new()))
            }

            Node::SwitchStatement { discriminant, cases } => {
                let (en, ex) = self.open(id, &incoming);
                let discriminant_out = self.wire(*discriminant, vec![en])?;
                self.frames.push(Frame::Switch { break_to: ex });

                // `seeking` carries the not-yet-matched chain across case
                // tests; `fall` carries fall-through between consequents.
                let mut seeking = discriminant_out;
                let mut fall: Vec<EventId> = Vec::new();
                let mut default_enter = None;

                for &case in cases {
                    let Node::SwitchCase { test, consequent } = ast.node(case) else {
                        return Err(Error::Malformed("switch case must be a SwitchCase".into()));
                    };
                    let case_enter = self.enter_event(case);
                    match test {
                        Some(test) => {
                            self.link_all(&seeking, case_enter);
                            let test_out = self.wire(*test, vec![case_enter])?;
                            let mut frontier = test_out.clone();
                            frontier.extend(fall);
                            let frontier = self.wire_seq(consequent, frontier)?;
                            let case_exit = self.exit_event(case);
                            self.link_all(&frontier, case_exit);
                            fall = if frontier.is_empty() { Vec::new() } else { vec![case_exit] };
                            seeking = test_out;
                        }
                        None => {
                            // default sits in lexical position for
                            // fall-through; the exhausted test chain is
                            // linked to it after every test has failed
                            self.link_all(&fall, case_enter);
                            let frontier = self.wire_seq(consequent, vec![case_enter])?;
                            let case_exit = self.exit_event(case);
                            self.link_all(&frontier, case_exit);
                            fall = if frontier.is_empty() { Vec::new() } else { vec![case_exit] };
                            default_enter = Some(case_enter);
                        }
                    }
                }
                self.frames.pop();

                match default_enter {
                    Some(default_enter) => self.link_all(&seeking, default_enter),
                    None => self.link_all(&seeking, ex),
                }
                self.link_all(&fall, ex);
                Ok(self.close(ex, Vec::new()))
            }

            Node::BreakStatement { label } => {
                let (en, _ex) = self.open(id, &incoming);
                self.resolve_break(label.as_deref(), en)?;
                Ok(Vec::new())
            }

            Node::ContinueStatement { label } => {
                let (en, _ex) = self.open(id, &incoming);
                self.resolve_continue(label.as_deref(), en)?;
                Ok(Vec::new())
            }

            Node::ReturnStatement { argument } => {
                let frontier = match argument {
                    Some(argument) => self.wire(*argument, incoming)?,
                    None => incoming,
                };
                let en = self.enter_event(id);
                self.link_all(&frontier, en);
                self.exit_event(id);
                self.resolve_return(en)?;
                Ok(Vec::new())
            }

            Node::ThrowStatement { argument } => {
                let frontier = self.wire(*argument, incoming)?;
                let en = self.enter_event(id);
                self.link_all(&frontier, en);
                self.exit_event(id);
                self.resolve_throw(en);
                Ok(Vec::new())
            }

            Node::TryStatement { block, handler, finalizer } => {
                let (en, ex) = self.open(id, &incoming);
                if let Some(finalizer) = finalizer {
                    let entry = self.enter_event(*finalizer);
                    self.frames.push(Frame::Finally { entry, continuations: Vec::new() });
                }
                if let Some(handler) = handler {
                    let entry = self.enter_event(*handler);
                    self.frames.push(Frame::Catch { entry });
                }

                let mut normal = self.wire(*block, vec![en])?;
                if let Some(handler) = handler {
                    match self.frames.pop() {
                        Some(Frame::Catch { .. }) => {}
                        _ => unreachable!("catch frame on top of the stack"),
                    }
                    // entered only by `throw` edges, never by normal flow
                    let handler_out = self.wire(*handler, Vec::new())?;
                    normal.extend(handler_out);
                }

                if let Some(finalizer) = finalizer {
                    let continuations = match self.frames.pop() {
                        Some(Frame::Finally { continuations, .. }) => continuations,
                        _ => unreachable!("finally frame on top of the stack"),
                    };
                    let completes_normally = !normal.is_empty();
                    let finalizer_out = self.wire(*finalizer, normal)?;
                    if completes_normally {
                        self.link_all(&finalizer_out, ex);
                    }
                    // diverted jumps resume from the finalizer's exit; if
                    // the finalizer completed abnormally this frontier is
                    // empty and its own jump edges win
                    for continuation in continuations {
                        self.link_all(&finalizer_out, continuation);
                    }
                } else {
                    self.link_all(&normal, ex);
                }
                Ok(self.close(ex, Vec::new()))
            }

            Node::CatchClause { param, body } => {
                let (en, ex) = self.open(id, &incoming);
                let param_out = self.wire(*param, vec![en])?;
                let outs = self.wire(*body, param_out)?;
                Ok(self.close(ex, outs))
            }

            Node::FunctionDeclaration { .. } => {
                // defined during the hoist phase; the statement itself is
                // a no-op at execution time
                let (en, ex) = self.open(id, &incoming);
                self.store.link(en, ex);
                Ok(vec![ex])
            }

            Node::FunctionExpression { .. } => {
                let (en, ex) = self.open(id, &incoming);
                self.store.link(en, ex);
                // the body region hangs off the evaluated function value
                self.wire_function(id, ex)?;
                Ok(vec![ex])
            }

            Node::VariableDeclaration { declarations, .. } => {
                let (en, ex) = self.open(id, &incoming);
                let outs = self.wire_seq(declarations, vec![en])?;
                Ok(self.close(ex, outs))
            }

            Node::VariableDeclarator { id: target, init } => {
                let (en, ex) = self.open(id, &incoming);
                let mut frontier = self.wire(*target, vec![en])?;
                if let Some(init) = init {
                    frontier = self.wire(*init, frontier)?;
                }
                Ok(self.close(ex, frontier))
            }

            Node::SequenceExpression { expressions } => {
                let (en, ex) = self.open(id, &incoming);
                let outs = self.wire_seq(expressions, vec![en])?;
                Ok(self.close(ex, outs))
            }

            Node::UnaryExpression { argument, .. } | Node::UpdateExpression { argument, .. } => {
                let (en, ex) = self.open(id, &incoming);
                let outs = self.wire(*argument, vec![en])?;
                Ok(self.close(ex, outs))
            }

            Node::BinaryExpression { left, right, .. }
            | Node::AssignmentExpression { left, right, .. } => {
                let (en, ex) = self.open(id, &incoming);
                let left_out = self.wire(*left, vec![en])?;
                let outs = self.wire(*right, left_out)?;
                Ok(self.close(ex, outs))
            }

            Node::LogicalExpression { left, right, .. } => {
                let (en, ex) = self.open(id, &incoming);
                let left_out = self.wire(*left, vec![en])?;
                let right_out = self.wire(*right, left_out.clone())?;
                // short circuit: the left operand alone may decide
                self.link_all(&left_out, ex);
                self.link_all(&right_out, ex);
                Ok(self.close(ex, Vec::new()))
            }

            Node::ConditionalExpression { test, consequent, alternate } => {
                let (en, ex) = self.open(id, &incoming);
                let test_out = self.wire(*test, vec![en])?;
                let mut outs = self.wire(*consequent, test_out.clone())?;
                outs.extend(self.wire(*alternate, test_out)?);
                Ok(self.close(ex, outs))
            }

            Node::CallExpression { callee, arguments }
            | Node::NewExpression { callee, arguments } => {
                let (en, ex) = self.open(id, &incoming);
                let frontier = self.wire(*callee, vec![en])?;
                let outs = self.wire_seq(arguments, frontier)?;
                Ok(self.close(ex, outs))
            }

            Node::MemberExpression { object, property, .. } => {
                let (en, ex) = self.open(id, &incoming);
                let object_out = self.wire(*object, vec![en])?;
                let outs = self.wire(*property, object_out)?;
                Ok(self.close(ex, outs))
            }

            Node::ArrayExpression { elements } => {
                let (en, ex) = self.open(id, &incoming);
                let mut frontier = vec![en];
                for element in elements.iter().flatten() {
                    frontier = self.wire(*element, frontier)?;
                }
                Ok(self.close(ex, frontier))
            }

            Node::ObjectExpression { properties } => {
                let (en, ex) = self.open(id, &incoming);
                let outs = self.wire_seq(properties, vec![en])?;
                Ok(self.close(ex, outs))
            }

            Node::Property { key, value, .. } => {
                let (en, ex) = self.open(id, &incoming);
                let key_out = self.wire(*key, vec![en])?;
                let outs = self.wire(*value, key_out)?;
                Ok(self.close(ex, outs))
            }

            Node::Identifier { .. } | Node::Literal { .. } | Node::ThisExpression => {
                let (en, ex) = self.open(id, &incoming);
                self.store.link(en, ex);
                Ok(vec![ex])
            }
        }
    }

    // ------------------------------------------------------------------
    // Jump resolution
    // ------------------------------------------------------------------

    fn resolve_break(&mut self, label: Option<&str>, source: EventId) -> Result<()> {
        let mut hops = Vec::new();
        let mut target = None;
        for index in (0..self.frames.len()).rev() {
            match &self.frames[index] {
                Frame::Finally { .. } => hops.push(index),
                Frame::Loop { labels, break_to, .. } => match label {
                    None => {
                        target = Some(*break_to);
                        break;
                    }
                    Some(name) if labels.iter().any(|l| l == name) => {
                        target = Some(*break_to);
                        break;
                    }
                    Some(_) => {}
                },
                Frame::Switch { break_to } => {
                    if label.is_none() {
                        target = Some(*break_to);
                        break;
                    }
                }
                Frame::Labeled { label: candidate, break_to } => {
                    if label == Some(candidate.as_str()) {
                        target = Some(*break_to);
                        break;
                    }
                }
                // jumps never cross a function boundary
                Frame::Function { .. } | Frame::Program { .. } => break,
                Frame::Catch { .. } => {}
            }
        }
        match target {
            Some(target) => {
                self.link_jump(source, &hops, target);
                Ok(())
            }
            None => Err(match label {
                Some(name) => Error::UnknownLabel(name.to_string()),
                None => Error::BreakOutsideLoop,
            }),
        }
    }

    fn resolve_continue(&mut self, label: Option<&str>, source: EventId) -> Result<()> {
        let mut hops = Vec::new();
        let mut target = None;
        for index in (0..self.frames.len()).rev() {
            match &self.frames[index] {
                Frame::Finally { .. } => hops.push(index),
                Frame::Loop { labels, continue_to, .. } => match label {
                    None => {
                        target = Some(*continue_to);
                        break;
                    }
                    Some(name) if labels.iter().any(|l| l == name) => {
                        target = Some(*continue_to);
                        break;
                    }
                    Some(_) => {}
                },
                Frame::Function { .. } | Frame::Program { .. } => break,
                _ => {}
            }
        }
        match target {
            Some(target) => {
                self.link_jump(source, &hops, target);
                Ok(())
            }
            None => Err(match label {
                Some(name) => Error::UnknownLabel(name.to_string()),
                None => Error::ContinueOutsideLoop,
            }),
        }
    }

    fn resolve_return(&mut self, source: EventId) -> Result<()> {
        let mut hops = Vec::new();
        let mut target = None;
        for index in (0..self.frames.len()).rev() {
            match &self.frames[index] {
                Frame::Finally { .. } => hops.push(index),
                Frame::Function { return_to } => {
                    target = Some(*return_to);
                    break;
                }
                Frame::Program { .. } => break,
                _ => {}
            }
        }
        match target {
            Some(target) => {
                self.link_jump(source, &hops, target);
                Ok(())
            }
            None => Err(Error::ReturnOutsideFunction),
        }
    }

    /// `throw` resolves lexically to the nearest enclosing catch, crossing
    /// function boundaries, and falls back to the program's terminal exit.
    fn resolve_throw(&mut self, source: EventId) {
        let mut hops = Vec::new();
        let mut target = None;
        for index in (0..self.frames.len()).rev() {
            match &self.frames[index] {
                Frame::Finally { .. } => hops.push(index),
                Frame::Catch { entry } => {
                    target = Some(*entry);
                    break;
                }
                Frame::Program { throw_to } => {
                    target = Some(*throw_to);
                    break;
                }
                _ => {}
            }
        }
        let target = target.expect("program frame at the bottom of the stack");
        self.link_jump(source, &hops, target);
    }

    /// Connect a jump to its target, diverting through every `finally` on
    /// the way out. Each crossed finalizer records where the jump resumes
    /// once the finalizer's body completes.
    fn link_jump(&mut self, source: EventId, hops: &[usize], target: EventId) {
        let Some((&innermost, rest)) = hops.split_first() else {
            self.store.link(source, target);
            return;
        };
        let entry = self.finally_entry(innermost);
        self.store.link(source, entry);

        let mut previous = innermost;
        for &hop in rest {
            let entry = self.finally_entry(hop);
            self.add_continuation(previous, entry);
            previous = hop;
        }
        self.add_continuation(previous, target);
    }

    fn finally_entry(&self, frame: usize) -> EventId {
        match &self.frames[frame] {
            Frame::Finally { entry, .. } => *entry,
            _ => unreachable!("hop indexes a finally frame"),
        }
    }

    fn add_continuation(&mut self, frame: usize, target: EventId) {
        if let Frame::Finally { continuations, .. } = &mut self.frames[frame] {
            if !continuations.contains(&target) {
                continuations.push(target);
            }
        }
    }
}

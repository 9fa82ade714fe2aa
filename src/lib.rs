// Esflow: control flow graphs for ECMAScript 5
//
// Consumes already-parsed ESTree ASTs, builds a queryable graph of
// hoist/enter/exit flow events, and answers path and reachability
// queries over it.

#![allow(dead_code)]

pub mod ast;
pub mod cli;
pub mod error;
pub mod flow;
pub mod output;

pub use ast::{Ast, Node, NodeId};
pub use error::{Error, Result};
pub use flow::{analyse, EventId, EventRef, FlowEvent, FlowGraph, Phase};

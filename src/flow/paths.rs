//! Path analysis over flow graphs
//!
//! Discovers execution paths from `start_of_flow` using depth-first search
//! with cycle detection. Counting sums over forks and reports an unbounded
//! total as soon as a walk revisits an event on its own stack: a back
//! edge means infinitely many distinct terminating paths exist.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::event::EventId;
use super::FlowGraph;

/// Number of distinct terminating paths through a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathCount {
    Finite(u64),
    /// A cycle is reachable; the path set is infinite.
    Unbounded,
}

impl PathCount {
    pub fn is_unbounded(self) -> bool {
        matches!(self, PathCount::Unbounded)
    }

    fn add(self, other: PathCount) -> PathCount {
        match (self, other) {
            (PathCount::Finite(a), PathCount::Finite(b)) => {
                PathCount::Finite(a.saturating_add(b))
            }
            _ => PathCount::Unbounded,
        }
    }
}

impl fmt::Display for PathCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCount::Finite(n) => write!(f, "{n}"),
            PathCount::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Count the distinct terminating paths reachable from `start_of_flow`.
///
/// Each terminal event ends one path; a fork multiplies. Counts below a
/// cycle-free event are memoized, which keeps the walk linear on DAG
/// regions; any event that can re-reach itself is unbounded by
/// definition and memoized as such.
pub fn count_paths(graph: &FlowGraph) -> PathCount {
    let mut memo = HashMap::new();
    let mut on_stack = HashSet::new();
    count_from(graph, graph.start_of_flow().id(), &mut memo, &mut on_stack)
}

fn count_from(
    graph: &FlowGraph,
    id: EventId,
    memo: &mut HashMap<EventId, PathCount>,
    on_stack: &mut HashSet<EventId>,
) -> PathCount {
    if let Some(&count) = memo.get(&id) {
        return count;
    }
    if !on_stack.insert(id) {
        // revisit on the current walk: a cycle through `id`
        return PathCount::Unbounded;
    }

    let forward = graph.store().event(id).forward();
    let count = if forward.is_empty() {
        PathCount::Finite(1)
    } else {
        let successors: Vec<EventId> = forward.to_vec();
        let mut total = PathCount::Finite(0);
        for succ in successors {
            total = total.add(count_from(graph, succ, memo, on_stack));
        }
        total
    };

    on_stack.remove(&id);
    memo.insert(id, count);
    count
}

/// Classification of an enumerated path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    /// Ends at a terminal event.
    Terminating,
    /// Clipped where the walk revisited an event (a loop).
    Cyclic,
    /// Clipped by [`PathLimits::max_length`].
    Truncated,
}

/// One execution path: an ordered event sequence with a content hash for
/// deduplication and comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path {
    /// BLAKE3 hash of the event sequence.
    pub path_id: String,
    /// Events in execution order.
    pub events: Vec<EventId>,
    pub kind: PathKind,
}

impl Path {
    fn new(events: Vec<EventId>, kind: PathKind) -> Self {
        let path_id = hash_path(&events);
        Self { path_id, events, kind }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn hash_path(events: &[EventId]) -> String {
    let mut hasher = blake3::Hasher::new();
    for event in events {
        hasher.update(&(event.index() as u64).to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

/// Bounds for path enumeration.
#[derive(Debug, Clone, Copy)]
pub struct PathLimits {
    /// Stop after this many paths have been collected.
    pub max_paths: usize,
    /// Clip any single path at this many events.
    pub max_length: usize,
}

impl Default for PathLimits {
    fn default() -> Self {
        Self { max_paths: 256, max_length: 4096 }
    }
}

/// Enumerate paths from `start_of_flow` within the given limits.
///
/// Loops produce one `Cyclic` path per distinct way of reaching the back
/// edge rather than being unrolled.
pub fn enumerate_paths(graph: &FlowGraph, limits: &PathLimits) -> Vec<Path> {
    let mut paths = Vec::new();
    let mut current = Vec::new();
    let mut on_path = HashSet::new();
    dfs_enumerate(
        graph,
        graph.start_of_flow().id(),
        limits,
        &mut paths,
        &mut current,
        &mut on_path,
    );
    paths
}

fn dfs_enumerate(
    graph: &FlowGraph,
    id: EventId,
    limits: &PathLimits,
    paths: &mut Vec<Path>,
    current: &mut Vec<EventId>,
    on_path: &mut HashSet<EventId>,
) {
    if paths.len() >= limits.max_paths {
        return;
    }
    if on_path.contains(&id) {
        // close the recorded path on the revisited event
        let mut events = current.clone();
        events.push(id);
        paths.push(Path::new(events, PathKind::Cyclic));
        return;
    }

    current.push(id);
    on_path.insert(id);

    let forward: Vec<EventId> = graph.store().event(id).forward().to_vec();
    if forward.is_empty() {
        paths.push(Path::new(current.clone(), PathKind::Terminating));
    } else if current.len() >= limits.max_length {
        paths.push(Path::new(current.clone(), PathKind::Truncated));
    } else {
        for succ in forward {
            dfs_enumerate(graph, succ, limits, paths, current, on_path);
        }
    }

    on_path.remove(&id);
    current.pop();
}

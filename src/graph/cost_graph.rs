//! Weighted dependency graph with memoized cost propagation.
//!
//! Models named projects connected by directed, weighted edges and
//! computes the total propagated cost from the graph's single root. All
//! indices are built on the fixed-bucket [`ChainedMap`] store, and both
//! traversals run on explicit stacks so graph depth never exhausts the
//! native call stack.

use std::collections::{HashMap, HashSet};
use std::fmt;

use num_bigint::BigInt;
use thiserror::Error;

use crate::store::ChainedMap;

/// Default size hint used by [`CostGraph::new`].
const DEFAULT_CAPACITY: usize = 16;

/// Errors produced by graph construction and cost computation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    /// An edge referenced a project name that was never inserted.
    #[error("project '{0}' not found")]
    ProjectNotFound(String),

    /// More than one project has no incoming edges, so the starting
    /// point of cost propagation is ambiguous.
    #[error("graph has {0} candidate roots, expected exactly one")]
    MultipleRoots(usize),

    /// Every project is some edge's destination; there is nowhere to
    /// start cost propagation.
    #[error("graph has no candidate root")]
    NoRoot,

    /// Cost evaluation reached a project already on the evaluation path.
    #[error("dependency cycle reached from the root, total cost is undefined")]
    CycleDetected,
}

/// A named project with an intrinsic cost.
///
/// The propagated total is cached after the first cost computation;
/// `total()` exposes the cached value, `None` until computed.
#[derive(Debug, Clone)]
pub struct ProjectNode {
    /// Unique project name.
    pub name: String,
    /// Intrinsic cost, independent of any edges.
    pub cost: i64,
    total: Option<BigInt>,
}

impl ProjectNode {
    fn new(name: String, cost: i64) -> Self {
        Self {
            name,
            cost,
            total: None,
        }
    }

    /// Returns the memoized propagated total, if it has been computed.
    pub fn total(&self) -> Option<&BigInt> {
        self.total.as_ref()
    }
}

impl fmt::Display for ProjectNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.cost)
    }
}

/// A directed, weighted edge stored under its source project's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEdge {
    /// Destination project name.
    pub dest: String,
    /// Multiplier applied to the destination's total cost.
    pub weight: i64,
}

/// Outcome of a cost computation, with the work it took.
///
/// `evaluated` counts projects whose totals were computed during this
/// call; `memo_hits` counts totals that were served from the cache. A
/// repeated call on an unmodified graph reports zero evaluations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostReport {
    /// Propagated total cost from the root.
    pub total: BigInt,
    /// Projects evaluated during this call.
    pub evaluated: usize,
    /// Totals served from the memo cache during this call.
    pub memo_hits: usize,
}

/// Three-color mark used during the cycle scan. Unvisited projects are
/// simply absent from the mark table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Pending evaluation of one project's total cost.
struct EvalFrame {
    name: String,
    partial: BigInt,
    edge_idx: usize,
    /// Edge weight folding this total into the parent frame.
    weight_in: i64,
}

/// A directed, weighted dependency graph of named projects.
///
/// Three [`ChainedMap`] indices back the graph: the vertex index (name to
/// project), the adjacency index (name to outgoing edges), and the
/// root-candidate index (names never yet targeted by an edge). The root
/// candidates start as every inserted project and shrink as edges land,
/// which is how the graph locates its root without in-degree tracking.
///
/// Projects and edges can only be added, never removed.
///
/// # Example
///
/// ```rust
/// use costscope::graph::CostGraph;
/// use num_bigint::BigInt;
///
/// let mut graph = CostGraph::with_capacity(3);
/// graph.add_project("A", 1);
/// graph.add_project("B", 2);
/// graph.add_project("C", 3);
/// graph.add_dependency("A", "B", 2).unwrap();
/// graph.add_dependency("B", "C", 3).unwrap();
///
/// // cost(C) = 3, cost(B) = 2 + 3*3 = 11, cost(A) = 1 + 2*11 = 23
/// assert_eq!(graph.total_cost().unwrap(), BigInt::from(23));
/// ```
#[derive(Debug, Clone)]
pub struct CostGraph {
    vertices: ChainedMap<String, ProjectNode>,
    adjacency: ChainedMap<String, Vec<ProjectEdge>>,
    roots: ChainedMap<String, ()>,
    /// Set once any totals are cached, so a later mutation knows to
    /// invalidate them.
    memoized: bool,
}

impl Default for CostGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CostGraph {
    /// Creates an empty graph sized for a small default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty graph sized for roughly `expected` projects.
    ///
    /// The hint fixes the bucket count of all three indices; it is never
    /// revisited, so a badly low hint degrades lookups, not correctness.
    pub fn with_capacity(expected: usize) -> Self {
        Self {
            vertices: ChainedMap::with_capacity(expected),
            adjacency: ChainedMap::with_capacity(expected),
            roots: ChainedMap::with_capacity(expected),
            memoized: false,
        }
    }

    /// Adds a project with the given intrinsic cost.
    ///
    /// The project starts as a root candidate until an edge targets it.
    /// Inserting a name that already exists silently replaces the old
    /// project; edges keyed under the name keep pointing at the
    /// replacement, since adjacency is keyed by name.
    pub fn add_project(&mut self, name: impl Into<String>, cost: i64) {
        self.invalidate_totals();
        let name = name.into();
        self.vertices
            .insert(name.clone(), ProjectNode::new(name.clone(), cost));
        self.roots.insert(name, ());
    }

    /// Adds a directed edge from `source` to `dest` with the given weight.
    ///
    /// Both endpoints must already exist. The destination stops being a
    /// root candidate; repeated edges into the same destination are fine.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ProjectNotFound`] naming whichever endpoint
    /// is missing from the graph.
    ///
    /// # Example
    ///
    /// ```rust
    /// use costscope::graph::{CostGraph, GraphError};
    ///
    /// let mut graph = CostGraph::new();
    /// graph.add_project("APP", 1);
    ///
    /// let err = graph.add_dependency("APP", "MISSING", 2).unwrap_err();
    /// assert_eq!(err, GraphError::ProjectNotFound("MISSING".to_string()));
    /// ```
    pub fn add_dependency(
        &mut self,
        source: &str,
        dest: &str,
        weight: i64,
    ) -> Result<(), GraphError> {
        if !self.vertices.contains_key(source) {
            return Err(GraphError::ProjectNotFound(source.to_string()));
        }
        if !self.vertices.contains_key(dest) {
            return Err(GraphError::ProjectNotFound(dest.to_string()));
        }
        self.invalidate_totals();
        self.adjacency.insert_if_absent(source.to_string(), Vec::new());
        if let Some(chain) = self.adjacency.get_mut(source) {
            chain.push(ProjectEdge {
                dest: dest.to_string(),
                weight,
            });
        }
        self.roots.remove(dest);
        Ok(())
    }

    /// Looks up a project by name.
    pub fn project(&self, name: &str) -> Option<&ProjectNode> {
        self.vertices.get(name)
    }

    /// Returns `true` when a project with `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.vertices.contains_key(name)
    }

    /// Returns the number of projects.
    pub fn project_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges across all adjacency chains.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Returns the outgoing edges of `name`, empty when it has none.
    pub fn outgoing(&self, name: &str) -> &[ProjectEdge] {
        self.adjacency.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over every edge as `(source name, edge)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &ProjectEdge)> {
        self.adjacency
            .iter()
            .flat_map(|(source, chain)| chain.iter().map(move |edge| (source.as_str(), edge)))
    }

    /// Iterates over the projects that no edge targets.
    ///
    /// Cost propagation requires exactly one of these.
    pub fn root_candidates(&self) -> impl Iterator<Item = &ProjectNode> {
        self.roots
            .keys()
            .filter_map(move |name| self.vertices.get(name.as_str()))
    }

    /// Computes the total propagated cost from the single root.
    ///
    /// The total of a project is its intrinsic cost plus, for each
    /// outgoing edge, the edge weight times the destination's total.
    /// Totals are arbitrary precision: weights compound multiplicatively
    /// down the graph and overflow fixed-width integers quickly.
    ///
    /// Totals are memoized, so a repeated call on an unmodified graph is
    /// a cache read. Mutating the graph afterwards drops the cache.
    ///
    /// # Errors
    ///
    /// - [`GraphError::MultipleRoots`] when the starting point is
    ///   ambiguous.
    /// - [`GraphError::NoRoot`] when every project is some edge's
    ///   destination, e.g. the whole graph is one cycle.
    /// - [`GraphError::CycleDetected`] when evaluation reaches a project
    ///   already on the evaluation path. Callers should still run
    ///   [`CostGraph::has_cycles`] first; this is a backstop, not a full
    ///   cycle scan, since memoized or unreachable regions are skipped.
    pub fn total_cost(&mut self) -> Result<BigInt, GraphError> {
        self.total_cost_report().map(|report| report.total)
    }

    /// Computes the total propagated cost along with evaluation metrics.
    ///
    /// Same semantics as [`CostGraph::total_cost`]; the report carries
    /// how many projects were evaluated versus served from the cache.
    pub fn total_cost_report(&mut self) -> Result<CostReport, GraphError> {
        let root = match self.roots.len() {
            0 => return Err(GraphError::NoRoot),
            1 => self
                .roots
                .keys()
                .next()
                .cloned()
                .ok_or(GraphError::NoRoot)?,
            ambiguous => return Err(GraphError::MultipleRoots(ambiguous)),
        };
        let mut report = CostReport {
            total: BigInt::from(0),
            evaluated: 0,
            memo_hits: 0,
        };
        self.memoized = true;
        report.total = self.propagate(&root, &mut report)?;
        Ok(report)
    }

    /// Evaluates the total of `root` with an explicit frame stack.
    ///
    /// Each frame accumulates one project's partial sum while its edges
    /// are folded in; a finished frame memoizes its total and folds it
    /// into the parent, scaled by the edge weight it was entered through.
    fn propagate(&mut self, root: &str, report: &mut CostReport) -> Result<BigInt, GraphError> {
        if let Some(total) = self.vertices.get(root).and_then(|v| v.total.clone()) {
            report.memo_hits += 1;
            return Ok(total);
        }
        let root_cost = self
            .vertices
            .get(root)
            .map(|v| v.cost)
            .ok_or_else(|| GraphError::ProjectNotFound(root.to_string()))?;

        let mut on_path: HashSet<String> = HashSet::with_capacity(self.vertices.len());
        on_path.insert(root.to_string());
        let mut stack = vec![EvalFrame {
            name: root.to_string(),
            partial: BigInt::from(root_cost),
            edge_idx: 0,
            weight_in: 1,
        }];
        report.evaluated += 1;
        let mut result = BigInt::from(0);

        while let Some(top) = stack.last() {
            let pending = self
                .adjacency
                .get(top.name.as_str())
                .and_then(|chain| chain.get(top.edge_idx))
                .map(|edge| (edge.dest.clone(), edge.weight));

            match pending {
                Some((dest, weight)) => {
                    if let Some(total) = self.vertices.get(dest.as_str()).and_then(|v| v.total()) {
                        report.memo_hits += 1;
                        let contribution = BigInt::from(weight) * total;
                        if let Some(top) = stack.last_mut() {
                            top.partial += contribution;
                            top.edge_idx += 1;
                        }
                    } else if on_path.contains(dest.as_str()) {
                        return Err(GraphError::CycleDetected);
                    } else {
                        let cost = self
                            .vertices
                            .get(dest.as_str())
                            .map(|v| v.cost)
                            .ok_or_else(|| GraphError::ProjectNotFound(dest.clone()))?;
                        on_path.insert(dest.clone());
                        report.evaluated += 1;
                        if let Some(top) = stack.last_mut() {
                            top.edge_idx += 1;
                        }
                        stack.push(EvalFrame {
                            name: dest,
                            partial: BigInt::from(cost),
                            edge_idx: 0,
                            weight_in: weight,
                        });
                    }
                }
                None => {
                    // All edges folded in; the partial is this project's total.
                    if let Some(frame) = stack.pop() {
                        on_path.remove(frame.name.as_str());
                        if let Some(vertex) = self.vertices.get_mut(frame.name.as_str()) {
                            vertex.total = Some(frame.partial.clone());
                        }
                        match stack.last_mut() {
                            Some(parent) => {
                                parent.partial += BigInt::from(frame.weight_in) * &frame.partial;
                            }
                            None => result = frame.partial,
                        }
                    }
                }
            }
        }
        Ok(result)
    }

    /// Scans the whole graph for a directed cycle.
    ///
    /// Standard three-color traversal: every project starts unvisited,
    /// is marked in-progress while on the traversal path, and done once
    /// its subtree is exhausted. Revisiting an in-progress project is a
    /// back-edge, i.e. a cycle; a done project is a cross or forward
    /// edge and is skipped. Marks are rebuilt from scratch on every
    /// call, so the scan is independent of any cost computation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use costscope::graph::CostGraph;
    ///
    /// let mut graph = CostGraph::new();
    /// graph.add_project("A", 1);
    /// graph.add_project("B", 1);
    /// graph.add_dependency("A", "B", 1).unwrap();
    /// assert!(!graph.has_cycles());
    ///
    /// graph.add_dependency("B", "A", 1).unwrap();
    /// assert!(graph.has_cycles());
    /// ```
    pub fn has_cycles(&self) -> bool {
        let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(self.vertices.len());
        for name in self.vertices.keys() {
            if !marks.contains_key(name.as_str()) && self.scan_from(name, &mut marks) {
                return true;
            }
        }
        false
    }

    /// Depth-first scan from `start` over unvisited projects.
    fn scan_from<'a>(&'a self, start: &'a str, marks: &mut HashMap<&'a str, Mark>) -> bool {
        let mut stack: Vec<(&'a str, usize)> = vec![(start, 0)];
        marks.insert(start, Mark::InProgress);

        while let Some(&(name, edge_idx)) = stack.last() {
            match self
                .adjacency
                .get(name)
                .and_then(|chain| chain.get(edge_idx))
            {
                Some(edge) => {
                    if let Some(top) = stack.last_mut() {
                        top.1 += 1;
                    }
                    match marks.get(edge.dest.as_str()) {
                        Some(Mark::InProgress) => return true,
                        Some(Mark::Done) => {}
                        None => {
                            marks.insert(edge.dest.as_str(), Mark::InProgress);
                            stack.push((edge.dest.as_str(), 0));
                        }
                    }
                }
                None => {
                    marks.insert(name, Mark::Done);
                    stack.pop();
                }
            }
        }
        false
    }

    /// Renders the graph in Graphviz DOT notation.
    ///
    /// One line per edge, endpoints rendered as their display form
    /// (`NAME COST`) wrapped in quotes, matching the adjacency contents
    /// exactly.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph G {\n");
        for (source, chain) in self.adjacency.iter() {
            let Some(vertex) = self.vertices.get(source.as_str()) else {
                continue;
            };
            for edge in chain {
                if let Some(dest) = self.vertices.get(edge.dest.as_str()) {
                    out.push_str(&format!("    \"{}\" -> \"{}\"\n", vertex, dest));
                }
            }
        }
        out.push_str("}\n");
        out
    }

    /// Drops every memoized total, once any have been cached.
    fn invalidate_totals(&mut self) {
        if self.memoized {
            for vertex in self.vertices.values_mut() {
                vertex.total = None;
            }
            self.memoized = false;
        }
    }
}

/// Debug listing: the root candidates, then each project's outgoing
/// edges. Presentation only; line order follows bucket order.
impl fmt::Display for CostGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roots: Vec<String> = self.root_candidates().map(|v| v.to_string()).collect();
        writeln!(f, "First: [{}]", roots.join(", "))?;
        for (source, chain) in self.adjacency.iter() {
            let Some(vertex) = self.vertices.get(source.as_str()) else {
                continue;
            };
            let targets: Vec<String> = chain
                .iter()
                .filter_map(|edge| self.vertices.get(edge.dest.as_str()))
                .map(|dest| format!("[{}]", dest))
                .collect();
            writeln!(f, "{}: {}", vertex, targets.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_graph() -> CostGraph {
        // A -(2)-> B -(3)-> C, costs 1, 2, 3.
        let mut graph = CostGraph::with_capacity(3);
        graph.add_project("A", 1);
        graph.add_project("B", 2);
        graph.add_project("C", 3);
        graph.add_dependency("A", "B", 2).unwrap();
        graph.add_dependency("B", "C", 3).unwrap();
        graph
    }

    #[test]
    fn test_empty_graph() {
        let graph = CostGraph::new();
        assert_eq!(graph.project_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.has_cycles());
    }

    #[test]
    fn test_add_project_and_lookup() {
        let mut graph = CostGraph::new();
        graph.add_project("CORE", 7);
        assert!(graph.contains("CORE"));
        let node = graph.project("CORE").unwrap();
        assert_eq!(node.name, "CORE");
        assert_eq!(node.cost, 7);
        assert_eq!(node.total(), None);
        assert!(graph.project("MISSING").is_none());
    }

    #[test]
    fn test_duplicate_project_overwrites() {
        let mut graph = CostGraph::new();
        graph.add_project("CORE", 1);
        graph.add_project("CORE", 9);
        assert_eq!(graph.project_count(), 1);
        assert_eq!(graph.project("CORE").unwrap().cost, 9);
    }

    #[test]
    fn test_add_dependency_unknown_endpoints() {
        let mut graph = CostGraph::new();
        graph.add_project("A", 1);
        assert_eq!(
            graph.add_dependency("A", "B", 1),
            Err(GraphError::ProjectNotFound("B".to_string()))
        );
        assert_eq!(
            graph.add_dependency("X", "A", 1),
            Err(GraphError::ProjectNotFound("X".to_string()))
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_root_candidates_shrink_as_edges_land() {
        let mut graph = chain_graph();
        let roots: Vec<&str> = graph
            .root_candidates()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(roots, vec!["A"]);

        // Repeated edges into the same destination stay idempotent.
        graph.add_dependency("A", "C", 5).unwrap();
        assert_eq!(graph.root_candidates().count(), 1);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_total_cost_worked_example() {
        // cost(C) = 3, cost(B) = 2 + 3*3 = 11, cost(A) = 1 + 2*11 = 23.
        let mut graph = chain_graph();
        assert_eq!(graph.total_cost().unwrap(), BigInt::from(23));
        assert_eq!(graph.project("C").unwrap().total(), Some(&BigInt::from(3)));
        assert_eq!(graph.project("B").unwrap().total(), Some(&BigInt::from(11)));
    }

    #[test]
    fn test_total_cost_multiple_roots() {
        let mut graph = CostGraph::new();
        graph.add_project("A", 1);
        graph.add_project("B", 2);
        assert_eq!(graph.total_cost(), Err(GraphError::MultipleRoots(2)));
    }

    #[test]
    fn test_total_cost_no_root() {
        // Whole graph is one cycle; every project is a destination.
        let mut graph = CostGraph::new();
        graph.add_project("A", 1);
        graph.add_project("B", 2);
        graph.add_dependency("A", "B", 1).unwrap();
        graph.add_dependency("B", "A", 1).unwrap();
        assert_eq!(graph.total_cost(), Err(GraphError::NoRoot));
    }

    #[test]
    fn test_total_cost_cycle_behind_root() {
        // R -> A -> B -> A: a single root, but evaluation hits a back-edge.
        let mut graph = CostGraph::new();
        graph.add_project("R", 1);
        graph.add_project("A", 1);
        graph.add_project("B", 1);
        graph.add_dependency("R", "A", 1).unwrap();
        graph.add_dependency("A", "B", 1).unwrap();
        graph.add_dependency("B", "A", 1).unwrap();
        assert!(graph.has_cycles());
        assert_eq!(graph.total_cost(), Err(GraphError::CycleDetected));
    }

    #[test]
    fn test_memoization_idempotence() {
        let mut graph = chain_graph();
        let first = graph.total_cost_report().unwrap();
        let second = graph.total_cost_report().unwrap();
        assert_eq!(first.total, second.total);
        assert_eq!(first.evaluated, 3);
        assert_eq!(second.evaluated, 0);
        assert!(second.evaluated < first.evaluated);
        assert_eq!(second.memo_hits, 1);
    }

    #[test]
    fn test_shared_destination_evaluated_once() {
        // Diamond: A -> B -> D, A -> C -> D.
        let mut graph = CostGraph::with_capacity(4);
        graph.add_project("A", 1);
        graph.add_project("B", 1);
        graph.add_project("C", 1);
        graph.add_project("D", 5);
        graph.add_dependency("A", "B", 1).unwrap();
        graph.add_dependency("A", "C", 1).unwrap();
        graph.add_dependency("B", "D", 2).unwrap();
        graph.add_dependency("C", "D", 3).unwrap();

        let report = graph.total_cost_report().unwrap();
        // A = 1 + 1*(1 + 2*5) + 1*(1 + 3*5) = 28.
        assert_eq!(report.total, BigInt::from(28));
        assert_eq!(report.evaluated, 4);
        assert_eq!(report.memo_hits, 1);
    }

    #[test]
    fn test_mutation_invalidates_memoized_totals() {
        let mut graph = chain_graph();
        assert_eq!(graph.total_cost().unwrap(), BigInt::from(23));

        graph.add_project("D", 10);
        graph.add_dependency("C", "D", 2).unwrap();
        // cost(C) = 3 + 2*10 = 23, cost(B) = 2 + 3*23 = 71, cost(A) = 1 + 2*71 = 143.
        assert_eq!(graph.total_cost().unwrap(), BigInt::from(143));
    }

    #[test]
    fn test_deep_chain_exceeds_fixed_width() {
        // 50 projects of cost 1 chained with weight 10: the root total is
        // the 50-digit repunit, far past u128.
        let mut graph = CostGraph::with_capacity(50);
        for i in 0..50 {
            graph.add_project(format!("P{}", i), 1);
        }
        for i in 0..49 {
            graph
                .add_dependency(&format!("P{}", i), &format!("P{}", i + 1), 10)
                .unwrap();
        }
        let mut expected = BigInt::from(0);
        for _ in 0..50 {
            expected = expected * 10 + 1;
        }
        assert_eq!(graph.total_cost().unwrap(), expected);
    }

    #[test]
    fn test_has_cycles_straight_chain() {
        let graph = chain_graph();
        assert!(!graph.has_cycles());
    }

    #[test]
    fn test_has_cycles_two_vertex_cycle() {
        let mut graph = CostGraph::new();
        graph.add_project("A", 1);
        graph.add_project("B", 1);
        graph.add_dependency("A", "B", 1).unwrap();
        graph.add_dependency("B", "A", 1).unwrap();
        assert!(graph.has_cycles());
    }

    #[test]
    fn test_has_cycles_self_loop() {
        let mut graph = CostGraph::new();
        graph.add_project("A", 1);
        graph.add_dependency("A", "A", 1).unwrap();
        assert!(graph.has_cycles());
    }

    #[test]
    fn test_has_cycles_diamond_is_acyclic() {
        // Shared destination is a cross-edge, not a cycle.
        let mut graph = CostGraph::new();
        graph.add_project("A", 1);
        graph.add_project("B", 1);
        graph.add_project("C", 1);
        graph.add_project("D", 1);
        graph.add_dependency("A", "B", 1).unwrap();
        graph.add_dependency("A", "C", 1).unwrap();
        graph.add_dependency("B", "D", 1).unwrap();
        graph.add_dependency("C", "D", 1).unwrap();
        assert!(!graph.has_cycles());
    }

    #[test]
    fn test_has_cycles_disconnected_component() {
        // Cycle lives in a component unreachable from the root.
        let mut graph = CostGraph::new();
        graph.add_project("R", 1);
        graph.add_project("X", 1);
        graph.add_project("Y", 1);
        graph.add_dependency("X", "Y", 1).unwrap();
        graph.add_dependency("Y", "X", 1).unwrap();
        assert!(graph.has_cycles());
    }

    #[test]
    fn test_has_cycles_repeated_scans_agree() {
        // Marks are rebuilt per call, so the answer is stable.
        let mut graph = chain_graph();
        assert!(!graph.has_cycles());
        assert!(!graph.has_cycles());
        graph.add_dependency("C", "A", 1).unwrap();
        assert!(graph.has_cycles());
        assert!(graph.has_cycles());
    }

    #[test]
    fn test_to_dot_lists_each_edge_once() {
        let mut graph = CostGraph::new();
        graph.add_project("A", 1);
        graph.add_project("B", 2);
        graph.add_project("C", 3);
        graph.add_dependency("A", "B", 2).unwrap();
        graph.add_dependency("A", "C", 5).unwrap();

        let dot = graph.to_dot();
        assert!(dot.starts_with("digraph G {\n"));
        assert!(dot.ends_with("}\n"));
        let edge_lines: Vec<&str> = dot.lines().filter(|l| l.contains("->")).collect();
        assert_eq!(edge_lines.len(), 2);
        assert!(edge_lines.contains(&"    \"A 1\" -> \"B 2\""));
        assert!(edge_lines.contains(&"    \"A 1\" -> \"C 3\""));
    }

    #[test]
    fn test_display_lists_roots_and_adjacency() {
        let mut graph = chain_graph();
        graph.add_dependency("A", "C", 5).unwrap();
        let listing = graph.to_string();
        assert!(listing.starts_with("First: [A 1]\n"));
        assert!(listing.contains("A 1: [B 2], [C 3]"));
        assert!(listing.contains("B 2: [C 3]"));
    }

    #[test]
    fn test_outgoing_edges() {
        let graph = chain_graph();
        let edges = graph.outgoing("A");
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].dest, "B");
        assert_eq!(edges[0].weight, 2);
        assert!(graph.outgoing("C").is_empty());
        assert!(graph.outgoing("MISSING").is_empty());
    }

    #[test]
    fn test_edges_iterator_matches_adjacency() {
        let graph = chain_graph();
        let mut pairs: Vec<(String, String, i64)> = graph
            .edges()
            .map(|(source, edge)| (source.to_string(), edge.dest.clone(), edge.weight))
            .collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("A".to_string(), "B".to_string(), 2),
                ("B".to_string(), "C".to_string(), 3),
            ]
        );
    }
}

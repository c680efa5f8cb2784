//! Circular dependency detection.

use std::collections::HashSet;

use serde::Serialize;

use super::DependencyGraph;

/// A circular dependency path.
///
/// The first module is repeated at the end, so `[A, B, A]` is the 2-cycle
/// A → B → A and `[X, X]` is a module importing itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Cycle {
    /// Modules along the cycle, closing back on the first
    pub nodes: Vec<String>,
}

impl Cycle {
    /// Returns a formatted string representation of the cycle path.
    ///
    /// For example: "A -> B -> A"
    pub fn cycle_path(&self) -> String {
        self.nodes.join(" -> ")
    }

    /// Returns the number of distinct modules in the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Returns true if the cycle has no modules (should not happen in practice).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if this is a module importing itself.
    pub fn is_self_loop(&self) -> bool {
        self.nodes.len() == 2 && self.nodes[0] == self.nodes[1]
    }
}

impl DependencyGraph {
    /// Detects circular dependencies with a depth-first search.
    ///
    /// A traversal starts from every module not yet visited, in module order,
    /// and follows dependencies in sorted order. The path and the recursion
    /// stack are copied into each branch so sibling branches never see each
    /// other's state; the visited set is shared by the whole run. Reaching a
    /// module that is already on the recursion stack emits the path from its
    /// first occurrence back to itself.
    ///
    /// Each back edge is reported once. Cycles are not deduplicated across
    /// entry points, and a cycle is reported starting from wherever the
    /// traversal entered it. An empty result means the graph is acyclic.
    ///
    /// # Example
    ///
    /// ```rust
    /// use modscope::graph::DependencyGraph;
    ///
    /// let graph = DependencyGraph::new([("A", vec!["B"]), ("B", vec!["A"])]);
    ///
    /// let cycles = graph.detect_cycles();
    /// assert_eq!(cycles.len(), 1);
    /// assert_eq!(cycles[0].cycle_path(), "A -> B -> A");
    /// ```
    pub fn detect_cycles(&self) -> Vec<Cycle> {
        let mut visited = HashSet::new();
        let mut cycles = Vec::new();

        for module in self.modules() {
            if !visited.contains(module) {
                self.visit(module, Vec::new(), HashSet::new(), &mut visited, &mut cycles);
            }
        }

        cycles
    }

    fn visit<'a>(
        &'a self,
        node: &'a str,
        mut path: Vec<&'a str>,
        mut on_stack: HashSet<&'a str>,
        visited: &mut HashSet<&'a str>,
        cycles: &mut Vec<Cycle>,
    ) {
        if on_stack.contains(node) {
            if let Some(start) = path.iter().position(|&n| n == node) {
                let mut nodes: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
                nodes.push(node.to_string());
                cycles.push(Cycle { nodes });
            }
            return;
        }

        if !visited.insert(node) {
            return;
        }

        on_stack.insert(node);
        path.push(node);

        for dep in self.dependencies(node) {
            self.visit(dep, path.clone(), on_stack.clone(), visited, cycles);
        }
    }
}

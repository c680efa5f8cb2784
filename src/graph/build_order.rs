//! Build order derivation (Kahn's algorithm).

use std::collections::{HashMap, HashSet, VecDeque};

use super::DependencyGraph;

/// Outcome of build order derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOrder {
    /// Every module, dependencies before dependents
    Complete(Vec<String>),
    /// Circular dependencies prevent a total order.
    ///
    /// `ordered` holds the modules that could be placed before the cycles
    /// blocked progress; it is not a usable build order. `unresolved` lists
    /// the rest in module order.
    Blocked {
        ordered: Vec<String>,
        unresolved: Vec<String>,
    },
}

impl BuildOrder {
    /// Returns true if every module could be ordered.
    pub fn is_complete(&self) -> bool {
        matches!(self, BuildOrder::Complete(_))
    }

    /// The full order, if one exists.
    pub fn order(&self) -> Option<&[String]> {
        match self {
            BuildOrder::Complete(order) => Some(order),
            BuildOrder::Blocked { .. } => None,
        }
    }
}

impl DependencyGraph {
    /// Orders modules so that every dependency precedes its dependents.
    ///
    /// Each module starts with a pending count equal to its number of
    /// dependencies. Modules with nothing pending seed a FIFO queue in module
    /// order; each dequeued module is appended to the result and releases its
    /// dependents, which join the queue once their count reaches zero.
    ///
    /// Ties are broken by module (discovery) order rather than by name, so
    /// when several valid orders exist the one returned is not canonical.
    /// On a cyclic graph the result is shorter than [`module_count`]:
    /// modules on or behind a cycle never reach zero.
    ///
    /// [`module_count`]: DependencyGraph::module_count
    ///
    /// # Example
    ///
    /// ```rust
    /// use modscope::graph::DependencyGraph;
    ///
    /// let graph = DependencyGraph::new([
    ///     ("A", vec!["B"]),
    ///     ("B", vec!["C"]),
    ///     ("C", vec![]),
    /// ]);
    /// assert_eq!(graph.topological_order(), vec!["C", "B", "A"]);
    /// ```
    pub fn topological_order(&self) -> Vec<String> {
        let mut pending: HashMap<&str, usize> = self
            .modules()
            .map(|module| (module, self.out_degree(module)))
            .collect();

        let mut queue: VecDeque<&str> = self
            .modules()
            .filter(|module| pending[module] == 0)
            .collect();

        let mut order = Vec::with_capacity(self.module_count());
        while let Some(current) = queue.pop_front() {
            order.push(current.to_string());

            for dependent in self.dependents(current) {
                if let Some(count) = pending.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        queue.push_back(dependent);
                    }
                }
            }
        }

        order
    }

    /// Derives the build order, or reports that cycles block one.
    pub fn build_order(&self) -> BuildOrder {
        let ordered = self.topological_order();
        if ordered.len() == self.module_count() {
            return BuildOrder::Complete(ordered);
        }

        let placed: HashSet<&str> = ordered.iter().map(String::as_str).collect();
        let unresolved = self
            .modules()
            .filter(|module| !placed.contains(module))
            .map(str::to_string)
            .collect();

        BuildOrder::Blocked { ordered, unresolved }
    }
}

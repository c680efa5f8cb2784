//! Graph module for module dependency analysis.
//!
//! [`DependencyGraph`] holds the forward map (module → dependencies) and its
//! derived reverse map, and runs the analyses over them: cycle detection,
//! build ordering and degree statistics.
//!
//! # Example
//!
//! ```rust
//! use modscope::graph::{BuildOrder, DependencyGraph};
//!
//! let graph = DependencyGraph::new([
//!     ("App", vec!["Core"]),
//!     ("Core", vec![]),
//! ]);
//!
//! assert!(graph.detect_cycles().is_empty());
//! assert_eq!(graph.build_order(), BuildOrder::Complete(vec!["Core".into(), "App".into()]));
//! ```

mod build_order;
mod cycles;
mod dependency_graph;
mod stats;

pub use build_order::BuildOrder;
pub use cycles::Cycle;
pub use dependency_graph::{compute_reverse, DependencyGraph, DependencyMap};
pub use stats::{DegreeStatistics, ModuleDegree, TOP_MODULES};

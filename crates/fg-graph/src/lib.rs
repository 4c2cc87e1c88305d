//! fg-graph: graph specification and compiler for FluxGraph.
//!
//! Provides:
//! - Plain-data spec types ([`GraphSpec`] and friends) a host builds
//!   programmatically or reads from files via `fg-loaders`
//! - The graph compiler: parameter parsing, single-writer enforcement,
//!   cycle rejection on the non-delay subgraph, deterministic edge
//!   ordering, rule-condition compilation, optional stability validation
//!
//! # Example
//!
//! ```
//! use fg_core::{FunctionNamespace, SignalNamespace};
//! use fg_graph::{compile, EdgeSpec, GraphSpec, TransformSpec};
//!
//! let spec = GraphSpec {
//!     edges: vec![EdgeSpec::new(
//!         "input",
//!         "output",
//!         TransformSpec::new("linear")
//!             .with_param("scale", 2.0)
//!             .with_param("offset", 1.0),
//!     )],
//!     ..Default::default()
//! };
//!
//! let mut signal_ns = SignalNamespace::new();
//! let mut func_ns = FunctionNamespace::new();
//! let program = compile(&spec, &mut signal_ns, &mut func_ns, None).unwrap();
//! assert_eq!(program.edges.len(), 1);
//! ```

pub mod compiler;
pub mod condition;
pub mod error;
pub(crate) mod params;
pub mod spec;

// Re-exports for ergonomics
pub use compiler::{
    compile, parse_model, parse_transform, CompiledAction, CompiledEdge, CompiledProgram,
    CompiledRule, SignalOwner,
};
pub use condition::{compile_condition, CompareOp, CompiledCondition};
pub use error::{CompileError, CompileResult};
pub use spec::{ActionSpec, EdgeSpec, GraphSpec, ModelSpec, RuleSpec, TransformSpec};

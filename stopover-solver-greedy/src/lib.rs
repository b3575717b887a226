//! Greedy route solver for Stopover.
//!
//! This crate provides [`GreedySolver`], the default implementation of the
//! [`Solver`](stopover_core::Solver) trait. It builds a visiting order in
//! two phases: nearest-neighbor construction chained from the anchor, then
//! 2-opt edge-swap refinement run to a local optimum.
//!
//! The solver is deliberately deterministic: ties go to the earlier input
//! element, refinement scans pairs in a fixed order, and identical requests
//! always produce identical routes. With the destination cap the engine
//! imposes upstream, a solve completes effectively instantaneously, so the
//! whole pipeline stays synchronous.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod refine;
mod solver;

pub use solver::{GreedySolver, GreedySolverConfig};

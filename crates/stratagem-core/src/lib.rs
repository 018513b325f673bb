//! Game-agnostic search toolkit for turn-based, deterministic,
//! perfect-information games.
//!
//! The crate revolves around three interchangeable engines that pick the best
//! next move under a wall-clock budget:
//!
//! - [`search::maxn::MaxN`]: exhaustive N-player iterative deepening, every
//!   player locally maximizing its own converted score,
//! - [`search::alpha_beta::Minimax`]: two-player zero-sum iterative deepening
//!   with alpha-beta pruning and killer-line reuse,
//! - [`search::tree_search::TreeSearch`]: incremental best-first search over a
//!   persistent tree that survives across real decision steps (resume, prune
//!   to a sub-tree, cap the evaluation budget).
//!
//! The game itself is supplied by the caller through the contracts in
//! [`search`]: a state ([`search::Game`]), move application (cloning
//! [`search::Move`] or reversible [`search::ReversibleMove`]), a
//! [`search::MoveGenerator`], and a score-converter closure. Wall-clock
//! budgets flow through [`time::Timer`], a cooperative deadline checked at
//! well-defined points inside each engine.
//!
//! The remaining modules are small self-contained helpers commonly needed by
//! game implementations: 2D vectors ([`geometry`]), quadratic equations
//! ([`math`]), disk collisions ([`physics`]) and breadth-first graph scans
//! ([`graph`]).

pub mod geometry;
pub mod graph;
pub mod math;
pub mod physics;
pub mod search;
pub mod time;

pub use search::{Evaluation, Game, Move, MoveGenerator, ReversibleMove};
pub use time::{Timeout, Timer};

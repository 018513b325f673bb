//! Game-tree search engines and the contracts they share.
//!
//! Three engines, one caller-supplied game contract:
//!
//! - [`maxn::MaxN`] explores the full width of the tree with iterative
//!   deepening, assuming every player maximizes its own converted score,
//! - [`alpha_beta::Minimax`] is specialized to two-player zero-sum games and
//!   prunes with alpha-beta bounds, reusing the previous iteration's best
//!   line to order moves,
//! - [`tree_search::TreeSearch`] keeps a persistent tree and always expands
//!   the most promising leaf first; it can resume and be pruned to a
//!   sub-tree as the real game advances.
//!
//! Max-n and minimax mutate the game in place through [`ReversibleMove`] and
//! restore it before returning. The best-first engine instead requires
//! cloning [`Move`] semantics because earlier snapshots stay reachable from
//! unexpanded siblings.

pub mod alpha_beta;
mod contracts;
pub mod maxn;
mod node;
pub mod tree_search;

pub use contracts::{Evaluation, Game, Move, MoveGenerator, ReversibleMove, ScoreConverter};
pub use node::SearchNode;

#[cfg(test)]
mod tests;

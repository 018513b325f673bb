//! Contracts between the engines and a caller-supplied game.

/// One score per player, indexed by player id.
pub type Evaluation = Vec<f64>;

/// A game state.
///
/// Player ids are a dense `0..player_count` range; the vector returned by
/// [`Game::evaluate`] has one entry per player, indexed by player id.
pub trait Game {
    /// Id of the player about to move.
    fn current_player(&self) -> usize;

    /// Score the state for every player.
    ///
    /// The meaning of `depth` depends on the engine: the depth-bounded
    /// engines pass the remaining search depth (0 at the horizon), the
    /// best-first engine passes the number of moves executed since the
    /// search root. The quality of this heuristic drives the quality of
    /// every engine built on top of it.
    fn evaluate(&self, depth: usize) -> Evaluation;
}

/// A move with cloning semantics: executing it leaves the input state
/// untouched and produces an independent successor.
///
/// Required by [`crate::search::tree_search::TreeSearch`], which keeps many
/// snapshots alive simultaneously. If undoing a move is cheap for your game,
/// prefer [`ReversibleMove`] with the max-n or minimax engines: they explore
/// far more nodes per unit of time.
pub trait Move<G>: Clone {
    /// Produce the state reached by playing this move.
    fn execute(&self, game: &G) -> G;
}

/// A move with in-place semantics: executing mutates the state, cancelling
/// restores it exactly (including whose turn it is).
///
/// Used by the max-n and minimax engines, which visit siblings by
/// execute/recurse/cancel around a single state.
pub trait ReversibleMove<G>: Clone {
    /// Apply this move to the state.
    fn execute(&self, game: &mut G);

    /// Exactly invert [`Self::execute`].
    fn cancel(&self, game: &mut G);
}

/// Produces the moves available to the current player of a state.
///
/// An empty list signals a terminal state to every engine. If a player must
/// be skipped while others continue, the generator is responsible for
/// producing a neutral no-op move for it, otherwise exploration stops there.
///
/// Generating only "interesting" moves instead of all legal ones is a valid
/// strategy to search deeper.
pub trait MoveGenerator<M, G> {
    fn generate_moves(&self, game: &G) -> Vec<M>;
}

/// Collapses a per-player evaluation vector into a single preference value
/// for one player.
///
/// This is where "maximize my own score" versus "maximize my lead over the
/// others" is expressed. Implementations must be pure: engines call the
/// converter repeatedly on cached vectors and rely on identical inputs
/// producing identical outputs.
///
/// Any `Fn(&[f64], usize) -> f64` closure qualifies.
pub trait ScoreConverter: Fn(&[f64], usize) -> f64 {}

impl<F> ScoreConverter for F where F: Fn(&[f64], usize) -> f64 {}

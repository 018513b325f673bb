//! Exhaustive N-player search ("max-n").
//!
//! Explores the game tree full-width with iterative deepening, assuming
//! every player plays the move maximizing its own converted score at its
//! ply. Moves are applied and cancelled in place around each recursion, so
//! the engine works with [`ReversibleMove`] implementations.
//!
//! For pure two-player zero-sum games, prefer
//! [`crate::search::alpha_beta::Minimax`]: alpha-beta bounds prune whole
//! branches this engine has to visit. A converter that only looks at the
//! current player's entry turns this engine into a cheap "ignore the
//! opponents" explorer.

use log::{debug, trace};

use super::contracts::{Game, MoveGenerator, ReversibleMove, ScoreConverter};
use super::node::SearchNode;
use crate::time::{Timeout, Timer};

/// Iterative-deepening max-n engine.
pub struct MaxN<C> {
    timer: Timer,
    converter: C,
    evaluations: u64,
}

impl<C: ScoreConverter> MaxN<C> {
    /// Create an engine from a deadline collaborator and a score converter.
    ///
    /// Arm a budget through [`Self::timer_mut`] before each decision; an
    /// unarmed timer searches to `depth_max` unconditionally.
    pub fn new(timer: Timer, converter: C) -> Self {
        Self { timer, converter, evaluations: 0 }
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut Timer {
        &mut self.timer
    }

    /// Total count of terminal evaluations performed, for diagnostics.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Search the best move for the current player of `game`.
    ///
    /// Deepens iteratively over `depth_start..depth_max`, keeping the answer
    /// of the last fully completed depth. On deadline expiry the in-progress
    /// depth is abandoned; `None` is returned only when not even the
    /// shallowest depth completed (or the range is empty).
    ///
    /// `game` is mutated during the search and restored before returning,
    /// also when the deadline expires mid-depth.
    pub fn best<G, M, Gen>(
        &mut self,
        game: &mut G,
        generator: &Gen,
        depth_start: usize,
        depth_max: usize,
    ) -> Option<M>
    where
        G: Game,
        M: ReversibleMove<G>,
        Gen: MoveGenerator<M, G>,
    {
        let mut best: Option<SearchNode<M>> = None;
        for depth in depth_start..depth_max {
            match self.best_at(depth, game, generator) {
                Ok(node) => {
                    debug!("max-n depth {depth} completed, evaluations so far: {}", self.evaluations);
                    best = Some(node);
                }
                Err(Timeout) => {
                    debug!("max-n deadline expired at depth {depth}");
                    break;
                }
            }
        }
        best.and_then(SearchNode::into_move)
    }

    fn best_at<G, M, Gen>(
        &mut self,
        depth: usize,
        game: &mut G,
        generator: &Gen,
    ) -> Result<SearchNode<M>, Timeout>
    where
        G: Game,
        M: ReversibleMove<G>,
        Gen: MoveGenerator<M, G>,
    {
        let moves = generator.generate_moves(game);
        if moves.is_empty() {
            // Terminal state: no move to report, the evaluation stands.
            self.evaluations += 1;
            return Ok(SearchNode::new(None, game.current_player(), game.evaluate(depth), depth));
        }

        let acting = game.current_player();
        trace!("max-n: {} candidate moves for player {acting} at depth {depth}", moves.len());
        let mut best: Option<SearchNode<M>> = None;
        for mv in moves {
            self.timer.time_check()?;
            mv.execute(game);
            let explored = if depth == 0 {
                self.evaluations += 1;
                Ok(SearchNode::new(
                    Some(mv.clone()),
                    game.current_player(),
                    game.evaluate(depth),
                    depth,
                ))
            } else {
                self.best_at(depth - 1, game, generator).map(|sub| {
                    SearchNode::new(
                        Some(mv.clone()),
                        sub.acting_player(),
                        sub.evaluation().to_vec(),
                        depth,
                    )
                })
            };
            // Siblings (and the caller, on expiry) must see the state
            // exactly as it was before the move.
            mv.cancel(game);
            let candidate = explored?;

            let better = match &best {
                None => true,
                Some(current) => {
                    candidate.score_for(acting, &self.converter)
                        > current.score_for(acting, &self.converter)
                }
            };
            if better {
                best = Some(candidate);
            }
        }

        match best {
            Some(node) => Ok(node),
            None => unreachable!("a non-empty move list always yields a candidate"),
        }
    }
}

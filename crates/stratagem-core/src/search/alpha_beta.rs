//! Two-player zero-sum search with alpha-beta pruning.
//!
//! Iterative-deepening minimax restricted to exactly two players in zero-sum
//! opposition: player 0 maximizes `scores[0] - scores[1]`, player 1
//! minimizes it. Each completed depth records the entire best line, which
//! seeds move ordering at the next depth ("killer" reuse) so alpha-beta
//! bounds tighten earlier and prune more branches.
//!
//! Pruning is a pure search optimization: the returned move is identical to
//! the one a full minimax over the same depth would pick, only the work
//! differs. Cut nodes report the best line they saw before the window
//! closed (fail-soft); the bound is enough for the parent's choice and the
//! root, searched with an open window, always gets the exact value.

use log::{debug, trace};

use super::contracts::{Game, MoveGenerator, ReversibleMove};
use crate::time::{Timeout, Timer};

/// A move with its zero-sum value and the best line found below it.
#[derive(Debug, Clone)]
struct EvaluatedMove<M> {
    mv: Option<M>,
    value: f64,
    best_child: Option<Box<EvaluatedMove<M>>>,
}

/// Iterative-deepening minimax engine with alpha-beta pruning.
///
/// The best line of the previous search is retained across calls, so an
/// engine instance reused on consecutive positions of the same game keeps
/// benefiting from move ordering.
pub struct Minimax<M> {
    timer: Timer,
    killer: Option<EvaluatedMove<M>>,
}

impl<M> Minimax<M> {
    /// Create an engine from a deadline collaborator.
    ///
    /// Arm a budget through [`Self::timer_mut`] before each decision; an
    /// unarmed timer searches to `depth_max` unconditionally.
    pub fn new(timer: Timer) -> Self {
        Self { timer, killer: None }
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut Timer {
        &mut self.timer
    }

    /// Zero-sum value of the most recently completed principal line.
    pub fn principal_value(&self) -> Option<f64> {
        self.killer.as_ref().map(|line| line.value)
    }

    /// Search the best move for the current player of `game`.
    ///
    /// Deepens iteratively over `depth_start + 1 ..= depth_max`. On deadline
    /// expiry the in-progress depth is abandoned and the last depth this
    /// call completed answers; `None` when no depth completed, even if an
    /// earlier call on another position left a best line behind.
    ///
    /// `game` is mutated during the search and restored before returning,
    /// also when the deadline expires mid-depth.
    pub fn best<G, Gen>(
        &mut self,
        game: &mut G,
        generator: &Gen,
        depth_start: usize,
        depth_max: usize,
    ) -> Option<M>
    where
        G: Game,
        M: ReversibleMove<G> + PartialEq,
        Gen: MoveGenerator<M, G>,
    {
        let mut line: Option<EvaluatedMove<M>> = None;
        for depth in depth_start + 1..=depth_max {
            let maximizing = game.current_player() == 0;
            // Order by this call's own line once one exists; until then the
            // previous call's line is still a decent guess.
            let ordering = line.as_ref().or(self.killer.as_ref());
            match self.minimax(
                game,
                generator,
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                maximizing,
                ordering,
            ) {
                Ok(found) => {
                    debug!("minimax depth {depth} completed, value {}", found.value);
                    line = Some(found);
                }
                Err(Timeout) => {
                    debug!("minimax deadline expired at depth {depth}");
                    break;
                }
            }
        }
        let best = line.as_ref().and_then(|found| found.mv.clone());
        if line.is_some() {
            self.killer = line;
        }
        best
    }

    fn minimax<G, Gen>(
        &self,
        game: &mut G,
        generator: &Gen,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        previous_best: Option<&EvaluatedMove<M>>,
    ) -> Result<EvaluatedMove<M>, Timeout>
    where
        G: Game,
        M: ReversibleMove<G> + PartialEq,
        Gen: MoveGenerator<M, G>,
    {
        if depth == 0 {
            return Ok(leaf(game, depth));
        }
        let mut moves = generator.generate_moves(game);
        if moves.is_empty() {
            // Real end of game before the horizon.
            return Ok(leaf(game, depth));
        }
        trace!("minimax: {} candidate moves at depth {depth}", moves.len());

        // Try the previous iteration's best move first.
        if let Some(killer) = previous_best.and_then(|line| line.mv.as_ref()) {
            if let Some(found) = moves.iter().position(|mv| mv == killer) {
                moves.swap(0, found);
            }
        }

        let mut best: Option<EvaluatedMove<M>> = None;
        for mv in moves {
            self.timer.time_check()?;
            mv.execute(game);
            let searched = self.minimax(
                game,
                generator,
                depth - 1,
                alpha,
                beta,
                !maximizing,
                previous_best.and_then(|line| line.best_child.as_deref()),
            );
            mv.cancel(game);
            let line = searched?;
            let child = EvaluatedMove {
                value: line.value,
                mv: Some(mv),
                best_child: Some(Box::new(line)),
            };

            let better = match &best {
                None => true,
                Some(current) if maximizing => child.value > current.value,
                Some(current) => child.value < current.value,
            };
            if better {
                best = Some(child);
            }

            let best_value = match &best {
                Some(line) => line.value,
                None => unreachable!("the first child becomes the best line"),
            };
            if maximizing {
                alpha = alpha.max(best_value);
            } else {
                beta = beta.min(best_value);
            }
            if beta <= alpha {
                // The remaining siblings cannot improve what the parent
                // already has; the line found so far is a valid bound.
                break;
            }
        }

        match best {
            Some(line) => Ok(line),
            None => unreachable!("a non-empty move list always yields a line"),
        }
    }
}

fn leaf<G: Game, M>(game: &G, depth: usize) -> EvaluatedMove<M> {
    let scores = game.evaluate(depth);
    debug_assert!(scores.len() >= 2, "minimax requires a two-player evaluation");
    EvaluatedMove { mv: None, value: scores[0] - scores[1], best_child: None }
}

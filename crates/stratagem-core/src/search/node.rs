//! Evaluated node shared by the tree exploration engines.

use super::contracts::{Evaluation, ScoreConverter};

/// A move bundled with the evaluation observed when it was explored.
///
/// `acting_player` is the player to move in the evaluated state; ordering a
/// set of nodes applies the score converter to that pair. Ties between equal
/// converted scores are broken by the engines through insertion order, never
/// by collapsing distinct nodes.
#[derive(Debug, Clone)]
pub struct SearchNode<M> {
    mv: Option<M>,
    acting_player: usize,
    evaluation: Evaluation,
    depth: usize,
}

impl<M> SearchNode<M> {
    pub(crate) fn new(
        mv: Option<M>,
        acting_player: usize,
        evaluation: Evaluation,
        depth: usize,
    ) -> Self {
        Self { mv, acting_player, evaluation, depth }
    }

    pub fn acting_player(&self) -> usize {
        self.acting_player
    }

    pub fn evaluation(&self) -> &[f64] {
        &self.evaluation
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn into_move(self) -> Option<M> {
        self.mv
    }

    /// Converted preference value of this node for the given player.
    pub fn score_for(&self, player: usize, converter: &impl ScoreConverter) -> f64 {
        converter(&self.evaluation, player)
    }
}

//! Misere stick game shared by the engine tests.
//!
//! Two players alternately take 1 to 3 sticks; whoever takes the last stick
//! loses. With `s` sticks on the table the winning move is to take
//! `(s - 1) % 4`, leaving the opponent on a losing `4k + 1` pile, so every
//! engine has a known-correct answer to be checked against.

use crate::search::{Evaluation, Game, Move, MoveGenerator, ReversibleMove};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct StickGame {
    pub(super) player: usize,
    pub(super) sticks: u32,
}

impl StickGame {
    pub(super) fn new(player: usize, sticks: u32) -> Self {
        Self { player, sticks }
    }
}

impl Game for StickGame {
    fn current_player(&self) -> usize {
        self.player
    }

    fn evaluate(&self, _depth: usize) -> Evaluation {
        // Facing an empty table means the opponent took the last stick.
        let score = if self.sticks == 0 {
            100.0
        } else if self.sticks % 4 == 1 {
            -1.0
        } else {
            1.0
        };
        let mut scores = vec![0.0; 2];
        scores[self.player] = score;
        scores[1 - self.player] = -score;
        scores
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct StickMove(pub(super) u32);

impl ReversibleMove<StickGame> for StickMove {
    fn execute(&self, game: &mut StickGame) {
        game.sticks -= self.0;
        game.player = 1 - game.player;
    }

    fn cancel(&self, game: &mut StickGame) {
        game.player = 1 - game.player;
        game.sticks += self.0;
    }
}

impl Move<StickGame> for StickMove {
    fn execute(&self, game: &StickGame) -> StickGame {
        StickGame { player: 1 - game.player, sticks: game.sticks - self.0 }
    }
}

pub(super) struct StickGenerator;

impl MoveGenerator<StickMove, StickGame> for StickGenerator {
    fn generate_moves(&self, game: &StickGame) -> Vec<StickMove> {
        (1..=3).rev().filter(|&take| game.sticks >= take).map(StickMove).collect()
    }
}

/// Winning take for `sticks` on the table, `0` on a lost position.
pub(super) fn optimal_take(sticks: u32) -> u32 {
    (sticks - 1) % 4
}

/// Converter for engines that rank by the player's own score.
pub(super) fn own_score(scores: &[f64], player: usize) -> f64 {
    scores[player]
}

//! Misere Nim endgames played through the public API.
//!
//! Two players alternately take 1 to 3 sticks and whoever takes the last one
//! loses: the winning move leaves the opponent on a `4k + 1` pile. All three
//! engines must find it and must agree with each other.

use std::time::Duration;

use stratagem_core::search::alpha_beta::Minimax;
use stratagem_core::search::maxn::MaxN;
use stratagem_core::search::tree_search::TreeSearch;
use stratagem_core::{Evaluation, Game, Move, MoveGenerator, ReversibleMove, Timer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Nim {
    player: usize,
    sticks: u32,
}

impl Game for Nim {
    fn current_player(&self) -> usize {
        self.player
    }

    fn evaluate(&self, _depth: usize) -> Evaluation {
        let score = if self.sticks == 0 {
            // The opponent took the last stick.
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
struct Take(u32);

impl ReversibleMove<Nim> for Take {
    fn execute(&self, game: &mut Nim) {
        game.sticks -= self.0;
        game.player = 1 - game.player;
    }

    fn cancel(&self, game: &mut Nim) {
        game.player = 1 - game.player;
        game.sticks += self.0;
    }
}

impl Move<Nim> for Take {
    fn execute(&self, game: &Nim) -> Nim {
        Nim { player: 1 - game.player, sticks: game.sticks - self.0 }
    }
}

struct Takes;

impl MoveGenerator<Take, Nim> for Takes {
    fn generate_moves(&self, game: &Nim) -> Vec<Take> {
        (1..=3).rev().filter(|&take| game.sticks >= take).map(Take).collect()
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn all_engines_agree_on_the_winning_take() {
    init_logger();
    for sticks in [2, 3, 4, 6, 7, 8] {
        let expected = Some(Take((sticks - 1) % 4));

        let mut game = Nim { player: 0, sticks };
        let mut maxn = MaxN::new(Timer::new(), |scores: &[f64], player| scores[player]);
        assert_eq!(maxn.best(&mut game, &Takes, 0, 6), expected, "max-n, {sticks} sticks");

        let mut minimax = Minimax::new(Timer::new());
        assert_eq!(minimax.best(&mut game, &Takes, 0, 6), expected, "minimax, {sticks} sticks");

        let mut tree = TreeSearch::new(Timer::new(), 0.5, |scores: &[f64], player| scores[player]);
        assert_eq!(tree.best(game, &Takes), expected, "tree search, {sticks} sticks");
    }
}

#[test]
fn a_game_survives_a_pruned_tree() {
    init_logger();
    // Play a full endgame from 8 sticks, re-using the tree between turns.
    let mut tree = TreeSearch::new(Timer::new(), 0.5, |scores: &[f64], player| scores[player]);
    let mut game = Nim { player: 0, sticks: 8 };
    let mut best = tree.best(game, &Takes);
    while let Some(take) = best {
        game = Move::execute(&take, &game);
        if game.sticks == 0 {
            break;
        }
        tree.prune(&take, &Takes);
        best = tree.continue_best(&Takes);
    }
    // Player 0 moved first from a winning pile and forced player 1 to take
    // the last stick.
    assert_eq!(game.sticks, 0);
    assert_eq!(game.player, 0);
}

#[test]
fn a_deadline_of_zero_never_panics() {
    init_logger();
    let mut game = Nim { player: 0, sticks: 8 };

    let mut maxn = MaxN::new(Timer::new(), |scores: &[f64], player| scores[player]);
    maxn.timer_mut().start(Duration::ZERO);
    assert_eq!(maxn.best(&mut game, &Takes, 0, 6), None);

    let mut minimax = Minimax::new(Timer::new());
    minimax.timer_mut().start(Duration::ZERO);
    assert_eq!(minimax.best(&mut game, &Takes, 0, 6), None);

    // The best-first engine expands the root before its deadline gate, so
    // the depth 1 evaluations already name the winning take.
    let mut tree = TreeSearch::new(Timer::new(), 0.5, |scores: &[f64], player| scores[player]);
    tree.timer_mut().start(Duration::ZERO);
    assert_eq!(tree.best(game, &Takes), Some(Take(3)));
}

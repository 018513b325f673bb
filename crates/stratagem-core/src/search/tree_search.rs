//! Persistent best-first tree exploration.
//!
//! Unlike the depth-bounded engines, this one keeps the whole explored tree
//! between decisions. Leaves wait in a priority queue ordered by their
//! converted score discounted by a per-ply penalty factor; the search always
//! expands the most promising leaf next, wherever it sits in the tree.
//!
//! The tree survives the call that built it: [`TreeSearch::continue_best`]
//! resumes exploration with a fresh budget, and [`TreeSearch::prune`]
//! follows a move actually played by discarding every sibling sub-tree, so
//! earlier work keeps paying off as the real game advances.
//!
//! Because many snapshots stay reachable at once, the engine requires
//! cloning [`Move`] semantics rather than [`ReversibleMove`].
//!
//! [`ReversibleMove`]: super::ReversibleMove

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::io::{self, Write};

use log::{debug, trace};
use smallvec::SmallVec;

use super::contracts::{Evaluation, Game, Move, MoveGenerator, ScoreConverter};
use crate::time::{Timeout, Timer};

/// Index of a node in the arena. Stable for the lifetime of the tree, only
/// invalidated by [`TreeSearch::prune`] rebuilding the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

struct Node<G, M> {
    /// Move leading here from the parent; `None` for the original root.
    mv: Option<M>,
    game: G,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 8]>,
    /// Own heuristic evaluation, fixed at creation. Drives the expansion
    /// priority of this node while it is a leaf.
    evaluation: Evaluation,
    /// Best evaluation found in the sub-tree rooted here, per the score
    /// converter of the player to move at this node. Empty only transiently,
    /// while a reset re-collects the children.
    subtree_value: Evaluation,
    depth: usize,
    expanded: bool,
}

/// Pending leaf in the expansion queue.
///
/// Ordered by discounted priority; equal priorities pop in insertion order
/// so exploration stays deterministic.
struct Leaf {
    priority: f64,
    seq: u64,
    id: NodeId,
}

impl Ord for Leaf {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.total_cmp(&other.priority).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Leaf {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Leaf {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Leaf {}

/// Best-first engine over a persistent game tree.
///
/// The priority of a leaf at depth `d` is
/// `converter(evaluation, leaf_player) * depth_penalty_factor^d`: a factor
/// below 1 favors breadth near the root, above 1 favors depth along strong
/// lines, exactly 1 is pure greedy best-first.
pub struct TreeSearch<G, M, C> {
    timer: Timer,
    depth_penalty_factor: f64,
    converter: C,
    nodes: Vec<Node<G, M>>,
    root: Option<NodeId>,
    to_expand: BinaryHeap<Leaf>,
    next_seq: u64,
    evaluations: u64,
    evaluations_max: u64,
    best: Option<NodeId>,
}

impl<G, M, C> TreeSearch<G, M, C>
where
    G: Game,
    M: Move<G>,
    C: ScoreConverter,
{
    /// Create an engine from a deadline collaborator, a per-ply priority
    /// discount and a score converter.
    pub fn new(timer: Timer, depth_penalty_factor: f64, converter: C) -> Self {
        Self {
            timer,
            depth_penalty_factor,
            converter,
            nodes: Vec::new(),
            root: None,
            to_expand: BinaryHeap::new(),
            next_seq: 0,
            evaluations: 0,
            evaluations_max: 0,
            best: None,
        }
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut Timer {
        &mut self.timer
    }

    /// Count of child evaluations attempted since the budget was last reset.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Cap the number of child evaluations per search call, in addition to
    /// the timer. `0` removes the cap. The budget resets on every call to
    /// [`Self::best`] or [`Self::continue_best`].
    pub fn set_evaluations_max(&mut self, evaluations_max: u64) {
        self.evaluations_max = evaluations_max;
    }

    /// Number of leaves waiting in the expansion queue.
    pub fn pending_leaves(&self) -> usize {
        self.to_expand.len()
    }

    /// State reached by the best root move of the last search, if any.
    pub fn best_game(&self) -> Option<&G> {
        self.best.map(|id| &self.nodes[id.0].game)
    }

    /// Best evaluation backing the last answer, if any.
    pub fn best_eval(&self) -> Option<&[f64]> {
        self.best.map(|id| self.nodes[id.0].subtree_value.as_slice())
    }

    /// Discard any previous tree and search the best move from `game`.
    ///
    /// The root is expanded before the deadline gate, so even an already
    /// expired timer answers from the depth 1 evaluations. Exploration then
    /// runs until the queue is drained, the deadline expires or the
    /// evaluation cap is hit; the two latter leave the tree resumable
    /// through [`Self::continue_best`]. Returns `None` only on a terminal
    /// root or when the evaluation cap aborted the root expansion.
    pub fn best<Gen>(&mut self, game: G, generator: &Gen) -> Option<M>
    where
        Gen: MoveGenerator<M, G>,
    {
        self.nodes.clear();
        self.to_expand.clear();
        self.best = None;
        self.next_seq = 0;
        self.evaluations = 0;

        // The root evaluation seeds the tree but is outside the budget.
        let evaluation = game.evaluate(0);
        let root = NodeId(0);
        self.nodes.push(Node {
            mv: None,
            game,
            parent: None,
            children: SmallVec::new(),
            subtree_value: evaluation.clone(),
            evaluation,
            depth: 0,
            expanded: false,
        });
        self.root = Some(root);

        if self.expand(root, generator).is_err() {
            debug!("tree search budget expired while expanding the root");
            let node = &self.nodes[root.0];
            let priority = self.priority(&node.evaluation, node.game.current_player(), 0);
            self.push_leaf(priority, root);
        } else if self.run(generator).is_err() {
            debug!("tree search budget expired, {} leaves pending", self.to_expand.len());
        }
        self.select_best()
    }

    /// Resume exploration of the existing tree with a fresh budget.
    ///
    /// Re-arm the timer beforehand if a deadline is wanted. Returns `None`
    /// when no tree exists yet.
    pub fn continue_best<Gen>(&mut self, generator: &Gen) -> Option<M>
    where
        Gen: MoveGenerator<M, G>,
    {
        self.root?;
        self.evaluations = 0;
        if self.run(generator).is_err() {
            debug!("tree search budget expired, {} leaves pending", self.to_expand.len());
        }
        self.select_best()
    }

    /// Follow a move played in the real game: the child reached by
    /// `executed` becomes the new root and every sibling sub-tree is
    /// discarded. A new root that was never expanded is expanded right away
    /// so the tree is ready for [`Self::continue_best`].
    ///
    /// Typically called twice between decisions, once for the engine's own
    /// move and once for the opponent's answer.
    ///
    /// # Panics
    ///
    /// If `executed` matches no explored root move, which would silently
    /// desynchronize the tree from the real game.
    pub fn prune<Gen>(&mut self, executed: &M, generator: &Gen)
    where
        M: PartialEq,
        Gen: MoveGenerator<M, G>,
    {
        let root = match self.root {
            Some(root) => root,
            None => panic!("pruning failed: no tree has been built yet"),
        };
        let new_root = self.nodes[root.0]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].mv.as_ref() == Some(executed));
        let new_root = match new_root {
            Some(id) => id,
            None => panic!("pruning failed: the executed move was not found among the root moves"),
        };

        // Relocate the kept sub-tree into a fresh arena; everything left
        // behind is dropped wholesale.
        let mut old_nodes: Vec<Option<Node<G, M>>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut new_nodes: Vec<Node<G, M>> = Vec::new();
        let mut stack: Vec<(NodeId, Option<NodeId>)> = vec![(new_root, None)];
        while let Some((old_id, parent)) = stack.pop() {
            let mut node = match old_nodes[old_id.0].take() {
                Some(node) => node,
                None => unreachable!("tree nodes are visited exactly once during pruning"),
            };
            node.parent = parent;
            node.depth -= 1;
            let moved_children = std::mem::take(&mut node.children);
            let new_id = NodeId(new_nodes.len());
            if let Some(parent) = parent {
                new_nodes[parent.0].children.push(new_id);
            }
            new_nodes.push(node);
            // Reversed so siblings keep their original order.
            for &child in moved_children.iter().rev() {
                stack.push((child, Some(new_id)));
            }
        }
        self.nodes = new_nodes;
        let root = NodeId(0);
        self.root = Some(root);
        self.best = None;
        self.evaluations = 0;
        self.to_expand.clear();
        self.next_seq = 0;

        if !self.nodes[root.0].expanded {
            // The kept sub-tree is the single unexpanded node; expand it now
            // so the root children exist for the next selection.
            if self.expand(root, generator).is_err() {
                debug!("tree search budget expired while expanding the pruned root");
                let node = &self.nodes[root.0];
                let priority =
                    self.priority(&node.evaluation, node.game.current_player(), 0);
                self.push_leaf(priority, root);
            }
            return;
        }

        // Rebuild the queue from the surviving leaves at their new depths.
        for index in 0..self.nodes.len() {
            if self.nodes[index].expanded {
                continue;
            }
            let node = &self.nodes[index];
            let priority = self.priority(&node.evaluation, node.game.current_player(), node.depth);
            self.push_leaf(priority, NodeId(index));
        }
    }

    /// Dump the explored tree for inspection, one node per line.
    pub fn write_tree(&self, out: &mut dyn Write) -> io::Result<()>
    where
        M: fmt::Debug,
    {
        let root = match self.root {
            Some(root) => root,
            None => return Ok(()),
        };
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            for _ in 0..node.depth {
                write!(out, "  ")?;
            }
            writeln!(out, "{:?} {:?}", node.mv, node.subtree_value)?;
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        Ok(())
    }

    fn run<Gen>(&mut self, generator: &Gen) -> Result<(), Timeout>
    where
        Gen: MoveGenerator<M, G>,
    {
        while let Some(leaf) = self.to_expand.pop() {
            let step = match self.timer.time_check() {
                Ok(()) => self.expand(leaf.id, generator),
                Err(timeout) => Err(timeout),
            };
            if let Err(timeout) = step {
                // Keep the leaf pending so a later call can resume here.
                self.to_expand.push(leaf);
                return Err(timeout);
            }
        }
        Ok(())
    }

    /// Expand one leaf: evaluate every successor state, attach the children
    /// and propagate the new values up the tree. All-or-nothing with respect
    /// to the budget.
    fn expand<Gen>(&mut self, id: NodeId, generator: &Gen) -> Result<(), Timeout>
    where
        Gen: MoveGenerator<M, G>,
    {
        let depth = self.nodes[id.0].depth;
        let moves = generator.generate_moves(&self.nodes[id.0].game);
        let mut staged: Vec<(M, G, Evaluation)> = Vec::with_capacity(moves.len());
        for mv in moves {
            let child_game = mv.execute(&self.nodes[id.0].game);
            self.evaluations += 1;
            if self.evaluations_max > 0 && self.evaluations > self.evaluations_max {
                return Err(Timeout);
            }
            let evaluation = child_game.evaluate(depth + 1);
            staged.push((mv, child_game, evaluation));
        }

        trace!("tree search: expanding a depth {depth} node into {} children", staged.len());
        self.nodes[id.0].expanded = true;
        let has_children = !staged.is_empty();
        for (mv, game, evaluation) in staged {
            let child = NodeId(self.nodes.len());
            let priority = self.priority(&evaluation, game.current_player(), depth + 1);
            self.nodes.push(Node {
                mv: Some(mv),
                game,
                parent: Some(id),
                children: SmallVec::new(),
                subtree_value: evaluation.clone(),
                evaluation,
                depth: depth + 1,
                expanded: false,
            });
            self.nodes[id.0].children.push(child);
            self.push_leaf(priority, child);
        }
        if has_children {
            self.reset_evaluation(id);
        }
        Ok(())
    }

    /// Re-derive this node's sub-tree value from its children after an
    /// expansion changed the picture below it. When the parent's value came
    /// from this node's now stale value, the reset cascades upward.
    fn reset_evaluation(&mut self, id: NodeId) {
        let parent = self.nodes[id.0].parent;
        let reset_parent = parent
            .is_some_and(|p| self.nodes[p.0].subtree_value == self.nodes[id.0].subtree_value);
        self.nodes[id.0].subtree_value.clear();
        let children = self.nodes[id.0].children.clone();
        for child in children {
            let value = self.nodes[child.0].subtree_value.clone();
            self.back_propagate(id, value, !reset_parent);
        }
        if reset_parent {
            if let Some(parent) = parent {
                self.reset_evaluation(parent);
            }
        }
    }

    /// Offer `value` to the node; it is adopted when it beats the current
    /// sub-tree value for the player to move there, and then offered to the
    /// parent in turn.
    fn back_propagate(&mut self, id: NodeId, value: Evaluation, to_parent: bool) {
        let player = self.nodes[id.0].game.current_player();
        let current = &self.nodes[id.0].subtree_value;
        let adopt = current.is_empty()
            || (self.converter)(&value, player) > (self.converter)(current, player);
        if adopt {
            self.nodes[id.0].subtree_value = value.clone();
            if to_parent {
                if let Some(parent) = self.nodes[id.0].parent {
                    self.back_propagate(parent, value, true);
                }
            }
        }
    }

    /// Pick the root child with the best sub-tree value for the root player.
    /// The first explored child wins ties, so the answer is deterministic.
    fn select_best(&mut self) -> Option<M> {
        let root = self.root?;
        let root_player = self.nodes[root.0].game.current_player();
        let mut best: Option<NodeId> = None;
        for &child in &self.nodes[root.0].children {
            let better = match best {
                None => true,
                Some(current) => {
                    (self.converter)(&self.nodes[child.0].subtree_value, root_player)
                        > (self.converter)(&self.nodes[current.0].subtree_value, root_player)
                }
            };
            if better {
                best = Some(child);
            }
        }
        self.best = best;
        best.and_then(|id| self.nodes[id.0].mv.clone())
    }

    fn push_leaf(&mut self, priority: f64, id: NodeId) {
        self.to_expand.push(Leaf { priority, seq: self.next_seq, id });
        self.next_seq += 1;
    }

    fn priority(&self, evaluation: &[f64], player: usize, depth: usize) -> f64 {
        (self.converter)(evaluation, player) * self.depth_penalty_factor.powi(depth as i32)
    }
}

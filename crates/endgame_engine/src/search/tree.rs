//! Arena search tree
//!
//! Nodes live in one `Vec` and refer to each other by index: children are owned by their parent
//! (only the parent lists them), the parent index is a plain back-reference. A
//! `(parent, ply)` map gives direct child lookup without scanning.

use super::rollout::TerminalKind;
use crate::ply::Ply;
use std::collections::HashMap;

/// Index into the node arena
pub type NodeId = usize;

/// Expansion state of a node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
    Unexpanded,
    Expanded,
    Terminal(TerminalKind),
}

/// One position reached by a ply
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Ply leading here; `None` at the root
    pub ply: Option<Ply>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub visits: u32,
    /// Sum of rewards seen from the side that played `ply`
    pub reward: f64,
    pub state: NodeState,
}

impl Node {
    fn new(ply: Option<Ply>, parent: Option<NodeId>) -> Self {
        Self {
            ply,
            parent,
            children: Vec::new(),
            visits: 0,
            reward: 0.0,
            state: NodeState::Unexpanded,
        }
    }

    /// Average reward; meaningless (zero) before the first visit
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward / self.visits as f64
        }
    }
}

/// MCTS tree for one decision
#[derive(Clone, Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
    index: HashMap<(NodeId, Ply), NodeId>,
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTree {
    pub const ROOT: NodeId = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None, None)],
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT]
    }

    /// Child of `parent` reached by `ply`
    pub fn child(&self, parent: NodeId, ply: Ply) -> Option<NodeId> {
        self.index.get(&(parent, ply)).copied()
    }

    /// Create one child per ply and mark `id` expanded
    ///
    /// An empty move list marks nothing; the caller classifies such nodes as terminal.
    pub fn expand(&mut self, id: NodeId, moves: &[Ply]) {
        for &ply in moves {
            if self.index.contains_key(&(id, ply)) {
                continue;
            }
            let child = self.nodes.len();
            self.nodes.push(Node::new(Some(ply), Some(id)));
            self.nodes[id].children.push(child);
            self.index.insert((id, ply), child);
        }
        if !self.nodes[id].children.is_empty() {
            self.nodes[id].state = NodeState::Expanded;
        }
    }

    pub fn mark_terminal(&mut self, id: NodeId, kind: TerminalKind) {
        self.nodes[id].state = NodeState::Terminal(kind);
    }

    /// UCT choice among the children of `id`
    ///
    /// Unvisited children come first, in generator order. Otherwise the child maximising
    /// `mean + c * sqrt(ln(N) / n)` wins; ties keep the earlier child.
    pub fn select_child(&self, id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = &self.nodes[id];
        if let Some(&fresh) = node.children.iter().find(|&&child| self.nodes[child].visits == 0) {
            return Some(fresh);
        }

        let log_parent = (node.visits.max(1) as f64).ln();
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &node.children {
            let stats = &self.nodes[child];
            let score = stats.mean_reward() + exploration * (log_parent / stats.visits as f64).sqrt();
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Add `reward` (seen from the side that played into `leaf`) along the path to the root
    pub fn backpropagate(&mut self, leaf: NodeId, reward: f64) {
        let mut current = Some(leaf);
        let mut reward = reward;
        while let Some(id) = current {
            let node = &mut self.nodes[id];
            node.visits += 1;
            node.reward += reward;
            reward = 1.0 - reward;
            current = node.parent;
        }
    }

    /// Most visited child of `id`, ties broken by mean reward then generator order
    pub fn best_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for &child in &self.nodes[id].children {
            let better = match best {
                None => true,
                Some(current) => {
                    let (a, b) = (&self.nodes[child], &self.nodes[current]);
                    a.visits > b.visits || (a.visits == b.visits && a.mean_reward() > b.mean_reward())
                }
            };
            if better {
                best = Some(child);
            }
        }
        best
    }

    /// Plies from the root down to `id`
    pub fn path(&self, id: NodeId) -> Vec<Ply> {
        let mut plies = Vec::new();
        let mut current = id;
        while let Some(ply) = self.nodes[current].ply {
            plies.push(ply);
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        plies.reverse();
        plies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    fn plies() -> Vec<Ply> {
        vec![
            Ply::encode(0x00, 0x10, WHITE_QUEEN_ROOK, EMPTY),
            Ply::encode(0x00, 0x20, WHITE_QUEEN_ROOK, EMPTY),
            Ply::encode(0x04, 0x14, WHITE_KING, EMPTY),
        ]
    }

    #[test]
    fn test_expand_creates_indexed_children() {
        let mut tree = SearchTree::new();
        let moves = plies();
        tree.expand(SearchTree::ROOT, &moves);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.root().state, NodeState::Expanded);
        for (i, &ply) in moves.iter().enumerate() {
            assert_eq!(tree.child(SearchTree::ROOT, ply), Some(i + 1));
            assert_eq!(tree.node(i + 1).parent, Some(SearchTree::ROOT));
        }

        tree.expand(SearchTree::ROOT, &moves);
        assert_eq!(tree.len(), 4, "re-expansion must not duplicate children");
    }

    #[test]
    fn test_unvisited_children_selected_in_order() {
        let mut tree = SearchTree::new();
        tree.expand(SearchTree::ROOT, &plies());
        assert_eq!(tree.select_child(SearchTree::ROOT, 1.4), Some(1));
        tree.backpropagate(1, 1.0);
        assert_eq!(tree.select_child(SearchTree::ROOT, 1.4), Some(2));
    }

    #[test]
    fn test_backpropagation_flips_perspective() {
        let mut tree = SearchTree::new();
        tree.expand(SearchTree::ROOT, &plies());
        let reply = [Ply::encode(0x74, 0x64, BLACK_KING, EMPTY)];
        tree.expand(1, &reply);
        let leaf = tree.child(1, reply[0]).unwrap();

        tree.backpropagate(leaf, 0.25);
        assert_eq!(tree.node(leaf).reward, 0.25);
        assert_eq!(tree.node(1).reward, 0.75);
        assert_eq!(tree.root().reward, 0.25);
        assert_eq!(tree.root().visits, 1);
        assert_eq!(tree.path(leaf), vec![plies()[0], reply[0]]);
    }

    #[test]
    fn test_best_child_prefers_visits_then_mean() {
        let mut tree = SearchTree::new();
        tree.expand(SearchTree::ROOT, &plies());
        tree.backpropagate(1, 0.2);
        tree.backpropagate(1, 0.2);
        tree.backpropagate(2, 0.9);
        tree.backpropagate(3, 0.5);
        tree.backpropagate(3, 0.6);
        assert_eq!(tree.best_child(SearchTree::ROOT), Some(3));
    }

    #[test]
    fn test_select_child_exploits_after_all_visited() {
        let mut tree = SearchTree::new();
        tree.expand(SearchTree::ROOT, &plies());
        tree.backpropagate(1, 0.0);
        tree.backpropagate(2, 1.0);
        tree.backpropagate(3, 0.5);
        assert_eq!(tree.select_child(SearchTree::ROOT, 0.0), Some(2));
    }
}

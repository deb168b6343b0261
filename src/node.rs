use std::cmp::Ordering;

use crate::puzzle::{Board, Move};

/// A node in the search tree.
///
/// Nodes are stored in a flat arena (`Vec<SearchNode>`) owned by a single
/// solve call and reference their parent by index. Children are never
/// recorded on the parent; the tree is only walked upwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    /// Board at this node. `Board` is `Copy`, so sharing is free.
    pub board: Board,
    /// Index of the parent node, `None` for the root.
    pub parent: Option<usize>,
    /// Move that produced this node from its parent, `None` for the root.
    pub action: Option<Move>,
    /// Moves from the start (depth in the tree).
    pub g: u32,
    /// Heuristic estimate of the moves remaining, computed from `board`.
    pub h: u32,
}

impl SearchNode {
    pub fn root(board: Board) -> Self {
        Self {
            board,
            parent: None,
            action: None,
            g: 0,
            h: board.heuristic(),
        }
    }

    pub fn child(parent_index: usize, parent: &SearchNode, action: Move, board: Board) -> Self {
        Self {
            board,
            parent: Some(parent_index),
            action: Some(action),
            g: parent.g + 1,
            h: board.heuristic(),
        }
    }

    /// `g + h`.
    pub fn total_cost(&self) -> u32 {
        self.g + self.h
    }
}

/// Priority queue entry for the frontier.
///
/// Used with `BinaryHeap` (max-heap), so the ordering is reversed: the
/// "greatest" entry is the one to expand next. Ties on `f` go to the deeper
/// node, then to the entry pushed first, which makes the returned path
/// reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierEntry {
    pub f: u32,
    pub g: u32,
    /// Insertion counter.
    pub seq: u64,
    /// Index into the node arena.
    pub index: usize,
}

impl FrontierEntry {
    pub fn new(node: &SearchNode, index: usize, seq: u64) -> Self {
        Self {
            f: node.total_cost(),
            g: node.g,
            seq,
            index,
        }
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Trace the parent chain from `index` back to the root, returning arena
/// indices in root-to-`index` order.
pub fn extract_path(arena: &[SearchNode], index: usize) -> Vec<usize> {
    let mut path = Vec::new();
    let mut current = Some(index);
    while let Some(idx) = current {
        path.push(idx);
        current = arena[idx].parent;
    }
    path.reverse();
    path
}

/// Copy the chain ending at `index` out of the arena. Parent indices in the
/// result point into the returned vector, so it stays valid on its own.
pub fn detach_path(arena: &[SearchNode], index: usize) -> Vec<SearchNode> {
    extract_path(arena, index)
        .into_iter()
        .enumerate()
        .map(|(pos, idx)| SearchNode {
            parent: pos.checked_sub(1),
            ..arena[idx].clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    fn entry(f: u32, g: u32, seq: u64) -> FrontierEntry {
        FrontierEntry {
            f,
            g,
            seq,
            index: seq as usize,
        }
    }

    #[test]
    fn test_root_node() {
        let board: Board = "1 2 3 / 4 5 6 / 7 _ 8".parse().unwrap();
        let root = SearchNode::root(board);
        assert_eq!(root.g, 0);
        assert_eq!(root.h, 1);
        assert_eq!(root.total_cost(), 1);
        assert!(root.parent.is_none());
        assert!(root.action.is_none());
    }

    #[test]
    fn test_child_recomputes_heuristic() {
        let board: Board = "1 2 3 / 4 5 6 / 7 _ 8".parse().unwrap();
        let root = SearchNode::root(board);
        let next = board.apply_move(Move::Right).unwrap();
        let child = SearchNode::child(0, &root, Move::Right, next);
        assert_eq!(child.g, 1);
        assert_eq!(child.h, 0);
        assert_eq!(child.parent, Some(0));
        assert_eq!(child.action, Some(Move::Right));
    }

    #[test]
    fn test_lowest_f_pops_first() {
        let mut heap = BinaryHeap::new();
        heap.push(entry(5, 1, 0));
        heap.push(entry(3, 1, 1));
        heap.push(entry(4, 1, 2));
        let order: Vec<u32> = std::iter::from_fn(|| heap.pop()).map(|e| e.f).collect();
        assert_eq!(order, vec![3, 4, 5]);
    }

    #[test]
    fn test_tie_break_prefers_deeper_then_older() {
        let mut heap = BinaryHeap::new();
        heap.push(entry(6, 2, 0));
        heap.push(entry(6, 4, 1));
        heap.push(entry(6, 4, 2));
        let order: Vec<u64> = std::iter::from_fn(|| heap.pop()).map(|e| e.seq).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_detach_path_rebases_parents() {
        let start: Board = "1 2 3 / 4 5 6 / _ 7 8".parse().unwrap();
        let mid = start.apply_move(Move::Right).unwrap();
        let end = mid.apply_move(Move::Right).unwrap();

        let root = SearchNode::root(start);
        let sibling = SearchNode::child(0, &root, Move::Up, start.apply_move(Move::Up).unwrap());
        let a = SearchNode::child(0, &root, Move::Right, mid);
        let b = SearchNode::child(2, &a, Move::Right, end);
        let arena = vec![root, sibling, a, b];

        assert_eq!(extract_path(&arena, 3), vec![0, 2, 3]);

        let path = detach_path(&arena, 3);
        assert_eq!(path.len(), 3);
        assert_eq!(path[0].parent, None);
        assert_eq!(path[1].parent, Some(0));
        assert_eq!(path[2].parent, Some(1));
        assert_eq!(path[2].board, Board::goal());
        assert_eq!(path[2].g, 2);
    }
}

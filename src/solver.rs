//! A* search over boards with a Manhattan-distance heuristic.

use std::collections::{BinaryHeap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::node::{detach_path, FrontierEntry, SearchNode};
use crate::puzzle::{Board, Move};

/// Counters collected during one solve call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Distinct boards expanded.
    pub expanded: usize,
    /// Child nodes pushed onto the frontier.
    pub generated: usize,
    /// Largest frontier size observed.
    pub max_frontier: usize,
    pub elapsed: Duration,
}

/// An optimal path from the start board to the goal.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Root first, goal last. `path[0].action` is `None`.
    pub path: Vec<SearchNode>,
    pub stats: SearchStats,
}

impl Solution {
    /// Number of moves; equals the `g` of the last node.
    pub fn len(&self) -> usize {
        self.path.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn moves(&self) -> Vec<Move> {
        self.path.iter().filter_map(|node| node.action).collect()
    }

    pub fn boards(&self) -> impl Iterator<Item = &Board> {
        self.path.iter().map(|node| &node.board)
    }
}

/// Result of a solve call. Exhausting the frontier is an outcome, not an error.
#[derive(Debug, Clone)]
pub enum Outcome {
    Solved(Solution),
    /// Every board reachable from the start was expanded without meeting the goal.
    NoSolution(SearchStats),
    /// The cancel token was raised before the search finished.
    Cancelled(SearchStats),
}

impl Outcome {
    /// The solution path, or an empty slice when there is none.
    pub fn path(&self) -> &[SearchNode] {
        match self {
            Outcome::Solved(solution) => &solution.path,
            _ => &[],
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            Outcome::Solved(solution) => &solution.stats,
            Outcome::NoSolution(stats) | Outcome::Cancelled(stats) => stats,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }
}

/// Shared flag that stops a running search at the next frontier pop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Finds a minimum-move solution for one start board.
#[derive(Debug, Clone)]
pub struct Solver {
    start: Board,
}

impl Solver {
    pub fn new(start: Board) -> Self {
        Self { start }
    }

    /// Validate a 3x3 grid (0 is the blank) and wrap it in a solver.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        Board::from_rows(rows).map(Self::new)
    }

    pub fn start(&self) -> &Board {
        &self.start
    }

    pub fn solve(&self) -> Outcome {
        self.solve_with(&CancelToken::new())
    }

    /// Run A* until the goal is popped, the frontier empties, or `cancel`
    /// is raised. The token is checked once per pop.
    pub fn solve_with(&self, cancel: &CancelToken) -> Outcome {
        let start_time = Instant::now();
        let mut stats = SearchStats::default();

        let root = SearchNode::root(self.start);
        tracing::debug!(start = ?self.start.cells(), h = root.h, "Starting search");

        let mut arena: Vec<SearchNode> = vec![root];
        let mut frontier = BinaryHeap::new();
        let mut visited: HashSet<Board> = HashSet::new();
        let mut seq: u64 = 0;

        frontier.push(FrontierEntry::new(&arena[0], 0, seq));
        stats.max_frontier = 1;

        while let Some(current) = frontier.pop() {
            if cancel.is_cancelled() {
                stats.elapsed = start_time.elapsed();
                tracing::info!(
                    expanded = stats.expanded,
                    frontier = frontier.len(),
                    "Search cancelled"
                );
                return Outcome::Cancelled(stats);
            }

            let node = &arena[current.index];
            let board = node.board;

            if board.is_goal() {
                stats.elapsed = start_time.elapsed();
                let path = detach_path(&arena, current.index);
                tracing::info!(
                    moves = path.len() - 1,
                    expanded = stats.expanded,
                    generated = stats.generated,
                    max_frontier = stats.max_frontier,
                    elapsed_ms = stats.elapsed.as_millis() as u64,
                    "Solution found"
                );
                return Outcome::Solved(Solution { path, stats });
            }

            // The same board may have been queued along several routes;
            // the first pop is already optimal under a consistent heuristic.
            if !visited.insert(board) {
                continue;
            }
            stats.expanded += 1;

            let parent = node.clone();
            tracing::trace!(g = parent.g, h = parent.h, index = current.index, "Expanding");

            for (action, child) in board.successors() {
                if visited.contains(&child) {
                    continue;
                }
                let index = arena.len();
                arena.push(SearchNode::child(current.index, &parent, action, child));
                seq += 1;
                frontier.push(FrontierEntry::new(&arena[index], index, seq));
                stats.generated += 1;
            }
            stats.max_frontier = stats.max_frontier.max(frontier.len());
        }

        stats.elapsed = start_time.elapsed();
        tracing::info!(
            expanded = stats.expanded,
            generated = stats.generated,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "Frontier exhausted, no solution"
        );
        Outcome::NoSolution(stats)
    }
}

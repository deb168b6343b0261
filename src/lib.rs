//! Optimal 8-puzzle solver.
//!
//! Boards are immutable `[u8; 9]` values searched with A* under the
//! Manhattan-distance heuristic, so the first goal popped from the frontier
//! is a shortest solution.
//!
//! # Key types
//!
//! - [`Board`] / [`Move`]: configurations and blank moves
//! - [`SearchNode`]: arena node with path cost, estimate and parent index
//! - [`Solver`] / [`Outcome`]: the search driver and its result
//! - [`Renderer`]: terminal playback of a solution path

pub mod error;
pub mod node;
pub mod puzzle;
pub mod render;
pub mod solver;

pub use error::{Error, Result};
pub use node::{extract_path, FrontierEntry, SearchNode};
pub use puzzle::{Board, Move, BLANK, GOAL};
pub use render::{render_board, Renderer};
pub use solver::{CancelToken, Outcome, SearchStats, Solution, Solver};

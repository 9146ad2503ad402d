pub mod grid;
pub mod solver;

pub use grid::{Grid, Pos};
pub use solver::{Solver, Unsolvable};

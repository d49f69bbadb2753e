//! Board model for Dotgrid.
//!
//! A dots-and-boxes board is a square grid of dots. Players draw [`Line`]s
//! between horizontally or vertically adjacent dots; whoever draws the
//! fourth side of a [`Square`] owns it.
//!
//! This crate is pure: no I/O, no async, no knowledge of players beyond a
//! generic owner type. It provides:
//!
//! - **Geometry** ([`Point`], [`Line`], [`Square`]): value types with a
//!   single canonical form, so `(0,1)-(0,0)` and `(0,0)-(0,1)` are the same
//!   line everywhere.
//! - **Board** ([`Board`]): drawn lines, owned squares, and queries.
//! - **Completion detection** ([`completed_squares`]): which squares a line
//!   encloses.
//!
//! ```text
//! (0,0)───(0,1)   (0,2)
//!   │  "0,0" │
//! (1,0)───(1,1)   (1,2)
//! ```

mod board;
mod completion;
mod error;
mod geometry;

pub use board::{Board, GRID_SIZE};
pub use completion::completed_squares;
pub use error::BoardError;
pub use geometry::{Line, LineCoords, Orientation, Point, Square};

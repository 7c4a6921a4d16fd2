#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    reason = "internal crate; panics are invariant violations"
)]

pub mod board;
pub mod color;
pub mod coord;
pub mod danger;
pub mod end_state;
pub mod engine;
pub mod error;
pub mod fen;
pub mod fuzz;
pub mod hand;
pub mod history;
pub mod modifier;
pub mod movegen;
pub mod notation;
pub mod piece;
pub mod placement;
pub mod portal;
pub mod ray;
pub mod register;
pub mod rules;
pub mod square;
pub mod square_set;
pub mod state;

/// Builds a [`coord::Coord`] from a square name at compile time.
#[macro_export]
macro_rules! coord {
    ($name:literal) => {
        const { $crate::coord::Coord::from_name($name) }
    };
}

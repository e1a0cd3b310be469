//! Solutions for Advent of Code 2023.
//!
//! Each day is a module with a `solve` function, wired up to a binary in
//! `src/bin` through [lib::entry!].

pub mod d01;
pub mod d02;
pub mod d03;

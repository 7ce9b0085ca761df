//! A collection of models to represent field service routing problem and its solution.

pub mod common;
pub mod config;
pub mod goal;
pub mod problem;
pub mod solution;

//! Step definitions for task command BDD scenarios.

pub mod then;
pub mod world;

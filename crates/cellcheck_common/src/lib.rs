//! Shared foundational types used across the cellcheck harness.
//!
//! This crate provides 4-state logic values, packed port-ordered logic vectors,
//! time spans for settle delays, and the run options (vector policy, gate
//! filter) that every other crate agrees on.

#![warn(missing_docs)]

pub mod delay;
pub mod logic;
pub mod logic_vec;
pub mod policy;

pub use delay::{Delay, ParseDelayError};
pub use logic::Logic;
pub use logic_vec::{LogicVec, ParseLogicVecError};
pub use policy::{GateFilter, VectorPolicy};

//! KAIROS Temporal Engine - Mixed-radix time arithmetic
//!
//! This crate implements the Temporal Engine:
//! - Conversion table between every pair of hierarchy levels
//! - Canonical timepoint construction and normalization
//! - Scalar-space arithmetic (add, subtract, compare, difference)
//! - Hierarchy reconfiguration (insert, remove, set radix)
//! - Lossy human-time morphism for display

pub mod convert;
pub mod engine;
pub mod human;

pub use convert::*;
pub use engine::*;
pub use human::*;

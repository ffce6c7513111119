//! KAIROS Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout KAIROS:
//! - Level hierarchy primitives (Level, LevelHierarchy)
//! - Timepoint and absolute scalar (Timepoint, Absolute)
//! - Error taxonomy (KairosError)

pub mod error;
pub mod level;
pub mod timepoint;

pub use error::*;
pub use level::*;
pub use timepoint::*;

//! KAIROS Scheduler - Dependency-aware placement across a fixed agent pool
//!
//! This crate implements the greedy scheduler:
//! - Task records with partial-timepoint durations and dependency sets
//! - Readiness rounds (Unscheduled -> Ready -> Scheduled)
//! - Deterministic greedy placement on the least-loaded agent
//! - Immutable schedules for the rendering layer

pub mod scheduler;
pub mod task;

pub use scheduler::*;
pub use task::*;

//! Domain model for the task, more and home slices.
//!
//! # Responsibility
//! - Define canonical entity shapes shared by store, selectors and FFI.
//! - Keep field validation next to the types it guards.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Model types are plain data; they never reference store state.

pub mod home;
pub mod more;
pub mod task;
pub mod validation;

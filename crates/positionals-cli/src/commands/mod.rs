//! CLI command implementations.
//!
//! Every command runs against a manager that has already been refreshed
//! (or loaded from cache with `--offline`).

pub mod check;
pub mod list;
pub mod show;
pub mod status;
pub mod sync;

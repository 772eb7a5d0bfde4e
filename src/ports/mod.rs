//! Port traits defining external boundaries.
//!
//! The only boundary this crate crosses is spawning the `svn` client.
//! Implementations live in `src/adapters/`.

pub mod process;

pub use process::{Invocation, ProcessOutput, ProcessRunner};

//! Adapter implementations of the port traits.

mod failure;
pub mod live;
pub mod recording;
pub mod replaying;

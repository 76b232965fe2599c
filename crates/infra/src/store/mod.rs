//! Local store adapters

pub mod memory;

pub use memory::{InMemoryActivityStore, InMemoryProjectDirectory, StaticPermissionService};

pub mod document;
pub mod memory;

pub use document::{HostError, SpyDocument};
pub use memory::{InMemoryDocument, NodeId};

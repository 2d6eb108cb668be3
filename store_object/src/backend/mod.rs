//! Document store implementations

pub mod matcher;
pub mod memory;
pub mod mongo;

pub use memory::MemoryBackend;
pub use mongo::MongoBackend;

pub mod core;
pub mod entity_store;
pub mod soft_deletable;


pub use core::SoftDeleteRepository;
pub use entity_store::EntityStore;

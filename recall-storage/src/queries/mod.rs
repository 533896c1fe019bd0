pub mod memory_crud;
pub mod relationship_ops;
pub mod stats;
pub mod tag_ops;

// Kernel - store abstractions and the dependency container

pub mod deps;
pub mod filter;
pub mod memory_store;
pub mod postgres_store;
pub mod traits;

pub use deps::BlogDeps;
pub use filter::Filter;
pub use memory_store::InMemoryPostStore;
pub use postgres_store::PgPostStore;
pub use traits::{BasePostStore, Record};

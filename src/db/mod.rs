pub mod store;

pub use store::{Collection, Collections, InMemoryStore, Record};

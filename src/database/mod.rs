pub mod manager;
pub mod memory;
pub mod mongo;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::InMemoryStore;
pub use mongo::MongoStore;
pub use store::{DocumentStore, UpdateOutcome};

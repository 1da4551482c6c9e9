// Durable document store
// One storage key holds the whole serialized document

mod error;
mod seed;
mod storage;
mod store;

pub use error::{Result, StoreError};
pub use seed::{FileSeed, SeedSource, StaticSeed, DEFAULT_SEED};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{DocumentStore, LoadReport, LoadSource, StoreDefaults, DEFAULT_STORAGE_KEY};

//! In-process storage backend with the same constraints and transaction
//! behaviour as the MySQL backend. Backs the test suite and `store.backend = "memory"`.

mod block_repo_memory;
mod friendship_repo_memory;
mod subscription_repo_memory;
mod user_repo_memory;

pub use block_repo_memory::*;
pub use friendship_repo_memory::*;
pub use subscription_repo_memory::*;
pub use user_repo_memory::*;

mod memory_store;

pub use memory_store::{MemoryStore, MemoryTx, MemoryTxManager};

// repo

mod block_repo;
mod friendship_repo;
mod subscription_repo;
mod user_repo;

pub use block_repo::*;
pub use friendship_repo::*;
pub use subscription_repo::*;
pub use user_repo::*;

mod repo_error;
mod repo_tx;

pub use repo_error::*;
pub use repo_tx::*;

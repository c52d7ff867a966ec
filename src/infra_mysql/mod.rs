mod block_repo_mysql;
mod friendship_repo_mysql;
mod subscription_repo_mysql;
mod user_repo_mysql;

pub use block_repo_mysql::*;
pub use friendship_repo_mysql::*;
pub use subscription_repo_mysql::*;
pub use user_repo_mysql::*;

mod repo_tx_mysql;
mod schema;

pub use repo_tx_mysql::*;
pub use schema::*;

mod util;

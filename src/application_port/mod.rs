mod block_service;
mod friendship_service;
mod notification_service;
mod relationship_service;
mod subscription_service;

pub use block_service::*;
pub use friendship_service::*;
pub use notification_service::*;
pub use relationship_service::*;
pub use subscription_service::*;

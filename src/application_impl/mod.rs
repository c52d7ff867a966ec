mod audience;
mod lookup;

mod block_service_impl;
mod friendship_service_impl;
mod notification_service_impl;
mod subscription_service_impl;

pub use block_service_impl::*;
pub use friendship_service_impl::*;
pub use notification_service_impl::*;
pub use subscription_service_impl::*;

mod mention;
mod relation;
mod user;

pub use mention::*;
pub use relation::*;
pub use user::*;

//! Global tracing setup. Service code logs through the re-exported macros.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};

pub use confstore_core::app::App;
pub use confstore_types::error::{ClResult, Error};
pub use confstore_types::types::UserId;

pub use tracing::{debug, error, info, warn};

// vim: ts=4

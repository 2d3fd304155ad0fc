pub use crate::app::App;
pub use confstore_types::error::{ClResult, Error};
pub use confstore_types::types::UserId;

pub use tracing::{debug, debug_span, error, info, info_span, warn};

// vim: ts=4

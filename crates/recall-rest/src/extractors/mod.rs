//! Custom Axum extractors.

mod user_id;
mod validated;

pub use user_id::*;
pub use validated::*;

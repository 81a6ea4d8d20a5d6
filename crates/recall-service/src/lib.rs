//! # Recall Service
//!
//! Category and flashcard use cases over a durable store and a Redis
//! cache-aside layer.
//!
//! Reads try the cache first and fall back to the store, repopulating the
//! cache on a detached task. Writes commit to the store, respond, and then
//! reconcile the cache in the background. Cache failures are logged and
//! never change the outcome of a request.

pub mod background;
pub mod cache;
pub mod category_service;
pub mod dto;
pub mod flashcard_service;
pub mod r#impl;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use cache::*;
pub use category_service::*;
pub use dto::*;
pub use flashcard_service::*;
pub use r#impl::*;

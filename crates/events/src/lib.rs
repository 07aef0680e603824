//! Scribe article notification bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ArticleEvent`]: the events pushed to live subscribers after a
//!   mutation commits.
//!
//! Delivery is fire-and-forget: no persistence, no replay, and a receiver
//! that falls behind the channel capacity loses the oldest events.

pub mod bus;

pub use bus::{ArticleEvent, EventBus};

//! Bridges the in-process event bus to live WebSocket subscribers.

pub mod relay;

pub use relay::NotificationRelay;

//! Platform abstraction layer
//!
//! Browser glue for:
//! - Input events (scoped subscriptions, released on drop)
//! - Frame scheduling (one pending tick at a time, cancelable)

#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod frame;

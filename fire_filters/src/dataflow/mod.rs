//! Observable state primitives
//!
//! - **[`StateCell`]** - single observable value slot with synchronous subscribers
//! - **[`Subscription`]** - unsubscribe capability returned by `StateCell::subscribe`
//! - **[`Relay`]** - non-lossy channel sender behind `StateCell::stream`

pub mod relay;
pub mod state_cell;
pub mod subscription;

pub use relay::{Relay, relay};
pub use state_cell::StateCell;
pub use subscription::Subscription;

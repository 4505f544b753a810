//! Push-based reactive primitives
//!
//! Everything the table needs to propagate changes:
//!
//! - [`State`]: a value cell that replays its latest value to new
//!   subscribers and notifies them synchronously on every change.
//! - [`Subject`]: an event source without replay.
//! - [`Stream`]: a cold, composable description of a subscription, with
//!   [`combine_latest2`], [`combine_latest3`], [`merge`], [`Stream::scan`]
//!   and [`Stream::debounce`] as composition primitives.
//! - [`Subscription`]: the teardown handle returned by every subscribe call.
//!
//! Emission is synchronous: a `set` or `emit` returns only after every
//! downstream listener ran. Only [`Stream::debounce`] defers work, onto the
//! ambient Tokio runtime.

mod combine;
mod listeners;
mod state;
mod stream;
mod subject;
mod subscription;

use std::sync::Arc;

pub use combine::*;
pub use state::*;
pub use stream::*;
pub use subject::*;
pub use subscription::*;

/// Values that can travel through a stream.
pub trait Item: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Item for T {}

/// Shared callback invoked for every emitted value.
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

//! Stream runtime - single-threaded push streams
//!
//! `Stream<T>` is a recipe: every `subscribe` builds a fresh operator chain,
//! so accumulation state and debounce timers belong to one subscription.
//! `Subject<T>` is the hot source that fans values out to subscribers.
//!
//! Re-exports only. All logic in submodules.

mod clock;
mod observable;
mod operators;
mod subject;
mod subscription;
mod timers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use observable::{Sink, Stream};
pub use subject::Subject;
pub use subscription::Subscription;
pub use timers::{TimerId, Timers};

//! Reactive state primitives.
//!
//! - [`Observable`]: a shared, version-tracked value cell that notifies
//!   subscribers synchronously when its value changes.
//! - [`ReadOnly`]: a view of an observable without write access. Stores hand
//!   these out so only the owning store can mutate its fields.
//! - [`Subscription`]: guard returned by `subscribe`; dropping it (or calling
//!   [`Subscription::unsubscribe`]) removes the listener.
//! - [`Computed`]: a memoized value derived from declared observable
//!   dependencies.
//! - [`BatchScope`]: defers notifications until the outermost scope ends.
//!
//! # Architecture
//!
//! Everything is single-threaded: `Rc<RefCell<..>>` shared ownership, no
//! `Send`. Dependencies are declared explicitly when a [`Computed`] is built;
//! nothing is tracked implicitly on reads.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order, before `set` returns.
//! 3. Setting a value equal to the current value is a no-op (no version bump,
//!    no notifications).
//! 4. No borrow is held while listeners run, so a listener may read the value
//!    it is reacting to. Writing back to the same observable from its own
//!    listener is not detected; avoiding such loops is the caller's job.
//! 5. `Computed::get()` never returns a stale value, including inside a
//!    batch or from a listener on an unrelated observable.
//! 6. Inside a `BatchScope`, values update immediately and each changed
//!    observable notifies once, with its final value, when the outermost
//!    scope exits.
//! 7. A listener unsubscribed during a notification pass is not called for
//!    the rest of that pass.

pub mod batch;
pub mod computed;
pub mod observable;

pub use batch::{batch, BatchScope};
pub use computed::Computed;
pub use observable::{Observable, ReadOnly, Subscription};

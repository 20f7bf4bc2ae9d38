//! Reactive primitives.
//!
//! Everything here is push-based: an observable holds a value and a
//! registry of subscribers, and `emit` notifies them synchronously in
//! registration order. There is no batching and no dependency tracking.
//!
//! ## Types
//!
//! - [`Observable`]: the base value cell with subscribers
//! - [`State`]: an observable whose updates pass through checkers before emitting
//! - [`Derived`]: an observable computed from one or more sources
//! - [`NodeRef`]: an observable bound to one live element
//! - [`Later`]: an observable fed by a future
//! - [`Store`]: a record observable with per-field observables
//! - [`text()`]: a text template rendered into a [`Derived<String>`]
//!
//! The node tree stores observables type-erased behind [`Subscribable`].

pub mod derived;
pub mod dynamic;
pub mod later;
pub mod node_ref;
pub mod observable;
pub mod state;
pub mod store;
pub mod text;

pub use derived::Derived;
pub use dynamic::{Dynamic, IntoDynamic, ObservableKind, Subscribable, Subscription};
pub use later::{Later, LaterTask, later};
pub use node_ref::NodeRef;
pub use observable::{Observable, ObservableId, Observe, Subscriber, WeakObservable};
pub use state::{Checker, State, Updater};
pub use store::{Store, StoreField};
pub use text::text;

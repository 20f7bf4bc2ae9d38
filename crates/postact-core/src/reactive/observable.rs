//! Observable - the base reactive value
//!
//! `Observable<T>` holds a value and an ordered registry of subscribers.
//! Subscribers are keyed by the identity of their `Rc`, so subscribing the
//! same handler twice keeps a single registration in its original position.
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use postact_core::reactive::{Observable, Subscriber};
//!
//! let name = Observable::new(String::from("ada"));
//! let log: Subscriber<String> = Rc::new(|value| println!("name is now {value}"));
//! name.subscribe(log.clone());
//!
//! name.set_value(String::from("grace"));
//! name.emit();
//!
//! name.unsubscribe(&log);
//! ```

use core::cell::RefCell;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

/// A subscriber callback, invoked with the value at emit time.
pub type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Unique identifier of an observable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObservableId(u64);

impl ObservableId {
	fn next() -> Self {
		static NEXT_ID: AtomicU64 = AtomicU64::new(1);
		Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
	}

	/// Returns the raw identifier
	pub fn as_u64(self) -> u64 {
		self.0
	}
}

impl fmt::Display for ObservableId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "obs-{}", self.0)
	}
}

struct Inner<T> {
	id: ObservableId,
	value: RefCell<T>,
	subscribers: RefCell<IndexMap<usize, Subscriber<T>>>,
}

fn subscriber_key<T>(subscriber: &Subscriber<T>) -> usize {
	Rc::as_ptr(subscriber).cast::<()>() as usize
}

/// A value with an ordered set of subscribers.
///
/// Clones share the same value and registry.
pub struct Observable<T: 'static> {
	inner: Rc<Inner<T>>,
}

impl<T: 'static> Clone for Observable<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: 'static> Observable<T> {
	/// Creates an observable holding `value` with no subscribers
	pub fn new(value: T) -> Self {
		Self {
			inner: Rc::new(Inner {
				id: ObservableId::next(),
				value: RefCell::new(value),
				subscribers: RefCell::new(IndexMap::new()),
			}),
		}
	}

	/// Returns this observable's identifier
	pub fn id(&self) -> ObservableId {
		self.inner.id
	}

	/// Returns a clone of the current value
	pub fn value(&self) -> T
	where
		T: Clone,
	{
		self.inner.value.borrow().clone()
	}

	/// Runs `f` against the current value without cloning it
	pub fn with_value<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.inner.value.borrow())
	}

	/// Assigns a new value without notifying subscribers
	pub fn set_value(&self, value: T) {
		*self.inner.value.borrow_mut() = value;
	}

	/// Registers a subscriber.
	///
	/// Re-registering the identical `Rc` keeps one registration in its
	/// original position.
	pub fn subscribe(&self, subscriber: Subscriber<T>) {
		let key = subscriber_key(&subscriber);
		self.inner.subscribers.borrow_mut().insert(key, subscriber);
	}

	/// Removes a subscriber. Removing an unknown subscriber is a no-op.
	pub fn unsubscribe(&self, subscriber: &Subscriber<T>) {
		let key = subscriber_key(subscriber);
		self.inner.subscribers.borrow_mut().shift_remove(&key);
	}

	/// Removes every subscriber
	pub fn unsubscribe_all(&self) {
		self.inner.subscribers.borrow_mut().clear();
	}

	/// Returns the number of registered subscribers
	pub fn subscriber_count(&self) -> usize {
		self.inner.subscribers.borrow().len()
	}

	/// Returns true if `subscriber` is currently registered
	pub fn is_subscribed(&self, subscriber: &Subscriber<T>) -> bool {
		self.inner
			.subscribers
			.borrow()
			.contains_key(&subscriber_key(subscriber))
	}

	/// Notifies every subscriber with the current value.
	///
	/// The value is read once. Subscribers run in registration order; one
	/// removed by an earlier subscriber during this emit is skipped.
	/// Subscribers may freely read, update or re-emit this observable.
	pub fn emit(&self)
	where
		T: Clone,
	{
		let value = self.value();
		let snapshot: Vec<(usize, Subscriber<T>)> = self
			.inner
			.subscribers
			.borrow()
			.iter()
			.map(|(key, subscriber)| (*key, Rc::clone(subscriber)))
			.collect();

		for (key, subscriber) in snapshot {
			if !self.inner.subscribers.borrow().contains_key(&key) {
				continue;
			}
			subscriber(&value);
		}
	}

	/// Creates a weak handle that does not keep the value alive
	pub fn downgrade(&self) -> WeakObservable<T> {
		WeakObservable {
			inner: Rc::downgrade(&self.inner),
		}
	}

	/// Returns true if both handles point to the same observable
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Observable<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Observable")
			.field("id", &self.inner.id)
			.field("value", &*self.inner.value.borrow())
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}

/// Weak counterpart of [`Observable`]
pub struct WeakObservable<T: 'static> {
	inner: Weak<Inner<T>>,
}

impl<T: 'static> Clone for WeakObservable<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Weak::clone(&self.inner),
		}
	}
}

impl<T: 'static> WeakObservable<T> {
	/// Upgrades to a strong handle if the observable is still alive
	pub fn upgrade(&self) -> Option<Observable<T>> {
		self.inner.upgrade().map(|inner| Observable { inner })
	}
}

/// Typed access shared by every observable flavour.
///
/// Implementors only expose their underlying [`Observable`]; the rest is
/// provided.
pub trait Observe {
	/// The value type carried by this observable
	type Value: 'static;

	/// Returns the underlying observable
	fn observable(&self) -> &Observable<Self::Value>;

	/// Returns a clone of the current value
	fn value(&self) -> Self::Value
	where
		Self::Value: Clone,
	{
		self.observable().value()
	}

	/// Registers a subscriber
	fn subscribe(&self, subscriber: Subscriber<Self::Value>) {
		self.observable().subscribe(subscriber);
	}

	/// Removes a subscriber
	fn unsubscribe(&self, subscriber: &Subscriber<Self::Value>) {
		self.observable().unsubscribe(subscriber);
	}

	/// Notifies subscribers with the current value
	fn emit(&self)
	where
		Self::Value: Clone,
	{
		self.observable().emit();
	}
}

impl<T: 'static> Observe for Observable<T> {
	type Value = T;

	fn observable(&self) -> &Observable<T> {
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;

	fn recorder(log: &Rc<RefCell<Vec<String>>>, label: &'static str) -> Subscriber<i32> {
		let log = Rc::clone(log);
		Rc::new(move |value: &i32| log.borrow_mut().push(format!("{label}:{value}")))
	}

	#[fixture]
	fn log() -> Rc<RefCell<Vec<String>>> {
		Rc::new(RefCell::new(Vec::new()))
	}

	#[rstest]
	fn test_emit_notifies_in_registration_order(log: Rc<RefCell<Vec<String>>>) {
		// Arrange
		let observable = Observable::new(1);
		observable.subscribe(recorder(&log, "a"));
		observable.subscribe(recorder(&log, "b"));

		// Act
		observable.emit();

		// Assert
		assert_eq!(*log.borrow(), vec!["a:1", "b:1"]);
	}

	#[rstest]
	fn test_resubscribe_keeps_single_registration(log: Rc<RefCell<Vec<String>>>) {
		// Arrange
		let observable = Observable::new(5);
		let a = recorder(&log, "a");
		observable.subscribe(a.clone());
		observable.subscribe(recorder(&log, "b"));

		// Act
		observable.subscribe(a.clone());
		observable.emit();

		// Assert
		assert_eq!(observable.subscriber_count(), 2);
		assert_eq!(*log.borrow(), vec!["a:5", "b:5"]);
	}

	#[rstest]
	fn test_unsubscribe_is_idempotent() {
		// Arrange
		let observable = Observable::new(0);
		let subscriber: Subscriber<i32> = Rc::new(|_| {});
		observable.subscribe(subscriber.clone());

		// Act
		observable.unsubscribe(&subscriber);
		observable.unsubscribe(&subscriber);

		// Assert
		assert_eq!(observable.subscriber_count(), 0);
	}

	#[rstest]
	fn test_set_value_does_not_emit(log: Rc<RefCell<Vec<String>>>) {
		// Arrange
		let observable = Observable::new(0);
		observable.subscribe(recorder(&log, "a"));

		// Act
		observable.set_value(9);

		// Assert
		assert!(log.borrow().is_empty());
		assert_eq!(observable.value(), 9);
	}

	#[rstest]
	fn test_subscriber_removed_mid_emit_is_skipped(log: Rc<RefCell<Vec<String>>>) {
		// Arrange
		let observable = Observable::new(3);
		let second = recorder(&log, "second");
		let remover: Subscriber<i32> = {
			let observable = observable.clone();
			let second = second.clone();
			let log = Rc::clone(&log);
			Rc::new(move |_| {
				log.borrow_mut().push("first".to_string());
				observable.unsubscribe(&second);
			})
		};
		observable.subscribe(remover);
		observable.subscribe(second);

		// Act
		observable.emit();

		// Assert
		assert_eq!(*log.borrow(), vec!["first"]);
	}

	#[rstest]
	fn test_reentrant_emit_from_subscriber(log: Rc<RefCell<Vec<String>>>) {
		// Arrange
		let observable = Observable::new(0);
		let bump: Subscriber<i32> = {
			let observable = observable.clone();
			Rc::new(move |value: &i32| {
				if *value < 2 {
					observable.set_value(value + 1);
					observable.emit();
				}
			})
		};
		observable.subscribe(bump);
		observable.subscribe(recorder(&log, "r"));

		// Act
		observable.emit();

		// Assert
		assert_eq!(*log.borrow(), vec!["r:2", "r:1", "r:0"]);
	}

	#[rstest]
	fn test_weak_handle_upgrades_while_alive() {
		// Arrange
		let observable = Observable::new("x");
		let weak = observable.downgrade();

		// Act
		let upgraded = weak.upgrade();
		drop(observable);
		drop(upgraded);

		// Assert
		assert!(weak.upgrade().is_none());
	}

	#[rstest]
	fn test_identifiers_are_unique() {
		let a = Observable::new(());
		let b = Observable::new(());
		assert_ne!(a.id(), b.id());
		assert!(a.ptr_eq(&a.clone()));
	}
}

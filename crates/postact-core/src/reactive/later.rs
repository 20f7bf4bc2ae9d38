//! Later - an observable fed by a future
//!
//! [`later`] turns a fallible future into a [`Later<T>`] that holds `None`
//! until the future resolves, plus a [`LaterTask`] the caller drives on its
//! own executor. Resolution assigns `Some(value)` and emits exactly once.
//! A failure is handed to the `catch` handler when one is registered and
//! otherwise discarded.
//!
//! ## Example
//!
//! ```ignore
//! use postact_core::reactive::later;
//!
//! let (user, task) = later(async { fetch_user().await });
//! let user = user.catch(|error| tracing::warn!("fetch failed: {error}"));
//! spawn_local(task);
//! ```

use core::cell::{Cell, RefCell};
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use std::rc::Rc;

use super::observable::{Observable, Observe};
use crate::debug_log;

/// The future that settles a [`Later`]; poll it to completion on any executor
pub type LaterTask = Pin<Box<dyn Future<Output = ()>>>;

type CatchHandler = Rc<dyn Fn(&anyhow::Error)>;
type FinallyHandler = Rc<dyn Fn()>;

#[derive(Default)]
struct Hooks {
	ok: Cell<bool>,
	settled: Cell<bool>,
	catch: RefCell<Option<CatchHandler>>,
	finally: RefCell<Option<FinallyHandler>>,
}

/// A pending asynchronous value.
pub struct Later<T: 'static> {
	observable: Observable<Option<T>>,
	hooks: Rc<Hooks>,
}

impl<T: 'static> Clone for Later<T> {
	fn clone(&self) -> Self {
		Self {
			observable: self.observable.clone(),
			hooks: Rc::clone(&self.hooks),
		}
	}
}

/// Wraps `future` as a [`Later`] and the task that settles it
pub fn later<T, E, F>(future: F) -> (Later<T>, LaterTask)
where
	T: Clone + 'static,
	E: Into<anyhow::Error>,
	F: Future<Output = Result<T, E>> + 'static,
{
	let pending = Later::pending();
	let handle = pending.clone();
	let task = Box::pin(async move {
		match future.await {
			Ok(value) => handle.resolve(value),
			Err(error) => handle.reject(error.into()),
		}
	});
	(pending, task)
}

impl<T: 'static> Later<T> {
	/// Creates an unsettled value with no driving future
	pub fn pending() -> Self {
		Self {
			observable: Observable::new(None),
			hooks: Rc::new(Hooks::default()),
		}
	}

	/// Registers the failure handler
	pub fn catch(self, handler: impl Fn(&anyhow::Error) + 'static) -> Self {
		*self.hooks.catch.borrow_mut() = Some(Rc::new(handler));
		self
	}

	/// Registers a hook that runs after either outcome
	pub fn finally(self, handler: impl Fn() + 'static) -> Self {
		*self.hooks.finally.borrow_mut() = Some(Rc::new(handler));
		self
	}

	/// Returns true once the value resolved successfully
	pub fn is_ok(&self) -> bool {
		self.hooks.ok.get()
	}

	/// Returns true once the value resolved or failed
	pub fn is_settled(&self) -> bool {
		self.hooks.settled.get()
	}

	/// Returns the number of registered subscribers
	pub fn subscriber_count(&self) -> usize {
		self.observable.subscriber_count()
	}

	/// Routes a failure to the catch handler, or discards it
	pub fn reject(&self, error: anyhow::Error) {
		if self.hooks.settled.replace(true) {
			return;
		}
		let handler = self.hooks.catch.borrow().clone();
		match handler {
			Some(handler) => handler(&error),
			None => debug_log!("discarding unhandled asynchronous error: {error:#}"),
		}
		self.run_finally();
	}

	fn run_finally(&self) {
		let handler = self.hooks.finally.borrow().clone();
		if let Some(handler) = handler {
			handler();
		}
	}
}

impl<T: Clone + 'static> Later<T> {
	/// Assigns the resolved value and emits. Only the first settlement counts.
	pub fn resolve(&self, value: T) {
		if self.hooks.settled.replace(true) {
			return;
		}
		self.hooks.ok.set(true);
		self.observable.set_value(Some(value));
		self.observable.emit();
		self.run_finally();
	}
}

impl<T: 'static> Observe for Later<T> {
	type Value = Option<T>;

	fn observable(&self) -> &Observable<Option<T>> {
		&self.observable
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Later<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Later")
			.field("observable", &self.observable)
			.field("ok", &self.is_ok())
			.field("settled", &self.is_settled())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::Subscriber;
	use futures::executor::block_on;
	use rstest::*;

	#[rstest]
	fn test_resolution_emits_once() {
		// Arrange
		let (value, task) = later(async { Ok::<_, anyhow::Error>(42) });
		let seen = Rc::new(RefCell::new(Vec::new()));
		let subscriber: Subscriber<Option<i32>> = {
			let seen = Rc::clone(&seen);
			Rc::new(move |value: &Option<i32>| seen.borrow_mut().push(*value))
		};
		value.subscribe(subscriber);

		// Act
		block_on(task);
		value.resolve(7);

		// Assert
		assert_eq!(*seen.borrow(), vec![Some(42)]);
		assert!(value.is_ok());
		assert_eq!(value.value(), Some(42));
	}

	#[rstest]
	fn test_failure_goes_to_catch_handler() {
		// Arrange
		let caught = Rc::new(RefCell::new(None));
		let (value, task) = later(async { Err::<i32, _>(anyhow::anyhow!("offline")) });
		let value = {
			let caught = Rc::clone(&caught);
			value.catch(move |error| *caught.borrow_mut() = Some(error.to_string()))
		};

		// Act
		block_on(task);

		// Assert
		assert_eq!(caught.borrow().as_deref(), Some("offline"));
		assert!(!value.is_ok());
		assert!(value.is_settled());
		assert_eq!(value.value(), None);
	}

	#[rstest]
	#[case::resolved(true)]
	#[case::rejected(false)]
	fn test_finally_runs_after_either_outcome(#[case] succeed: bool) {
		// Arrange
		let ran = Rc::new(Cell::new(false));
		let value = {
			let ran = Rc::clone(&ran);
			Later::<u8>::pending().finally(move || ran.set(true))
		};

		// Act
		if succeed {
			value.resolve(1);
		} else {
			value.reject(anyhow::anyhow!("nope"));
		}

		// Assert
		assert!(ran.get());
	}

	#[rstest]
	fn test_unhandled_failure_is_discarded() {
		// Arrange
		let value = Later::<String>::pending();

		// Act
		value.reject(anyhow::anyhow!("ignored"));

		// Assert
		assert!(value.is_settled());
		assert_eq!(value.value(), None);
	}
}

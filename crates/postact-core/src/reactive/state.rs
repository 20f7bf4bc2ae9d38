//! State - an observable guarded by checkers
//!
//! `State<T>` is the observable user code normally mutates. `update` runs
//! the candidate value through every registered checker and only assigns
//! and emits when all of them accept it. `set` assigns without checks and
//! without notifying anyone.
//!
//! ## Example
//!
//! ```ignore
//! use postact_core::reactive::{Observe, State};
//!
//! let count = State::new(0).with_checker(|_, candidate| *candidate >= 0);
//!
//! assert!(count.update(3));
//! assert!(!count.update(-1));
//! assert_eq!(count.value(), 3);
//!
//! count.update_with(|n| n + 1);
//! ```

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use super::observable::{Observable, Observe};

/// A predicate over `(current, candidate)`; returning false rejects the update.
pub type Checker<T> = Rc<dyn Fn(&T, &T) -> bool>;

/// Either a replacement value or a function of the current value
pub enum Updater<T> {
	/// Replace the value outright
	Value(T),
	/// Compute the replacement from the current value
	Dispatch(Box<dyn FnOnce(&T) -> T>),
}

impl<T> From<T> for Updater<T> {
	fn from(value: T) -> Self {
		Updater::Value(value)
	}
}

impl<T: 'static> Updater<T> {
	/// The replacement value given the current contents of `observable`
	pub(crate) fn resolve(self, observable: &Observable<T>) -> T {
		match self {
			Updater::Value(value) => value,
			Updater::Dispatch(dispatch) => observable.with_value(|current| dispatch(current)),
		}
	}
}

impl<T> fmt::Debug for Updater<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Updater::Value(_) => f.write_str("Updater::Value"),
			Updater::Dispatch(_) => f.write_str("Updater::Dispatch"),
		}
	}
}

/// An observable whose updates pass through checkers.
///
/// Clones share the value, the subscribers and the checker list.
pub struct State<T: 'static> {
	observable: Observable<T>,
	checkers: Rc<RefCell<Vec<Checker<T>>>>,
}

impl<T: 'static> Clone for State<T> {
	fn clone(&self) -> Self {
		Self {
			observable: self.observable.clone(),
			checkers: Rc::clone(&self.checkers),
		}
	}
}

impl<T: 'static> State<T> {
	/// Creates a state holding `value` with no checkers
	pub fn new(value: T) -> Self {
		Self {
			observable: Observable::new(value),
			checkers: Rc::new(RefCell::new(Vec::new())),
		}
	}

	/// Appends a checker and returns the state
	pub fn with_checker(self, checker: impl Fn(&T, &T) -> bool + 'static) -> Self {
		self.add_checker(Rc::new(checker));
		self
	}

	/// Appends several checkers in order
	pub fn with_checkers(self, checkers: impl IntoIterator<Item = Checker<T>>) -> Self {
		self.checkers.borrow_mut().extend(checkers);
		self
	}

	/// Appends a checker to a state that is already shared
	pub fn add_checker(&self, checker: Checker<T>) {
		self.checkers.borrow_mut().push(checker);
	}

	/// Returns the number of registered checkers
	pub fn checker_count(&self) -> usize {
		self.checkers.borrow().len()
	}

	/// Assigns the value without running checkers or emitting
	pub fn set(&self, updater: impl Into<Updater<T>>) {
		let value = updater.into().resolve(&self.observable);
		self.observable.set_value(value);
	}

	/// Like [`State::set`] with the next value computed from the current one
	pub fn set_with(&self, dispatch: impl FnOnce(&T) -> T + 'static) {
		self.set(Updater::Dispatch(Box::new(dispatch)));
	}
}

impl<T: Clone + 'static> State<T> {
	/// Checks, assigns and emits.
	///
	/// Checkers run in registration order against `(current, candidate)`;
	/// the first rejection drops the update. Returns true when the update
	/// was applied.
	pub fn update(&self, updater: impl Into<Updater<T>>) -> bool {
		let candidate = updater.into().resolve(&self.observable);
		let checkers = self.checkers.borrow().clone();
		let accepted = self
			.observable
			.with_value(|current| checkers.iter().all(|checker| checker(current, &candidate)));
		if !accepted {
			return false;
		}

		self.observable.set_value(candidate);
		self.observable.emit();
		true
	}

	/// Like [`State::update`] with the candidate computed from the current value
	pub fn update_with(&self, dispatch: impl FnOnce(&T) -> T + 'static) -> bool {
		self.update(Updater::Dispatch(Box::new(dispatch)))
	}
}

impl State<bool> {
	/// Updates to the negation of the current value
	pub fn flip(&self) -> bool {
		self.update_with(|value| !value)
	}
}

impl State<String> {
	/// Updates to the current value with `slice` appended
	pub fn push(&self, slice: &str) -> bool {
		let slice = slice.to_owned();
		self.update_with(move |value| format!("{value}{slice}"))
	}
}

impl<T: 'static> Observe for State<T> {
	type Value = T;

	fn observable(&self) -> &Observable<T> {
		&self.observable
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for State<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("State")
			.field("observable", &self.observable)
			.field("checkers", &self.checker_count())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::Subscriber;
	use rstest::*;

	fn counting(state: &State<i32>) -> Rc<RefCell<usize>> {
		let hits = Rc::new(RefCell::new(0));
		let subscriber: Subscriber<i32> = {
			let hits = Rc::clone(&hits);
			Rc::new(move |_| *hits.borrow_mut() += 1)
		};
		state.subscribe(subscriber);
		hits
	}

	#[rstest]
	fn test_update_assigns_and_emits() {
		// Arrange
		let state = State::new(1);
		let hits = counting(&state);

		// Act
		let applied = state.update(2);

		// Assert
		assert!(applied);
		assert_eq!(state.value(), 2);
		assert_eq!(*hits.borrow(), 1);
	}

	#[rstest]
	fn test_rejected_update_is_silent() {
		// Arrange
		let state = State::new(10).with_checker(|current, candidate| candidate > current);
		let hits = counting(&state);

		// Act
		let applied = state.update(5);

		// Assert
		assert!(!applied);
		assert_eq!(state.value(), 10);
		assert_eq!(*hits.borrow(), 0);
	}

	#[rstest]
	fn test_checkers_run_in_order_and_short_circuit() {
		// Arrange
		let calls = Rc::new(RefCell::new(Vec::new()));
		let first: Checker<i32> = {
			let calls = Rc::clone(&calls);
			Rc::new(move |_: &i32, _: &i32| {
				calls.borrow_mut().push("first");
				false
			})
		};
		let second: Checker<i32> = {
			let calls = Rc::clone(&calls);
			Rc::new(move |_: &i32, _: &i32| {
				calls.borrow_mut().push("second");
				true
			})
		};
		let state = State::new(0).with_checkers([first, second]);

		// Act
		state.update(1);

		// Assert
		assert_eq!(*calls.borrow(), vec!["first"]);
	}

	#[rstest]
	fn test_update_with_dispatch() {
		// Arrange
		let state = State::new(4);

		// Act
		state.update_with(|n| n * 2);

		// Assert
		assert_eq!(state.value(), 8);
	}

	#[rstest]
	fn test_set_bypasses_checkers_and_does_not_emit() {
		// Arrange
		let state = State::new(1).with_checker(|_, _| false);
		let hits = counting(&state);

		// Act
		state.set(7);
		state.set_with(|n| n + 1);

		// Assert
		assert_eq!(state.value(), 8);
		assert_eq!(*hits.borrow(), 0);
	}

	#[rstest]
	fn test_clones_share_checkers() {
		// Arrange
		let state = State::new(0);
		let clone = state.clone();

		// Act
		clone.add_checker(Rc::new(|_: &i32, candidate: &i32| *candidate < 3));

		// Assert
		assert!(!state.update(5));
		assert_eq!(state.checker_count(), 1);
	}

	#[rstest]
	fn test_flip_negates_and_emits() {
		// Arrange
		let open = State::new(false);
		let hits = Rc::new(RefCell::new(0));
		open.subscribe({
			let hits = Rc::clone(&hits);
			Rc::new(move |_: &bool| *hits.borrow_mut() += 1)
		});

		// Act
		open.flip();
		open.flip();
		open.flip();

		// Assert
		assert!(open.value());
		assert_eq!(*hits.borrow(), 3);
	}

	#[rstest]
	fn test_push_appends_slice() {
		// Arrange
		let log = State::new(String::from("a"));

		// Act
		log.push("b");
		let applied = log.push("cd");

		// Assert
		assert!(applied);
		assert_eq!(log.value(), "abcd");
	}

	#[rstest]
	fn test_push_respects_checkers() {
		// Arrange
		let name = State::new(String::from("ab")).with_checker(|_, candidate: &String| candidate.len() <= 3);

		// Act
		let first = name.push("c");
		let second = name.push("d");

		// Assert
		assert!(first);
		assert!(!second);
		assert_eq!(name.value(), "abc");
	}
}

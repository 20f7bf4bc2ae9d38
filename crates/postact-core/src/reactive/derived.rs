//! Derived - observables computed from other observables
//!
//! A `Derived<R>` memoizes the result of a generator over one or more
//! sources. Whenever a source emits, the generator runs again and the
//! derived observable emits the new result. Between emissions the memoized
//! value is returned without recomputation.
//!
//! Sources hold only a weak handle to the derived value, so dropping every
//! `Derived` clone leaves inert subscribers behind rather than a cycle.
//!
//! ## Example
//!
//! ```ignore
//! use postact_core::reactive::{Derived, Observe, State};
//!
//! let first = State::new(String::from("Ada"));
//! let last = State::new(String::from("Lovelace"));
//! let full = Derived::combine2(&first, &last, |a, b| format!("{a} {b}"));
//!
//! last.update(String::from("Byron"));
//! assert_eq!(full.value(), "Ada Byron");
//! ```

use core::fmt;
use std::rc::Rc;

use super::dynamic::Dynamic;
use super::observable::{Observable, Observe, Subscriber};
use crate::argument::Argument;

/// An observable whose value is generated from other observables.
pub struct Derived<R: 'static> {
	observable: Observable<R>,
}

impl<R: 'static> Clone for Derived<R> {
	fn clone(&self) -> Self {
		Self {
			observable: self.observable.clone(),
		}
	}
}

impl<R: Clone + 'static> Derived<R> {
	/// Derives from a single source, computing the initial value immediately
	pub fn new<S>(source: &S, generate: impl Fn(&S::Value) -> R + 'static) -> Self
	where
		S: Observe,
	{
		let initial = source.observable().with_value(&generate);
		Self::attach(source, initial, generate)
	}

	/// Derives from a single source with an explicit initial value.
	///
	/// The generator first runs on the source's next emission.
	pub fn with_initial<S>(source: &S, initial: R, generate: impl Fn(&S::Value) -> R + 'static) -> Self
	where
		S: Observe,
	{
		Self::attach(source, initial, generate)
	}

	fn attach<S>(source: &S, initial: R, generate: impl Fn(&S::Value) -> R + 'static) -> Self
	where
		S: Observe,
	{
		let observable = Observable::new(initial);
		let target = observable.downgrade();
		let subscriber: Subscriber<S::Value> = Rc::new(move |value: &S::Value| {
			if let Some(target) = target.upgrade() {
				target.set_value(generate(value));
				target.emit();
			}
		});
		source.subscribe(subscriber);
		Self { observable }
	}

	/// Derives from two sources of possibly different types
	pub fn combine2<A, B>(
		first: &A,
		second: &B,
		generate: impl Fn(&A::Value, &B::Value) -> R + 'static,
	) -> Self
	where
		A: Observe,
		B: Observe,
	{
		let generate = Rc::new(generate);
		let initial = first
			.observable()
			.with_value(|a| second.observable().with_value(|b| generate(a, b)));
		let observable = Observable::new(initial);

		let on_first: Subscriber<A::Value> = {
			let target = observable.downgrade();
			let other = second.observable().downgrade();
			let generate = Rc::clone(&generate);
			Rc::new(move |a: &A::Value| {
				if let (Some(target), Some(other)) = (target.upgrade(), other.upgrade()) {
					target.set_value(other.with_value(|b| generate(a, b)));
					target.emit();
				}
			})
		};
		let on_second: Subscriber<B::Value> = {
			let target = observable.downgrade();
			let other = first.observable().downgrade();
			Rc::new(move |b: &B::Value| {
				if let (Some(target), Some(other)) = (target.upgrade(), other.upgrade()) {
					target.set_value(other.with_value(|a| generate(a, b)));
					target.emit();
				}
			})
		};
		first.subscribe(on_first);
		second.subscribe(on_second);

		Self { observable }
	}

	/// Derives from a list of sources sharing one value type.
	///
	/// The generator receives the current values of all sources in order.
	pub fn from_all<S>(sources: &[S], generate: impl Fn(&[S::Value]) -> R + 'static) -> Self
	where
		S: Observe,
		S::Value: Clone,
	{
		let handles: Rc<Vec<_>> = Rc::new(
			sources
				.iter()
				.map(|source| source.observable().downgrade())
				.collect(),
		);
		let generate = Rc::new(generate);
		let snapshot = sources.iter().map(Observe::value).collect::<Vec<_>>();
		let observable = Observable::new(generate(&snapshot));

		for source in sources {
			let target = observable.downgrade();
			let handles = Rc::clone(&handles);
			let generate = Rc::clone(&generate);
			let subscriber: Subscriber<S::Value> = Rc::new(move |_: &S::Value| {
				let Some(target) = target.upgrade() else {
					return;
				};
				let values: Option<Vec<S::Value>> = handles
					.iter()
					.map(|handle| handle.upgrade().map(|source| source.value()))
					.collect();
				if let Some(values) = values {
					target.set_value(generate(&values));
					target.emit();
				}
			});
			source.subscribe(subscriber);
		}

		Self { observable }
	}

	/// Derives from type-erased sources.
	///
	/// `generate` reads whatever it needs when any source emits; the
	/// emitted values themselves are ignored.
	pub fn from_dynamic(sources: &[Dynamic], generate: impl Fn() -> R + 'static) -> Self {
		let generate = Rc::new(generate);
		let observable = Observable::new(generate());
		for source in sources {
			let target = observable.downgrade();
			let generate = Rc::clone(&generate);
			// The registration lives as long as the source does.
			let _ = source.watch(Rc::new(move |_: Argument| {
				if let Some(target) = target.upgrade() {
					target.set_value(generate());
					target.emit();
				}
			}));
		}
		Self { observable }
	}

	/// Returns the number of registered subscribers
	pub fn subscriber_count(&self) -> usize {
		self.observable.subscriber_count()
	}
}

impl<R: 'static> Observe for Derived<R> {
	type Value = R;

	fn observable(&self) -> &Observable<R> {
		&self.observable
	}
}

impl<R: fmt::Debug + 'static> fmt::Debug for Derived<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Derived")
			.field("observable", &self.observable)
			.finish()
	}
}

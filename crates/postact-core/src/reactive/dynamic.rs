//! Type-erased observables.
//!
//! Node descriptors can hold observables of any value type, so the tree
//! stores them as [`Dynamic`] handles. The erased view reports values as
//! [`Argument`]s, which is all the classifier and the realization engine
//! need.

use core::fmt;
use std::rc::Rc;

use super::derived::Derived;
use super::later::Later;
use super::observable::{Observable, ObservableId, Subscriber};
use super::state::State;
use super::store::{Store, StoreField};
use crate::argument::Argument;

/// Discriminant of the concrete observable behind a [`Dynamic`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservableKind {
	/// A bare [`Observable`]
	Plain,
	/// A [`State`]
	State,
	/// A [`Derived`]
	Derived,
	/// A [`super::NodeRef`]
	Ref,
	/// A [`Later`]
	Later,
	/// A [`Store`] or one of its [`StoreField`]s
	Store,
}

/// Object-safe view of an observable.
pub trait Subscribable {
	/// Identifier of the underlying observable
	fn id(&self) -> ObservableId;

	/// Which observable flavour this is
	fn kind(&self) -> ObservableKind;

	/// The current value as an argument
	fn current(&self) -> Argument;

	/// Subscribes `callback`, which receives each emitted value as an argument
	fn watch(&self, callback: Rc<dyn Fn(Argument)>) -> Subscription;

	/// Drops every subscriber of the underlying observable
	fn unsubscribe_all(&self);

	/// Number of subscribers on the underlying observable
	fn subscriber_count(&self) -> usize;
}

/// Shared handle to a type-erased observable
pub type Dynamic = Rc<dyn Subscribable>;

impl fmt::Debug for dyn Subscribable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Dynamic")
			.field("id", &self.id())
			.field("kind", &self.kind())
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}

/// A registration made through [`Subscribable::watch`].
///
/// Dropping a subscription does not unsubscribe; call
/// [`Subscription::cancel`].
pub struct Subscription {
	cancel: Box<dyn FnOnce()>,
}

impl Subscription {
	pub(crate) fn new(cancel: impl FnOnce() + 'static) -> Self {
		Self {
			cancel: Box::new(cancel),
		}
	}

	/// Removes the registration
	pub fn cancel(self) {
		(self.cancel)();
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription").finish_non_exhaustive()
	}
}

/// Subscribes an argument-producing adapter to `observable`.
pub(crate) fn watch_observable<T>(
	observable: &Observable<T>,
	project: impl Fn(&T) -> Argument + 'static,
	callback: Rc<dyn Fn(Argument)>,
) -> Subscription
where
	T: 'static,
{
	let subscriber: Subscriber<T> = Rc::new(move |value: &T| callback(project(value)));
	observable.subscribe(Rc::clone(&subscriber));
	let weak = observable.downgrade();
	Subscription::new(move || {
		if let Some(observable) = weak.upgrade() {
			observable.unsubscribe(&subscriber);
		}
	})
}

macro_rules! impl_subscribable {
	($ty:ident, $kind:expr, $value:ty) => {
		impl<T> Subscribable for $ty<T>
		where
			T: Clone + Into<Argument> + 'static,
		{
			fn id(&self) -> ObservableId {
				$crate::reactive::Observe::observable(self).id()
			}

			fn kind(&self) -> ObservableKind {
				$kind
			}

			fn current(&self) -> Argument {
				$crate::reactive::Observe::observable(self).value().into()
			}

			fn watch(&self, callback: Rc<dyn Fn(Argument)>) -> Subscription {
				watch_observable(
					$crate::reactive::Observe::observable(self),
					|value: &$value| value.clone().into(),
					callback,
				)
			}

			fn unsubscribe_all(&self) {
				$crate::reactive::Observe::observable(self).unsubscribe_all();
			}

			fn subscriber_count(&self) -> usize {
				$crate::reactive::Observe::observable(self).subscriber_count()
			}
		}
	};
}

impl_subscribable!(Observable, ObservableKind::Plain, T);
impl_subscribable!(State, ObservableKind::State, T);
impl_subscribable!(Derived, ObservableKind::Derived, T);
impl_subscribable!(Later, ObservableKind::Later, Option<T>);
impl_subscribable!(Store, ObservableKind::Store, T);
impl_subscribable!(StoreField, ObservableKind::Store, T);

/// Conversion into a type-erased observable handle
pub trait IntoDynamic {
	/// Wraps `self` as a [`Dynamic`]
	fn into_dynamic(self) -> Dynamic;
}

impl<S: Subscribable + 'static> IntoDynamic for S {
	fn into_dynamic(self) -> Dynamic {
		Rc::new(self)
	}
}

impl IntoDynamic for Dynamic {
	fn into_dynamic(self) -> Dynamic {
		self
	}
}

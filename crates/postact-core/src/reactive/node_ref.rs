//! NodeRef - an observable bound to one realized element
//!
//! A `NodeRef` starts out empty. When the element carrying it as an
//! attribute is realized, the ref is attached and emits; when that element
//! is killed the ref is cleared, emits once more and then drops all of its
//! subscribers.
//!
//! ## Example
//!
//! ```ignore
//! use postact_core::reactive::NodeRef;
//! use postact_pages::html;
//!
//! let input = NodeRef::new();
//! let node = html!("<input ref=" {&input} " />")?;
//! ```

use core::fmt;
use std::rc::Rc;

use super::dynamic::{ObservableKind, Subscribable, Subscription, watch_observable};
use super::observable::{Observable, ObservableId, Observe};
use crate::argument::Argument;
use crate::dom::DomNode;

/// An observable holding the live element it is attached to, if any.
#[derive(Clone)]
pub struct NodeRef {
	observable: Observable<Option<DomNode>>,
}

impl NodeRef {
	/// Creates an unattached ref
	pub fn new() -> Self {
		Self {
			observable: Observable::new(None),
		}
	}

	/// Returns the attached element
	pub fn get(&self) -> Option<DomNode> {
		self.observable.value()
	}

	/// Returns true while an element is attached
	pub fn is_attached(&self) -> bool {
		self.observable.with_value(Option::is_some)
	}

	/// Attaches `element` and notifies subscribers
	pub fn attach(&self, element: DomNode) {
		self.observable.set_value(Some(element));
		self.observable.emit();
	}

	/// Clears the ref, notifies subscribers with `None`, then drops them all
	pub fn kill(&self) {
		self.observable.set_value(None);
		self.observable.emit();
		self.observable.unsubscribe_all();
	}

	/// Returns true if both handles are the same ref
	pub fn ptr_eq(&self, other: &Self) -> bool {
		self.observable.ptr_eq(&other.observable)
	}

	/// Returns the number of registered subscribers
	pub fn subscriber_count(&self) -> usize {
		self.observable.subscriber_count()
	}
}

impl Default for NodeRef {
	fn default() -> Self {
		Self::new()
	}
}

impl Observe for NodeRef {
	type Value = Option<DomNode>;

	fn observable(&self) -> &Observable<Option<DomNode>> {
		&self.observable
	}
}

// A ref placed in a child position renders nothing.
impl Subscribable for NodeRef {
	fn id(&self) -> ObservableId {
		self.observable.id()
	}

	fn kind(&self) -> ObservableKind {
		ObservableKind::Ref
	}

	fn current(&self) -> Argument {
		Argument::Empty
	}

	fn watch(&self, callback: Rc<dyn Fn(Argument)>) -> Subscription {
		watch_observable(&self.observable, |_| Argument::Empty, callback)
	}

	fn unsubscribe_all(&self) {
		self.observable.unsubscribe_all();
	}

	fn subscriber_count(&self) -> usize {
		self.observable.subscriber_count()
	}
}

impl fmt::Debug for NodeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NodeRef")
			.field("id", &self.observable.id())
			.field("attached", &self.is_attached())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::Document;
	use crate::reactive::Subscriber;
	use core::cell::RefCell;
	use rstest::*;

	#[rstest]
	fn test_attach_then_kill_sequence() {
		// Arrange
		let document = Document::new();
		let element = document.create_element("input");
		let node_ref = NodeRef::new();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let subscriber: Subscriber<Option<DomNode>> = {
			let seen = Rc::clone(&seen);
			Rc::new(move |value: &Option<DomNode>| seen.borrow_mut().push(value.is_some()))
		};
		node_ref.subscribe(subscriber);

		// Act
		node_ref.attach(element.clone());
		let attached = node_ref.get();
		node_ref.kill();

		// Assert
		assert_eq!(attached, Some(element));
		assert_eq!(*seen.borrow(), vec![true, false]);
		assert_eq!(NodeRef::subscriber_count(&node_ref), 0);
		assert!(!node_ref.is_attached());
	}

	#[rstest]
	fn test_kill_on_unattached_ref_is_harmless() {
		// Arrange
		let node_ref = NodeRef::default();

		// Act
		node_ref.kill();

		// Assert
		assert!(node_ref.get().is_none());
	}
}

//! Teardown records for realized trees.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use postact_core::{DomNode, Dynamic, Listener, NodeRef};

/// What realization attached to the page for one node.
///
/// The record mirrors the realized tree. Killing it releases every
/// subscription and listener the subtree holds; it does not remove nodes
/// from the page, which is the caller's splice to make.
#[derive(Default)]
#[must_use = "killing the record is the only way to release its subscriptions"]
pub struct Mounted {
	pub(crate) element: Option<DomNode>,
	pub(crate) driving: Option<Dynamic>,
	pub(crate) refs: Vec<NodeRef>,
	pub(crate) observables: Vec<Dynamic>,
	pub(crate) listeners: Vec<Listener>,
	pub(crate) children: Rc<RefCell<Vec<Mounted>>>,
}

impl Mounted {
	pub(crate) fn for_element(element: DomNode) -> Self {
		Self {
			element: Some(element),
			..Self::default()
		}
	}

	pub(crate) fn push_child(&self, child: Mounted) {
		self.children.borrow_mut().push(child);
	}

	/// The live element, for element nodes
	pub fn element(&self) -> Option<&DomNode> {
		self.element.as_ref()
	}

	/// Number of direct child records
	pub fn child_count(&self) -> usize {
		self.children.borrow().len()
	}

	/// Releases the subtree.
	///
	/// Every subscriber of the driving and attribute observables is dropped,
	/// not only the ones realization added.
	pub fn kill(self) {
		if let Some(driving) = &self.driving {
			driving.unsubscribe_all();
		}
		for node_ref in &self.refs {
			node_ref.kill();
		}
		for observable in &self.observables {
			observable.unsubscribe_all();
		}
		if let Some(element) = &self.element {
			for listener in &self.listeners {
				element.remove_event_listener(listener.event(), listener.handler());
			}
		}

		let children = core::mem::take(&mut *self.children.borrow_mut());
		for child in children {
			child.kill();
		}
	}
}

impl fmt::Debug for Mounted {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Mounted")
			.field("element", &self.element)
			.field("driven", &self.driving.is_some())
			.field("refs", &self.refs.len())
			.field("observables", &self.observables.len())
			.field("listeners", &self.listeners.len())
			.field("children", &self.child_count())
			.finish()
	}
}

//! Events and event handlers.

use core::cell::Cell;
use core::fmt;
use std::rc::Rc;

use super::DomNode;

/// An event dispatched through the page.
pub struct Event {
	event_type: String,
	target: DomNode,
	default_prevented: Cell<bool>,
	propagation_stopped: Cell<bool>,
}

impl Event {
	pub(crate) fn new(event_type: impl Into<String>, target: DomNode) -> Self {
		Self {
			event_type: event_type.into(),
			target,
			default_prevented: Cell::new(false),
			propagation_stopped: Cell::new(false),
		}
	}

	/// The event name, e.g. `click`
	pub fn event_type(&self) -> &str {
		&self.event_type
	}

	/// The node the event was dispatched on
	pub fn target(&self) -> &DomNode {
		&self.target
	}

	/// Marks the default action as cancelled
	pub fn prevent_default(&self) {
		self.default_prevented.set(true);
	}

	/// Returns true if a handler called [`Event::prevent_default`]
	pub fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}

	/// Stops the event from reaching ancestors
	pub fn stop_propagation(&self) {
		self.propagation_stopped.set(true);
	}

	pub(crate) fn propagation_stopped(&self) -> bool {
		self.propagation_stopped.get()
	}
}

impl fmt::Debug for Event {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Event")
			.field("event_type", &self.event_type)
			.field("target", &self.target)
			.field("default_prevented", &self.default_prevented.get())
			.finish()
	}
}

/// A shared event handler.
///
/// Handlers compare by identity, which is what listener removal uses.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&Event)>);

impl EventHandler {
	/// Wraps a closure as a handler
	pub fn new(handler: impl Fn(&Event) + 'static) -> Self {
		Self(Rc::new(handler))
	}

	/// Invokes the handler
	pub fn call(&self, event: &Event) {
		(self.0)(event);
	}

	/// Returns true if both handles wrap the same closure
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl<F: Fn(&Event) + 'static> From<F> for EventHandler {
	fn from(handler: F) -> Self {
		Self::new(handler)
	}
}

impl PartialEq for EventHandler {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl fmt::Debug for EventHandler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("EventHandler(<closure>)")
	}
}

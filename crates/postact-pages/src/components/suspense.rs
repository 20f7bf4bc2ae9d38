//! Fallback content while asynchronous values are pending.
//!
//! A [`Suspense`] boundary counts the [`Later`] values registered through
//! [`Suspense::pending`]. Until the last of them resolves the boundary
//! shows its fallback; then it swaps in the finished content once.
//!
//! ```ignore
//! let (user, task) = later(fetch_user());
//! let boundary = Suspense::new(Node::text("Loading…"));
//! let name = boundary.pending(&user);
//! let page = boundary.finish(html!("<p>Hello, " {name} "</p>")?);
//! ```

use core::cell::{Cell, RefCell};
use std::rc::Rc;

use postact_core::reactive::Subscriber;
use postact_core::{Argument, IntoDynamic, Later, Node, Observe, State, debug_log};

/// Where a boundary is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspenseState {
	/// Waiting for `outstanding` values to resolve
	Pending {
		/// Values registered and not yet resolved
		outstanding: usize,
	},
	/// Content has been swapped in
	Settled,
}

struct Boundary {
	state: Cell<SuspenseState>,
	content: RefCell<Option<Node>>,
	display: State<Node>,
}

impl Boundary {
	fn register(&self) {
		if let SuspenseState::Pending { outstanding } = self.state.get() {
			self.state.set(SuspenseState::Pending {
				outstanding: outstanding + 1,
			});
		}
	}

	fn resolve_one(&self) {
		let SuspenseState::Pending { outstanding } = self.state.get() else {
			return;
		};
		let outstanding = outstanding.saturating_sub(1);
		self.state.set(SuspenseState::Pending { outstanding });
		if outstanding > 0 {
			return;
		}

		let content = self.content.borrow_mut().take();
		if let Some(content) = content {
			debug_log!("suspense boundary settled");
			self.state.set(SuspenseState::Settled);
			self.display.update(content);
		}
	}
}

/// A pending group with fallback content.
#[derive(Clone)]
pub struct Suspense {
	boundary: Rc<Boundary>,
}

impl Suspense {
	/// A boundary showing `fallback` while anything is pending
	pub fn new(fallback: impl Into<Node>) -> Self {
		Self {
			boundary: Rc::new(Boundary {
				state: Cell::new(SuspenseState::Pending { outstanding: 0 }),
				content: RefCell::new(None),
				display: State::new(fallback.into()),
			}),
		}
	}

	/// The current lifecycle state
	pub fn state(&self) -> SuspenseState {
		self.boundary.state.get()
	}

	/// Registers `later` and returns a placeholder showing its value.
	///
	/// A value that already resolved is not counted. A rejected value is
	/// never resolved, so the boundary keeps its fallback.
	pub fn pending<T>(&self, later: &Later<T>) -> Node
	where
		T: Clone + Into<Argument> + 'static,
	{
		if !later.is_ok() {
			self.boundary.register();
			let boundary = Rc::clone(&self.boundary);
			let subscriber: Subscriber<Option<T>> = Rc::new(move |value: &Option<T>| {
				if value.is_some() {
					boundary.resolve_one();
				}
			});
			later.subscribe(subscriber);
		}

		let source = later.clone();
		Node::deferred(move || Argument::from(&source))
	}

	/// Closes the group with its content.
	///
	/// With nothing outstanding the content is returned as is. Otherwise
	/// the result shows the fallback and switches to `content` when the
	/// last registered value resolves.
	pub fn finish(self, content: impl Into<Node>) -> Node {
		let content = content.into();
		match self.boundary.state.get() {
			SuspenseState::Pending { outstanding: 0 } | SuspenseState::Settled => {
				self.boundary.state.set(SuspenseState::Settled);
				content
			}
			SuspenseState::Pending { .. } => {
				*self.boundary.content.borrow_mut() = Some(content);
				let display = self.boundary.display.clone();
				Node::fragment(vec![display.value()], Some(display.into_dynamic()))
			}
		}
	}
}

//! Boolean-gated rendering with a memoized branch.

use core::cell::{Cell, RefCell};

use postact_core::{Derived, IntoDynamic, Node, Observe};

/// Renders `render()` while `condition` is true.
///
/// The rendered branch is kept while the condition stays true, so repeated
/// `true` emissions re-use it instead of calling `render` again.
pub fn conditional<S>(condition: &S, render: impl Fn() -> Node + 'static) -> Node
where
	S: Observe<Value = bool>,
{
	let shown = condition.value();
	let initial = if shown { render() } else { Node::Empty };
	let memo = RefCell::new(shown.then(|| initial.clone()));
	let last = Cell::new(shown);

	let branch = Derived::with_initial(condition, initial.clone(), move |&now: &bool| {
		let was_shown = last.replace(now);
		if !now {
			return Node::Empty;
		}
		if was_shown && let Some(node) = memo.borrow().clone() {
			return node;
		}
		let node = render();
		*memo.borrow_mut() = Some(node.clone());
		node
	});
	Node::fragment(vec![initial], Some(branch.into_dynamic()))
}

/// [`conditional`] over a plain flag
pub fn conditional_static(condition: bool, render: impl FnOnce() -> Node) -> Node {
	let branch = if condition { render() } else { Node::Empty };
	Node::fragment(vec![branch], None)
}

#[cfg(test)]
mod tests {
	use super::*;
	use postact_core::State;
	use rstest::*;
	use std::rc::Rc;

	#[rstest]
	fn test_conditional_memoizes_while_true() {
		// Arrange
		let open = State::new(true);
		let renders = Rc::new(Cell::new(0));
		let counter = Rc::clone(&renders);
		let node = conditional(&open, move || {
			counter.set(counter.get() + 1);
			Node::text("panel")
		});

		// Act
		open.update(true);
		open.update(false);
		open.update(true);

		// Assert
		assert_eq!(renders.get(), 2);
		assert_eq!(node.render_to_string(), "panel");
	}

	#[rstest]
	fn test_conditional_hidden_renders_nothing() {
		// Arrange
		let open = State::new(true);
		let node = conditional(&open, || Node::text("panel"));

		// Act
		open.update(false);

		// Assert
		assert_eq!(node.render_to_string(), "");
	}

	#[rstest]
	fn test_conditional_static() {
		assert_eq!(conditional_static(false, || Node::text("x")).render_to_string(), "");
	}
}

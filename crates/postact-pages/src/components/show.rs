//! Optional-value rendering.

use postact_core::{Derived, IntoDynamic, Node, Observe};

/// Renders `render(value)` while `when` holds `Some`, else `fallback()`.
///
/// The whole branch is rebuilt on every emission of `when`.
pub fn show<S, T>(
	when: &S,
	render: impl Fn(&T) -> Node + 'static,
	fallback: impl Fn() -> Node + 'static,
) -> Node
where
	S: Observe<Value = Option<T>>,
	T: 'static,
{
	let branch = Derived::new(when, move |value: &Option<T>| match value {
		Some(value) => render(value),
		None => fallback(),
	});
	let initial = branch.value();
	Node::fragment(vec![initial], Some(branch.into_dynamic()))
}

/// [`show`] over a plain value
pub fn show_static<T>(
	when: Option<&T>,
	render: impl FnOnce(&T) -> Node,
	fallback: impl FnOnce() -> Node,
) -> Node {
	let branch = match when {
		Some(value) => render(value),
		None => fallback(),
	};
	Node::fragment(vec![branch], None)
}

#[cfg(test)]
mod tests {
	use super::*;
	use postact_core::State;
	use rstest::*;

	#[rstest]
	fn test_show_switches_branches() {
		// Arrange
		let user = State::new(None::<String>);
		let node = show(&user, |name| Node::text(name.clone()), || Node::text("anonymous"));

		// Act
		let before = node.render_to_string();
		user.update(Some("Ada".to_string()));

		// Assert
		assert_eq!(before, "anonymous");
		assert_eq!(node.render_to_string(), "Ada");
	}

	#[rstest]
	fn test_show_static() {
		let node = show_static(Some(&3), |n| Node::text(n.to_string()), || Node::Empty);
		assert_eq!(node.render_to_string(), "3");
	}
}

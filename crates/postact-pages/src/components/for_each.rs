//! List rendering.

use postact_core::{Derived, IntoDynamic, Node, Observe};

/// Renders every item of `each`, re-rendering the whole list on emission.
pub fn for_each<S, T>(each: &S, render: impl Fn(&T) -> Node + 'static) -> Node
where
	S: Observe<Value = Vec<T>>,
	T: 'static,
{
	let list = Derived::new(each, move |items: &Vec<T>| {
		Node::fragment(items.iter().map(&render).collect(), None)
	});
	let initial = list.value();
	Node::fragment(vec![initial], Some(list.into_dynamic()))
}

/// [`for_each`] over a plain slice
pub fn for_each_static<T>(items: &[T], render: impl Fn(&T) -> Node) -> Node {
	Node::fragment(items.iter().map(render).collect(), None)
}

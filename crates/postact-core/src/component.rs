//! Component wrapper handles.
//!
//! A [`Component<P>`] wraps a render function taking [`Props<P>`]. Inserted
//! into markup it is either a *pointer* (the component itself, rendered
//! with default props) or an *instance* (`component.with(props)`). Only a
//! pointer may appear in a closing tag.
//!
//! ## Example
//!
//! ```ignore
//! use postact_core::component::{Component, Props};
//! use postact_pages::html;
//!
//! #[derive(Clone, Default)]
//! struct Greeting { name: String }
//!
//! let greet = Component::new(|props: Props<Greeting>| {
//!     html!("<p>Hello, " {props.props.name} "</p>").unwrap_or_default()
//! });
//!
//! let page = html!("<main><" {greet.with(Greeting { name: "Ada".into() })} " /></main>")?;
//! ```

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::rc::Rc;

use crate::types::node::Node;

/// Props handed to a component render function
#[derive(Debug, Clone, Default)]
pub struct Props<P> {
	/// Caller-supplied props
	pub props: P,
	/// Children written between the component's tags
	pub children: Option<Node>,
}

/// Identifier shared by a component and every call made from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(u64);

impl ComponentId {
	fn next() -> Self {
		static NEXT_ID: AtomicU64 = AtomicU64::new(1);
		Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for ComponentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "component#{}", self.0)
	}
}

/// A render function over typed props.
pub struct Component<P: 'static> {
	id: ComponentId,
	render: Rc<dyn Fn(Props<P>) -> Node>,
}

impl<P: 'static> Clone for Component<P> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			render: Rc::clone(&self.render),
		}
	}
}

impl<P: 'static> Component<P> {
	/// Wraps a render function
	pub fn new(render: impl Fn(Props<P>) -> Node + 'static) -> Self {
		Self {
			id: ComponentId::next(),
			render: Rc::new(render),
		}
	}

	/// The component identifier
	pub fn id(&self) -> ComponentId {
		self.id
	}

	/// Renders directly
	pub fn call(&self, props: P, children: Option<Node>) -> Node {
		(self.render)(Props { props, children })
	}

	/// An instance carrying `props`
	pub fn with(&self, props: P) -> ComponentCall
	where
		P: Clone,
	{
		let render = Rc::clone(&self.render);
		ComponentCall {
			id: self.id,
			kind: ComponentKind::Instance,
			invoke: Rc::new(move |children| {
				render(Props {
					props: props.clone(),
					children,
				})
			}),
		}
	}

	/// The pointer form, rendered with default props
	pub fn pointer(&self) -> ComponentCall
	where
		P: Default,
	{
		let render = Rc::clone(&self.render);
		ComponentCall {
			id: self.id,
			kind: ComponentKind::Pointer,
			invoke: Rc::new(move |children| {
				render(Props {
					props: P::default(),
					children,
				})
			}),
		}
	}
}

impl<P: 'static> fmt::Debug for Component<P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Component").field("id", &self.id).finish()
	}
}

/// Whether an inserted component is the component itself or an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
	/// The component with default props
	Pointer,
	/// The component with bound props
	Instance,
}

/// A type-erased component ready to render.
#[derive(Clone)]
pub struct ComponentCall {
	id: ComponentId,
	kind: ComponentKind,
	invoke: Rc<dyn Fn(Option<Node>) -> Node>,
}

impl ComponentCall {
	/// The originating component's identifier
	pub fn id(&self) -> ComponentId {
		self.id
	}

	/// Pointer or instance
	pub fn kind(&self) -> ComponentKind {
		self.kind
	}

	/// Returns true if this is the pointer form
	pub fn is_pointer(&self) -> bool {
		self.kind == ComponentKind::Pointer
	}

	/// Renders with the given children
	pub fn invoke(&self, children: Option<Node>) -> Node {
		(self.invoke)(children)
	}
}

impl fmt::Debug for ComponentCall {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentCall")
			.field("id", &self.id)
			.field("kind", &self.kind)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;

	#[derive(Clone, Default)]
	struct Label {
		text: String,
	}

	fn label() -> Component<Label> {
		Component::new(|props: Props<Label>| {
			let text = if props.props.text.is_empty() {
				"default".to_string()
			} else {
				props.props.text
			};
			match props.children {
				Some(children) => Node::fragment(vec![Node::text(text), children], None),
				None => Node::text(text),
			}
		})
	}

	#[rstest]
	fn test_pointer_uses_default_props() {
		// Arrange
		let component = label();

		// Act
		let call = component.pointer();

		// Assert
		assert!(call.is_pointer());
		assert_eq!(call.invoke(None).render_to_string(), "default");
	}

	#[rstest]
	fn test_instance_shares_component_id() {
		// Arrange
		let component = label();

		// Act
		let call = component.with(Label {
			text: "custom".to_string(),
		});

		// Assert
		assert_eq!(call.kind(), ComponentKind::Instance);
		assert_eq!(call.id(), component.id());
		assert_eq!(
			call.invoke(Some(Node::text("!"))).render_to_string(),
			"custom!"
		);
	}
}

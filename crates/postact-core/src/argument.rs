//! Arguments inserted into markup.
//!
//! Every `${…}` insertion in a template is an [`Argument`]. [`identify`]
//! classifies an argument into the coarse kind the parser dispatches on,
//! and [`to_node`] converts any argument into a renderable [`Node`]. Both
//! the parser and the realization engine go through these two functions.

use core::fmt;
use std::rc::Rc;

use crate::component::{Component, ComponentCall};
use crate::dom::{Event, EventHandler};
use crate::reactive::dynamic::{Dynamic, IntoDynamic};
use crate::reactive::{Derived, Later, NodeRef, Observable, State, Store, StoreField};
use crate::types::node::{ElementNode, FragmentNode, Node, StyleDeclaration, TextNode};
use crate::warn_log;

/// A zero-argument render function
pub type RenderFn = Rc<dyn Fn() -> Argument>;

/// A primitive value that renders as text
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	/// A string
	Str(String),
	/// A signed integer
	Int(i64),
	/// An unsigned integer
	UInt(u64),
	/// A wide integer
	BigInt(i128),
	/// A floating point number
	Float(f64),
	/// A boolean
	Bool(bool),
}

impl fmt::Display for Scalar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Scalar::Str(value) => f.write_str(value),
			Scalar::Int(value) => write!(f, "{value}"),
			Scalar::UInt(value) => write!(f, "{value}"),
			Scalar::BigInt(value) => write!(f, "{value}"),
			Scalar::Float(value) => write!(f, "{value}"),
			Scalar::Bool(value) => write!(f, "{value}"),
		}
	}
}

/// Coarse classification used by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
	/// Nothing to render
	Empty,
	/// A scalar rendered as text
	Text,
	/// An observable or ref
	Observable,
	/// A node, list or style declaration
	Node,
	/// A handler, render function or component
	Function,
}

/// A value inserted into markup.
#[derive(Clone)]
pub enum Argument {
	/// Renders nothing
	Empty,
	/// A scalar
	Text(Scalar),
	/// A type-erased observable, including pending asynchronous values
	Observable(Dynamic),
	/// An element ref
	Ref(NodeRef),
	/// A ready-made node
	Node(Node),
	/// An event handler
	Handler(EventHandler),
	/// A render function evaluated at realization time
	Render(RenderFn),
	/// A component pointer or instance
	Component(ComponentCall),
	/// A list of strings, space-joined in attributes
	List(Vec<String>),
	/// An inline style declaration
	Style(StyleDeclaration),
}

impl Argument {
	/// Wraps an event handler closure
	pub fn handler(handler: impl Fn(&Event) + 'static) -> Self {
		Argument::Handler(EventHandler::new(handler))
	}

	/// Wraps a render function
	pub fn render(render: impl Fn() -> Argument + 'static) -> Self {
		Argument::Render(Rc::new(render))
	}

	/// Wraps an observable
	pub fn observable(source: impl IntoDynamic) -> Self {
		Argument::Observable(source.into_dynamic())
	}

	/// The argument as text, when it has a textual form.
	///
	/// Observables answer with their current value; lists are
	/// space-joined; nodes, functions and style declarations have none.
	pub fn as_text(&self) -> Option<String> {
		match self {
			Argument::Empty => Some(String::new()),
			Argument::Text(scalar) => Some(scalar.to_string()),
			Argument::Observable(source) => source.current().as_text(),
			Argument::List(items) => Some(items.join(" ")),
			Argument::Ref(_)
			| Argument::Node(_)
			| Argument::Handler(_)
			| Argument::Render(_)
			| Argument::Component(_)
			| Argument::Style(_) => None,
		}
	}

	/// Short name of the variant, for diagnostics
	pub fn variant_name(&self) -> &'static str {
		match self {
			Argument::Empty => "empty",
			Argument::Text(_) => "text",
			Argument::Observable(_) => "observable",
			Argument::Ref(_) => "ref",
			Argument::Node(_) => "node",
			Argument::Handler(_) => "event handler",
			Argument::Render(_) => "render function",
			Argument::Component(_) => "component",
			Argument::List(_) => "list",
			Argument::Style(_) => "style declaration",
		}
	}
}

impl fmt::Debug for Argument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Argument::Empty => f.write_str("Empty"),
			Argument::Text(scalar) => f.debug_tuple("Text").field(scalar).finish(),
			Argument::Observable(source) => f.debug_tuple("Observable").field(source).finish(),
			Argument::Ref(node_ref) => f.debug_tuple("Ref").field(node_ref).finish(),
			Argument::Node(node) => f.debug_tuple("Node").field(node).finish(),
			Argument::Handler(handler) => f.debug_tuple("Handler").field(handler).finish(),
			Argument::Render(_) => f.write_str("Render(<closure>)"),
			Argument::Component(call) => f.debug_tuple("Component").field(call).finish(),
			Argument::List(items) => f.debug_tuple("List").field(items).finish(),
			Argument::Style(style) => f.debug_tuple("Style").field(style).finish(),
		}
	}
}

/// Classifies an argument.
///
/// Observables and refs are recognized by their variant, never by shape.
pub fn identify(argument: &Argument) -> ArgumentKind {
	match argument {
		Argument::Empty => ArgumentKind::Empty,
		Argument::Text(_) => ArgumentKind::Text,
		Argument::Observable(_) | Argument::Ref(_) => ArgumentKind::Observable,
		Argument::Handler(_) | Argument::Render(_) | Argument::Component(_) => ArgumentKind::Function,
		Argument::Node(_) | Argument::List(_) | Argument::Style(_) => ArgumentKind::Node,
	}
}

/// Converts any argument into a node.
///
/// An observable becomes a text node when its current value is empty or a
/// scalar, and a driven fragment wrapping the converted value otherwise.
/// Functions become deferred renders.
pub fn to_node(argument: Argument) -> Node {
	match argument {
		Argument::Empty => Node::Empty,
		Argument::Text(scalar) => Node::Text(TextNode::new(scalar.to_string())),
		Argument::Observable(source) => observable_node(source),
		Argument::Ref(node_ref) => observable_node(Rc::new(node_ref)),
		Argument::Node(node) => node,
		Argument::Handler(handler) => Node::deferred(move || Argument::Handler(handler.clone())),
		Argument::Render(render) => Node::Deferred(crate::types::node::DeferredRender::from_fn(render)),
		Argument::Component(call) => Node::deferred(move || Argument::Node(call.invoke(None))),
		Argument::List(items) => Node::fragment(items.into_iter().map(Node::text).collect(), None),
		Argument::Style(_) => {
			warn_log!("a style declaration cannot be placed as a child; rendering nothing");
			Node::Empty
		}
	}
}

fn observable_node(source: Dynamic) -> Node {
	match source.current() {
		Argument::Empty => Node::Text(TextNode::driven("", source)),
		Argument::Text(scalar) => Node::Text(TextNode::driven(scalar.to_string(), source)),
		other => Node::fragment(vec![to_node(other)], Some(source)),
	}
}

macro_rules! impl_from_scalar {
	($variant:ident as $target:ty: $($source:ty),+) => {
		$(
			impl From<$source> for Argument {
				fn from(value: $source) -> Self {
					Argument::Text(Scalar::$variant(<$target>::from(value)))
				}
			}
		)+
	};
}

impl_from_scalar!(Int as i64: i8, i16, i32, i64);
impl_from_scalar!(UInt as u64: u8, u16, u32, u64);
impl_from_scalar!(BigInt as i128: i128);
impl_from_scalar!(Float as f64: f32, f64);
impl_from_scalar!(Bool as bool: bool);

impl From<usize> for Argument {
	fn from(value: usize) -> Self {
		Argument::Text(Scalar::UInt(value as u64))
	}
}

impl From<isize> for Argument {
	fn from(value: isize) -> Self {
		Argument::Text(Scalar::Int(value as i64))
	}
}

impl From<char> for Argument {
	fn from(value: char) -> Self {
		Argument::Text(Scalar::Str(value.to_string()))
	}
}

impl From<&str> for Argument {
	fn from(value: &str) -> Self {
		Argument::Text(Scalar::Str(value.to_string()))
	}
}

impl From<String> for Argument {
	fn from(value: String) -> Self {
		Argument::Text(Scalar::Str(value))
	}
}

impl From<&String> for Argument {
	fn from(value: &String) -> Self {
		Argument::Text(Scalar::Str(value.clone()))
	}
}

impl From<Scalar> for Argument {
	fn from(value: Scalar) -> Self {
		Argument::Text(value)
	}
}

impl From<()> for Argument {
	fn from(_: ()) -> Self {
		Argument::Empty
	}
}

impl<T: Into<Argument>> From<Option<T>> for Argument {
	fn from(value: Option<T>) -> Self {
		value.map_or(Argument::Empty, Into::into)
	}
}

impl From<Node> for Argument {
	fn from(node: Node) -> Self {
		Argument::Node(node)
	}
}

impl From<ElementNode> for Argument {
	fn from(element: ElementNode) -> Self {
		Argument::Node(Node::Element(element))
	}
}

impl From<FragmentNode> for Argument {
	fn from(fragment: FragmentNode) -> Self {
		Argument::Node(Node::Fragment(fragment))
	}
}

impl From<Vec<Node>> for Argument {
	fn from(children: Vec<Node>) -> Self {
		Argument::Node(Node::fragment(children, None))
	}
}

impl From<Vec<String>> for Argument {
	fn from(items: Vec<String>) -> Self {
		Argument::List(items)
	}
}

impl From<StyleDeclaration> for Argument {
	fn from(style: StyleDeclaration) -> Self {
		Argument::Style(style)
	}
}

impl From<EventHandler> for Argument {
	fn from(handler: EventHandler) -> Self {
		Argument::Handler(handler)
	}
}

impl From<NodeRef> for Argument {
	fn from(node_ref: NodeRef) -> Self {
		Argument::Ref(node_ref)
	}
}

impl From<&NodeRef> for Argument {
	fn from(node_ref: &NodeRef) -> Self {
		Argument::Ref(node_ref.clone())
	}
}

impl From<ComponentCall> for Argument {
	fn from(call: ComponentCall) -> Self {
		Argument::Component(call)
	}
}

impl<P: Default + 'static> From<&Component<P>> for Argument {
	fn from(component: &Component<P>) -> Self {
		Argument::Component(component.pointer())
	}
}

macro_rules! impl_from_observable {
	($($ty:ident),+) => {
		$(
			impl<T: Clone + Into<Argument> + 'static> From<$ty<T>> for Argument {
				fn from(source: $ty<T>) -> Self {
					Argument::Observable(source.into_dynamic())
				}
			}

			impl<T: Clone + Into<Argument> + 'static> From<&$ty<T>> for Argument {
				fn from(source: &$ty<T>) -> Self {
					Argument::Observable(source.clone().into_dynamic())
				}
			}
		)+
	};
}

impl_from_observable!(Observable, State, Derived, Later, Store, StoreField);

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::ObservableKind;
	use rstest::*;

	#[rstest]
	#[case::empty(Argument::Empty, ArgumentKind::Empty)]
	#[case::text(Argument::from("hi"), ArgumentKind::Text)]
	#[case::number(Argument::from(3.5), ArgumentKind::Text)]
	#[case::observable(Argument::from(State::new(1)), ArgumentKind::Observable)]
	#[case::node_ref(Argument::from(NodeRef::new()), ArgumentKind::Observable)]
	#[case::node(Argument::from(Node::text("x")), ArgumentKind::Node)]
	#[case::list(Argument::from(vec!["a".to_string()]), ArgumentKind::Node)]
	#[case::handler(Argument::handler(|_| {}), ArgumentKind::Function)]
	#[case::render(Argument::render(|| Argument::Empty), ArgumentKind::Function)]
	fn test_identify(#[case] argument: Argument, #[case] expected: ArgumentKind) {
		assert_eq!(identify(&argument), expected);
	}

	#[rstest]
	fn test_pending_value_is_an_observable() {
		// Arrange
		let pending = Later::<String>::pending();

		// Act
		let argument = Argument::from(&pending);

		// Assert
		let Argument::Observable(source) = &argument else {
			panic!("expected an observable");
		};
		assert_eq!(source.kind(), ObservableKind::Later);
		assert_eq!(identify(&argument), ArgumentKind::Observable);
	}

	#[rstest]
	fn test_scalar_observable_becomes_driven_text() {
		// Arrange
		let count = State::new(7_u32);

		// Act
		let node = to_node(Argument::from(&count));

		// Assert
		let Node::Text(text) = node else {
			panic!("expected a text node");
		};
		assert_eq!(text.data(), "7");
		assert!(text.driving().is_some());
	}

	#[rstest]
	fn test_empty_observable_becomes_empty_driven_text() {
		// Arrange
		let maybe = State::new(None::<String>);

		// Act
		let node = to_node(Argument::from(&maybe));

		// Assert
		assert!(node.is_text());
		assert!(node.driving().is_some());
	}

	#[rstest]
	fn test_node_observable_becomes_driven_fragment() {
		// Arrange
		let content = State::new(Node::text("inner"));

		// Act
		let node = to_node(Argument::from(&content));

		// Assert
		assert!(node.is_fragment());
		assert!(node.driving().is_some());
		assert!(node.children()[0].is_text());
	}

	#[rstest]
	fn test_functions_become_deferred() {
		let node = to_node(Argument::render(|| Argument::from("x")));
		assert!(node.is_deferred());
	}

	#[rstest]
	fn test_list_child_becomes_text_fragment() {
		// Act
		let node = to_node(Argument::from(vec!["a".to_string(), "b".to_string()]));

		// Assert
		assert_eq!(node.render_to_string(), "ab");
	}

	#[rstest]
	#[case(Argument::from(12_i64), Some("12"))]
	#[case(Argument::from(true), Some("true"))]
	#[case(Argument::Empty, Some(""))]
	#[case(Argument::from(vec!["a".to_string(), "b".to_string()]), Some("a b"))]
	#[case(Argument::from(Node::Empty), None)]
	fn test_as_text(#[case] argument: Argument, #[case] expected: Option<&str>) {
		assert_eq!(argument.as_text().as_deref(), expected);
	}
}

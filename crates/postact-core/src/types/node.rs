//! Node types for reactive rendering.
//!
//! A [`Node`] is an immutable description of page content. Any node may be
//! bound to a driving observable, in which case the realized region is
//! rebuilt from that observable's value on every emission.
//!
//! ## Example
//!
//! ```ignore
//! use postact_core::types::node::{ElementNode, Node};
//!
//! let node: Node = ElementNode::new("button")
//!     .attr("class", "primary")
//!     .on("click", |_| println!("clicked"))
//!     .child(Node::text("Save"))
//!     .into();
//! ```

use core::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::argument::{Argument, RenderFn};
use crate::dom::EventHandler;
use crate::reactive::dynamic::{Dynamic, IntoDynamic};
use crate::reactive::NodeRef;

/// Discriminant of a [`Node`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
	/// [`Node::Empty`]
	Empty,
	/// [`Node::Text`]
	Text,
	/// [`Node::Element`]
	Element,
	/// [`Node::Fragment`]
	Fragment,
	/// [`Node::Deferred`]
	Deferred,
}

/// A unit of renderable content.
#[derive(Debug, Clone, Default)]
pub enum Node {
	/// Renders nothing
	#[default]
	Empty,
	/// A text run
	Text(TextNode),
	/// An element with attributes, listeners and children
	Element(ElementNode),
	/// A sequence of nodes with no wrapper
	Fragment(FragmentNode),
	/// A render function evaluated at realization time
	Deferred(DeferredRender),
}

impl Node {
	/// A static text node
	pub fn text(data: impl Into<String>) -> Self {
		Node::Text(TextNode::new(data))
	}

	/// Builds a fragment, collapsing a lone fragment child into it.
	///
	/// When the only child is itself a fragment, its children are adopted
	/// and its driving observable wins; `driving` is used only when the
	/// child has none. If both carry a driving observable nothing is
	/// collapsed.
	pub fn fragment(mut children: Vec<Node>, driving: Option<Dynamic>) -> Self {
		let collapsible = match children.as_slice() {
			[Node::Fragment(inner)] => inner.driving.is_none() || driving.is_none(),
			_ => false,
		};
		if collapsible && let Some(Node::Fragment(inner)) = children.pop() {
			return Node::Fragment(FragmentNode {
				children: inner.children,
				driving: inner.driving.or(driving),
			});
		}
		Node::Fragment(FragmentNode { children, driving })
	}

	/// A deferred render function
	pub fn deferred(render: impl Fn() -> Argument + 'static) -> Self {
		Node::Deferred(DeferredRender::new(render))
	}

	/// The discriminant of this node
	pub fn tag(&self) -> NodeTag {
		match self {
			Node::Empty => NodeTag::Empty,
			Node::Text(_) => NodeTag::Text,
			Node::Element(_) => NodeTag::Element,
			Node::Fragment(_) => NodeTag::Fragment,
			Node::Deferred(_) => NodeTag::Deferred,
		}
	}

	/// Returns true for [`Node::Empty`]
	pub fn is_empty(&self) -> bool {
		matches!(self, Node::Empty)
	}

	/// Returns true for [`Node::Text`]
	pub fn is_text(&self) -> bool {
		matches!(self, Node::Text(_))
	}

	/// Returns true for [`Node::Element`]
	pub fn is_element(&self) -> bool {
		matches!(self, Node::Element(_))
	}

	/// Returns true for [`Node::Fragment`]
	pub fn is_fragment(&self) -> bool {
		matches!(self, Node::Fragment(_))
	}

	/// Returns true for [`Node::Deferred`]
	pub fn is_deferred(&self) -> bool {
		matches!(self, Node::Deferred(_))
	}

	/// Returns true for an element with the given tag name
	pub fn is_element_named(&self, tag: &str) -> bool {
		matches!(self, Node::Element(element) if element.tag == tag)
	}

	/// The observable that drives this node, if any
	pub fn driving(&self) -> Option<&Dynamic> {
		match self {
			Node::Text(text) => text.driving.as_ref(),
			Node::Element(element) => element.driving.as_ref(),
			Node::Fragment(fragment) => fragment.driving.as_ref(),
			Node::Empty | Node::Deferred(_) => None,
		}
	}

	/// Children of elements and fragments
	pub fn children(&self) -> &[Node] {
		match self {
			Node::Element(element) => &element.children,
			Node::Fragment(fragment) => &fragment.children,
			_ => &[],
		}
	}
}

impl From<TextNode> for Node {
	fn from(text: TextNode) -> Self {
		Node::Text(text)
	}
}

impl From<ElementNode> for Node {
	fn from(element: ElementNode) -> Self {
		Node::Element(element)
	}
}

impl From<FragmentNode> for Node {
	fn from(fragment: FragmentNode) -> Self {
		Node::Fragment(fragment)
	}
}

impl From<&str> for Node {
	fn from(text: &str) -> Self {
		Node::text(text)
	}
}

impl From<String> for Node {
	fn from(text: String) -> Self {
		Node::text(text)
	}
}

impl From<Vec<Node>> for Node {
	fn from(children: Vec<Node>) -> Self {
		Node::fragment(children, None)
	}
}

/// A text run, optionally driven by an observable
#[derive(Debug, Clone)]
pub struct TextNode {
	data: String,
	driving: Option<Dynamic>,
}

impl TextNode {
	/// A static text run
	pub fn new(data: impl Into<String>) -> Self {
		Self {
			data: data.into(),
			driving: None,
		}
	}

	/// A text run whose region follows `driving`
	pub fn driven(data: impl Into<String>, driving: Dynamic) -> Self {
		Self {
			data: data.into(),
			driving: Some(driving),
		}
	}

	/// The text as parsed or last computed
	pub fn data(&self) -> &str {
		&self.data
	}

	/// The driving observable
	pub fn driving(&self) -> Option<&Dynamic> {
		self.driving.as_ref()
	}

	/// Splits into data and driving observable
	pub fn into_parts(self) -> (String, Option<Dynamic>) {
		(self.data, self.driving)
	}
}

/// A value of one element attribute
#[derive(Debug, Clone)]
pub enum AttributeValue {
	/// Static text
	Text(String),
	/// Re-applied on every emission
	Observable(Dynamic),
	/// Attached to the realized element
	Ref(NodeRef),
	/// Space-joined, as for `class`
	List(Vec<String>),
	/// Inline style declaration
	Style(StyleDeclaration),
}

impl AttributeValue {
	/// Wraps an observable as an attribute value
	pub fn observable(source: impl IntoDynamic) -> Self {
		AttributeValue::Observable(source.into_dynamic())
	}

	/// The text this value has right now, if it is expressible as text
	pub fn current_text(&self) -> Option<String> {
		match self {
			AttributeValue::Text(text) => Some(text.clone()),
			AttributeValue::Observable(source) => source.current().as_text(),
			AttributeValue::List(items) => Some(items.join(" ")),
			AttributeValue::Style(style) => Some(style.to_css()),
			AttributeValue::Ref(_) => None,
		}
	}
}

impl From<&str> for AttributeValue {
	fn from(text: &str) -> Self {
		AttributeValue::Text(text.to_string())
	}
}

impl From<String> for AttributeValue {
	fn from(text: String) -> Self {
		AttributeValue::Text(text)
	}
}

impl From<NodeRef> for AttributeValue {
	fn from(node_ref: NodeRef) -> Self {
		AttributeValue::Ref(node_ref)
	}
}

impl From<Vec<String>> for AttributeValue {
	fn from(items: Vec<String>) -> Self {
		AttributeValue::List(items)
	}
}

impl From<StyleDeclaration> for AttributeValue {
	fn from(style: StyleDeclaration) -> Self {
		AttributeValue::Style(style)
	}
}

/// One property of a [`StyleDeclaration`]
#[derive(Debug, Clone)]
pub enum StyleValue {
	/// A fixed value
	Text(String),
	/// A value tracked per property
	Observable(Dynamic),
}

impl StyleValue {
	/// The value right now; `None` when the observable is empty
	pub fn current_text(&self) -> Option<String> {
		match self {
			StyleValue::Text(text) => Some(text.clone()),
			StyleValue::Observable(source) => source.current().as_text().filter(|text| !text.is_empty()),
		}
	}
}

impl From<&str> for StyleValue {
	fn from(text: &str) -> Self {
		StyleValue::Text(text.to_string())
	}
}

impl From<String> for StyleValue {
	fn from(text: String) -> Self {
		StyleValue::Text(text)
	}
}

/// Inline style keyed by property name (camelCase or kebab-case)
#[derive(Debug, Clone, Default)]
pub struct StyleDeclaration {
	properties: IndexMap<String, StyleValue>,
}

impl StyleDeclaration {
	/// An empty declaration
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a property
	pub fn property(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
		self.properties.insert(key.into(), value.into());
		self
	}

	/// Adds a property tracked by an observable
	pub fn observed(mut self, key: impl Into<String>, source: impl IntoDynamic) -> Self {
		self.properties
			.insert(key.into(), StyleValue::Observable(source.into_dynamic()));
		self
	}

	/// Properties in declaration order
	pub fn properties(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
		self.properties.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Returns true when no property is declared
	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}

	/// The current declaration as CSS text
	pub fn to_css(&self) -> String {
		self.properties
			.iter()
			.filter_map(|(key, value)| {
				value
					.current_text()
					.map(|text| format!("{}: {text}", crate::types::css_property_name(key)))
			})
			.collect::<Vec<_>>()
			.join("; ")
	}
}

/// An event listener extracted from `on…` attributes
#[derive(Debug, Clone)]
pub struct Listener {
	event: String,
	handler: EventHandler,
}

impl Listener {
	/// A listener for `event`
	pub fn new(event: impl Into<String>, handler: EventHandler) -> Self {
		Self {
			event: event.into(),
			handler,
		}
	}

	/// The event name without the `on` prefix
	pub fn event(&self) -> &str {
		&self.event
	}

	/// The handler
	pub fn handler(&self) -> &EventHandler {
		&self.handler
	}
}

/// An element description.
#[derive(Debug, Clone)]
pub struct ElementNode {
	tag: String,
	attributes: IndexMap<String, AttributeValue>,
	children: Vec<Node>,
	listeners: Vec<Listener>,
	driving: Option<Dynamic>,
}

impl ElementNode {
	/// An element with no attributes or children
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attributes: IndexMap::new(),
			children: Vec::new(),
			listeners: Vec::new(),
			driving: None,
		}
	}

	/// Sets an attribute
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
		self.insert_attribute(name, value.into());
		self
	}

	/// Appends a child
	pub fn child(mut self, child: impl Into<Node>) -> Self {
		self.children.push(child.into());
		self
	}

	/// Appends several children
	pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
		self.children.extend(children);
		self
	}

	/// Adds an event listener
	pub fn on(mut self, event: impl Into<String>, handler: impl Into<EventHandler>) -> Self {
		self.listeners.push(Listener::new(event, handler.into()));
		self
	}

	/// Binds the element's children to an observable
	pub fn driven_by(mut self, driving: impl IntoDynamic) -> Self {
		self.driving = Some(driving.into_dynamic());
		self
	}

	/// Sets or replaces an attribute in place
	pub fn insert_attribute(&mut self, name: impl Into<String>, value: AttributeValue) {
		self.attributes.insert(name.into(), value);
	}

	/// Appends a listener in place
	pub fn push_listener(&mut self, listener: Listener) {
		self.listeners.push(listener);
	}

	/// Replaces the children in place
	pub fn set_children(&mut self, children: Vec<Node>) {
		self.children = children;
	}

	/// The tag name
	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Attributes in declaration order
	pub fn attributes(&self) -> &IndexMap<String, AttributeValue> {
		&self.attributes
	}

	/// Looks up one attribute
	pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
		self.attributes.get(name)
	}

	/// Attributes whose value is fixed text, with lists space-joined
	pub fn static_attributes(&self) -> impl Iterator<Item = (&str, String)> {
		self.attributes.iter().filter_map(|(name, value)| match value {
			AttributeValue::Text(text) => Some((name.as_str(), text.clone())),
			AttributeValue::List(items) => Some((name.as_str(), items.join(" "))),
			_ => None,
		})
	}

	/// Child nodes
	pub fn child_nodes(&self) -> &[Node] {
		&self.children
	}

	/// Event listeners
	pub fn listeners(&self) -> &[Listener] {
		&self.listeners
	}

	/// The driving observable
	pub fn driving(&self) -> Option<&Dynamic> {
		self.driving.as_ref()
	}

	/// Splits into tag, attributes, children, listeners and driving observable
	#[allow(clippy::type_complexity)]
	pub fn into_parts(
		self,
	) -> (
		String,
		IndexMap<String, AttributeValue>,
		Vec<Node>,
		Vec<Listener>,
		Option<Dynamic>,
	) {
		(
			self.tag,
			self.attributes,
			self.children,
			self.listeners,
			self.driving,
		)
	}
}

/// A sequence of nodes with no wrapper element
#[derive(Debug, Clone, Default)]
pub struct FragmentNode {
	children: Vec<Node>,
	driving: Option<Dynamic>,
}

impl FragmentNode {
	/// Child nodes
	pub fn children(&self) -> &[Node] {
		&self.children
	}

	/// The driving observable
	pub fn driving(&self) -> Option<&Dynamic> {
		self.driving.as_ref()
	}

	/// Splits into children and driving observable
	pub fn into_parts(self) -> (Vec<Node>, Option<Dynamic>) {
		(self.children, self.driving)
	}
}

/// A render function evaluated when the node is realized.
#[derive(Clone)]
pub struct DeferredRender {
	render: RenderFn,
}

impl DeferredRender {
	/// Wraps a closure
	pub fn new(render: impl Fn() -> Argument + 'static) -> Self {
		Self {
			render: Rc::new(render),
		}
	}

	/// Wraps an already shared render function
	pub fn from_fn(render: RenderFn) -> Self {
		Self { render }
	}

	/// Invokes the render function
	pub fn render(&self) -> Argument {
		(self.render)()
	}
}

impl fmt::Debug for DeferredRender {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("DeferredRender(<closure>)")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::State;
	use rstest::*;

	fn driving() -> Dynamic {
		State::new(String::new()).into_dynamic()
	}

	#[rstest]
	fn test_fragment_collapses_lone_fragment_child() {
		// Arrange
		let inner = Node::fragment(vec![Node::text("a"), Node::text("b")], None);

		// Act
		let outer = Node::fragment(vec![inner], None);

		// Assert
		assert_eq!(outer.children().len(), 2);
		assert!(outer.children().iter().all(Node::is_text));
	}

	#[rstest]
	fn test_fragment_inner_driving_wins() {
		// Arrange
		let inner_source = driving();
		let inner = Node::fragment(vec![Node::text("a")], Some(Rc::clone(&inner_source)));

		// Act
		let outer = Node::fragment(vec![inner], None);

		// Assert
		let Node::Fragment(fragment) = outer else {
			panic!("expected a fragment");
		};
		assert_eq!(fragment.driving().map(|d| d.id()), Some(inner_source.id()));
		assert!(fragment.children()[0].is_text());
	}

	#[rstest]
	fn test_fragment_outer_driving_used_when_inner_absent() {
		// Arrange
		let outer_source = driving();
		let inner = Node::fragment(vec![Node::text("a")], None);

		// Act
		let outer = Node::fragment(vec![inner], Some(Rc::clone(&outer_source)));

		// Assert
		assert_eq!(outer.driving().map(|d| d.id()), Some(outer_source.id()));
		assert!(outer.children()[0].is_text());
	}

	#[rstest]
	fn test_fragment_does_not_collapse_when_both_driven() {
		// Arrange
		let inner = Node::fragment(vec![Node::text("a")], Some(driving()));

		// Act
		let outer = Node::fragment(vec![inner], Some(driving()));

		// Assert
		assert_eq!(outer.children().len(), 1);
		assert!(outer.children()[0].is_fragment());
	}

	#[rstest]
	fn test_element_builder_and_accessors() {
		// Arrange
		let element = ElementNode::new("a")
			.attr("href", "/home")
			.attr("class", vec!["nav".to_string(), "active".to_string()])
			.on("click", |_: &crate::dom::Event| {})
			.child("Home");

		// Act
		let statics: Vec<_> = element.static_attributes().collect();
		let node = Node::from(element.clone());

		// Assert
		assert_eq!(
			statics,
			vec![("href", "/home".to_string()), ("class", "nav active".to_string())]
		);
		assert!(node.is_element_named("a"));
		assert_eq!(node.tag(), NodeTag::Element);
		assert_eq!(node.children().len(), 1);
	}

	#[rstest]
	fn test_style_declaration_css() {
		let style = StyleDeclaration::new()
			.property("fontSize", "12px")
			.property("color", "red");
		assert_eq!(style.to_css(), "font-size: 12px; color: red");
	}
}

//! Arena-backed page tree.

use core::cell::RefCell;
use core::fmt;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use super::context::DocumentGuard;
use super::{DomError, Event, EventHandler};
use crate::types::util::{html_escape, is_void_element};

/// Shape of a page node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomNodeType {
	/// An element such as `<div>`
	Element,
	/// A text node
	Text,
	/// A comment node, used for region anchors
	Comment,
	/// A document fragment; inserting it moves its children
	Fragment,
}

impl DomNodeType {
	fn name(self) -> &'static str {
		match self {
			DomNodeType::Element => "element",
			DomNodeType::Text => "text",
			DomNodeType::Comment => "comment",
			DomNodeType::Fragment => "fragment",
		}
	}
}

#[derive(Default)]
struct ElementData {
	tag: String,
	attributes: IndexMap<String, String>,
	style: IndexMap<String, String>,
	listeners: Vec<(String, EventHandler)>,
}

enum NodeData {
	Element(ElementData),
	Text(String),
	Comment(String),
	Fragment,
}

impl NodeData {
	fn node_type(&self) -> DomNodeType {
		match self {
			NodeData::Element(_) => DomNodeType::Element,
			NodeData::Text(_) => DomNodeType::Text,
			NodeData::Comment(_) => DomNodeType::Comment,
			NodeData::Fragment => DomNodeType::Fragment,
		}
	}
}

struct Slot {
	data: NodeData,
	parent: Option<usize>,
	children: Vec<usize>,
	retain: Weak<Retain>,
}

impl Slot {
	fn new(data: NodeData) -> Self {
		Self {
			data,
			parent: None,
			children: Vec::new(),
			retain: Weak::new(),
		}
	}

	fn is_held(&self) -> bool {
		self.retain.strong_count() > 0
	}
}

/// Liveness marker shared by every [`DomNode`] handle to one slot
struct Retain;

/// Live node count below which no sweep runs
const SWEEP_FLOOR: usize = 64;

struct Arena {
	slots: Vec<Slot>,
	free: Vec<usize>,
	next_sweep: usize,
}

impl Default for Arena {
	fn default() -> Self {
		Self {
			slots: Vec::new(),
			free: Vec::new(),
			next_sweep: SWEEP_FLOOR,
		}
	}
}

impl Arena {
	fn live(&self) -> usize {
		self.slots.len() - self.free.len()
	}

	/// Stores `data`, reclaiming unreachable slots first once the live
	/// count has doubled since the last sweep. Reclaimed contents are
	/// returned so they drop outside the arena borrow.
	fn alloc(&mut self, data: NodeData) -> (usize, Vec<NodeData>) {
		let mut garbage = Vec::new();
		if self.live() >= self.next_sweep {
			garbage = self.sweep();
			self.next_sweep = (self.live() * 2).max(SWEEP_FLOOR);
		}
		let id = match self.free.pop() {
			Some(id) => {
				self.slots[id] = Slot::new(data);
				id
			}
			None => {
				self.slots.push(Slot::new(data));
				self.slots.len() - 1
			}
		};
		(id, garbage)
	}

	fn root(&self, mut id: usize) -> usize {
		while let Some(parent) = self.slots[id].parent {
			id = parent;
		}
		id
	}

	/// Frees every tree in which no node has a live handle.
	///
	/// A freed slot has no handle left, so its id cannot be observed again
	/// before reuse.
	fn sweep(&mut self) -> Vec<NodeData> {
		let vacant: HashSet<usize> = self.free.iter().copied().collect();
		let retained: HashSet<usize> = (0..self.slots.len())
			.filter(|id| !vacant.contains(id) && self.slots[*id].is_held())
			.map(|id| self.root(id))
			.collect();

		let mut garbage = Vec::new();
		for id in 0..self.slots.len() {
			if vacant.contains(&id) || retained.contains(&self.root(id)) {
				continue;
			}
			garbage.push(id);
		}
		let mut reclaimed = Vec::with_capacity(garbage.len());
		for id in garbage {
			let slot = core::mem::replace(&mut self.slots[id], Slot::new(NodeData::Fragment));
			reclaimed.push(slot.data);
			self.free.push(id);
		}
		reclaimed
	}

	/// Number of nodes reachable from a live handle
	fn reachable(&mut self) -> (usize, Vec<NodeData>) {
		let garbage = self.sweep();
		(self.live(), garbage)
	}

	fn detach(&mut self, id: usize) {
		if let Some(parent) = self.slots[id].parent.take() {
			self.slots[parent].children.retain(|child| *child != id);
		}
	}

	fn is_inclusive_ancestor(&self, ancestor: usize, mut node: usize) -> bool {
		loop {
			if node == ancestor {
				return true;
			}
			match self.slots[node].parent {
				Some(parent) => node = parent,
				None => return false,
			}
		}
	}

	fn element(&self, id: usize) -> Option<&ElementData> {
		match &self.slots[id].data {
			NodeData::Element(element) => Some(element),
			_ => None,
		}
	}

	fn element_mut(&mut self, id: usize) -> Option<&mut ElementData> {
		match &mut self.slots[id].data {
			NodeData::Element(element) => Some(element),
			_ => None,
		}
	}

	fn text_content(&self, id: usize, out: &mut String) {
		match &self.slots[id].data {
			NodeData::Text(data) => out.push_str(data),
			NodeData::Comment(_) => {}
			NodeData::Element(_) | NodeData::Fragment => {
				for child in &self.slots[id].children {
					self.text_content(*child, out);
				}
			}
		}
	}

	fn serialize(&self, id: usize, out: &mut String) {
		match &self.slots[id].data {
			NodeData::Text(data) => out.push_str(&html_escape(data)),
			NodeData::Comment(data) => {
				out.push_str("<!--");
				out.push_str(data);
				out.push_str("-->");
			}
			NodeData::Fragment => self.serialize_children(id, out),
			NodeData::Element(element) => {
				out.push('<');
				out.push_str(&element.tag);
				for (name, value) in &element.attributes {
					out.push(' ');
					out.push_str(name);
					out.push_str("=\"");
					out.push_str(&html_escape(value));
					out.push('"');
				}
				if !element.style.is_empty() && !element.attributes.contains_key("style") {
					let declarations = element
						.style
						.iter()
						.map(|(property, value)| format!("{property}: {value}"))
						.collect::<Vec<_>>()
						.join("; ");
					out.push_str(" style=\"");
					out.push_str(&html_escape(&declarations));
					out.push('"');
				}
				if is_void_element(&element.tag) && self.slots[id].children.is_empty() {
					out.push_str(" />");
					return;
				}
				out.push('>');
				self.serialize_children(id, out);
				out.push_str("</");
				out.push_str(&element.tag);
				out.push('>');
			}
		}
	}

	fn serialize_children(&self, id: usize, out: &mut String) {
		for child in &self.slots[id].children {
			self.serialize(*child, out);
		}
	}
}

/// An in-memory page.
///
/// Cloning yields another handle to the same page.
#[derive(Clone, Default)]
pub struct Document {
	arena: Rc<RefCell<Arena>>,
}

impl Document {
	/// Creates an empty page
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes this document the active one on the current thread
	pub fn enter(&self) -> DocumentGuard {
		DocumentGuard::push(self.clone())
	}

	/// Returns true if both handles refer to the same page
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.arena, &other.arena)
	}

	fn alloc(&self, data: NodeData) -> DomNode {
		let (id, garbage) = self.arena.borrow_mut().alloc(data);
		drop(garbage);
		self.handle(id)
	}

	fn handle(&self, id: usize) -> DomNode {
		let mut arena = self.arena.borrow_mut();
		let slot = &mut arena.slots[id];
		let retain = match slot.retain.upgrade() {
			Some(retain) => retain,
			None => {
				let retain = Rc::new(Retain);
				slot.retain = Rc::downgrade(&retain);
				retain
			}
		};
		DomNode {
			document: self.clone(),
			id,
			_retain: retain,
		}
	}

	/// Reclaims unreachable nodes and returns how many remain.
	///
	/// A node stays reachable while any node of its tree has a live
	/// [`DomNode`] handle.
	pub fn node_count(&self) -> usize {
		let (count, garbage) = self.arena.borrow_mut().reachable();
		drop(garbage);
		count
	}

	/// Creates a detached element
	pub fn create_element(&self, tag: &str) -> DomNode {
		self.alloc(NodeData::Element(ElementData {
			tag: tag.to_string(),
			..ElementData::default()
		}))
	}

	/// Creates a detached text node
	pub fn create_text_node(&self, data: &str) -> DomNode {
		self.alloc(NodeData::Text(data.to_string()))
	}

	/// Creates a detached comment node
	pub fn create_comment(&self, data: &str) -> DomNode {
		self.alloc(NodeData::Comment(data.to_string()))
	}

	/// Creates an empty document fragment
	pub fn create_document_fragment(&self) -> DomNode {
		self.alloc(NodeData::Fragment)
	}
}

impl fmt::Debug for Document {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Document")
			.field("nodes", &self.arena.borrow().live())
			.finish()
	}
}

/// Handle to one node of a [`Document`].
#[derive(Clone)]
pub struct DomNode {
	document: Document,
	id: usize,
	_retain: Rc<Retain>,
}

impl PartialEq for DomNode {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id && self.document.ptr_eq(&other.document)
	}
}

impl Eq for DomNode {}

impl fmt::Debug for DomNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DomNode")
			.field("id", &self.id)
			.field("type", &self.node_type())
			.finish()
	}
}

impl DomNode {
	fn handle(&self, id: usize) -> DomNode {
		self.document.handle(id)
	}

	fn check_document(&self, other: &DomNode) -> Result<(), DomError> {
		if self.document.ptr_eq(&other.document) {
			Ok(())
		} else {
			Err(DomError::WrongDocument)
		}
	}

	/// The document owning this node
	pub fn owner_document(&self) -> &Document {
		&self.document
	}

	/// The shape of this node
	pub fn node_type(&self) -> DomNodeType {
		self.document.arena.borrow().slots[self.id].data.node_type()
	}

	/// Tag name for elements
	pub fn tag_name(&self) -> Option<String> {
		self.document
			.arena
			.borrow()
			.element(self.id)
			.map(|element| element.tag.clone())
	}

	/// Character data of text and comment nodes
	pub fn data(&self) -> Option<String> {
		match &self.document.arena.borrow().slots[self.id].data {
			NodeData::Text(data) | NodeData::Comment(data) => Some(data.clone()),
			_ => None,
		}
	}

	/// The parent node, if attached
	pub fn parent(&self) -> Option<DomNode> {
		let parent = self.document.arena.borrow().slots[self.id].parent;
		parent.map(|id| self.handle(id))
	}

	/// Children in order
	pub fn child_nodes(&self) -> Vec<DomNode> {
		let children = self.document.arena.borrow().slots[self.id].children.clone();
		children.into_iter().map(|id| self.handle(id)).collect()
	}

	/// The first child, if any
	pub fn first_child(&self) -> Option<DomNode> {
		let first = self.document.arena.borrow().slots[self.id]
			.children
			.first()
			.copied();
		first.map(|id| self.handle(id))
	}

	/// The following sibling, if any
	pub fn next_sibling(&self) -> Option<DomNode> {
		let arena = self.document.arena.borrow();
		let parent = arena.slots[self.id].parent?;
		let siblings = &arena.slots[parent].children;
		let position = siblings.iter().position(|id| *id == self.id)?;
		let next = siblings.get(position + 1).copied();
		drop(arena);
		next.map(|id| self.handle(id))
	}

	/// Appends `child`; a fragment contributes its children instead.
	pub fn append_child(&self, child: &DomNode) -> Result<(), DomError> {
		self.insert_before(child, None)
	}

	/// Inserts `child` before `reference`, or at the end when `reference` is `None`.
	///
	/// A fragment contributes its children, leaving it empty.
	pub fn insert_before(&self, child: &DomNode, reference: Option<&DomNode>) -> Result<(), DomError> {
		self.check_document(child)?;
		if let Some(reference) = reference {
			self.check_document(reference)?;
		}

		let mut arena = self.document.arena.borrow_mut();
		let node_type = arena.slots[self.id].data.node_type();
		if matches!(node_type, DomNodeType::Text | DomNodeType::Comment) {
			return Err(DomError::NotAContainer(node_type.name()));
		}
		if arena.is_inclusive_ancestor(child.id, self.id) {
			return Err(DomError::HierarchyRequest);
		}
		if let Some(reference) = reference
			&& arena.slots[reference.id].parent != Some(self.id)
		{
			return Err(DomError::NotAChild);
		}

		let is_fragment = matches!(arena.slots[child.id].data, NodeData::Fragment);
		let moved = if is_fragment {
			core::mem::take(&mut arena.slots[child.id].children)
		} else {
			arena.detach(child.id);
			vec![child.id]
		};
		for id in &moved {
			arena.slots[*id].parent = Some(self.id);
		}

		let children = &mut arena.slots[self.id].children;
		let index = match reference {
			Some(reference) => children
				.iter()
				.position(|id| *id == reference.id)
				.ok_or(DomError::NotAChild)?,
			None => children.len(),
		};
		children.splice(index..index, moved);
		Ok(())
	}

	/// Detaches `child` from this node
	pub fn remove_child(&self, child: &DomNode) -> Result<(), DomError> {
		self.check_document(child)?;
		let mut arena = self.document.arena.borrow_mut();
		if arena.slots[child.id].parent != Some(self.id) {
			return Err(DomError::NotAChild);
		}
		arena.detach(child.id);
		Ok(())
	}

	/// Replaces all children with `content`
	pub fn replace_children(&self, content: &DomNode) -> Result<(), DomError> {
		for child in self.child_nodes() {
			self.remove_child(&child)?;
		}
		self.append_child(content)
	}

	/// Detaches this node from its parent, if any
	pub fn remove(&self) {
		self.document.arena.borrow_mut().detach(self.id);
	}

	/// Sets an attribute on an element
	pub fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
		let mut arena = self.document.arena.borrow_mut();
		let element = arena
			.element_mut(self.id)
			.ok_or(DomError::NotAnElement("set_attribute"))?;
		element.attributes.insert(name.to_string(), value.to_string());
		Ok(())
	}

	/// Removes an attribute from an element; absent attributes are ignored
	pub fn remove_attribute(&self, name: &str) -> Result<(), DomError> {
		let mut arena = self.document.arena.borrow_mut();
		let element = arena
			.element_mut(self.id)
			.ok_or(DomError::NotAnElement("remove_attribute"))?;
		element.attributes.shift_remove(name);
		Ok(())
	}

	/// Reads an attribute
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		self.document
			.arena
			.borrow()
			.element(self.id)
			.and_then(|element| element.attributes.get(name).cloned())
	}

	/// All attributes in insertion order
	pub fn attributes(&self) -> Vec<(String, String)> {
		self.document
			.arena
			.borrow()
			.element(self.id)
			.map(|element| {
				element
					.attributes
					.iter()
					.map(|(name, value)| (name.clone(), value.clone()))
					.collect()
			})
			.unwrap_or_default()
	}

	/// Sets an inline style property
	pub fn set_style_property(&self, property: &str, value: &str) -> Result<(), DomError> {
		let mut arena = self.document.arena.borrow_mut();
		let element = arena
			.element_mut(self.id)
			.ok_or(DomError::NotAnElement("set_style_property"))?;
		element.style.insert(property.to_string(), value.to_string());
		Ok(())
	}

	/// Removes an inline style property
	pub fn remove_style_property(&self, property: &str) -> Result<(), DomError> {
		let mut arena = self.document.arena.borrow_mut();
		let element = arena
			.element_mut(self.id)
			.ok_or(DomError::NotAnElement("remove_style_property"))?;
		element.style.shift_remove(property);
		Ok(())
	}

	/// Reads an inline style property
	pub fn style_property(&self, property: &str) -> Option<String> {
		self.document
			.arena
			.borrow()
			.element(self.id)
			.and_then(|element| element.style.get(property).cloned())
	}

	/// Registers a listener for `event_type`
	pub fn add_event_listener(&self, event_type: &str, handler: EventHandler) -> Result<(), DomError> {
		let mut arena = self.document.arena.borrow_mut();
		let element = arena
			.element_mut(self.id)
			.ok_or(DomError::NotAnElement("add_event_listener"))?;
		element.listeners.push((event_type.to_string(), handler));
		Ok(())
	}

	/// Removes the listener registered with this exact handler
	pub fn remove_event_listener(&self, event_type: &str, handler: &EventHandler) {
		let mut arena = self.document.arena.borrow_mut();
		let removed = arena.element_mut(self.id).and_then(|element| {
			element
				.listeners
				.iter()
				.position(|(name, registered)| name == event_type && registered.ptr_eq(handler))
				.map(|position| element.listeners.remove(position))
		});
		drop(arena);
		drop(removed);
	}

	/// Number of listeners registered on this node
	pub fn listener_count(&self) -> usize {
		self.document
			.arena
			.borrow()
			.element(self.id)
			.map_or(0, |element| element.listeners.len())
	}

	/// Dispatches an event at this node, bubbling through its ancestors
	pub fn dispatch_event(&self, event_type: &str) -> Event {
		let event = Event::new(event_type, self.clone());
		let mut current = Some(self.clone());
		while let Some(node) = current {
			let handlers: Vec<EventHandler> = node
				.document
				.arena
				.borrow()
				.element(node.id)
				.map(|element| {
					element
						.listeners
						.iter()
						.filter(|(name, _)| name == event_type)
						.map(|(_, handler)| handler.clone())
						.collect()
				})
				.unwrap_or_default();
			for handler in handlers {
				handler.call(&event);
			}
			if event.propagation_stopped() {
				break;
			}
			current = node.parent();
		}
		event
	}

	/// Concatenated text of all descendant text nodes
	pub fn text_content(&self) -> String {
		let mut out = String::new();
		self.document.arena.borrow().text_content(self.id, &mut out);
		out
	}

	/// Serializes this node and its subtree
	pub fn outer_html(&self) -> String {
		let mut out = String::new();
		self.document.arena.borrow().serialize(self.id, &mut out);
		out
	}

	/// Serializes the children of this node
	pub fn inner_html(&self) -> String {
		let mut out = String::new();
		self.document.arena.borrow().serialize_children(self.id, &mut out);
		out
	}
}

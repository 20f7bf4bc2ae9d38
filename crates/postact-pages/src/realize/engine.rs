//! Projection of node descriptors into the page.

use core::cell::{Cell, RefCell};
use std::rc::Rc;

use postact_core::types::css_property_name;
use postact_core::{
	Argument, ArgumentKind, AttributeValue, DeferredRender, Document, DomNode, Dynamic,
	ElementNode, FragmentNode, Node, StyleDeclaration, StyleValue, TextNode, error_log, identify,
	to_node, warn_log,
};
use rand::Rng;
use rand::distributions::Alphanumeric;

use super::error::{RealizeError, RealizeResult};
use super::mounted::Mounted;
use super::options::RealizeOptions;
use super::region::AnchoredRegion;

/// Attribute names written differently in markup and in the page
const ATTRIBUTE_RENAMES: [(&str, &str); 2] = [("className", "class"), ("htmlFor", "for")];

const ANCHOR_ID_LENGTH: usize = 8;

fn attribute_name(name: &str) -> &str {
	ATTRIBUTE_RENAMES
		.iter()
		.find(|(from, _)| *from == name)
		.map_or(name, |(_, to)| *to)
}

/// Errors inside an emission callback have no caller to return to.
fn emission_failed(error: RealizeError) -> ! {
	error_log!("failed to re-render after an emission: {error}");
	panic!("failed to re-render after an emission: {error}");
}

/// Re-entrancy state of one driven region
#[derive(Default)]
struct RebuildGuard {
	busy: Cell<bool>,
	queued: RefCell<Option<Argument>>,
}

#[derive(Clone)]
pub(crate) struct Realizer {
	document: Document,
	options: RealizeOptions,
}

impl Realizer {
	pub(crate) fn new(document: Document, options: RealizeOptions) -> Self {
		Self { document, options }
	}

	/// Realizes `node` as trailing children of `parent`
	pub(crate) fn realize_into(&self, node: Node, parent: &DomNode) -> RealizeResult<Mounted> {
		match node {
			Node::Empty => Ok(Mounted::default()),
			Node::Text(text) => self.text(text, parent),
			Node::Element(element) => self.element(element, parent),
			Node::Fragment(fragment) => self.fragment(fragment, parent),
			Node::Deferred(deferred) => self.deferred(&deferred, parent),
		}
	}

	fn text(&self, text: TextNode, parent: &DomNode) -> RealizeResult<Mounted> {
		let (data, driving) = text.into_parts();
		match driving {
			Some(source) => self.region(vec![Node::text(data)], source, parent),
			None => {
				parent.append_child(&self.document.create_text_node(&data))?;
				Ok(Mounted::default())
			}
		}
	}

	fn fragment(&self, fragment: FragmentNode, parent: &DomNode) -> RealizeResult<Mounted> {
		let (children, driving) = fragment.into_parts();
		if let Some(source) = driving {
			return self.region(children, source, parent);
		}

		let mounted = Mounted::default();
		for child in children {
			mounted.push_child(self.realize_into(child, parent)?);
		}
		Ok(mounted)
	}

	fn deferred(&self, deferred: &DeferredRender, parent: &DomNode) -> RealizeResult<Mounted> {
		let value = deferred.render();
		if identify(&value) == ArgumentKind::Function {
			return Err(RealizeError::UnresolvableRender(value.variant_name()));
		}
		self.realize_into(to_node(value), parent)
	}

	fn element(&self, element: ElementNode, parent: &DomNode) -> RealizeResult<Mounted> {
		let (tag, attributes, children, listeners, driving) = element.into_parts();
		let live = self.document.create_element(&tag);
		let mut mounted = Mounted::for_element(live.clone());

		for (name, value) in attributes {
			self.attribute(&live, &name, value, &mut mounted)?;
		}
		for listener in listeners {
			live.add_event_listener(listener.event(), listener.handler().clone())?;
			mounted.listeners.push(listener);
		}
		for child in children {
			mounted.push_child(self.realize_into(child, &live)?);
		}

		if let Some(source) = driving {
			let realizer = self.clone();
			let records = Rc::clone(&mounted.children);
			let guard = RebuildGuard::default();
			let target = live.clone();
			// The subscription owns its source until the record is killed
			let owner = Rc::clone(&source);
			source.watch(Rc::new(move |value: Argument| {
				let _owner = &owner;
				realizer.rebuild(&records, &guard, value, |content| {
					target.replace_children(content)
				});
			}));
			mounted.driving = Some(source);
		}

		parent.append_child(&live)?;
		Ok(mounted)
	}

	fn attribute(
		&self,
		live: &DomNode,
		name: &str,
		value: AttributeValue,
		mounted: &mut Mounted,
	) -> RealizeResult<()> {
		match value {
			AttributeValue::Text(text) => live.set_attribute(name, &text)?,
			AttributeValue::List(items) => live.set_attribute(name, &items.join(" "))?,
			AttributeValue::Ref(node_ref) => {
				node_ref.attach(live.clone());
				mounted.refs.push(node_ref);
			}
			AttributeValue::Style(style) => self.style(live, &style, mounted)?,
			AttributeValue::Observable(source) => {
				let name = attribute_name(name).to_string();
				apply_attribute(live, &name, source.current())?;
				let target = live.clone();
				let owner = Rc::clone(&source);
				source.watch(Rc::new(move |value: Argument| {
					let _owner = &owner;
					if let Err(error) = apply_attribute(&target, &name, value) {
						emission_failed(error);
					}
				}));
				mounted.observables.push(source);
			}
		}
		Ok(())
	}

	fn style(
		&self,
		live: &DomNode,
		style: &StyleDeclaration,
		mounted: &mut Mounted,
	) -> RealizeResult<()> {
		for (key, value) in style.properties() {
			let property = css_property_name(key);
			match value {
				StyleValue::Text(text) => live.set_style_property(&property, text)?,
				StyleValue::Observable(source) => {
					apply_style_property(live, &property, source.current())?;
					let target = live.clone();
					let owner = Rc::clone(source);
					source.watch(Rc::new(move |value: Argument| {
						let _owner = &owner;
						if let Err(error) = apply_style_property(&target, &property, value) {
							emission_failed(error);
						}
					}));
					mounted.observables.push(Rc::clone(source));
				}
			}
		}
		Ok(())
	}

	/// Realizes `initial` between two anchors and re-renders on every emission
	fn region(&self, initial: Vec<Node>, source: Dynamic, parent: &DomNode) -> RealizeResult<Mounted> {
		let label = self.anchor_label();
		let region = AnchoredRegion::open(parent, label.as_deref())?;

		let mounted = Mounted::default();
		let content = self.document.create_document_fragment();
		for child in initial {
			mounted.push_child(self.realize_into(child, &content)?);
		}
		region.splice_replace(&content)?;

		let realizer = self.clone();
		let records = Rc::clone(&mounted.children);
		let guard = RebuildGuard::default();
		let owner = Rc::clone(&source);
		source.watch(Rc::new(move |value: Argument| {
			let _owner = &owner;
			realizer.rebuild(&records, &guard, value, |content| region.splice_replace(content));
		}));

		Ok(Mounted {
			driving: Some(source),
			..mounted
		})
	}

	/// Rebuilds from `value`, then from any value emitted while rebuilding.
	///
	/// Killing the previous records can emit (a ref resets to `None`); an
	/// emission arriving mid-rebuild is queued so only one record stays.
	fn rebuild(
		&self,
		records: &RefCell<Vec<Mounted>>,
		guard: &RebuildGuard,
		value: Argument,
		place: impl Fn(&DomNode) -> Result<(), postact_core::DomError>,
	) {
		if guard.busy.replace(true) {
			*guard.queued.borrow_mut() = Some(value);
			return;
		}
		let mut next = Some(value);
		while let Some(value) = next {
			self.rebuild_once(records, value, &place);
			next = guard.queued.borrow_mut().take();
		}
		guard.busy.set(false);
	}

	/// Kills the previous records, realizes `value` and places the result
	fn rebuild_once(
		&self,
		records: &RefCell<Vec<Mounted>>,
		value: Argument,
		place: &impl Fn(&DomNode) -> Result<(), postact_core::DomError>,
	) {
		let previous = core::mem::take(&mut *records.borrow_mut());
		for mounted in previous {
			mounted.kill();
		}

		let content = self.document.create_document_fragment();
		let result = self
			.realize_into(to_node(value), &content)
			.and_then(|mounted| {
				place(&content)?;
				Ok(mounted)
			});
		match result {
			Ok(mounted) => records.borrow_mut().push(mounted),
			Err(error) => emission_failed(error),
		}
	}

	fn anchor_label(&self) -> Option<String> {
		self.options.debug.then(|| {
			rand::thread_rng()
				.sample_iter(&Alphanumeric)
				.take(ANCHOR_ID_LENGTH)
				.map(char::from)
				.collect()
		})
	}
}

fn apply_attribute(live: &DomNode, name: &str, value: Argument) -> RealizeResult<()> {
	match value {
		Argument::Empty => live.remove_attribute(name)?,
		Argument::Style(style) => {
			for (key, value) in style.properties() {
				let property = css_property_name(key);
				match value.current_text() {
					Some(text) => live.set_style_property(&property, &text)?,
					None => live.remove_style_property(&property)?,
				}
			}
		}
		other => match other.as_text() {
			Some(text) => live.set_attribute(name, &text)?,
			None => {
				warn_log!(
					"attribute `{name}` received a {}, which has no text form; removing it",
					other.variant_name()
				);
				live.remove_attribute(name)?;
			}
		},
	}
	Ok(())
}

fn apply_style_property(live: &DomNode, property: &str, value: Argument) -> RealizeResult<()> {
	match value.as_text().filter(|text| !text.is_empty()) {
		Some(text) => live.set_style_property(property, &text)?,
		None => live.remove_style_property(property)?,
	}
	Ok(())
}

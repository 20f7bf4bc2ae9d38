//! Static HTML serialization of node trees.
//!
//! Observables contribute their current value and deferred render
//! functions are evaluated once. Listeners and refs have no HTML form and
//! are skipped.

use super::node::{AttributeValue, Node};
use super::util::{html_escape, is_void_element};
use crate::argument::{ArgumentKind, identify, to_node};

impl Node {
	/// Renders the node tree to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_to_string_inner(&mut output);
		output
	}

	fn render_to_string_inner(&self, output: &mut String) {
		if let Some(driving) = self.driving() {
			if let Node::Element(element) = self {
				let mut shell = element.clone();
				shell.set_children(vec![to_node(driving.current())]);
				render_element(&Node::Element(shell), output);
			} else {
				to_node(driving.current()).render_to_string_inner(output);
			}
			return;
		}

		match self {
			Node::Empty => {}
			Node::Text(text) => output.push_str(&html_escape(text.data())),
			Node::Element(_) => render_element(self, output),
			Node::Fragment(fragment) => {
				for child in fragment.children() {
					child.render_to_string_inner(output);
				}
			}
			Node::Deferred(deferred) => {
				let rendered = deferred.render();
				if identify(&rendered) != ArgumentKind::Function {
					to_node(rendered).render_to_string_inner(output);
				}
			}
		}
	}
}

fn render_element(node: &Node, output: &mut String) {
	let Node::Element(element) = node else {
		return;
	};
	output.push('<');
	output.push_str(element.tag());

	for (name, value) in element.attributes() {
		if matches!(value, AttributeValue::Ref(_)) {
			continue;
		}
		let Some(text) = value.current_text() else {
			continue;
		};
		if matches!(value, AttributeValue::Observable(_)) && text.is_empty() {
			continue;
		}
		output.push(' ');
		output.push_str(name);
		output.push_str("=\"");
		output.push_str(&html_escape(&text));
		output.push('"');
	}

	if is_void_element(element.tag()) && element.child_nodes().is_empty() {
		output.push_str(" />");
		return;
	}
	output.push('>');
	for child in element.child_nodes() {
		child.render_to_string_inner(output);
	}
	output.push_str("</");
	output.push_str(element.tag());
	output.push('>');
}

#[cfg(test)]
mod tests {
	use crate::reactive::State;
	use crate::reactive::dynamic::IntoDynamic;
	use crate::types::node::{AttributeValue, ElementNode, Node, TextNode};
	use rstest::*;

	#[rstest]
	fn test_render_escapes_text_and_attributes() {
		// Arrange
		let node: Node = ElementNode::new("p")
			.attr("title", "a \"quote\"")
			.child("1 < 2 & 3")
			.into();

		// Act
		let html = node.render_to_string();

		// Assert
		assert_eq!(html, "<p title=\"a &quot;quote&quot;\">1 &lt; 2 &amp; 3</p>");
	}

	#[rstest]
	fn test_render_uses_current_observable_values() {
		// Arrange
		let name = State::new(String::from("ada"));
		let class = State::new(String::from("x"));
		let node: Node = ElementNode::new("span")
			.attr("class", AttributeValue::observable(class.clone()))
			.child(TextNode::driven("ada", name.clone().into_dynamic()))
			.into();

		// Act
		name.update(String::from("grace"));
		class.update(String::new());
		let html = node.render_to_string();

		// Assert
		assert_eq!(html, "<span>grace</span>");
	}

	#[rstest]
	fn test_render_void_and_deferred() {
		// Arrange
		let node = Node::fragment(
			vec![
				ElementNode::new("br").into(),
				Node::deferred(|| "later".into()),
			],
			None,
		);

		// Act
		let html = node.render_to_string();

		// Assert
		assert_eq!(html, "<br />later");
	}
}

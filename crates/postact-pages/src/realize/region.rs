//! Comment-anchored regions.

use core::cell::RefCell;

use postact_core::{DomError, DomNode, debug_log};

/// A span of siblings bracketed by two comment anchors.
///
/// Observable-driven content lives between the anchors so it can be
/// replaced without touching its neighbours. The parent is whatever node
/// currently holds the start anchor; it changes when a realized fragment is
/// inserted into the page.
#[derive(Debug)]
pub struct AnchoredRegion {
	start: DomNode,
	end: DomNode,
	parent: RefCell<DomNode>,
}

impl AnchoredRegion {
	/// Appends a fresh anchor pair to `parent`.
	///
	/// With a `label` the start anchor reads `label` and the end anchor
	/// `/label`; otherwise both are empty comments.
	pub fn open(parent: &DomNode, label: Option<&str>) -> Result<Self, DomError> {
		let document = parent.owner_document();
		let (start_text, end_text) = match label {
			Some(label) => (label.to_string(), format!("/{label}")),
			None => (String::new(), String::new()),
		};
		let start = document.create_comment(&start_text);
		let end = document.create_comment(&end_text);
		parent.append_child(&start)?;
		parent.append_child(&end)?;
		Ok(Self {
			start,
			end,
			parent: RefCell::new(parent.clone()),
		})
	}

	/// The opening anchor
	pub fn start(&self) -> &DomNode {
		&self.start
	}

	/// The closing anchor
	pub fn end(&self) -> &DomNode {
		&self.end
	}

	/// The node that held the anchors at the last splice
	pub fn parent(&self) -> DomNode {
		self.parent.borrow().clone()
	}

	/// Nodes currently between the anchors
	pub fn contents(&self) -> Vec<DomNode> {
		let mut contents = Vec::new();
		let mut cursor = self.start.next_sibling();
		while let Some(node) = cursor {
			if node == self.end {
				break;
			}
			cursor = node.next_sibling();
			contents.push(node);
		}
		contents
	}

	/// Replaces everything between the anchors with `content`.
	///
	/// Detached anchors mean the region left the page; nothing happens then.
	pub fn splice_replace(&self, content: &DomNode) -> Result<(), DomError> {
		let Some(parent) = self.start.parent() else {
			debug_log!("skipping splice into a detached region");
			return Ok(());
		};
		*self.parent.borrow_mut() = parent.clone();

		let stale = self.contents();
		debug_log!("splicing region: removing {} nodes", stale.len());
		for node in &stale {
			parent.remove_child(node)?;
		}
		parent.insert_before(content, Some(&self.end))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use postact_core::Document;
	use rstest::*;

	#[rstest]
	fn test_splice_replaces_only_between_anchors() {
		// Arrange
		let document = Document::new();
		let host = document.create_element("div");
		host.append_child(&document.create_text_node("before")).unwrap();
		let region = AnchoredRegion::open(&host, None).unwrap();
		host.append_child(&document.create_text_node("after")).unwrap();
		let first = document.create_text_node("one");

		// Act
		region.splice_replace(&first).unwrap();
		let second = document.create_document_fragment();
		second.append_child(&document.create_text_node("two")).unwrap();
		second.append_child(&document.create_text_node("three")).unwrap();
		region.splice_replace(&second).unwrap();

		// Assert
		assert_eq!(host.inner_html(), "before<!---->twothree<!---->after");
		assert_eq!(region.contents().len(), 2);
	}

	#[rstest]
	fn test_parent_follows_the_anchors() {
		// Arrange
		let document = Document::new();
		let staging = document.create_document_fragment();
		let region = AnchoredRegion::open(&staging, Some("abc")).unwrap();
		let host = document.create_element("section");

		// Act
		host.append_child(&staging).unwrap();
		region.splice_replace(&document.create_text_node("x")).unwrap();

		// Assert
		assert_eq!(region.parent(), host);
		assert_eq!(host.inner_html(), "<!--abc-->x<!--/abc-->");
	}
}

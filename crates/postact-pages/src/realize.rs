//! Realization engine.
//!
//! Projects a [`Node`] tree into the active [`Document`]. Static content is
//! created once; observable-driven content is bracketed by comment anchors
//! and rebuilt between them on every emission. Realization returns a
//! [`Mounted`] record that releases every subscription and listener when
//! killed.
//!
//! ## Example
//!
//! ```ignore
//! use postact_core::{Document, State};
//! use postact_pages::{html, realize::{RealizeOptions, render}};
//!
//! let document = Document::new();
//! let _active = document.enter();
//! let root = document.create_element("main");
//!
//! let count = State::new(0);
//! let page = html!("<p>" {&count} "</p>")?;
//! let mounted = render(&root, page, &RealizeOptions::default())?;
//!
//! count.update(1);
//! assert_eq!(root.text_content(), "1");
//! mounted.kill();
//! ```
//!
//! [`Document`]: postact_core::Document

mod engine;
mod error;
mod mounted;
mod options;
mod region;

use postact_core::dom::document;
use postact_core::{DomNode, Node};

pub use error::{RealizeError, RealizeResult};
pub use mounted::Mounted;
pub use options::RealizeOptions;
pub use region::AnchoredRegion;

use engine::Realizer;

/// A realized tree, not yet inserted into the page
#[derive(Debug)]
pub struct Realized {
	/// Document fragment holding the realized nodes
	pub fragment: DomNode,
	/// Teardown record for the tree
	pub mounted: Mounted,
}

/// Realizes `node` into a new document fragment of the active document.
///
/// # Errors
///
/// Returns [`RealizeError::NoDocument`] when no document is entered on this
/// thread, [`RealizeError::UnresolvableRender`] when a deferred render
/// yields a function, and [`RealizeError::Dom`] when a page operation
/// fails.
pub fn realize(node: Node, options: &RealizeOptions) -> RealizeResult<Realized> {
	let document = document().ok_or(RealizeError::NoDocument)?;
	let fragment = document.create_document_fragment();
	let realizer = Realizer::new(document, options.clone());
	let mounted = realizer.realize_into(node, &fragment)?;
	Ok(Realized { fragment, mounted })
}

/// Replaces the children of `container` with the realized `node`.
pub fn render(container: &DomNode, node: Node, options: &RealizeOptions) -> RealizeResult<Mounted> {
	let Realized { fragment, mounted } = realize(node, options)?;
	container.replace_children(&fragment)?;
	Ok(mounted)
}

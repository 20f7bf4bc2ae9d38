//! # Postact
//!
//! A client-side reactive renderer. Markup is written as tagged templates
//! with typed insertions, parsed into a node tree and realized into a page
//! that keeps itself current as observable values change.
//!
//! ## Crates
//!
//! - [`core`]: observables, node descriptors, argument classification and the
//!   in-memory page (`postact-core`)
//! - [`pages`]: the markup parser, realization engine and control-flow
//!   components (`postact-pages`)
//!
//! ## Feature Flags
//!
//! - `debug-hooks` - emits `debug_log!` traces from subscription and
//!   realization internals
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use postact::prelude::*;
//!
//! let document = Document::new();
//! let _active = document.enter();
//! let root = document.create_element("main");
//!
//! let count = State::new(0);
//! let increment = {
//! 	let count = count.clone();
//! 	EventHandler::new(move |_| {
//! 		count.update_with(|n| n + 1);
//! 	})
//! };
//! let page = html!(
//! 	"<div><button onclick=" {increment} ">+</button><span>" {&count} "</span></div>"
//! )?;
//!
//! let mounted = render(&root, page, &RealizeOptions::default())?;
//! if let Some(button) = root.first_child().and_then(|div| div.first_child()) {
//! 	button.dispatch_event("click");
//! }
//! assert_eq!(root.text_content(), "+1");
//! mounted.kill();
//! ```

#![warn(missing_docs)]

pub mod core;
pub mod pages;

pub use postact_core::text;
pub use postact_pages::html;

/// Commonly used types
pub mod prelude {
	pub use postact_core::{
		Argument, Component, Derived, Document, DomNode, ElementNode, EventHandler, Later, Node,
		NodeRef, Observe, Props, State, Store, StoreField, StyleDeclaration, later, text,
	};
	pub use postact_pages::components::{
		Suspense, conditional, conditional_static, for_each, for_each_static, show, show_static,
	};
	pub use postact_pages::html;
	pub use postact_pages::{Mounted, RealizeOptions, parse, realize, render};
}

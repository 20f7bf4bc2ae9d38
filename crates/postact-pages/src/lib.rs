//! # Postact Pages
//!
//! Markup parsing and realization for postact.
//!
//! ## Modules
//!
//! - [`html`]: the tagged-template parser and the [`html!`] macro
//! - [`realize`]: projection of node trees into a live document
//! - [`components`]: control-flow helpers and suspense boundaries
//!
//! ## Example
//!
//! ```ignore
//! use postact_core::{Document, State};
//! use postact_pages::{html, realize::{render, RealizeOptions}};
//!
//! let document = Document::new();
//! let _active = document.enter();
//! let root = document.create_element("div");
//!
//! let name = State::new(String::from("world"));
//! let page = html!("<h1>Hello, " {&name} "!</h1>")?;
//! let _mounted = render(&root, page, &RealizeOptions::default())?;
//!
//! name.update(String::from("postact"));
//! assert_eq!(root.text_content(), "Hello, postact!");
//! ```

#![warn(missing_docs)]

pub mod components;
pub mod html;
pub mod realize;

pub use html::{ParseError, ParseResult, parse};
pub use realize::{Mounted, RealizeError, RealizeOptions, RealizeResult, Realized, realize, render};

#[doc(hidden)]
pub mod __private {
	pub use postact_core::Argument;
}

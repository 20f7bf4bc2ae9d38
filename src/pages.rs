//! Markup parsing and realization
//!
//! This module re-exports `postact-pages`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use postact::pages::{html, render, RealizeOptions};
//! use postact::core::{Document, State};
//!
//! let document = Document::new();
//! let _active = document.enter();
//! let root = document.create_element("main");
//!
//! let name = State::new(String::from("world"));
//! let mounted = render(&root, html!("<p>Hello, " {&name} "</p>")?, &RealizeOptions::default())?;
//! name.update(String::from("postact"));
//! assert_eq!(root.text_content(), "Hello, postact");
//! ```

pub use postact_pages::*;

//! Tagged-template markup parser.
//!
//! Templates are written as literal segments interleaved with inserted
//! values. [`parse`] reads them in a single pass into a [`Node`] tree; the
//! [`html!`](crate::html!) macro builds both lists from
//! `"literal" {expr} "literal" …`.
//!
//! ## Grammar
//!
//! - elements are `<name attr…>children</name>` or self-closing `<name … />`
//! - attribute values are double-quoted literals or a bare insertion
//!   (`name=${value}`); a name with no value means `"true"`
//! - `on…` attributes holding an event handler become listeners
//! - text between tags is entity-decoded; whitespace-only runs are dropped
//! - a component inserted right after `<` opens a component tag, closed
//!   with `/>` or `</${component}>`
//!
//! ## Example
//!
//! ```ignore
//! use postact_pages::html;
//! use postact_core::State;
//!
//! let count = State::new(0);
//! let node = html!("<p class=\"counter\">Count: " {&count} "</p>")?;
//! ```
//!
//! [`Node`]: postact_core::Node

mod entities;
mod error;
mod parser;
mod scanner;

pub use entities::unescape;
pub use error::{ParseError, ParseResult};
pub use parser::parse;

/// Parses a markup template.
///
/// Literal segments alternate with `{expr}` insertions; each expression is
/// converted with `Argument::from`. A template that ends with an insertion
/// needs a trailing `""` segment.
///
/// ```ignore
/// let name = "Ada";
/// let node = html!("<h1>Hello, " {name} "!</h1>")?;
/// ```
#[macro_export]
macro_rules! html {
	($first:literal $({ $argument:expr } $segment:literal)*) => {
		$crate::html::parse(
			&[$first $(, $segment)*],
			::std::vec![$($crate::__private::Argument::from($argument)),*],
		)
	};
}

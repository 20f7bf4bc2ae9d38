//! Text templates over observables
//!
//! `text!` interleaves literal segments with inserted values into a
//! [`Derived<String>`] that recomputes whenever one of the inserted
//! observables emits.
//!
//! ## Example
//!
//! ```ignore
//! use postact_core::reactive::{Observe, State};
//! use postact_core::text;
//!
//! let count = State::new(0);
//! let label = text!("Current: " {&count} "");
//!
//! count.update(1);
//! assert_eq!(label.value(), "Current: 1");
//! ```

use std::rc::Rc;

use super::derived::Derived;
use super::dynamic::Dynamic;
use crate::argument::Argument;

/// Builds a text template from literal segments and inserted values.
///
/// Segment `i` is followed by argument `i`; arguments past the last
/// segment are ignored. Only observable arguments are tracked; render
/// functions are called again on each recomputation.
pub fn text(segments: &[&str], arguments: Vec<Argument>) -> Derived<String> {
	let sources: Vec<Dynamic> = arguments
		.iter()
		.filter_map(|argument| match argument {
			Argument::Observable(source) => Some(Rc::clone(source)),
			_ => None,
		})
		.collect();
	let segments: Vec<String> = segments.iter().map(|segment| (*segment).to_owned()).collect();

	Derived::from_dynamic(&sources, move || {
		let mut out = String::new();
		for (index, segment) in segments.iter().enumerate() {
			if let Some(argument) = index.checked_sub(1).and_then(|at| arguments.get(at)) {
				push_argument(&mut out, argument);
			}
			out.push_str(segment);
		}
		out
	})
}

fn push_argument(out: &mut String, argument: &Argument) {
	match argument {
		Argument::Observable(source) => push_argument(out, &source.current()),
		Argument::Render(render) => push_argument(out, &render()),
		Argument::Node(node) => out.push_str(&node.render_to_string()),
		other => out.push_str(&other.as_text().unwrap_or_default()),
	}
}

/// Builds a [`Derived<String>`] from alternating literals and `{ expr }`
/// insertions.
///
/// Every insertion must be followed by a literal, which may be empty.
#[macro_export]
macro_rules! text {
	($first:literal $({ $argument:expr } $segment:literal)*) => {
		$crate::reactive::text::text(
			&[$first $(, $segment)*],
			::std::vec![$($crate::Argument::from($argument)),*],
		)
	};
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::{Observe, State};
	use crate::types::node::Node;
	use rstest::*;

	#[rstest]
	fn test_text_follows_inserted_observable() {
		// Arrange
		let count = State::new(0);
		let label = crate::text!("Current: " {&count} "");

		// Act
		count.update(1);

		// Assert
		assert_eq!(label.value(), "Current: 1");
	}

	#[rstest]
	fn test_text_joins_several_sources() {
		// Arrange
		let first = State::new(String::from("Ada"));
		let age = State::new(36);
		let line = crate::text!("" {&first} " is " {&age} " years old");

		// Act
		first.update(String::from("Grace"));
		age.update(85);

		// Assert
		assert_eq!(line.value(), "Grace is 85 years old");
	}

	#[rstest]
	#[case::empty(Argument::Empty, "[]")]
	#[case::scalar(Argument::from(7), "[7]")]
	#[case::node(Argument::Node(Node::text("a")), "[a]")]
	#[case::render(Argument::render(|| Argument::from("r")), "[r]")]
	#[case::list(Argument::List(vec![String::from("x"), String::from("y")]), "[x y]")]
	fn test_text_formats_static_arguments(#[case] argument: Argument, #[case] expected: &str) {
		// Act
		let value = text(&["[", "]"], vec![argument]);

		// Assert
		assert_eq!(value.value(), expected);
	}

	#[rstest]
	fn test_arguments_past_last_segment_are_ignored() {
		// Act
		let value = text(&["only"], vec![Argument::from("dropped")]);

		// Assert
		assert_eq!(value.value(), "only");
	}
}

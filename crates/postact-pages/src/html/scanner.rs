//! Character stream over template segments.
//!
//! The literal segments of a template are read as one stream. Each step
//! carries a flag telling whether an argument is due right after it, which
//! is the case for the last character of every segment but the final one.
//! An empty non-final segment yields a flagged step with no character.

use postact_core::Argument;

/// One position of the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Step {
	pub(crate) ch: Option<char>,
	pub(crate) flagged: bool,
}

pub(crate) struct Scanner<'a> {
	segments: &'a [&'a str],
	arguments: Vec<Option<Argument>>,
	segment: usize,
	offset: usize,
}

impl<'a> Scanner<'a> {
	pub(crate) fn new(segments: &'a [&'a str], arguments: Vec<Argument>) -> Self {
		Self {
			segments,
			arguments: arguments.into_iter().map(Some).collect(),
			segment: 0,
			offset: 0,
		}
	}

	/// The next step without consuming it
	pub(crate) fn peek(&self) -> Option<Step> {
		self.locate().map(|(step, _, _)| step)
	}

	/// Consumes the next step; `None` once every segment is read
	pub(crate) fn next_step(&mut self) -> Option<Step> {
		let (step, segment, offset) = self.locate()?;
		self.segment = segment;
		self.offset = offset;
		Some(step)
	}

	/// Takes the argument due after the last flagged step.
	///
	/// Each argument can be taken once; later calls yield `Empty`.
	pub(crate) fn take_insertion(&mut self) -> Argument {
		self.segment
			.checked_sub(1)
			.and_then(|index| self.arguments.get_mut(index))
			.and_then(Option::take)
			.unwrap_or(Argument::Empty)
	}

	fn locate(&self) -> Option<(Step, usize, usize)> {
		let text = self.segments.get(self.segment)?;
		let is_final = self.segment + 1 == self.segments.len();

		let Some(ch) = text[self.offset..].chars().next() else {
			if is_final {
				return None;
			}
			let step = Step {
				ch: None,
				flagged: true,
			};
			return Some((step, self.segment + 1, 0));
		};

		let offset = self.offset + ch.len_utf8();
		if offset < text.len() {
			let step = Step {
				ch: Some(ch),
				flagged: false,
			};
			return Some((step, self.segment, offset));
		}

		let step = Step {
			ch: Some(ch),
			flagged: !is_final,
		};
		Some((step, self.segment + 1, 0))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;

	fn steps(scanner: &mut Scanner<'_>) -> Vec<Step> {
		std::iter::from_fn(|| scanner.next_step()).collect()
	}

	#[rstest]
	fn test_last_character_of_segment_is_flagged() {
		// Arrange
		let segments = ["ab", "c"];
		let mut scanner = Scanner::new(&segments, vec![Argument::from(1)]);

		// Act
		let steps = steps(&mut scanner);

		// Assert
		assert_eq!(
			steps,
			vec![
				Step { ch: Some('a'), flagged: false },
				Step { ch: Some('b'), flagged: true },
				Step { ch: Some('c'), flagged: false },
			]
		);
	}

	#[rstest]
	fn test_empty_segment_yields_flagged_step() {
		// Arrange
		let segments = ["", "", "x"];
		let mut scanner = Scanner::new(&segments, vec![Argument::from(1), Argument::from(2)]);

		// Act
		let steps = steps(&mut scanner);

		// Assert
		assert_eq!(
			steps,
			vec![
				Step { ch: None, flagged: true },
				Step { ch: None, flagged: true },
				Step { ch: Some('x'), flagged: false },
			]
		);
	}

	#[rstest]
	fn test_take_insertion_follows_flagged_step() {
		// Arrange
		let segments = ["a", "b", ""];
		let mut scanner = Scanner::new(&segments, vec![Argument::from("one"), Argument::from("two")]);

		// Act
		scanner.next_step();
		let first = scanner.take_insertion();
		let again = scanner.take_insertion();
		scanner.next_step();
		let second = scanner.take_insertion();

		// Assert
		assert_eq!(first.as_text().as_deref(), Some("one"));
		assert!(matches!(again, Argument::Empty));
		assert_eq!(second.as_text().as_deref(), Some("two"));
		assert_eq!(scanner.next_step(), None);
	}

	#[rstest]
	fn test_peek_does_not_consume() {
		// Arrange
		let segments = ["é/"];
		let mut scanner = Scanner::new(&segments, Vec::new());

		// Act
		let peeked = scanner.peek();
		let taken = scanner.next_step();

		// Assert
		assert_eq!(peeked, taken);
		assert_eq!(scanner.peek().and_then(|step| step.ch), Some('/'));
	}
}

//! Recursive descent over the scanner's step stream.

use postact_core::{
	Argument, AttributeValue, ComponentCall, ElementNode, EventHandler, Listener, Node, to_node,
	warn_log,
};

use super::entities::unescape;
use super::error::{ParseError, ParseResult};
use super::scanner::{Scanner, Step};

/// Parses a template given as literal segments interleaved with arguments.
///
/// `segments` must hold exactly one more entry than `arguments`. A template
/// with a single top-level node yields that node; otherwise the top-level
/// nodes are wrapped in a fragment.
pub fn parse(segments: &[&str], arguments: Vec<Argument>) -> ParseResult<Node> {
	if segments.len() != arguments.len() + 1 {
		return Err(ParseError::SegmentCountMismatch {
			expected: arguments.len() + 1,
			arguments: arguments.len(),
			actual: segments.len(),
		});
	}

	let mut parser = Parser {
		scanner: Scanner::new(segments, arguments),
	};
	let mut children = parser.document()?;
	if children.len() == 1
		&& let Some(only) = children.pop()
	{
		return Ok(only);
	}
	Ok(Node::fragment(children, None))
}

/// How an opening tag ended; `flagged` marks an argument right after `>`
enum TagClose {
	Open { flagged: bool },
	SelfClosing { flagged: bool },
}

enum AfterTagName {
	Attributes,
	Close(TagClose),
}

enum EndTag {
	Name(String),
	Component(ComponentCall),
}

enum RawValue {
	Quoted(String),
	Inserted(Argument),
}

struct Parser<'a> {
	scanner: Scanner<'a>,
}

impl Parser<'_> {
	fn step(&mut self) -> ParseResult<Step> {
		self.scanner.next_step().ok_or(ParseError::UnexpectedEnd)
	}

	fn push_insertion(&mut self, children: &mut Vec<Node>) {
		let node = to_node(self.scanner.take_insertion());
		if !node.is_empty() {
			children.push(node);
		}
	}

	fn document(&mut self) -> ParseResult<Vec<Node>> {
		let mut children = Vec::new();
		while let Some(step) = self.scanner.next_step() {
			match step.ch {
				Some('<') => {
					let (node, flagged) = if step.flagged {
						self.component()?
					} else {
						self.element()?
					};
					children.push(node);
					if flagged {
						self.push_insertion(&mut children);
					}
				}
				Some(ch) if !ch.is_whitespace() => return Err(ParseError::ExpectedOpeningTag(ch)),
				_ if step.flagged => self.push_insertion(&mut children),
				_ => {}
			}
		}
		Ok(children)
	}

	/// Parses an element whose `<` was just consumed
	fn element(&mut self) -> ParseResult<(Node, bool)> {
		let (tag, after) = self.tag_name()?;
		let mut element = ElementNode::new(tag.as_str());
		let close = match after {
			AfterTagName::Close(close) => close,
			AfterTagName::Attributes => self.attributes(&mut element)?,
		};

		match close {
			TagClose::SelfClosing { flagged } => Ok((element.into(), flagged)),
			TagClose::Open { flagged } => {
				let (children, end, flagged) = self.children(flagged)?;
				match end {
					EndTag::Name(end) if end == tag => {}
					EndTag::Name(end) => return Err(ParseError::TagMismatch { start: tag, end }),
					EndTag::Component(call) => {
						return Err(ParseError::TagMismatch {
							start: tag,
							end: call.id().to_string(),
						});
					}
				}
				element.set_children(children);
				Ok((element.into(), flagged))
			}
		}
	}

	/// Parses a component tag whose `<` was followed by an insertion
	fn component(&mut self) -> ParseResult<(Node, bool)> {
		let call = match self.scanner.take_insertion() {
			Argument::Component(call) => call,
			_ => return Err(ParseError::InsertionInTagName),
		};

		loop {
			let step = self.step()?;
			match step.ch {
				Some('>') => {
					let (children, end, flagged) = self.children(step.flagged)?;
					match end {
						EndTag::Component(end) if end.id() == call.id() => {}
						EndTag::Component(end) => {
							return Err(ParseError::TagMismatch {
								start: call.id().to_string(),
								end: end.id().to_string(),
							});
						}
						EndTag::Name(end) => {
							return Err(ParseError::TagMismatch {
								start: call.id().to_string(),
								end,
							});
						}
					}
					return Ok((call.invoke(Some(Node::fragment(children, None))), flagged));
				}
				Some('/') if !step.flagged => {
					let flagged = self.expect_close()?;
					return Ok((call.invoke(None), flagged));
				}
				Some('/') => return Err(ParseError::ExpectedClosingSlash),
				Some(ch) if ch.is_whitespace() && !step.flagged => {}
				_ => return Err(ParseError::ComponentAttributes),
			}
		}
	}

	fn tag_name(&mut self) -> ParseResult<(String, AfterTagName)> {
		let mut name = String::new();
		loop {
			let step = self.step()?;
			let Some(ch) = step.ch else {
				return Err(ParseError::InsertionInTagName);
			};
			match ch {
				_ if ch.is_whitespace() => {
					if name.is_empty() {
						return Err(ParseError::InvalidTagCharacter(ch));
					}
					if step.flagged {
						return Err(ParseError::InsertionInAttributeName);
					}
					return Ok((name, AfterTagName::Attributes));
				}
				'>' if !name.is_empty() => {
					let close = TagClose::Open {
						flagged: step.flagged,
					};
					return Ok((name, AfterTagName::Close(close)));
				}
				'/' if !name.is_empty() => {
					if step.flagged {
						return Err(ParseError::ExpectedClosingSlash);
					}
					let flagged = self.expect_close()?;
					return Ok((name, AfterTagName::Close(TagClose::SelfClosing { flagged })));
				}
				_ if step.flagged => return Err(ParseError::InsertionInTagName),
				_ if is_name_char(ch) => name.push(ch),
				_ => return Err(ParseError::InvalidTagCharacter(ch)),
			}
		}
	}

	fn attributes(&mut self, element: &mut ElementNode) -> ParseResult<TagClose> {
		let mut name = String::new();
		let mut after_name = false;
		loop {
			let step = self.step()?;
			let Some(ch) = step.ch else {
				return Err(ParseError::InsertionInAttributeName);
			};
			match ch {
				'>' => {
					flush_valueless(element, &mut name);
					return Ok(TagClose::Open {
						flagged: step.flagged,
					});
				}
				'/' => {
					if step.flagged {
						return Err(ParseError::ExpectedClosingSlash);
					}
					flush_valueless(element, &mut name);
					let flagged = self.expect_close()?;
					return Ok(TagClose::SelfClosing { flagged });
				}
				'=' => {
					if name.is_empty() {
						return Err(ParseError::ExpectedAttributeName);
					}
					let name = std::mem::take(&mut name);
					after_name = false;
					let value = if step.flagged {
						RawValue::Inserted(self.scanner.take_insertion())
					} else {
						self.quoted_value()?
					};
					match value {
						RawValue::Quoted(text) => {
							element.insert_attribute(name, AttributeValue::Text(text));
						}
						RawValue::Inserted(argument) => attribute_from_argument(element, name, argument),
					}
				}
				_ if ch.is_whitespace() => {
					if step.flagged {
						return Err(ParseError::InsertionInAttributeName);
					}
					after_name = !name.is_empty();
				}
				_ if is_name_char(ch) => {
					if after_name {
						flush_valueless(element, &mut name);
						after_name = false;
					}
					if step.flagged {
						return Err(ParseError::InsertionInAttributeName);
					}
					name.push(ch);
				}
				_ if after_name => return Err(ParseError::ExpectedEquals(ch)),
				_ => return Err(ParseError::InvalidAttributeCharacter(ch)),
			}
		}
	}

	fn quoted_value(&mut self) -> ParseResult<RawValue> {
		let opening = loop {
			let step = self.step()?;
			match step.ch {
				Some('"') => break step,
				Some(ch) if ch.is_whitespace() && !step.flagged => {}
				Some(ch) if ch.is_whitespace() => {
					return Ok(RawValue::Inserted(self.scanner.take_insertion()));
				}
				None => return Ok(RawValue::Inserted(self.scanner.take_insertion())),
				Some(_) => return Err(ParseError::ExpectedQuote),
			}
		};

		let mut value = String::new();
		let mut literal = String::new();
		if opening.flagged {
			self.append_insertion(&mut value)?;
		}
		loop {
			let step = self.step()?;
			match step.ch {
				Some('"') => {
					if step.flagged {
						return Err(ParseError::InsertionInAttributeName);
					}
					flush_literal(&mut value, &mut literal)?;
					return Ok(RawValue::Quoted(value));
				}
				Some('\\') => {
					if step.flagged {
						return Err(ParseError::BackslashBeforeInsertion);
					}
					let escaped = self.step()?;
					let Some(ch) = escaped.ch else {
						return Err(ParseError::BackslashBeforeInsertion);
					};
					literal.push('\\');
					literal.push(ch);
					if escaped.flagged {
						flush_literal(&mut value, &mut literal)?;
						self.append_insertion(&mut value)?;
					}
				}
				Some(ch) => {
					literal.push(ch);
					if step.flagged {
						flush_literal(&mut value, &mut literal)?;
						self.append_insertion(&mut value)?;
					}
				}
				None => {
					flush_literal(&mut value, &mut literal)?;
					self.append_insertion(&mut value)?;
				}
			}
		}
	}

	fn append_insertion(&mut self, value: &mut String) -> ParseResult<()> {
		let argument = self.scanner.take_insertion();
		let text = argument
			.as_text()
			.ok_or(ParseError::UnstringifiableInsertion(argument.variant_name()))?;
		value.push_str(&text);
		Ok(())
	}

	/// Parses children up to and including the closing tag
	fn children(&mut self, after_flag: bool) -> ParseResult<(Vec<Node>, EndTag, bool)> {
		let mut children = Vec::new();
		let mut text = String::new();
		if after_flag {
			self.push_insertion(&mut children);
		}

		loop {
			let step = self.step()?;
			match step.ch {
				Some('<') if step.flagged => {
					flush_text(&mut children, &mut text);
					let (node, flagged) = self.component()?;
					children.push(node);
					if flagged {
						self.push_insertion(&mut children);
					}
				}
				Some('<') => {
					flush_text(&mut children, &mut text);
					if self.scanner.peek().and_then(|step| step.ch) == Some('/') {
						let (end, flagged) = self.end_tag()?;
						return Ok((children, end, flagged));
					}
					let (node, flagged) = self.element()?;
					children.push(node);
					if flagged {
						self.push_insertion(&mut children);
					}
				}
				Some(ch) => {
					text.push(ch);
					if step.flagged {
						flush_text(&mut children, &mut text);
						self.push_insertion(&mut children);
					}
				}
				None => {
					flush_text(&mut children, &mut text);
					self.push_insertion(&mut children);
				}
			}
		}
	}

	/// Parses `/name>` or `/${pointer}>` after a `<`
	fn end_tag(&mut self) -> ParseResult<(EndTag, bool)> {
		let slash = self.step()?;
		if slash.flagged {
			let call = match self.scanner.take_insertion() {
				Argument::Component(call) if call.is_pointer() => call,
				Argument::Component(_) => {
					return Err(ParseError::ExpectedComponentPointer("component instance"));
				}
				other => return Err(ParseError::ExpectedComponentPointer(other.variant_name())),
			};
			let flagged = self.expect_close_after_whitespace()?;
			return Ok((EndTag::Component(call), flagged));
		}

		let mut name = String::new();
		let mut trailing_space = false;
		loop {
			let step = self.step()?;
			let Some(ch) = step.ch else {
				return Err(ParseError::InsertionInTagName);
			};
			match ch {
				'>' => return Ok((EndTag::Name(name), step.flagged)),
				_ if step.flagged => return Err(ParseError::InsertionInTagName),
				_ if ch.is_whitespace() => trailing_space = !name.is_empty(),
				_ if is_name_char(ch) && !trailing_space => name.push(ch),
				_ => return Err(ParseError::InvalidTagCharacter(ch)),
			}
		}
	}

	fn expect_close(&mut self) -> ParseResult<bool> {
		let step = self.step()?;
		match step.ch {
			Some('>') => Ok(step.flagged),
			_ => Err(ParseError::ExpectedClosingSlash),
		}
	}

	fn expect_close_after_whitespace(&mut self) -> ParseResult<bool> {
		loop {
			let step = self.step()?;
			match step.ch {
				Some('>') => return Ok(step.flagged),
				Some(ch) if ch.is_whitespace() && !step.flagged => {}
				_ => return Err(ParseError::ExpectedClosingSlash),
			}
		}
	}
}

fn is_name_char(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || ch == '-'
}

fn flush_valueless(element: &mut ElementNode, name: &mut String) {
	if !name.is_empty() {
		element.insert_attribute(std::mem::take(name), AttributeValue::Text("true".to_string()));
	}
}

fn flush_text(children: &mut Vec<Node>, text: &mut String) {
	let run = std::mem::take(text);
	if !run.trim().is_empty() {
		children.push(Node::text(unescape(&run)));
	}
}

fn flush_literal(value: &mut String, literal: &mut String) -> ParseResult<()> {
	if literal.is_empty() {
		return Ok(());
	}
	let run = std::mem::take(literal);
	let decoded: String = serde_json::from_str(&format!("\"{run}\"")).map_err(|error| {
		ParseError::InvalidStringLiteral {
			literal: run.clone(),
			reason: error.to_string(),
		}
	})?;
	value.push_str(&decoded);
	Ok(())
}

/// Stores an inserted attribute value, moving `on…` handlers to listeners
fn attribute_from_argument(element: &mut ElementNode, name: String, argument: Argument) {
	let value = match argument {
		Argument::Empty => return,
		Argument::Text(scalar) => AttributeValue::Text(scalar.to_string()),
		Argument::Observable(source) => AttributeValue::Observable(source),
		Argument::Ref(node_ref) => AttributeValue::Ref(node_ref),
		Argument::List(items) => AttributeValue::List(items),
		Argument::Style(style) => AttributeValue::Style(style),
		Argument::Handler(handler) => {
			push_listener(element, &name, handler);
			return;
		}
		Argument::Render(render) => {
			// A render function under `on…` runs as the handler, its result discarded.
			let handler = EventHandler::new(move |_| {
				render();
			});
			push_listener(element, &name, handler);
			return;
		}
		other @ (Argument::Node(_) | Argument::Component(_)) => {
			warn_log!(
				"a {} cannot be used as the value of attribute `{name}`; dropping it",
				other.variant_name()
			);
			return;
		}
	};
	element.insert_attribute(name, value);
}

fn push_listener(element: &mut ElementNode, name: &str, handler: EventHandler) {
	match name.strip_prefix("on").filter(|event| !event.is_empty()) {
		Some(event) => element.push_listener(Listener::new(event, handler)),
		None => warn_log!("dropping event handler bound to non-event attribute `{name}`"),
	}
}

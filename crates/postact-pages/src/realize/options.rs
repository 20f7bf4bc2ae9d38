//! Realization options.

use serde::{Deserialize, Serialize};

/// Options for realizing a node tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealizeOptions {
	/// Label region anchors with a random identifier.
	///
	/// The start anchor holds the identifier and the end anchor holds it
	/// prefixed with `/`, which makes regions easy to spot in page dumps.
	pub debug: bool,
}

impl RealizeOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets whether anchors carry debug identifiers.
	pub fn debug(mut self, enable: bool) -> Self {
		self.debug = enable;
		self
	}
}

//! Errors raised by page operations.

use thiserror::Error;

/// Failure of a page tree operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DomError {
	/// Text and comment nodes cannot hold children
	#[error("{0} nodes cannot have children")]
	NotAContainer(&'static str),

	/// The reference or removed node is not a child of the target
	#[error("the node is not a child of this node")]
	NotAChild,

	/// A node cannot be inserted below itself
	#[error("a node cannot be inserted into its own subtree")]
	HierarchyRequest,

	/// Nodes from different documents cannot be mixed
	#[error("the node belongs to a different document")]
	WrongDocument,

	/// Attribute, style and listener operations need an element
	#[error("{0} requires an element node")]
	NotAnElement(&'static str),
}

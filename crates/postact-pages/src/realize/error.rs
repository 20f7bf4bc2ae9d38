//! Realization errors.

use postact_core::DomError;
use thiserror::Error;

/// Failure to project a node tree into the page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RealizeError {
	/// No document has been entered on this thread
	#[error("no document is active; enter one with Document::enter")]
	NoDocument,

	/// A deferred render produced something that is still a function
	#[error("a deferred render returned a {0}, which cannot be realized")]
	UnresolvableRender(&'static str),

	/// A page tree operation failed
	#[error(transparent)]
	Dom(#[from] DomError),
}

/// Result alias for realization
pub type RealizeResult<T> = Result<T, RealizeError>;

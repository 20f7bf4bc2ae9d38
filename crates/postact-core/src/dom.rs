//! In-memory page.
//!
//! A [`Document`] owns an arena of element, text, comment and fragment
//! nodes. [`DomNode`] is a cheap handle into that arena exposing the
//! subset of page operations the realization engine relies on: creation,
//! insertion and removal, attributes, inline style, event listeners and
//! HTML serialization for inspection.
//!
//! Realization needs an active document. Enter one on the current thread
//! with [`Document::enter`]; [`document`] returns the innermost entered
//! document.

mod context;
mod document;
mod error;
mod event;

pub use context::{DocumentGuard, document};
pub use document::{Document, DomNode, DomNodeType};
pub use error::DomError;
pub use event::{Event, EventHandler};

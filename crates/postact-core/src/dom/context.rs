//! The active document for the current thread.

use core::cell::RefCell;

use super::Document;

thread_local! {
	static ACTIVE_DOCUMENTS: RefCell<Vec<Document>> = const { RefCell::new(Vec::new()) };
}

/// Returns the innermost document entered on this thread
pub fn document() -> Option<Document> {
	ACTIVE_DOCUMENTS.with(|stack| stack.borrow().last().cloned())
}

/// Keeps a document active until dropped.
///
/// Guards nest; dropping one restores the previously active document.
#[must_use = "the document is only active while the guard is alive"]
#[derive(Debug)]
pub struct DocumentGuard {
	_private: (),
}

impl DocumentGuard {
	pub(super) fn push(document: Document) -> Self {
		ACTIVE_DOCUMENTS.with(|stack| stack.borrow_mut().push(document));
		Self { _private: () }
	}
}

impl Drop for DocumentGuard {
	fn drop(&mut self) {
		ACTIVE_DOCUMENTS.with(|stack| {
			stack.borrow_mut().pop();
		});
	}
}

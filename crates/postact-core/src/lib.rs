//! # Postact Core
//!
//! Building blocks shared by the postact parser and realization engine.
//!
//! ## Modules
//!
//! - [`reactive`]: observable values (`Observable`, `State`, `Derived`, `NodeRef`, `Later`,
//!   `Store`) and `text!` templates
//! - [`types`]: the node descriptor tree produced by the markup parser
//! - [`argument`]: classification of values inserted into markup
//! - [`component`]: component wrapper handles
//! - [`dom`]: the in-memory page that realized trees are projected into
//! - [`logging`]: `tracing`-backed logging macros
//!
//! ## Example
//!
//! ```ignore
//! use postact_core::reactive::{Observe, State};
//!
//! let count = State::new(0);
//! count.update(1);
//! assert_eq!(count.value(), 1);
//! ```

#![warn(missing_docs)]

pub mod argument;
pub mod component;
pub mod dom;
pub mod logging;
pub mod reactive;
pub mod types;

pub use argument::{Argument, ArgumentKind, RenderFn, Scalar, identify, to_node};
pub use component::{Component, ComponentCall, ComponentId, ComponentKind, Props};
pub use dom::{Document, DomError, DomNode, Event, EventHandler};
pub use reactive::{
	Derived, Dynamic, IntoDynamic, Later, NodeRef, Observable, ObservableId, ObservableKind,
	Observe, State, Store, StoreField, Subscribable, Subscription, later, text,
};
pub use types::node::{
	AttributeValue, DeferredRender, ElementNode, FragmentNode, Listener, Node, NodeTag,
	StyleDeclaration, StyleValue, TextNode,
};

#[doc(hidden)]
pub mod __private {
	pub use tracing;
}
